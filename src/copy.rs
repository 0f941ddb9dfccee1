//! Copy the attributes an intent preserves from one file to another
//!
//! Not atomic: attributes are read and written one at a time, and another
//! process can change either file in between.

use crate::accessor::{Attributes, SetOptions};
use crate::backend::XattrBackend;
use crate::error::Result;
use crate::intent::OperationIntent;
use crate::location::Location;
use std::ffi::OsString;
use tracing::debug;

/// What [`copy_for_intent`] did with each source attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Written to the destination
    pub copied: Vec<String>,
    /// Not preserved under the intent, or not UTF-8
    pub skipped: Vec<OsString>,
    /// Listed on the source but gone by the time it was read
    pub vanished: Vec<String>,
}

/// Copy every attribute of `source` that `intent` preserves onto
/// `destination`
///
/// Existing destination attributes with the same name are overwritten;
/// others are left alone. When `filter` is given, only names it accepts are
/// considered (e.g. to stay inside the `user.` namespace on Linux).
///
/// # Errors
///
/// - [`XattrError::NotFileLocation`](crate::XattrError::NotFileLocation) if
///   either side is not local
/// - [`XattrError::System`](crate::XattrError::System) from any list, get or
///   set call
pub fn copy_for_intent<B: XattrBackend>(
    attributes: &Attributes<B>,
    source: impl Into<Location>,
    destination: impl Into<Location>,
    intent: OperationIntent,
    follow_links: bool,
    filter: Option<&dyn Fn(&str) -> bool>,
) -> Result<CopyReport> {
    let source = source.into();
    let destination = destination.into();
    // Reject a remote destination before reading anything
    destination.file_path()?;

    let options = SetOptions::new().follow_links(follow_links);
    let mut report = CopyReport::default();

    for raw_name in attributes.list_raw(&source, follow_links)? {
        let Some(name) = raw_name.to_str() else {
            debug!(name = ?raw_name, "skipping non-UTF-8 attribute name");
            report.skipped.push(raw_name);
            continue;
        };
        if !filter.is_none_or(|accept| accept(name)) {
            debug!(name, "attribute excluded by filter");
            report.skipped.push(raw_name.clone());
            continue;
        }
        if !intent.preserves_name(name) {
            debug!(name, %intent, "attribute not preserved for intent");
            report.skipped.push(raw_name.clone());
            continue;
        }

        match attributes.get(&source, name, follow_links)? {
            Some(value) => {
                attributes.set(&destination, name, &value, options)?;
                report.copied.push(name.to_owned());
            }
            None => {
                debug!(name, "attribute vanished between list and get");
                report.vanished.push(name.to_owned());
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XattrError;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Two in-memory files keyed by path
    #[derive(Default)]
    struct MemoryBackend {
        files: RefCell<BTreeMap<PathBuf, BTreeMap<String, Vec<u8>>>>,
        /// Names listed on every file but never readable
        phantom: Vec<String>,
    }

    impl MemoryBackend {
        fn attrs(&self, path: &str) -> BTreeMap<String, Vec<u8>> {
            self.files
                .borrow()
                .get(Path::new(path))
                .cloned()
                .unwrap_or_default()
        }
    }

    impl XattrBackend for MemoryBackend {
        fn get(&self, path: &Path, name: &str, buffer: &mut [u8], _: bool) -> Result<usize> {
            let files = self.files.borrow();
            let value = files
                .get(path)
                .and_then(|attrs| attrs.get(name))
                .ok_or(nix::errno::Errno::ENODATA)?;
            if !buffer.is_empty() {
                buffer[..value.len()].copy_from_slice(value);
            }
            Ok(value.len())
        }

        fn set(&self, path: &Path, name: &str, value: &[u8], _: &SetOptions) -> Result<()> {
            self.files
                .borrow_mut()
                .entry(path.to_path_buf())
                .or_default()
                .insert(name.into(), value.into());
            Ok(())
        }

        fn remove(&self, _: &Path, _: &str, _: bool) -> Result<()> {
            Ok(())
        }

        fn list(&self, path: &Path, buffer: &mut [u8], _: bool) -> Result<usize> {
            let mut packed = Vec::new();
            let files = self.files.borrow();
            let names = files
                .get(path)
                .into_iter()
                .flat_map(|attrs| attrs.keys())
                .chain(self.phantom.iter());
            for name in names {
                packed.extend_from_slice(name.as_bytes());
                packed.push(0);
            }
            if !buffer.is_empty() {
                buffer[..packed.len()].copy_from_slice(&packed);
            }
            Ok(packed.len())
        }

        fn not_found_errno(&self) -> nix::errno::Errno {
            nix::errno::Errno::ENODATA
        }
    }

    fn seeded() -> Attributes<MemoryBackend> {
        let attrs = Attributes::with_backend(MemoryBackend::default());
        for (name, value) in [
            ("user.plain", "p"),
            ("user.sum#C", "c"),
            ("user.bookmark#S", "s"),
            ("user.private#P", "x"),
            ("user.scratch#N", "n"),
        ] {
            attrs
                .set("/src", name, value.as_bytes(), SetOptions::default())
                .unwrap();
        }
        attrs
    }

    #[test]
    fn test_copy_keeps_all_but_never_preserve() {
        let attrs = seeded();
        let report =
            copy_for_intent(&attrs, "/src", "/dst", OperationIntent::Copy, true, None)
                .unwrap();

        assert_eq!(report.copied.len(), 4);
        assert_eq!(report.skipped, vec![OsString::from("user.scratch#N")]);
        assert!(attrs.backend().attrs("/dst").contains_key("user.private#P"));
        assert!(!attrs.backend().attrs("/dst").contains_key("user.scratch#N"));
    }

    #[test]
    fn test_sync_keeps_only_syncable() {
        let attrs = seeded();
        let report =
            copy_for_intent(&attrs, "/src", "/dst", OperationIntent::Sync, true, None)
                .unwrap();

        assert_eq!(report.copied, vec!["user.bookmark#S"]);
        assert_eq!(
            attrs.backend().attrs("/dst").get("user.bookmark#S"),
            Some(&b"s".to_vec())
        );
    }

    #[test]
    fn test_save_and_share_policies() {
        let attrs = seeded();
        let save =
            copy_for_intent(&attrs, "/src", "/save", OperationIntent::Save, true, None)
                .unwrap();
        assert!(!save.copied.contains(&"user.sum#C".to_string()));
        assert!(save.copied.contains(&"user.private#P".to_string()));

        let share =
            copy_for_intent(&attrs, "/src", "/share", OperationIntent::Share, true, None)
                .unwrap();
        assert!(share.copied.contains(&"user.sum#C".to_string()));
        assert!(!share.copied.contains(&"user.private#P".to_string()));
    }

    #[test]
    fn test_filter_limits_names() {
        let attrs = seeded();
        let only_plain = |name: &str| name == "user.plain";
        let report =
            copy_for_intent(&attrs, "/src", "/dst", OperationIntent::Copy, true, Some(&only_plain))
                .unwrap();

        assert_eq!(report.copied, vec!["user.plain"]);
        assert_eq!(report.skipped.len(), 4);
    }

    #[test]
    fn test_vanished_attribute_is_reported() {
        let attrs = Attributes::with_backend(MemoryBackend {
            phantom: vec!["user.ghost".into()],
            ..MemoryBackend::default()
        });
        let report =
            copy_for_intent(&attrs, "/src", "/dst", OperationIntent::Copy, true, None)
                .unwrap();
        assert_eq!(report.vanished, vec!["user.ghost"]);
        assert!(report.copied.is_empty());
    }

    #[test]
    fn test_remote_destination_rejected_up_front() {
        let attrs = seeded();
        let err = copy_for_intent(
            &attrs,
            "/src",
            "https://example.com/dst",
            OperationIntent::Copy,
            true,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, XattrError::NotFileLocation { .. }));
        assert!(attrs.backend().attrs("/dst").is_empty());
    }
}
