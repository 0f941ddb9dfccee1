//! Get, set, remove and list extended attributes on a path
//!
//! # Absence policy
//!
//! A missing attribute is an ordinary outcome, not an error:
//! - [`Attributes::get`] returns `Ok(None)`
//! - [`Attributes::remove`] returns `Ok(())`
//!
//! Every other OS failure comes back as [`XattrError::System`] with the
//! original errno. There are no retries: if an attribute changes size between
//! the probe and the fetch, the OS error (typically `ERANGE`) is returned.

use crate::backend::{NativeBackend, XattrBackend};
use crate::error::{Result, XattrError};
use crate::location::Location;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use tracing::{debug, trace, warn};

/// Options for [`Attributes::set`]
///
/// `fail_if_exists` and `fail_if_missing` map to `XATTR_CREATE` and
/// `XATTR_REPLACE`. Requesting both is passed through; the OS decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Follow a trailing symlink (default `true`)
    pub follow_links: bool,
    /// Only create; fail with `EEXIST` if the attribute is already there
    pub fail_if_exists: bool,
    /// Only replace; fail if the attribute does not exist yet
    pub fail_if_missing: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            fail_if_exists: false,
            fail_if_missing: false,
        }
    }
}

impl SetOptions {
    /// Same as [`SetOptions::default`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    #[must_use]
    pub fn fail_if_exists(mut self, fail_if_exists: bool) -> Self {
        self.fail_if_exists = fail_if_exists;
        self
    }

    #[must_use]
    pub fn fail_if_missing(mut self, fail_if_missing: bool) -> Self {
        self.fail_if_missing = fail_if_missing;
        self
    }
}

/// Extended attribute accessor over an [`XattrBackend`]
///
/// # Example
///
/// ```rust,no_run
/// use xattr_ops::{Attributes, SetOptions};
///
/// # fn example() -> xattr_ops::Result<()> {
/// let attrs = Attributes::new();
/// attrs.set("notes.txt", "user.color", b"blue", SetOptions::default())?;
///
/// assert_eq!(attrs.get("notes.txt", "user.color", true)?, Some(b"blue".to_vec()));
/// for name in attrs.list("notes.txt", true)? {
///     println!("{name}");
/// }
///
/// attrs.remove("notes.txt", "user.color", true)?;
/// attrs.remove("notes.txt", "user.color", true)?; // still fine
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attributes<B = NativeBackend> {
    backend: B,
}

impl Attributes<NativeBackend> {
    /// An accessor backed by the host OS syscalls
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: NativeBackend,
        }
    }
}

impl<B: XattrBackend> Attributes<B> {
    /// An accessor that issues every call through `backend`
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The backend calls go through
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn is_not_found(&self, error: &XattrError) -> bool {
        error.errno() == Some(self.backend.not_found_errno())
    }

    /// Read an attribute value
    ///
    /// Probes the size with an empty buffer, then fetches into a buffer of
    /// exactly that size. If you want to use xattr flags, apply them to the
    /// name first (see [`XattrFlags::apply`](crate::XattrFlags::apply)).
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the attribute does not exist.
    ///
    /// # Errors
    ///
    /// - [`XattrError::NotFileLocation`] for a non-local location
    /// - [`XattrError::System`] for any other OS failure, including a size
    ///   change between probe and fetch
    pub fn get(
        &self,
        location: impl Into<Location>,
        name: &str,
        follow_links: bool,
    ) -> Result<Option<Vec<u8>>> {
        let location = location.into();
        let path = location.file_path()?;
        debug!(path = %path.display(), name, follow_links, "get extended attribute");

        let size = match self.backend.get(path, name, &mut [], follow_links) {
            Ok(size) => size,
            Err(error) if self.is_not_found(&error) => return Ok(None),
            Err(error) => return Err(error),
        };
        trace!(size, "probed attribute size");
        if size == 0 {
            return Ok(Some(Vec::new()));
        }

        let mut value = vec![0u8; size];
        let read = self.backend.get(path, name, &mut value, follow_links)?;
        value.truncate(read);
        Ok(Some(value))
    }

    /// Create or overwrite an attribute with a single syscall
    ///
    /// # Errors
    ///
    /// - [`XattrError::NotFileLocation`] for a non-local location
    /// - [`XattrError::System`] for OS failures, e.g. `EEXIST` under
    ///   `fail_if_exists`
    pub fn set(
        &self,
        location: impl Into<Location>,
        name: &str,
        value: &[u8],
        options: SetOptions,
    ) -> Result<()> {
        let location = location.into();
        let path = location.file_path()?;
        debug!(
            path = %path.display(),
            name,
            len = value.len(),
            ?options,
            "set extended attribute"
        );
        self.backend.set(path, name, value, &options)
    }

    /// Remove an attribute; removing one that does not exist succeeds
    ///
    /// # Errors
    ///
    /// - [`XattrError::NotFileLocation`] for a non-local location
    /// - [`XattrError::System`] for any OS failure other than "no such
    ///   attribute"
    pub fn remove(
        &self,
        location: impl Into<Location>,
        name: &str,
        follow_links: bool,
    ) -> Result<()> {
        let location = location.into();
        let path = location.file_path()?;
        debug!(path = %path.display(), name, follow_links, "remove extended attribute");

        match self.backend.remove(path, name, follow_links) {
            Err(error) if self.is_not_found(&error) => {
                trace!(name, "attribute already absent");
                Ok(())
            }
            other => other,
        }
    }

    /// List attribute names as UTF-8 strings
    ///
    /// Names that are not valid UTF-8 are left out and logged at `warn`
    /// level; use [`Attributes::list_raw`] to see them.
    ///
    /// # Errors
    ///
    /// - [`XattrError::NotFileLocation`] for a non-local location
    /// - [`XattrError::System`] for OS failures
    pub fn list(&self, location: impl Into<Location>, follow_links: bool) -> Result<Vec<String>> {
        let location = location.into();
        let buffer = self.fetch_name_list(&location, follow_links)?;

        let mut names = Vec::new();
        for segment in split_names(&buffer) {
            match std::str::from_utf8(segment) {
                Ok(name) => names.push(name.to_owned()),
                Err(e) => warn!(
                    location = %location,
                    name = %String::from_utf8_lossy(segment),
                    "skipping non-UTF-8 extended attribute name: {e}"
                ),
            }
        }
        Ok(names)
    }

    /// List attribute names as raw OS strings, UTF-8 or not
    ///
    /// # Errors
    ///
    /// - [`XattrError::NotFileLocation`] for a non-local location
    /// - [`XattrError::System`] for OS failures
    pub fn list_raw(
        &self,
        location: impl Into<Location>,
        follow_links: bool,
    ) -> Result<Vec<OsString>> {
        let location = location.into();
        let buffer = self.fetch_name_list(&location, follow_links)?;
        Ok(split_names(&buffer)
            .map(|segment| OsStr::from_bytes(segment).to_os_string())
            .collect())
    }

    fn fetch_name_list(&self, location: &Location, follow_links: bool) -> Result<Vec<u8>> {
        let path = location.file_path()?;
        debug!(path = %path.display(), follow_links, "list extended attributes");

        let size = self.backend.list(path, &mut [], follow_links)?;
        trace!(size, "probed name list size");
        if size == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0u8; size];
        let read = self.backend.list(path, &mut buffer, follow_links)?;
        buffer.truncate(read);
        Ok(buffer)
    }
}

/// Split a packed `name\0name\0` buffer, dropping empty segments
fn split_names(buffer: &[u8]) -> impl Iterator<Item = &[u8]> {
    buffer
        .split(|&byte| byte == 0)
        .filter(|segment| !segment.is_empty())
}
