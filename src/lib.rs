//! # xattr-ops
//!
//! Extended attribute (xattr) access for local files, plus the Darwin
//! conventions layered on top of it:
//! - get / set / remove / list on a path, with or without following symlinks
//! - `XATTR_CREATE` / `XATTR_REPLACE` style existence constraints on set
//! - The `name#CS` flag-suffix convention ([`XattrFlags`])
//! - Copy/save/share/sync preservation policy ([`OperationIntent`])
//! - Copying the attributes an intent preserves ([`copy_for_intent`])
//!
//! Every operation is a synchronous, stateless call into the OS. A missing
//! attribute is not an error: [`get`] returns `Ok(None)` and [`remove`]
//! succeeds. Every other OS failure is returned as [`XattrError::System`]
//! with its original errno.
//!
//! ## Example
//!
//! ```rust,no_run
//! use xattr_ops::{OperationIntent, XattrFlags};
//!
//! # fn example() -> xattr_ops::Result<()> {
//! // Attribute that should follow the file to other devices of the same user
//! let name = XattrFlags::SYNCABLE.apply("com.example.bookmark")?;
//! xattr_ops::set("report.pdf", &name, b"page=12")?;
//!
//! assert!(OperationIntent::Sync.preserves_name(&name));
//! assert_eq!(xattr_ops::get("report.pdf", &name)?, Some(b"page=12".to_vec()));
//!
//! // Only local paths are accepted
//! assert!(xattr_ops::list("https://example.com/report.pdf").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! Note: path operations are implemented for Linux, Android, macOS and iOS.
//! Elsewhere they return [`XattrError::Unsupported`].

pub mod accessor;
pub mod backend;
pub mod copy;
pub mod error;
pub mod flags;
pub mod intent;
pub mod location;
pub mod naming;

// Re-export main types
pub use accessor::{Attributes, SetOptions};
pub use backend::{NativeBackend, XattrBackend};
pub use copy::{copy_for_intent, CopyReport};
pub use error::{Result, XattrError};
pub use flags::XattrFlags;
pub use intent::{OperationIntent, ParseIntentError, UnknownIntent};
pub use location::Location;
pub use naming::{HostNaming, NamingHelpers, PortableNaming};

/// Read an attribute, following symlinks; `Ok(None)` if it does not exist
///
/// # Errors
///
/// See [`Attributes::get`].
pub fn get(location: impl Into<Location>, name: &str) -> Result<Option<Vec<u8>>> {
    Attributes::new().get(location, name, true)
}

/// Create or overwrite an attribute, following symlinks
///
/// # Errors
///
/// See [`Attributes::set`].
pub fn set(location: impl Into<Location>, name: &str, value: &[u8]) -> Result<()> {
    Attributes::new().set(location, name, value, SetOptions::default())
}

/// Remove an attribute, following symlinks; succeeds if it does not exist
///
/// # Errors
///
/// See [`Attributes::remove`].
pub fn remove(location: impl Into<Location>, name: &str) -> Result<()> {
    Attributes::new().remove(location, name, true)
}

/// List UTF-8 attribute names, following symlinks
///
/// # Errors
///
/// See [`Attributes::list`].
pub fn list(location: impl Into<Location>) -> Result<Vec<String>> {
    Attributes::new().list(location, true)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feature flags available
pub mod features {
    /// Use the built-in flag/intent rules even where libSystem provides them
    pub const PORTABLE_NAMING: &str = "portable-naming";

    /// Whether the codecs are using the built-in rules in this build
    pub const USES_PORTABLE_NAMING: bool = cfg!(any(
        feature = "portable-naming",
        not(any(target_os = "macos", target_os = "ios"))
    ));
}
