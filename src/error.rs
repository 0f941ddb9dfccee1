//! Error types for extended attribute operations

use nix::errno::Errno;
use std::io;

/// Errors returned by every fallible operation in this crate
#[derive(Debug, thiserror::Error)]
pub enum XattrError {
    /// The target is not a local file-system location (e.g. an `https://` URL).
    /// Raised before any syscall is attempted.
    #[error("not a local file location: {location}")]
    NotFileLocation {
        /// The rejected locator, as given
        location: String,
    },

    /// An OS call failed; carries the original errno
    #[error("system error: {0}")]
    System(#[from] Errno),

    /// This target has no path-based xattr syscalls
    #[error("extended attributes unsupported: {0}")]
    Unsupported(&'static str),
}

impl XattrError {
    /// The raw OS error number, for [`XattrError::System`]
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::System(errno) => Some(*errno as i32),
            _ => None,
        }
    }

    /// The wrapped errno, for [`XattrError::System`]
    #[must_use]
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::System(errno) => Some(*errno),
            _ => None,
        }
    }

    pub(crate) fn not_file_location(location: impl Into<String>) -> Self {
        Self::NotFileLocation {
            location: location.into(),
        }
    }
}

impl From<XattrError> for io::Error {
    fn from(error: XattrError) -> Self {
        let kind = match error {
            XattrError::System(errno) => return io::Error::from_raw_os_error(errno as i32),
            XattrError::NotFileLocation { .. } => io::ErrorKind::InvalidInput,
            XattrError::Unsupported(_) => io::ErrorKind::Unsupported,
        };
        io::Error::new(kind, error)
    }
}

/// Result type for extended attribute operations
pub type Result<T> = std::result::Result<T, XattrError>;
