//! Targets for path-scoped attribute operations
//!
//! Attribute operations only make sense on local file-system paths. A
//! [`Location`] records what the caller handed us so that anything else
//! (an `https://` URL, a `file://` URL naming a remote host) is rejected
//! with [`XattrError::NotFileLocation`] before any syscall is issued.

use crate::error::{Result, XattrError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// A local path or a non-local resource locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A local file-system path
    File(PathBuf),
    /// Any locator that does not resolve to a local path
    Remote(Url),
}

/// Schemes without an authority that are still taken as URLs
const OPAQUE_SCHEMES: &[&str] = &["data", "mailto", "urn", "tel", "about", "blob"];

impl Location {
    /// Interpret a string as a path or a URL
    ///
    /// Strings carrying a `scheme://` prefix, starting with `file:`, or using
    /// a well-known opaque scheme (`data:`, `mailto:`, `urn:`, `tel:`,
    /// `about:`, `blob:`) are parsed as URLs; `file:` URLs on the local host
    /// become paths. Anything else is taken as a path, so relative paths such
    /// as `notes:draft.txt` stay paths.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.contains("://") || has_url_scheme(input) {
            if let Ok(url) = Url::parse(input) {
                return Self::from(url);
            }
        }
        Self::File(PathBuf::from(input))
    }

    /// The local path, or [`XattrError::NotFileLocation`]
    ///
    /// # Errors
    ///
    /// Fails for [`Location::Remote`].
    pub fn file_path(&self) -> Result<&Path> {
        match self {
            Self::File(path) => Ok(path),
            Self::Remote(url) => Err(XattrError::not_file_location(url.as_str())),
        }
    }

    /// Whether this is a local file-system path
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

fn has_url_scheme(input: &str) -> bool {
    input.split_once(':').is_some_and(|(scheme, _)| {
        scheme.eq_ignore_ascii_case("file")
            || OPAQUE_SCHEMES
                .iter()
                .any(|known| scheme.eq_ignore_ascii_case(known))
    })
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return Self::File(path);
            }
        }
        Self::Remote(url)
    }
}

impl From<&Url> for Location {
    fn from(url: &Url) -> Self {
        Self::from(url.clone())
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&PathBuf> for Location {
    fn from(path: &PathBuf) -> Self {
        Self::File(path.clone())
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<&str> for Location {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl From<String> for Location {
    fn from(input: String) -> Self {
        Self::parse(&input)
    }
}

impl From<&Location> for Location {
    fn from(location: &Location) -> Self {
        location.clone()
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(input))
    }
}
