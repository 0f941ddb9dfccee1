//! The syscall seam behind [`Attributes`](crate::Attributes)
//!
//! [`XattrBackend`] mirrors the four raw syscalls one-to-one: an empty buffer
//! is a size probe, a non-empty one is a fetch, and failures are errno values.
//! Everything else (probe-then-fetch, absence policy, name decoding) lives in
//! the accessor, so a recording backend can check it without touching disk.

use crate::accessor::SetOptions;
use crate::error::{Result, XattrError};
use nix::errno::Errno;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use xattr_native::{syscall, SyscallOptions};

/// Raw extended attribute syscalls on a local path
pub trait XattrBackend {
    /// `getxattr`: probe when `buffer` is empty, otherwise fetch into it
    ///
    /// # Errors
    ///
    /// [`XattrError::System`] with the OS errno.
    fn get(&self, path: &Path, name: &str, buffer: &mut [u8], follow_links: bool)
        -> Result<usize>;

    /// `setxattr` with the create/replace constraints from `options`
    ///
    /// # Errors
    ///
    /// [`XattrError::System`] with the OS errno.
    fn set(&self, path: &Path, name: &str, value: &[u8], options: &SetOptions) -> Result<()>;

    /// `removexattr`
    ///
    /// # Errors
    ///
    /// [`XattrError::System`] with the OS errno, including the not-found one.
    fn remove(&self, path: &Path, name: &str, follow_links: bool) -> Result<()>;

    /// `listxattr`: probe when `buffer` is empty, otherwise fetch into it
    ///
    /// # Errors
    ///
    /// [`XattrError::System`] with the OS errno.
    fn list(&self, path: &Path, buffer: &mut [u8], follow_links: bool) -> Result<usize>;

    /// The errno this backend reports for a missing attribute
    fn not_found_errno(&self) -> Errno {
        xattr_native::ATTR_NOT_FOUND
    }
}

/// The host OS syscalls, via `xattr-native`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl NativeBackend {
    /// Same as [`NativeBackend::default`]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_supported() -> Result<()> {
        if xattr_native::SUPPORTED {
            Ok(())
        } else {
            Err(XattrError::Unsupported(
                "no path-based xattr syscalls on this target",
            ))
        }
    }
}

fn follow(follow_links: bool) -> SyscallOptions {
    if follow_links {
        SyscallOptions::empty()
    } else {
        SyscallOptions::NOFOLLOW
    }
}

/// Paths and names must be NUL-free to reach the kernel
pub(crate) fn c_path(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| XattrError::System(Errno::EINVAL))
}

pub(crate) fn c_name(name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| XattrError::System(Errno::EINVAL))
}

impl From<&SetOptions> for SyscallOptions {
    fn from(options: &SetOptions) -> Self {
        let mut raw = follow(options.follow_links);
        raw.set(SyscallOptions::CREATE, options.fail_if_exists);
        raw.set(SyscallOptions::REPLACE, options.fail_if_missing);
        raw
    }
}

impl XattrBackend for NativeBackend {
    fn get(
        &self,
        path: &Path,
        name: &str,
        buffer: &mut [u8],
        follow_links: bool,
    ) -> Result<usize> {
        Self::check_supported()?;
        let (path, name) = (c_path(path)?, c_name(name)?);
        Ok(syscall::getxattr(&path, &name, buffer, follow(follow_links))?)
    }

    fn set(&self, path: &Path, name: &str, value: &[u8], options: &SetOptions) -> Result<()> {
        Self::check_supported()?;
        let (path, name) = (c_path(path)?, c_name(name)?);
        Ok(syscall::setxattr(&path, &name, value, options.into())?)
    }

    fn remove(&self, path: &Path, name: &str, follow_links: bool) -> Result<()> {
        Self::check_supported()?;
        let (path, name) = (c_path(path)?, c_name(name)?);
        Ok(syscall::removexattr(&path, &name, follow(follow_links))?)
    }

    fn list(&self, path: &Path, buffer: &mut [u8], follow_links: bool) -> Result<usize> {
        Self::check_supported()?;
        let path = c_path(path)?;
        Ok(syscall::listxattr(&path, buffer, follow(follow_links))?)
    }
}
