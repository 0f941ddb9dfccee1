//! Path-based extended attribute syscalls
//!
//! # Platform Differences
//!
//! ## Linux / Android:
//! - `getxattr(path, name, value, size)` - 4 args, `lgetxattr` for no-follow
//! - `setxattr(path, name, value, size, flags)` - 5 args, `lsetxattr` for no-follow
//! - `listxattr(path, list, size)` - 3 args, `llistxattr` for no-follow
//! - `removexattr(path, name)` - 2 args, `lremovexattr` for no-follow
//!
//! ## macOS / iOS:
//! - `getxattr(path, name, value, size, position, options)` - 6 args
//! - `setxattr(path, name, value, size, position, options)` - 6 args
//! - `listxattr(path, list, size, options)` - 4 args
//! - `removexattr(path, name, options)` - 3 args
//!
//! No-follow is the `XATTR_NOFOLLOW` option bit on Darwin. `position` is only
//! meaningful for resource forks and is always 0 here.
//!
//! Other Unix targets expose `extattr_*` instead; every call there fails with
//! `ENOSYS` and [`SUPPORTED`] is `false`.

use bitflags::bitflags;
use nix::errno::Errno;
use std::ffi::CStr;

bitflags! {
    /// Platform-independent option bits for the xattr syscalls
    ///
    /// Translated to `XATTR_NOFOLLOW` / `XATTR_CREATE` / `XATTR_REPLACE` (or to
    /// the `l*` syscall variants on Linux) right before the call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SyscallOptions: u32 {
        /// Operate on a symlink itself rather than on its target
        const NOFOLLOW = 1 << 0;
        /// Fail with `EEXIST` if the attribute already exists (set only)
        const CREATE = 1 << 1;
        /// Fail with the not-found errno if the attribute is missing (set only)
        const REPLACE = 1 << 2;
    }
}

/// Whether this target has path-based xattr syscalls at all
pub const SUPPORTED: bool = cfg!(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
));

/// The errno reported when a named attribute does not exist
///
/// Linux reuses `ENODATA`; Darwin has a dedicated `ENOATTR`.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const ATTR_NOT_FOUND: Errno = Errno::ENODATA;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub const ATTR_NOT_FOUND: Errno = Errno::ENOATTR;
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
pub const ATTR_NOT_FOUND: Errno = Errno::UnknownErrno;

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn darwin_options(options: SyscallOptions) -> libc::c_int {
    let mut raw = 0;
    if options.contains(SyscallOptions::NOFOLLOW) {
        raw |= libc::XATTR_NOFOLLOW;
    }
    if options.contains(SyscallOptions::CREATE) {
        raw |= libc::XATTR_CREATE;
    }
    if options.contains(SyscallOptions::REPLACE) {
        raw |= libc::XATTR_REPLACE;
    }
    raw
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn linux_set_flags(options: SyscallOptions) -> libc::c_int {
    let mut raw = 0;
    if options.contains(SyscallOptions::CREATE) {
        raw |= libc::XATTR_CREATE;
    }
    if options.contains(SyscallOptions::REPLACE) {
        raw |= libc::XATTR_REPLACE;
    }
    raw
}

/// Null for an empty buffer so the kernel treats the call as a size probe
fn value_ptr(buffer: &mut [u8]) -> *mut libc::c_void {
    if buffer.is_empty() {
        std::ptr::null_mut()
    } else {
        buffer.as_mut_ptr().cast()
    }
}

fn size_result(call: &'static str, path: &CStr, ret: libc::ssize_t) -> nix::Result<usize> {
    match Errno::result(ret) {
        // A non-negative ssize_t always fits in usize
        Ok(size) => Ok(size as usize),
        Err(errno) => {
            log::trace!("{call}({path:?}) failed: {errno}");
            Err(errno)
        }
    }
}

fn unit_result(call: &'static str, path: &CStr, ret: libc::c_int) -> nix::Result<()> {
    match Errno::result(ret) {
        Ok(_) => Ok(()),
        Err(errno) => {
            log::trace!("{call}({path:?}) failed: {errno}");
            Err(errno)
        }
    }
}

/// Read an attribute value into `buffer`
///
/// An empty `buffer` turns the call into a size probe: the return value is
/// the length the value needs.
///
/// # Errors
///
/// Returns the raw errno, e.g. [`ATTR_NOT_FOUND`] or `ERANGE` when `buffer`
/// is non-empty but too small.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn getxattr(
    path: &CStr,
    name: &CStr,
    buffer: &mut [u8],
    options: SyscallOptions,
) -> nix::Result<usize> {
    let ptr = value_ptr(buffer);
    let ret = unsafe {
        if options.contains(SyscallOptions::NOFOLLOW) {
            libc::lgetxattr(path.as_ptr(), name.as_ptr(), ptr, buffer.len())
        } else {
            libc::getxattr(path.as_ptr(), name.as_ptr(), ptr, buffer.len())
        }
    };
    size_result("getxattr", path, ret)
}

/// Read an attribute value into `buffer`
///
/// An empty `buffer` turns the call into a size probe: the return value is
/// the length the value needs.
///
/// # Errors
///
/// Returns the raw errno, e.g. [`ATTR_NOT_FOUND`] or `ERANGE` when `buffer`
/// is non-empty but too small.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn getxattr(
    path: &CStr,
    name: &CStr,
    buffer: &mut [u8],
    options: SyscallOptions,
) -> nix::Result<usize> {
    let ptr = value_ptr(buffer);
    let ret = unsafe {
        libc::getxattr(
            path.as_ptr(),
            name.as_ptr(),
            ptr,
            buffer.len(),
            0, // position: only used by resource forks
            darwin_options(options),
        )
    };
    size_result("getxattr", path, ret)
}

/// Set an attribute value
///
/// # Errors
///
/// Returns the raw errno, e.g. `EEXIST` under [`SyscallOptions::CREATE`].
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn setxattr(
    path: &CStr,
    name: &CStr,
    value: &[u8],
    options: SyscallOptions,
) -> nix::Result<()> {
    let flags = linux_set_flags(options);
    let ret = unsafe {
        if options.contains(SyscallOptions::NOFOLLOW) {
            libc::lsetxattr(
                path.as_ptr(),
                name.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                flags,
            )
        } else {
            libc::setxattr(
                path.as_ptr(),
                name.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                flags,
            )
        }
    };
    unit_result("setxattr", path, ret)
}

/// Set an attribute value
///
/// # Errors
///
/// Returns the raw errno, e.g. `EEXIST` under [`SyscallOptions::CREATE`].
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn setxattr(
    path: &CStr,
    name: &CStr,
    value: &[u8],
    options: SyscallOptions,
) -> nix::Result<()> {
    let ret = unsafe {
        libc::setxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_ptr().cast(),
            value.len(),
            0, // position
            darwin_options(options),
        )
    };
    unit_result("setxattr", path, ret)
}

/// Remove an attribute
///
/// # Errors
///
/// Returns the raw errno, including [`ATTR_NOT_FOUND`] for a missing name.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn removexattr(path: &CStr, name: &CStr, options: SyscallOptions) -> nix::Result<()> {
    let ret = unsafe {
        if options.contains(SyscallOptions::NOFOLLOW) {
            libc::lremovexattr(path.as_ptr(), name.as_ptr())
        } else {
            libc::removexattr(path.as_ptr(), name.as_ptr())
        }
    };
    unit_result("removexattr", path, ret)
}

/// Remove an attribute
///
/// # Errors
///
/// Returns the raw errno, including [`ATTR_NOT_FOUND`] for a missing name.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn removexattr(path: &CStr, name: &CStr, options: SyscallOptions) -> nix::Result<()> {
    let ret = unsafe { libc::removexattr(path.as_ptr(), name.as_ptr(), darwin_options(options)) };
    unit_result("removexattr", path, ret)
}

/// Read the packed, NUL-terminated attribute name list into `buffer`
///
/// An empty `buffer` turns the call into a size probe.
///
/// # Errors
///
/// Returns the raw errno, e.g. `ERANGE` when `buffer` is too small.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn listxattr(path: &CStr, buffer: &mut [u8], options: SyscallOptions) -> nix::Result<usize> {
    let ptr = value_ptr(buffer).cast::<libc::c_char>();
    let ret = unsafe {
        if options.contains(SyscallOptions::NOFOLLOW) {
            libc::llistxattr(path.as_ptr(), ptr, buffer.len())
        } else {
            libc::listxattr(path.as_ptr(), ptr, buffer.len())
        }
    };
    size_result("listxattr", path, ret)
}

/// Read the packed, NUL-terminated attribute name list into `buffer`
///
/// An empty `buffer` turns the call into a size probe.
///
/// # Errors
///
/// Returns the raw errno, e.g. `ERANGE` when `buffer` is too small.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn listxattr(path: &CStr, buffer: &mut [u8], options: SyscallOptions) -> nix::Result<usize> {
    let ptr = value_ptr(buffer).cast::<libc::c_char>();
    let ret = unsafe { libc::listxattr(path.as_ptr(), ptr, buffer.len(), darwin_options(options)) };
    size_result("listxattr", path, ret)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
mod unsupported {
    use super::{CStr, Errno, SyscallOptions};

    /// Always fails: no path-based xattr syscalls on this target
    ///
    /// # Errors
    ///
    /// Always `ENOSYS`.
    pub fn getxattr(_: &CStr, _: &CStr, _: &mut [u8], _: SyscallOptions) -> nix::Result<usize> {
        Err(Errno::ENOSYS)
    }

    /// Always fails: no path-based xattr syscalls on this target
    ///
    /// # Errors
    ///
    /// Always `ENOSYS`.
    pub fn setxattr(_: &CStr, _: &CStr, _: &[u8], _: SyscallOptions) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    /// Always fails: no path-based xattr syscalls on this target
    ///
    /// # Errors
    ///
    /// Always `ENOSYS`.
    pub fn removexattr(_: &CStr, _: &CStr, _: SyscallOptions) -> nix::Result<()> {
        Err(Errno::ENOSYS)
    }

    /// Always fails: no path-based xattr syscalls on this target
    ///
    /// # Errors
    ///
    /// Always `ENOSYS`.
    pub fn listxattr(_: &CStr, _: &mut [u8], _: SyscallOptions) -> nix::Result<usize> {
        Err(Errno::ENOSYS)
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
pub use unsupported::{getxattr, listxattr, removexattr, setxattr};
