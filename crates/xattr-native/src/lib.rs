//! # xattr-native
//!
//! Raw bindings for the path-based extended attribute syscalls:
//! - `getxattr` / `lgetxattr`
//! - `setxattr` / `lsetxattr` (with `XATTR_CREATE` / `XATTR_REPLACE`)
//! - `removexattr` / `lremovexattr`
//! - `listxattr` / `llistxattr`
//! - The Darwin `<xattr_flags.h>` name and intent helpers (Apple targets only)
//!
//! Every function maps one libc call. Buffer probing, absence policy and
//! name decoding are left to the caller; errors come back as
//! [`nix::errno::Errno`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::ffi::CString;
//! use xattr_native::{syscall, SyscallOptions};
//!
//! # fn example() -> nix::Result<()> {
//! let path = CString::new("data.txt").unwrap();
//! let name = CString::new("user.comment").unwrap();
//! syscall::setxattr(&path, &name, b"hello", SyscallOptions::empty())?;
//!
//! // Zero-size probe, then fetch.
//! let size = syscall::getxattr(&path, &name, &mut [], SyscallOptions::empty())?;
//! let mut value = vec![0u8; size];
//! syscall::getxattr(&path, &name, &mut value, SyscallOptions::empty())?;
//! # Ok(())
//! # }
//! ```

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub mod flags_ffi;
pub mod syscall;

pub use syscall::{SyscallOptions, ATTR_NOT_FOUND, SUPPORTED};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
