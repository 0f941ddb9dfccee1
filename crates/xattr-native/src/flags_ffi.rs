//! Bindings for the Darwin `<xattr_flags.h>` helpers
//!
//! These live in libSystem next to `copyfile(3)` but are not part of the
//! `libc` crate, so they are declared here. Strings returned by the
//! `xattr_name_*` functions are heap-allocated by libSystem and must be
//! released with `free(3)`; the safe wrappers copy them into a `String`
//! first.

use nix::errno::Errno;
use std::ffi::{CStr, CString};

/// `xattr_flags_t`
pub type RawFlags = u64;
/// `xattr_operation_intent_t`
pub type RawIntent = libc::c_uint;

pub const XATTR_FLAG_NO_EXPORT: RawFlags = 1 << 0;
pub const XATTR_FLAG_CONTENT_DEPENDENT: RawFlags = 1 << 1;
pub const XATTR_FLAG_NEVER_PRESERVE: RawFlags = 1 << 2;
pub const XATTR_FLAG_SYNCABLE: RawFlags = 1 << 3;

pub const XATTR_OPERATION_INTENT_COPY: RawIntent = 1;
pub const XATTR_OPERATION_INTENT_SAVE: RawIntent = 2;
pub const XATTR_OPERATION_INTENT_SHARE: RawIntent = 3;
pub const XATTR_OPERATION_INTENT_SYNC: RawIntent = 4;

extern "C" {
    fn xattr_preserve_for_intent(name: *const libc::c_char, intent: RawIntent) -> libc::c_int;
    fn xattr_name_with_flags(name: *const libc::c_char, flags: RawFlags) -> *mut libc::c_char;
    fn xattr_name_without_flags(name: *const libc::c_char) -> *mut libc::c_char;
    fn xattr_flags_from_name(name: *const libc::c_char) -> RawFlags;
    fn xattr_intent_with_flags(intent: RawIntent, flags: RawFlags) -> libc::c_int;
}

/// Copy a libSystem-owned string out and free it
///
/// # Errors
///
/// `errno` as left by the helper when it returned NULL.
fn take_owned(ptr: *mut libc::c_char) -> nix::Result<String> {
    if ptr.is_null() {
        return Err(Errno::last());
    }
    let owned = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
    unsafe { libc::free(ptr.cast()) };
    Ok(owned)
}

/// `xattr_flags_from_name(3)`
pub fn flags_from_name(name: &CStr) -> RawFlags {
    unsafe { xattr_flags_from_name(name.as_ptr()) }
}

/// `xattr_name_without_flags(3)`
///
/// # Errors
///
/// The errno reported by libSystem when it cannot allocate the result.
pub fn name_without_flags(name: &CStr) -> nix::Result<String> {
    take_owned(unsafe { xattr_name_without_flags(name.as_ptr()) })
}

/// `xattr_name_with_flags(3)`
///
/// # Errors
///
/// The errno reported by libSystem when it cannot build the result.
pub fn name_with_flags(name: &CStr, flags: RawFlags) -> nix::Result<String> {
    take_owned(unsafe { xattr_name_with_flags(name.as_ptr(), flags) })
}

/// `xattr_intent_with_flags(3)`; nonzero means preserve
pub fn intent_with_flags(intent: RawIntent, flags: RawFlags) -> bool {
    unsafe { xattr_intent_with_flags(intent, flags) != 0 }
}

/// `xattr_preserve_for_intent(3)`; nonzero means preserve
pub fn preserve_for_intent(name: &CStr, intent: RawIntent) -> bool {
    unsafe { xattr_preserve_for_intent(name.as_ptr(), intent) != 0 }
}

/// Convenience for callers holding a Rust string
///
/// # Errors
///
/// `EINVAL` if `name` contains an interior NUL.
pub fn c_name(name: &str) -> nix::Result<CString> {
    CString::new(name).map_err(|_| Errno::EINVAL)
}
