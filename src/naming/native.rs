//! libSystem-backed naming helpers

use super::{NamingHelpers, RawFlags, RawIntent};
use crate::error::Result;
use std::ffi::CString;
use xattr_native::flags_ffi;

/// What C sees of `name`: everything before the first NUL
fn c_prefix(name: &str) -> CString {
    let end = name.find('\0').unwrap_or(name.len());
    CString::new(&name[..end]).unwrap_or_default()
}

/// Delegates to the `<xattr_flags.h>` functions in libSystem
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeNaming;

impl NamingHelpers for NativeNaming {
    fn flags_from_name(&self, name: &str) -> RawFlags {
        flags_ffi::flags_from_name(&c_prefix(name))
    }

    fn name_without_flags(&self, name: &str) -> Result<String> {
        let name = flags_ffi::c_name(name)?;
        Ok(flags_ffi::name_without_flags(&name)?)
    }

    fn name_with_flags(&self, name: &str, flags: RawFlags) -> Result<String> {
        let name = flags_ffi::c_name(name)?;
        Ok(flags_ffi::name_with_flags(&name, flags)?)
    }

    fn intent_with_flags(&self, intent: RawIntent, flags: RawFlags) -> bool {
        flags_ffi::intent_with_flags(intent, flags)
    }

    fn preserve_for_intent(&self, name: &str, intent: RawIntent) -> bool {
        flags_ffi::preserve_for_intent(&c_prefix(name), intent)
    }
}
