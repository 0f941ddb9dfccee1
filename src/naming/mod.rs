//! Name-suffix flag and copy-intent policy helpers
//!
//! Darwin encodes per-attribute preservation flags as a suffix on the name
//! (`com.example.note#CS`) and ships C helpers in libSystem to parse, strip,
//! compose and evaluate them. [`NamingHelpers`] is the seam in front of those
//! helpers:
//!
//! - [`NativeNaming`] calls libSystem (Apple targets only)
//! - [`PortableNaming`] implements the same rules in Rust for every target
//!
//! [`HostNaming`] picks the native helpers where they exist unless the
//! `portable-naming` feature is enabled.

mod portable;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod native;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use native::NativeNaming;
pub use portable::PortableNaming;

use crate::error::Result;

/// `xattr_flags_t`
pub type RawFlags = u64;
/// `xattr_operation_intent_t`
pub type RawIntent = u32;

/// The helper functions behind [`XattrFlags`](crate::XattrFlags) and
/// [`OperationIntent`](crate::OperationIntent)
pub trait NamingHelpers {
    /// Flags encoded in (or defaulted for) a raw attribute name
    fn flags_from_name(&self, name: &str) -> RawFlags;

    /// The name with any flag suffix removed
    ///
    /// # Errors
    ///
    /// [`XattrError::System`](crate::XattrError::System) if the helper fails.
    fn name_without_flags(&self, name: &str) -> Result<String>;

    /// `name` with a suffix encoding `flags`
    ///
    /// # Errors
    ///
    /// [`XattrError::System`](crate::XattrError::System) if the helper fails.
    fn name_with_flags(&self, name: &str, flags: RawFlags) -> Result<String>;

    /// Whether an attribute carrying `flags` is preserved under `intent`
    fn intent_with_flags(&self, intent: RawIntent, flags: RawFlags) -> bool;

    /// Whether the attribute called `name` is preserved under `intent`
    fn preserve_for_intent(&self, name: &str, intent: RawIntent) -> bool;
}

/// Helpers used by the codecs' default methods
#[cfg(all(
    any(target_os = "macos", target_os = "ios"),
    not(feature = "portable-naming")
))]
pub type HostNaming = NativeNaming;

/// Helpers used by the codecs' default methods
#[cfg(not(all(
    any(target_os = "macos", target_os = "ios"),
    not(feature = "portable-naming")
)))]
pub type HostNaming = PortableNaming;
