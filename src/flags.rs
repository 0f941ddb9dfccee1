//! The xattr "flags" name suffix
//!
//! A flag is simply a suffix on an xattr name: `com.example.note#CS`. A name
//! without a suffix has no flags, except for a handful of well-known Apple
//! attributes that carry defaults. To write an attribute with flags, build its
//! name with [`XattrFlags::apply`] and pass that name to
//! [`Attributes::set`](crate::Attributes::set).

use crate::error::Result;
use crate::naming::{HostNaming, NamingHelpers, RawFlags};
use bitflags::bitflags;

bitflags! {
    /// Preservation flags carried in an xattr name suffix
    ///
    /// Values match `XATTR_FLAG_*` in `<xattr_flags.h>`. Bits this crate does
    /// not know about are kept as-is so newer OS flags survive a round-trip.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct XattrFlags: RawFlags {
        /// Do not export the attribute; this is deliberately vague, but
        /// [`OperationIntent::Share`](crate::OperationIntent::Share) uses it
        /// to drop the attribute.
        const NO_EXPORT = 1 << 0;
        /// The attribute is tied to the file contents (checksums, cached
        /// positions, text encoding) and should be recreated when they change.
        /// Preserved for copy and share, not for safe save.
        const CONTENT_DEPENDENT = 1 << 1;
        /// Never copy the attribute, for any intent.
        const NEVER_PRESERVE = 1 << 2;
        /// Sync the attribute. Sync keeps metadata to a minimum, so attributes
        /// without this flag are not synced even when copy would keep them.
        const SYNCABLE = 1 << 3;

        /// <https://docs.rs/bitflags/*/bitflags/#externally-defined-flags>
        const _ = !0;
    }
}

impl XattrFlags {
    /// Flags encoded in `name`'s suffix (or defaulted for well-known names)
    #[must_use]
    pub fn from_xattr_name(name: &str) -> Self {
        Self::from_xattr_name_with(&HostNaming::default(), name)
    }

    /// [`from_xattr_name`](Self::from_xattr_name) using `helpers`
    #[must_use]
    pub fn from_xattr_name_with(helpers: &impl NamingHelpers, name: &str) -> Self {
        Self::from_bits_retain(helpers.flags_from_name(name))
    }

    /// `name` with its flag suffix removed
    ///
    /// # Errors
    ///
    /// [`XattrError::System`](crate::XattrError::System) if the OS helper fails.
    pub fn name_without_flags(name: &str) -> Result<String> {
        HostNaming::default().name_without_flags(name)
    }

    /// Append a suffix encoding these flags to `name`
    ///
    /// `name` should not already carry a suffix.
    ///
    /// # Errors
    ///
    /// [`XattrError::System`](crate::XattrError::System) if the OS helper fails.
    pub fn apply(self, name: &str) -> Result<String> {
        self.apply_with(&HostNaming::default(), name)
    }

    /// [`apply`](Self::apply) using `helpers`
    ///
    /// # Errors
    ///
    /// [`XattrError::System`](crate::XattrError::System) if `helpers` fails.
    pub fn apply_with(self, helpers: &impl NamingHelpers, name: &str) -> Result<String> {
        helpers.name_with_flags(name, self.bits())
    }
}
