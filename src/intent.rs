//! Why an attribute-bearing file is being duplicated
//!
//! Each intent answers "should this xattr come along?" from the attribute's
//! [`XattrFlags`]. Not a bit-field; the raw values come from
//! `<xattr_flags.h>` and are not guaranteed stable across OS releases.

use crate::flags::XattrFlags;
use crate::naming::{HostNaming, NamingHelpers, RawIntent};
use std::fmt;
use std::str::FromStr;

/// A copy/save/share/sync intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationIntent {
    /// The file is simply being copied, e.g. `cp src dst`
    Copy,
    /// The file is being saved; as in a "safe save", the destination is
    /// replaced by the source, so the question is whether the attribute
    /// should be applied to the destination or generated anew
    Save,
    /// The file is being given out to other people, e.g. saved to a public
    /// folder or attached to an email
    Share,
    /// The file is being synced to other storage for the same user
    Sync,
}

/// A raw intent code this crate does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown xattr operation intent: {0}")]
pub struct UnknownIntent(pub RawIntent);

/// Text that names no intent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent '{0}' (expected copy, save, share or sync)")]
pub struct ParseIntentError(pub String);

impl OperationIntent {
    /// Every known intent
    pub const ALL: [Self; 4] = [Self::Copy, Self::Save, Self::Share, Self::Sync];

    /// Decode a raw intent; codes from newer OS releases give `None`
    #[must_use]
    pub fn from_raw(raw: RawIntent) -> Option<Self> {
        match raw {
            1 => Some(Self::Copy),
            2 => Some(Self::Save),
            3 => Some(Self::Share),
            4 => Some(Self::Sync),
            _ => None,
        }
    }

    /// The `XATTR_OPERATION_INTENT_*` code
    #[must_use]
    pub fn to_raw(self) -> RawIntent {
        match self {
            Self::Copy => 1,
            Self::Save => 2,
            Self::Share => 3,
            Self::Sync => 4,
        }
    }

    /// Whether an attribute with `flags` is preserved under this intent
    #[must_use]
    pub fn preserves_flags(self, flags: XattrFlags) -> bool {
        self.preserves_flags_with(&HostNaming::default(), flags)
    }

    /// [`preserves_flags`](Self::preserves_flags) using `helpers`
    #[must_use]
    pub fn preserves_flags_with(self, helpers: &impl NamingHelpers, flags: XattrFlags) -> bool {
        helpers.intent_with_flags(self.to_raw(), flags.bits())
    }

    /// Whether the attribute called `name` (flag suffix included) is
    /// preserved under this intent
    #[must_use]
    pub fn preserves_name(self, name: &str) -> bool {
        self.preserves_name_with(&HostNaming::default(), name)
    }

    /// [`preserves_name`](Self::preserves_name) using `helpers`
    #[must_use]
    pub fn preserves_name_with(self, helpers: &impl NamingHelpers, name: &str) -> bool {
        helpers.preserve_for_intent(name, self.to_raw())
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Save => "save",
            Self::Share => "share",
            Self::Sync => "sync",
        }
    }
}

impl TryFrom<RawIntent> for OperationIntent {
    type Error = UnknownIntent;

    fn try_from(raw: RawIntent) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(UnknownIntent(raw))
    }
}

impl From<OperationIntent> for RawIntent {
    fn from(intent: OperationIntent) -> Self {
        intent.to_raw()
    }
}

impl fmt::Display for OperationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationIntent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIntentError(s.to_owned()))
    }
}
