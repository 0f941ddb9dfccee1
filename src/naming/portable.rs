//! Rust rendition of the libSystem xattr flag rules
//!
//! - The suffix starts after the last `#` in the name.
//! - Suffix letters: `C` content-dependent, `P` no-export, `N` never-preserve,
//!   `S` syncable. The lower-case letter clears the flag again; unknown
//!   letters are ignored.
//! - A name without a suffix takes its flags from a small table of well-known
//!   Apple attributes; anything else has no flags.

use super::{NamingHelpers, RawFlags, RawIntent};
use crate::error::Result;
use crate::flags::XattrFlags;
use crate::intent::OperationIntent;

const FLAG_DELIMITER: char = '#';

/// Suffix letters in the order they are written
const FLAG_LETTERS: [(char, XattrFlags); 4] = [
    ('C', XattrFlags::CONTENT_DEPENDENT),
    ('P', XattrFlags::NO_EXPORT),
    ('N', XattrFlags::NEVER_PRESERVE),
    ('S', XattrFlags::SYNCABLE),
];

struct DefaultEntry {
    name: &'static str,
    /// Match any name starting with `name`
    prefix: bool,
    letters: &'static str,
}

const DEFAULT_TABLE: [DefaultEntry; 6] = [
    DefaultEntry {
        name: "com.apple.quarantine",
        prefix: false,
        letters: "PCS",
    },
    DefaultEntry {
        name: "com.apple.TextEncoding",
        prefix: false,
        letters: "CS",
    },
    DefaultEntry {
        name: "com.apple.metadata:",
        prefix: true,
        letters: "PS",
    },
    DefaultEntry {
        name: "com.apple.security.",
        prefix: true,
        letters: "S",
    },
    DefaultEntry {
        name: "com.apple.ResourceFork",
        prefix: false,
        letters: "PCS",
    },
    DefaultEntry {
        name: "com.apple.FinderInfo",
        prefix: false,
        letters: "PCS",
    },
];

fn letters_to_flags(letters: &str) -> RawFlags {
    let mut flags = 0;
    for letter in letters.chars() {
        for (known, flag) in &FLAG_LETTERS {
            if letter == *known {
                flags |= flag.bits();
            } else if letter == known.to_ascii_lowercase() {
                flags &= !flag.bits();
            }
        }
    }
    flags
}

fn flags_to_letters(flags: RawFlags) -> String {
    FLAG_LETTERS
        .iter()
        .filter(|(_, flag)| flags & flag.bits() != 0)
        .map(|(letter, _)| *letter)
        .collect()
}

fn default_flags(name: &str) -> RawFlags {
    DEFAULT_TABLE
        .iter()
        .find(|entry| {
            if entry.prefix {
                name.starts_with(entry.name)
            } else {
                name == entry.name
            }
        })
        .map_or(0, |entry| letters_to_flags(entry.letters))
}

/// Flag and intent rules implemented without libSystem
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableNaming;

impl NamingHelpers for PortableNaming {
    fn flags_from_name(&self, name: &str) -> RawFlags {
        match name.rfind(FLAG_DELIMITER) {
            Some(index) => letters_to_flags(&name[index + 1..]),
            None => default_flags(name),
        }
    }

    fn name_without_flags(&self, name: &str) -> Result<String> {
        let base = name
            .rfind(FLAG_DELIMITER)
            .map_or(name, |index| &name[..index]);
        Ok(base.to_owned())
    }

    fn name_with_flags(&self, name: &str, flags: RawFlags) -> Result<String> {
        let letters = flags_to_letters(flags);
        if letters.is_empty() {
            return Ok(name.to_owned());
        }
        Ok(format!("{name}{FLAG_DELIMITER}{letters}"))
    }

    fn intent_with_flags(&self, intent: RawIntent, flags: RawFlags) -> bool {
        let flags = XattrFlags::from_bits_retain(flags);
        if flags.contains(XattrFlags::NEVER_PRESERVE) {
            return false;
        }
        match OperationIntent::from_raw(intent) {
            Some(OperationIntent::Copy) | None => true,
            Some(OperationIntent::Save) => !flags.contains(XattrFlags::CONTENT_DEPENDENT),
            Some(OperationIntent::Share) => !flags.contains(XattrFlags::NO_EXPORT),
            Some(OperationIntent::Sync) => flags.contains(XattrFlags::SYNCABLE),
        }
    }

    fn preserve_for_intent(&self, name: &str, intent: RawIntent) -> bool {
        self.intent_with_flags(intent, self.flags_from_name(name))
    }
}
