use std::ffi::OsString;

use chrono::DateTime;
use chrono::Utc;

use crate::hash::ContentDigest;
use crate::identity::FileId;
use crate::path::EntryPath;

/// Attributes every described object has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Permission bits, where the platform has them.
    pub mode: Option<u32>,
    /// Modification time, truncated to the configured precision.
    pub mtime: DateTime<Utc>,
}

/// What an entry is, with the data each kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory; its children follow it.
    Directory(Attributes),
    /// A regular file.
    Regular {
        /// Common attributes.
        attrs: Attributes,
        /// Size from metadata.
        size: u64,
        /// Digest of the content, present when sizes are emitted.
        content: Option<ContentDigest>,
    },
    /// A symbolic link that was not followed.
    Symlink {
        /// Common attributes of the link itself.
        attrs: Attributes,
        /// The stored target string.
        target: OsString,
    },
    /// Sockets, FIFOs, and device nodes.
    Other(Attributes),
    /// An alias of an entry described earlier.
    Reference {
        /// Path of the canonical entry.
        canonical: EntryPath,
    },
}

/// One traversal result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Position in the virtual tree.
    pub path: EntryPath,
    /// Identity of the described object, if the platform exposes one.
    pub id: Option<FileId>,
    /// Kind-specific data.
    pub kind: EntryKind,
}

impl Entry {
    /// Whether this entry is an alias of an earlier one.
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, EntryKind::Reference { .. })
    }
}
