//! Hardlink and alias detection keyed by device and inode numbers.

use std::collections::HashMap;
use std::fs;

use log::trace;

use crate::path::EntryPath;

/// Identity of a file system object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FileId {
    /// Device the object lives on.
    pub device: u64,
    /// Inode number within the device.
    pub inode: u64,
}

impl FileId {
    /// Extracts the identity from `metadata`.
    ///
    /// Returns `None` where the platform does not expose inode numbers; such
    /// objects are never treated as aliases of each other.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &fs::Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;

        Some(Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    /// Extracts the identity from `metadata`.
    ///
    /// Returns `None` where the platform does not expose inode numbers; such
    /// objects are never treated as aliases of each other.
    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &fs::Metadata) -> Option<Self> {
        None
    }
}

/// Outcome of an identity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// First occurrence; the entry is described in full.
    Concrete,
    /// Already described at the contained path.
    Reference(EntryPath),
}

/// Maps each identity to the path of the first entry seen with it.
///
/// Entries are added in traversal order and never replaced, so the
/// canonical path of an identity is stable for the whole run. An index
/// lives for exactly one traversal.
#[derive(Debug, Default)]
pub struct CanonicalIndex {
    entries: HashMap<FileId, EntryPath>,
}

impl CanonicalIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical path recorded for `id`.
    pub fn canonical(&self, id: &FileId) -> Option<&EntryPath> {
        self.entries.get(id)
    }

    /// Looks `id` up, registering `path` as canonical on first sight.
    pub fn claim(&mut self, id: Option<FileId>, path: &EntryPath) -> Identity {
        let Some(id) = id else {
            return Identity::Concrete;
        };
        if let Some(canonical) = self.entries.get(&id) {
            trace!("{path} aliases {canonical}");
            return Identity::Reference(canonical.clone());
        }
        self.entries.insert(id, path.clone());
        Identity::Concrete
    }

    /// Number of distinct identities seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no identity was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
