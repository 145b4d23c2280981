use serde::Deserialize;
use serde::Serialize;

/// Settings for one description run.
///
/// Options that affect traversal (`numbers`, `follow_symlinks`,
/// `emit_size`, `mtime_precision`) are read by the
/// [`Walker`](crate::Walker); the rest only change how lines are rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct DescribeOptions {
    /// Prefix paths with the root index even when there is a single root.
    pub numbers: bool,
    /// Emit paths verbatim instead of escaping them.
    pub literal_paths: bool,
    /// Emit permission bits.
    pub emit_mode: bool,
    /// Emit modification times.
    pub emit_mtime: bool,
    /// Sub-second digits of emitted modification times, `0..=9`.
    pub mtime_precision: u32,
    /// Emit sizes and content hashes of regular files.
    pub emit_size: bool,
    /// Number of leading hex characters of each hash to emit; all when
    /// `None`.
    pub hash_length: Option<usize>,
    /// Render references relative to the referring entry's directory.
    pub relative_refs: bool,
    /// Describe symlink targets in place of the links themselves.
    pub follow_symlinks: bool,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            numbers: false,
            literal_paths: false,
            emit_mode: false,
            emit_mtime: false,
            mtime_precision: 0,
            emit_size: true,
            hash_length: None,
            relative_refs: false,
            follow_symlinks: false,
        }
    }
}

impl DescribeOptions {
    /// Enables both modes and mtimes.
    pub fn full(mut self) -> Self {
        self.emit_mode = true;
        self.emit_mtime = true;
        self
    }

    /// Whether roots get index prefixes for `root_count` inputs.
    pub fn numbered(&self, root_count: usize) -> bool {
        self.numbers || root_count > 1
    }
}
