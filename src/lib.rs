//! A deterministic, diffable textual description of file system trees.
//!
//! A typical use for this crate is a fixed-output test: run a program,
//! describe the tree it produced, and compare the description with a
//! recorded one.
//!
//! ```rust
//! # use describe_subtree::DescribeOptions;
//! # use describe_subtree::describe_to_string;
//! let dir = std::env::temp_dir().join(format!("describe-subtree-doc-{}", std::process::id()));
//! std::fs::create_dir_all(dir.join("sub")).unwrap();
//! std::fs::write(dir.join("afile.txt"), "abc").unwrap();
//!
//! let options = DescribeOptions {
//!     hash_length: Some(8),
//!     ..Default::default()
//! };
//! let description = describe_to_string(&[&dir], &options).unwrap();
//! assert_eq!(
//!     description,
//!     ". dir\nafile.txt reg size 3 sha256 ba7816bf\nsub dir\n"
//! );
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```
//!
//! The output might look like
//! ```text
//! . dir
//! afile.jpg reg size 4096 sha256 0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef
//! sub dir
//! sub/afile-symlink.jpg sym -> ../afile.jpg
//! sub/zfile-hardlink.jpg ref ==> afile.jpg
//! ```
//!
//! Entries are produced depth first, siblings ordered bytewise with
//! directory names compared as if they ended in `/`. The first entry seen
//! for a device and inode is described in full, later ones become `ref`s to
//! it. Any error ends the run; partial output is not a description.

pub mod cli;
mod describe;
mod entry;
mod errors;
pub mod escape;
mod format;
pub mod hash;
mod identity;
mod options;
mod path;
pub mod resolve;
pub mod utils;
mod walker;

pub use describe::Description;
pub use describe::describe;
pub use describe::describe_to_string;
pub use entry::Attributes;
pub use entry::Entry;
pub use entry::EntryKind;
pub use errors::Error;
pub use format::Formatter;
pub use identity::CanonicalIndex;
pub use identity::FileId;
pub use identity::Identity;
pub use options::DescribeOptions;
pub use path::EntryPath;
pub use path::sibling_order;
pub use walker::Walker;

#[cfg(feature = "test_utils")]
pub(crate) mod test_utils;
#[cfg(feature = "test_utils")]
pub use test_utils::TestRoot;
