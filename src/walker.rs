use std::ffi::OsString;
use std::fs;
use std::iter::Enumerate;
use std::path::Path as StdPath;
use std::path::PathBuf;

use log::debug;
use log::trace;

use crate::entry::Attributes;
use crate::entry::Entry;
use crate::entry::EntryKind;
use crate::errors::Error;
use crate::hash::ContentHasher;
use crate::identity::CanonicalIndex;
use crate::identity::FileId;
use crate::identity::Identity;
use crate::options::DescribeOptions;
use crate::path::EntryPath;
use crate::path::sibling_order;
use crate::resolve::resolve;
use crate::utils::truncate_system_time;

/// Depth-first, pre-order iterator over the entries of one or more roots.
///
/// Roots are walked one after another in the order given; siblings are
/// visited in [`sibling_order`]. The walker owns the [`CanonicalIndex`] for
/// the run, so identities seen under an earlier root make later aliases
/// references, whichever root they are in.
///
/// The first error ends the iteration: it is yielded once and nothing
/// follows it.
pub struct Walker {
    roots: Enumerate<std::vec::IntoIter<PathBuf>>,
    numbered: bool,
    options: DescribeOptions,
    index: CanonicalIndex,
    stack: Vec<DirectoryState>,
    finished: bool,
}

impl Walker {
    /// Creates a walker over `roots`. Nothing is read until iteration.
    pub fn new<P: AsRef<StdPath>>(roots: &[P], options: &DescribeOptions) -> Result<Self, Error> {
        if roots.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one input path is required".to_string(),
            ));
        }
        let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
        Ok(Self {
            numbered: options.numbered(roots.len()),
            roots: roots.into_iter().enumerate(),
            options: options.clone(),
            index: CanonicalIndex::new(),
            stack: Vec::new(),
            finished: false,
        })
    }

    /// Identities recorded so far.
    pub fn index(&self) -> &CanonicalIndex {
        &self.index
    }

    fn attributes(&self, fs_path: &StdPath, metadata: &fs::Metadata) -> Result<Attributes, Error> {
        let modified = metadata.modified().map_err(|e| Error::access(fs_path, &e))?;
        let mtime = truncate_system_time(modified, self.options.mtime_precision).ok_or_else(|| {
            Error::Access {
                what: fs_path.display().to_string(),
                how: "modification time is out of range".to_string(),
            }
        })?;
        Ok(Attributes {
            mode: permission_bits(metadata),
            mtime,
        })
    }

    fn push_directory(&mut self, fs_path: PathBuf, path: EntryPath) -> Result<(), Error> {
        debug!("entering directory: {}", fs_path.display());
        let state = DirectoryState::new(fs_path, path, self.options.follow_symlinks)?;
        self.stack.push(state);
        Ok(())
    }

    fn visit(&mut self, fs_path: PathBuf, path: EntryPath) -> Result<Entry, Error> {
        trace!("processing entry: {}", fs_path.display());

        let metadata =
            fs::symlink_metadata(&fs_path).map_err(|e| Error::access(&fs_path, &e))?;
        let follow = self.options.follow_symlinks;
        let (fs_path, metadata) = if follow && metadata.file_type().is_symlink() {
            let resolved = resolve(&fs_path)?;
            (resolved.path, resolved.metadata)
        } else {
            (fs_path, metadata)
        };

        let id = FileId::from_metadata(&metadata);
        let file_type = metadata.file_type();
        // Directories only alias each other when links are followed.
        if (follow || file_type.is_file() || file_type.is_symlink())
            && let Identity::Reference(canonical) = self.index.claim(id, &path)
        {
            return Ok(Entry {
                path,
                id,
                kind: EntryKind::Reference { canonical },
            });
        }

        let attrs = self.attributes(&fs_path, &metadata)?;
        let kind = if file_type.is_dir() {
            self.push_directory(fs_path, path.clone())?;
            EntryKind::Directory(attrs)
        } else if file_type.is_file() {
            let content = if self.options.emit_size {
                Some(fs_path.as_path().content_digest()?)
            } else {
                None
            };
            EntryKind::Regular {
                attrs,
                size: content.as_ref().map_or(metadata.len(), |c| c.size),
                content,
            }
        } else if file_type.is_symlink() {
            let target = fs::read_link(&fs_path).map_err(|e| Error::access(&fs_path, &e))?;
            EntryKind::Symlink {
                attrs,
                target: target.into_os_string(),
            }
        } else {
            EntryKind::Other(attrs)
        };

        Ok(Entry { path, id, kind })
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &fs::Metadata) -> Option<u32> {
    None
}

impl Iterator for Walker {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let (fs_path, path) = loop {
            if let Some(state) = self.stack.last_mut() {
                match state.next_child() {
                    Some(child) => break child,
                    None => {
                        self.stack.pop();
                    }
                }
            } else if let Some((index, root)) = self.roots.next() {
                debug!("describing root {index}: {}", root.display());
                break (root, EntryPath::root(self.numbered.then_some(index)));
            } else {
                self.finished = true;
                return None;
            }
        };

        match self.visit(fs_path, path) {
            Ok(entry) => Some(Ok(entry)),
            Err(error) => {
                self.finished = true;
                self.stack.clear();
                Some(Err(error))
            }
        }
    }
}

/// A directory whose children are still being visited.
///
/// The listing is read and sorted up front, so no directory handle stays
/// open while the subtree below is walked.
#[derive(Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    path: EntryPath,
    children: std::vec::IntoIter<OsString>,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, path: EntryPath, follow_symlinks: bool) -> Result<Self, Error> {
        let read_dir = fs::read_dir(&fs_path).map_err(|e| Error::access(&fs_path, &e))?;
        let mut entries: Vec<(OsString, bool)> = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::access(&fs_path, &e))?;
            let is_dir = if follow_symlinks {
                // Broken links sort as files and fail when visited.
                fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
            } else {
                entry
                    .file_type()
                    .map_err(|e| Error::access(&entry.path(), &e))?
                    .is_dir()
            };
            entries.push((entry.file_name(), is_dir));
        }
        entries.sort_by(|(a, a_dir), (b, b_dir)| sibling_order(a, *a_dir, b, *b_dir));

        debug!("found {} entries in {}", entries.len(), fs_path.display());

        let children: Vec<OsString> = entries.into_iter().map(|(name, _)| name).collect();
        Ok(Self {
            fs_path,
            path,
            children: children.into_iter(),
        })
    }

    fn next_child(&mut self) -> Option<(PathBuf, EntryPath)> {
        let name = self.children.next()?;
        Some((self.fs_path.join(&name), self.path.child(&name)))
    }
}
