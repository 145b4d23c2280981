//! Resolution of symbolic link chains for link-following mode.
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path as StdPath;
use std::path::PathBuf;

use log::debug;

use crate::errors::Error;
use crate::identity::FileId;

/// Upper bound on links followed for a single resolution, matching the
/// usual kernel `MAXSYMLINKS`.
pub const MAX_SYMLINK_HOPS: usize = 40;

/// A link chain resolved to the object at its end.
#[derive(Debug)]
pub struct Resolved {
    /// Path the final object was reached through.
    pub path: PathBuf,
    /// Metadata of the final object; never a symlink.
    pub metadata: fs::Metadata,
}

/// Follows `link` hop by hop until it reaches something that is not a
/// symlink.
///
/// Each hop records the link's identity; meeting one again is a cycle.
/// Missing targets, cycles, and chains longer than [`MAX_SYMLINK_HOPS`] fail
/// with [`Error::Symlink`] naming `link`.
pub fn resolve(link: &StdPath) -> Result<Resolved, Error> {
    let mut visited: HashSet<FileId> = HashSet::new();
    let mut current = link.to_path_buf();

    for _ in 0..=MAX_SYMLINK_HOPS {
        let metadata = match fs::symlink_metadata(&current) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::symlink(
                    link,
                    format!("broken target {}", current.display()),
                ));
            }
            Err(e) => {
                return Err(Error::symlink(
                    link,
                    format!("cannot stat {}: {e}", current.display()),
                ));
            }
        };

        if !metadata.file_type().is_symlink() {
            debug!("resolved {} to {}", link.display(), current.display());
            return Ok(Resolved {
                path: current,
                metadata,
            });
        }

        if let Some(id) = FileId::from_metadata(&metadata)
            && !visited.insert(id)
        {
            return Err(Error::symlink(
                link,
                format!("cycle detected at {}", current.display()),
            ));
        }

        let target = fs::read_link(&current).map_err(|e| Error::access(&current, &e))?;
        current = match current.parent() {
            Some(parent) => parent.join(target),
            None => target,
        };
    }

    Err(Error::symlink(
        link,
        format!("more than {MAX_SYMLINK_HOPS} levels of links"),
    ))
}
