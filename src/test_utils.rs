use std::fs;
use std::fs::create_dir_all;
use std::path::Path as StdPath;
use std::path::PathBuf;
use std::time::Duration;
use std::time::UNIX_EPOCH;

use filetime::FileTime;
use similar::ChangeTag;
use similar::TextDiff;
use tempdir::TempDir;

use crate::DescribeOptions;
use crate::Error;
use crate::describe_to_string;

// File paths, contents, and whether the path is a directory
pub(crate) static SAMPLE_TREE: &[(&str, &str, bool)] = &[
    ("file1.txt", "test a", false),
    ("file2.txt", "test b", false),
    ("dir1", "", true),
    ("dir1/file3.txt", "test c", false),
    ("dir1/dir2", "", true),
    ("dir1/dir2/file4.txt", "", false),
    ("dir1/dir2/dir_empty1", "", true),
    ("dir1.txt", "abc", false),
    ("dir1-old", "", true),
    ("dir3", "", true),
    ("dir3/file6.txt", "hello world", false),
];

fn create_error(what: impl Into<String>, e: &std::io::Error) -> Error {
    Error::Create {
        what: what.into(),
        how: e.to_string(),
    }
}

/// Utility structure for building fixture trees in a temporary directory and
/// checking their descriptions against golden text.
#[derive(Debug)]
pub struct TestRoot {
    /// Root of the temporary test directory.
    pub root: TempDir,
}

impl TestRoot {
    /// Creates an empty temporary test directory.
    pub fn new() -> Result<Self, Error> {
        let root = TempDir::new("describe-subtree")
            .map_err(|e| create_error("temporary directory", &e))?;
        Ok(Self { root })
    }

    /// Creates a temporary test directory populated with a small sample
    /// tree of files and directories.
    pub fn sample() -> Result<Self, Error> {
        let ret = Self::new()?;
        for (relative_path, contents, is_dir) in SAMPLE_TREE {
            if *is_dir {
                ret.create_dir(relative_path)?;
            } else {
                ret.create_file(relative_path, contents.as_bytes())?;
            }
        }
        Ok(ret)
    }

    /// Absolute path of the test directory.
    pub fn path(&self) -> &StdPath {
        self.root.path()
    }

    /// Absolute path of `relative_path` inside the test directory; an empty
    /// `relative_path` is the test directory itself.
    pub fn join(&self, relative_path: &str) -> PathBuf {
        if relative_path.is_empty() {
            self.path().to_path_buf()
        } else {
            self.path().join(relative_path)
        }
    }

    /// Creates a file with `contents`, creating missing parent directories.
    pub fn create_file(&self, relative_path: &str, contents: &[u8]) -> Result<(), Error> {
        let full_path = self.join(relative_path);
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent).map_err(|e| create_error(parent.display().to_string(), &e))?;
        }
        fs::write(&full_path, contents).map_err(|e| create_error(relative_path, &e))
    }

    /// Creates a directory and its missing parents.
    pub fn create_dir(&self, relative_path: &str) -> Result<(), Error> {
        create_dir_all(self.join(relative_path)).map_err(|e| create_error(relative_path, &e))
    }

    /// Creates `link` as a hardlink of `original`.
    pub fn hard_link(&self, original: &str, link: &str) -> Result<(), Error> {
        fs::hard_link(self.join(original), self.join(link)).map_err(|e| create_error(link, &e))
    }

    /// Creates `link` as a symlink storing `target` verbatim.
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, link: &str) -> Result<(), Error> {
        std::os::unix::fs::symlink(target, self.join(link)).map_err(|e| create_error(link, &e))
    }

    /// Sets the permission bits of `relative_path`.
    #[cfg(unix)]
    pub fn set_mode(&self, relative_path: &str, mode: u32) -> Result<(), Error> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(self.join(relative_path), fs::Permissions::from_mode(mode))
            .map_err(|e| create_error(relative_path, &e))
    }

    /// Sets the modification time of `relative_path` without following
    /// symlinks.
    pub fn set_mtime(&self, relative_path: &str, secs: u64, nanos: u32) -> Result<(), Error> {
        let time = FileTime::from_system_time(UNIX_EPOCH + Duration::new(secs, nanos));
        filetime::set_symlink_file_times(self.join(relative_path), time, time)
            .map_err(|e| create_error(relative_path, &e))
    }

    /// Describes the given roots, each relative to the test directory.
    pub fn describe(&self, roots: &[&str], options: &DescribeOptions) -> Result<String, Error> {
        let roots: Vec<PathBuf> = roots.iter().map(|r| self.join(r)).collect();
        describe_to_string(&roots, options)
    }

    /// Returns none if the description of `roots` equals `expected`, or a
    /// string containing a line diff of the two if they differ.
    pub fn compare(
        &self,
        roots: &[&str],
        options: &DescribeOptions,
        expected: &str,
    ) -> Result<Option<String>, Error> {
        let actual = self.describe(roots, options)?;
        let diff = TextDiff::from_lines(expected, actual.as_str());
        let mut diffs = String::new();
        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => continue,
            };

            diffs.push_str(&format!("{}{}", sign, change));
        }
        if diffs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(diffs))
        }
    }

    /// Panics with a diff unless the description of `roots` equals
    /// `expected`.
    pub fn assert_description(&self, roots: &[&str], options: &DescribeOptions, expected: &str) {
        match self.compare(roots, options, expected) {
            Ok(None) => {}
            Ok(Some(diff)) => panic!("description mismatch:\n{diff}"),
            Err(e) => panic!("description failed: {e}"),
        }
    }

    /// SHA-256 of a file, computed independently of the crate's hasher.
    pub fn sha256(&self, relative_path: &str) -> Result<String, Error> {
        cross_check::calculate_sha256(&self.join(relative_path))
    }
}

// The functions in the mod are intentionally written with an
// alternative approach to ensure that the main logic of hashing
// files is not broken.
mod cross_check {
    use std::fs;
    use std::path::Path as StdPath;

    use sha2::Digest;
    use sha2::Sha256;

    use crate::Error;

    pub(super) fn calculate_sha256(path: &StdPath) -> Result<String, Error> {
        let contents = fs::read(path).map_err(|e| Error::Access {
            what: path.display().to_string(),
            how: e.to_string(),
        })?;
        Ok(format!("{:x}", Sha256::digest(&contents)))
    }
}
