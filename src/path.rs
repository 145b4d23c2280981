use std::cmp::Ordering;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::fmt::Display;

use crate::errors::Error;
use crate::escape;

/// Position of an entry in the virtual tree made of all input roots.
///
/// When roots are numbered the root index acts as a leading path segment,
/// so `0/sub/file` is `file` inside `sub` of the first root. The sole
/// unnumbered root is the empty path and renders as `.`.
#[derive(Debug, Clone, PartialEq, Hash, Eq)]
pub struct EntryPath {
    root: Option<usize>,
    components: Vec<OsString>,
}

impl EntryPath {
    /// Path of an input root; `index` is `Some` when roots are numbered.
    pub fn root(index: Option<usize>) -> Self {
        Self {
            root: index,
            components: vec![],
        }
    }

    /// Index of the input root this path belongs to, if roots are numbered.
    pub fn root_index(&self) -> Option<usize> {
        self.root
    }

    /// Components relative to the root.
    pub fn components(&self) -> &[OsString] {
        &self.components
    }

    /// Returns a new path one level below this one.
    pub fn child(&self, name: &OsStr) -> Self {
        let mut ret = self.clone();
        ret.components.push(name.to_owned());
        ret
    }

    /// Segments of the virtual path, the root label first when numbered.
    fn segments(&self) -> Vec<Vec<u8>> {
        let mut ret = Vec::with_capacity(self.components.len() + 1);
        if let Some(index) = self.root {
            ret.push(index.to_string().into_bytes());
        }
        ret.extend(
            self.components
                .iter()
                .map(|c| c.as_encoded_bytes().to_vec()),
        );
        ret
    }

    /// Renders the path for output, each segment escaped unless `literal`.
    pub fn render(&self, literal: bool) -> Result<String, Error> {
        render_segments(&self.segments(), literal)
    }

    /// Renders `target` relative to the directory containing `self`.
    pub fn render_relative(&self, target: &EntryPath, literal: bool) -> Result<String, Error> {
        let mut base = self.segments();
        base.pop();
        let target = target.segments();
        let common = base
            .iter()
            .zip(target.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let mut segments: Vec<Vec<u8>> = vec![b"..".to_vec(); base.len() - common];
        segments.extend_from_slice(&target[common..]);
        render_segments(&segments, literal)
    }
}

fn render_segments(segments: &[Vec<u8>], literal: bool) -> Result<String, Error> {
    if segments.is_empty() {
        return Ok(".".to_string());
    }
    let rendered = segments
        .iter()
        .map(|s| escape::render(s, literal))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join("/"))
}

impl Display for EntryPath {
    /// Escaped rendering; escaping never fails.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let segments = self.segments();
        if segments.is_empty() {
            return write!(f, ".");
        }
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", escape::escape(segment))?;
        }
        Ok(())
    }
}

/// Sibling order: names compared bytewise, with directories compared as if
/// their name ended in `/`.
///
/// This keeps `a-b/`, `a.b`, `a/` in that order, so a directory's subtree
/// is never interleaved with siblings that share its name as a prefix.
pub fn sibling_order(a: &OsStr, a_is_dir: bool, b: &OsStr, b_is_dir: bool) -> Ordering {
    let a = a.as_encoded_bytes().iter().copied().chain(dir_suffix(a_is_dir));
    let b = b.as_encoded_bytes().iter().copied().chain(dir_suffix(b_is_dir));
    a.cmp(b)
}

fn dir_suffix(is_dir: bool) -> Option<u8> {
    is_dir.then_some(b'/')
}
