use std::io::Write;
use std::path::Path as StdPath;

use crate::errors::Error;
use crate::format::Formatter;
use crate::options::DescribeOptions;
use crate::walker::Walker;

/// Lazy sequence of description lines for a set of roots.
///
/// Each call to `next` walks, identity-checks, hashes, and renders exactly
/// one entry. After an error the sequence ends.
pub struct Description {
    walker: Walker,
    formatter: Formatter,
    failed: bool,
}

impl Description {
    /// Prepares a description of `roots`.
    pub fn new<P: AsRef<StdPath>>(roots: &[P], options: &DescribeOptions) -> Result<Self, Error> {
        Ok(Self {
            walker: Walker::new(roots, options)?,
            formatter: Formatter::new(options),
            failed: false,
        })
    }
}

impl Iterator for Description {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self
            .walker
            .next()?
            .and_then(|entry| self.formatter.format(&entry));
        self.failed = line.is_err();
        Some(line)
    }
}

/// Writes the description of `roots` to `out`, one newline-terminated line
/// per entry, and flushes it.
///
/// Lines are written as they are produced. On error, whatever was already
/// written is incomplete and must be discarded by the caller.
pub fn describe<P, W>(roots: &[P], options: &DescribeOptions, out: &mut W) -> Result<(), Error>
where
    P: AsRef<StdPath>,
    W: Write,
{
    let write_error = |e: std::io::Error| Error::Write {
        what: "description".to_string(),
        how: e.to_string(),
    };
    for line in Description::new(roots, options)? {
        writeln!(out, "{}", line?).map_err(write_error)?;
    }
    out.flush().map_err(write_error)
}

/// Collects the whole description of `roots` into a string.
pub fn describe_to_string<P: AsRef<StdPath>>(
    roots: &[P],
    options: &DescribeOptions,
) -> Result<String, Error> {
    let mut out = Vec::new();
    describe(roots, options, &mut out)?;
    String::from_utf8(out).map_err(|e| Error::Encoding {
        what: e.to_string(),
    })
}
