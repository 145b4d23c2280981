//! Rendering of entries into description lines.
//!
//! ```text
//! <path> <kind> [mode <octal>] [mtime [<timestamp>]] [size <bytes> sha256 <hex>] [-> <target>]
//! <path> ref ==> <path from the virtual root>
//! <path> ref => <path relative to the entry's directory>
//! ```
use crate::entry::Attributes;
use crate::entry::Entry;
use crate::entry::EntryKind;
use crate::errors::Error;
use crate::escape;
use crate::options::DescribeOptions;
use crate::utils::format_timestamp;

/// Turns entries into lines, one per entry, without trailing newline.
#[derive(Debug, Clone)]
pub struct Formatter {
    options: DescribeOptions,
}

impl Formatter {
    /// Creates a formatter rendering with `options`.
    pub fn new(options: &DescribeOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }

    /// Renders a single entry.
    pub fn format(&self, entry: &Entry) -> Result<String, Error> {
        let literal = self.options.literal_paths;
        let mut fields = vec![entry.path.render(literal)?];

        match &entry.kind {
            EntryKind::Directory(attrs) => {
                fields.push("dir".to_string());
                self.push_attributes(&mut fields, attrs);
            }
            EntryKind::Regular {
                attrs,
                size,
                content,
            } => {
                fields.push("reg".to_string());
                self.push_attributes(&mut fields, attrs);
                if self.options.emit_size {
                    fields.push("size".to_string());
                    fields.push(size.to_string());
                    if let Some(content) = content {
                        fields.push("sha256".to_string());
                        fields.push(content.sha256_prefix(self.options.hash_length).to_string());
                    }
                }
            }
            EntryKind::Symlink { attrs, target } => {
                fields.push("sym".to_string());
                self.push_attributes(&mut fields, attrs);
                fields.push("->".to_string());
                fields.push(escape::render(target.as_encoded_bytes(), literal)?);
            }
            EntryKind::Other(attrs) => {
                fields.push("???".to_string());
                self.push_attributes(&mut fields, attrs);
            }
            EntryKind::Reference { canonical } => {
                fields.push("ref".to_string());
                if self.options.relative_refs {
                    fields.push("=>".to_string());
                    fields.push(entry.path.render_relative(canonical, literal)?);
                } else {
                    fields.push("==>".to_string());
                    fields.push(canonical.render(literal)?);
                }
            }
        }

        Ok(fields.join(" "))
    }

    fn push_attributes(&self, fields: &mut Vec<String>, attrs: &Attributes) {
        if self.options.emit_mode
            && let Some(mode) = attrs.mode
        {
            fields.push("mode".to_string());
            fields.push(format!("{mode:o}"));
        }
        if self.options.emit_mtime {
            fields.push("mtime".to_string());
            fields.push(format_timestamp(&attrs.mtime, self.options.mtime_precision));
        }
    }
}
