//! Structured segment emission shared by the path and pipeline-trace
//! surface forms. Both grammars emit the same fields in the same order;
//! only the separator and the head/tail segments differ.

use std::fmt;
use std::fmt::Write as _;

/// Ordered segment writer over one separator.
pub(crate) struct SegmentWriter {
    out: String,
    separator: &'static str,
}

impl SegmentWriter {
    /// Writer for the `/`-delimited public path form.
    pub fn path() -> Self {
        Self {
            out: String::new(),
            separator: "/",
        }
    }

    /// Writer for the `|>`-delimited trace form, headed by the source
    /// reference.
    pub fn trace(source_key: &str) -> Self {
        Self {
            out: format!("blob#{source_key}"),
            separator: "|>",
        }
    }

    /// Append one segment, separated from whatever precedes it.
    pub fn push(&mut self, segment: impl fmt::Display) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push_str(self.separator);
        }
        let _ = write!(self.out, "{segment}");
        self
    }

    /// Finish, appending the `.{ext}` terminator used by the path form.
    pub fn finish_with_extension(mut self, ext: &str) -> String {
        let _ = write!(self.out, ".{ext}");
        self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}
