//! The terminal encode step of a normalized pipeline.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::format::Format;
use crate::syntax::call::CallSyntax;

/// Encode parameters: target format plus optional quality and lossless flags.
///
/// Quality and lossless arrive as standalone path segments and are merged
/// into the encode step during normalization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Encode {
    pub format: Format,
    /// Encoder quality in `[0, 100]`.
    pub quality: Option<u32>,
    pub lossless: bool,
}

impl Encode {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            quality: None,
            lossless: false,
        }
    }

    pub fn with_quality(format: Format, quality: u32) -> Result<Self, RangeError> {
        RangeError::check("quality", 0.0, 100.0, f64::from(quality))?;
        Ok(Self {
            format,
            quality: Some(quality),
            lossless: false,
        })
    }

    /// Parse the trace segment `NAME::encode` / `NAME::encode(quality:q)`.
    ///
    /// Parsed by hand: the `::` would otherwise collide with the legacy
    /// `name:value` call form.
    pub fn from_trace(segment: &str) -> Result<Self, ParseError> {
        let (head, args) = match segment.find('(') {
            Some(open) => (&segment[..open], &segment[open..]),
            None => (segment, ""),
        };
        let Some(name) = head.strip_suffix("::encode") else {
            return Err(ParseError::new(0, format!("not an encode segment '{segment}'")));
        };
        let format = Format::parse(name)?;

        let mut encode = Self::new(format);
        if !args.is_empty() {
            let call = CallSyntax::parse(&format!("encode{args}"))?;
            if let Some(q) = call.keyed("quality") {
                let quality: u32 = q
                    .parse()
                    .map_err(|_| ParseError::new(0, format!("invalid quality '{q}'")))?;
                RangeError::check("quality", 0.0, 100.0, f64::from(quality))
                    .map_err(|e| ParseError::from_range(0, e))?;
                encode.quality = Some(quality);
            }
            if call.arg(0) == Some("lossless") {
                encode.lossless = true;
            }
        }
        Ok(encode)
    }
}

impl fmt::Display for Encode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::encode", self.format.trace_name())?;
        match (self.lossless, self.quality) {
            (true, _) => write!(f, "(lossless)"),
            (false, Some(q)) => write!(f, "(quality:{q})"),
            (false, None) => Ok(()),
        }
    }
}
