//! The operation model: everything one transform-path segment can mean.
//!
//! [`parse_segment`] is the single entry point; it classifies a segment by
//! shape (leading digit, `::encode` suffix, call name) and hands it to the
//! matching operation parser. Segment-index bookkeeping belongs to the path
//! parser; everything here reports index 0.

use std::fmt;

use crate::foundation::error::ParseError;
use crate::syntax::call::CallSyntax;

pub mod crop;
pub mod encode;
pub mod extract;
pub mod filter;
pub mod misc;
pub mod orient;
pub mod pad;
pub mod resize;
pub mod scale;

pub use crop::Crop;
pub use encode::Encode;
pub use extract::Extract;
pub use filter::Filter;
pub use misc::{Background, Expires, Metadata, Quality};
pub use orient::{Flip, FlipAxis, Rotate};
pub use pad::Pad;
pub use resize::{Resize, ResizeMode};
pub use scale::{Interpolation, Scale};

/// One parsed transform-path segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    Resize(Resize),
    Scale(Scale),
    Crop(Crop),
    Rotate(Rotate),
    Flip(Flip),
    Pad(Pad),
    Extract(Extract),
    Background(Background),
    Quality(Quality),
    Lossless,
    Expires(Expires),
    Filter(Filter),
    Encode(Encode),
    /// Emit metadata about the rendition instead of pixels.
    Metadata(Metadata),
    /// Route the request through the diagnostic path.
    Debug,
}

/// Parse one transform segment. Errors carry index 0; callers re-home them.
pub fn parse_segment(segment: &str) -> Result<Operation, ParseError> {
    if segment.is_empty() {
        return Err(ParseError::new(0, "empty segment"));
    }

    // Digit-led segments are grammar shorthands, not calls.
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        if segment.contains(':') {
            return Ok(Operation::Extract(Extract::from_timestamp(segment)?));
        }
        return Ok(Operation::Resize(Resize::parse_shorthand(segment)?));
    }

    if segment.contains("::encode") {
        return Ok(Operation::Encode(Encode::from_trace(segment)?));
    }

    let call = CallSyntax::parse(segment)?;
    let op = match call.name.as_str() {
        "resize" => Operation::Resize(Resize::from_call(&call)?),
        "scale" => Operation::Scale(Scale::from_call(&call)?),
        "crop" => Operation::Crop(Crop::from_call(&call)?),
        "rotate" => Operation::Rotate(Rotate::from_call(&call)?),
        "flip" => Operation::Flip(Flip::from_call(&call)?),
        "pad" => Operation::Pad(Pad::from_call(&call)?),
        "page" | "frame" | "poster" | "time" => Operation::Extract(Extract::from_call(&call)?),
        "bg" | "background" => Operation::Background(Background::from_call(&call)?),
        "quality" => Operation::Quality(Quality::from_call(&call)?),
        "lossless" => Operation::Lossless,
        "expires" => Operation::Expires(Expires::from_call(&call)?),
        "metadata" => Operation::Metadata(Metadata::from_call(&call)),
        "debug" => Operation::Debug,
        _ => Operation::Filter(Filter::from_call(&call)?),
    };
    Ok(op)
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resize(op) => op.fmt(f),
            Self::Scale(op) => op.fmt(f),
            Self::Crop(op) => op.fmt(f),
            Self::Rotate(op) => op.fmt(f),
            Self::Flip(op) => op.fmt(f),
            Self::Pad(op) => op.fmt(f),
            Self::Extract(op) => op.fmt(f),
            Self::Background(op) => op.fmt(f),
            Self::Quality(op) => op.fmt(f),
            Self::Lossless => f.write_str("lossless"),
            Self::Expires(op) => op.fmt(f),
            Self::Filter(op) => op.fmt(f),
            Self::Encode(op) => op.fmt(f),
            Self::Metadata(op) => op.fmt(f),
            Self::Debug => f.write_str("debug"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_shapes_dispatch() {
        assert!(matches!(parse_segment("960x720").unwrap(), Operation::Resize(_)));
        assert!(matches!(parse_segment("1:30").unwrap(), Operation::Extract(_)));
        assert!(matches!(
            parse_segment("crop(97,21,480,360)").unwrap(),
            Operation::Crop(_)
        ));
        assert!(matches!(
            parse_segment("JPEG::encode").unwrap(),
            Operation::Encode(_)
        ));
        assert!(matches!(parse_segment("lossless").unwrap(), Operation::Lossless));
        assert!(matches!(parse_segment("debug").unwrap(), Operation::Debug));
    }

    #[test]
    fn unknown_calls_become_custom_filters() {
        let op = parse_segment("swirl(12)").unwrap();
        assert_eq!(op.to_string(), "swirl(12)");
        assert!(matches!(op, Operation::Filter(Filter::Custom { .. })));
    }

    #[test]
    fn canonical_text_round_trips() {
        for text in [
            "crop(97,21,480,360)",
            "scale(960,720,lanczos3)",
            "rotate(90)",
            "flip(x)",
            "pad(5,10)",
            "bg(red)",
            "quality(82)",
            "blur(10)",
            "page(1)",
            "time(1.345s)",
            "100x50-c",
        ] {
            assert_eq!(parse_segment(text).unwrap().to_string(), text, "{text}");
        }
    }
}
