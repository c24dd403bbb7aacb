//! Unit-suffixed scalar values carried by call arguments.
//!
//! Operation parsers interpret the suffix: `px` (pixels, the default for
//! bare numbers), `%`/`％` (percent of the current box axis), `s` (seconds),
//! `deg` (degrees). `_` means "auto": resolve from the other axis while
//! preserving aspect ratio.

use crate::foundation::error::ParseError;

/// A parsed argument scalar with its unit suffix.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Unit {
    /// `_` — derive from the other axis, preserving aspect ratio.
    Auto,
    /// A bare number with no suffix.
    Scalar(f64),
    /// Pixels (`px`).
    Px(f64),
    /// Percent (`%` or fullwidth `％`); `50` means 50%.
    Percent(f64),
    /// Seconds (`s`).
    Seconds(f64),
    /// Degrees (`deg`).
    Degrees(f64),
}

impl Unit {
    /// Parse one argument value. Errors carry segment index 0; the path
    /// parser re-homes them to the failing segment.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        if text == "_" {
            return Ok(Self::Auto);
        }

        // Longest suffix first: "deg" ends with the same letter as nothing
        // else, but "px" must be tried before the bare parse.
        if let Some(num) = text.strip_suffix("deg") {
            return Ok(Self::Degrees(parse_f64(num)?));
        }
        if let Some(num) = text.strip_suffix("px") {
            return Ok(Self::Px(parse_f64(num)?));
        }
        if let Some(num) = text.strip_suffix('%').or_else(|| text.strip_suffix('％')) {
            return Ok(Self::Percent(parse_f64(num)?));
        }
        if let Some(num) = text.strip_suffix('s') {
            return Ok(Self::Seconds(parse_f64(num)?));
        }

        Ok(Self::Scalar(parse_f64(text)?))
    }

    /// The raw numeric value; zero for `Auto`.
    pub fn value(self) -> f64 {
        match self {
            Self::Auto => 0.0,
            Self::Scalar(v)
            | Self::Px(v)
            | Self::Percent(v)
            | Self::Seconds(v)
            | Self::Degrees(v) => v,
        }
    }

    /// `true` for the `_` placeholder.
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against one axis of the current box: percent values scale
    /// `axis`, pixel/scalar values stand alone, `Auto` yields `None`.
    pub fn resolve(self, axis: u32) -> Option<u32> {
        match self {
            Self::Auto => None,
            Self::Scalar(v) | Self::Px(v) => Some(v as u32),
            Self::Percent(v) => Some((f64::from(axis) * v / 100.0) as u32),
            Self::Seconds(v) | Self::Degrees(v) => Some(v as u32),
        }
    }
}

fn parse_f64(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| ParseError::new(0, format!("invalid number '{text}'")))
}
