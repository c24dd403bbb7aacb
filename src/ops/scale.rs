//! Scale: direct output-pixel sizing with an interpolation hint.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::foundation::geometry::{MAX_DIMENSION, Size};
use crate::syntax::call::CallSyntax;

/// Resampling algorithm requested for a scale step.
///
/// The normalizer defaults to Lanczos3; an explicit `none` keeps whatever
/// interpolation was already recorded. Names here are hints for the codec
/// backend, never executed by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Interpolation {
    #[default]
    None,
    Nearest,
    Box,
    Bilinear,
    Bicubic,
    Mitchell,
    Lanczos2,
    Lanczos3,
}

impl Interpolation {
    /// Parse a canonical interpolation name.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "none" => Some(Self::None),
            "nearest" => Some(Self::Nearest),
            "box" => Some(Self::Box),
            "bilinear" => Some(Self::Bilinear),
            "bicubic" => Some(Self::Bicubic),
            "mitchell" => Some(Self::Mitchell),
            "lanczos2" => Some(Self::Lanczos2),
            "lanczos3" => Some(Self::Lanczos3),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Nearest => "nearest",
            Self::Box => "box",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::Mitchell => "mitchell",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

/// An exact output-space scale step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scale {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Requested interpolation; `None` defers to the pipeline default.
    pub mode: Interpolation,
}

impl Scale {
    /// Build a validated scale step.
    pub fn new(width: u32, height: u32, mode: Interpolation) -> Result<Self, RangeError> {
        RangeError::check("width", 0.0, f64::from(MAX_DIMENSION), f64::from(width))?;
        RangeError::check("height", 0.0, f64::from(MAX_DIMENSION), f64::from(height))?;
        Ok(Self {
            width,
            height,
            mode,
        })
    }

    /// Parse `scale(w,h[,interpolation])`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let width = parse_axis(call, 0, "width")?;
        let height = parse_axis(call, 1, "height")?;
        let mode = match call.arg(2) {
            Some(name) => Interpolation::parse(name).ok_or_else(|| {
                ParseError::new(0, format!("unknown interpolation '{name}'"))
            })?,
            None => Interpolation::None,
        };
        Self::new(width, height, mode).map_err(|e| ParseError::from_range(0, e))
    }

    /// Output size of this step.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale({},{}", self.width, self.height)?;
        if self.mode != Interpolation::None {
            write!(f, ",{}", self.mode.name())?;
        }
        write!(f, ")")
    }
}

fn parse_axis(call: &CallSyntax, index: usize, field: &'static str) -> Result<u32, ParseError> {
    let text = call
        .arg(index)
        .ok_or_else(|| ParseError::new(0, format!("scale requires a {field}")))?;
    text.parse()
        .map_err(|_| ParseError::new(0, format!("invalid {field} '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_canonicalize() {
        let scale = Scale::from_call(&CallSyntax::parse("scale(960,720,lanczos3)").unwrap()).unwrap();
        assert_eq!(scale.mode, Interpolation::Lanczos3);
        assert_eq!(scale.to_string(), "scale(960,720,lanczos3)");
    }

    #[test]
    fn omitted_interpolation_stays_unset() {
        let scale = Scale::from_call(&CallSyntax::parse("scale(50,50)").unwrap()).unwrap();
        assert_eq!(scale.mode, Interpolation::None);
        assert_eq!(scale.to_string(), "scale(50,50)");
    }

    #[test]
    fn oversize_axis_is_a_range_error() {
        let err = Scale::from_call(&CallSyntax::parse("scale(99999,10)").unwrap()).unwrap_err();
        assert_eq!(err.cause.as_ref().unwrap().field, "width");
    }

    #[test]
    fn unknown_interpolation_is_rejected() {
        assert!(Scale::from_call(&CallSyntax::parse("scale(10,10,sharp)").unwrap()).is_err());
    }
}
