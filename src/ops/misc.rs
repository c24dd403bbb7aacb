//! Small standalone segments: background color, quality, lossless, expiry,
//! metadata output, and the debug marker.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::syntax::call::CallSyntax;

/// Canvas background color, `bg(color)`. The color is an opaque token
/// (named color or hex without `#`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Background {
    pub color: String,
}

impl Background {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }

    /// Parse `bg(red)` or the alias `background(red)`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let color = call
            .arg(0)
            .ok_or_else(|| ParseError::new(0, "bg requires a color"))?;
        Ok(Self::new(color))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bg({})", self.color)
    }
}

/// Standalone `quality(n)` segment, merged into the encode step during
/// normalization. Bounded by `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Quality(pub u32);

impl Quality {
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let text = call
            .arg(0)
            .ok_or_else(|| ParseError::new(0, "quality requires a value"))?;
        let value: u32 = text
            .parse()
            .map_err(|_| ParseError::new(0, format!("invalid quality '{text}'")))?;
        RangeError::check("quality", 0.0, 100.0, f64::from(value))
            .map_err(|e| ParseError::from_range(0, e))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quality({})", self.0)
    }
}

/// Metadata output request: `metadata` or `metadata(width,height,...)` to
/// select specific properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    /// Requested property names; empty means everything.
    pub properties: Vec<String>,
}

impl Metadata {
    pub fn from_call(call: &CallSyntax) -> Self {
        Self {
            properties: call.args.iter().map(|a| a.value.clone()).collect(),
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            f.write_str("metadata")
        } else {
            write!(f, "metadata({})", self.properties.join(","))
        }
    }
}

/// Cache-expiry timestamp, `expires(unix_seconds)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Expires(pub i64);

impl Expires {
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let text = call
            .arg(0)
            .ok_or_else(|| ParseError::new(0, "expires requires a timestamp"))?;
        let value: i64 = text
            .parse()
            .map_err(|_| ParseError::new(0, format!("invalid timestamp '{text}'")))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expires({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_aliases_collapse_to_bg() {
        let bg = Background::from_call(&CallSyntax::parse("background(red)").unwrap()).unwrap();
        assert_eq!(bg.to_string(), "bg(red)");
    }

    #[test]
    fn quality_is_bounded() {
        let q = Quality::from_call(&CallSyntax::parse("quality(82)").unwrap()).unwrap();
        assert_eq!(q, Quality(82));
        assert!(Quality::from_call(&CallSyntax::parse("quality(101)").unwrap()).is_err());
    }

    #[test]
    fn metadata_keeps_requested_properties() {
        let m = Metadata::from_call(&CallSyntax::parse("metadata").unwrap());
        assert!(m.properties.is_empty());
        assert_eq!(m.to_string(), "metadata");

        let m = Metadata::from_call(&CallSyntax::parse("metadata(width,height)").unwrap());
        assert_eq!(m.to_string(), "metadata(width,height)");
    }

    #[test]
    fn expires_round_trips() {
        let e = Expires::from_call(&CallSyntax::parse("expires(1700000000)").unwrap()).unwrap();
        assert_eq!(e.to_string(), "expires(1700000000)");
    }
}
