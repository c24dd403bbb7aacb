//! Rotate and flip.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::syntax::call::CallSyntax;
use crate::syntax::unit::Unit;

/// A quarter-turn rotation. Angles are clockwise degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rotate {
    /// One of 0, 90, 180, 270.
    pub angle: u16,
}

impl Rotate {
    /// Build a validated rotation; 360 normalizes to 0.
    pub fn new(angle: u32) -> Result<Self, RangeError> {
        let normalized = angle % 360;
        if normalized % 90 != 0 {
            return Err(RangeError::new("rotate", 0.0, 270.0, f64::from(angle)));
        }
        Ok(Self {
            angle: normalized as u16,
        })
    }

    /// Parse `rotate(90)` / `rotate(90deg)` / legacy `rotate:90`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let text = call
            .arg(0)
            .ok_or_else(|| ParseError::new(0, "rotate requires an angle"))?;
        let angle = match Unit::parse(text)? {
            Unit::Scalar(v) | Unit::Degrees(v) if v >= 0.0 && v.fract() == 0.0 => v as u32,
            _ => return Err(ParseError::new(0, format!("invalid angle '{text}'"))),
        };
        Self::new(angle).map_err(|e| ParseError::from_range(0, e))
    }

    /// `true` for the 90/270 turns that swap width and height.
    pub fn transposes(self) -> bool {
        self.angle == 90 || self.angle == 270
    }
}

impl fmt::Display for Rotate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotate({})", self.angle)
    }
}

/// Mirror axis for a flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FlipAxis {
    /// Mirror horizontally.
    X,
    /// Mirror vertically.
    Y,
}

/// A mirror flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Flip {
    /// Mirror axis.
    pub axis: FlipAxis,
}

impl Flip {
    /// Horizontal mirror.
    pub const HORIZONTAL: Self = Self { axis: FlipAxis::X };
    /// Vertical mirror.
    pub const VERTICAL: Self = Self { axis: FlipAxis::Y };

    /// Parse `flip(x)` / `flip(y)`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        match call.arg(0) {
            Some("x") => Ok(Self::HORIZONTAL),
            Some("y") => Ok(Self::VERTICAL),
            other => Err(ParseError::new(
                0,
                format!("invalid flip axis '{}'", other.unwrap_or("")),
            )),
        }
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            FlipAxis::X => write!(f, "flip(x)"),
            FlipAxis::Y => write!(f, "flip(y)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_accepts_deg_suffix_and_canonicalizes_without_it() {
        let rotate = Rotate::from_call(&CallSyntax::parse("rotate(90deg)").unwrap()).unwrap();
        assert_eq!(rotate.angle, 90);
        assert_eq!(rotate.to_string(), "rotate(90)");
    }

    #[test]
    fn rotate_360_normalizes_to_zero() {
        assert_eq!(Rotate::new(360).unwrap().angle, 0);
        let rotate = Rotate::from_call(&CallSyntax::parse("rotate:360").unwrap()).unwrap();
        assert_eq!(rotate.angle, 0);
    }

    #[test]
    fn non_quarter_turns_are_range_errors() {
        assert!(Rotate::new(45).is_err());
        let err = Rotate::from_call(&CallSyntax::parse("rotate(45)").unwrap()).unwrap_err();
        assert_eq!(err.cause.as_ref().unwrap().field, "rotate");
    }

    #[test]
    fn transposing_angles() {
        assert!(Rotate::new(90).unwrap().transposes());
        assert!(Rotate::new(270).unwrap().transposes());
        assert!(!Rotate::new(180).unwrap().transposes());
    }

    #[test]
    fn flip_axes_round_trip() {
        assert_eq!(
            Flip::from_call(&CallSyntax::parse("flip(x)").unwrap()).unwrap(),
            Flip::HORIZONTAL
        );
        assert_eq!(Flip::VERTICAL.to_string(), "flip(y)");
        assert!(Flip::from_call(&CallSyntax::parse("flip(z)").unwrap()).is_err());
    }
}
