//! Crop: a rectangle in the coordinate space of the box it is applied to.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::foundation::geometry::{MAX_DIMENSION, Rect, Size};
use crate::ops::resize::DisplayUnit;
use crate::syntax::call::CallSyntax;
use crate::syntax::unit::Unit;

/// A crop request. Components keep their units so percent crops resolve
/// against whatever box they end up applied to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Crop {
    /// Left edge.
    pub x: Unit,
    /// Top edge.
    pub y: Unit,
    /// Width.
    pub width: Unit,
    /// Height.
    pub height: Unit,
}

impl Crop {
    /// Crop at integer pixel coordinates.
    pub fn pixels(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x: Unit::Scalar(f64::from(x)),
            y: Unit::Scalar(f64::from(y)),
            width: Unit::Scalar(f64::from(width)),
            height: Unit::Scalar(f64::from(height)),
        }
    }

    /// Parse `crop(x,y,w,h)`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        if call.args.len() != 4 {
            return Err(ParseError::new(
                0,
                format!("crop requires 4 arguments, got {}", call.args.len()),
            ));
        }
        Ok(Self {
            x: component(call, 0, "x")?,
            y: component(call, 1, "y")?,
            width: component(call, 2, "width")?,
            height: component(call, 3, "height")?,
        })
    }

    /// Resolve into a pixel rectangle within `within` (percent components
    /// scale against the box axes).
    pub fn rectangle(&self, within: Size) -> Rect {
        Rect::new(
            self.x.resolve(within.width).unwrap_or(0),
            self.y.resolve(within.height).unwrap_or(0),
            self.width.resolve(within.width).unwrap_or(within.width),
            self.height.resolve(within.height).unwrap_or(within.height),
        )
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "crop({},{},{},{})",
            DisplayUnit(self.x),
            DisplayUnit(self.y),
            DisplayUnit(self.width),
            DisplayUnit(self.height)
        )
    }
}

fn component(call: &CallSyntax, index: usize, field: &'static str) -> Result<Unit, ParseError> {
    let unit = Unit::parse(call.arg(index).unwrap_or_default())?;
    match unit {
        Unit::Scalar(v) | Unit::Px(v) => {
            RangeError::check(field, 0.0, f64::from(MAX_DIMENSION), v)
                .map_err(|e| ParseError::from_range(0, e))?;
        }
        Unit::Percent(v) => {
            RangeError::check(field, 0.0, 100.0, v).map_err(|e| ParseError::from_range(0, e))?;
        }
        Unit::Auto | Unit::Seconds(_) | Unit::Degrees(_) => {
            return Err(ParseError::new(0, format!("invalid crop {field}")));
        }
    }
    Ok(unit)
}
