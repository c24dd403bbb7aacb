//! Pixel filters. These are opaque to the normalizer (they never change
//! dimensions); parsing only validates their documented argument ranges.

use std::fmt;

use smallvec::SmallVec;

use crate::foundation::error::{ParseError, RangeError};
use crate::syntax::call::CallSyntax;
use crate::syntax::unit::Unit;

/// A dimension-preserving filter applied after geometry is resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Filter {
    /// Gaussian blur radius in `[0, 2000]`.
    Blur(f64),
    /// Brightness multiplier in `[0, 10]`.
    Brightness(f64),
    /// Contrast multiplier in `[0, 10]`.
    Contrast(f64),
    /// Grayscale amount in `[0, 1]`.
    Grayscale(f64),
    /// Hue rotation in degrees.
    HueRotate(f64),
    /// Color inversion amount in `[0, 1]`.
    Invert(f64),
    /// Opacity in `[0, 1]`.
    Opacity(f64),
    /// Pixelation block size in `[0, 16384]`.
    Pixelate(f64),
    /// Saturation adjustment in `[-2, 2]`.
    Saturate(f64),
    /// Sepia amount in `[0, 1]`.
    Sepia(f64),
    /// Vibrance adjustment in `[-2, 2]`.
    Vibrance(f64),
    /// Feature detection: `detect(edges,algorithm:x)`.
    Detect {
        target: String,
        algorithm: Option<String>,
    },
    /// An unrecognized call, carried through verbatim.
    Custom {
        name: String,
        args: SmallVec<[String; 4]>,
    },
}

impl Filter {
    /// Parse a filter call. Unknown names become [`Filter::Custom`].
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let filter = match call.name.as_str() {
            "blur" => Self::Blur(amount(call, "blur", 0.0, 2000.0)?),
            "brightness" => Self::Brightness(amount(call, "brightness", 0.0, 10.0)?),
            "contrast" => Self::Contrast(amount(call, "contrast", 0.0, 10.0)?),
            "grayscale" => Self::Grayscale(amount(call, "grayscale", 0.0, 1.0)?),
            "hue-rotate" | "huerotate" => {
                Self::HueRotate(amount(call, "hue-rotate", -360.0, 360.0)?)
            }
            "invert" => Self::Invert(amount(call, "invert", 0.0, 1.0)?),
            "opacity" => Self::Opacity(amount(call, "opacity", 0.0, 1.0)?),
            "pixelate" => Self::Pixelate(amount(call, "pixelate", 0.0, 16384.0)?),
            "saturate" => Self::Saturate(amount(call, "saturate", -2.0, 2.0)?),
            "sepia" => Self::Sepia(amount(call, "sepia", 0.0, 1.0)?),
            "vibrance" => Self::Vibrance(amount(call, "vibrance", -2.0, 2.0)?),
            "detect" => {
                let target = call
                    .arg(0)
                    .ok_or_else(|| ParseError::new(0, "detect requires a target"))?;
                // Legacy second positional argument was the algorithm.
                let algorithm = call
                    .keyed("algorithm")
                    .or_else(|| call.args.get(1).filter(|a| a.key.is_none()).map(|a| a.value.as_str()));
                Self::Detect {
                    target: target.to_owned(),
                    algorithm: algorithm.map(str::to_owned),
                }
            }
            _ => Self::Custom {
                name: call.name.clone(),
                args: call
                    .args
                    .iter()
                    .map(|a| match &a.key {
                        Some(key) => format!("{key}:{}", a.value),
                        None => a.value.clone(),
                    })
                    .collect(),
            },
        };
        Ok(filter)
    }
}

/// Single numeric argument, bounded by `[min, max]`.
fn amount(call: &CallSyntax, field: &'static str, min: f64, max: f64) -> Result<f64, ParseError> {
    let text = call
        .arg(0)
        .ok_or_else(|| ParseError::new(0, format!("{field} requires an amount")))?;
    let value = Unit::parse(text)?.value();
    RangeError::check(field, min, max, value).map_err(|e| ParseError::from_range(0, e))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blur(v) => write!(f, "blur({v})"),
            Self::Brightness(v) => write!(f, "brightness({v})"),
            Self::Contrast(v) => write!(f, "contrast({v})"),
            Self::Grayscale(v) => write!(f, "grayscale({v})"),
            Self::HueRotate(v) => write!(f, "hue-rotate({v}deg)"),
            Self::Invert(v) => write!(f, "invert({v})"),
            Self::Opacity(v) => write!(f, "opacity({v})"),
            Self::Pixelate(v) => write!(f, "pixelate({v})"),
            Self::Saturate(v) => write!(f, "saturate({v})"),
            Self::Sepia(v) => write!(f, "sepia({v})"),
            Self::Vibrance(v) => write!(f, "vibrance({v})"),
            Self::Detect { target, algorithm } => match algorithm {
                Some(a) => write!(f, "detect({target},algorithm:{a})"),
                None => write!(f, "detect({target})"),
            },
            Self::Custom { name, args } => {
                if args.is_empty() {
                    f.write_str(name)
                } else {
                    write!(f, "{name}({})", args.join(","))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(segment: &str) -> Result<Filter, ParseError> {
        Filter::from_call(&CallSyntax::parse(segment).unwrap())
    }

    #[test]
    fn amounts_round_trip() {
        assert_eq!(parse("blur(10)").unwrap().to_string(), "blur(10)");
        assert_eq!(parse("sepia(0.95)").unwrap().to_string(), "sepia(0.95)");
        assert_eq!(
            parse("hue-rotate(90deg)").unwrap().to_string(),
            "hue-rotate(90deg)"
        );
        assert_eq!(parse("saturate(-1.5)").unwrap(), Filter::Saturate(-1.5));
    }

    #[test]
    fn out_of_range_amounts_carry_the_bounds() {
        let err = parse("blur(2001)").unwrap_err();
        let cause = err.cause.expect("range cause");
        assert_eq!(cause.field, "blur");
        assert_eq!(cause.max, 2000.0);
        assert_eq!(cause.actual, 2001.0);

        assert!(parse("opacity(1.5)").is_err());
        assert!(parse("brightness(11)").is_err());
    }

    #[test]
    fn legacy_positional_detect_algorithm_becomes_keyed() {
        let filter = parse("detect(edges,lanzcos5)").unwrap();
        assert_eq!(filter.to_string(), "detect(edges,algorithm:lanzcos5)");

        let filter = parse("detect(edges,algorithm:lanzcos5)").unwrap();
        assert_eq!(filter.to_string(), "detect(edges,algorithm:lanzcos5)");
    }

    #[test]
    fn unknown_calls_pass_through_as_custom() {
        let filter = parse("halftone(4,angle:45)").unwrap();
        assert_eq!(filter.to_string(), "halftone(4,angle:45)");
    }
}
