//! Extraction selectors: which page, frame, or instant of the source to use.

use std::fmt;

use crate::foundation::error::ParseError;
use crate::syntax::call::CallSyntax;
use crate::syntax::unit::Unit;

/// Selects one page/frame/instant from a multi-page or timed source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Extract {
    /// A document page (1-based).
    Page(u32),
    /// A video frame (`frame(0)` canonicalizes to `poster`).
    Frame(u32),
    /// The poster frame.
    Poster,
    /// A timestamp in seconds.
    Time(f64),
}

impl Extract {
    /// Parse `page(n)`, `frame(n)`, `poster`, or `time(t)`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        match call.name.as_str() {
            "poster" => Ok(Self::Poster),
            "page" => Ok(Self::Page(number(call)?)),
            "frame" => Ok(match number(call)? {
                0 => Self::Poster,
                n => Self::Frame(n),
            }),
            "time" => {
                let text = call
                    .arg(0)
                    .ok_or_else(|| ParseError::new(0, "time requires a value"))?;
                Ok(Self::Time(parse_seconds(text)?))
            }
            other => Err(ParseError::new(0, format!("unknown extract '{other}'"))),
        }
    }

    /// Parse a bare `hh:mm:ss[.f]` / `mm:ss` timestamp segment.
    pub fn from_timestamp(segment: &str) -> Result<Self, ParseError> {
        Ok(Self::Time(parse_timestamp(segment)?))
    }
}

impl fmt::Display for Extract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "page({n})"),
            Self::Frame(n) => write!(f, "frame({n})"),
            Self::Poster => write!(f, "poster"),
            Self::Time(secs) => write!(f, "time({secs}s)"),
        }
    }
}

fn number(call: &CallSyntax) -> Result<u32, ParseError> {
    let text = call
        .arg(0)
        .ok_or_else(|| ParseError::new(0, format!("{} requires a number", call.name)))?;
    text.parse()
        .map_err(|_| ParseError::new(0, format!("invalid number '{text}'")))
}

/// Seconds from a `time(..)` argument: a float with an optional `s` suffix,
/// or a colon-delimited timestamp.
fn parse_seconds(text: &str) -> Result<f64, ParseError> {
    if text.contains(':') {
        return parse_timestamp(text);
    }
    match Unit::parse(text)? {
        Unit::Scalar(v) | Unit::Seconds(v) if v >= 0.0 => Ok(v),
        _ => Err(ParseError::new(0, format!("invalid time '{text}'"))),
    }
}

/// `[hh:]mm:ss[.fraction]` to seconds.
fn parse_timestamp(text: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::new(0, format!("invalid timestamp '{text}'"));
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid());
    }

    let mut seconds = 0.0;
    for part in &parts {
        let value: f64 = part.parse().map_err(|_| invalid())?;
        if value < 0.0 {
            return Err(invalid());
        }
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_frame_round_trip() {
        let page = Extract::from_call(&CallSyntax::parse("page(1)").unwrap()).unwrap();
        assert_eq!(page.to_string(), "page(1)");

        let frame = Extract::from_call(&CallSyntax::parse("frame(18)").unwrap()).unwrap();
        assert_eq!(frame.to_string(), "frame(18)");
    }

    #[test]
    fn frame_zero_is_the_poster() {
        let poster = Extract::from_call(&CallSyntax::parse("frame(0)").unwrap()).unwrap();
        assert_eq!(poster, Extract::Poster);
        assert_eq!(poster.to_string(), "poster");
    }

    #[test]
    fn bare_float_time_gains_the_seconds_suffix() {
        let time = Extract::from_call(&CallSyntax::parse("time(1.345)").unwrap()).unwrap();
        assert_eq!(time, Extract::Time(1.345));
        assert_eq!(time.to_string(), "time(1.345s)");

        let time = Extract::from_call(&CallSyntax::parse("time(110.777333s)").unwrap()).unwrap();
        assert_eq!(time.to_string(), "time(110.777333s)");
    }

    #[test]
    fn timestamps_convert_to_seconds() {
        assert_eq!(Extract::from_timestamp("00:00:01").unwrap(), Extract::Time(1.0));
        assert_eq!(Extract::from_timestamp("00:01:30").unwrap(), Extract::Time(90.0));
        assert_eq!(Extract::from_timestamp("1:30").unwrap(), Extract::Time(90.0));
        assert_eq!(
            Extract::from_timestamp("00:00:01.777333").unwrap(),
            Extract::Time(1.777333)
        );
        assert!(Extract::from_timestamp("1:2:3:4").is_err());
    }

    #[test]
    fn integral_time_displays_without_fraction() {
        assert_eq!(Extract::Time(1.0).to_string(), "time(1s)");
    }
}
