//! Pad: additive per-side padding, CSS shorthand argument order.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::foundation::geometry::{MAX_DIMENSION, Padding};
use crate::syntax::call::CallSyntax;

/// A padding request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pad {
    /// Per-side insets.
    pub padding: Padding,
}

impl Pad {
    /// Parse `pad(n)`, `pad(v,h)`, or `pad(t,r,b,l)`.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let mut values = [0u32; 4];
        if call.args.is_empty() || call.args.len() == 3 || call.args.len() > 4 {
            return Err(ParseError::new(
                0,
                format!("pad requires 1, 2, or 4 arguments, got {}", call.args.len()),
            ));
        }
        for (i, slot) in values.iter_mut().take(call.args.len()).enumerate() {
            *slot = side(call, i)?;
        }

        let padding = match call.args.len() {
            1 => Padding::uniform(values[0]),
            2 => Padding::symmetric(values[0], values[1]),
            _ => Padding::new(values[0], values[1], values[2], values[3]),
        };
        Ok(Self { padding })
    }

    /// Wrap already-computed padding.
    pub fn new(padding: Padding) -> Self {
        Self { padding }
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pad({})", self.padding)
    }
}

fn side(call: &CallSyntax, index: usize) -> Result<u32, ParseError> {
    let text = call.arg(index).unwrap_or_default();
    let value: u32 = text
        .strip_suffix("px")
        .unwrap_or(text)
        .parse()
        .map_err(|_| ParseError::new(0, format!("invalid pad value '{text}'")))?;
    RangeError::check("pad", 0.0, f64::from(MAX_DIMENSION), f64::from(value))
        .map_err(|e| ParseError::from_range(0, e))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_forms_expand() {
        let pad = Pad::from_call(&CallSyntax::parse("pad(10)").unwrap()).unwrap();
        assert_eq!(pad.padding, Padding::uniform(10));

        let pad = Pad::from_call(&CallSyntax::parse("pad(5,10)").unwrap()).unwrap();
        assert_eq!(pad.padding, Padding::symmetric(5, 10));

        let pad = Pad::from_call(&CallSyntax::parse("pad(1,2,3,4)").unwrap()).unwrap();
        assert_eq!(pad.padding, Padding::new(1, 2, 3, 4));
    }

    #[test]
    fn canonical_text_collapses() {
        let pad = Pad::from_call(&CallSyntax::parse("pad(5,5,5,5)").unwrap()).unwrap();
        assert_eq!(pad.to_string(), "pad(5)");

        let pad = Pad::from_call(&CallSyntax::parse("pad(5,10,5,10)").unwrap()).unwrap();
        assert_eq!(pad.to_string(), "pad(5,10)");
    }

    #[test]
    fn three_arguments_are_rejected() {
        assert!(Pad::from_call(&CallSyntax::parse("pad(1,2,3)").unwrap()).is_err());
    }
}
