//! Function-call segment grammar: `name(arg1,arg2,key:value,...)`.
//!
//! One path segment parses to a name plus ordered, optionally-keyed raw
//! argument strings. Argument values keep their raw text; unit suffixes and
//! enum names are interpreted by the operation parsers.

use smallvec::SmallVec;

use crate::foundation::error::ParseError;

/// One call argument: raw value text with an optional key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    /// `key` of a `key:value` argument; `None` for positional arguments.
    pub key: Option<String>,
    /// Raw value text, trimmed.
    pub value: String,
}

impl Argument {
    fn positional(value: &str) -> Self {
        Self {
            key: None,
            value: value.trim().to_owned(),
        }
    }

    fn keyed(key: &str, value: &str) -> Self {
        Self {
            key: Some(key.trim().to_owned()),
            value: value.trim().to_owned(),
        }
    }
}

/// A parsed call segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSyntax {
    /// Function name (the full segment when there are no arguments).
    pub name: String,
    /// Ordered arguments.
    pub args: SmallVec<[Argument; 4]>,
}

impl CallSyntax {
    /// Parse one segment. Accepts `name`, `name(args)`, and the legacy
    /// `name:value` form. Errors carry segment index 0; the path parser
    /// re-homes them to the failing segment.
    pub fn parse(segment: &str) -> Result<Self, ParseError> {
        if segment.is_empty() {
            return Err(ParseError::new(0, "empty segment"));
        }

        let Some(open) = segment.find('(') else {
            // Legacy colon form: rotate:90. Otherwise a bare name.
            return match segment.split_once(':') {
                Some((name, value)) if !name.is_empty() => Ok(Self {
                    name: name.to_owned(),
                    args: SmallVec::from_iter([Argument::positional(value)]),
                }),
                _ => Ok(Self {
                    name: segment.to_owned(),
                    args: SmallVec::new(),
                }),
            };
        };

        let name = &segment[..open];
        if name.is_empty() {
            return Err(ParseError::new(0, format!("missing call name in '{segment}'")));
        }
        if !segment.ends_with(')') {
            return Err(ParseError::new(
                0,
                format!("unbalanced parentheses in '{segment}'"),
            ));
        }

        let body = &segment[open + 1..segment.len() - 1];
        let mut args = SmallVec::new();
        for raw in split_top_level(body, segment)? {
            if raw.is_empty() {
                return Err(ParseError::new(0, format!("empty argument in '{segment}'")));
            }
            args.push(parse_argument(raw));
        }

        Ok(Self {
            name: name.to_owned(),
            args,
        })
    }

    /// Positional argument value at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|a| a.value.as_str())
    }

    /// Value of the `key:value` argument named `key`, if present.
    pub fn keyed(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.key.as_deref() == Some(key))
            .map(|a| a.value.as_str())
    }
}

/// Split `body` on commas outside nested parentheses. An empty body yields
/// no arguments.
fn split_top_level<'a>(body: &'a str, segment: &str) -> Result<Vec<&'a str>, ParseError> {
    let mut parts = Vec::new();
    if body.is_empty() {
        return Ok(parts);
    }

    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ParseError::new(0, format!("unbalanced parentheses in '{segment}'"))
                })?;
            }
            ',' if depth == 0 => {
                parts.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::new(
            0,
            format!("unbalanced parentheses in '{segment}'"),
        ));
    }
    parts.push(body[start..].trim());
    Ok(parts)
}

/// A `key:value` argument needs an identifier-shaped key before the first
/// top-level colon; anything else is positional (e.g. a `1:30` timestamp).
fn parse_argument(raw: &str) -> Argument {
    if let Some(colon) = raw.find(':') {
        let (key, value) = raw.split_at(colon);
        let paren = raw.find('(');
        let key_before_parens = paren.is_none_or(|p| colon < p);
        if key_before_parens && is_identifier(key) {
            return Argument::keyed(key, &value[1..]);
        }
    }
    Argument::positional(raw)
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty()
        && text.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_has_zero_args() {
        let call = CallSyntax::parse("poster").unwrap();
        assert_eq!(call.name, "poster");
        assert!(call.args.is_empty());
    }

    #[test]
    fn positional_args_split_on_commas() {
        let call = CallSyntax::parse("crop(0,0,85,20)").unwrap();
        assert_eq!(call.name, "crop");
        assert_eq!(call.arg(0), Some("0"));
        assert_eq!(call.arg(3), Some("20"));
    }

    #[test]
    fn keyed_args_are_recognized() {
        let call = CallSyntax::parse("detect(edges,algorithm:lanzcos5)").unwrap();
        assert_eq!(call.arg(0), Some("edges"));
        assert_eq!(call.keyed("algorithm"), Some("lanzcos5"));
        assert_eq!(call.args[1].key.as_deref(), Some("algorithm"));
    }

    #[test]
    fn legacy_colon_form_is_a_single_argument() {
        let call = CallSyntax::parse("rotate:90").unwrap();
        assert_eq!(call.name, "rotate");
        assert_eq!(call.arg(0), Some("90"));
    }

    #[test]
    fn nested_parens_do_not_split() {
        let call = CallSyntax::parse("draw(text(Hello World,font:14px Helvetica),margin:10)")
            .unwrap();
        assert_eq!(call.arg(0), Some("text(Hello World,font:14px Helvetica)"));
        assert_eq!(call.keyed("margin"), Some("10"));
    }

    #[test]
    fn timestamps_stay_positional() {
        let call = CallSyntax::parse("clip(1:30,2:00)").unwrap();
        assert_eq!(call.arg(0), Some("1:30"));
        assert!(call.args[0].key.is_none());
    }

    #[test]
    fn malformed_segments_are_rejected() {
        assert!(CallSyntax::parse("").is_err());
        assert!(CallSyntax::parse("crop(0,0,85,20").is_err());
        assert!(CallSyntax::parse("crop(0,,85,20)").is_err());
        assert!(CallSyntax::parse("(85,20)").is_err());
        assert!(CallSyntax::parse("crop(a))").is_err());
    }
}
