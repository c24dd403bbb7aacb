use std::fmt;

/// Convenience result type used across mediapath.
pub type MediaResult<T> = Result<T, MediaError>;

/// Top-level error taxonomy used by parse/normalize/validate APIs.
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// A transform path segment failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A value parsed but violates a documented domain range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A post-normalization structural constraint was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MediaError {
    /// Build a [`MediaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Malformed grammar in one transform-path segment.
///
/// `index` is the 0-based position of the failing segment among the path's
/// transform segments (the source key prefix is not counted; the trailing
/// format extension counts as one past the last transform). Callers report
/// it back against the original request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 0-based transform-segment index of the failure.
    pub index: usize,
    /// Human-readable description of the failure.
    pub message: String,
    /// The range violation that caused this failure, when there was one.
    pub cause: Option<RangeError>,
}

impl ParseError {
    /// Build a parse error with no inner range cause.
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap a range violation raised while parsing the segment at `index`.
    pub fn from_range(index: usize, cause: RangeError) -> Self {
        Self {
            index,
            message: cause.to_string(),
            cause: Some(cause),
        }
    }

    /// Re-home this error to a different segment index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at segment {}: {}", self.index, self.message)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|c| c as _)
    }
}

/// A value outside its documented domain range.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{field} must be between {min} and {max}, was {actual}")]
pub struct RangeError {
    /// Name of the offending field or argument.
    pub field: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// The value that was supplied.
    pub actual: f64,
}

impl RangeError {
    /// Build a range error for `field` bounded by `[min, max]`.
    pub fn new(field: &'static str, min: f64, max: f64, actual: f64) -> Self {
        Self {
            field,
            min,
            max,
            actual,
        }
    }

    /// Check `actual` against `[min, max]`, returning it unchanged when in range.
    pub fn check(field: &'static str, min: f64, max: f64, actual: f64) -> Result<f64, RangeError> {
        if actual < min || actual > max || !actual.is_finite() {
            return Err(Self::new(field, min, max, actual));
        }
        Ok(actual)
    }
}
