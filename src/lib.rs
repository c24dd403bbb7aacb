//! mediapath is a URL-style transformation grammar for media renditions.
//!
//! A compact textual path such as `crop(97,21,480,360)/960x720.jpeg`
//! describes geometry and encoding against a source of known dimensions.
//! The crate parses those paths, tracks dimensions through arbitrary
//! operation chains, and normalizes them into a canonical two-stage
//! pipeline: at most one crop in source pixel space, followed by at most
//! one scale in output space. It computes *what* should be executed and
//! the canonical text for it; pixel work belongs to a codec backend.
//!
//! The main entry points:
//!
//! - Parse and size-track a path with a [`MediaTransformation`]
//! - Normalize it into a [`Pipeline`] and serialize either surface form
//! - Address and re-scale existing renditions with a [`MediaRendition`]
#![forbid(unsafe_code)]

pub mod foundation;
pub mod format;
pub mod normalize;
pub mod ops;
pub mod orientation;
pub mod rendition;
pub mod syntax;
pub mod transform;

pub use crate::foundation::error::{MediaError, MediaResult, ParseError, RangeError};
pub use crate::foundation::geometry::{Anchor, Padding, Rect, Size};
pub use crate::format::{Format, FormatKind};
pub use crate::normalize::Pipeline;
pub use crate::ops::{Operation, parse_segment};
pub use crate::orientation::Orientation;
pub use crate::rendition::{MediaRendition, UrlSigner, XxhSigner};
pub use crate::transform::{MediaTransformation, Source};
