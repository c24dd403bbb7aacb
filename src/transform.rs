//! The transformation accumulator: an ordered operation list over a source,
//! tracking the evolving output size left to right.
//!
//! This answers "what are this rendition's final dimensions" without the
//! crop/scale coordinate remapping that full normalization performs; the
//! normalizer in [`crate::normalize`] consumes the same list to build a
//! canonical [`crate::normalize::Pipeline`].

use std::fmt::Write as _;

use crate::foundation::error::{MediaResult, ParseError};
use crate::foundation::geometry::Size;
use crate::format::Format;
use crate::ops::{self, Crop, Flip, Operation, Resize, Rotate, Scale};
use crate::orientation::Orientation;

/// An immutable source asset reference: key plus stored pixel dimensions
/// and EXIF orientation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Source {
    pub key: String,
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl Source {
    pub fn new(key: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
            orientation: Orientation::Normal,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Stored (pre-orientation) size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Upright display size.
    pub fn oriented_size(&self) -> Size {
        self.orientation.oriented_size(self.size())
    }
}

/// An ordered operation list applied to a source, with left-to-right size
/// tracking. Orientation-correction steps are injected ahead of user
/// operations at construction.
#[derive(Clone, Debug)]
pub struct MediaTransformation {
    source: Source,
    operations: Vec<Operation>,
    format: Option<Format>,
    width: u32,
    height: u32,
}

impl MediaTransformation {
    pub fn new(source: Source) -> Self {
        let mut transformation = Self {
            width: source.width,
            height: source.height,
            source,
            operations: Vec::new(),
            format: None,
        };
        for op in transformation.source.orientation.operations() {
            transformation.apply(op);
        }
        transformation
    }

    /// Parse a transform path against a known source. A leading `/` is
    /// ignored, and an embedded `{key};` prefix overrides the source key. Errors carry the 0-based
    /// index of the failing transform segment; a bad format extension is
    /// reported one past the last transform.
    #[tracing::instrument(skip(path, source), fields(key = %source.key))]
    pub fn parse(path: &str, source: Source) -> MediaResult<Self> {
        let mut source = source;
        let mut rest = path.strip_prefix('/').unwrap_or(path);

        if let Some((key, tail)) = rest.split_once(';') {
            if !key.is_empty() && !key.contains('/') {
                source.key = key.to_owned();
                rest = tail;
            }
        }

        let (rest, ext) = split_extension(rest);

        let mut transformation = Self::new(source);
        let mut count = 0usize;
        if !rest.is_empty() {
            for (index, segment) in rest.split('/').enumerate() {
                let op = ops::parse_segment(segment).map_err(|e| e.at_index(index))?;
                transformation.apply(op);
                count = index + 1;
            }
        }

        if let Some(ext) = ext {
            let format = Format::parse(ext).map_err(|e| e.at_index(count))?;
            transformation.format = Some(format);
        }

        Ok(transformation)
    }

    /// Append an operation, updating the tracked size.
    pub fn apply(&mut self, op: Operation) -> &mut Self {
        let current = Size::new(self.width, self.height);
        match &op {
            Operation::Resize(resize) => {
                let size = resize.calculate_size(current);
                self.width = size.width;
                self.height = size.height;
            }
            Operation::Scale(scale) => {
                self.width = scale.width;
                self.height = scale.height;
            }
            Operation::Crop(crop) => {
                let size = crop.rectangle(current).size();
                self.width = size.width;
                self.height = size.height;
            }
            Operation::Rotate(rotate) if rotate.transposes() => {
                self.width = current.height;
                self.height = current.width;
            }
            Operation::Pad(pad) => {
                self.width += pad.padding.horizontal();
                self.height += pad.padding.vertical();
            }
            _ => {}
        }
        self.operations.push(op);
        self
    }

    // Builder conveniences for callers assembling a rendition in code.

    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> &mut Self {
        self.apply(Operation::Crop(Crop::pixels(x, y, width, height)))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.apply(Operation::Resize(Resize::exact(width, height)))
    }

    pub fn scale(&mut self, scale: Scale) -> &mut Self {
        self.apply(Operation::Scale(scale))
    }

    pub fn rotate(&mut self, rotate: Rotate) -> &mut Self {
        self.apply(Operation::Rotate(rotate))
    }

    pub fn flip(&mut self, flip: Flip) -> &mut Self {
        self.apply(Operation::Flip(flip))
    }

    pub fn encode(&mut self, format: Format) -> &mut Self {
        self.format = Some(format);
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Tracked output width after every applied operation.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tracked output height after every applied operation.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The operation list re-serialized as a transform path. This is the
    /// literal, un-normalized form; use the normalizer for canonical text.
    pub fn transform_path(&self) -> String {
        let mut out = String::new();
        for op in &self.operations {
            if !out.is_empty() {
                out.push('/');
            }
            let _ = write!(out, "{op}");
        }
        if let Some(format) = self.format {
            let _ = write!(out, ".{}", format.ext());
        }
        out
    }

    /// `{key};{transform_path}`.
    pub fn full_path(&self) -> String {
        format!("{};{}", self.source.key, self.transform_path())
    }

    /// The operation list re-serialized in the `|>` form, again without
    /// normalization: `blob#{key}|>op|>..|>NAME::encode`.
    pub fn trace(&self) -> String {
        let mut out = format!("blob#{}", self.source.key);
        for op in &self.operations {
            let _ = write!(out, "|>{op}");
        }
        if let Some(format) = self.format {
            let _ = write!(out, "|>{}", ops::Encode::new(format));
        }
        out
    }
}

/// Split a trailing `.ext` off the path. The dot must fall in the last
/// segment, after any closing parenthesis, with a purely alphanumeric
/// suffix, so float arguments never shadow it.
fn split_extension(path: &str) -> (&str, Option<&str>) {
    let last = path.rsplit('/').next().unwrap_or(path);
    if let Some(dot) = last.rfind('.') {
        let ext = &last[dot + 1..];
        let after_parens = last.rfind(')').is_none_or(|p| dot > p);
        if after_parens && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            let cut = path.len() - (last.len() - dot);
            return (&path[..cut], Some(ext));
        }
    }
    (path, None)
}

impl std::str::FromStr for MediaTransformation {
    type Err = ParseError;

    /// Parse a `{key};{path}` string with no out-of-band source metadata;
    /// the source dimensions are unknown (zero).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let key = text.split(';').next().unwrap_or_default();
        match Self::parse(text, Source::new(key, 0, 0)) {
            Ok(t) => Ok(t),
            Err(crate::foundation::error::MediaError::Parse(e)) => Err(e),
            Err(e) => Err(ParseError::new(0, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_size_left_to_right() {
        let mut t = MediaTransformation::new(Source::new("1", 2000, 2000));
        t.crop(97, 21, 480, 360).resize(960, 720).encode(Format::Jpeg);

        assert_eq!(t.size(), Size::new(960, 720));
        assert_eq!(t.transform_path(), "crop(97,21,480,360)/960x720.jpeg");
        assert_eq!(t.full_path(), "1;crop(97,21,480,360)/960x720.jpeg");
    }

    #[test]
    fn parse_matches_builder() {
        let t = MediaTransformation::parse(
            "1;crop(97,21,480,360)/960x720.jpeg",
            Source::new("x", 2000, 2000),
        )
        .unwrap();

        assert_eq!(t.source().key, "1");
        assert_eq!(t.size(), Size::new(960, 720));
        assert_eq!(t.format(), Some(Format::Jpeg));
        assert_eq!(t.operations().len(), 2);
    }

    #[test]
    fn a_leading_slash_is_ignored() {
        let t = MediaTransformation::parse("/900x700.webp", Source::new("1", 2000, 2000)).unwrap();
        assert_eq!(t.size(), Size::new(900, 700));
        assert_eq!(t.format(), Some(Format::WebP));
        assert_eq!(t.transform_path(), "900x700.webp");
    }

    #[test]
    fn trace_joins_the_unnormalized_operations() {
        let mut t = MediaTransformation::new(Source::new("1", 2000, 2000));
        t.crop(97, 21, 480, 360).resize(960, 720).encode(Format::Jpeg);
        assert_eq!(t.trace(), "blob#1|>crop(97,21,480,360)|>960x720|>JPEG::encode");
    }

    #[test]
    fn rotation_swaps_the_tracked_size() {
        let mut t = MediaTransformation::new(Source::new("1", 100, 50));
        t.rotate(Rotate::new(90).unwrap());
        assert_eq!(t.size(), Size::new(50, 100));
    }

    #[test]
    fn padding_grows_both_axes() {
        let t = MediaTransformation::parse(
            "100x100/pad(5,10).png",
            Source::new("1", 500, 500),
        )
        .unwrap();
        assert_eq!(t.size(), Size::new(120, 110));
    }

    #[test]
    fn orientation_steps_are_injected_first() {
        let source = Source::new("1", 1500, 1125).with_orientation(Orientation::Rotate90);
        let t = MediaTransformation::new(source);

        assert_eq!(t.size(), Size::new(1125, 1500));
        assert_eq!(t.operations().len(), 1);
        assert_eq!(t.operations()[0].to_string(), "rotate(90)");
    }

    #[test]
    fn segment_errors_carry_their_index() {
        let err = MediaTransformation::parse(
            "10888535;500x500-c/blur(2001).png",
            Source::new("x", 1000, 1000),
        )
        .unwrap_err();

        match err {
            crate::foundation::error::MediaError::Parse(e) => {
                assert_eq!(e.index, 1);
                assert_eq!(e.cause.as_ref().unwrap().field, "blur");
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn bad_extension_is_reported_past_the_last_segment() {
        let err =
            MediaTransformation::parse("100x100/blur(5).nope", Source::new("x", 500, 500))
                .unwrap_err();
        match err {
            crate::foundation::error::MediaError::Parse(e) => assert_eq!(e.index, 2),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn float_arguments_do_not_shadow_the_extension() {
        let t = MediaTransformation::parse("blur(1.5).png", Source::new("x", 500, 500)).unwrap();
        assert_eq!(t.format(), Some(Format::Png));
        assert_eq!(t.transform_path(), "blur(1.5).png");
    }
}
