//! Pipeline normalization: collapse an arbitrary operation chain into at
//! most one source-space crop followed by at most one output-space scale.
//!
//! The pass walks the operation list once, threading a [`PaddedBox`] for
//! the evolving output size and a pending crop rectangle. A crop absorbs
//! all prior resize/scale history by remapping its rectangle back into the
//! source pixel grid; a rotate transposes the box, the pending crop, and
//! the reference grid together so later crops keep composing correctly.
//! The result is something a codec backend can execute with a single
//! decode region and a single resample.

use crate::foundation::error::{MediaError, MediaResult, ParseError};
use crate::foundation::geometry::{PaddedBox, Padding, Rect, Size};
use crate::format::Format;
use crate::normalize::writer::SegmentWriter;
use crate::ops::{
    self, Background, Encode, Expires, Extract, Filter, Flip, Interpolation, Metadata, Operation,
    ResizeMode, Scale, resize,
};
use crate::transform::{MediaTransformation, Source};

/// The canonical, executable description of one rendition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pipeline {
    pub source: Source,
    pub extract: Option<Extract>,
    pub background: Option<Background>,
    pub flip: Option<Flip>,
    /// Clockwise degrees, one of 0/90/180/270.
    pub rotate: u16,
    /// Decode region in source pixel space.
    pub crop: Option<Rect>,
    /// Output-space resample; omitted when the crop already yields the
    /// final size.
    pub scale: Option<Scale>,
    pub padding: Padding,
    /// Dimension-preserving filters, original relative order.
    pub filters: Vec<Filter>,
    /// Emit rendition metadata instead of pixels.
    pub metadata: Option<Metadata>,
    pub encode: Encode,
    pub expires: Option<Expires>,
    pub debug: bool,
}

impl Pipeline {
    /// Normalize an accumulated transformation.
    pub fn from_transformation(transformation: &MediaTransformation) -> MediaResult<Self> {
        Self::build(
            transformation.source().clone(),
            transformation.operations(),
            transformation.format(),
        )
    }

    /// Normalize an operation list against a source. `format` supplies the
    /// encode target when the list carries no explicit encode step.
    #[tracing::instrument(skip_all, fields(key = %source.key))]
    pub fn build(
        source: Source,
        operations: &[Operation],
        format: Option<Format>,
    ) -> MediaResult<Self> {
        let mut extract = None;
        let mut background = None;
        let mut flip = None;
        let mut rotate = 0u16;
        let mut expires = None;
        let mut metadata = None;
        let mut debug = false;
        let mut filters = Vec::new();
        let mut encode = format.map(Encode::new);

        let mut interpolation = Interpolation::Lanczos3;
        let mut quality = None;
        let mut lossless = false;

        // The reference pixel grid crops remap into. Starts at the source
        // size and transposes with every quarter-turn so the grid always
        // matches the orientation the crop will be executed in.
        let mut grid = source.size();
        let mut box_ = PaddedBox::new(grid);
        let mut pending_crop: Option<Rect> = None;

        for op in operations {
            match op {
                Operation::Extract(e) => extract = Some(*e),
                Operation::Background(b) => background = Some(b.clone()),
                // Last flip wins; two flips on one axis do not cancel.
                Operation::Flip(f) => flip = Some(*f),
                Operation::Crop(crop) => {
                    let rect = crop.rectangle(box_.size());
                    let remapped = remap_to_grid(rect, grid, box_.size());
                    box_ = box_.with_size(rect.size());
                    pending_crop = Some(remapped);
                }
                Operation::Resize(r) => {
                    let bounds = r.resolve_bounds(box_.size());
                    match r.mode {
                        ResizeMode::Exact => {
                            box_ = box_.with_size(bounds);
                        }
                        ResizeMode::Crop => {
                            let rect =
                                resize::crop_rectangle(box_.size(), bounds, r.anchor_or_center());
                            pending_crop = Some(remap_to_grid(rect, grid, box_.size()));
                            box_ = box_.with_size(bounds);
                        }
                        ResizeMode::Fit => {
                            box_ = box_.with_size(resize::fit(box_.size(), bounds, r.upscale));
                        }
                        ResizeMode::Pad => {
                            let padded = resize::pad_box(
                                box_.size(),
                                bounds,
                                r.anchor_or_center(),
                                r.upscale,
                            );
                            box_ = PaddedBox {
                                width: padded.width,
                                height: padded.height,
                                padding: box_.padding.plus(padded.padding),
                            };
                            if background.is_none() {
                                background = r.background.clone().map(Background::new);
                            }
                        }
                    }
                }
                Operation::Scale(s) => {
                    box_ = box_.with_size(s.size());
                    if s.mode != Interpolation::None {
                        interpolation = s.mode;
                    }
                }
                Operation::Rotate(r) => {
                    if r.transposes() {
                        box_ = box_.with_size(box_.size().transposed());
                        pending_crop = pending_crop.map(Rect::transposed);
                        grid = grid.transposed();
                    }
                    rotate = r.angle;
                }
                Operation::Pad(p) => {
                    box_ = PaddedBox {
                        padding: box_.padding.plus(p.padding),
                        ..box_
                    };
                }
                Operation::Quality(q) => quality = Some(q.0),
                Operation::Lossless => {
                    lossless = true;
                    quality = Some(100);
                }
                Operation::Expires(e) => expires = Some(*e),
                Operation::Metadata(m) => metadata = Some(m.clone()),
                Operation::Debug => debug = true,
                Operation::Encode(e) => encode = Some(*e),
                Operation::Filter(f) => filters.push(f.clone()),
            }
        }

        let Some(mut encode) = encode else {
            return Err(MediaError::validation("missing encode target"));
        };
        if let Some(q) = quality {
            encode.quality = Some(q);
        }
        if lossless {
            encode.lossless = true;
        }

        // Scale is omitted when the crop already produced the final box, or
        // when nothing changed the box at all (a bare rotate/flip path).
        let scale = match pending_crop {
            Some(rect) if rect.size() == box_.size() => None,
            None if box_.size() == grid => None,
            _ if box_.outer_width() == 0 || box_.outer_height() == 0 => None,
            _ => Some(Scale {
                width: box_.width,
                height: box_.height,
                mode: interpolation,
            }),
        };

        Ok(Self {
            source,
            extract,
            background,
            flip,
            rotate,
            crop: pending_crop,
            scale,
            padding: box_.padding,
            filters,
            metadata,
            encode,
            expires,
            debug,
        })
    }

    /// Parse the `|>`-delimited trace form. The source carries zero
    /// dimensions; traces are position-exact and need no re-normalization.
    #[tracing::instrument(skip(text))]
    pub fn parse(text: &str) -> MediaResult<Self> {
        let mut source = Source::new("", 0, 0);
        let mut operations = Vec::new();
        let mut index = 0usize;

        for segment in text.split("|>") {
            if let Some(key) = segment.strip_prefix("blob#") {
                source.key = key.to_owned();
                continue;
            }
            let op = ops::parse_segment(segment).map_err(|e| e.at_index(index))?;
            if matches!(op, Operation::Resize(_)) {
                return Err(
                    ParseError::new(index, format!("unexpected segment '{segment}'")).into(),
                );
            }
            operations.push(op);
            index += 1;
        }

        Self::build(source, &operations, None)
    }

    /// Output size after crop/scale and padding.
    pub fn final_size(&self) -> Size {
        let content = match (&self.scale, &self.crop) {
            (Some(scale), _) => scale.size(),
            (None, Some(crop)) => crop.size(),
            (None, None) if self.rotate == 90 || self.rotate == 270 => {
                self.source.size().transposed()
            }
            (None, None) => self.source.size(),
        };
        Size::new(
            content.width + self.padding.horizontal(),
            content.height + self.padding.vertical(),
        )
    }

    /// Post-normalization structural checks, returned rather than thrown.
    pub fn validate(&self) -> MediaResult<()> {
        if self.encode.format.requires_even_dimensions() {
            let size = self.final_size();
            if size.width % 2 != 0 {
                return Err(MediaError::validation(format!(
                    "the {} format requires a width divisible by 2, was {}",
                    self.encode.format, size.width
                )));
            }
            if size.height % 2 != 0 {
                return Err(MediaError::validation(format!(
                    "the {} format requires a height divisible by 2, was {}",
                    self.encode.format, size.height
                )));
            }
        }
        Ok(())
    }

    /// The public `/`-delimited path form, terminated by `.{ext}`.
    pub fn to_path(&self) -> String {
        let mut w = SegmentWriter::path();
        self.write_fields(&mut w, false);
        w.finish_with_extension(self.encode.format.ext())
    }

    /// The `|>`-delimited trace form, headed by `blob#{key}` and closed by
    /// an explicit encode step.
    pub fn to_trace(&self) -> String {
        let mut w = SegmentWriter::trace(&self.source.key);
        self.write_fields(&mut w, true);
        w.push(self.encode);
        if self.debug {
            w.push("debug");
        }
        w.finish()
    }

    /// Shared field emission; the two grammars differ only in how scale,
    /// quality, and the encode terminator are spelled.
    fn write_fields(&self, w: &mut SegmentWriter, trace: bool) {
        if let Some(expires) = self.expires {
            w.push(expires);
        }
        if let Some(metadata) = &self.metadata {
            // Metadata output short-circuits the visual fields.
            w.push(metadata);
            return;
        }
        if let Some(extract) = self.extract {
            w.push(extract);
        }
        if let Some(background) = &self.background {
            w.push(background);
        }
        if let Some(flip) = self.flip {
            w.push(flip);
        }
        if self.rotate != 0 {
            w.push(format_args!("rotate({})", self.rotate));
        }
        if let Some(crop) = self.crop {
            w.push(format_args!(
                "crop({},{},{},{})",
                crop.x, crop.y, crop.width, crop.height
            ));
        }
        if let Some(scale) = self.scale {
            if trace {
                w.push(scale);
            } else {
                w.push(format_args!("{}x{}", scale.width, scale.height));
            }
        }
        if !self.padding.is_zero() {
            w.push(format_args!("pad({})", self.padding));
        }
        for filter in &self.filters {
            w.push(filter);
        }
        if !trace {
            if self.encode.lossless {
                w.push("lossless");
            } else if let Some(quality) = self.encode.quality {
                w.push(format_args!("quality({quality})"));
            }
        }
    }
}

/// Remap a rectangle resolved against the current box back into the
/// reference grid. Truncates, matching the public path fixtures.
fn remap_to_grid(rect: Rect, grid: Size, box_size: Size) -> Rect {
    if box_size.is_empty() || box_size == grid {
        return rect;
    }
    rect.scaled(
        f64::from(grid.width) / f64::from(box_size.width),
        f64::from(grid.height) / f64::from(box_size.height),
    )
}
