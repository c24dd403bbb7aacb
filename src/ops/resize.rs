//! Resize: the `WxH[-anchor]` shorthand and the `resize(...)` call form.

use std::fmt;

use crate::foundation::error::{ParseError, RangeError};
use crate::foundation::geometry::{
    Anchor, AnchorX, AnchorY, MAX_DIMENSION, PaddedBox, Padding, Rect, Size,
};
use crate::syntax::call::CallSyntax;
use crate::syntax::unit::Unit;

/// How a resize reaches its target bounds.
///
/// The mode is a fixed tag chosen at parse time; it drives
/// [`Resize::calculate_size`], which the accumulator and the normalizer use
/// identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResizeMode {
    /// Stretch to exactly the target bounds.
    #[default]
    Exact,
    /// Fill the bounds' aspect ratio by cropping, keeping the anchored region.
    Crop,
    /// Shrink (or grow, with `upscale`) to fit within the bounds.
    Fit,
    /// Fit the content, then pad out to the bounds around the anchor.
    Pad,
}

impl ResizeMode {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "exact" => Some(Self::Exact),
            "crop" => Some(Self::Crop),
            "fit" => Some(Self::Fit),
            "pad" => Some(Self::Pad),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Crop => "crop",
            Self::Fit => "fit",
            Self::Pad => "pad",
        }
    }
}

/// A resize request. Width/height keep their units (`px`, `%`, `_` auto)
/// and are resolved against the box they apply to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resize {
    /// Target width.
    pub width: Unit,
    /// Target height.
    pub height: Unit,
    /// Bounds-reaching strategy.
    pub mode: ResizeMode,
    /// Region/placement anchor for `Crop`/`Pad` modes.
    pub anchor: Option<Anchor>,
    /// Allow growing past the source size in `Fit`/`Pad` modes.
    pub upscale: bool,
    /// Pad-mode fill color.
    pub background: Option<String>,
}

impl Resize {
    /// Exact resize to integer pixel bounds.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width: Unit::Scalar(f64::from(width)),
            height: Unit::Scalar(f64::from(height)),
            mode: ResizeMode::Exact,
            anchor: None,
            upscale: false,
            background: None,
        }
    }

    /// Anchored crop-mode resize (the `WxH-c` shorthand).
    pub fn cropped(width: u32, height: u32, anchor: Anchor) -> Self {
        Self {
            mode: ResizeMode::Crop,
            anchor: Some(anchor),
            ..Self::exact(width, height)
        }
    }

    /// Parse the bare `WxH[-anchor]` shorthand.
    pub fn parse_shorthand(segment: &str) -> Result<Self, ParseError> {
        let (dims, anchor) = match segment.split_once('-') {
            Some((dims, suffix)) => {
                let anchor = Anchor::parse_suffix(suffix).ok_or_else(|| {
                    ParseError::new(0, format!("invalid anchor suffix '-{suffix}'"))
                })?;
                (dims, Some(anchor))
            }
            None => (segment, None),
        };

        let (w, h) = dims
            .split_once('x')
            .ok_or_else(|| ParseError::new(0, format!("invalid size '{segment}'")))?;
        let width = parse_dimension("width", w)?;
        let height = parse_dimension("height", h)?;

        Ok(match anchor {
            Some(anchor) => Self::cropped(width, height, anchor),
            None => Self::exact(width, height),
        })
    }

    /// Parse the `resize(w,h[,mode][,upscale][,anchor:a][,background:color])`
    /// call form.
    pub fn from_call(call: &CallSyntax) -> Result<Self, ParseError> {
        let w = call
            .arg(0)
            .ok_or_else(|| ParseError::new(0, "resize requires a width"))?;
        let h = call
            .arg(1)
            .ok_or_else(|| ParseError::new(0, "resize requires a height"))?;

        let mut resize = Self {
            width: check_unit("width", Unit::parse(w)?)?,
            height: check_unit("height", Unit::parse(h)?)?,
            mode: ResizeMode::Exact,
            anchor: None,
            upscale: false,
            background: None,
        };

        for arg in call.args.iter().skip(2) {
            match arg.key.as_deref() {
                None => {
                    if arg.value == "upscale" {
                        resize.upscale = true;
                    } else if let Some(mode) = ResizeMode::parse(&arg.value) {
                        resize.mode = mode;
                    } else if let Some(anchor) = Anchor::parse_name(&arg.value) {
                        resize.anchor = Some(anchor);
                    } else {
                        return Err(ParseError::new(
                            0,
                            format!("unknown resize argument '{}'", arg.value),
                        ));
                    }
                }
                Some("anchor") => {
                    let anchor = Anchor::parse_name(&arg.value).ok_or_else(|| {
                        ParseError::new(0, format!("invalid anchor '{}'", arg.value))
                    })?;
                    resize.anchor = Some(anchor);
                }
                Some("mode") => {
                    resize.mode = ResizeMode::parse(&arg.value).ok_or_else(|| {
                        ParseError::new(0, format!("invalid resize mode '{}'", arg.value))
                    })?;
                }
                Some("upscale") => resize.upscale = arg.value == "true",
                Some("background") => resize.background = Some(arg.value.clone()),
                Some(key) => {
                    return Err(ParseError::new(
                        0,
                        format!("unknown resize argument '{key}'"),
                    ));
                }
            }
        }

        // An anchor with no explicit mode implies crop, as in the shorthand.
        if resize.anchor.is_some() && resize.mode == ResizeMode::Exact {
            resize.mode = ResizeMode::Crop;
        }

        Ok(resize)
    }

    /// Resolve the unit pair against the current box into pixel bounds.
    /// `_` derives from the other axis preserving aspect ratio; both `_`
    /// leaves the box unchanged.
    pub fn resolve_bounds(&self, current: Size) -> Size {
        let w = self.width.resolve(current.width);
        let h = self.height.resolve(current.height);
        match (w, h) {
            (Some(w), Some(h)) => Size::new(w, h),
            (Some(w), None) => Size::new(
                w,
                (f64::from(w) / current.aspect()).round() as u32,
            ),
            (None, Some(h)) => Size::new(
                (f64::from(h) * current.aspect()).round() as u32,
                h,
            ),
            (None, None) => current,
        }
    }

    /// The box size after this resize, per the mode's pure sizing function.
    pub fn calculate_size(&self, current: Size) -> Size {
        let bounds = self.resolve_bounds(current);
        match self.mode {
            ResizeMode::Exact | ResizeMode::Crop | ResizeMode::Pad => bounds,
            ResizeMode::Fit => fit(current, bounds, self.upscale),
        }
    }

    /// The anchor to use, defaulting to center.
    pub fn anchor_or_center(&self) -> Anchor {
        self.anchor.unwrap_or(Anchor::CENTER)
    }

    fn as_shorthand(&self) -> Option<(u32, u32, Option<Anchor>)> {
        let background_free = self.background.is_none() && !self.upscale;
        let implied_mode = match (self.mode, self.anchor) {
            (ResizeMode::Exact, None) => true,
            (ResizeMode::Crop, Some(_)) => true,
            _ => false,
        };
        if !(background_free && implied_mode) {
            return None;
        }
        match (self.width, self.height) {
            (Unit::Scalar(w), Unit::Scalar(h)) if w.fract() == 0.0 && h.fract() == 0.0 => {
                Some((w as u32, h as u32, self.anchor))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Resize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((w, h, anchor)) = self.as_shorthand() {
            write!(f, "{w}x{h}")?;
            if let Some(anchor) = anchor {
                write!(f, "-{}", anchor.suffix())?;
            }
            return Ok(());
        }

        write!(f, "resize({},{}", DisplayUnit(self.width), DisplayUnit(self.height))?;
        if self.mode != ResizeMode::Exact {
            write!(f, ",{}", self.mode.name())?;
        }
        if let Some(anchor) = self.anchor {
            write!(f, ",anchor:{}", anchor.suffix())?;
        }
        if self.upscale {
            write!(f, ",upscale")?;
        }
        if let Some(background) = &self.background {
            write!(f, ",background:{background}")?;
        }
        write!(f, ")")
    }
}

/// Canonical text for a unit value inside a resize call.
pub(crate) struct DisplayUnit(pub Unit);

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Unit::Auto => write!(f, "_"),
            Unit::Scalar(v) | Unit::Px(v) => write!(f, "{v}"),
            Unit::Percent(v) => write!(f, "{v}%"),
            Unit::Seconds(v) => write!(f, "{v}s"),
            Unit::Degrees(v) => write!(f, "{v}deg"),
        }
    }
}

/// Shrink (or grow, when `upscale`) `current` to fit within `bounds`
/// preserving aspect ratio.
pub fn fit(current: Size, bounds: Size, upscale: bool) -> Size {
    if current.is_empty() || bounds.is_empty() {
        return bounds;
    }
    if !upscale && current.width <= bounds.width && current.height <= bounds.height {
        return current;
    }
    let scale = (f64::from(bounds.width) / f64::from(current.width))
        .min(f64::from(bounds.height) / f64::from(current.height));
    Size::new(
        ((f64::from(current.width) * scale).round() as u32).max(1),
        ((f64::from(current.height) * scale).round() as u32).max(1),
    )
}

/// The largest rectangle of `target`'s aspect ratio inside `source`,
/// positioned by `anchor`.
pub fn crop_rectangle(source: Size, target: Size, anchor: Anchor) -> Rect {
    if source.is_empty() || target.is_empty() {
        return Rect::new(0, 0, source.width, source.height);
    }

    let aspect = target.aspect();
    let (width, height) = if source.aspect() > aspect {
        (
            ((f64::from(source.height) * aspect) as u32).min(source.width),
            source.height,
        )
    } else {
        (
            source.width,
            ((f64::from(source.width) / aspect) as u32).min(source.height),
        )
    };

    let x = match anchor.x {
        AnchorX::Left => 0,
        AnchorX::Center => (source.width - width) / 2,
        AnchorX::Right => source.width - width,
    };
    let y = match anchor.y {
        AnchorY::Top => 0,
        AnchorY::Center => (source.height - height) / 2,
        AnchorY::Bottom => source.height - height,
    };
    Rect::new(x, y, width, height)
}

/// Fit `current` into `bounds` and convert the leftover area to padding
/// distributed around the anchor.
pub fn pad_box(current: Size, bounds: Size, anchor: Anchor, upscale: bool) -> PaddedBox {
    let content = fit(current, bounds, upscale);
    let slack_w = bounds.width.saturating_sub(content.width);
    let slack_h = bounds.height.saturating_sub(content.height);

    let left = match anchor.x {
        AnchorX::Left => 0,
        AnchorX::Center => slack_w / 2,
        AnchorX::Right => slack_w,
    };
    let top = match anchor.y {
        AnchorY::Top => 0,
        AnchorY::Center => slack_h / 2,
        AnchorY::Bottom => slack_h,
    };

    PaddedBox {
        width: content.width,
        height: content.height,
        padding: Padding::new(top, slack_w - left, slack_h - top, left),
    }
}

fn parse_dimension(field: &'static str, text: &str) -> Result<u32, ParseError> {
    let value: u32 = text
        .parse()
        .map_err(|_| ParseError::new(0, format!("invalid {field} '{text}'")))?;
    RangeError::check(field, 0.0, f64::from(MAX_DIMENSION), f64::from(value))
        .map_err(|e| ParseError::from_range(0, e))?;
    Ok(value)
}

fn check_unit(field: &'static str, unit: Unit) -> Result<Unit, ParseError> {
    if let Unit::Scalar(v) | Unit::Px(v) = unit {
        RangeError::check(field, 0.0, f64::from(MAX_DIMENSION), v)
            .map_err(|e| ParseError::from_range(0, e))?;
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_round_trips() {
        for text in ["960x720", "100x50-c", "150x50-l", "92x120", "500x100-tr"] {
            let resize = Resize::parse_shorthand(text).unwrap();
            assert_eq!(resize.to_string(), text, "shorthand {text}");
        }
    }

    #[test]
    fn shorthand_anchor_implies_crop_mode() {
        let plain = Resize::parse_shorthand("100x50").unwrap();
        assert_eq!(plain.mode, ResizeMode::Exact);

        let anchored = Resize::parse_shorthand("100x50-c").unwrap();
        assert_eq!(anchored.mode, ResizeMode::Crop);
        assert_eq!(anchored.anchor, Some(Anchor::CENTER));
    }

    #[test]
    fn call_form_parses_mode_and_flags() {
        let call = CallSyntax::parse("resize(300,200,pad)").unwrap();
        let resize = Resize::from_call(&call).unwrap();
        assert_eq!(resize.mode, ResizeMode::Pad);
        assert_eq!(resize.to_string(), "resize(300,200,pad)");

        let call = CallSyntax::parse("resize(300,200,fit,upscale)").unwrap();
        let resize = Resize::from_call(&call).unwrap();
        assert!(resize.upscale);
        assert_eq!(resize.to_string(), "resize(300,200,fit,upscale)");
    }

    #[test]
    fn percent_and_auto_units_resolve() {
        let call = CallSyntax::parse("resize(300%,200%)").unwrap();
        let resize = Resize::from_call(&call).unwrap();
        assert_eq!(resize.resolve_bounds(Size::new(85, 20)), Size::new(255, 40));

        let call = CallSyntax::parse("resize(_,40)").unwrap();
        let resize = Resize::from_call(&call).unwrap();
        assert_eq!(resize.resolve_bounds(Size::new(85, 20)), Size::new(170, 40));

        let call = CallSyntax::parse("resize(170px,_)").unwrap();
        let resize = Resize::from_call(&call).unwrap();
        assert_eq!(resize.resolve_bounds(Size::new(85, 20)), Size::new(170, 40));
    }

    #[test]
    fn oversize_dimensions_are_range_errors() {
        let err = Resize::parse_shorthand("20000x100").unwrap_err();
        assert!(err.cause.is_some());

        let call = CallSyntax::parse("resize(20000,100)").unwrap();
        assert!(Resize::from_call(&call).unwrap_err().cause.is_some());
    }

    #[test]
    fn fit_respects_upscale() {
        // Smaller than bounds: untouched without upscale.
        assert_eq!(fit(Size::new(50, 25), Size::new(100, 100), false), Size::new(50, 25));
        assert_eq!(fit(Size::new(50, 25), Size::new(100, 100), true), Size::new(100, 50));
        // Larger shrinks either way.
        assert_eq!(fit(Size::new(200, 100), Size::new(100, 100), false), Size::new(100, 50));
    }

    #[test]
    fn crop_rectangle_honors_anchor() {
        let source = Size::new(200, 100);
        let target = Size::new(100, 100);

        assert_eq!(
            crop_rectangle(source, target, Anchor::CENTER),
            Rect::new(50, 0, 100, 100)
        );
        assert_eq!(
            crop_rectangle(source, target, Anchor::parse_suffix("l").unwrap()),
            Rect::new(0, 0, 100, 100)
        );
        assert_eq!(
            crop_rectangle(source, target, Anchor::parse_suffix("r").unwrap()),
            Rect::new(100, 0, 100, 100)
        );
    }

    #[test]
    fn pad_box_distributes_slack() {
        let padded = pad_box(Size::new(50, 100), Size::new(100, 100), Anchor::CENTER, false);
        assert_eq!(padded.size(), Size::new(50, 100));
        assert_eq!(padded.padding, Padding::new(0, 25, 0, 25));
        assert_eq!(padded.outer_width(), 100);
    }
}
