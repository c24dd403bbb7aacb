//! Pixel-space value types shared by the operation model and the normalizer.

use std::fmt;

/// Largest width or height any operation may name, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either axis is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width-for-height swap, as applied by 90/270 degree rotations.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Aspect ratio `width / height`.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Build a rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle's size, ignoring position.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Multiply every component by `(x_scale, y_scale)`, truncating to pixels.
    pub fn scaled(self, x_scale: f64, y_scale: f64) -> Self {
        Self {
            x: (f64::from(self.x) * x_scale) as u32,
            y: (f64::from(self.y) * y_scale) as u32,
            width: (f64::from(self.width) * x_scale) as u32,
            height: (f64::from(self.height) * y_scale) as u32,
        }
    }

    /// Swap x/y and width/height, as applied by 90/270 degree rotations.
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }
}

/// Per-side padding in pixels. Accumulates additively, never resets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct Padding {
    /// Top inset.
    pub top: u32,
    /// Right inset.
    pub right: u32,
    /// Bottom inset.
    pub bottom: u32,
    /// Left inset.
    pub left: u32,
}

impl Padding {
    /// No padding on any side.
    pub const ZERO: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    /// The same inset on every side.
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical/horizontal inset pair.
    pub fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Build per-side padding.
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Return `true` when every side is zero.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Side-wise sum.
    pub fn plus(self, other: Self) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }

    /// Total horizontal inset (left + right).
    pub fn horizontal(self) -> u32 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    pub fn vertical(self) -> u32 {
        self.top + self.bottom
    }
}

impl fmt::Display for Padding {
    // Shortest equivalent form: n | v,h | t,r,b,l
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top == self.right && self.top == self.bottom && self.top == self.left {
            write!(f, "{}", self.top)
        } else if self.top == self.bottom && self.left == self.right {
            write!(f, "{},{}", self.top, self.right)
        } else {
            write!(
                f,
                "{},{},{},{}",
                self.top, self.right, self.bottom, self.left
            )
        }
    }
}

/// Working content-box state threaded through a normalization pass.
///
/// `width`/`height` track the content area; padding grows around it and is
/// excluded from crop/scale composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddedBox {
    /// Content width in pixels.
    pub width: u32,
    /// Content height in pixels.
    pub height: u32,
    /// Accumulated padding around the content.
    pub padding: Padding,
}

impl PaddedBox {
    /// Start a pass from the source's dimensions with no padding.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            padding: Padding::ZERO,
        }
    }

    /// Content size, ignoring padding.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Replace the content size.
    pub fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            padding: self.padding,
        }
    }

    /// Content width plus horizontal padding.
    pub fn outer_width(self) -> u32 {
        self.width + self.padding.horizontal()
    }

    /// Content height plus vertical padding.
    pub fn outer_height(self) -> u32 {
        self.height + self.padding.vertical()
    }
}

/// Horizontal alignment half of an [`Anchor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnchorX {
    /// Keep the left edge.
    Left,
    /// Keep the middle.
    #[default]
    Center,
    /// Keep the right edge.
    Right,
}

/// Vertical alignment half of an [`Anchor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnchorY {
    /// Keep the top edge.
    Top,
    /// Keep the middle.
    #[default]
    Center,
    /// Keep the bottom edge.
    Bottom,
}

/// Alignment reference used when a resize must choose which part of the
/// source to keep (crop mode) or where to place content (pad mode).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct Anchor {
    /// Horizontal alignment.
    pub x: AnchorX,
    /// Vertical alignment.
    pub y: AnchorY,
}

impl Anchor {
    /// Center on both axes.
    pub const CENTER: Self = Self {
        x: AnchorX::Center,
        y: AnchorY::Center,
    };

    /// Parse a suffix such as `c`, `l`, `tr`, accepting one letter per axis.
    pub fn parse_suffix(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let mut anchor = Self::CENTER;
        for c in text.chars() {
            match c {
                'c' => {}
                'l' => anchor.x = AnchorX::Left,
                'r' => anchor.x = AnchorX::Right,
                't' => anchor.y = AnchorY::Top,
                'b' => anchor.y = AnchorY::Bottom,
                _ => return None,
            }
        }
        Some(anchor)
    }

    /// Parse a spelled-out name (`center`, `left`, `top`, ...).
    pub fn parse_name(text: &str) -> Option<Self> {
        match text {
            "center" => Some(Self::CENTER),
            "left" => Some(Self {
                x: AnchorX::Left,
                y: AnchorY::Center,
            }),
            "right" => Some(Self {
                x: AnchorX::Right,
                y: AnchorY::Center,
            }),
            "top" => Some(Self {
                x: AnchorX::Center,
                y: AnchorY::Top,
            }),
            "bottom" => Some(Self {
                x: AnchorX::Center,
                y: AnchorY::Bottom,
            }),
            _ => Self::parse_suffix(text),
        }
    }

    /// The canonical suffix: vertical letter first, then horizontal; plain
    /// center collapses to `c`.
    pub fn suffix(self) -> String {
        let mut s = String::new();
        match self.y {
            AnchorY::Top => s.push('t'),
            AnchorY::Bottom => s.push('b'),
            AnchorY::Center => {}
        }
        match self.x {
            AnchorX::Left => s.push('l'),
            AnchorX::Right => s.push('r'),
            AnchorX::Center => {}
        }
        if s.is_empty() {
            s.push('c');
        }
        s
    }

    /// `true` for the plain center anchor.
    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }
}
