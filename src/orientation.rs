//! EXIF orientation tags and the upright-correction steps they imply.
//!
//! A source stored with a non-default orientation must be corrected before
//! any user-requested geometry applies, so the normalizer prefixes the
//! pipeline with these steps.

use crate::foundation::geometry::Size;
use crate::ops::{Flip, Operation, Rotate};

/// EXIF orientation tag values 1 through 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright.
    #[default]
    Normal = 1,
    /// Mirrored across the vertical axis.
    FlipHorizontal = 2,
    /// Upside down.
    Rotate180 = 3,
    /// Mirrored across the horizontal axis.
    FlipVertical = 4,
    /// Mirrored, then rotated 270 CW.
    Transpose = 5,
    /// Rotated 90 CW.
    Rotate90 = 6,
    /// Mirrored, then rotated 90 CW.
    Transverse = 7,
    /// Rotated 270 CW.
    Rotate270 = 8,
}

impl Orientation {
    /// Map an EXIF tag value; unknown values read as `Normal`.
    pub fn from_exif(value: u8) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// The flip/rotate steps that bring the stored pixels upright.
    pub fn operations(self) -> Vec<Operation> {
        // Angles invert here: a source tagged "rotated 90 CW" needs a 90 CW
        // turn of the stored pixels to display upright, because EXIF records
        // the camera's rotation, not the correction.
        match self {
            Self::Normal => vec![],
            Self::FlipHorizontal => vec![Operation::Flip(Flip::HORIZONTAL)],
            Self::Rotate180 => vec![rotate(180)],
            Self::FlipVertical => vec![Operation::Flip(Flip::VERTICAL)],
            Self::Transpose => vec![Operation::Flip(Flip::HORIZONTAL), rotate(270)],
            Self::Rotate90 => vec![rotate(90)],
            Self::Transverse => vec![Operation::Flip(Flip::HORIZONTAL), rotate(90)],
            Self::Rotate270 => vec![rotate(270)],
        }
    }

    /// `true` when the stored width/height are swapped relative to display.
    pub fn transposes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// The upright size of a source stored at `stored`.
    pub fn oriented_size(self, stored: Size) -> Size {
        if self.transposes() {
            stored.transposed()
        } else {
            stored
        }
    }
}

fn rotate(angle: u32) -> Operation {
    // Quarter turns only, checked at the call sites above.
    Operation::Rotate(Rotate::new(angle).unwrap_or(Rotate { angle: 0 }))
}
