//! Output format identifiers and the codec-capability lookup.
//!
//! This crate never encodes anything; formats exist to validate `Encode`
//! targets, normalize extension aliases, and answer capability questions
//! (kind, MIME type, dimension constraints) for the serving layer. The
//! tables are process-wide constants.

use std::fmt;

use crate::foundation::error::ParseError;

/// A recognized output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Format {
    // images
    Avif,
    Bmp,
    Gif,
    Heif,
    Ico,
    Jpeg,
    Png,
    Svg,
    Tiff,
    WebP,
    // video
    M4v,
    Mov,
    Mp4,
    WebM,
    // audio
    Mp3,
    Wav,
    // applications
    Json,
    Pdf,
}

/// Broad media class of a [`Format`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FormatKind {
    /// Still (or animated) image formats.
    Image,
    /// Container/video formats.
    Video,
    /// Audio-only formats.
    Audio,
    /// Non-media application formats (metadata output, documents).
    Application,
}

impl Format {
    /// Parse an extension, applying documented alias normalizations
    /// (`jpg` → `jpeg`, `tif` → `tiff`, a leading `.` is stripped,
    /// case-insensitive). Errors carry segment index 0; the path parser
    /// re-homes them.
    pub fn parse(ext: &str) -> Result<Self, ParseError> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        let format = match ext.as_str() {
            "avif" => Self::Avif,
            "bmp" => Self::Bmp,
            "gif" => Self::Gif,
            "heif" | "heic" => Self::Heif,
            "ico" => Self::Ico,
            "jpeg" | "jpg" | "jpe" => Self::Jpeg,
            "png" => Self::Png,
            "svg" => Self::Svg,
            "tiff" | "tif" => Self::Tiff,
            "webp" => Self::WebP,
            "m4v" => Self::M4v,
            "mov" => Self::Mov,
            "mp4" => Self::Mp4,
            "webm" => Self::WebM,
            "mp3" => Self::Mp3,
            "wav" | "wave" => Self::Wav,
            "json" => Self::Json,
            "pdf" => Self::Pdf,
            _ => return Err(ParseError::new(0, format!("unknown format '{ext}'"))),
        };
        Ok(format)
    }

    /// The canonical extension (no leading dot).
    pub fn ext(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Heif => "heif",
            Self::Ico => "ico",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Tiff => "tiff",
            Self::WebP => "webp",
            Self::M4v => "m4v",
            Self::Mov => "mov",
            Self::Mp4 => "mp4",
            Self::WebM => "webm",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    /// Casing used by the pipeline-trace encode segment (`JPEG::encode`).
    pub fn trace_name(self) -> &'static str {
        match self {
            Self::Avif => "AVIF",
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
            Self::Heif => "HEIF",
            Self::Ico => "ICO",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Svg => "SVG",
            Self::Tiff => "TIFF",
            Self::WebP => "WebP",
            Self::M4v => "M4V",
            Self::Mov => "MOV",
            Self::Mp4 => "MP4",
            Self::WebM => "WebM",
            Self::Mp3 => "MP3",
            Self::Wav => "WAV",
            Self::Json => "JSON",
            Self::Pdf => "PDF",
        }
    }

    /// Broad media class.
    pub fn kind(self) -> FormatKind {
        match self {
            Self::Avif
            | Self::Bmp
            | Self::Gif
            | Self::Heif
            | Self::Ico
            | Self::Jpeg
            | Self::Png
            | Self::Svg
            | Self::Tiff
            | Self::WebP => FormatKind::Image,
            Self::M4v | Self::Mov | Self::Mp4 | Self::WebM => FormatKind::Video,
            Self::Mp3 | Self::Wav => FormatKind::Audio,
            Self::Json | Self::Pdf => FormatKind::Application,
        }
    }

    /// MIME type reported for the encoded output.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Avif => "image/avif",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Heif => "image/heif",
            Self::Ico => "image/x-icon",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Tiff => "image/tiff",
            Self::WebP => "image/webp",
            Self::M4v => "video/x-m4v",
            Self::Mov => "video/quicktime",
            Self::Mp4 => "video/mp4",
            Self::WebM => "video/webm",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Json => "application/json",
            Self::Pdf => "application/pdf",
        }
    }

    /// Whether the encoder requires the final width and height to be
    /// divisible by 2 (H.264-family video targets).
    pub fn requires_even_dimensions(self) -> bool {
        matches!(self, Self::M4v | Self::Mov | Self::Mp4 | Self::WebM)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_normalize() {
        assert_eq!(Format::parse("jpg").unwrap(), Format::Jpeg);
        assert_eq!(Format::parse("jpe").unwrap(), Format::Jpeg);
        assert_eq!(Format::parse("tif").unwrap(), Format::Tiff);
        assert_eq!(Format::parse(".PNG").unwrap(), Format::Png);
        assert_eq!(Format::parse("wave").unwrap(), Format::Wav);
    }

    #[test]
    fn unknown_extension_is_a_parse_error() {
        assert!(Format::parse("jpeg&").is_err());
        assert!(Format::parse("").is_err());
    }

    #[test]
    fn capability_lookup() {
        assert_eq!(Format::WebP.kind(), FormatKind::Image);
        assert_eq!(Format::Mp4.kind(), FormatKind::Video);
        assert_eq!(Format::Mp4.mime(), "video/mp4");
        assert!(Format::Mp4.requires_even_dimensions());
        assert!(!Format::Jpeg.requires_even_dimensions());
    }

    #[test]
    fn trace_names_match_known_casing() {
        assert_eq!(Format::Jpeg.trace_name(), "JPEG");
        assert_eq!(Format::WebP.trace_name(), "WebP");
    }
}
