//! Rendition locators: a source key plus a transform path and its known
//! output dimensions, with proportional re-scaling and URL assembly.
//!
//! Scaling rewrites the path textually instead of re-normalizing, so an
//! already-computed rendition can be resized with nothing but the locator
//! in hand.

use std::fmt;
use std::sync::Arc;

use xxhash_rust::xxh3::xxh3_64;

use crate::format::Format;
use crate::normalize::Pipeline;

/// Signs a rendition path into an opaque URL prefix token.
pub trait UrlSigner: Send + Sync {
    fn sign(&self, path: &str) -> String;
}

/// Content-hash signer over xxh3.
#[derive(Clone, Copy, Debug, Default)]
pub struct XxhSigner;

impl UrlSigner for XxhSigner {
    fn sign(&self, path: &str) -> String {
        format!("{:x}", xxh3_64(path.as_bytes()))
    }
}

/// An addressable rendition of a source.
#[derive(Clone)]
pub struct MediaRendition {
    host: Option<String>,
    source_key: String,
    transform_path: Option<String>,
    pub width: u32,
    pub height: u32,
    signer: Option<Arc<dyn UrlSigner>>,
}

impl MediaRendition {
    pub fn new(source_key: impl Into<String>, transform_path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            host: None,
            source_key: source_key.into(),
            transform_path: Some(transform_path.into()),
            width,
            height,
            signer: None,
        }
    }

    /// Locator for a normalized pipeline's canonical path.
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        let size = pipeline.final_size();
        Self::new(
            pipeline.source.key.clone(),
            pipeline.to_path(),
            size.width,
            size.height,
        )
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn UrlSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn transform_path(&self) -> Option<&str> {
        self.transform_path.as_deref()
    }

    /// A new locator scaled by `factor`, which must be a positive real:
    /// output dimensions and every size-bearing path segment (`WxH`,
    /// `scale`, `crop`) are multiplied and truncated; all other segments
    /// pass through untouched.
    pub fn scale(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        scaled.width = mul(self.width, factor);
        scaled.height = mul(self.height, factor);
        scaled.transform_path = self
            .transform_path
            .as_deref()
            .map(|path| scale_path(path, factor));
        scaled
    }

    /// A new locator with only the trailing format extension replaced.
    pub fn with_format(&self, format: Format) -> Self {
        let mut changed = self.clone();
        changed.transform_path = self.transform_path.as_deref().map(|path| {
            // Same guard as scale_path: a dot inside a call argument is
            // not an extension.
            match path.rfind('.') {
                Some(dot) if path[dot..].rfind(')').is_none() => {
                    format!("{}.{}", &path[..dot], format.ext())
                }
                _ => format!("{path}.{}", format.ext()),
            }
        });
        changed
    }

    /// `scheme://host/[signature/]key[/transform]`; host-less locators
    /// yield a rooted path instead of an absolute URL.
    pub fn url(&self) -> String {
        let mut out = String::new();
        if let Some(host) = &self.host {
            out.push_str("https://");
            out.push_str(host);
        }
        if let Some(signer) = &self.signer {
            out.push('/');
            out.push_str(&signer.sign(&self.path()));
        }
        out.push_str(&self.path());
        out
    }

    /// `/key[/transform]`.
    pub fn path(&self) -> String {
        match &self.transform_path {
            Some(transform) => format!("/{}/{transform}", self.source_key),
            None => format!("/{}", self.source_key),
        }
    }
}

impl fmt::Debug for MediaRendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaRendition")
            .field("host", &self.host)
            .field("source_key", &self.source_key)
            .field("transform_path", &self.transform_path)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("signed", &self.signer.is_some())
            .finish()
    }
}

/// Truncating multiply. `factor` must be a positive real; anything else
/// saturates to 0 through the `as` cast.
fn mul(value: u32, factor: f64) -> u32 {
    debug_assert!(factor.is_finite() && factor > 0.0, "scale factor must be a positive real");
    (f64::from(value) * factor) as u32
}

/// Rewrite the size-bearing segments of `path` by `factor`.
fn scale_path(path: &str, factor: f64) -> String {
    let (body, ext) = match path.rfind('.') {
        Some(dot) if path[dot..].rfind(')').is_none() => (&path[..dot], &path[dot..]),
        _ => (path, ""),
    };

    let segments: Vec<String> = body
        .split('/')
        .map(|segment| scale_segment(segment, factor))
        .collect();
    format!("{}{ext}", segments.join("/"))
}

fn scale_segment(segment: &str, factor: f64) -> String {
    if let Some((w, h, suffix)) = parse_shorthand(segment) {
        return format!("{}x{}{suffix}", mul(w, factor), mul(h, factor));
    }
    if let Some(args) = call_args(segment, "crop") {
        if let [x, y, w, h] = args[..] {
            return format!(
                "crop({},{},{},{})",
                mul(x, factor),
                mul(y, factor),
                mul(w, factor),
                mul(h, factor)
            );
        }
    }
    if let Some(rest) = segment.strip_prefix("scale(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = rest.split(',').collect();
        if let (Some(Ok(w)), Some(Ok(h))) = (
            parts.first().map(|p| p.parse::<u32>()),
            parts.get(1).map(|p| p.parse::<u32>()),
        ) {
            let mode = parts
                .get(2)
                .map(|m| format!(",{m}"))
                .unwrap_or_default();
            return format!("scale({},{}{mode})", mul(w, factor), mul(h, factor));
        }
    }
    segment.to_owned()
}

/// `WxH` with an optional `-anchor` suffix, integer axes only.
fn parse_shorthand(segment: &str) -> Option<(u32, u32, &str)> {
    let (dims, suffix) = match segment.find('-') {
        Some(dash) => (&segment[..dash], &segment[dash..]),
        None => (segment, ""),
    };
    let (w, h) = dims.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?, suffix))
}

/// Integer argument list of `name(a,b,...)`, or `None` on any mismatch.
fn call_args(segment: &str, name: &str) -> Option<Vec<u32>> {
    let rest = segment.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')?;
    rest.split(',').map(|a| a.trim().parse().ok()).collect()
}
