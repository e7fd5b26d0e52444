//! Flower image resolution.
//!
//! The renderer never does I/O itself; an [`ImageSource`] hands it encoded
//! image bytes per `image_ref`. Every fetch is independent: one failing
//! image degrades that item to a colored disc and never fails the render.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::collections::HashMap;

/// Encoded image payload (PNG or JPEG bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("no image for ref '{0}'")]
    NotFound(String),
    #[error("unsupported image payload for ref '{0}'")]
    Unsupported(String),
}

/// Resolves an `image_ref` into encoded image bytes.
pub trait ImageSource {
    fn fetch(&self, image_ref: &str) -> Result<ImageData, ImageFetchError>;
}

/// A source with no images at all; every item falls back to its cached
/// color. Useful for tests and headless exports.
#[derive(Debug, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn fetch(&self, image_ref: &str) -> Result<ImageData, ImageFetchError> {
        Err(ImageFetchError::NotFound(image_ref.to_string()))
    }
}

/// In-memory source backed by a ref → bytes map.
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image_ref: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(image_ref.into(), bytes);
    }
}

impl ImageSource for MemoryImageSource {
    fn fetch(&self, image_ref: &str) -> Result<ImageData, ImageFetchError> {
        self.images
            .get(image_ref)
            .map(|bytes| ImageData {
                bytes: bytes.clone(),
            })
            .ok_or_else(|| ImageFetchError::NotFound(image_ref.to_string()))
    }
}

/// Encode image bytes as an SVG-embeddable data URI. Returns `None` for
/// payloads that are neither PNG nor JPEG — the caller treats that like a
/// fetch failure.
pub fn data_uri(data: &ImageData) -> Option<String> {
    let mime = sniff_mime(&data.bytes)?;
    Some(format!("data:{mime};base64,{}", BASE64.encode(&data.bytes)))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else {
        None
    }
}
