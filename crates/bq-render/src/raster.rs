//! SVG → PNG rasterization.
//!
//! Flattens the assembled scene at the canonical composition resolution
//! with resvg/tiny-skia. Always renders at 600×680 regardless of any
//! interactive viewport state.

use crate::images::ImageSource;
use crate::scene::build_scene_svg;
use bq_core::model::{Arrangement, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Canonical export resolution in pixels.
pub const RENDER_WIDTH: u32 = CANVAS_WIDTH as u32;
pub const RENDER_HEIGHT: u32 = CANVAS_HEIGHT as u32;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to parse scene SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

/// A finished raster export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Render one arrangement to a PNG at the canonical resolution.
///
/// Image lookups go through `images`; any item whose image cannot be
/// resolved is drawn as a colored disc instead, so this only fails on
/// rasterizer errors, not on missing assets.
pub fn render_composition(
    arrangement: &Arrangement,
    label: &str,
    images: &dyn ImageSource,
) -> Result<RenderedImage, RenderError> {
    let svg = build_scene_svg(arrangement, label, images);
    let png = rasterize(&svg)?;
    log::debug!(
        "rendered arrangement: {} items, {} byte png",
        arrangement.len(),
        png.len()
    );
    Ok(RenderedImage {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        png,
    })
}

fn rasterize(svg: &str) -> Result<Vec<u8>, RenderError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RenderError::SvgParse)?;

    let mut pixmap =
        tiny_skia::Pixmap::new(RENDER_WIDTH, RENDER_HEIGHT).ok_or(RenderError::PixmapAlloc)?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|_| RenderError::PngEncode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::NoImages;

    #[test]
    fn empty_arrangement_renders_at_canonical_size() {
        let image = render_composition(&Arrangement::default(), "Empty", &NoImages).unwrap();
        assert_eq!(image.width, 600);
        assert_eq!(image.height, 680);
        assert!(image.png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
