//! Raster compositing and export pipeline for bouquet arrangements.
//!
//! Scene assembly ([`scene`]) turns an arrangement into an SVG document,
//! rasterization ([`raster`]) flattens it to PNG at the canonical
//! resolution, and [`export`] gates concurrent export requests and fans
//! the finished image out to delivery sinks.

pub mod export;
pub mod images;
pub mod raster;
pub mod scene;

pub use export::{ExportError, ExportRequest, ExportScheduler, ExportSink, run_export};
pub use images::{ImageData, ImageFetchError, ImageSource, MemoryImageSource, NoImages};
pub use raster::{RENDER_HEIGHT, RENDER_WIDTH, RenderError, RenderedImage, render_composition};
pub use scene::build_scene_svg;
