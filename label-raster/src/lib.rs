//! # label-raster
//!
//! Headless label rendering for thermal label printers.
//!
//! ## Scope
//!
//! This crate handles HOW a label becomes a printer-ready bitmap:
//! - Layout model (QR block, Code 128 strips, text panels, mm sizes)
//! - Oversampled grayscale rendering (QR, Code 128, glyph text)
//! - DPI-exact raster export (nearest-neighbor downscale, threshold,
//!   base64 PNG)
//!
//! Business logic (WHAT goes on a label) stays in application code —
//! the mapper in `print-flow` builds the layouts.
//!
//! ## Example
//!
//! ```ignore
//! use label_raster::{LabelLayout, LabelRenderer, RenderOptions, export_layout};
//!
//! let layout = LabelLayout::new()
//!     .qr_block("S1IPM1002PA01-001", 25.0, 25.0)
//!     .barcode_strip("S1IPM1002PA01-001", 48.0, 6.0);
//!
//! let renderer = LabelRenderer::new(RenderOptions::default());
//! let rasters = export_layout(&renderer, &layout)?;
//! for r in &rasters {
//!     println!("{}x{} png, {} b64 chars", r.width_px, r.height_px, r.base64_png.len());
//! }
//! ```

mod error;
mod export;
mod layout;
mod render;
mod symbols;

// Re-exports
pub use error::{RasterError, RasterResult};
pub use export::{EncodedRaster, export_layout, export_segment};
pub use layout::{LabelLayout, LabelSegment, SegmentContent, mm_to_px};
pub use render::{FontData, LabelRenderer, RenderOptions};
