//! Raster export
//!
//! Reduces an oversampled render to the printer's exact pixel box and
//! serializes it as base64 PNG. The downscale uses a nearest-neighbor
//! filter on purpose: smoothing filters introduce gray edge pixels that
//! thermal heads print as noise, while nearest keeps black/white module
//! edges intact. Binarization then clamps any remaining gray.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, GrayImage, imageops};
use tracing::instrument;

use crate::error::{RasterError, RasterResult};
use crate::layout::{LabelLayout, LabelSegment};
use crate::render::LabelRenderer;

/// One exported raster, ready to embed in a print job
#[derive(Debug, Clone)]
pub struct EncodedRaster {
    /// Base64-encoded PNG
    pub base64_png: String,
    pub width_px: u32,
    pub height_px: u32,
    /// Position of the segment on the physical label
    pub sort_order: u32,
}

/// Export one segment: render, downscale, binarize, PNG-encode, base64
#[instrument(skip(renderer, segment), fields(w_mm = segment.width_mm, h_mm = segment.height_mm))]
pub fn export_segment(
    renderer: &LabelRenderer,
    segment: &LabelSegment,
    sort_order: u32,
) -> RasterResult<EncodedRaster> {
    let rendered = renderer.render_segment(segment)?;
    let (target_w, target_h) = renderer.target_px(segment);

    let mut reduced = if rendered.dimensions() == (target_w, target_h) {
        rendered
    } else {
        imageops::resize(&rendered, target_w, target_h, imageops::FilterType::Nearest)
    };

    if let Some(threshold) = renderer.options().threshold {
        apply_threshold(&mut reduced, threshold);
    }

    let base64_png = encode_png_base64(reduced)?;
    if base64_png.is_empty() {
        return Err(RasterError::Buffer("empty PNG payload".to_string()));
    }

    Ok(EncodedRaster {
        base64_png,
        width_px: target_w,
        height_px: target_h,
        sort_order,
    })
}

/// Export every segment of a layout, in template order
pub fn export_layout(
    renderer: &LabelRenderer,
    layout: &LabelLayout,
) -> RasterResult<Vec<EncodedRaster>> {
    layout
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| export_segment(renderer, segment, i as u32))
        .collect()
}

/// Clamp grayscale to pure black/white around a threshold
fn apply_threshold(img: &mut GrayImage, threshold: u8) {
    for pixel in img.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < threshold { 0 } else { 255 };
    }
}

fn encode_png_base64(img: GrayImage) -> RasterResult<String> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(general_purpose::STANDARD.encode(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::mm_to_px;
    use crate::render::RenderOptions;

    fn create_test_layout() -> LabelLayout {
        LabelLayout::new()
            .qr_block("S1IPM1002PA01-001", 25.0, 25.0)
            .barcode_strip("S1IPM1002PA01-001", 48.0, 6.0)
    }

    fn decode_png(raster: &EncodedRaster) -> GrayImage {
        let bytes = general_purpose::STANDARD.decode(&raster.base64_png).unwrap();
        image::load_from_memory(&bytes).unwrap().to_luma8()
    }

    #[test]
    fn test_raster_dimension_invariant() {
        // Pixel box must equal round(mm * dpi / 25.4) for every dpi used
        for dpi in [203.0, 300.0, 600.0] {
            let renderer = LabelRenderer::new(RenderOptions::default().with_dpi(dpi));
            let layout = create_test_layout();
            let rasters = export_layout(&renderer, &layout).unwrap();

            for (raster, segment) in rasters.iter().zip(&layout.segments) {
                assert_eq!(raster.width_px, mm_to_px(segment.width_mm, dpi));
                assert_eq!(raster.height_px, mm_to_px(segment.height_mm, dpi));

                let img = decode_png(raster);
                assert_eq!(img.dimensions(), (raster.width_px, raster.height_px));
            }
        }
    }

    #[test]
    fn test_export_is_idempotent() {
        let renderer = LabelRenderer::new(RenderOptions::default());
        let layout = create_test_layout();

        let a = export_layout(&renderer, &layout).unwrap();
        let b = export_layout(&renderer, &layout).unwrap();

        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.base64_png, rb.base64_png);
        }
    }

    #[test]
    fn test_export_preserves_segment_order() {
        let renderer = LabelRenderer::new(RenderOptions::default());
        let layout = create_test_layout();

        let rasters = export_layout(&renderer, &layout).unwrap();
        assert_eq!(rasters.len(), 2);
        assert_eq!(rasters[0].sort_order, 0);
        assert_eq!(rasters[1].sort_order, 1);
        // QR block is square, the strip is not
        assert_eq!(rasters[0].width_px, rasters[0].height_px);
        assert!(rasters[1].width_px > rasters[1].height_px);
    }

    #[test]
    fn test_threshold_binarizes() {
        let renderer = LabelRenderer::new(RenderOptions::default());
        let layout = LabelLayout::new().qr_block("S1", 25.0, 25.0);

        let rasters = export_layout(&renderer, &layout).unwrap();
        let img = decode_png(&rasters[0]);
        assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_empty_payload_exports_blank_raster() {
        let renderer = LabelRenderer::new(RenderOptions::default());
        let layout = LabelLayout::new().barcode_strip("", 48.0, 6.0);

        let rasters = export_layout(&renderer, &layout).unwrap();
        let img = decode_png(&rasters[0]);
        assert!(img.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_degenerate_segment_aborts_export() {
        let renderer = LabelRenderer::new(RenderOptions::default());
        let layout = LabelLayout::new().qr_block("S1", 0.0, 25.0);
        assert!(export_layout(&renderer, &layout).is_err());
    }
}
