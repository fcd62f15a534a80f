//! Headless segment renderer
//!
//! Renders one `LabelSegment` to a grayscale bitmap at an oversampled
//! resolution (an integer multiple of the printer's pixel target). The
//! exporter later downscales to the exact target with a non-smoothing
//! filter, so module and glyph edges stay sharp after the reduction.
//!
//! Rendering is a pure function of (segment, options): the same input
//! always produces a byte-identical bitmap.

use std::sync::Arc;

use image::{GrayImage, Luma};
use rusttype::{Font, Scale, point};
use tracing::{debug, warn};

use crate::error::{RasterError, RasterResult};
use crate::layout::{LabelSegment, SegmentContent, mm_to_px};
use crate::symbols::{QrMatrix, code128_bars, qr_matrix};

const INK: Luma<u8> = Luma([0u8]);
const PAPER: Luma<u8> = Luma([255u8]);

/// QR quiet zone, in modules, on every side (symbology requirement)
const QR_QUIET_MODULES: usize = 4;
/// Code 128 quiet zone, in modules, left and right
const CODE128_QUIET_MODULES: usize = 10;

/// A loaded TTF/OTF font for human-readable text
#[derive(Clone)]
pub struct FontData {
    font: Arc<Font<'static>>,
}

impl FontData {
    /// Load a font from raw TTF/OTF bytes
    pub fn from_vec(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self {
            font: Arc::new(font),
        })
    }

    fn font(&self) -> &Font<'static> {
        &self.font
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData").finish_non_exhaustive()
    }
}

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target printer resolution. 203 DPI (8 dots/mm) is the common
    /// thermal-printer standard; 40mm maps to exactly 320 dots.
    pub dpi: f32,
    /// Oversampling factor. Rendering happens at `target × oversample`
    /// and is reduced afterwards, which keeps small text legible.
    pub oversample: u32,
    /// Binarization threshold applied at export; gray edge pixels print
    /// as noise on thermal heads, so the default clamps them away.
    pub threshold: Option<u8>,
    /// Font for captions and human-readable lines. Without a font those
    /// regions stay blank; symbols still render.
    pub font: Option<FontData>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 203.0,
            oversample: 2,
            threshold: Some(185),
            font: None,
        }
    }
}

impl RenderOptions {
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_oversample(mut self, oversample: u32) -> Self {
        self.oversample = oversample.max(1);
        self
    }

    pub fn with_threshold(mut self, threshold: Option<u8>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_font(mut self, font: FontData) -> Self {
        self.font = Some(font);
        self
    }
}

/// Headless label segment renderer
pub struct LabelRenderer {
    options: RenderOptions,
}

impl LabelRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Pixel box of a segment at the printer's native resolution
    pub fn target_px(&self, segment: &LabelSegment) -> (u32, u32) {
        (
            mm_to_px(segment.width_mm, self.options.dpi),
            mm_to_px(segment.height_mm, self.options.dpi),
        )
    }

    /// Render one segment at the oversampled resolution
    ///
    /// The canvas is `target × oversample`, white background. Symbol
    /// encode failures and empty payloads leave their region blank; only
    /// a degenerate pixel box is an error.
    pub fn render_segment(&self, segment: &LabelSegment) -> RasterResult<GrayImage> {
        let (target_w, target_h) = self.target_px(segment);
        if target_w == 0 || target_h == 0 {
            return Err(RasterError::InvalidDimensions(format!(
                "{}x{}mm at {} dpi",
                segment.width_mm, segment.height_mm, self.options.dpi
            )));
        }

        let scale = self.options.oversample.max(1);
        let (w, h) = (target_w * scale, target_h * scale);
        let mut canvas = GrayImage::from_pixel(w, h, PAPER);

        if segment.content.is_blank() {
            debug!(width_mm = segment.width_mm, "Blank segment, skipping symbols");
            return Ok(canvas);
        }

        match &segment.content {
            SegmentContent::Qr { payload, caption } => {
                self.draw_qr_region(&mut canvas, payload, caption.as_deref(), 0, 0, w, h);
            }
            SegmentContent::Barcode { payload, show_text } => {
                self.draw_barcode_region(&mut canvas, payload, *show_text);
            }
            SegmentContent::TextPanel { fields, qr_payload } => {
                self.draw_text_panel(&mut canvas, fields, qr_payload.as_deref());
            }
        }

        Ok(canvas)
    }

    /// Draw a QR symbol (plus optional caption) centered in a region
    fn draw_qr_region(
        &self,
        canvas: &mut GrayImage,
        payload: &str,
        caption: Option<&str>,
        x0: u32,
        y0: u32,
        region_w: u32,
        region_h: u32,
    ) {
        let Some(qr) = qr_matrix(payload) else {
            return;
        };

        // Reserve a caption band under the symbol when there is text to draw
        let caption_band = match (caption, &self.options.font) {
            (Some(c), Some(_)) if !c.is_empty() => (region_h / 6).max(1),
            _ => 0,
        };
        let symbol_h = region_h.saturating_sub(caption_band);

        let total_modules = (qr.width + 2 * QR_QUIET_MODULES) as u32;
        let module_px = (region_w.min(symbol_h)) / total_modules;
        if module_px == 0 {
            warn!(
                modules = qr.width,
                region_w, region_h, "QR region too small for symbol, leaving blank"
            );
            return;
        }

        let symbol_px = total_modules * module_px;
        let off_x = x0 + (region_w - symbol_px) / 2 + QR_QUIET_MODULES as u32 * module_px;
        let off_y = y0 + (symbol_h - symbol_px) / 2 + QR_QUIET_MODULES as u32 * module_px;

        draw_qr_modules(canvas, &qr, off_x, off_y, module_px);

        if caption_band > 0
            && let Some(text) = caption
        {
            let font_px = (caption_band as f32) * 0.85;
            self.draw_centered_text(canvas, text, font_px, x0, region_w, y0 + symbol_h);
        }
    }

    /// Draw a Code 128 strip across the full canvas
    fn draw_barcode_region(&self, canvas: &mut GrayImage, payload: &str, show_text: bool) {
        let (w, h) = canvas.dimensions();
        let Some(bars) = code128_bars(payload) else {
            return;
        };

        // Quiet zone on both sides, then the widest module size that fits
        let total_modules = (bars.len() + 2 * CODE128_QUIET_MODULES) as u32;
        let module_w = w / total_modules;
        if module_w == 0 {
            warn!(
                modules = bars.len(),
                width = w,
                "Barcode region too narrow for symbol, leaving blank"
            );
            return;
        }

        let text_band = match (&self.options.font, show_text) {
            (Some(_), true) => (h / 3).min(h.saturating_sub(4)).max(1),
            _ => 0,
        };
        let bar_h = h.saturating_sub(text_band);

        let span = total_modules * module_w;
        let x0 = (w - span) / 2 + CODE128_QUIET_MODULES as u32 * module_w;

        for (i, &is_bar) in bars.iter().enumerate() {
            if !is_bar {
                continue;
            }
            let bx = x0 + i as u32 * module_w;
            for x in bx..bx + module_w {
                for y in 0..bar_h {
                    canvas.put_pixel(x, y, INK);
                }
            }
        }

        if text_band > 0 {
            // Human-readable line on the symbology's text baseline
            let font_px = (text_band as f32) * 0.9;
            self.draw_centered_text(canvas, payload, font_px, 0, w, bar_h);
        }
    }

    /// Draw a field panel with an optional QR symbol in the right corner
    fn draw_text_panel(
        &self,
        canvas: &mut GrayImage,
        fields: &[(String, String)],
        qr_payload: Option<&str>,
    ) {
        let (w, h) = canvas.dimensions();
        let pad = (w / 24).max(2);

        // QR occupies the right third when present
        let qr_side = match qr_payload {
            Some(p) if !p.is_empty() => (w / 3).min(h.saturating_sub(2 * pad)),
            _ => 0,
        };
        if qr_side > 0
            && let Some(p) = qr_payload
        {
            self.draw_qr_region(canvas, p, None, w - qr_side - pad, pad, qr_side, qr_side);
        }

        // Saturating: tiny panels must degrade to a zero-width text area,
        // not underflow
        let margins = qr_side + if qr_side > 0 { 3 * pad } else { 2 * pad };
        let text_w = w.saturating_sub(margins);
        let line_h = if fields.is_empty() {
            0
        } else {
            (h.saturating_sub(2 * pad) / fields.len() as u32).max(1)
        };
        let font_px = (line_h as f32 * 0.7).max(4.0);

        let Some(font) = self.options.font.clone() else {
            if !fields.is_empty() {
                debug!("No font configured, text panel fields skipped");
            }
            return;
        };

        for (i, (label, value)) in fields.iter().enumerate() {
            let line = if label.is_empty() {
                value.clone()
            } else {
                format!("{}: {}", label, value)
            };
            let baseline = pad + i as u32 * line_h + (line_h as f32 * 0.75) as u32;
            draw_text_line(canvas, font.font(), &line, font_px, pad as f32, baseline as f32, text_w);
        }
    }

    /// Draw a single text line centered horizontally in `[x0, x0+region_w)`
    fn draw_centered_text(
        &self,
        canvas: &mut GrayImage,
        text: &str,
        font_px: f32,
        x0: u32,
        region_w: u32,
        band_top: u32,
    ) {
        let Some(font) = self.options.font.clone() else {
            debug!("No font configured, caption skipped");
            return;
        };

        let width = text_width(font.font(), font_px, text);
        let x = x0 as f32 + ((region_w as f32 - width) / 2.0).max(0.0);
        let baseline = band_top as f32 + font_px;
        draw_text_line(canvas, font.font(), text, font_px, x, baseline, region_w);
    }
}

/// Paint dark QR modules as filled squares
fn draw_qr_modules(canvas: &mut GrayImage, qr: &QrMatrix, off_x: u32, off_y: u32, module_px: u32) {
    let (cw, ch) = canvas.dimensions();
    for row in 0..qr.width {
        for col in 0..qr.width {
            if !qr.modules[row * qr.width + col] {
                continue;
            }
            let px0 = off_x + col as u32 * module_px;
            let py0 = off_y + row as u32 * module_px;
            for y in py0..(py0 + module_px).min(ch) {
                for x in px0..(px0 + module_px).min(cw) {
                    canvas.put_pixel(x, y, INK);
                }
            }
        }
    }
}

/// Advance width of a text line at the given pixel size
fn text_width(font: &Font<'static>, px: f32, text: &str) -> f32 {
    let scale = Scale { x: px, y: px };
    let v_metrics = font.v_metrics(scale);
    font.layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Rasterize one line of text onto the canvas
///
/// Coverage above one half becomes ink; everything else stays paper. A
/// hard cut, not blending — the exporter binarizes anyway and a hard edge
/// keeps renders byte-stable.
fn draw_text_line(
    canvas: &mut GrayImage,
    font: &Font<'static>,
    text: &str,
    px: f32,
    x: f32,
    baseline: f32,
    max_w: u32,
) {
    let (cw, ch) = canvas.dimensions();
    let scale = Scale { x: px, y: px };

    for glyph in font.layout(text, scale, point(x, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        if bb.min.x as f32 > x + max_w as f32 {
            break;
        }
        glyph.draw(|gx, gy, v| {
            if v <= 0.5 {
                return;
            }
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px >= 0 && py >= 0 && (px as u32) < cw && (py as u32) < ch {
                canvas.put_pixel(px as u32, py as u32, INK);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LabelLayout;

    fn create_test_renderer() -> LabelRenderer {
        LabelRenderer::new(RenderOptions::default())
    }

    fn qr_segment(payload: &str) -> LabelSegment {
        LabelLayout::new()
            .qr_block(payload, 25.0, 25.0)
            .segments
            .remove(0)
    }

    fn barcode_segment(payload: &str) -> LabelSegment {
        LabelLayout::new()
            .barcode_strip(payload, 48.0, 6.0)
            .segments
            .remove(0)
    }

    #[test]
    fn test_oversampled_dimensions() {
        let renderer = create_test_renderer();
        let segment = barcode_segment("S1IPM1002PA01-001");

        let img = renderer.render_segment(&segment).unwrap();
        let (tw, th) = renderer.target_px(&segment);
        assert_eq!(img.dimensions(), (tw * 2, th * 2));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = create_test_renderer();
        let segment = qr_segment("S1IPM1002PA01-001");

        let a = renderer.render_segment(&segment).unwrap();
        let b = renderer.render_segment(&segment).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_empty_payload_renders_blank() {
        let renderer = create_test_renderer();
        let segment = qr_segment("");

        let img = renderer.render_segment(&segment).unwrap();
        assert!(img.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_qr_has_ink_and_quiet_zone() {
        let renderer = create_test_renderer();
        let segment = qr_segment("S1IPM1002PA01-001");

        let img = renderer.render_segment(&segment).unwrap();
        assert!(img.pixels().any(|p| p.0[0] == 0));

        // Quiet zone: the outer border must stay paper-white
        let (w, h) = img.dimensions();
        for x in 0..w {
            assert_eq!(img.get_pixel(x, 0).0[0], 255);
            assert_eq!(img.get_pixel(x, h - 1).0[0], 255);
        }
    }

    #[test]
    fn test_barcode_quiet_zone() {
        let renderer = create_test_renderer();
        let segment = barcode_segment("S1IPM1002PA01-001");

        let img = renderer.render_segment(&segment).unwrap();
        let (w, _) = img.dimensions();
        // Left and right edges stay blank (10-module quiet zones)
        for y in 0..img.height() {
            assert_eq!(img.get_pixel(0, y).0[0], 255);
            assert_eq!(img.get_pixel(w - 1, y).0[0], 255);
        }
        assert!(img.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn test_degenerate_size_is_error() {
        let renderer = create_test_renderer();
        let segment = LabelSegment {
            content: SegmentContent::Qr {
                payload: "X".to_string(),
                caption: None,
            },
            width_mm: 0.0,
            height_mm: 25.0,
        };
        assert!(matches!(
            renderer.render_segment(&segment),
            Err(RasterError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_text_panel_without_font_draws_qr_only() {
        let renderer = create_test_renderer();
        let segment = LabelLayout::new()
            .text_panel(
                vec![("编码".to_string(), "M100".to_string())],
                Some("S1".to_string()),
                100.0,
                60.0,
            )
            .segments
            .remove(0);

        // No font configured: must not panic, QR corner still inked
        let img = renderer.render_segment(&segment).unwrap();
        assert!(img.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn test_tiny_text_panel_degrades_without_panic() {
        let renderer = create_test_renderer();
        // Narrower than its own margins: the text area must clamp to zero
        let segment = LabelLayout::new()
            .text_panel(
                vec![("编码".to_string(), "M100".to_string())],
                Some("S1".to_string()),
                0.4,
                60.0,
            )
            .segments
            .remove(0);

        let img = renderer.render_segment(&segment).unwrap();
        assert!(img.width() >= 1);
    }

    #[test]
    fn test_malformed_barcode_payload_left_blank() {
        let renderer = create_test_renderer();
        // Code 128 set B cannot encode control characters
        let segment = barcode_segment("bad\u{0007}payload");

        let img = renderer.render_segment(&segment).unwrap();
        assert!(img.pixels().all(|p| p.0[0] == 255));
    }
}
