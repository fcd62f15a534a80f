//! Label layout model
//!
//! A layout is an ordered list of segments; each segment becomes one
//! physical raster. Segment order is print order — the backend associates
//! job order with physical position on multi-segment labels.

use serde::{Deserialize, Serialize};

/// Convert a physical size in millimeters to pixels at the given DPI
///
/// Returns 0 for non-finite or non-positive sizes.
pub fn mm_to_px(mm: f32, dpi: f32) -> u32 {
    if !mm.is_finite() || mm <= 0.0 {
        return 0;
    }
    let px = mm * dpi / 25.4;
    px.round().max(1.0) as u32
}

/// Content of one label segment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentContent {
    /// QR symbol with an optional human-readable caption under it
    Qr {
        payload: String,
        #[serde(default)]
        caption: Option<String>,
    },
    /// Code 128 strip with optional human-readable text
    Barcode {
        payload: String,
        #[serde(default = "default_true")]
        show_text: bool,
    },
    /// Text panel (label/value rows) with a QR symbol in the right corner
    TextPanel {
        fields: Vec<(String, String)>,
        #[serde(default)]
        qr_payload: Option<String>,
    },
}

fn default_true() -> bool {
    true
}

impl SegmentContent {
    /// Whether this segment has anything to draw
    ///
    /// An empty payload is legal in the model; the renderer leaves the
    /// region blank instead of drawing a degenerate symbol.
    pub fn is_blank(&self) -> bool {
        match self {
            SegmentContent::Qr { payload, .. } => payload.is_empty(),
            SegmentContent::Barcode { payload, .. } => payload.is_empty(),
            SegmentContent::TextPanel { fields, qr_payload } => {
                fields.is_empty() && qr_payload.as_deref().is_none_or(str::is_empty)
            }
        }
    }
}

/// One physical label segment (one raster, one print job)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSegment {
    pub content: SegmentContent,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Ordered label layout, built fresh from a record per print action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelLayout {
    pub segments: Vec<LabelSegment>,
}

impl LabelLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a QR block segment
    pub fn qr_block(mut self, payload: impl Into<String>, width_mm: f32, height_mm: f32) -> Self {
        self.segments.push(LabelSegment {
            content: SegmentContent::Qr {
                payload: payload.into(),
                caption: None,
            },
            width_mm,
            height_mm,
        });
        self
    }

    /// Append a QR block with a caption line
    pub fn qr_block_captioned(
        mut self,
        payload: impl Into<String>,
        caption: impl Into<String>,
        width_mm: f32,
        height_mm: f32,
    ) -> Self {
        self.segments.push(LabelSegment {
            content: SegmentContent::Qr {
                payload: payload.into(),
                caption: Some(caption.into()),
            },
            width_mm,
            height_mm,
        });
        self
    }

    /// Append a Code 128 strip segment
    pub fn barcode_strip(
        mut self,
        payload: impl Into<String>,
        width_mm: f32,
        height_mm: f32,
    ) -> Self {
        self.segments.push(LabelSegment {
            content: SegmentContent::Barcode {
                payload: payload.into(),
                show_text: true,
            },
            width_mm,
            height_mm,
        });
        self
    }

    /// Append a text panel segment
    pub fn text_panel(
        mut self,
        fields: Vec<(String, String)>,
        qr_payload: Option<String>,
        width_mm: f32,
        height_mm: f32,
    ) -> Self {
        self.segments.push(LabelSegment {
            content: SegmentContent::TextPanel { fields, qr_payload },
            width_mm,
            height_mm,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_px_203dpi() {
        // 48mm strip at 203 DPI = 384px, 6mm = 48px
        assert_eq!(mm_to_px(48.0, 203.0), 384);
        assert_eq!(mm_to_px(6.0, 203.0), 48);
        // 25.4mm is exactly one inch
        assert_eq!(mm_to_px(25.4, 300.0), 300);
    }

    #[test]
    fn test_mm_to_px_degenerate() {
        assert_eq!(mm_to_px(0.0, 203.0), 0);
        assert_eq!(mm_to_px(-3.0, 203.0), 0);
        assert_eq!(mm_to_px(f32::NAN, 203.0), 0);
    }

    #[test]
    fn test_blank_detection() {
        let qr = SegmentContent::Qr {
            payload: String::new(),
            caption: None,
        };
        assert!(qr.is_blank());

        let bar = SegmentContent::Barcode {
            payload: "S1".to_string(),
            show_text: true,
        };
        assert!(!bar.is_blank());

        let panel = SegmentContent::TextPanel {
            fields: vec![],
            qr_payload: Some(String::new()),
        };
        assert!(panel.is_blank());
    }

    #[test]
    fn test_segment_content_tag() {
        let qr = SegmentContent::Qr {
            payload: "S1".to_string(),
            caption: None,
        };
        let json = serde_json::to_string(&qr).unwrap();
        assert!(json.contains("\"type\":\"qr\""));

        let back: SegmentContent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, SegmentContent::Qr { .. }));
    }

    #[test]
    fn test_builder_preserves_order() {
        let layout = LabelLayout::new()
            .qr_block("Q", 25.0, 25.0)
            .barcode_strip("B1", 48.0, 6.0)
            .barcode_strip("B2", 48.0, 6.0);

        assert_eq!(layout.segments.len(), 3);
        assert!(matches!(
            layout.segments[0].content,
            SegmentContent::Qr { .. }
        ));
        assert!(matches!(
            layout.segments[2].content,
            SegmentContent::Barcode { .. }
        ));
    }
}
