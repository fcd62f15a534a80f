//! Label data mapper
//!
//! Turns a backend `BarcodeRecord` into the `LabelLayout` for one print
//! channel. All rules are deterministic: the composite serial template
//! concatenates its fields in a fixed order (a missing field contributes
//! an empty string, never drops its slot, so the visual alignment of the
//! printed code is stable), and dates map to `YYYY-MM-DD` or to an empty
//! string — never to a "NaN"/"Invalid Date" placeholder.

use label_raster::LabelLayout;
use shared::{BarcodeRecord, PrintChannel};

/// QR block physical size (body label and inner-package header)
const QR_BLOCK_MM: (f32, f32) = (25.0, 25.0);
/// Serial strip physical size (accessory barcodes)
const STRIP_MM: (f32, f32) = (48.0, 6.0);
/// Outer shipping label physical size
const OUTER_MM: (f32, f32) = (100.0, 60.0);

/// Timezone the printed dates belong to (factory local time, UTC+8)
const FACTORY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Maps backend records to label layouts
#[derive(Debug, Clone, Default)]
pub struct LabelMapper;

impl LabelMapper {
    pub fn new() -> Self {
        Self
    }

    /// Composite serial payload: `<serial>IP<material>2P<version>-<seq>`
    ///
    /// The serial code carries its own `S` marker already, so the template
    /// must not add another. Field order and the zero-padded 3-digit
    /// sequence are fixed by the label template; downstream scanners parse
    /// by position.
    pub fn composite_serial(record: &BarcodeRecord, sequence: u32) -> String {
        format!(
            "{}IP{}2P{}-{:03}",
            record.code_sn, record.material_code, record.tech_version, sequence
        )
    }

    /// Epoch-millisecond string to `YYYY-MM-DD`; anything unparsable is ""
    ///
    /// Labels carry the factory's calendar date (UTC+8), not UTC — a
    /// delivery date stored as local midnight must not print as the
    /// previous day.
    pub fn format_delivery_date(raw: Option<&str>) -> String {
        let Some(tz) = chrono::FixedOffset::east_opt(FACTORY_UTC_OFFSET_SECS) else {
            return String::new();
        };
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.with_timezone(&tz).format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Build the layout for one channel, segments in template order
    pub fn map(&self, record: &BarcodeRecord, channel: PrintChannel) -> LabelLayout {
        match channel {
            PrintChannel::Body => self.map_body(record),
            PrintChannel::Inner => self.map_inner(record),
            PrintChannel::Outer => self.map_outer(record),
        }
    }

    /// Body label: one QR block carrying the composite serial
    fn map_body(&self, record: &BarcodeRecord) -> LabelLayout {
        let serial = Self::composite_serial(record, 1);
        LabelLayout::new().qr_block_captioned(serial.clone(), serial, QR_BLOCK_MM.0, QR_BLOCK_MM.1)
    }

    /// Inner-package label: QR header plus one strip per accessory code
    fn map_inner(&self, record: &BarcodeRecord) -> LabelLayout {
        let serial = Self::composite_serial(record, 1);
        let mut layout = LabelLayout::new().qr_block(serial, QR_BLOCK_MM.0, QR_BLOCK_MM.1);
        for code in &record.accessory_codes {
            layout = layout.barcode_strip(code.clone(), STRIP_MM.0, STRIP_MM.1);
        }
        layout
    }

    /// Outer shipping label: field panel with a corner QR
    fn map_outer(&self, record: &BarcodeRecord) -> LabelLayout {
        let fields = vec![
            ("物料编码".to_string(), record.material_code.clone()),
            ("名称".to_string(), record.material_name.clone()),
            ("型号".to_string(), record.model_type.clone()),
            (
                "数量".to_string(),
                format!("{} {}", record.quantity, record.unit),
            ),
            ("供应商".to_string(), record.supplier_code.clone()),
            (
                "交付日期".to_string(),
                Self::format_delivery_date(record.delivery_date.as_deref()),
            ),
        ];
        LabelLayout::new().text_panel(
            fields,
            Some(Self::composite_serial(record, 1)),
            OUTER_MM.0,
            OUTER_MM.1,
        )
    }
}
