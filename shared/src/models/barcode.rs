//! Barcode Record Model

use serde::{Deserialize, Serialize};

/// Print channel of a label (which physical label the raster belongs to)
///
/// Wire values match the backend print queue: BODY (本体码),
/// INNER (内包装码), OUTER (外标签).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrintChannel {
    Body,
    Inner,
    Outer,
}

impl PrintChannel {
    /// Wire tag used in print job requests
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintChannel::Body => "BODY",
            PrintChannel::Inner => "INNER",
            PrintChannel::Outer => "OUTER",
        }
    }
}

/// Barcode record entity (a manufacturing unit's printable record)
///
/// Fetched by identifier or just-scanned code; mutated only through the
/// edit and print-status-update endpoints, never deleted by the client.
/// Every string field tolerates absence on the wire — what an absent field
/// means is the mapper's decision, not serde's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRecord {
    pub id: String,
    #[serde(default)]
    pub material_code: String,
    #[serde(default)]
    pub material_name: String,
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub supplier_code: String,
    #[serde(default)]
    pub factory_code: String,
    /// Full serial code (the scanned body code)
    #[serde(default)]
    pub code_sn: String,
    #[serde(default)]
    pub secondary_code: String,
    /// Drawing/technology version
    #[serde(default)]
    pub tech_version: String,
    #[serde(default)]
    pub accessory_cnt: i64,
    #[serde(default)]
    pub accessory_codes: Vec<String>,
    /// Epoch-millisecond timestamp as a string; may be absent or garbage
    #[serde(default)]
    pub delivery_date: Option<String>,
    /// Per-channel print counters (monotonic counts, incremented by the
    /// client only after the backend confirms job acceptance)
    #[serde(default)]
    pub bt_print_cnt: i64,
    #[serde(default)]
    pub nbz_print_cnt: i64,
    #[serde(default)]
    pub wbz_print_cnt: i64,
}

impl BarcodeRecord {
    /// Current counter value for a channel
    pub fn print_count(&self, channel: PrintChannel) -> i64 {
        match channel {
            PrintChannel::Body => self.bt_print_cnt,
            PrintChannel::Inner => self.nbz_print_cnt,
            PrintChannel::Outer => self.wbz_print_cnt,
        }
    }
}
