//! Print Job Models

use serde::{Deserialize, Serialize};

use super::{BarcodeRecord, PrintChannel, PrinterDescriptor};

/// One raster plus dispatch metadata, submitted to the backend print queue
///
/// Created immediately before submission and disposed once the HTTP call
/// resolves. The raster's pixel dimensions must already match the target
/// printer's resolution (`mm × dpi / 25.4`, rounded) — the backend prints
/// the bitmap 1:1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobRequest {
    pub printer_id: String,
    pub ip: String,
    pub port: u16,
    pub operator: String,
    pub copies: u32,
    /// Base64-encoded PNG
    pub print_data: String,
    pub print_type: PrintChannel,
    pub priority: i32,
    /// Position of this raster on a multi-segment label; the backend maps
    /// job order to physical print order
    pub sort_order: u32,
}

/// Print-status update issued after the backend accepts a batch
///
/// Exactly one counter field is set per update; idempotent increment
/// semantics are the backend's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintStatusUpdate {
    pub id: String,
    pub operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bt_print_cnt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbz_print_cnt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wbz_print_cnt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_id: Option<String>,
}

impl PrintStatusUpdate {
    /// Build the update for one confirmed print: bump the channel's counter
    /// past the record's current value and note the printer used.
    pub fn after_print(
        record: &BarcodeRecord,
        channel: PrintChannel,
        operator: impl Into<String>,
        printer: &PrinterDescriptor,
    ) -> Self {
        let next = record.print_count(channel) + 1;
        let mut update = Self {
            id: record.id.clone(),
            operator: operator.into(),
            bt_print_cnt: None,
            nbz_print_cnt: None,
            wbz_print_cnt: None,
            printer_id: Some(printer.printer_id.clone()),
        };
        match channel {
            PrintChannel::Body => update.bt_print_cnt = Some(next),
            PrintChannel::Inner => update.nbz_print_cnt = Some(next),
            PrintChannel::Outer => update.wbz_print_cnt = Some(next),
        }
        update
    }
}
