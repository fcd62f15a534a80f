//! Print dispatcher
//!
//! Packages exported rasters into print jobs and submits them as one
//! batch, then records the confirmed print on the record's channel
//! counter. The status update runs only after the backend has accepted
//! the batch — a failed submission must never mark the record printed.

use label_raster::EncodedRaster;
use print_client::PrintApi;
use shared::{BarcodeRecord, PrintChannel, PrintJobRequest, PrintStatusUpdate, PrinterDescriptor};
use tracing::{error, info, instrument};

use crate::error::PrintActionError;

/// Outcome of a confirmed dispatch
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub jobs_submitted: usize,
    /// Channel counter value the status update carried
    pub new_print_count: i64,
}

/// Submits print jobs and the follow-up status update
pub struct Dispatcher<'a> {
    api: &'a dyn PrintApi,
    operator: String,
}

impl<'a> Dispatcher<'a> {
    pub fn new(api: &'a dyn PrintApi, operator: impl Into<String>) -> Self {
        Self {
            api,
            operator: operator.into(),
        }
    }

    /// Build one job per raster, preserving template order
    fn build_jobs(
        &self,
        rasters: &[EncodedRaster],
        printer: &PrinterDescriptor,
        channel: PrintChannel,
        copies: u32,
    ) -> Vec<PrintJobRequest> {
        rasters
            .iter()
            .map(|raster| PrintJobRequest {
                printer_id: printer.printer_id.clone(),
                ip: printer.ip.clone(),
                port: printer.port,
                operator: self.operator.clone(),
                copies,
                print_data: raster.base64_png.clone(),
                print_type: channel,
                priority: printer.priority,
                sort_order: raster.sort_order,
            })
            .collect()
    }

    /// Submit the batch, then update the print counter
    #[instrument(skip(self, record, rasters, printer), fields(record_id = %record.id, segments = rasters.len()))]
    pub async fn dispatch(
        &self,
        record: &BarcodeRecord,
        channel: PrintChannel,
        printer: &PrinterDescriptor,
        rasters: &[EncodedRaster],
        copies: u32,
    ) -> Result<DispatchReceipt, PrintActionError> {
        if rasters.is_empty() {
            return Err(PrintActionError::Dispatch("no rasters to print".to_string()));
        }

        let jobs = self.build_jobs(rasters, printer, channel, copies);

        self.api.submit_print_jobs(&jobs).await.map_err(|e| {
            error!(error = %e, "Print submission rejected");
            PrintActionError::Dispatch(e.to_string())
        })?;

        info!(jobs = jobs.len(), printer_id = %printer.printer_id, "Print batch accepted");

        // Counter increments only after the backend confirmed acceptance
        let update = PrintStatusUpdate::after_print(record, channel, &self.operator, printer);
        let new_print_count = record.print_count(channel) + 1;

        self.api.update_print_status(&update).await.map_err(|e| {
            error!(error = %e, record_id = %record.id, "Status update failed after accepted batch");
            PrintActionError::Dispatch(e.to_string())
        })?;

        Ok(DispatchReceipt {
            jobs_submitted: jobs.len(),
            new_print_count,
        })
    }
}
