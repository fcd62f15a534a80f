//! Backend API seam
//!
//! The pipeline talks to the backend through this trait so tests can
//! substitute a recording mock and assert call order (no status update
//! after a failed submission, nothing at all after a cancelled selection).

use async_trait::async_trait;
use shared::{BarcodeRecord, PrintJobRequest, PrintStatusUpdate, PrinterDescriptor};

use crate::error::ClientResult;

/// Backend operations used by the print pipeline
#[async_trait]
pub trait PrintApi: Send + Sync {
    /// Fetch the record for a scanned or keyed-in code
    async fn fetch_record(&self, code: &str) -> ClientResult<BarcodeRecord>;

    /// Fetch the printer directory, optionally filtered by department
    async fn list_printers(&self, department: Option<&str>)
    -> ClientResult<Vec<PrinterDescriptor>>;

    /// Submit a batch of print jobs to the backend queue
    async fn submit_print_jobs(&self, jobs: &[PrintJobRequest]) -> ClientResult<()>;

    /// Record a confirmed print on the record's channel counter
    async fn update_print_status(&self, update: &PrintStatusUpdate) -> ClientResult<()>;
}
