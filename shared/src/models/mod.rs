//! Domain models

mod barcode;
mod print_job;
mod printer;

pub use barcode::{BarcodeRecord, PrintChannel};
pub use print_job::{PrintJobRequest, PrintStatusUpdate};
pub use printer::{PrinterDescriptor, PrinterStatus};
