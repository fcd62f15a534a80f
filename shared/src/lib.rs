//! Shared types for the label print pipeline
//!
//! Wire-level models exchanged with the backend barcode service plus the
//! unified API response envelope. All types here mirror the backend's
//! camelCase JSON contract.

pub mod models;
pub mod response;

// Re-exports
pub use models::{
    BarcodeRecord, PrintChannel, PrintJobRequest, PrintStatusUpdate, PrinterDescriptor,
    PrinterStatus,
};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
