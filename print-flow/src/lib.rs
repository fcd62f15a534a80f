//! Print pipeline for factory floor labels
//!
//! Orchestrates one print action end to end: fetch the barcode record,
//! map it to a label layout, let the operator pick a printer, export the
//! rasters at printer DPI, dispatch them to the backend print queue and
//! record the confirmed print on the record's channel counter.
//!
//! Steps run strictly sequentially; the operator dismissing the printer
//! picker cancels the whole action with no side effects, and no failure
//! leaves a counter incremented without an accepted print job.

mod action;
mod dispatch;
mod error;
mod mapper;
mod select;
mod validate;

// Re-exports
pub use action::{Outcome, PrintAction};
pub use dispatch::{DispatchReceipt, Dispatcher};
pub use error::PrintActionError;
pub use mapper::LabelMapper;
pub use select::{PrinterPicker, SelectionGate};
pub use validate::{is_valid_code, is_valid_copies};
