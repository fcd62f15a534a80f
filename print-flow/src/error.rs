//! Print action error taxonomy
//!
//! Everything here is caught at the page-action boundary and turned into
//! an operator-facing message; nothing escapes to a global handler and
//! nothing is retried automatically. Operator cancellation is not an
//! error — it is [`crate::Outcome::Cancelled`].

use label_raster::RasterError;
use thiserror::Error;

/// Failure modes of one print action
#[derive(Debug, Error)]
pub enum PrintActionError {
    /// Operator input rejected before any network call
    #[error("Invalid input: {0}")]
    Input(String),

    /// Record or printer directory unavailable
    #[error("Data load failed: {0}")]
    DataLoad(String),

    /// Raster capture or encoding failed; aborts before any network call
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Backend rejected the print jobs or the status update
    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    /// A printer selection session is already pending
    #[error("Printer selection already in progress")]
    SelectionBusy,
}

impl PrintActionError {
    /// Human-readable message for the operator toast
    pub fn operator_message(&self) -> String {
        match self {
            PrintActionError::Input(msg) => msg.clone(),
            PrintActionError::DataLoad(msg) => msg.clone(),
            PrintActionError::Raster(_) => "标签图片生成失败".to_string(),
            PrintActionError::Dispatch(_) => "打印失败，请重试".to_string(),
            PrintActionError::SelectionBusy => "请先完成当前打印机选择".to_string(),
        }
    }
}
