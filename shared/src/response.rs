//! API Response types
//!
//! The backend wraps every payload in the same envelope:
//! `{ "code": 0, "msg": "...", "errorMsg": "...", "success": true, "data": ... }`
//! with `code == 0` meaning business success.

use serde::{Deserialize, Serialize};

/// Business-success code
pub const API_CODE_SUCCESS: i64 = 0;

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Business success (`code == 0`)
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }

    /// Best human-readable message for a failed envelope
    ///
    /// Prefers `errorMsg` over `msg`; falls back to a generic text so the
    /// operator never sees an empty toast.
    pub fn message(&self) -> &str {
        if !self.error_msg.is_empty() {
            &self.error_msg
        } else if !self.msg.is_empty() {
            &self.msg
        } else {
            "请求失败"
        }
    }
}
