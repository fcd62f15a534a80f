//! Printer Directory Model

use serde::{Deserialize, Serialize};

/// Printer status as reported by the directory endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrinterStatus {
    Online,
    Offline,
    Busy,
}

/// Network label printer entry from the printer directory
///
/// Read-only to the client; fetched fresh for each selection session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterDescriptor {
    pub printer_id: String,
    pub printer_name: String,
    pub ip: String,
    pub port: u16,
    pub status: PrinterStatus,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub model: String,
    /// Supported paper size in millimeters
    #[serde(default)]
    pub paper_width: f32,
    #[serde(default)]
    pub paper_height: f32,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub priority: i32,
}

fn default_true() -> bool {
    true
}

impl PrinterDescriptor {
    pub fn is_online(&self) -> bool {
        self.status == PrinterStatus::Online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_directory_entry() {
        let json = r#"{
            "printerId": "p-1",
            "printerName": "车间一号",
            "ip": "192.168.1.100",
            "port": 9100,
            "status": "ONLINE",
            "department": "assembly"
        }"#;
        let printer: PrinterDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(printer.printer_id, "p-1");
        assert!(printer.is_online());
        assert!(printer.is_enabled);
        assert_eq!(printer.priority, 0);
    }

    #[test]
    fn test_offline_status() {
        let json = r#"{"printerId":"p-2","printerName":"x","ip":"10.0.0.2","port":9100,"status":"OFFLINE"}"#;
        let printer: PrinterDescriptor = serde_json::from_str(json).unwrap();
        assert!(!printer.is_online());
    }
}
