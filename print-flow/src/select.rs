//! Printer selection gate
//!
//! Fetches the printer directory and suspends the action until the
//! operator picks a printer or dismisses. Only one selection session may
//! be pending per gate; a second `select` while one is open fails fast
//! instead of stacking pickers.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use print_client::{ClientError, PrintApi};
use shared::PrinterDescriptor;
use tracing::{info, warn};

use crate::error::PrintActionError;

/// Operator-facing printer choice
///
/// Implemented by the UI layer (a popup in the mobile app); tests provide
/// deterministic pickers. Resolving `None` means the operator dismissed.
#[async_trait]
pub trait PrinterPicker: Send + Sync {
    async fn pick(&self, printers: Vec<PrinterDescriptor>) -> Option<PrinterDescriptor>;
}

/// Serializes printer selection sessions
pub struct SelectionGate {
    pending: AtomicBool,
}

impl SelectionGate {
    pub fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Fetch the directory and let the operator choose
    ///
    /// Returns `Ok(None)` when the operator dismisses — the caller must
    /// treat that as a full cancellation of the print action.
    pub async fn select(
        &self,
        api: &dyn PrintApi,
        picker: &dyn PrinterPicker,
        department: Option<&str>,
    ) -> Result<Option<PrinterDescriptor>, PrintActionError> {
        if self.pending.swap(true, Ordering::AcqRel) {
            warn!("Selection requested while another session is pending");
            return Err(PrintActionError::SelectionBusy);
        }
        // Released on every exit path, including picker panics
        let _guard = PendingGuard(&self.pending);

        let mut printers = api
            .list_printers(department)
            .await
            .map_err(|e| PrintActionError::DataLoad(directory_message(&e)))?;

        printers.retain(|p| p.is_enabled);
        if printers.is_empty() {
            return Err(PrintActionError::DataLoad("暂无可用打印机".to_string()));
        }

        // Highest priority first, stable within equal priority
        printers.sort_by(|a, b| b.priority.cmp(&a.priority));

        let choice = picker.pick(printers).await;
        match &choice {
            Some(p) => info!(printer_id = %p.printer_id, "Printer selected"),
            None => info!("Printer selection dismissed"),
        }
        Ok(choice)
    }
}

impl Default for SelectionGate {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn directory_message(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized => "登录已过期，请重新登录".to_string(),
        _ => "获取打印机列表失败".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BarcodeRecord, PrintJobRequest, PrintStatusUpdate, PrinterStatus};
    use std::time::Duration;

    struct StaticApi {
        printers: Vec<PrinterDescriptor>,
    }

    #[async_trait]
    impl PrintApi for StaticApi {
        async fn fetch_record(&self, code: &str) -> print_client::ClientResult<BarcodeRecord> {
            Err(ClientError::NotFound(code.to_string()))
        }

        async fn list_printers(
            &self,
            _department: Option<&str>,
        ) -> print_client::ClientResult<Vec<PrinterDescriptor>> {
            Ok(self.printers.clone())
        }

        async fn submit_print_jobs(
            &self,
            _jobs: &[PrintJobRequest],
        ) -> print_client::ClientResult<()> {
            Ok(())
        }

        async fn update_print_status(
            &self,
            _update: &PrintStatusUpdate,
        ) -> print_client::ClientResult<()> {
            Ok(())
        }
    }

    fn create_test_printer(id: &str, priority: i32, enabled: bool) -> PrinterDescriptor {
        PrinterDescriptor {
            printer_id: id.to_string(),
            printer_name: id.to_string(),
            ip: "192.168.1.100".to_string(),
            port: 9100,
            status: PrinterStatus::Online,
            department: String::new(),
            location: String::new(),
            model: String::new(),
            paper_width: 48.0,
            paper_height: 6.0,
            is_enabled: enabled,
            priority,
        }
    }

    /// Picks the first entry after an optional delay
    struct FirstPicker {
        delay: Option<Duration>,
    }

    #[async_trait]
    impl PrinterPicker for FirstPicker {
        async fn pick(&self, printers: Vec<PrinterDescriptor>) -> Option<PrinterDescriptor> {
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            printers.into_iter().next()
        }
    }

    struct DismissPicker;

    #[async_trait]
    impl PrinterPicker for DismissPicker {
        async fn pick(&self, _printers: Vec<PrinterDescriptor>) -> Option<PrinterDescriptor> {
            None
        }
    }

    #[tokio::test]
    async fn test_select_filters_and_sorts() {
        let api = StaticApi {
            printers: vec![
                create_test_printer("low", 1, true),
                create_test_printer("disabled", 9, false),
                create_test_printer("high", 5, true),
            ],
        };
        let gate = SelectionGate::new();
        let picker = FirstPicker { delay: None };

        let choice = gate.select(&api, &picker, None).await.unwrap().unwrap();
        assert_eq!(choice.printer_id, "high");
    }

    #[tokio::test]
    async fn test_dismiss_resolves_none() {
        let api = StaticApi {
            printers: vec![create_test_printer("p", 0, true)],
        };
        let gate = SelectionGate::new();

        let choice = gate.select(&api, &DismissPicker, None).await.unwrap();
        assert!(choice.is_none());
    }

    #[tokio::test]
    async fn test_empty_directory_is_data_load_error() {
        let api = StaticApi { printers: vec![] };
        let gate = SelectionGate::new();
        let picker = FirstPicker { delay: None };

        let result = gate.select(&api, &picker, None).await;
        assert!(matches!(result, Err(PrintActionError::DataLoad(_))));
    }

    #[tokio::test]
    async fn test_second_session_rejected_while_pending() {
        let api = StaticApi {
            printers: vec![create_test_printer("p", 0, true)],
        };
        let gate = std::sync::Arc::new(SelectionGate::new());

        let slow = FirstPicker {
            delay: Some(Duration::from_millis(100)),
        };
        let first = {
            let gate = gate.clone();
            async move {
                let api = StaticApi {
                    printers: vec![create_test_printer("p", 0, true)],
                };
                gate.select(&api, &slow, None).await
            }
        };
        let first = tokio::spawn(first);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = gate
            .select(&api, &FirstPicker { delay: None }, None)
            .await;
        assert!(matches!(second, Err(PrintActionError::SelectionBusy)));

        // First session still completes and releases the gate
        assert!(first.await.unwrap().unwrap().is_some());
        let third = gate.select(&api, &FirstPicker { delay: None }, None).await;
        assert!(third.is_ok());
    }
}
