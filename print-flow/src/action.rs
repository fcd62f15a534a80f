//! Page-action boundary
//!
//! One print action, strictly sequential: validate input, load the
//! record, map it to a layout, let the operator pick a printer, export
//! the rasters, dispatch, update the counter. Printer selection runs
//! before export so a dismissed picker cancels the action without any
//! rasterization work or side effects.
//!
//! Every failure is converted to an operator-facing message here; none
//! escapes to a global handler and none is retried automatically.

use label_raster::{LabelRenderer, export_layout};
use print_client::{ClientError, PrintApi};
use shared::PrintChannel;
use tracing::{info, instrument, warn};

use crate::dispatch::Dispatcher;
use crate::error::PrintActionError;
use crate::mapper::LabelMapper;
use crate::select::{PrinterPicker, SelectionGate};
use crate::validate::{is_valid_code, is_valid_copies};

/// How one print action ended
#[derive(Debug)]
pub enum Outcome {
    /// Batch accepted and the channel counter updated
    Printed { jobs: usize },
    /// Operator dismissed the printer picker; nothing happened
    Cancelled,
    /// Operator-visible failure; no persisted state changed
    Failed { message: String },
}

/// One-shot print action runner bound to a backend client
pub struct PrintAction<'a> {
    api: &'a dyn PrintApi,
    renderer: LabelRenderer,
    mapper: LabelMapper,
    gate: SelectionGate,
    operator: String,
    department: Option<String>,
}

impl<'a> PrintAction<'a> {
    pub fn new(api: &'a dyn PrintApi, renderer: LabelRenderer, operator: impl Into<String>) -> Self {
        Self {
            api,
            renderer,
            mapper: LabelMapper::new(),
            gate: SelectionGate::new(),
            operator: operator.into(),
            department: None,
        }
    }

    /// Restrict the printer directory to one department
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Run the action and fold every failure into an operator message
    #[instrument(skip(self, picker), fields(channel = channel.as_str()))]
    pub async fn run(
        &self,
        code: &str,
        channel: PrintChannel,
        copies: u32,
        picker: &dyn PrinterPicker,
    ) -> Outcome {
        match self.execute(code, channel, copies, picker).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Print action failed");
                Outcome::Failed {
                    message: e.operator_message(),
                }
            }
        }
    }

    async fn execute(
        &self,
        code: &str,
        channel: PrintChannel,
        copies: u32,
        picker: &dyn PrinterPicker,
    ) -> Result<Outcome, PrintActionError> {
        if !is_valid_code(code) {
            return Err(PrintActionError::Input("条码格式无效".to_string()));
        }
        if !is_valid_copies(copies) {
            return Err(PrintActionError::Input("打印数量需在1-999之间".to_string()));
        }

        let record = self
            .api
            .fetch_record(code)
            .await
            .map_err(record_load_error)?;
        let layout = self.mapper.map(&record, channel);

        let Some(printer) = self
            .gate
            .select(self.api, picker, self.department.as_deref())
            .await?
        else {
            info!(record_id = %record.id, "Print action cancelled by operator");
            return Ok(Outcome::Cancelled);
        };

        // Segments export in template order; a capture failure aborts
        // before anything reaches the network
        let rasters = export_layout(&self.renderer, &layout)?;

        let receipt = Dispatcher::new(self.api, &self.operator)
            .dispatch(&record, channel, &printer, &rasters, copies)
            .await?;

        info!(
            record_id = %record.id,
            jobs = receipt.jobs_submitted,
            print_count = receipt.new_print_count,
            "Print action completed"
        );
        Ok(Outcome::Printed {
            jobs: receipt.jobs_submitted,
        })
    }
}

fn record_load_error(err: ClientError) -> PrintActionError {
    let message = match err {
        ClientError::NotFound(_) => "条码记录不存在".to_string(),
        ClientError::Unauthorized => "登录已过期，请重新登录".to_string(),
        _ => "网络错误，请稍后重试".to_string(),
    };
    PrintActionError::DataLoad(message)
}
