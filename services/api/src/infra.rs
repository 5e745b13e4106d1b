use clap::ValueEnum;
use incident_ai::error::AppError;
use incident_ai::workflows::incident::{render_markdown, FinalReportRequest, IncidentReport};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

pub(crate) fn load_request(path: &Path) -> Result<FinalReportRequest, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn render_report(
    report: &IncidentReport,
    format: ReportFormat,
) -> Result<String, AppError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}
