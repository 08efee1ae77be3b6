pub mod metrics_service;
pub use metrics_service::MetricsService;
pub mod report_service;
pub use report_service::ReportService;
pub mod document_service;
pub use document_service::{DocumentService, PdfRenderer, RenderedReport, ReportRenderer};

#[cfg(test)]
pub(crate) mod fixtures;
