pub mod llm_service;
pub mod report_writer;

pub use llm_service::{retry_with_backoff, LlmService};
pub use report_writer::ReportWriter;
