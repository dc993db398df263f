use crate::assessment::domain::AssessmentError;
use crate::config::ConfigError;
use crate::report::InsightError;
use crate::session::SessionError;
use crate::submission::SubmissionError;
use crate::telemetry::TelemetryError;

/// Binary-level error: everything that can abort a command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("assessment error: {0}")]
    Assessment(#[from] AssessmentError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("insight error: {0}")]
    Insight(#[from] InsightError),
    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),
}
