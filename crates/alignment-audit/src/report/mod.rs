pub mod gemini;
pub mod prompt;
pub mod schema;

pub use gemini::{GeminiInsightEngine, InsightEngine};
pub use schema::{
    AiInsights, ClientSummary, ConsultantReport, ExecutiveSnapshot, FutureState,
    InitiativePriority, LayerScores, ReportRiskLevel, StrategicInitiative, TechnologyPosition,
};

/// Error taxonomy surfaced by the insight generator.
///
/// Quota exhaustion is a distinguished variant so the caller can render
/// it differently from other failures.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("insight service credential not configured")]
    MissingCredential,
    #[error("empty response from the insight service")]
    EmptyResponse,
    #[error("insight service quota exceeded")]
    QuotaExceeded,
    #[error("insight request failed: {0}")]
    Transport(reqwest::Error),
    #[error("insight service returned status {status}: {detail}")]
    Service { status: u16, detail: String },
    #[error("insight payload failed validation: {0}")]
    Decode(String),
}
