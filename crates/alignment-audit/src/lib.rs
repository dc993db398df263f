//! Strategic alignment audit: a weighted organizational diagnostic with an
//! AI-generated executive briefing.
//!
//! The crate owns the question bank, the persisted response store, the
//! scoring and validation rules, the insight gateway, and the archival
//! webhooks. The session controller in [`session`] ties them together;
//! the binary crate is a thin command surface over it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod submission;
pub mod telemetry;

pub use assessment::bank::QuestionBank;
pub use assessment::domain::{
    AssessmentMeta, AssessmentState, CategoryScore, MetaField, RiskLevel,
};
pub use assessment::store::{JsonFileStore, ResponseStore, SnapshotStore};
pub use config::AppConfig;
pub use error::AppError;
pub use report::{AiInsights, GeminiInsightEngine, InsightEngine, InsightError};
pub use session::{ActiveView, AssessmentSession, SessionError};
pub use submission::{ReqwestWebhookSink, WebhookSink};
