use std::sync::Arc;
use tracing::{info, warn};

use crate::assessment::bank::QuestionBank;
use crate::assessment::domain::{
    AssessmentError, AssessmentState, CategoryScore, MetaField, SectionStatus,
};
use crate::assessment::scoring::{compute_progress, compute_scores, section_status};
use crate::assessment::store::{ResponseStore, SnapshotStore};
use crate::assessment::validation::MetaValidation;
use crate::report::{AiInsights, InsightEngine, InsightError};
use crate::submission::{FinalizePayload, PassivePayload, SubmissionError, WebhookSink};

/// The two tabs of the original surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Assess,
    Report,
}

fn format_meta_fields(fields: &[MetaField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_keys(keys: &[&'static str]) -> String {
    keys.join(", ")
}

/// Error taxonomy of the report-generation and finalize flows. Nothing
/// here is fatal; every variant degrades to a user-visible message.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("report generation already in flight")]
    GenerationInFlight,
    #[error("final submission already in flight")]
    SubmissionInFlight,
    #[error("metadata incomplete: {}", format_meta_fields(.0))]
    MetaIncomplete(Vec<MetaField>),
    #[error("sections without diagnostic input: {}", format_keys(.0))]
    MinimumAuditThreshold(Vec<&'static str>),
    #[error(transparent)]
    Insight(#[from] InsightError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl SessionError {
    /// Blocking user-facing copy for each failure class, with quota
    /// exhaustion rendered distinctly from other insight failures.
    pub fn user_message(&self) -> String {
        match self {
            Self::GenerationInFlight => "Report synthesis already in progress.".to_string(),
            Self::SubmissionInFlight => "Archival already in progress.".to_string(),
            Self::MetaIncomplete(fields) => format!(
                "Strategic framework incomplete. Please ensure all corporate parameters \
                 are populated correctly. Missing or invalid: {}.",
                format_meta_fields(fields)
            ),
            Self::MinimumAuditThreshold(_) => "Minimum audit threshold not met. Please provide \
                 diagnostic input for every assessment domain."
                .to_string(),
            Self::Insight(InsightError::QuotaExceeded) => "Diagnostic engine busy: executive \
                 quota reached for this minute. Please wait 60 seconds and try again."
                .to_string(),
            Self::Insight(_) => "Diagnostic engine unavailable. Verify configuration and \
                 network connection."
                .to_string(),
            Self::Submission(_) => "Transmission failure.".to_string(),
        }
    }
}

/// Top-level controller owning the session state and the injected
/// components, so scoring, validation, and generation can each be tested
/// against constructed fixtures.
///
/// Single-threaded by design: the in-flight booleans guard against rapid
/// repeated triggers, not against true concurrency.
pub struct AssessmentSession<S, E, W>
where
    S: SnapshotStore,
    E: InsightEngine,
    W: WebhookSink + 'static,
{
    bank: QuestionBank,
    store: ResponseStore<S>,
    engine: E,
    sink: Arc<W>,
    insights: Option<AiInsights>,
    active_view: ActiveView,
    show_validation: bool,
    is_generating: bool,
    is_submitting: bool,
}

impl<S, E, W> AssessmentSession<S, E, W>
where
    S: SnapshotStore,
    E: InsightEngine,
    W: WebhookSink + 'static,
{
    pub fn new(bank: QuestionBank, snapshots: S, engine: E, sink: W) -> Self {
        Self {
            bank,
            store: ResponseStore::load_or_init(snapshots),
            engine,
            sink: Arc::new(sink),
            insights: None,
            active_view: ActiveView::Assess,
            show_validation: false,
            is_generating: false,
            is_submitting: false,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn state(&self) -> &AssessmentState {
        self.store.state()
    }

    pub fn insights(&self) -> Option<&AiInsights> {
        self.insights.as_ref()
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn set_meta_field(&mut self, field: MetaField, value: String) {
        self.store.set_meta_field(field, value);
    }

    pub fn set_answer(&mut self, question_id: &str, rating: u8) -> Result<(), AssessmentError> {
        self.store.set_answer(&self.bank, question_id, rating)
    }

    pub fn scores(&self) -> Vec<CategoryScore> {
        compute_scores(self.store.state(), &self.bank)
    }

    pub fn progress(&self) -> u8 {
        compute_progress(self.store.state(), &self.bank)
    }

    pub fn section_status(&self) -> Vec<SectionStatus> {
        section_status(self.store.state(), &self.bank)
    }

    pub fn meta_validation(&self) -> MetaValidation {
        MetaValidation::evaluate(&self.store.state().meta)
    }

    /// Discard all diagnostic data, including any received briefing.
    pub fn reset(&mut self) {
        self.store.reset();
        self.insights = None;
        self.active_view = ActiveView::Assess;
        self.show_validation = false;
    }

    /// Run the validation gate and, when it passes, issue exactly one
    /// insight request. On success the passive archive dispatch is fired
    /// as a detached task and the view transitions to the report.
    ///
    /// No network call is issued while metadata is invalid or any section
    /// is missing diagnostic input.
    pub async fn generate_report(&mut self) -> Result<&AiInsights, SessionError> {
        if self.is_generating {
            return Err(SessionError::GenerationInFlight);
        }
        self.show_validation = true;

        let validation = self.meta_validation();
        if !validation.is_valid() {
            return Err(SessionError::MetaIncomplete(validation.failed_fields()));
        }

        let silent_sections: Vec<&'static str> = self
            .section_status()
            .into_iter()
            .filter(|status| status.answered == 0)
            .map(|status| status.key)
            .collect();
        if !silent_sections.is_empty() {
            return Err(SessionError::MinimumAuditThreshold(silent_sections));
        }

        let scores = self.scores();

        self.is_generating = true;
        let result = self
            .engine
            .generate(&self.store.state().meta, &scores)
            .await;
        self.is_generating = false;

        let insights = result?;
        info!("executive insights received");

        // Archive telemetry must never block or fail the report flow:
        // detached task, errors logged, never surfaced, never retried.
        let payload = PassivePayload::from_session(self.store.state(), &scores, &insights);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(err) = sink.dispatch_passive(payload).await {
                warn!(error = %err, "passive archive dispatch failed");
            }
        });

        self.active_view = ActiveView::Report;
        Ok(self.insights.insert(insights))
    }

    /// Explicit user-triggered archival of the full state plus insights.
    /// Awaited; failure surfaces to the user and may be retried manually.
    pub async fn finalize_submission(&mut self) -> Result<(), SessionError> {
        if self.is_submitting {
            return Err(SessionError::SubmissionInFlight);
        }

        let payload = FinalizePayload {
            state: self.store.state().clone(),
            insights: self.insights.clone(),
        };

        self.is_submitting = true;
        let result = self.sink.finalize(payload).await;
        self.is_submitting = false;

        result?;
        info!("strategic audit archived");
        Ok(())
    }
}
