use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::assessment::domain::{AssessmentState, CategoryScore};
use crate::config::ArchiveConfig;
use crate::report::AiInsights;

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Flat payload posted to the archive webhook right after insights land.
#[derive(Debug, Clone, Serialize)]
pub struct PassivePayload {
    pub company: String,
    pub role: String,
    pub email: String,
    pub initiative: String,
    pub industry: String,
    pub scores: Vec<CategoryScore>,
    pub report: AiInsights,
}

impl PassivePayload {
    pub fn from_session(
        state: &AssessmentState,
        scores: &[CategoryScore],
        report: &AiInsights,
    ) -> Self {
        Self {
            company: state.meta.company_name.clone(),
            role: state.meta.respondent_role.clone(),
            email: state.meta.email.clone(),
            initiative: state.meta.initiative.clone(),
            industry: state.meta.industry.clone(),
            scores: scores.to_vec(),
            report: report.clone(),
        }
    }
}

/// Finalize payload: the full session state with the received insights
/// attached under `insights`.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizePayload {
    #[serde(flatten)]
    pub state: AssessmentState,
    pub insights: Option<AiInsights>,
}

/// Outbound archival hooks for the two webhook dispatches.
///
/// The passive dispatch is invoked from a detached task and its failures
/// are logged, never surfaced; only `finalize` failures reach the user.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn dispatch_passive(&self, payload: PassivePayload) -> Result<(), SubmissionError>;
    async fn finalize(&self, payload: FinalizePayload) -> Result<(), SubmissionError>;
}

/// Submission dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("finalize webhook not configured")]
    NotConfigured,
    #[error("webhook dispatch failed: {0}")]
    Transport(reqwest::Error),
    #[error("webhook endpoint returned status {0}")]
    Rejected(u16),
}

/// Webhook sink posting JSON to the configured archive endpoints.
pub struct ReqwestWebhookSink {
    client: reqwest::Client,
    passive_url: Option<String>,
    finalize_url: Option<String>,
}

impl ReqwestWebhookSink {
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .map_err(SubmissionError::Transport)?;

        Ok(Self {
            client,
            passive_url: config.passive_webhook_url.clone(),
            finalize_url: config.finalize_webhook_url.clone(),
        })
    }

    async fn post_json<T: Serialize>(&self, url: &str, payload: &T) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl WebhookSink for ReqwestWebhookSink {
    async fn dispatch_passive(&self, payload: PassivePayload) -> Result<(), SubmissionError> {
        match &self.passive_url {
            Some(url) => self.post_json(url, &payload).await,
            None => {
                debug!("passive webhook not configured, dispatch skipped");
                Ok(())
            }
        }
    }

    async fn finalize(&self, payload: FinalizePayload) -> Result<(), SubmissionError> {
        let url = self
            .finalize_url
            .as_deref()
            .ok_or(SubmissionError::NotConfigured)?;
        self.post_json(url, &payload).await
    }
}
