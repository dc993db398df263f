use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::prompt::{build_user_prompt, response_schema, SYSTEM_INSTRUCTION};
use super::schema::{decode_insights, AiInsights};
use super::InsightError;
use crate::assessment::domain::{AssessmentMeta, CategoryScore};
use crate::config::InsightConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gateway to the external narrative-generation service.
///
/// One request per call: no caching, no memoization, no client-side retry.
#[async_trait]
pub trait InsightEngine: Send + Sync {
    async fn generate(
        &self,
        meta: &AssessmentMeta,
        scores: &[CategoryScore],
    ) -> Result<AiInsights, InsightError>;
}

#[derive(Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentPayload,
    contents: Vec<ContentPayload>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ContentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Insight engine backed by the Gemini `generateContent` endpoint.
pub struct GeminiInsightEngine {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiInsightEngine {
    pub fn from_config(config: &InsightConfig) -> Result<Self, InsightError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(InsightError::MissingCredential)?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(InsightError::Transport)?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model)
    }

    fn build_request(&self, meta: &AssessmentMeta, scores: &[CategoryScore]) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: ContentPayload {
                role: None,
                parts: vec![TextPart {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![ContentPayload {
                role: Some("user"),
                parts: vec![TextPart {
                    text: build_user_prompt(meta, scores),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        }
    }
}

fn quota_flavored(detail: &str) -> bool {
    detail.to_lowercase().contains("quota") || detail.contains("429")
}

fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl InsightEngine for GeminiInsightEngine {
    async fn generate(
        &self,
        meta: &AssessmentMeta,
        scores: &[CategoryScore],
    ) -> Result<AiInsights, InsightError> {
        let body = self.build_request(meta, scores);

        debug!(model = %self.model, "requesting executive insights");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(InsightError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 || quota_flavored(&detail) {
                return Err(InsightError::QuotaExceeded);
            }
            return Err(InsightError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(InsightError::Transport)?;

        let text = first_candidate_text(parsed).ok_or(InsightError::EmptyResponse)?;
        decode_insights(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_list_yields_no_text() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert!(first_candidate_text(response).is_none());
    }

    #[test]
    fn blank_candidate_text_counts_as_empty() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some("   ".to_string()),
                    }],
                }),
            }],
        };
        assert!(first_candidate_text(response).is_none());
    }

    #[test]
    fn quota_detection_matches_rate_limit_flavors() {
        assert!(quota_flavored("Quota exceeded for quota metric"));
        assert!(quota_flavored("error 429: resource exhausted"));
        assert!(!quota_flavored("internal error"));
    }
}
