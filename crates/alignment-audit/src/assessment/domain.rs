use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Qualitative band derived from a section's average rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Minor,
    Ready,
}

impl RiskLevel {
    /// Total, monotonic mapping from a score in `[0, 5]` to a band.
    ///
    /// A section with no recorded answers scores `0.0`, which lands in
    /// `Critical`; callers distinguish "no data" through the section
    /// status, not through the band.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.2 {
            Self::Ready
        } else if score >= 3.4 {
            Self::Minor
        } else if score >= 2.6 {
            Self::Moderate
        } else if score >= 1.8 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
            Self::Ready => "Ready",
        }
    }
}

/// Single Likert-scale prompt within an assessment domain.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
}

/// Named grouping of related questions representing one assessment domain.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub key: &'static str,
    pub badge: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: Vec<Question>,
}

/// Metadata fields editable during engagement intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    CompanyName,
    Industry,
    Initiative,
    RespondentRole,
    Email,
    Mobile,
}

impl MetaField {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::CompanyName,
            Self::Industry,
            Self::Initiative,
            Self::RespondentRole,
            Self::Email,
            Self::Mobile,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company / Organization",
            Self::Industry => "Industry Vertical",
            Self::Initiative => "Strategic Initiative",
            Self::RespondentRole => "Lead Executive Title",
            Self::Email => "Corporate Business Email",
            Self::Mobile => "Mobile (Incl. + Country Code)",
        }
    }
}

/// Engagement metadata captured alongside the questionnaire answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMeta {
    pub company_name: String,
    pub industry: String,
    pub initiative: String,
    pub respondent_role: String,
    pub email: String,
    pub mobile: String,
    pub date: String,
}

impl AssessmentMeta {
    /// Blank metadata stamped with today's date, matching a fresh session.
    pub fn blank_for_today() -> Self {
        Self {
            company_name: String::new(),
            industry: String::new(),
            initiative: String::new(),
            respondent_role: String::new(),
            email: String::new(),
            mobile: String::new(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn field(&self, field: MetaField) -> &str {
        match field {
            MetaField::CompanyName => &self.company_name,
            MetaField::Industry => &self.industry,
            MetaField::Initiative => &self.initiative,
            MetaField::RespondentRole => &self.respondent_role,
            MetaField::Email => &self.email,
            MetaField::Mobile => &self.mobile,
        }
    }

    pub fn set_field(&mut self, field: MetaField, value: String) {
        match field {
            MetaField::CompanyName => self.company_name = value,
            MetaField::Industry => self.industry = value,
            MetaField::Initiative => self.initiative = value,
            MetaField::RespondentRole => self.respondent_role = value,
            MetaField::Email => self.email = value,
            MetaField::Mobile => self.mobile = value,
        }
    }
}

/// The single unit of persisted session state: metadata plus the
/// question-id → rating map. Answers are overwritten idempotently and
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentState {
    pub meta: AssessmentMeta,
    pub answers: BTreeMap<String, u8>,
}

impl AssessmentState {
    pub fn new_for_today() -> Self {
        Self {
            meta: AssessmentMeta::blank_for_today(),
            answers: BTreeMap::new(),
        }
    }
}

/// Derived per-section score; recomputed on every read, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub key: &'static str,
    pub title: &'static str,
    pub score: f64,
    pub risk_level: RiskLevel,
    pub description: &'static str,
}

/// Per-section completion counters used for gating and progress display.
#[derive(Debug, Clone, Serialize)]
pub struct SectionStatus {
    pub key: &'static str,
    pub title: &'static str,
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Error raised when an answer fails the edge checks the original intake
/// surface enforced by construction.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("question with id {0} not found in the bank")]
    UnknownQuestion(String),
    #[error("rating {0} outside the 1-5 scale")]
    InvalidRating(u8),
}
