use serde::{Deserialize, Serialize};

use super::InsightError;

/// Four-line leadership summary opening the briefing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSnapshot {
    pub organizational_condition: String,
    pub practical_meaning: String,
    pub leadership_risk: String,
    pub primary_focus: String,
}

/// How technology currently functions inside the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechnologyPosition {
    Enabler,
    #[serde(rename = "Support Tool")]
    SupportTool,
    #[serde(rename = "Administrative Tool")]
    AdministrativeTool,
    #[serde(rename = "Unused Potential")]
    UnusedPotential,
}

impl TechnologyPosition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enabler => "Enabler",
            Self::SupportTool => "Support Tool",
            Self::AdministrativeTool => "Administrative Tool",
            Self::UnusedPotential => "Unused Potential",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    /// Externally generated summary score, independent of the locally
    /// computed per-section averages.
    pub readiness_index: f64,
    pub dominant_pattern: String,
    pub technology_position: TechnologyPosition,
    pub impact_statement: String,
    pub discussion_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureState {
    pub outcome: String,
    pub observable_changes: Vec<String>,
}

/// Per-layer scores inside the consultant view. The service schema marks
/// none of these required, so absent numbers default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerScores {
    #[serde(default)]
    pub corporate_strategy: f64,
    #[serde(default)]
    pub business_strategy: f64,
    #[serde(default)]
    pub operating_model: f64,
    #[serde(default)]
    pub execution_behavior: f64,
    #[serde(default)]
    pub technology_integration: f64,
}

/// Overall risk call in the consultant view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportRiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Consultant-facing diagnostic detail.
///
/// `layer_scores` is optional while its siblings are required; the
/// upstream schema carries that asymmetry and it is preserved here rather
/// than normalized away. `intervention_focus` is likewise absent from the
/// schema's required list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_scores: Option<LayerScores>,
    pub execution_dependency: String,
    pub behavior_vs_system_gap: String,
    pub behavioral_interpretation: String,
    pub root_cause_hypothesis: Vec<String>,
    pub risk_level: ReportRiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_focus: Option<String>,
    pub structure_vs_effort: String,
    pub scaling_stall_risk: String,
}

/// Priority call on a roadmap initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitiativePriority {
    Critical,
    High,
    Medium,
}

impl InitiativePriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

/// Ranked, prioritized recommended action returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicInitiative {
    pub title: String,
    pub priority: InitiativePriority,
    pub rank: u32,
    pub impact_area: String,
    pub executive_summary: String,
    pub success_requirements: Vec<String>,
}

/// The fixed-shape narrative briefing received whole from the insight
/// service. Validated on decode, then treated as opaque: nothing in it is
/// further computed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiInsights {
    pub executive_snapshot: ExecutiveSnapshot,
    pub client_summary: ClientSummary,
    pub symptoms: Vec<String>,
    pub future_state: FutureState,
    pub consultant_report: ConsultantReport,
    pub strategic_roadmap: Vec<StrategicInitiative>,
}

impl AiInsights {
    /// Roadmap initiatives in rank order, lowest rank first.
    pub fn roadmap_by_rank(&self) -> Vec<&StrategicInitiative> {
        let mut ordered: Vec<&StrategicInitiative> = self.strategic_roadmap.iter().collect();
        ordered.sort_by_key(|initiative| initiative.rank);
        ordered
    }
}

/// Decode the raw model text into the typed briefing.
///
/// An external payload is never trusted by assertion: a missing or
/// malformed field surfaces as a decoding error naming the offender
/// instead of an undefined value downstream.
pub fn decode_insights(raw: &str) -> Result<AiInsights, InsightError> {
    serde_json::from_str(raw).map_err(|err| InsightError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> serde_json::Value {
        serde_json::json!({
            "executive_snapshot": {
                "organizational_condition": "Execution depends on individual effort.",
                "practical_meaning": "Teams compensate manually for unclear decisions.",
                "leadership_risk": "Escalations keep increasing.",
                "primary_focus": "Decision rights"
            },
            "client_summary": {
                "readiness_index": 62.0,
                "dominant_pattern": "Effort-based execution",
                "technology_position": "Support Tool",
                "impact_statement": "Coordination depends on relationships.",
                "discussion_message": "Start with decision clarity."
            },
            "symptoms": ["Parallel trackers", "Escalations increasing"],
            "future_state": {
                "outcome": "Execution stabilizes and effort reduces.",
                "observable_changes": ["Fewer escalations", "Decisions land in 24 hours"]
            },
            "consultant_report": {
                "layer_scores": {
                    "corporate_strategy": 3.2,
                    "business_strategy": 2.8,
                    "operating_model": 2.1,
                    "execution_behavior": 2.5,
                    "technology_integration": 1.9
                },
                "execution_dependency": "Individuals",
                "behavior_vs_system_gap": "Processes exist, behavior bypasses them.",
                "behavioral_interpretation": "People route around unclear ownership.",
                "root_cause_hypothesis": ["Decision rights undefined"],
                "risk_level": "High",
                "intervention_focus": "Operating model",
                "structure_vs_effort": "Effort-carried",
                "scaling_stall_risk": "High at next growth step"
            },
            "strategic_roadmap": [{
                "title": "Clarify decision rights",
                "priority": "Critical",
                "rank": 1,
                "impact_area": "Operating Model",
                "executive_summary": "Decisions land faster; escalations drop.",
                "success_requirements": ["Published decision matrix"]
            }]
        })
    }

    #[test]
    fn decodes_complete_payload() {
        let raw = full_payload().to_string();
        let insights = decode_insights(&raw).expect("payload decodes");
        assert_eq!(insights.symptoms.len(), 2);
        assert_eq!(
            insights.client_summary.technology_position,
            TechnologyPosition::SupportTool
        );
        assert_eq!(
            insights.consultant_report.risk_level,
            ReportRiskLevel::High
        );
        assert_eq!(insights.strategic_roadmap[0].rank, 1);
    }

    #[test]
    fn missing_required_field_names_the_offender() {
        let mut payload = full_payload();
        payload["client_summary"]
            .as_object_mut()
            .expect("client summary object")
            .remove("readiness_index");

        match decode_insights(&payload.to_string()) {
            Err(InsightError::Decode(detail)) => {
                assert!(detail.contains("readiness_index"), "detail: {detail}")
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn layer_scores_and_intervention_focus_may_be_absent() {
        let mut payload = full_payload();
        let report = payload["consultant_report"]
            .as_object_mut()
            .expect("consultant report object");
        report.remove("layer_scores");
        report.remove("intervention_focus");

        let insights = decode_insights(&payload.to_string()).expect("payload decodes");
        assert!(insights.consultant_report.layer_scores.is_none());
        assert!(insights.consultant_report.intervention_focus.is_none());
    }

    #[test]
    fn syntactically_invalid_text_is_a_decode_error() {
        match decode_insights("the model ignored the schema") {
            Err(InsightError::Decode(_)) => {}
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn roadmap_orders_by_rank() {
        let mut payload = full_payload();
        let roadmap = payload["strategic_roadmap"]
            .as_array_mut()
            .expect("roadmap array");
        let mut second = roadmap[0].clone();
        second["rank"] = serde_json::json!(3);
        second["title"] = serde_json::json!("Later initiative");
        roadmap.insert(0, second);

        let insights = decode_insights(&payload.to_string()).expect("payload decodes");
        let ordered = insights.roadmap_by_rank();
        assert_eq!(ordered[0].title, "Clarify decision rights");
        assert_eq!(ordered[1].title, "Later initiative");
    }
}
