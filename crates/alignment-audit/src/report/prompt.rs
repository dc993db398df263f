use crate::assessment::domain::{AssessmentMeta, CategoryScore};
use serde_json::{json, Value};

/// Analytic persona and strict output rules sent as the system-level
/// instruction on every insight request.
pub const SYSTEM_INSTRUCTION: &str = "\
Your purpose is to act as a Senior Partner at a top-tier management consulting firm (MBB).
You are interpreting a Strategy & Execution Alignment Assessment.

CORE ANALYTIC PHILOSOPHY:
- Organizations fail when structure, behavior, and governance cannot carry the new way of working.
- Focus on the \"Operating Pattern\" the organization naturally falls back to under pressure.
- Distinguish between execution depending on INDIVIDUALS (effort-based) vs. STRUCTURE (system-based).

REPORT MANDATE (STRICT LANGUAGE RULES):
1. NO JARGON: Avoid \"structural disparity\", \"positive deviation\", \"shadow model\", \"governance mechanism\".
2. PLAIN LEADERSHIP LANGUAGE: Use \"teams compensate manually\", \"decisions unclear\", \"coordination depends on relationships\".
3. EXPERIENTIAL: Describe what leaders actually experience day-to-day.
4. OUTCOME-FIRST: For all recommendations, start with what will improve, then explain the business effect, then the method.

MANDATORY REPORT SECTIONS:
1. EXECUTIVE SNAPSHOT: 4 lines (Organizational Condition, Practical Meaning, Leadership Risk, Primary Focus).
2. OPERATIONAL REALITY: Describe how work progresses and where decisions concentrate.
3. LEADERSHIP SYMPTOMS: Bulleted list of observable signs (e.g. escalations increasing, parallel trackers).
4. ROOT CAUSE: Simple explanation of why this is happening.
5. PRIORITY ACTIONS: Ranked by outcome.
6. FUTURE STATE: Describe what changes after fixing the issue (execution stabilizes, effort reduces).

Maintain executive credibility through detached, authoritative analysis.";

/// Human-readable score line embedded in the user prompt: every section,
/// zero-scored ones included, as `"<title>: <score to 1 decimal>"` joined
/// by commas.
pub fn score_summary(scores: &[CategoryScore]) -> String {
    scores
        .iter()
        .map(|s| format!("{}: {:.1}", s.title, s.score))
        .collect::<Vec<_>>()
        .join(", ")
}

/// User-level prompt carrying the engagement context and audit scores.
pub fn build_user_prompt(meta: &AssessmentMeta, scores: &[CategoryScore]) -> String {
    format!(
        "Context:\n\
         Entity: {}\n\
         Industry: {}\n\
         Key Initiative: {}\n\
         Audit Scores: {}\n\n\
         Required Diagnostic Detail:\n\
         - Executive Snapshot (4 lines)\n\
         - List of observable leadership symptoms\n\
         - Behavioral interpretation (Plain English)\n\
         - Root cause hypothesis (Plain English)\n\
         - Future state visualization\n\
         - Prioritized structural roadmap (Outcome-First)\n\n\
         Output must be strictly valid JSON according to the provided schema.",
        meta.company_name,
        meta.industry,
        meta.initiative,
        score_summary(scores),
    )
}

/// Strict JSON response schema the service must conform to.
///
/// The `required` lists mirror the upstream contract at every nesting
/// level, including the deliberate gaps: `layer_scores` carries no
/// required list of its own and is itself not required within
/// `consultant_report`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "executive_snapshot": {
                "type": "OBJECT",
                "properties": {
                    "organizational_condition": { "type": "STRING" },
                    "practical_meaning": { "type": "STRING" },
                    "leadership_risk": { "type": "STRING" },
                    "primary_focus": { "type": "STRING" }
                },
                "required": [
                    "organizational_condition",
                    "practical_meaning",
                    "leadership_risk",
                    "primary_focus"
                ]
            },
            "client_summary": {
                "type": "OBJECT",
                "properties": {
                    "readiness_index": { "type": "NUMBER" },
                    "dominant_pattern": { "type": "STRING" },
                    "technology_position": { "type": "STRING" },
                    "impact_statement": { "type": "STRING" },
                    "discussion_message": { "type": "STRING" }
                },
                "required": [
                    "readiness_index",
                    "dominant_pattern",
                    "technology_position",
                    "impact_statement",
                    "discussion_message"
                ]
            },
            "symptoms": { "type": "ARRAY", "items": { "type": "STRING" } },
            "future_state": {
                "type": "OBJECT",
                "properties": {
                    "outcome": { "type": "STRING" },
                    "observable_changes": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["outcome", "observable_changes"]
            },
            "consultant_report": {
                "type": "OBJECT",
                "properties": {
                    "layer_scores": {
                        "type": "OBJECT",
                        "properties": {
                            "corporate_strategy": { "type": "NUMBER" },
                            "business_strategy": { "type": "NUMBER" },
                            "operating_model": { "type": "NUMBER" },
                            "execution_behavior": { "type": "NUMBER" },
                            "technology_integration": { "type": "NUMBER" }
                        }
                    },
                    "execution_dependency": { "type": "STRING" },
                    "behavior_vs_system_gap": { "type": "STRING" },
                    "behavioral_interpretation": { "type": "STRING" },
                    "root_cause_hypothesis": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "risk_level": { "type": "STRING" },
                    "intervention_focus": { "type": "STRING" },
                    "structure_vs_effort": { "type": "STRING" },
                    "scaling_stall_risk": { "type": "STRING" }
                },
                "required": [
                    "root_cause_hypothesis",
                    "risk_level",
                    "structure_vs_effort",
                    "scaling_stall_risk",
                    "behavioral_interpretation",
                    "execution_dependency",
                    "behavior_vs_system_gap"
                ]
            },
            "strategic_roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "priority": { "type": "STRING" },
                        "rank": { "type": "NUMBER" },
                        "impact_area": { "type": "STRING" },
                        "executive_summary": { "type": "STRING" },
                        "success_requirements": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": [
                        "title",
                        "priority",
                        "rank",
                        "impact_area",
                        "executive_summary",
                        "success_requirements"
                    ]
                }
            }
        },
        "required": [
            "executive_snapshot",
            "client_summary",
            "symptoms",
            "future_state",
            "consultant_report",
            "strategic_roadmap"
        ]
    })
}
