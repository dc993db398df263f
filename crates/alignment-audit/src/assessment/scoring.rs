use super::bank::QuestionBank;
use super::domain::{AssessmentState, CategoryScore, RiskLevel, SectionStatus};

/// Derive one score per section, preserving section declaration order.
///
/// A section with no recorded answers scores `0.0`, a "no data" sentinel
/// outside the 1-5 rating scale: any section with at least one answer
/// averages >= 1.0, so the two cases never collide. Missing answers are
/// ignored entirely, with no imputation.
pub fn compute_scores(state: &AssessmentState, bank: &QuestionBank) -> Vec<CategoryScore> {
    bank.sections()
        .iter()
        .map(|section| {
            let ratings: Vec<u8> = section
                .questions
                .iter()
                .filter_map(|q| state.answers.get(q.id).copied())
                .collect();

            let score = if ratings.is_empty() {
                0.0
            } else {
                f64::from(ratings.iter().map(|r| u32::from(*r)).sum::<u32>())
                    / ratings.len() as f64
            };

            CategoryScore {
                key: section.key,
                title: section.title,
                score,
                risk_level: RiskLevel::from_score(score),
                description: section.description,
            }
        })
        .collect()
}

/// Overall completion percentage across the whole bank, rounded to the
/// nearest integer. The bank is statically non-empty.
pub fn compute_progress(state: &AssessmentState, bank: &QuestionBank) -> u8 {
    let total = bank.total_questions();
    let answered = state.answers.len();
    ((answered as f64 / total as f64) * 100.0).round() as u8
}

/// Per-section completion counters, in section declaration order.
pub fn section_status(state: &AssessmentState, bank: &QuestionBank) -> Vec<SectionStatus> {
    bank.sections()
        .iter()
        .map(|section| {
            let answered = section
                .questions
                .iter()
                .filter(|q| state.answers.contains_key(q.id))
                .count();
            let total = section.questions.len();

            SectionStatus {
                key: section.key,
                title: section.title,
                total,
                answered,
                remaining: total - answered,
                is_complete: answered == total,
            }
        })
        .collect()
}
