use super::domain::{Question, Section};
use std::collections::BTreeSet;

/// Immutable catalog of categorized questions grouped into sections.
///
/// Section order is declaration order and is preserved by every derived
/// view. Question ids are unique across the whole bank.
#[derive(Debug)]
pub struct QuestionBank {
    sections: Vec<Section>,
}

impl QuestionBank {
    pub fn standard() -> Self {
        let bank = Self {
            sections: standard_sections(),
        };
        debug_assert!(bank.ids_are_unique(), "question ids must be unique");
        bank
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn contains_question(&self, question_id: &str) -> bool {
        self.sections
            .iter()
            .any(|section| section.questions.iter().any(|q| q.id == question_id))
    }

    fn ids_are_unique(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .all(|question| seen.insert(question.id))
    }
}

/// Fixed industry options offered during engagement intake.
pub const INDUSTRIES: [&str; 11] = [
    "Government / Public Sector",
    "Energy / Utilities",
    "Telecom / Digital",
    "Banking / Financial Services",
    "Aviation / Transport",
    "Healthcare / Life Sciences",
    "Manufacturing / Industrial",
    "Retail / Consumer Goods",
    "Technology / SaaS",
    "Professional Services",
    "Other",
];

/// Fixed strategic initiative options offered during engagement intake.
pub const INITIATIVES: [&str; 8] = [
    "ERP Transformation (SAP/Oracle)",
    "AI Strategy & Implementation",
    "Global Shared Services",
    "Operating Model Redesign",
    "Digital Customer Experience",
    "Post-Merger Integration",
    "Organizational Restructuring",
    "Other",
];

fn question(id: &'static str, category: &'static str, text: &'static str) -> Question {
    Question { id, text, category }
}

fn standard_sections() -> Vec<Section> {
    vec![
        Section {
            key: "corp",
            badge: "A",
            title: "Corporate Strategy",
            description: "Clarity of direction, priority stability, leadership interpretation, strategic tradeoffs.",
            questions: vec![
                question("q1", "corp", "Does the executive team have a unified, 5-year vision that goes beyond simple financial growth targets?"),
                question("q2", "corp", "Are your top strategic priorities stable for at least 12 months without being derailed by short-term crises?"),
                question("q3", "corp", "If you asked 5 different executives to define 'success' for this year, would their answers be identical?"),
                question("q4", "corp", "Can leadership clearly list activities or business lines the organization has intentionally stopped doing to save focus?"),
                question("q5", "corp", "Are new project investments strictly vetted against a strategic scorecard rather than 'who screams the loudest'?"),
                question("q6", "corp", "Does your strategy define a unique competitive advantage that competitors cannot easily copy?"),
            ],
        },
        Section {
            key: "biz",
            badge: "B",
            title: "Business Strategy",
            description: "Functional alignment, enterprise optimization, shared ownership, value proposition alignment.",
            questions: vec![
                question("q9", "biz", "Do department heads understand exactly how their specific team's work drives the CEO's top goals?"),
                question("q10", "biz", "Do departments frequently sacrifice their own 'local' budget or speed for the benefit of the whole company?"),
                question("q11", "biz", "Are the strategies for IT, HR, and Sales developed together in a single room rather than in silos?"),
                question("q12", "biz", "Are KPIs tailored to the unique nature of each business unit rather than being generic across the board?"),
                question("q13", "biz", "Do cross-functional projects have a single 'owner' who can make decisions across all involved departments?"),
                question("q14", "biz", "Is there absolute agreement across the board on who your 'ideal customer' actually is?"),
            ],
        },
        Section {
            key: "opmodel",
            badge: "C",
            title: "Operating Model",
            description: "Decision rights, governance forums, process design, escalation logic, ways of working.",
            questions: vec![
                question("q17", "opmodel", "Do individuals have the formal authority to approve spending and hire/fire within their own scope of responsibility?"),
                question("q18", "opmodel", "Are executive meetings focused on making hard decisions rather than just reviewing status update slides?"),
                question("q19", "opmodel", "Are your core business processes built around the 'customer journey' rather than 'departmental boundaries'?"),
                question("q20", "opmodel", "Do bonuses and performance reviews reward collaborative behavior across teams?"),
                question("q21", "opmodel", "Is there a documented 'Target Operating Model' that everyone refers to as the source of truth?"),
                question("q23", "opmodel", "When a project hits a wall, is there a 24-hour path to get a definitive 'Yes' or 'No' from a senior leader?"),
                question("q24", "opmodel", "Are there more active initiatives than the organization realistically has capacity to execute?"),
            ],
        },
        Section {
            key: "exec",
            badge: "D",
            title: "Execution Behavior",
            description: "Daily behavior, reinforcement routines, adoption measurement, resistance handling.",
            questions: vec![
                question("q25", "exec", "Could a front-line employee explain how their work today impacts the company's 5-year vision?"),
                question("q26", "exec", "Do senior leaders visibly use the new tools and follow the new processes they are asking others to use?"),
                question("q27", "exec", "Do middle managers spend at least 20% of their time coaching their teams on new behaviors?"),
                question("q28", "exec", "Has the company formally 'killed' old tasks to make room for new transformation activities?"),
                question("q30", "exec", "Do you measure success based on 'behavioral change' (adoption) rather than just 'going live'?"),
                question("q31", "exec", "Is 'healthy dissent' encouraged in meetings, or do people stay quiet when they see a problem?"),
                question("q32", "exec", "Do employees face negative consequences for not following the new way of working?"),
            ],
        },
        Section {
            key: "tech",
            badge: "E",
            title: "Technology & AI Integration",
            description: "Whether systems and AI actively drive work or only document activity.",
            questions: vec![
                question("q33", "tech", "Are your daily workflows hard-coded into your core systems, making it impossible to skip mandatory steps?"),
                question("q34", "tech", "Do managers rely on real-time system dashboards to lead teams rather than manual Excel trackers?"),
                question("q35", "tech", "Is AI used to automate decision-making logic rather than just being used for writing or summarizing text?"),
                question("q36", "tech", "Do systems automatically flag performance deviations without needing a human to find the error first?"),
                question("q37", "tech", "Are customer data and operational data connected in a single system that provides a 360-degree view?"),
                question("q38", "tech", "Has the organization retired legacy systems that no longer align with the modern operating model?"),
                question("q39", "tech", "Do employees maintain parallel manual trackers because they do not trust system data?"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_five_sections_in_declared_order() {
        let bank = QuestionBank::standard();
        let keys: Vec<&str> = bank.sections().iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["corp", "biz", "opmodel", "exec", "tech"]);
    }

    #[test]
    fn question_ids_are_unique_across_the_bank() {
        let bank = QuestionBank::standard();
        let mut seen = std::collections::BTreeSet::new();
        for section in bank.sections() {
            for q in &section.questions {
                assert!(seen.insert(q.id), "duplicate question id {}", q.id);
                assert_eq!(q.category, section.key);
            }
        }
        assert_eq!(seen.len(), bank.total_questions());
    }

    #[test]
    fn lookup_distinguishes_known_and_unknown_ids() {
        let bank = QuestionBank::standard();
        assert!(bank.contains_question("q1"));
        assert!(bank.contains_question("q39"));
        // Ids the catalog intentionally skips stay unknown.
        assert!(!bank.contains_question("q7"));
        assert!(!bank.contains_question("q22"));
        assert!(!bank.contains_question("q40"));
    }
}
