use super::domain::{AssessmentMeta, MetaField};
use regex::Regex;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Standard local@domain.tld shape; anything stricter is the mail
        // provider's problem.
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|err| panic!("email pattern is a valid regex: {err}"))
    })
}

/// Result of evaluating the six metadata predicates.
///
/// `industry` and `initiative` are only checked for non-blankness here;
/// the intake surface constrains them to the published option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaValidation {
    pub company_name: bool,
    pub respondent_role: bool,
    pub email: bool,
    pub mobile: bool,
    pub industry: bool,
    pub initiative: bool,
}

impl MetaValidation {
    pub fn evaluate(meta: &AssessmentMeta) -> Self {
        let mobile = meta.mobile.trim();
        Self {
            company_name: !meta.company_name.trim().is_empty(),
            respondent_role: !meta.respondent_role.trim().is_empty(),
            email: email_pattern().is_match(meta.email.trim()),
            // Coarse E.164-flavored check, not full phone validation.
            mobile: mobile.starts_with('+') && mobile.len() >= 10,
            industry: !meta.industry.trim().is_empty(),
            initiative: !meta.initiative.trim().is_empty(),
        }
    }

    /// True only when all six predicates pass.
    pub fn is_valid(&self) -> bool {
        self.company_name
            && self.respondent_role
            && self.email
            && self.mobile
            && self.industry
            && self.initiative
    }

    /// Fields that failed, in intake display order, for user-facing
    /// feedback.
    pub fn failed_fields(&self) -> Vec<MetaField> {
        let checks = [
            (MetaField::CompanyName, self.company_name),
            (MetaField::Industry, self.industry),
            (MetaField::Initiative, self.initiative),
            (MetaField::RespondentRole, self.respondent_role),
            (MetaField::Email, self.email),
            (MetaField::Mobile, self.mobile),
        ];
        checks
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(field, _)| field)
            .collect()
    }
}
