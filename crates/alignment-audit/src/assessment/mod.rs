pub mod bank;
pub mod domain;
pub mod scoring;
pub mod store;
pub mod validation;

pub use bank::{QuestionBank, INDUSTRIES, INITIATIVES};
pub use domain::{
    AssessmentError, AssessmentMeta, AssessmentState, CategoryScore, MetaField, Question,
    RiskLevel, Section, SectionStatus,
};
pub use store::{InMemorySnapshotStore, JsonFileStore, ResponseStore, SnapshotError, SnapshotStore};
pub use validation::MetaValidation;
