use super::bank::QuestionBank;
use super::domain::{AssessmentError, AssessmentState, MetaField};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Storage abstraction over the single persisted snapshot so the store can
/// be exercised against fixtures.
///
/// The snapshot is one opaque blob under one key; last writer wins and no
/// cross-session coordination is attempted.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, SnapshotError>;
    fn save(&self, raw: &str) -> Result<(), SnapshotError>;
    fn clear(&self) -> Result<(), SnapshotError>;
}

/// Error enumeration for snapshot persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot read failed: {0}")]
    Read(std::io::Error),
    #[error("snapshot write failed: {0}")]
    Write(std::io::Error),
}

/// JSON-file snapshot store: the session's counterpart to a single
/// local-storage key.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotError::Read(err)),
        }
    }

    fn save(&self, raw: &str) -> Result<(), SnapshotError> {
        fs::write(&self.path, raw).map_err(SnapshotError::Write)
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SnapshotError::Write(err)),
        }
    }
}

/// In-memory snapshot store for unit and integration fixtures.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    blob: Mutex<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(raw.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.blob.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, SnapshotError> {
        Ok(self.blob.lock().map(|guard| guard.clone()).unwrap_or(None))
    }

    fn save(&self, raw: &str) -> Result<(), SnapshotError> {
        if let Ok(mut guard) = self.blob.lock() {
            *guard = Some(raw.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        if let Ok(mut guard) = self.blob.lock() {
            *guard = None;
        }
        Ok(())
    }
}

/// Holds the in-progress answers and engagement metadata, persisting the
/// full state write-through after every mutation.
///
/// Persistence failures on write are logged and swallowed: the session
/// keeps its in-memory state authoritative and must never crash over the
/// side channel. A missing or unparsable snapshot on load falls open to
/// the default state.
#[derive(Debug)]
pub struct ResponseStore<S: SnapshotStore> {
    state: AssessmentState,
    snapshots: S,
}

impl<S: SnapshotStore> ResponseStore<S> {
    /// Restore the last persisted state, or start fresh when nothing
    /// usable is stored.
    pub fn load_or_init(snapshots: S) -> Self {
        let state = match snapshots.load() {
            Ok(Some(raw)) => match serde_json::from_str::<AssessmentState>(&raw) {
                Ok(state) => state,
                Err(err) => {
                    warn!(error = %err, "persisted snapshot unparsable, resetting to default");
                    AssessmentState::new_for_today()
                }
            },
            Ok(None) => AssessmentState::new_for_today(),
            Err(err) => {
                warn!(error = %err, "snapshot load failed, resetting to default");
                AssessmentState::new_for_today()
            }
        };

        Self { state, snapshots }
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Overwrite one metadata field. Validation is deferred to the gate.
    pub fn set_meta_field(&mut self, field: MetaField, value: String) {
        self.state.meta.set_field(field, value);
        self.persist();
    }

    /// Record a rating for a question, overwriting any prior rating.
    ///
    /// The intake surface constrains both arguments by construction; the
    /// library re-checks them at the API edge.
    pub fn set_answer(
        &mut self,
        bank: &QuestionBank,
        question_id: &str,
        rating: u8,
    ) -> Result<(), AssessmentError> {
        if !(1..=5).contains(&rating) {
            return Err(AssessmentError::InvalidRating(rating));
        }
        if !bank.contains_question(question_id) {
            return Err(AssessmentError::UnknownQuestion(question_id.to_owned()));
        }

        self.state.answers.insert(question_id.to_owned(), rating);
        self.persist();
        Ok(())
    }

    /// Discard all diagnostic data and return to the default state.
    pub fn reset(&mut self) {
        self.state = AssessmentState::new_for_today();
        if let Err(err) = self.snapshots.clear() {
            warn!(error = %err, "failed to clear persisted snapshot");
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.state) {
            Ok(raw) => {
                if let Err(err) = self.snapshots.save(&raw) {
                    warn!(error = %err, "snapshot persist failed, in-memory state kept");
                } else {
                    debug!("snapshot persisted");
                }
            }
            Err(err) => warn!(error = %err, "snapshot serialization failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_snapshot_falls_open_to_default() {
        let store = ResponseStore::load_or_init(InMemorySnapshotStore::with_blob("{not json"));
        assert!(store.state().answers.is_empty());
        assert!(store.state().meta.company_name.is_empty());
    }

    #[test]
    fn answers_persist_write_through() {
        let bank = QuestionBank::standard();
        let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
        store.set_answer(&bank, "q1", 4).expect("valid answer");

        let raw = store.snapshots.snapshot().expect("snapshot written");
        let reloaded: AssessmentState = serde_json::from_str(&raw).expect("snapshot parses");
        assert_eq!(reloaded.answers.get("q1"), Some(&4));
    }

    #[test]
    fn answers_are_idempotently_overwritten() {
        let bank = QuestionBank::standard();
        let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
        store.set_answer(&bank, "q1", 2).expect("first rating");
        store.set_answer(&bank, "q1", 5).expect("overwrite rating");
        assert_eq!(store.state().answers.get("q1"), Some(&5));
        assert_eq!(store.state().answers.len(), 1);
    }

    #[test]
    fn rejects_out_of_scale_rating_and_unknown_id() {
        let bank = QuestionBank::standard();
        let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());

        match store.set_answer(&bank, "q1", 0) {
            Err(AssessmentError::InvalidRating(0)) => {}
            other => panic!("expected invalid rating, got {other:?}"),
        }
        match store.set_answer(&bank, "q7", 3) {
            Err(AssessmentError::UnknownQuestion(id)) => assert_eq!(id, "q7"),
            other => panic!("expected unknown question, got {other:?}"),
        }
        assert!(store.state().answers.is_empty());
    }

    #[test]
    fn reset_clears_state_and_snapshot() {
        let bank = QuestionBank::standard();
        let mut store = ResponseStore::load_or_init(InMemorySnapshotStore::new());
        store.set_answer(&bank, "q1", 3).expect("valid answer");
        store.set_meta_field(MetaField::CompanyName, "Acme Corp".to_string());

        store.reset();
        assert!(store.state().answers.is_empty());
        assert!(store.state().meta.company_name.is_empty());
        assert!(store.snapshots.snapshot().is_none());
    }
}
