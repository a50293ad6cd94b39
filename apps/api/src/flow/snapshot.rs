//! Flow-state snapshots — explicit save/load of an in-progress interview so
//! the embedding client can offer "resume or discard" on next launch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flow::{FlowController, FlowError, FlowState, MAX_COUNTDOWN_SECS};
use crate::models::session::{Candidate, Session};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Serialized form of an in-progress interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub candidate: Candidate,
    pub session: Session,
    pub index: usize,
    pub remaining: u32,
}

impl FlowSnapshot {
    /// An incomplete snapshot is one whose session never finished; completed
    /// ones are stale leftovers and not worth resuming.
    pub fn is_incomplete(&self) -> bool {
        self.session.completed_at.is_none()
    }
}

impl FlowController {
    /// Captures the current in-progress question for later restore. Only
    /// `InProgress` is snapshotted: earlier states hold nothing worth
    /// resuming and later ones are already final.
    pub fn snapshot(&self) -> Option<FlowSnapshot> {
        let FlowState::InProgress { index } = *self.state() else {
            return None;
        };
        let session = self.session()?.clone();
        Some(FlowSnapshot {
            candidate: session.candidate.clone(),
            session,
            index,
            remaining: self.remaining_secs(),
        })
    }

    /// Rebuilds a controller from a snapshot. The countdown restarts from the
    /// current question's clamped time limit, not the saved remainder.
    pub fn restore(snapshot: FlowSnapshot) -> Result<FlowController, FlowError> {
        let question = snapshot
            .session
            .questions
            .get(snapshot.index)
            .ok_or(FlowError::InvalidTransition(
                "snapshot index is out of range",
            ))?;
        let remaining = question.time_limit.min(MAX_COUNTDOWN_SECS);
        Ok(FlowController::from_parts(
            FlowState::InProgress {
                index: snapshot.index,
            },
            snapshot.candidate,
            snapshot.session,
            remaining,
        ))
    }
}

/// File-backed snapshot storage (the local-durable-storage slot of the
/// original client).
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, snapshot: &FlowSnapshot) -> Result<(), SnapshotError> {
        let text = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<FlowSnapshot>, SnapshotError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn clear(&self) -> Result<(), SnapshotError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Capability check before offering "resume or discard": a snapshot
    /// exists, parses, and is incomplete. Unreadable snapshots count as
    /// absent.
    pub fn has_resumable(&self) -> bool {
        matches!(self.load(), Ok(Some(snapshot)) if snapshot.is_incomplete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{Difficulty, Question};
    use chrono::Utc;

    fn snapshot_with_limit(limit: u32) -> FlowSnapshot {
        FlowSnapshot {
            candidate: Candidate::default(),
            session: Session {
                questions: vec![Question {
                    id: "q-0".to_string(),
                    text: "Q?".to_string(),
                    difficulty: Difficulty::Easy,
                    time_limit: limit,
                }],
                ..Session::default()
            },
            index: 0,
            remaining: 5,
        }
    }

    #[test]
    fn test_restore_reclamps_remaining_from_question() {
        let flow = FlowController::restore(snapshot_with_limit(600)).unwrap();
        assert_eq!(*flow.state(), FlowState::InProgress { index: 0 });
        assert_eq!(flow.remaining_secs(), MAX_COUNTDOWN_SECS);
    }

    #[test]
    fn test_restore_rejects_out_of_range_index() {
        let mut snapshot = snapshot_with_limit(20);
        snapshot.index = 7;
        assert!(FlowController::restore(snapshot).is_err());
    }

    #[test]
    fn test_store_roundtrip_and_capability_check() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("current-session.json"));
        assert!(!store.has_resumable());

        store.save(&snapshot_with_limit(20)).unwrap();
        assert!(store.has_resumable());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.index, 0);
        assert_eq!(loaded.session.questions.len(), 1);

        store.clear().unwrap();
        assert!(!store.has_resumable());
        // clearing again is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn test_completed_snapshot_is_not_resumable() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("current-session.json"));
        let mut snapshot = snapshot_with_limit(20);
        snapshot.session.completed_at = Some(Utc::now());
        store.save(&snapshot).unwrap();
        assert!(!store.has_resumable());
    }

    #[test]
    fn test_corrupt_snapshot_counts_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("current-session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = SnapshotStore::new(path);
        assert!(!store.has_resumable());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_snapshot_captures_in_progress_only() {
        let flow = FlowController::new();
        assert!(flow.snapshot().is_none());
    }
}
