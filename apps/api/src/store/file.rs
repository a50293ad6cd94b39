use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::session::Session;
use crate::store::{SessionStore, StoreError};

/// File-backed session store: the whole collection serialized as one JSON
/// array. A missing or empty file reads as an empty collection. Writes land
/// in a sibling temp file and are renamed into place, so a failed write
/// leaves the prior contents untouched.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Session>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn save(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(sessions)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn upsert(&self, mut session: Session) -> Result<Session, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.load().await?;

        if session.id.is_none() {
            session.id = Some(Uuid::new_v4().to_string());
        }
        if session.created_at.is_none() {
            session.created_at = Some(Utc::now());
        }

        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.push(session.clone()),
        }

        self.save(&sessions).await?;
        Ok(session)
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.load().await?;
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn get(&self, id: &str) -> Result<Option<Session>, StoreError> {
        let _guard = self.lock.lock().await;
        let sessions = self.load().await?;
        Ok(sessions.into_iter().find(|s| s.id.as_deref() == Some(id)))
    }

    async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.load().await?;
        let before = sessions.len();
        sessions.retain(|s| s.id.as_deref() != Some(id));
        let removed = before - sessions.len();
        if removed > 0 {
            self.save(&sessions).await?;
        }
        Ok(removed)
    }
}
