//! File-per-conversation turn store.
//!
//! Each conversation persists as `<dir>/<chat_id>.json` holding the full
//! ordered turn sequence as pretty-printed JSON. Writes go through a sibling
//! temp file plus rename, so a reader never observes a partial record.
//!
//! Interactions for the same conversation must not interleave (a second
//! message arriving mid-completion would read stale turns and clobber the
//! first save), so the store hands out one async mutex per conversation id.
//! Different conversations never contend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::error::MemoryError;
use crate::types::Turn;

pub struct MemoryStore {
    dir: PathBuf,
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl MemoryStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: DashMap::new(),
        })
    }

    /// Acquire the per-conversation lock. Callers hold the guard across
    /// load → completion → save so a whole interaction is serialized.
    pub async fn lock(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Load the full turn sequence for a conversation.
    ///
    /// Missing records are an empty history, not an error. A record that
    /// exists but fails to parse is also treated as empty after a warning:
    /// losing memory continuity beats failing the interaction.
    pub fn load(&self, chat_id: i64) -> Vec<Turn> {
        let path = self.path(chat_id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(chat_id, error = %e, "memory record unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(turns) => turns,
            Err(e) => {
                warn!(chat_id, error = %e, "memory record malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full turn sequence, replacing any prior record.
    pub fn save(&self, chat_id: i64, turns: &[Turn]) -> Result<(), MemoryError> {
        let path = self.path(chat_id);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(turns)?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;

        debug!(chat_id, turns = turns.len(), "memory saved");
        Ok(())
    }

    fn path(&self, chat_id: i64) -> PathBuf {
        self.dir.join(format!("{chat_id}.json"))
    }
}

/// The last `limit` turns of `turns`, order preserved.
pub fn recent_window(turns: &[Turn], limit: usize) -> &[Turn] {
    let start = turns.len().saturating_sub(limit);
    &turns[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, Turn};
    use std::time::Duration;

    fn store() -> (tempfile::TempDir, MemoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn load_missing_record_is_empty() {
        let (_dir, store) = store();
        assert!(store.load(42).is_empty());
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let (_dir, store) = store();
        let turns = vec![
            Turn::user("alice", "hello"),
            Turn::assistant("hi alice"),
            // A user turn with no speaker name must survive the trip too.
            Turn {
                role: Role::User,
                name: None,
                text: "anonymous".to_string(),
                created_at: "2026-01-01T00:00:00+00:00".to_string(),
            },
        ];

        store.save(7, &turns).unwrap();
        assert_eq!(store.load(7), turns);
    }

    #[test]
    fn empty_sequence_round_trips() {
        let (_dir, store) = store();
        store.save(9, &[]).unwrap();
        assert_eq!(store.load(9), Vec::<Turn>::new());
    }

    #[test]
    fn save_overwrites_prior_record() {
        let (_dir, store) = store();
        store.save(1, &[Turn::user("a", "first")]).unwrap();
        let second = vec![Turn::user("a", "second")];
        store.save(1, &second).unwrap();
        assert_eq!(store.load(1), second);
    }

    #[test]
    fn corrupt_record_degrades_to_empty() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("5.json"), "{not json").unwrap();
        assert!(store.load(5).is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let (dir, store) = store();
        store.save(3, &[Turn::assistant("x")]).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn recent_window_takes_tail_in_order() {
        let turns: Vec<Turn> = (0..5)
            .map(|i| Turn::user("u", &format!("m{i}")))
            .collect();

        assert_eq!(recent_window(&turns, 0).len(), 0);
        assert_eq!(recent_window(&turns, 2)[0].text, "m3");
        assert_eq!(recent_window(&turns, 2)[1].text, "m4");
        assert_eq!(recent_window(&turns, 5).len(), 5);
        assert_eq!(recent_window(&turns, 99).len(), 5);
    }

    #[tokio::test]
    async fn same_conversation_lock_serializes() {
        let (_dir, store) = store();
        let guard = store.lock(1).await;

        // A second lock on the same id must block while the guard is held.
        let pending = tokio::time::timeout(Duration::from_millis(50), store.lock(1)).await;
        assert!(pending.is_err());

        drop(guard);
        let acquired = tokio::time::timeout(Duration::from_millis(50), store.lock(1)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn different_conversations_do_not_contend() {
        let (_dir, store) = store();
        let _guard = store.lock(1).await;
        let other = tokio::time::timeout(Duration::from_millis(50), store.lock(2)).await;
        assert!(other.is_ok());
    }
}
