//! Conversation memory backing the agent.
//!
//! The agent records each exchange (user turns and its own reply) keyed by
//! context id, and replays prior turns as conversation history on the next
//! request for the same context. Storage is SQLite via rusqlite; an
//! in-memory connection is used when no database path is configured.
//!
//! Memory is a best-effort collaborator: a failed read or write degrades to
//! an empty history and a warning, never a failed generation.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS conversation_turns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    context_id TEXT NOT NULL,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_turns_context ON conversation_turns(context_id, id);
"#;

/// One stored conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTurn {
    pub role: String,
    pub content: String,
}

/// Trait for conversation stores.
#[async_trait::async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append a turn to a context's history.
    async fn append(&self, context_id: &str, role: &str, content: &str) -> anyhow::Result<()>;

    /// Load a context's history in insertion order.
    async fn history(&self, context_id: &str) -> anyhow::Result<Vec<StoredTurn>>;
}

/// SQLite-backed conversation store.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store. Contents are lost on shutdown.
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait::async_trait]
impl ConversationStore for SqliteStore {
    async fn append(&self, context_id: &str, role: &str, content: &str) -> anyhow::Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO conversation_turns (context_id, role, content, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![context_id, role, content, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    async fn history(&self, context_id: &str) -> anyhow::Result<Vec<StoredTurn>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT role, content FROM conversation_turns
             WHERE context_id = ?1 ORDER BY id ASC",
        )?;
        let turns = stmt
            .query_map(params![context_id], |row| {
                Ok(StoredTurn {
                    role: row.get(0)?,
                    content: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_history_round_trip() {
        let store = SqliteStore::in_memory().unwrap();

        store.append("ctx-1", "user", "rent 35k").await.unwrap();
        store.append("ctx-1", "agent", "Here is your breakdown").await.unwrap();

        let turns = store.history("ctx-1").await.unwrap();
        assert_eq!(
            turns,
            vec![
                StoredTurn {
                    role: "user".to_string(),
                    content: "rent 35k".to_string()
                },
                StoredTurn {
                    role: "agent".to_string(),
                    content: "Here is your breakdown".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_contexts_are_isolated() {
        let store = SqliteStore::in_memory().unwrap();

        store.append("ctx-a", "user", "hello").await.unwrap();
        store.append("ctx-b", "user", "goodbye").await.unwrap();

        let turns = store.history("ctx-a").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "hello");

        assert!(store.history("ctx-missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.append("ctx-1", "user", "income 100k").await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let turns = store.history("ctx-1").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "income 100k");
    }
}
