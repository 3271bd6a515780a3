use super::*;
use ppk_core::ID;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Concurrency-safe registry of live games: the only shared mutable state
/// in the engine. The outer lock guards the key space, so lookups run
/// concurrently with insertions; each session's own mutex serializes its
/// operations, so distinct games never contend with each other.
///
/// Owned explicitly by whoever hosts the engine and injected as a
/// dependency; multiple lobbies can coexist in one process.
#[derive(Default)]
pub struct Lobby {
    sessions: RwLock<HashMap<ID<Session>, Arc<Mutex<Session>>>>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new game, registering its creator as moderator. The id is
    /// regenerated on the vanishingly unlikely collision.
    pub async fn create(
        &self,
        cards: Vec<String>,
        moderator: &str,
    ) -> Result<(ID<Session>, ID<Player>, Snapshot), SessionError> {
        let mut sessions = self.sessions.write().await;
        let mut id = ID::default();
        while sessions.contains_key(&id) {
            id = ID::default();
        }
        let (session, creator) = Session::create(id, cards, moderator)?;
        let snapshot = session.snapshot();
        sessions.insert(id, Arc::new(Mutex::new(session)));
        log::info!("[lobby] game {} created", id);
        Ok((id, creator, snapshot))
    }

    /// Look up a game by id. Callers lock the returned handle for the
    /// duration of one operation.
    pub async fn session(&self, id: ID<Session>) -> Result<Arc<Mutex<Session>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::SessionNotFound)
    }

    /// Remove a game. Acquires the session's own lock after unlinking it,
    /// so an in-flight operation finishes before the game is gone.
    pub async fn close(&self, id: ID<Session>) -> Result<(), SessionError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(SessionError::SessionNotFound)?;
        let _ = session.lock().await;
        log::info!("[lobby] game {} closed", id);
        Ok(())
    }

    /// Number of live games.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
