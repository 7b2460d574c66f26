//! Session registry: authoritative sessions, live connections, broadcast.
//!
//! Sessions live in a `DashMap`, each behind its own `parking_lot::Mutex` so
//! mutations of one game are serialized while other games proceed
//! independently. The lock is never held across a network send.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{DeckConfig, GameSession, GameSnapshot, JoinOutcome, PlayerId, SessionId};
use crate::errors::domain::DomainError;
use crate::ws::protocol::ServerMsg;

pub type ConnId = Uuid;

/// Pre-serialized server message pushed to a connection actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub Arc<str>);

/// Which player of which game a connection speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub session_id: SessionId,
    pub player_id: PlayerId,
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Mutex<GameSession>>>,
    bindings: DashMap<ConnId, Binding>,
    subscribers: DashMap<SessionId, DashMap<ConnId, Recipient<Outbound>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a waiting session with a freshly shuffled deck.
    pub fn create(&self, deck: &DeckConfig) -> Result<SessionId, DomainError> {
        let id = Uuid::new_v4();
        let session = GameSession::create(id, deck)?;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(session_id = %id, "session created");
        Ok(id)
    }

    fn session(&self, id: SessionId) -> Result<Arc<Mutex<GameSession>>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DomainError::not_found(id))
    }

    pub fn snapshot(&self, id: SessionId) -> Result<GameSnapshot, DomainError> {
        Ok(self.session(id)?.lock().snapshot())
    }

    /// Runs `f` under the session's lock.
    pub fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<R, DomainError> {
        let session = self.session(id)?;
        let mut guard = session.lock();
        Ok(f(&mut guard))
    }

    /// Joins `player_id` to a session and binds `conn_id` to it under the
    /// session's lock, so a concurrent release of the same player sees the
    /// new binding. Returns the outcome and the connection's previous
    /// binding if it moved.
    pub fn join(
        &self,
        session_id: SessionId,
        player_id: &str,
        conn_id: ConnId,
        recipient: Recipient<Outbound>,
    ) -> Result<(JoinOutcome, Option<Binding>), DomainError> {
        self.with_session(session_id, |s| -> Result<_, DomainError> {
            let outcome = s.join(player_id)?;
            let previous = self.bind(session_id, player_id, conn_id, recipient);
            Ok((outcome, previous))
        })?
    }

    /// Binds `conn_id` to a player of a session and subscribes it to
    /// broadcasts. Returns the previous binding if the connection moved.
    fn bind(
        &self,
        session_id: SessionId,
        player_id: &str,
        conn_id: ConnId,
        recipient: Recipient<Outbound>,
    ) -> Option<Binding> {
        let binding = Binding {
            session_id,
            player_id: player_id.to_owned(),
        };
        let previous = self.bindings.insert(conn_id, binding.clone());
        if let Some(prev) = &previous {
            if prev.session_id != session_id {
                self.unsubscribe(prev.session_id, conn_id);
            }
        }
        self.subscribers
            .entry(session_id)
            .or_default()
            .insert(conn_id, recipient);
        debug!(session_id = %session_id, player_id, conn_id = %conn_id, "connection registered");
        previous.filter(|p| *p != binding)
    }

    pub fn binding(&self, conn_id: ConnId) -> Option<Binding> {
        self.bindings.get(&conn_id).map(|b| b.value().clone())
    }

    /// Forgets a connection. The session itself is never removed here.
    pub fn remove_connection(&self, conn_id: ConnId) -> Option<Binding> {
        let (_, binding) = self.bindings.remove(&conn_id)?;
        self.unsubscribe(binding.session_id, conn_id);
        debug!(
            session_id = %binding.session_id,
            player_id = %binding.player_id,
            conn_id = %conn_id,
            "connection removed"
        );
        Some(binding)
    }

    fn unsubscribe(&self, session_id: SessionId, conn_id: ConnId) {
        let now_empty = match self.subscribers.get(&session_id) {
            Some(entry) => {
                entry.remove(&conn_id);
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.subscribers
                .remove_if(&session_id, |_, conns| conns.is_empty());
        }
    }

    /// True while any connection still speaks for this player.
    pub fn player_has_connection(&self, session_id: SessionId, player_id: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.session_id == session_id && b.player_id == player_id)
    }

    /// Marks the player disconnected unless another connection still
    /// represents them, then broadcasts. Returns true if the session changed.
    pub fn release_player(&self, binding: &Binding) -> bool {
        // Checked under the session lock; `join` binds under the same lock.
        let changed = self
            .with_session(binding.session_id, |s| {
                !self.player_has_connection(binding.session_id, &binding.player_id)
                    && s.disconnect(&binding.player_id)
            })
            .unwrap_or(false);
        if changed {
            info!(
                session_id = %binding.session_id,
                player_id = %binding.player_id,
                "player disconnected"
            );
            self.broadcast(binding.session_id);
        }
        changed
    }

    /// Sends the current snapshot to every live connection of the session.
    ///
    /// The message is serialized once. A failed delivery is logged and does
    /// not stop delivery to the others. Returns the number of successful
    /// deliveries.
    pub fn broadcast(&self, session_id: SessionId) -> usize {
        let snapshot = match self.snapshot(session_id) {
            Ok(s) => s,
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "broadcast skipped");
                return 0;
            }
        };
        let payload: Arc<str> = match serde_json::to_string(&ServerMsg::GameState { game: snapshot }) {
            Ok(json) => json.into(),
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "failed to serialize game state");
                return 0;
            }
        };

        let recipients: Vec<(ConnId, Recipient<Outbound>)> = match self.subscribers.get(&session_id) {
            Some(conns) => conns
                .iter()
                .map(|e| (*e.key(), e.value().clone()))
                .collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for (conn_id, recipient) in recipients {
            match recipient.try_send(Outbound(Arc::clone(&payload))) {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    session_id = %session_id,
                    conn_id = %conn_id,
                    error = %DomainError::ConnectionLost,
                    cause = %err,
                    "state delivery failed"
                ),
            }
        }
        debug!(session_id = %session_id, delivered, "game state broadcast");
        delivered
    }

    pub fn active_connections_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
