//! Routing table from session IDs to the event channel of each live session.
//!
//! The registry never touches a `ViewState`; it only forwards events to the
//! task that owns one.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::{Mutex, mpsc};

use super::navigation::Navigation;
use super::session::ChannelSource;

/// Pending events buffered per session before further presses are dropped.
const SESSION_EVENT_BUFFER: usize = 16;

/// Result of forwarding a navigation event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    /// The session is alive but its buffer is full; the user can press again.
    Dropped,
    /// No live session has this ID (closed, expired, or never existed).
    Unknown,
}

/// A freshly opened session: its ID and the source its loop reads from.
pub struct SessionHandle {
    pub id: u64,
    pub source: ChannelSource,
}

/// Shared, cheaply clonable registry of live pagination sessions.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<u64, SessionEntry>>,
}

struct SessionEntry {
    sender: mpsc::Sender<Navigation>,
    /// Message the session renders into; unset until the first page is posted.
    message_id: Option<u64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a session ID and the channel its events will arrive on.
    pub async fn open(&self) -> SessionHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (sender, receiver) = mpsc::channel(SESSION_EVENT_BUFFER);

        self.inner.sessions.lock().await.insert(
            id,
            SessionEntry {
                sender,
                message_id: None,
            },
        );

        SessionHandle {
            id,
            source: ChannelSource::new(receiver),
        }
    }

    /// Forward an event to a live session without waiting on it.
    pub async fn dispatch(&self, session_id: u64, event: Navigation) -> DispatchOutcome {
        let mut sessions = self.inner.sessions.lock().await;
        let Some(entry) = sessions.get(&session_id) else {
            return DispatchOutcome::Unknown;
        };

        match entry.sender.try_send(event) {
            Ok(()) => DispatchOutcome::Delivered,
            Err(mpsc::error::TrySendError::Full(_)) => DispatchOutcome::Dropped,
            Err(mpsc::error::TrySendError::Closed(_)) => {
                sessions.remove(&session_id);
                DispatchOutcome::Unknown
            }
        }
    }

    /// Record the message a session rendered its first page into.
    pub async fn bind_message(&self, session_id: u64, message_id: u64) {
        if let Some(entry) = self.inner.sessions.lock().await.get_mut(&session_id) {
            entry.message_id = Some(message_id);
        }
    }

    /// Whether `session_id` is live and renders into `message_id`.
    ///
    /// Session IDs restart with the process, so a button left on an old
    /// message can carry the ID of an unrelated live session.
    pub async fn accepts(&self, session_id: u64, message_id: u64) -> bool {
        self.inner
            .sessions
            .lock()
            .await
            .get(&session_id)
            .is_some_and(|entry| {
                !entry.sender.is_closed() && entry.message_id == Some(message_id)
            })
    }

    /// Forget a session once its loop has finished.
    pub async fn close(&self, session_id: u64) {
        self.inner.sessions.lock().await.remove(&session_id);
    }

    pub async fn active_sessions(&self) -> usize {
        self.inner.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pagination::{InteractionSource, Polled};

    #[tokio::test]
    async fn ids_are_unique_and_nonzero() {
        let registry = SessionRegistry::new();
        let first = registry.open().await;
        let second = registry.open().await;

        assert_ne!(first.id, 0);
        assert_ne!(first.id, second.id);
        assert_eq!(registry.active_sessions().await, 2);
    }

    #[tokio::test]
    async fn dispatch_reaches_the_owning_session() {
        let registry = SessionRegistry::new();
        let mut handle = registry.open().await;

        assert_eq!(
            registry.dispatch(handle.id, Navigation::Forward).await,
            DispatchOutcome::Delivered
        );
        assert_eq!(
            handle.source.next(Duration::from_millis(50)).await,
            Polled::Event(Navigation::Forward)
        );
    }

    #[tokio::test]
    async fn closed_sessions_are_unknown() {
        let registry = SessionRegistry::new();
        let handle = registry.open().await;
        registry.bind_message(handle.id, 500).await;
        registry.close(handle.id).await;

        assert!(!registry.accepts(handle.id, 500).await);
        assert_eq!(
            registry.dispatch(handle.id, Navigation::Close).await,
            DispatchOutcome::Unknown
        );
        assert_eq!(
            registry.dispatch(9_999, Navigation::Close).await,
            DispatchOutcome::Unknown
        );
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned() {
        let registry = SessionRegistry::new();
        let handle = registry.open().await;
        let id = handle.id;
        registry.bind_message(id, 500).await;
        drop(handle);

        assert!(!registry.accepts(id, 500).await);
        assert_eq!(
            registry.dispatch(id, Navigation::Forward).await,
            DispatchOutcome::Unknown
        );
        assert_eq!(registry.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn full_buffer_drops_events() {
        let registry = SessionRegistry::new();
        let handle = registry.open().await;

        for _ in 0..SESSION_EVENT_BUFFER {
            assert_eq!(
                registry.dispatch(handle.id, Navigation::Forward).await,
                DispatchOutcome::Delivered
            );
        }
        assert_eq!(
            registry.dispatch(handle.id, Navigation::Forward).await,
            DispatchOutcome::Dropped
        );
    }

    #[tokio::test]
    async fn sessions_only_accept_their_own_message() {
        let registry = SessionRegistry::new();
        let handle = registry.open().await;

        assert!(!registry.accepts(handle.id, 500).await);

        registry.bind_message(handle.id, 500).await;
        assert!(registry.accepts(handle.id, 500).await);
        assert!(!registry.accepts(handle.id, 501).await);
    }

    #[tokio::test]
    async fn restarted_registry_rejects_buttons_from_old_messages() {
        let old_registry = SessionRegistry::new();
        let old = old_registry.open().await;
        old_registry.bind_message(old.id, 100).await;
        drop(old_registry);

        let registry = SessionRegistry::new();
        let new = registry.open().await;
        registry.bind_message(new.id, 200).await;

        assert_eq!(old.id, new.id);
        assert!(!registry.accepts(old.id, 100).await);
        assert!(registry.accepts(new.id, 200).await);
    }
}
