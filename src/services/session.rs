//! Observable authentication/session state.
//!
//! The session token is process-wide mutable state. Instead of ambient
//! globals and storage-event effects, consumers get an explicit object:
//! status changes are published on a watch channel and discrete transitions
//! (login, logout, rejection) on a broadcast channel. The UI layer
//! subscribes to events to perform its navigation side effects; nothing in
//! this crate navigates by itself.

use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use tokio::sync::{broadcast, watch, RwLock};
use tracing::{info, warn};

/// Storage key under which the token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Persistence for the single opaque session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// File-backed token store: one token value in one file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token under `dir/authToken`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_STORAGE_KEY),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok((!token.is_empty()).then_some(token))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Where the session currently stands.
///
/// `Verifying` means a token exists but the backend has not confirmed it
/// yet; dependent reads wait for the status to settle rather than racing
/// ahead of the verification round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Verifying,
    Authenticated,
}

/// Discrete session transitions, for subscribers that need side effects
/// (navigation to the login view, mostly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
    /// The backend rejected the token mid-session.
    Rejected,
}

/// Process-wide session state with explicit initialization and teardown.
pub struct SessionState {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<String>>,
    status: watch::Sender<AuthStatus>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    /// Initialize from persisted state. A present token starts the session
    /// in `Verifying`: it is not trusted until `/auth/verify` confirms it.
    pub fn from_store(store: Box<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "failed to load persisted session token");
                None
            }
        };

        let initial = if token.is_some() {
            AuthStatus::Verifying
        } else {
            AuthStatus::Unauthenticated
        };
        let (status, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(16);

        Self {
            store,
            token: RwLock::new(token),
            status,
            events,
        }
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Current status snapshot.
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Subscribe to discrete session transitions.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Wait until the status is no longer `Verifying` and return it.
    pub async fn settled_status(&self) -> AuthStatus {
        let mut rx = self.status.subscribe();
        loop {
            let current = *rx.borrow();
            if current != AuthStatus::Verifying {
                return current;
            }
            if rx.changed().await.is_err() {
                return *rx.borrow();
            }
        }
    }

    /// Record a successful login: persist the token and go straight to
    /// `Authenticated` (the backend just issued it).
    pub async fn login(&self, token: String) {
        if let Err(e) = self.store.save(&token) {
            warn!(error = %e, "failed to persist session token");
        }
        *self.token.write().await = Some(token);
        self.status.send_replace(AuthStatus::Authenticated);
        let _ = self.events.send(SessionEvent::LoggedIn);
        info!("session established");
    }

    /// The verification round-trip confirmed the persisted token.
    pub fn confirm(&self) {
        self.status.send_replace(AuthStatus::Authenticated);
    }

    /// Explicit logout: clear the token and notify subscribers.
    pub async fn logout(&self) {
        self.discard_token().await;
        self.status.send_replace(AuthStatus::Unauthenticated);
        let _ = self.events.send(SessionEvent::LoggedOut);
        info!("session closed");
    }

    /// The backend rejected our credentials on some call. Clear the token
    /// and emit `Rejected` so the UI can redirect to the login view.
    pub async fn reject(&self) {
        self.discard_token().await;
        self.status.send_replace(AuthStatus::Unauthenticated);
        let _ = self.events.send(SessionEvent::Rejected);
        warn!("session rejected by backend");
    }

    async fn discard_token(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted session token");
        }
        *self.token.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_starts_unauthenticated() {
        let session = SessionState::from_store(Box::new(MemoryTokenStore::new()));
        assert_eq!(session.status(), AuthStatus::Unauthenticated);
        assert_eq!(session.token().await, None);
    }

    #[tokio::test]
    async fn test_persisted_token_starts_verifying() {
        let session =
            SessionState::from_store(Box::new(MemoryTokenStore::with_token("tok")));
        assert_eq!(session.status(), AuthStatus::Verifying);
        assert_eq!(session.token().await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_login_emits_event_and_persists() {
        let session = SessionState::from_store(Box::new(MemoryTokenStore::new()));
        let mut events = session.events();

        session.login("fresh".to_string()).await;

        assert_eq!(session.status(), AuthStatus::Authenticated);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn);
    }

    #[tokio::test]
    async fn test_reject_clears_token_and_emits() {
        let session =
            SessionState::from_store(Box::new(MemoryTokenStore::with_token("tok")));
        let mut events = session.events();

        session.reject().await;

        assert_eq!(session.status(), AuthStatus::Unauthenticated);
        assert_eq!(session.token().await, None);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Rejected);
    }

    #[tokio::test]
    async fn test_settled_status_waits_for_confirmation() {
        let session = std::sync::Arc::new(SessionState::from_store(Box::new(
            MemoryTokenStore::with_token("tok"),
        )));

        let waiter = {
            let session = session.clone();
            tokio::spawn(async move { session.settled_status().await })
        };

        tokio::task::yield_now().await;
        session.confirm();

        assert_eq!(waiter.await.unwrap(), AuthStatus::Authenticated);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("prokat-test-{}", uuid::Uuid::new_v4()));
        let store = FileTokenStore::new(&dir);

        assert_eq!(store.load().unwrap(), None);
        store.save("secret").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("secret"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }
}
