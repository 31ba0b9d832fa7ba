//! Session and active-tank state management.
//!
//! `SessionManager` is the single source of truth for "is the user
//! authenticated" and "which tank is active". Both values are mirrored to a
//! [`KeyValueStore`] so they survive process restarts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::session::store::KeyValueStore;

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the active tank identifier.
pub const ACTIVE_TANK_KEY: &str = "activeTankId";

/// Process-wide session and tank-selection state.
///
/// Constructed once at application start and injected into consumers; the
/// handles are cheap to clone and share the same underlying state.
///
/// All mutations update the in-memory value first and then issue the durable
/// write, so readers observe the new value immediately, before the write
/// completes. Persistence failures are logged and swallowed: the session
/// keeps working for the rest of the process, but the change may be lost on
/// the next cold start.
///
/// # Restore
///
/// Call [`restore`](Self::restore) exactly once, before any other operation,
/// to load the persisted token and tank selection. Only the token read gates
/// [`is_loading`](Self::is_loading); the active-tank read runs independently
/// and never blocks the loading flag.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    auth_token: Arc<Mutex<Option<String>>>,
    active_tank_id: Arc<Mutex<Option<String>>>,
    /// True until the token restore attempt has settled.
    loading: Arc<AtomicBool>,
}

impl SessionManager {
    /// Creates a new manager backed by `store`.
    ///
    /// Both fields start empty and `is_loading` starts `true`; call
    /// [`restore`](Self::restore) to load persisted values.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            auth_token: Arc::new(Mutex::new(None)),
            active_tank_id: Arc::new(Mutex::new(None)),
            loading: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns the current bearer token, if authenticated.
    pub async fn auth_token(&self) -> Option<String> {
        self.auth_token.lock().await.clone()
    }

    /// Returns the currently selected tank identifier, if any.
    pub async fn active_tank_id(&self) -> Option<String> {
        self.active_tank_id.lock().await.clone()
    }

    /// Returns whether a token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.auth_token.lock().await.is_some()
    }

    /// True until the startup token restore has settled.
    ///
    /// Lets consumers distinguish "not yet restored" from "restored and
    /// confirmed empty".
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Loads the persisted token and tank selection into memory.
    ///
    /// Run exactly once per process, before any mutating operation. The two
    /// reads run concurrently; absence of a key leaves the field empty and a
    /// read failure is treated the same as absence. The loading flag clears
    /// once the token read settles, regardless of the active-tank read.
    pub async fn restore(&self) {
        let token_restore = async {
            match self.store.get(AUTH_TOKEN_KEY).await {
                Ok(Some(token)) => {
                    *self.auth_token.lock().await = Some(token);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "failed to restore auth token");
                }
            }
            self.loading.store(false, Ordering::SeqCst);
        };

        let tank_restore = async {
            match self.store.get(ACTIVE_TANK_KEY).await {
                Ok(Some(id)) => {
                    *self.active_tank_id.lock().await = Some(id);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "failed to restore active tank");
                }
            }
        };

        tokio::join!(token_restore, tank_restore);
    }

    /// Stores the bearer token from a successful authentication response.
    ///
    /// Logging in while already logged in overwrites the token; this is
    /// intentional and supports token refresh.
    pub async fn login(&self, token: impl Into<String>) {
        let token = token.into();
        *self.auth_token.lock().await = Some(token.clone());
        self.persist_set(AUTH_TOKEN_KEY, &token).await;
    }

    /// Clears the bearer token. Idempotent.
    pub async fn logout(&self) {
        *self.auth_token.lock().await = None;
        self.persist_remove(AUTH_TOKEN_KEY).await;
    }

    /// Selects `tank_id` as the active tank.
    ///
    /// The identifier is treated as opaque and is not validated here; the
    /// caller is trusted to pass a tank the user owns.
    pub async fn activate_tank(&self, tank_id: impl Into<String>) {
        let tank_id = tank_id.into();
        *self.active_tank_id.lock().await = Some(tank_id.clone());
        self.persist_set(ACTIVE_TANK_KEY, &tank_id).await;
    }

    /// Clears the active tank selection. Idempotent.
    pub async fn clear_active_tank(&self) {
        *self.active_tank_id.lock().await = None;
        self.persist_remove(ACTIVE_TANK_KEY).await;
    }

    async fn persist_set(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value).await {
            tracing::warn!(key, error = %err, "persistence write failed; in-memory value retained");
        }
    }

    async fn persist_remove(&self, key: &str) {
        if let Err(err) = self.store.remove(key).await {
            tracing::warn!(key, error = %err, "persistence remove failed; in-memory value retained");
        }
    }
}
