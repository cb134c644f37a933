//! Application context: the explicit object tying together the API client,
//! the query cache, and the session state.
//!
//! Initialization resolves the live backend and loads the persisted token;
//! teardown happens through the auth resource (`logout`). Nothing here lives
//! in ambient module-level state.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiClientConfig;
use crate::error::ApiError;
use crate::services::api_client::ApiClient;
use crate::services::cache::{QueryCache, QueryKey};
use crate::services::metrics::ApiClientMetrics;
use crate::services::session::{AuthStatus, SessionState, TokenStore};

/// Shared state for the data-fetching layer.
pub struct AppContext {
    pub client: ApiClient,
    pub cache: QueryCache,
    pub session: Arc<SessionState>,
}

impl AppContext {
    /// Two-phase startup: load the persisted session, then resolve a live
    /// backend before anything else is allowed to run.
    pub async fn initialize(
        config: ApiClientConfig,
        store: Box<dyn TokenStore>,
        metrics: Option<ApiClientMetrics>,
    ) -> Result<Self, ApiError> {
        let session = Arc::new(SessionState::from_store(store));
        let client = ApiClient::connect(config, session.clone(), metrics).await?;

        Ok(Self {
            client,
            cache: QueryCache::new(),
            session,
        })
    }

    /// Cached, deduplicated, auth-gated read.
    ///
    /// Waits out an outstanding verification, refuses to touch the network
    /// without an authenticated session, and shares in-flight fetches per
    /// key.
    pub async fn read<T: DeserializeOwned>(
        &self,
        key: QueryKey,
        path: &str,
    ) -> Result<T, ApiError> {
        if self.session.settled_status().await != AuthStatus::Authenticated {
            return Err(ApiError::NotAuthenticated);
        }

        let value = self
            .cache
            .fetch_with(key, || self.client.get_json::<Value>(path))
            .await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
