//! Application state management
//!
//! One `AppState` is created at startup and cloned into every flow that
//! needs the API, the session or the cached history.
//!
//! # Design Principles
//!
//! 1. **Read once**: the session file is loaded in [`AppState::init`] only
//! 2. **Cheap cloning**: all fields are Arc'd or Clone-cheap
//! 3. **Write-through**: every session change is persisted immediately

use std::sync::Arc;

use diabetes_risk_shared::{AuthError, HistoryEntry};
use metrics::counter;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::inspect_token;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::session::{SessionStore, StoredSession};

#[derive(Debug, Default)]
struct Session {
    token: Option<SecretString>,
    dark_mode: bool,
    remembered_username: Option<String>,
}

impl Session {
    fn to_stored(&self) -> StoredSession {
        StoredSession {
            token: self.token.as_ref().map(|t| t.expose_secret().clone()),
            dark_mode: self.dark_mode,
            remembered_username: self.remembered_username.clone(),
        }
    }
}

/// Shared application state
///
/// # Performance
///
/// - `api`: reqwest's client is internally Arc'd, cloning is O(1)
/// - `config`, `session`, `history`: wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    config: Arc<ClientConfig>,
    api: ApiClient,
    store: Arc<SessionStore>,
    session: Arc<RwLock<Session>>,
    history: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl AppState {
    /// Create state with an empty session; nothing is read from disk
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let store = SessionStore::new(config.session.path.clone());

        Ok(Self {
            config: Arc::new(config),
            api,
            store: Arc::new(store),
            session: Arc::new(RwLock::new(Session::default())),
            history: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Create state from the stored session
    ///
    /// A stored token is kept only if it is well-formed, unexpired, and the
    /// server accepts it for a history fetch. Otherwise it is discarded and
    /// the user starts logged out.
    pub async fn init(config: ClientConfig) -> ClientResult<Self> {
        let state = Self::new(config)?;
        let stored = state.store.load().await?;

        {
            let mut session = state.session.write().await;
            session.dark_mode = stored.dark_mode;
            session.remembered_username = stored.remembered_username.clone();
        }

        let Some(token) = stored.token else {
            return Ok(state);
        };

        if let Err(e) = inspect_token(&token) {
            warn!(reason = %e, "Discarding stored token");
            counter!("session_revalidations_total", "outcome" => "malformed").increment(1);
            state.persist().await?;
            return Ok(state);
        }

        state.session.write().await.token = Some(SecretString::new(token));
        match state.refresh_history().await {
            Ok(entries) => {
                counter!("session_revalidations_total", "outcome" => "valid").increment(1);
                info!(entries, "Session restored");
            }
            Err(e) if e.is_unauthorized() => {
                counter!("session_revalidations_total", "outcome" => "rejected").increment(1);
                warn!(error = %e, "Stored token rejected, logging out");
                state.session.write().await.token = None;
                state.persist().await?;
            }
            Err(e) => {
                // Server unreachable or failing; the token may still be good
                counter!("session_revalidations_total", "outcome" => "failed").increment(1);
                warn!(error = %e, "Could not revalidate stored token, keeping it");
            }
        }

        Ok(state)
    }

    #[inline]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[inline]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn token(&self) -> Option<SecretString> {
        self.session.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.token.is_some()
    }

    /// Store a freshly issued token
    pub async fn set_token(&self, token: String) -> ClientResult<()> {
        self.session.write().await.token = Some(SecretString::new(token));
        self.persist().await
    }

    /// Forget the token and the cached history; preferences survive
    pub async fn logout(&self) -> ClientResult<()> {
        self.session.write().await.token = None;
        self.history.write().await.clear();
        self.persist().await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn dark_mode(&self) -> bool {
        self.session.read().await.dark_mode
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> ClientResult<()> {
        self.session.write().await.dark_mode = enabled;
        self.persist().await
    }

    /// Flip the theme and return the new setting
    pub async fn toggle_dark_mode(&self) -> ClientResult<bool> {
        let enabled = {
            let mut session = self.session.write().await;
            session.dark_mode = !session.dark_mode;
            session.dark_mode
        };
        self.persist().await?;
        Ok(enabled)
    }

    pub async fn remembered_username(&self) -> Option<String> {
        self.session.read().await.remembered_username.clone()
    }

    pub async fn set_remembered_username(&self, username: Option<String>) -> ClientResult<()> {
        self.session.write().await.remembered_username = username;
        self.persist().await
    }

    /// Cached history, newest first
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().await.clone()
    }

    /// Re-fetch history for the logged-in user; returns the entry count
    pub async fn refresh_history(&self) -> ClientResult<usize> {
        let token = self.token().await.ok_or(AuthError::MissingToken)?;
        let entries = self.api.history(&token).await?;
        let count = entries.len();
        *self.history.write().await = entries;
        Ok(count)
    }

    async fn persist(&self) -> ClientResult<()> {
        let stored = self.session.read().await.to_stored();
        self.store.save(&stored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::tests::make_token;
    use crate::config::{ApiConfig, SessionConfig};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ClientConfig {
        ClientConfig {
            api: ApiConfig {
                base_url,
                timeout_secs: 5,
            },
            session: SessionConfig {
                path: std::env::temp_dir()
                    .join(format!("diabetes-risk-{}", uuid::Uuid::new_v4()))
                    .join("session.json"),
            },
            ..ClientConfig::default()
        }
    }

    async fn seed(config: &ClientConfig, token: &str) {
        SessionStore::new(config.session.path.clone())
            .save(&StoredSession {
                token: Some(token.to_string()),
                dark_mode: true,
                remembered_username: Some("alice".to_string()),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_state_clone_is_cheap() {
        let state = AppState::new(ClientConfig::default()).unwrap();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.session, &cloned.session));
    }

    #[tokio::test]
    async fn test_init_restores_accepted_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "history": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        seed(&config, &make_token(Some(3600))).await;

        let state = AppState::init(config).await.unwrap();
        assert!(state.is_authenticated().await);
        assert!(state.dark_mode().await);
        assert_eq!(state.remembered_username().await.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_init_discards_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "msg": "Signature verification failed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let store = SessionStore::new(config.session.path.clone());
        seed(&config, &make_token(Some(3600))).await;

        let state = AppState::init(config).await.unwrap();
        assert!(!state.is_authenticated().await);
        let stored = store.load().await.unwrap();
        assert!(stored.token.is_none());
        assert!(stored.dark_mode);
    }

    #[tokio::test]
    async fn test_init_keeps_token_through_server_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let store = SessionStore::new(config.session.path.clone());
        let token = make_token(Some(3600));
        seed(&config, &token).await;

        let state = AppState::init(config).await.unwrap();
        assert!(state.is_authenticated().await);
        assert!(state.history().await.is_empty());
        assert_eq!(store.load().await.unwrap().token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn test_init_keeps_token_when_server_unreachable() {
        // Nothing listens on the discard port
        let config = test_config("http://127.0.0.1:9".to_string());
        let store = SessionStore::new(config.session.path.clone());
        seed(&config, &make_token(Some(3600))).await;

        let state = AppState::init(config).await.unwrap();
        assert!(state.is_authenticated().await);
        assert!(store.load().await.unwrap().token.is_some());
    }

    #[tokio::test]
    async fn test_init_discards_malformed_token_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        seed(&config, "definitely-not-a-jwt").await;

        let state = AppState::init(config).await.unwrap();
        assert!(!state.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_history() {
        let state = AppState::new(test_config("http://127.0.0.1:9".to_string())).unwrap();
        state.set_token(make_token(None)).await.unwrap();
        assert!(state.is_authenticated().await);

        state.logout().await.unwrap();
        assert!(!state.is_authenticated().await);
        assert!(state.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_dark_mode_persists() {
        let config = test_config("http://127.0.0.1:9".to_string());
        let store = SessionStore::new(config.session.path.clone());
        let state = AppState::new(config).unwrap();

        assert!(state.toggle_dark_mode().await.unwrap());
        assert!(store.load().await.unwrap().dark_mode);
        assert!(!state.toggle_dark_mode().await.unwrap());
    }
}
