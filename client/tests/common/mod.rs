//! Common test utilities for integration tests
//!
//! Each `TestApp` gets its own mock prediction API and its own session
//! file, so tests can run in parallel.

#![allow(dead_code)]

use std::path::PathBuf;

use diabetes_risk_client::config::{ApiConfig, ClientConfig, SessionConfig};
use diabetes_risk_client::session::{SessionStore, StoredSession};
use diabetes_risk_client::AppState;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test application wrapper
pub struct TestApp {
    pub server: MockServer,
    pub config: ClientConfig,
}

impl TestApp {
    /// Mock API plus a config pointing at it; nothing is mounted yet
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = test_config(server.uri());
        Self { server, config }
    }

    pub fn store(&self) -> SessionStore {
        SessionStore::new(self.config.session.path.clone())
    }

    /// Persist a session as if left by a previous run
    pub async fn seed_session(&self, token: Option<String>) {
        self.store()
            .save(&StoredSession {
                token,
                dark_mode: false,
                remembered_username: None,
            })
            .await
            .expect("Failed to seed session");
    }

    /// Build state the way the binary does
    pub async fn state(&self) -> AppState {
        AppState::init(self.config.clone())
            .await
            .expect("Failed to initialise state")
    }

    pub async fn mock_json(&self, http_method: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_history(&self, entries: Value) {
        self.mock_json("GET", "/history", 200, json!({ "history": entries }))
            .await;
    }

    /// Requests the mock has seen for `route`
    pub async fn requests_to(&self, route: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == route)
            .collect()
    }
}

fn test_config(base_url: String) -> ClientConfig {
    ClientConfig {
        api: ApiConfig {
            base_url,
            timeout_secs: 5,
        },
        session: SessionConfig {
            path: temp_session_path(),
        },
        ..ClientConfig::default()
    }
}

fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("diabetes-risk-test-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}

/// A token the mock server would have issued
pub fn issue_token(subject: &str, expires_in_secs: i64) -> String {
    let claims = json!({
        "sub": subject,
        "exp": chrono::Utc::now().timestamp() + expires_in_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret-key-for-testing-only-32chars"),
    )
    .expect("Failed to encode token")
}

pub fn history_entry(prediction: &str, risk: f64) -> Value {
    json!({
        "prediction": prediction,
        "glucose": 140.0,
        "blood_pressure": 80.0,
        "risk_percentage": risk,
        "diet_suggestion": "Continue with a balanced diet rich in vegetables and whole grains.",
        "timestamp": "2024-05-01 08:15:00"
    })
}

pub fn prediction_body(prediction: &str, risk: f64) -> Value {
    json!({
        "prediction": prediction,
        "glucose": 148.0,
        "blood_pressure": 72.0,
        "risk_percentage": risk,
        "diet_suggestion": "Adopt a low-sugar, low-carb diet and consult a doctor for monitoring.",
        "probability": risk / 100.0
    })
}
