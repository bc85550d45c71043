//! HTTP client for the prediction API
//!
//! Thin typed wrapper over `reqwest`: one method per endpoint, JSON decoding
//! of success bodies, and `{message}` / `{error}` extraction for failures.

use std::sync::Arc;

use diabetes_risk_shared::{
    ApiMessage, AuthRequest, CsvPrediction, CsvPredictionResponse, HistoryEntry, HistoryResponse,
    ModelAccuracy, PredictionResult, RecommendationQuery, RecommendationResponse, TokenResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Prediction API client
///
/// Cloning is cheap: the underlying connection pool and base URL are shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("diabetes-risk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /login
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> ClientResult<TokenResponse> {
        let body = AuthRequest {
            username: username.to_string(),
            password: password.expose_secret().clone(),
        };
        self.send("/login", self.http.post(self.url("/login")).json(&body))
            .await
    }

    /// POST /register
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> ClientResult<TokenResponse> {
        let body = AuthRequest {
            username: username.to_string(),
            password: password.expose_secret().clone(),
        };
        self.send("/register", self.http.post(self.url("/register")).json(&body))
            .await
    }

    /// GET /history, newest first
    pub async fn history(&self, token: &SecretString) -> ClientResult<Vec<HistoryEntry>> {
        let request = self
            .http
            .get(self.url("/history"))
            .bearer_auth(token.expose_secret());
        let response: HistoryResponse = self.send("/history", request).await?;
        Ok(response.history)
    }

    /// POST /predict as a form; the bearer token is attached when present so
    /// the server records the prediction in the user's history
    pub async fn predict(
        &self,
        form: &[(String, String)],
        token: Option<&SecretString>,
    ) -> ClientResult<PredictionResult> {
        let mut request = self.http.post(self.url("/predict")).form(form);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        self.send("/predict", request).await
    }

    /// POST /predict_csv as multipart with the file under `file`
    pub async fn predict_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ClientResult<Vec<CsvPrediction>> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let request = self
            .http
            .post(self.url("/predict_csv"))
            .multipart(Form::new().part("file", part));
        let response: CsvPredictionResponse = self.send("/predict_csv", request).await?;
        Ok(response.predictions)
    }

    /// POST /recommend as a form
    pub async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> ClientResult<RecommendationResponse> {
        let request = self.http.post(self.url("/recommend")).form(&query.to_form());
        self.send("/recommend", request).await
    }

    /// GET /model_accuracy, e.g. "77.92%"
    pub async fn model_accuracy(&self) -> ClientResult<String> {
        let response: ModelAccuracy = self
            .send("/model_accuracy", self.http.get(self.url("/model_accuracy")))
            .await?;
        Ok(response.accuracy)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        debug!(endpoint, "Sending request");
        let response = request.send().await?;
        decode(endpoint, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> ClientResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|e| {
            warn!(endpoint, error = %e, "Unexpected response body");
            ClientError::Decode(e.to_string())
        });
    }

    let message = serde_json::from_slice::<ApiMessage>(&bytes)
        .ok()
        .and_then(|body| body.text().map(str::to_string));
    warn!(endpoint, status = status.as_u16(), "Request rejected");
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains("\"username\":\"alice\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "aaa.bbb.ccc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = client
            .login("alice", &SecretString::new("pw".to_string()))
            .await
            .unwrap();
        assert_eq!(token.token, "aaa.bbb.ccc");
    }

    #[tokio::test]
    async fn test_error_body_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .login("alice", &SecretString::new("wrong".to_string()))
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_has_no_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/model_accuracy"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).model_accuracy().await.unwrap_err();
        assert_eq!(err.user_message(), "Server error");
    }

    #[tokio::test]
    async fn test_history_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .and(header("authorization", "Bearer aaa.bbb.ccc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "history": [{
                    "prediction": "Diabetic",
                    "glucose": 180.0,
                    "blood_pressure": 90.0,
                    "risk_percentage": 72.5,
                    "diet_suggestion": "Adopt a low-sugar, low-carb diet.",
                    "timestamp": "2024-03-01 10:00:00"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let history = client_for(&server)
            .history(&SecretString::new("aaa.bbb.ccc".to_string()))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].risk_band(), "High");
    }

    #[tokio::test]
    async fn test_recommend_sends_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommend"))
            .and(body_string_contains("Diabetic=true"))
            .and(body_string_contains("Height=1.7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bmi": 24.2,
                "tdee": 2200.0,
                "nutrition": {"energy": 2000.0, "carbs": 200.0, "protein": 120.0, "fat": 60.0}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = RecommendationQuery {
            age: 40.0,
            height_m: 1.7,
            weight_kg: 70.0,
            sex: diabetes_risk_shared::Sex::Female,
            activity_level: diabetes_risk_shared::ActivityLevel::Medium,
            goal: diabetes_risk_shared::Goal::Standard,
            diabetic: true,
        };
        let response = client_for(&server).recommend(&query).await.unwrap();
        assert_eq!(response.nutrition.energy, 2000.0);
    }
}
