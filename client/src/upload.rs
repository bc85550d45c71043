//! Batch CSV prediction upload
//!
//! The file is checked locally (exists, has every required column) before
//! anything is sent. Results can be written back out as CSV.

use std::path::Path;

use diabetes_risk_shared::validation::validate_csv_header;
use diabetes_risk_shared::CsvPrediction;
use metrics::counter;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

pub const NO_FILE_MESSAGE: &str = "Please select a CSV file to upload.";
const GENERIC_FAILURE: &str = "Something went wrong.";

/// Check the header row of a batch file
pub fn check_csv(contents: &[u8]) -> ClientResult<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents);
    let headers = reader.headers()?;
    validate_csv_header(headers.iter())?;
    Ok(())
}

/// Validate and upload a CSV file for batch prediction
pub async fn upload_csv(api: &ApiClient, path: &Path) -> ClientResult<Vec<CsvPrediction>> {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClientError::Validation(NO_FILE_MESSAGE.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    check_csv(&contents)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.csv");

    let rows = api.predict_csv(file_name, contents).await.map_err(|e| {
        warn!(error = %e, "Batch upload failed");
        e
    })?;
    counter!("batch_predictions_total").increment(rows.len() as u64);
    info!(rows = rows.len(), "Batch predictions received");
    Ok(rows)
}

/// Message shown for a failed upload
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ClientError::Api { message: None, .. } | ClientError::Decode(_) => {
            GENERIC_FAILURE.to_string()
        }
        ClientError::Transport(e) => format!("Failed to upload file: {}", e),
        other => other.user_message(),
    }
}

#[derive(Serialize)]
struct ResultCsvRow<'a> {
    name: &'a str,
    prediction: &'a str,
    risk_percentage: String,
}

/// Batch results as CSV with one decimal of risk
pub fn export_results_csv(rows: &[CsvPrediction]) -> ClientResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(ResultCsvRow {
            name: &row.name,
            prediction: &row.prediction,
            risk_percentage: format!("{:.1}", row.risk_percentage),
        })?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ClientError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use reqwest::StatusCode;
    use rstest::rstest;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GOOD_CSV: &str = "Name,Pregnancies,Glucose,BloodPressure,SkinThickness,\
                            Insulin,BMI,DiabetesPedigreeFunction,Age\n\
                            Ann,2,148,72,35,0,33.6,0.627,50\n";

    async fn write_temp(contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("diabetes-risk-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("patients.csv");
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn api(status: StatusCode, message: Option<&str>) -> ClientError {
        ClientError::Api {
            status,
            message: message.map(str::to_string),
        }
    }

    #[rstest]
    #[case(api(StatusCode::BAD_REQUEST, Some("Invalid CSV format")), "Invalid CSV format")]
    #[case(api(StatusCode::INTERNAL_SERVER_ERROR, None), "Something went wrong.")]
    #[case(ClientError::Decode("not json".to_string()), "Something went wrong.")]
    #[case(ClientError::Validation(NO_FILE_MESSAGE.to_string()), NO_FILE_MESSAGE)]
    fn test_failure_message_table(#[case] error: ClientError, #[case] expected: &str) {
        assert_eq!(failure_message(&error), expected);
    }

    #[test]
    fn test_check_csv() {
        assert!(check_csv(GOOD_CSV.as_bytes()).is_ok());
        let err = check_csv(b"Name,Glucose\nAnn,148\n").unwrap_err();
        assert!(err.user_message().contains("Pregnancies"));
    }

    #[tokio::test]
    async fn test_missing_columns_make_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_csv"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let file = write_temp("Name,Glucose\nAnn,148\n").await;
        let err = upload_csv(&client_for(&server), &file).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let api = ApiClient::new(&ApiConfig::default()).unwrap();
        let err = upload_csv(&api, Path::new("/nonexistent/patients.csv"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), NO_FILE_MESSAGE);
    }

    #[tokio::test]
    async fn test_upload_returns_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_csv"))
            .and(body_string_contains("name=\"file\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [
                    {"name": "Ann", "prediction": "Diabetic", "risk_percentage": 81.234}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = write_temp(GOOD_CSV).await;
        let rows = upload_csv(&client_for(&server), &file).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ann");

        let csv = export_results_csv(&rows).unwrap();
        assert_eq!(csv, "name,prediction,risk_percentage\nAnn,Diabetic,81.2\n");
    }

    #[tokio::test]
    async fn test_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_csv"))
            .respond_with(ResponseTemplate::new(500).set_body_string(""))
            .mount(&server)
            .await;

        let file = write_temp(GOOD_CSV).await;
        let err = upload_csv(&client_for(&server), &file).await.unwrap_err();
        assert_eq!(failure_message(&err), "Something went wrong.");
    }
}
