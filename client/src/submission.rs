//! Prediction submission
//!
//! Builds the `/predict` form from the wizard's metrics and sends it. Every
//! outcome other than an overlapping call comes back as a
//! [`PredictionResult`]; failures use the `"Error"` sentinel so the result
//! view has one shape to render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use diabetes_risk_shared::{
    validated_bmi, HealthMetrics, MetricField, PredictionResult, Sex, ValidationError,
};
use metrics::counter;
use secrecy::SecretString;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

/// Prefix of every failure message shown in the result view
pub const FAILURE_PREFIX: &str = "Prediction failed: ";

/// Form-encoded `/predict` payload
///
/// Height and weight are re-validated against the submission bounds and BMI
/// is recomputed from them. Pregnancies is always "0" for Male.
pub fn build_prediction_form(
    metrics: &HealthMetrics,
) -> Result<Vec<(String, String)>, ValidationError> {
    let bmi = validated_bmi(&metrics.height, &metrics.weight)?;

    let pregnancies = match metrics.sex {
        Some(Sex::Male) => "0".to_string(),
        _ => metrics.pregnancies.trim().to_string(),
    };
    let text = |value: &str| value.trim().to_string();

    let fields = [
        (MetricField::Pregnancies.wire_name(), pregnancies),
        (MetricField::Glucose.wire_name(), text(&metrics.glucose)),
        (MetricField::BloodPressure.wire_name(), text(&metrics.blood_pressure)),
        (MetricField::SkinThickness.wire_name(), text(&metrics.skin_thickness)),
        (MetricField::Insulin.wire_name(), text(&metrics.insulin)),
        ("BMI", bmi.value.to_string()),
        (
            MetricField::DiabetesPedigreeFunction.wire_name(),
            text(&metrics.diabetes_pedigree_function),
        ),
        (MetricField::Age.wire_name(), text(&metrics.age)),
        (
            MetricField::Sex.wire_name(),
            metrics.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        ),
        (MetricField::Height.wire_name(), text(&metrics.height)),
        (MetricField::Weight.wire_name(), text(&metrics.weight)),
        (
            MetricField::ActivityLevel.wire_name(),
            metrics
                .activity_level
                .unwrap_or_default()
                .as_str()
                .to_string(),
        ),
        (
            MetricField::Goal.wire_name(),
            metrics.goal.unwrap_or_default().as_str().to_string(),
        ),
    ];

    Ok(fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect())
}

/// Releases the in-flight flag when the submission ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Sends predictions, one at a time
///
/// Clones share the in-flight flag, so a second `submit` from any clone
/// while one is outstanding is refused.
#[derive(Clone)]
pub struct PredictionSubmitter {
    api: ApiClient,
    in_flight: Arc<AtomicBool>,
}

impl PredictionSubmitter {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the submit control should be disabled
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit `metrics`, attaching the bearer token when there is one
    ///
    /// Only [`ClientError::SubmissionInFlight`] is returned as an error.
    pub async fn submit(
        &self,
        metrics: &HealthMetrics,
        token: Option<&SecretString>,
    ) -> ClientResult<PredictionResult> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let span = info_span!(
            "prediction_submission",
            id = %Uuid::new_v4(),
            authenticated = token.is_some()
        );
        Ok(self.dispatch(metrics, token).instrument(span).await)
    }

    async fn dispatch(
        &self,
        metrics: &HealthMetrics,
        token: Option<&SecretString>,
    ) -> PredictionResult {
        counter!("predictions_submitted_total").increment(1);

        let form = match build_prediction_form(metrics) {
            Ok(form) => form,
            Err(e) => {
                counter!("predictions_failed_total", "reason" => "validation").increment(1);
                warn!(field = %e.field, "Submission rejected locally");
                return PredictionResult::error(format!("{}{}", FAILURE_PREFIX, e.user_message()));
            }
        };

        match self.api.predict(&form, token).await {
            Ok(result) => {
                info!(
                    prediction = %result.prediction,
                    risk_percentage = ?result.risk_percentage,
                    "Prediction received"
                );
                result
            }
            Err(e) => {
                let reason = match &e {
                    ClientError::Transport(_) => "transport",
                    ClientError::Decode(_) => "decode",
                    _ => "api",
                };
                counter!("predictions_failed_total", "reason" => reason).increment(1);
                warn!(error = %e, reason, "Prediction request failed");
                PredictionResult::error(format!("{}{}", FAILURE_PREFIX, e.user_message()))
            }
        }
    }
}
