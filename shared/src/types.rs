//! API request and response types

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::health_metrics::{ActivityLevel, Goal, HealthMetrics, Sex};
use crate::validation::{validate_height_cm, validate_weight_kg, ValidationError};

/// Label the client uses for a failed prediction
pub const ERROR_LABEL: &str = "Error";
/// Label returned for a positive prediction
pub const DIABETIC_LABEL: &str = "Diabetic";
/// Intermediate label, treated as diabetic for recommendations
pub const BORDERLINE_LABEL: &str = "Borderline Risk";

/// Returns true for labels that get diabetic-specific recommendations
pub fn is_diabetic_label(label: &str) -> bool {
    label == DIABETIC_LABEL || label == BORDERLINE_LABEL
}

// ============================================================================
// Prediction Types
// ============================================================================

/// Outcome of a single prediction
///
/// Failures are encoded in the same shape with `prediction == "Error"` and
/// the human-readable reason in `diet_suggestion`, so renderers only ever
/// check one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_percentage: Option<f64>,
    #[serde(default)]
    pub diet_suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// Display severity derived from a prediction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Error,
    High,
    Medium,
    Low,
}

impl PredictionResult {
    /// Build the error sentinel carrying a user-facing message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            prediction: ERROR_LABEL.to_string(),
            glucose: None,
            blood_pressure: None,
            risk_percentage: None,
            diet_suggestion: message.into(),
            probability: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.prediction == ERROR_LABEL
    }

    pub fn is_diabetic(&self) -> bool {
        is_diabetic_label(&self.prediction)
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self.prediction.as_str() {
            ERROR_LABEL => RiskLevel::Error,
            DIABETIC_LABEL => RiskLevel::High,
            BORDERLINE_LABEL => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// One row of a batch CSV prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvPrediction {
    #[serde(deserialize_with = "string_or_number")]
    pub name: String,
    pub prediction: String,
    pub risk_percentage: f64,
}

/// Success body of the batch prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvPredictionResponse {
    pub predictions: Vec<CsvPrediction>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

// ============================================================================
// History Types
// ============================================================================

/// A stored prediction from the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prediction: String,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub risk_percentage: f64,
    #[serde(default)]
    pub diet_suggestion: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl HistoryEntry {
    /// "High" above 50% risk, otherwise "Low"
    pub fn risk_band(&self) -> &'static str {
        if self.risk_percentage > 50.0 {
            "High"
        } else {
            "Low"
        }
    }

    /// Parse the server timestamp (SQLite or RFC 3339 format)
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%d %H:%M:%S")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.timestamp)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }
}

/// Success body of the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Login and registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Token returned by login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure body; the API uses `message` on some routes and `error` on others
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Reported accuracy of the served model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAccuracy {
    pub accuracy: String,
}

// ============================================================================
// Recommendation Types
// ============================================================================

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// kcal
    pub energy: f64,
    /// grams
    pub carbs: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub fat: f64,
}

/// Success body of the recommendation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub bmi: f64,
    pub tdee: f64,
    pub nutrition: NutritionTargets,
}

/// Form payload for the recommendation endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub age: f64,
    pub height_m: f64,
    pub weight_kg: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diabetic: bool,
}

impl RecommendationQuery {
    /// Derive the query from a submitted form and its prediction
    pub fn from_metrics(
        metrics: &HealthMetrics,
        result: &PredictionResult,
    ) -> Result<Self, ValidationError> {
        let height_cm = validate_height_cm(&metrics.height)?;
        let weight_kg = validate_weight_kg(&metrics.weight)?;
        let age = metrics
            .age_years()
            .filter(|a| *a >= 0.0)
            .ok_or_else(|| ValidationError::new("Age", "please enter your age"))?;
        let sex = metrics
            .sex
            .ok_or_else(|| ValidationError::new("Sex", "please select Male or Female"))?;
        let activity_level = metrics
            .activity_level
            .ok_or_else(|| {
                ValidationError::new("ActivityLevel", "please select an activity level")
            })?;
        let goal = metrics
            .goal
            .ok_or_else(|| ValidationError::new("Goal", "please select a goal"))?;

        Ok(Self {
            age,
            height_m: height_cm / 100.0,
            weight_kg,
            sex,
            activity_level,
            goal,
            diabetic: result.is_diabetic(),
        })
    }

    /// Form-encoded key/value pairs
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Age", self.age.to_string()),
            ("Height", self.height_m.to_string()),
            ("Weight", self.weight_kg.to_string()),
            ("Sex", self.sex.as_str().to_string()),
            ("ActivityLevel", self.activity_level.as_str().to_string()),
            ("Goal", self.goal.as_str().to_string()),
            ("Diabetic", self.diabetic.to_string()),
        ]
    }
}
