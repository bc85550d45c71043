//! Input validation functions
//!
//! This module provides validation utilities for user input: numeric form
//! fields, the strict height/weight bounds applied before a prediction is
//! submitted, bearer-token structure and batch CSV headers.

use std::fmt;

/// Upper bound (inclusive) for height at submission time
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// Upper bound (inclusive) for weight at submission time
pub const MAX_WEIGHT_KG: f64 = 200.0;

/// Columns the batch prediction endpoint requires
pub const REQUIRED_CSV_COLUMNS: &[&str] = &[
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
    "Name",
];

/// Parse a numeric form field
///
/// Empty, unparsable and non-finite input all count as "not provided".
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate height value (in cm) for submission
/// Valid range: (0, 250] cm
pub fn validate_height_cm(raw: &str) -> Result<f64, ValidationError> {
    match parse_measurement(raw) {
        Some(height) if height > 0.0 && height <= MAX_HEIGHT_CM => Ok(height),
        _ => Err(ValidationError::new(
            "Height",
            "please enter a valid height between 1 and 250 cm",
        )),
    }
}

/// Validate weight value (in kg) for submission
/// Valid range: (0, 200] kg
pub fn validate_weight_kg(raw: &str) -> Result<f64, ValidationError> {
    match parse_measurement(raw) {
        Some(weight) if weight > 0.0 && weight <= MAX_WEIGHT_KG => Ok(weight),
        _ => Err(ValidationError::new(
            "Weight",
            "please enter a valid weight between 1 and 200 kg",
        )),
    }
}

/// Check that a bearer token has the three-segment JWT shape
///
/// This is a structural check only; the server stays the authority on
/// whether the token is actually valid.
pub fn validate_token_structure(token: &str) -> Result<(), ValidationError> {
    let token_regex = regex_lite::Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$")
        .map_err(|e| ValidationError::new("token", &e.to_string()))?;
    if !token_regex.is_match(token.trim()) {
        return Err(ValidationError::new("token", "is not a well-formed token"));
    }
    Ok(())
}

/// Ensure a batch CSV header carries every required column
pub fn validate_csv_header<'a, I>(headers: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let missing: Vec<&str> = REQUIRED_CSV_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(
            "file",
            &format!("missing required columns: {}", missing.join(", ")),
        ))
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "Pregnancies" => "Number of Pregnancies",
        "Glucose" => "Glucose (mg/dL)",
        "BloodPressure" => "Blood Pressure (mmHg)",
        "SkinThickness" => "Skin Thickness (mm)",
        "Insulin" => "Insulin (μU/ml)",
        "Height" => "Height",
        "Weight" => "Weight",
        "DiabetesPedigreeFunction" => "Diabetes Pedigree Function",
        "Age" => "Age (years)",
        "ActivityLevel" => "Activity Level",
        "Goal" => "Goal",
        "file" => "CSV File",
        "token" => "Session",
        "username" => "Username",
        "password" => "Password",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("170", Some(170.0))]
    #[case(" 70.5 ", Some(70.5))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("inf", None)]
    #[case("NaN", None)]
    fn test_parse_measurement(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_measurement(raw), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("250", true)]
    #[case("0", false)]
    #[case("250.1", false)]
    #[case("300", false)]
    #[case("-5", false)]
    #[case("", false)]
    fn test_validate_height_cm(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(validate_height_cm(raw).is_ok(), ok);
    }

    #[rstest]
    #[case("1", true)]
    #[case("200", true)]
    #[case("0", false)]
    #[case("200.5", false)]
    #[case("heavy", false)]
    fn test_validate_weight_kg(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(validate_weight_kg(raw).is_ok(), ok);
    }

    #[test]
    fn test_height_message_mentions_valid_height() {
        let err = validate_height_cm("300").unwrap_err();
        assert_eq!(err.field, "Height");
        assert!(err.user_message().contains("valid height"));
    }

    #[test]
    fn test_validate_token_structure() {
        assert!(validate_token_structure("aaa.bbb.ccc").is_ok());
        assert!(validate_token_structure("eyJhbGciOiJIUzI1NiJ9.e30.sig-_x").is_ok());
        assert!(validate_token_structure("").is_err());
        assert!(validate_token_structure("only.two").is_err());
        assert!(validate_token_structure("a.b.c.d").is_err());
        assert!(validate_token_structure("a..c").is_err());
        assert!(validate_token_structure("has space.b.c").is_err());
    }

    #[test]
    fn test_validate_csv_header() {
        assert!(validate_csv_header(REQUIRED_CSV_COLUMNS.iter().copied()).is_ok());

        let err = validate_csv_header(["Name", "Glucose"]).unwrap_err();
        assert!(err.message.contains("Pregnancies"));
        assert!(!err.message.contains("Glucose,"));
    }

    #[test]
    fn test_validation_error() {
        let err = ValidationError::new("Height", "must be positive");
        assert_eq!(err.display_label, "Height");
        assert_eq!(err.user_message(), "Height: must be positive");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(height in 0.01f64..=250.0) {
            prop_assert!(validate_height_cm(&height.to_string()).is_ok());
        }

        #[test]
        fn prop_invalid_height_above_max(height in 250.01f64..1000.0) {
            prop_assert!(validate_height_cm(&height.to_string()).is_err());
        }

        #[test]
        fn prop_valid_weight_range(weight in 0.01f64..=200.0) {
            prop_assert!(validate_weight_kg(&weight.to_string()).is_ok());
        }
    }
}
