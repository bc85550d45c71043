//! Health metric input model and BMI calculations
//!
//! Holds the canonical shape of one prediction request as the user fills it
//! in, together with the BMI calculator that derives the read-only BMI field.
//!
//! # Design Principles
//!
//! 1. **Form semantics**: numeric fields keep the raw text the user typed;
//!    empty or unparsable text means "not provided yet"
//! 2. **Pure calculations**: BMI helpers have no side effects
//! 3. **Two validation tiers**: a lenient display path and a strict
//!    submission path

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::PredictionResult;
use crate::validation::{
    parse_measurement, validate_height_cm, validate_weight_kg, ValidationError,
};

/// Highest BMI value ever displayed; anything above is clamped.
pub const BMI_DISPLAY_CAP: f64 = 60.0;

// ============================================================================
// Enumerated Inputs
// ============================================================================

/// Biological sex as collected by the prediction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(ValidationError::new("Sex", "must be Male or Female")),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported activity level
///
/// The form labels the middle option "Moderate"; older payloads call it
/// "Medium". Both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityLevel {
    /// Little to no exercise
    Low,
    /// 3-5 days of exercise per week
    #[default]
    #[serde(rename = "Moderate", alias = "Medium")]
    Medium,
    /// Daily exercise or intense training
    High,
}

impl ActivityLevel {
    /// Value sent to the remote API
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Medium => "Moderate",
            ActivityLevel::High => "High",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Little to no exercise",
            ActivityLevel::Medium => "3-5 days of exercise per week",
            ActivityLevel::High => "Daily exercise or intense training",
        }
    }

    /// Multiplier applied to the calorie target when scaling meal plans
    pub fn meal_plan_factor(&self) -> f64 {
        match self {
            ActivityLevel::Low => 0.95,
            ActivityLevel::Medium => 1.0,
            ActivityLevel::High => 1.05,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "medium" | "moderate" => Ok(ActivityLevel::Medium),
            "high" => Ok(ActivityLevel::High),
            _ => Err(ValidationError::new(
                "ActivityLevel",
                "must be one of: Low, Moderate, High",
            )),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body-composition goal used for nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Goal {
    Cutting,
    #[default]
    Standard,
    Bulking,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Cutting => "Cutting",
            Goal::Standard => "Standard",
            Goal::Bulking => "Bulking",
        }
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cutting" => Ok(Goal::Cutting),
            "standard" => Ok(Goal::Standard),
            "bulking" => Ok(Goal::Bulking),
            _ => Err(ValidationError::new(
                "Goal",
                "must be one of: Cutting, Standard, Bulking",
            )),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Label shown in the BMI popup
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A displayable BMI value with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    /// BMI rounded to one decimal and capped at [`BMI_DISPLAY_CAP`]
    pub value: f64,
    pub category: BmiCategory,
}

/// Calculate BMI from height and weight
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

fn round_and_cap(bmi: f64) -> f64 {
    ((bmi * 10.0).round() / 10.0).min(BMI_DISPLAY_CAP)
}

/// Lenient BMI used while the form is being filled in
///
/// Returns `None` ("BMI not yet available") when either input is missing or
/// non-finite, or when the height is not positive. Never returns NaN.
pub fn bmi_reading(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<BmiReading> {
    let (height, weight) = (height_cm?, weight_kg?);
    if !height.is_finite() || !weight.is_finite() || height <= 0.0 {
        return None;
    }

    let value = round_and_cap(calculate_bmi(height, weight));
    if !value.is_finite() {
        return None;
    }

    Some(BmiReading {
        value,
        category: classify_bmi(value),
    })
}

/// Strict BMI used at submission time
///
/// Height must be in (0, 250] cm and weight in (0, 200] kg.
pub fn validated_bmi(height_raw: &str, weight_raw: &str) -> Result<BmiReading, ValidationError> {
    let height = validate_height_cm(height_raw)?;
    let weight = validate_weight_kg(weight_raw)?;
    let value = round_and_cap(calculate_bmi(height, weight));
    Ok(BmiReading {
        value,
        category: classify_bmi(value),
    })
}

// ============================================================================
// Health Metric Input Model
// ============================================================================

/// Fields of the prediction form that the user can edit
///
/// BMI is deliberately absent: it is derived and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Height,
    Weight,
    DiabetesPedigreeFunction,
    Age,
    Sex,
    ActivityLevel,
    Goal,
}

impl MetricField {
    pub const ALL: [MetricField; 12] = [
        MetricField::Pregnancies,
        MetricField::Glucose,
        MetricField::BloodPressure,
        MetricField::SkinThickness,
        MetricField::Insulin,
        MetricField::Height,
        MetricField::Weight,
        MetricField::DiabetesPedigreeFunction,
        MetricField::Age,
        MetricField::Sex,
        MetricField::ActivityLevel,
        MetricField::Goal,
    ];

    /// Key used in form-encoded payloads
    pub fn wire_name(&self) -> &'static str {
        match self {
            MetricField::Pregnancies => "Pregnancies",
            MetricField::Glucose => "Glucose",
            MetricField::BloodPressure => "BloodPressure",
            MetricField::SkinThickness => "SkinThickness",
            MetricField::Insulin => "Insulin",
            MetricField::Height => "Height",
            MetricField::Weight => "Weight",
            MetricField::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            MetricField::Age => "Age",
            MetricField::Sex => "Sex",
            MetricField::ActivityLevel => "ActivityLevel",
            MetricField::Goal => "Goal",
        }
    }
}

impl FromStr for MetricField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "BMI" {
            return Err(ValidationError::new("BMI", "is calculated automatically"));
        }
        MetricField::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| ValidationError::new(s, "is not a form field"))
    }
}

/// One in-progress or submitted prediction request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub pregnancies: String,
    pub glucose: String,
    pub blood_pressure: String,
    pub skin_thickness: String,
    pub insulin: String,
    /// Centimetres
    pub height: String,
    /// Kilograms
    pub weight: String,
    pub diabetes_pedigree_function: String,
    pub age: String,
    pub sex: Option<Sex>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    bmi: Option<BmiReading>,
    /// (height, weight) text the cached BMI was computed from
    #[serde(skip)]
    bmi_inputs: Option<(String, String)>,
    pub result: Option<PredictionResult>,
}

impl HealthMetrics {
    /// Empty form with default activity level and goal
    pub fn new() -> Self {
        Self {
            activity_level: Some(ActivityLevel::default()),
            goal: Some(Goal::default()),
            ..Default::default()
        }
    }

    /// Replace every field with the defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Update one field from user input
    pub fn set_field(&mut self, field: MetricField, value: &str) -> Result<(), ValidationError> {
        match field {
            MetricField::Pregnancies => {
                if self.sex == Some(Sex::Male) {
                    self.pregnancies = "0".to_string();
                } else {
                    self.pregnancies = value.to_string();
                }
            }
            MetricField::Glucose => self.glucose = value.to_string(),
            MetricField::BloodPressure => self.blood_pressure = value.to_string(),
            MetricField::SkinThickness => self.skin_thickness = value.to_string(),
            MetricField::Insulin => self.insulin = value.to_string(),
            MetricField::Height => {
                self.height = value.to_string();
                self.refresh_bmi();
            }
            MetricField::Weight => {
                self.weight = value.to_string();
                self.refresh_bmi();
            }
            MetricField::DiabetesPedigreeFunction => {
                self.diabetes_pedigree_function = value.to_string()
            }
            MetricField::Age => self.age = value.to_string(),
            MetricField::Sex => self.set_sex(value.parse()?),
            MetricField::ActivityLevel => self.activity_level = Some(value.parse()?),
            MetricField::Goal => self.goal = Some(value.parse()?),
        }
        Ok(())
    }

    /// Select a sex, applying the pregnancies rule
    ///
    /// Male forces pregnancies to "0". Switching to Female from anything
    /// else clears the field for re-entry; the earlier value is not restored.
    pub fn set_sex(&mut self, sex: Sex) {
        match sex {
            Sex::Male => self.pregnancies = "0".to_string(),
            Sex::Female if self.sex != Some(Sex::Female) => self.pregnancies.clear(),
            Sex::Female => {}
        }
        self.sex = Some(sex);
    }

    /// The pregnancies input is only collected for Female
    pub fn pregnancies_visible(&self) -> bool {
        self.sex == Some(Sex::Female)
    }

    /// Current read-only BMI, if height and weight allow one
    pub fn bmi(&self) -> Option<BmiReading> {
        self.bmi
    }

    pub fn height_cm(&self) -> Option<f64> {
        parse_measurement(&self.height)
    }

    pub fn weight_kg(&self) -> Option<f64> {
        parse_measurement(&self.weight)
    }

    pub fn age_years(&self) -> Option<f64> {
        parse_measurement(&self.age)
    }

    /// Recompute BMI unless it is already cached for the current inputs
    fn refresh_bmi(&mut self) {
        let key = (self.height.trim().to_string(), self.weight.trim().to_string());
        if self.bmi_inputs.as_ref() == Some(&key) {
            return;
        }
        self.bmi = bmi_reading(self.height_cm(), self.weight_kg());
        self.bmi_inputs = Some(key);
    }
}
