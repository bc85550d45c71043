//! Recommendation view assembly
//!
//! Combines the `/recommend` nutrition targets with the static meal,
//! exercise and tip content for one prediction.

use diabetes_risk_shared::recommendations::{
    exercise_plan, personalized_meal_plan, DailyGuidance, Exercise, PersonalizedMealPlan,
    TipCarousel,
};
use diabetes_risk_shared::{
    ActivityLevel, HealthMetrics, NutritionTargets, PredictionResult, RecommendationQuery,
    RecommendationResponse, RiskLevel,
};
use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

/// Everything the recommendations screen shows
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub prediction: String,
    pub risk_level: RiskLevel,
    pub diabetic: bool,
    pub bmi: f64,
    pub tdee: f64,
    pub targets: NutritionTargets,
    pub activity_level: ActivityLevel,
    pub meal_plan: PersonalizedMealPlan,
    pub exercises: &'static [Exercise],
    #[serde(skip)]
    pub tips: TipCarousel,
    pub guidance: DailyGuidance,
}

impl RecommendationView {
    pub fn build(
        result: &PredictionResult,
        query: &RecommendationQuery,
        response: RecommendationResponse,
    ) -> Self {
        let diabetic = query.diabetic;
        Self {
            prediction: result.prediction.clone(),
            risk_level: result.risk_level(),
            diabetic,
            bmi: response.bmi,
            tdee: response.tdee,
            targets: response.nutrition,
            activity_level: query.activity_level,
            meal_plan: personalized_meal_plan(
                Some(response.nutrition.energy),
                query.activity_level,
            ),
            exercises: exercise_plan(query.activity_level, diabetic),
            tips: TipCarousel::new(diabetic),
            guidance: DailyGuidance::new(query.weight_kg, &response.nutrition),
        }
    }
}

/// Fetch nutrition targets for a submitted form and assemble the view
pub async fn load_recommendations(
    api: &ApiClient,
    metrics: &HealthMetrics,
) -> ClientResult<RecommendationView> {
    let result = metrics
        .result
        .as_ref()
        .ok_or_else(|| ClientError::Validation("Submit a prediction first".to_string()))?;
    let query = RecommendationQuery::from_metrics(metrics, result)?;

    let response = api.recommend(&query).await?;
    info!(
        energy = response.nutrition.energy,
        diabetic = query.diabetic,
        "Recommendations loaded"
    );
    Ok(RecommendationView::build(result, &query, response))
}

/// Message shown when recommendations cannot be loaded
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ClientError::Api { message: None, .. } | ClientError::Decode(_) => {
            "Failed to fetch recommendations".to_string()
        }
        ClientError::Transport(e) => format!("Error fetching recommendations: {}", e),
        other => other.user_message(),
    }
}
