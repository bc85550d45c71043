//! End-to-end wizard flows against a mock prediction API

mod common;

use common::{issue_token, prediction_body, TestApp};
use diabetes_risk_client::wizard::{Step, Wizard, WizardAction};
use diabetes_risk_shared::{MetricField, RiskLevel};
use serde_json::json;

fn fill_step_one(wizard: &mut Wizard, sex: &str) {
    wizard.set_field(MetricField::Sex, sex).unwrap();
    wizard.set_field(MetricField::Age, "50").unwrap();
    wizard.set_field(MetricField::Height, "170").unwrap();
    wizard.set_field(MetricField::Weight, "70").unwrap();
}

fn fill_step_two(wizard: &mut Wizard) {
    for (field, value) in [
        (MetricField::Glucose, "148"),
        (MetricField::BloodPressure, "72"),
        (MetricField::SkinThickness, "35"),
        (MetricField::Insulin, "0"),
        (MetricField::DiabetesPedigreeFunction, "0.627"),
    ] {
        wizard.set_field(field, value).unwrap();
    }
}

async fn reach_step_two(wizard: &mut Wizard) {
    let action = wizard.advance().unwrap();
    assert!(matches!(action, WizardAction::PopupShown(r) if r.value == 24.2));
    assert!(wizard.dismiss_popup());
    assert_eq!(wizard.step(), Step::Anthropometrics);
    assert_eq!(
        wizard.settle_popup().await,
        WizardAction::Advanced(Step::ClinicalInputs)
    );
    assert!(!wizard.controller().popup().is_visible());
}

#[tokio::test]
async fn test_guest_prediction_ends_at_step_two() {
    let app = TestApp::new().await;
    app.mock_json("POST", "/predict", 200, prediction_body("Not Diabetic", 21.0))
        .await;

    let mut wizard = Wizard::new(app.state().await).await;
    assert_eq!(wizard.controller().total_steps(), 2);
    fill_step_one(&mut wizard, "Male");
    reach_step_two(&mut wizard).await;
    fill_step_two(&mut wizard);

    assert_eq!(
        wizard.continue_to_recommendations().await.unwrap(),
        WizardAction::PromptLogin
    );
    assert!(app.requests_to("/predict").await.is_empty());

    let result = wizard.submit().await.unwrap().unwrap();
    assert_eq!(result.prediction, "Not Diabetic");
    assert_eq!(wizard.step(), Step::ClinicalInputs);

    let requests = app.requests_to("/predict").await;
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("Pregnancies=0"));
    assert!(body.contains("BMI=24.2"));
    assert!(app.requests_to("/history").await.is_empty());
}

#[tokio::test]
async fn test_logged_in_flow_reaches_recommendations() {
    let app = TestApp::new().await;
    app.seed_session(Some(issue_token("12", 3600))).await;
    app.mock_history(json!([])).await;
    app.mock_json("POST", "/predict", 200, prediction_body("Diabetic", 78.0))
        .await;
    app.mock_json(
        "POST",
        "/recommend",
        200,
        json!({
            "bmi": 24.2,
            "tdee": 2100.0,
            "nutrition": {"energy": 1300.0, "carbs": 130.0, "protein": 98.0, "fat": 43.0}
        }),
    )
    .await;

    let mut wizard = Wizard::new(app.state().await).await;
    assert_eq!(wizard.controller().total_steps(), 3);
    fill_step_one(&mut wizard, "Female");
    reach_step_two(&mut wizard).await;
    wizard.set_field(MetricField::Pregnancies, "3").unwrap();
    fill_step_two(&mut wizard);

    assert_eq!(
        wizard.continue_to_recommendations().await.unwrap(),
        WizardAction::Advanced(Step::ActivityGoal)
    );
    let predict = app.requests_to("/predict").await;
    assert!(predict[0].headers.contains_key("authorization"));
    // Startup revalidation plus the refresh after the prediction
    assert_eq!(app.requests_to("/history").await.len(), 2);

    wizard.set_field(MetricField::ActivityLevel, "Low").unwrap();
    wizard.set_field(MetricField::Goal, "Cutting").unwrap();
    assert_eq!(wizard.finish().unwrap(), WizardAction::OpenRecommendations);

    let view = wizard.recommendations().await.unwrap();
    assert_eq!(view.risk_level, RiskLevel::High);
    assert_eq!(view.meal_plan.base_calories, 1200);
    assert_eq!(view.exercises[0].name, "Walking");

    let recommend = app.requests_to("/recommend").await;
    let body = String::from_utf8_lossy(&recommend[0].body).to_string();
    assert!(body.contains("Height=1.7"));
    assert!(body.contains("Diabetic=true"));
    assert!(body.contains("ActivityLevel=Low"));
}

#[tokio::test]
async fn test_out_of_range_height_never_reaches_the_api() {
    let app = TestApp::new().await;
    app.mock_json("POST", "/predict", 200, prediction_body("Not Diabetic", 10.0))
        .await;

    let mut wizard = Wizard::new(app.state().await).await;
    fill_step_one(&mut wizard, "Male");
    reach_step_two(&mut wizard).await;
    fill_step_two(&mut wizard);
    // Editing height after step 1 keeps the lenient BMI but fails the strict bounds
    wizard.set_field(MetricField::Height, "300").unwrap();

    let result = wizard.submit().await.unwrap().unwrap();
    assert!(result.is_error());
    assert!(result.diet_suggestion.contains("valid height"));
    assert!(app.requests_to("/predict").await.is_empty());
}

#[tokio::test]
async fn test_server_failure_is_shown_as_result() {
    let app = TestApp::new().await;
    app.mock_json(
        "POST",
        "/predict",
        400,
        json!({"message": "Missing or empty field: Glucose"}),
    )
    .await;

    let mut wizard = Wizard::new(app.state().await).await;
    fill_step_one(&mut wizard, "Male");
    reach_step_two(&mut wizard).await;

    let result = wizard.submit().await.unwrap().unwrap();
    assert_eq!(
        result.diet_suggestion,
        "Prediction failed: Missing or empty field: Glucose"
    );
    assert_eq!(
        wizard.controller().metrics().result.as_ref().unwrap().risk_level(),
        RiskLevel::Error
    );
}
