//! Step controller for the prediction wizard
//!
//! Synchronous and clock-free: callers pass `now` in and act on the
//! returned [`WizardAction`]. The async [`super::Wizard`] shell does the
//! sleeping and the network calls.

use diabetes_risk_shared::{BmiReading, HealthMetrics, MetricField, ValidationError};
use tokio::time::Instant;
use tracing::debug;

use super::popup::{BmiPopup, PopupEvent, PopupTimings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Anthropometrics = 1,
    ClinicalInputs = 2,
    ActivityGoal = 3,
}

impl Step {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Anthropometrics => "Body measurements",
            Step::ClinicalInputs => "Clinical inputs",
            Step::ActivityGoal => "Activity and goal",
        }
    }

    fn previous(&self) -> Option<Step> {
        match self {
            Step::Anthropometrics => None,
            Step::ClinicalInputs => Some(Step::Anthropometrics),
            Step::ActivityGoal => Some(Step::ClinicalInputs),
        }
    }
}

/// Follow-up the caller must perform
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    None,
    /// The BMI popup is now showing this reading
    PopupShown(BmiReading),
    /// The wizard moved forward to this step
    Advanced(Step),
    /// The wizard moved back to this step
    MovedBack(Step),
    /// Submit the form; on success, call [`StepController::submission_finished`]
    Submit { then_advance: bool },
    /// The user needs to log in before continuing
    PromptLogin,
    /// Show the recommendations view
    OpenRecommendations,
}

#[derive(Debug, Clone)]
pub struct StepController {
    step: Step,
    authenticated: bool,
    popup: BmiPopup,
    metrics: HealthMetrics,
}

impl StepController {
    pub fn new(timings: PopupTimings, authenticated: bool) -> Self {
        Self {
            step: Step::Anthropometrics,
            authenticated,
            popup: BmiPopup::new(timings),
            metrics: HealthMetrics::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// 3 when logged in, otherwise the wizard ends at step 2
    pub fn total_steps(&self) -> u8 {
        if self.authenticated {
            3
        } else {
            2
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn popup(&self) -> &BmiPopup {
        &self.popup
    }

    pub fn metrics(&self) -> &HealthMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut HealthMetrics {
        &mut self.metrics
    }

    pub fn set_field(&mut self, field: MetricField, value: &str) -> Result<(), ValidationError> {
        self.metrics.set_field(field, value)
    }

    /// Leave step 1. Needs a BMI; shows the popup, and the step changes
    /// once the popup has faded out.
    pub fn advance(&mut self, now: Instant) -> Result<WizardAction, ValidationError> {
        if self.step != Step::Anthropometrics {
            return Ok(WizardAction::None);
        }
        if self.popup.is_visible() {
            return Ok(WizardAction::None);
        }

        let reading = self.metrics.bmi().ok_or_else(|| {
            ValidationError::new("BMI", "enter your height and weight to calculate BMI")
        })?;
        self.popup.show(reading, now);
        debug!(bmi = reading.value, category = %reading.category, "BMI popup shown");
        Ok(WizardAction::PopupShown(reading))
    }

    /// Start the popup's fade-out early; the step changes when it ends
    pub fn dismiss_popup(&mut self, now: Instant) -> bool {
        self.popup.dismiss(now)
    }

    /// Drive the popup timer
    pub fn on_timer(&mut self, now: Instant) -> WizardAction {
        let event = self.popup.on_timer(now);
        self.apply(event)
    }

    /// When [`Self::on_timer`] next needs to run
    pub fn next_deadline(&self) -> Option<Instant> {
        self.popup.deadline()
    }

    pub fn back(&mut self) -> WizardAction {
        let Some(previous) = self.step.previous() else {
            return WizardAction::None;
        };
        self.popup.cancel();
        self.step = previous;
        WizardAction::MovedBack(previous)
    }

    /// Plain submission from step 2
    pub fn submit_request(&mut self) -> WizardAction {
        if self.step != Step::ClinicalInputs {
            return WizardAction::None;
        }
        WizardAction::Submit { then_advance: false }
    }

    /// "Continue to recommendations" from step 2
    pub fn continue_to_recommendations(&mut self) -> WizardAction {
        if self.step != Step::ClinicalInputs {
            return WizardAction::None;
        }
        if !self.authenticated {
            return WizardAction::PromptLogin;
        }
        WizardAction::Submit { then_advance: true }
    }

    /// Report the outcome of a `Submit { then_advance: true }`
    pub fn submission_finished(&mut self, then_advance: bool) -> WizardAction {
        let succeeded = self
            .metrics
            .result
            .as_ref()
            .is_some_and(|result| !result.is_error());

        if then_advance && succeeded && self.authenticated && self.step == Step::ClinicalInputs {
            self.step = Step::ActivityGoal;
            return WizardAction::Advanced(Step::ActivityGoal);
        }
        WizardAction::None
    }

    /// Leave step 3 for the recommendations view
    pub fn finish(&mut self) -> Result<WizardAction, ValidationError> {
        if self.step != Step::ActivityGoal {
            return Ok(WizardAction::None);
        }
        if self.metrics.activity_level.is_none() {
            return Err(ValidationError::new(
                "ActivityLevel",
                "please select an activity level",
            ));
        }
        if self.metrics.goal.is_none() {
            return Err(ValidationError::new("Goal", "please select a goal"));
        }
        Ok(WizardAction::OpenRecommendations)
    }

    /// Back to an empty step 1
    pub fn reset(&mut self) {
        self.popup.cancel();
        self.metrics.reset();
        self.step = Step::Anthropometrics;
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
        if !authenticated && self.step == Step::ActivityGoal {
            self.step = Step::ClinicalInputs;
        }
    }

    fn apply(&mut self, event: PopupEvent) -> WizardAction {
        match event {
            PopupEvent::Advance if self.step == Step::Anthropometrics => {
                self.step = Step::ClinicalInputs;
                WizardAction::Advanced(Step::ClinicalInputs)
            }
            _ => WizardAction::None,
        }
    }
}
