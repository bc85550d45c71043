//! Multi-step prediction wizard
//!
//! [`StepController`] holds the rules; [`Wizard`] wires it to the clock,
//! the submitter and the shared application state.

mod popup;
mod steps;

pub use popup::{BmiPopup, PopupEvent, PopupPhase, PopupTimings};
pub use steps::{Step, StepController, WizardAction};

use diabetes_risk_shared::{MetricField, PredictionResult, ValidationError};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::recommendation::{load_recommendations, RecommendationView};
use crate::state::AppState;
use crate::submission::PredictionSubmitter;

pub struct Wizard {
    controller: StepController,
    submitter: PredictionSubmitter,
    state: AppState,
}

impl Wizard {
    pub async fn new(state: AppState) -> Self {
        let timings = PopupTimings::from(&state.config().wizard);
        let controller = StepController::new(timings, state.is_authenticated().await);
        let submitter = PredictionSubmitter::new(state.api().clone());
        Self {
            controller,
            submitter,
            state,
        }
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn step(&self) -> Step {
        self.controller.step()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_submitting()
    }

    pub fn set_field(&mut self, field: MetricField, value: &str) -> Result<(), ValidationError> {
        self.controller.set_field(field, value)
    }

    pub fn advance(&mut self) -> Result<WizardAction, ValidationError> {
        self.controller.advance(Instant::now())
    }

    /// Start the popup's fade-out now; see [`Self::settle_popup`]
    pub fn dismiss_popup(&mut self) -> bool {
        self.controller.dismiss_popup(Instant::now())
    }

    pub fn back(&mut self) -> WizardAction {
        self.controller.back()
    }

    /// Sleep until the popup's next transition and apply it
    ///
    /// Returns immediately with `WizardAction::None` when nothing is
    /// scheduled.
    pub async fn wait_for_timer(&mut self) -> WizardAction {
        let Some(deadline) = self.controller.next_deadline() else {
            return WizardAction::None;
        };
        sleep_until(deadline).await;
        self.controller.on_timer(Instant::now())
    }

    /// Run the popup to completion, returning the step change it caused
    pub async fn settle_popup(&mut self) -> WizardAction {
        let mut outcome = WizardAction::None;
        while self.controller.next_deadline().is_some() {
            let action = self.wait_for_timer().await;
            if action != WizardAction::None {
                outcome = action;
            }
        }
        outcome
    }

    /// Submit from step 2 without moving on
    pub async fn submit(&mut self) -> ClientResult<Option<PredictionResult>> {
        match self.controller.submit_request() {
            WizardAction::Submit { then_advance } => {
                let result = self.dispatch().await?;
                self.controller.submission_finished(then_advance);
                Ok(Some(result))
            }
            _ => Ok(None),
        }
    }

    /// Submit and move to step 3, or ask for a login when logged out
    pub async fn continue_to_recommendations(&mut self) -> ClientResult<WizardAction> {
        match self.controller.continue_to_recommendations() {
            WizardAction::Submit { then_advance } => {
                self.dispatch().await?;
                Ok(self.controller.submission_finished(then_advance))
            }
            other => Ok(other),
        }
    }

    pub fn finish(&mut self) -> Result<WizardAction, ValidationError> {
        self.controller.finish()
    }

    /// Load the recommendation view for the current result
    pub async fn recommendations(&self) -> ClientResult<RecommendationView> {
        load_recommendations(self.state.api(), self.controller.metrics()).await
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        self.state.logout().await?;
        self.controller.reset();
        self.controller.set_authenticated(false);
        Ok(())
    }

    /// Start a new prediction; pending popup timers are dropped
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    async fn dispatch(&mut self) -> ClientResult<PredictionResult> {
        let token = self.state.token().await;
        let result = self
            .submitter
            .submit(self.controller.metrics(), token.as_ref())
            .await?;
        self.controller.metrics_mut().result = Some(result.clone());

        if token.is_some() && !result.is_error() {
            match self.state.refresh_history().await {
                Ok(entries) => debug!(entries, "History refreshed"),
                Err(e) => warn!(error = %e, "History fetch failed"),
            }
        }
        Ok(result)
    }
}
