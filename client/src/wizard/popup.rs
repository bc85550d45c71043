//! BMI information popup
//!
//! Four phases driven by one deadline at a time:
//!
//! ```text
//! Hidden --show--> FadingIn --fade_in--> Holding --hold--> FadingOut --fade_out--> Hidden
//!                      \________dismiss________/
//! ```
//!
//! Dismissal only starts the fade-out early. The wizard moves on to step 2
//! when the fade-out completes and the popup is hidden.

use std::time::Duration;

use diabetes_risk_shared::BmiReading;
use tokio::time::Instant;

use crate::config::WizardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    Hidden,
    FadingIn,
    Holding,
    FadingOut,
}

/// What a popup transition asks of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    None,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTimings {
    pub fade_in: Duration,
    /// Measured from `show`, so it includes the fade-in
    pub hold: Duration,
    pub fade_out: Duration,
}

impl From<&WizardConfig> for PopupTimings {
    fn from(config: &WizardConfig) -> Self {
        Self {
            fade_in: config.fade_in(),
            hold: config.hold(),
            fade_out: config.fade_out(),
        }
    }
}

impl Default for PopupTimings {
    fn default() -> Self {
        Self::from(&WizardConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct BmiPopup {
    phase: PopupPhase,
    deadline: Option<Instant>,
    shown_at: Option<Instant>,
    reading: Option<BmiReading>,
    timings: PopupTimings,
}

impl BmiPopup {
    pub fn new(timings: PopupTimings) -> Self {
        Self {
            phase: PopupPhase::Hidden,
            deadline: None,
            shown_at: None,
            reading: None,
            timings,
        }
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != PopupPhase::Hidden
    }

    /// The reading on display, if any
    pub fn reading(&self) -> Option<&BmiReading> {
        self.reading.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Start showing `reading`. Ignored while already visible.
    pub fn show(&mut self, reading: BmiReading, now: Instant) -> bool {
        if self.is_visible() {
            return false;
        }
        self.phase = PopupPhase::FadingIn;
        self.shown_at = Some(now);
        self.deadline = Some(now + self.timings.fade_in);
        self.reading = Some(reading);
        true
    }

    /// Start fading out early. Returns false when already fading or hidden.
    pub fn dismiss(&mut self, now: Instant) -> bool {
        match self.phase {
            PopupPhase::FadingIn | PopupPhase::Holding => {
                self.begin_fade_out(now);
                true
            }
            PopupPhase::Hidden | PopupPhase::FadingOut => false,
        }
    }

    /// Drop the popup immediately without advancing
    pub fn cancel(&mut self) {
        self.phase = PopupPhase::Hidden;
        self.deadline = None;
        self.shown_at = None;
        self.reading = None;
    }

    /// Apply every transition whose deadline is at or before `now`
    pub fn on_timer(&mut self, now: Instant) -> PopupEvent {
        let mut event = PopupEvent::None;

        while let Some(deadline) = self.deadline.filter(|d| *d <= now) {
            match self.phase {
                PopupPhase::FadingIn => {
                    let hold_until = self
                        .shown_at
                        .map(|shown| shown + self.timings.hold)
                        .unwrap_or(deadline)
                        .max(deadline);
                    self.phase = PopupPhase::Holding;
                    self.deadline = Some(hold_until);
                }
                PopupPhase::Holding => self.begin_fade_out(deadline),
                PopupPhase::FadingOut => {
                    self.cancel();
                    event = PopupEvent::Advance;
                }
                PopupPhase::Hidden => self.deadline = None,
            }
        }

        event
    }

    fn begin_fade_out(&mut self, from: Instant) {
        self.phase = PopupPhase::FadingOut;
        self.deadline = Some(from + self.timings.fade_out);
    }
}
