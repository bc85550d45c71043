//! Paged view over the user's prediction history

use diabetes_risk_shared::{HistoryEntry, Pager};
use serde::Serialize;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::state::AppState;

/// One rendered history row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub recorded_at: String,
    pub prediction: String,
    pub glucose: f64,
    pub blood_pressure: f64,
    /// Whole percent, e.g. "72%"
    pub risk: String,
    pub risk_band: &'static str,
    pub diet_suggestion: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let recorded_at = entry
            .recorded_at()
            .map(|at| at.format("%b %-d, %Y %H:%M").to_string())
            .unwrap_or_else(|| entry.timestamp.clone());

        Self {
            recorded_at,
            prediction: entry.prediction.clone(),
            glucose: entry.glucose,
            blood_pressure: entry.blood_pressure,
            risk: format!("{}%", entry.risk_percentage.round()),
            risk_band: entry.risk_band(),
            diet_suggestion: entry.diet_suggestion.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryView {
    entries: Vec<HistoryEntry>,
    pager: Pager,
}

impl HistoryView {
    pub fn new(entries: Vec<HistoryEntry>, page_size: usize) -> Self {
        let pager = Pager::new(page_size, entries.len());
        Self { entries, pager }
    }

    /// Snapshot of the state's cached history
    pub async fn from_state(state: &AppState) -> Self {
        Self::new(state.history().await, state.config().history.page_size)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    /// Swap in fresh entries, keeping the page where possible
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.pager.set_total_items(entries.len());
        self.entries = entries;
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.pager
            .page_slice(&self.entries)
            .iter()
            .map(HistoryRow::from)
            .collect()
    }
}

/// Re-fetch history and return a view of it
///
/// A failed fetch keeps the user logged in; the caller shows
/// [`failure_message`] alongside whatever was cached.
pub async fn load_history(state: &AppState) -> ClientResult<HistoryView> {
    if let Err(e) = state.refresh_history().await {
        warn!(error = %e, "History fetch failed");
        return Err(e);
    }
    Ok(HistoryView::from_state(state).await)
}

pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Auth(_) => "Log in to see your prediction history".to_string(),
        other => format!("Could not load history: {}", other.user_message()),
    }
}
