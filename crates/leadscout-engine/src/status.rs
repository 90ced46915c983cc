//! Run requests and status snapshots.
//!
//! A run's status is owned by the task driving the pipeline and published
//! through a `tokio::sync::watch` channel: one writer, any number of readers,
//! each read an atomic snapshot. Status is never exposed as a shared mutable
//! structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for one end-to-end scraping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub search_terms: Vec<String>,
    pub location: String,
    pub max_results: usize,
    #[serde(default)]
    pub include_emails: bool,
}

/// Lifecycle state of the current (or most recent) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
    TimedOut,
}

/// Point-in-time snapshot of a run, safe to hand to any reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatus {
    pub state: RunState,
    pub is_running: bool,
    pub progress_percent: u8,
    pub current_query: String,
    pub leads_found: usize,
    pub message: String,
    pub started_at: Option<DateTime<Utc>>,
    pub output_file: Option<String>,
}

impl RunStatus {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            state: RunState::Idle,
            is_running: false,
            progress_percent: 0,
            current_query: String::new(),
            leads_found: 0,
            message: String::new(),
            started_at: None,
            output_file: None,
        }
    }

    /// Fresh snapshot for a run that has just been accepted.
    #[must_use]
    pub fn starting() -> Self {
        Self {
            state: RunState::Running,
            is_running: true,
            progress_percent: 0,
            current_query: String::new(),
            leads_found: 0,
            message: "Starting scraper...".to_owned(),
            started_at: Some(Utc::now()),
            output_file: None,
        }
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::idle()
    }
}
