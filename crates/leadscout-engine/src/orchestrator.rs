//! Run orchestration: accepts run requests, enforces the single-run rule,
//! applies the wall-clock deadline, and publishes status snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use leadscout_core::AppConfig;
use leadscout_email::EmailScout;
use leadscout_places::{PlacesClient, PlacesError};

use crate::pipeline::{Pipeline, PipelineOptions};
use crate::status::{RunRequest, RunState, RunStatus};

#[derive(Debug, Error)]
pub enum RunError {
    /// A run was requested while one is already active. The active run's
    /// status is left untouched.
    #[error("a scraping run is already in progress")]
    AlreadyRunning,

    #[error(transparent)]
    Places(#[from] PlacesError),

    #[error(transparent)]
    Discovery(#[from] leadscout_email::DiscoveryError),
}

/// Owns the pipeline and the run-status channel.
///
/// The status value has single-writer semantics: only the task spawned by
/// [`Orchestrator::start_run`] writes, while any number of readers take
/// atomic snapshots via [`Orchestrator::status`].
pub struct Orchestrator {
    pipeline: Arc<Pipeline>,
    status_tx: watch::Sender<RunStatus>,
    running: Arc<AtomicBool>,
    run_timeout: Duration,
}

impl Orchestrator {
    #[must_use]
    pub fn new(pipeline: Pipeline, run_timeout: Duration) -> Self {
        let (status_tx, _) = watch::channel(RunStatus::idle());
        Self {
            pipeline: Arc::new(pipeline),
            status_tx,
            running: Arc::new(AtomicBool::new(false)),
            run_timeout,
        }
    }

    /// Builds an orchestrator wired from application config.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] if either HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, RunError> {
        let places = PlacesClient::new(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        let scout = EmailScout::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.email_page_delay_ms,
        )?;
        let pipeline = Pipeline::new(
            places,
            scout,
            PipelineOptions {
                data_dir: config.data_dir.clone(),
                detail_delay_ms: config.detail_delay_ms,
                page_token_delay_ms: config.page_token_delay_ms,
                email_max_pages: config.email_max_pages,
            },
        );
        Ok(Self::new(
            pipeline,
            Duration::from_secs(config.run_timeout_secs),
        ))
    }

    /// Current status snapshot.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status_tx.borrow().clone()
    }

    /// Subscribes to status updates, e.g. for a CLI progress display.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RunStatus> {
        self.status_tx.subscribe()
    }

    /// Starts a run in the background.
    ///
    /// The run is rejected without any state change when one is already
    /// active. On acceptance the status snapshot resets to a fresh
    /// `Running` state and the spawned task takes over as sole writer until
    /// it finishes, fails, or exceeds the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::AlreadyRunning`] when a run is active.
    pub fn start_run(&self, request: RunRequest) -> Result<(), RunError> {
        // compare_exchange claims the run slot atomically; a concurrent
        // caller loses and must not disturb the winner's status.
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RunError::AlreadyRunning);
        }

        self.status_tx.send_replace(RunStatus::starting());

        let pipeline = Arc::clone(&self.pipeline);
        let status_tx = self.status_tx.clone();
        let running = Arc::clone(&self.running);
        let deadline = self.run_timeout;

        tokio::spawn(async move {
            let result = tokio::time::timeout(
                deadline,
                async { pipeline.execute(&request, &status_tx).await },
            )
            .await;

            match result {
                Ok(Ok(outcome)) => {
                    tracing::info!(
                        leads = outcome.listings.len(),
                        output = %outcome.output_file.display(),
                        "scraping run completed"
                    );
                    status_tx.send_modify(|s| {
                        s.state = RunState::Completed;
                        s.is_running = false;
                        s.output_file = Some(outcome.output_file.display().to_string());
                    });
                }
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "scraping run failed");
                    status_tx.send_modify(|s| {
                        s.state = RunState::Failed;
                        s.is_running = false;
                        s.message = format!("Error: {e}");
                    });
                }
                Err(_) => {
                    // Deadline passed. In-flight fetches are not forcibly
                    // interrupted beyond the task being dropped here; the
                    // status reporter simply stops awaiting them.
                    tracing::warn!(timeout_secs = deadline.as_secs(), "scraping run timed out");
                    status_tx.send_modify(|s| {
                        s.state = RunState::TimedOut;
                        s.is_running = false;
                        s.message =
                            format!("Scraping timed out after {} seconds", deadline.as_secs());
                    });
                }
            }

            running.store(false, Ordering::SeqCst);
        });

        Ok(())
    }

    /// Runs a request to completion on the current task (CLI path). The same
    /// single-run guard applies.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::AlreadyRunning`] when a run is active.
    pub async fn run_blocking(
        &self,
        request: RunRequest,
    ) -> Result<Result<crate::pipeline::RunOutcome, crate::pipeline::PipelineError>, RunError>
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RunError::AlreadyRunning);
        }

        self.status_tx.send_replace(RunStatus::starting());
        let result = self.pipeline.execute(&request, &self.status_tx).await;

        self.status_tx.send_modify(|s| {
            s.is_running = false;
            s.state = match &result {
                Ok(_) => RunState::Completed,
                Err(_) => RunState::Failed,
            };
        });
        self.running.store(false, Ordering::SeqCst);

        Ok(result)
    }
}
