use crate::application::dto::UploadOutcome;
use crate::ports::outbound::{ProgressReporter, SdsRepository};
use crate::sds::domain::{ExtractionStatus, RequestId, StepDisplay, StepOutcome, UploadForm};
use crate::sds::services::UploadPhase;
use crate::shared::error::SdsError;
use crate::shared::Result;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Time between two extraction status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// UploadSdsUseCase - submits an SDS PDF and follows its extraction
///
/// Drives one upload through `Idle → Submitting → Polling` and stops on the
/// first terminal status, on cancellation, or when the upload call fails.
/// Cancelling while the upload is still pending ends in `TerminalFailure`.
///
/// Status queries run one at a time: the next tick is not awaited until the
/// previous query returned, so responses can never arrive out of order.
/// Cancelling drops an in-flight query; its result is never observed.
///
/// # Type Parameters
/// * `REPO` - SdsRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct UploadSdsUseCase<REPO, PR> {
    repository: REPO,
    progress_reporter: PR,
    poll_interval: Duration,
}

impl<REPO, PR> UploadSdsUseCase<REPO, PR>
where
    REPO: SdsRepository,
    PR: ProgressReporter,
{
    pub fn new(repository: REPO, progress_reporter: PR) -> Self {
        Self {
            repository,
            progress_reporter,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the poll interval (at least one millisecond)
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    /// Validates the form, uploads the file and polls until a terminal status
    ///
    /// # Arguments
    /// * `form` - Upload form; a validation failure is recorded on it
    /// * `cancel` - Aborts a pending upload, or stops observation once the
    ///   upload was accepted. The server-side job is unaffected.
    ///
    /// # Errors
    /// Returns the `ValidationError` when the form is not ready (no request is
    /// sent), the upload error when the server rejects the file, or
    /// `SdsError::UploadCancelled` when `cancel` fires before the upload
    /// returns. Failed status queries are not errors; polling continues on
    /// the next tick.
    pub async fn execute(
        &self,
        form: &mut UploadForm,
        cancel: CancellationToken,
    ) -> Result<UploadOutcome> {
        if let Err(error) = form.validate() {
            form.reject(error.clone());
            return Err(error.into());
        }

        let request_id = RequestId::generate();
        let request = form.clone().into_request(request_id.clone())?;
        let file_name = request.file.name.clone();

        let phase = UploadPhase::Idle.transition(UploadPhase::Submitting)?;
        tracing::info!(%request_id, file = %file_name, bytes = request.file.size(), "uploading SDS");
        self.progress_reporter.report(&format!(
            "📤 Uploading {} ({} bytes)",
            file_name,
            request.file.size()
        ));

        // A finished upload wins over a cancel that arrives in the same poll
        let upload = tokio::select! {
            biased;
            result = self.repository.upload(&request) => result,
            _ = cancel.cancelled() => {
                phase.transition(UploadPhase::TerminalFailure)?;
                tracing::warn!(%request_id, file = %file_name, "SDS upload cancelled");
                self.progress_reporter
                    .report_error(&format!("⏹️  Upload of {} cancelled", file_name));
                return Err(SdsError::UploadCancelled { name: file_name }.into());
            }
        };

        let upload_response = match upload {
            Ok(body) => body,
            Err(error) => {
                phase.transition(UploadPhase::TerminalFailure)?;
                tracing::error!(%request_id, error = %error, "SDS upload failed");
                self.progress_reporter
                    .report_error(&format!("❌ Upload of {} failed", file_name));
                return Err(error.context(format!("Failed to upload {}", file_name)));
            }
        };

        let phase = phase.transition(UploadPhase::Polling)?;
        self.progress_reporter.report_progress(
            0,
            100,
            Some(&StepDisplay::PROCESSING.to_string()),
        );

        let mut outcome = UploadOutcome {
            request_id,
            phase,
            last_status: None,
            upload_response,
            polls: 0,
        };
        self.poll(&mut outcome, request.email.as_deref(), &cancel)
            .await?;
        self.report_finish(&outcome);
        Ok(outcome)
    }

    async fn poll(
        &self,
        outcome: &mut UploadOutcome,
        email: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        // First query after one full interval
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            outcome.polls += 1;
            let query = self
                .repository
                .extraction_status(&outcome.request_id, email);
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = query => result,
            };

            match result {
                Ok(status) => {
                    tracing::debug!(
                        request_id = %outcome.request_id,
                        progress = status.progress,
                        step = %status.step,
                        "extraction status"
                    );
                    self.report_status(&status);
                    let terminal = status.is_terminal();
                    outcome.last_status = Some(status);
                    if terminal {
                        outcome.phase = outcome.phase.transition(UploadPhase::Succeeded)?;
                        return Ok(());
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        request_id = %outcome.request_id,
                        poll = outcome.polls,
                        error = %error,
                        "extraction status query failed"
                    );
                }
            }
        }

        outcome.phase = outcome.phase.transition(UploadPhase::Cancelled)?;
        tracing::info!(request_id = %outcome.request_id, "stopped watching extraction");
        Ok(())
    }

    fn report_status(&self, status: &ExtractionStatus) {
        self.progress_reporter.report_progress(
            status.progress as usize,
            100,
            Some(&status.step.display().to_string()),
        );
    }

    fn report_finish(&self, outcome: &UploadOutcome) {
        let display = outcome
            .last_status
            .as_ref()
            .map(|status| status.step.display())
            .unwrap_or(StepDisplay::PROCESSING);

        match outcome.phase {
            UploadPhase::Cancelled => self.progress_reporter.report_completion(&format!(
                "⏹️  Stopped watching request {}. Processing continues on the server.",
                outcome.request_id
            )),
            _ if outcome.step_outcome() == StepOutcome::Failed => {
                self.progress_reporter.report_error(&display.to_string())
            }
            _ => self.progress_reporter.report_completion(&display.to_string()),
        }
    }
}
