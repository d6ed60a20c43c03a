//! Processing pipeline state: the last submitted file, the run in flight,
//! the cosmetic progress indicator and the processed result.
//!
//! Every run gets an id. Timer ticks, responses and the delayed reveal all
//! carry the id of the run that scheduled them, and anything addressed to a
//! run that is no longer current is ignored.

use crate::api::ProcessedImage;
use crate::error::{AppError, ServiceError};
use crate::progress::ProgressSimulation;
use crate::validation::{SourceFile, validate};

/// Identifier of one pipeline run.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    /// Request in flight
    Running(RunId),
    /// Response received, waiting to reveal the result
    Revealing(RunId),
}

/// How a finished run turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result is stored; reveal it after the reveal delay
    Succeeded(ProcessedImage),
    /// Progress is hidden; report the error
    Failed(ServiceError),
}

#[derive(Debug, Default)]
pub struct Session {
    last_submitted: Option<SourceFile>,
    processed: Option<ProcessedImage>,
    progress: ProgressSimulation,
    phase: Phase,
    result_visible: bool,
    next_run: RunId,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run for `file`.
    ///
    /// The file is remembered for retry even when it fails validation.
    pub fn begin(&mut self, file: SourceFile) -> Result<RunId, AppError> {
        if self.is_busy() {
            return Err(AppError::Busy);
        }

        let checked = validate(&file.meta);
        self.last_submitted = Some(file);
        checked?;

        self.next_run += 1;
        let run = self.next_run;
        self.phase = Phase::Running(run);
        self.progress.start();
        self.result_visible = false;
        self.processed = None;
        log::info!("Run {} started", run);
        Ok(run)
    }

    /// Start a run with the last submitted file.
    pub fn retry(&mut self) -> Result<(RunId, SourceFile), AppError> {
        if self.is_busy() {
            return Err(AppError::Busy);
        }
        let file = self.last_submitted.clone().ok_or(AppError::NothingToRetry)?;
        let run = self.begin(file.clone())?;
        Ok((run, file))
    }

    pub fn tick_progress(&mut self, run: RunId) {
        if self.phase == Phase::Running(run) {
            self.progress.tick_progress();
        }
    }

    pub fn tick_dots(&mut self, run: RunId) {
        if self.phase == Phase::Running(run) {
            self.progress.tick_dots();
        }
    }

    /// Settle the run with the service's answer. Returns `None` if `run` is
    /// not the run in flight.
    pub fn complete(
        &mut self,
        run: RunId,
        result: Result<ProcessedImage, ServiceError>,
    ) -> Option<RunOutcome> {
        if self.phase != Phase::Running(run) {
            log::debug!("Ignoring response for stale run {}", run);
            return None;
        }

        match result {
            Ok(image) => {
                log::info!("Run {} succeeded ({} bytes, {})", run, image.bytes.len(), image.mime);
                self.progress.complete();
                self.processed = Some(image.clone());
                self.phase = Phase::Revealing(run);
                Some(RunOutcome::Succeeded(image))
            }
            Err(e) => {
                log::warn!("Run {} failed: {}", run, e);
                self.progress.hide();
                self.phase = Phase::Idle;
                Some(RunOutcome::Failed(e))
            }
        }
    }

    /// Hide the progress indicator and show the result panel.
    pub fn reveal(&mut self, run: RunId) -> bool {
        if self.phase != Phase::Revealing(run) {
            return false;
        }
        self.progress.hide();
        self.result_visible = true;
        self.phase = Phase::Idle;
        true
    }

    /// Give up on a run whose result could not be displayed. Progress is
    /// hidden and the result dropped.
    pub fn abandon(&mut self, run: RunId) -> bool {
        if self.phase != Phase::Revealing(run) {
            return false;
        }
        log::warn!("Run {} abandoned before reveal", run);
        self.progress.hide();
        self.processed = None;
        self.phase = Phase::Idle;
        true
    }

    /// Forget everything, as on a fresh page load.
    pub fn reset(&mut self) -> Result<(), AppError> {
        if self.is_busy() {
            return Err(AppError::Busy);
        }
        let next_run = self.next_run;
        *self = Self {
            next_run,
            ..Self::default()
        };
        Ok(())
    }

    /// A run is in flight or waiting to be revealed.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether timer ticks for this run should keep coming.
    pub fn is_running(&self, run: RunId) -> bool {
        self.phase == Phase::Running(run)
    }

    pub fn progress(&self) -> &ProgressSimulation {
        &self.progress
    }

    pub fn processed(&self) -> Option<&ProcessedImage> {
        self.processed.as_ref()
    }

    pub fn is_result_visible(&self) -> bool {
        self.result_visible
    }
}
