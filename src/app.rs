//! Cutout application state.
//!
//! One [`CutoutApp`] exists per page load. It owns the drop zone, the alert
//! presenter, the processing session and the viewer, reacts to [`Message`]s
//! and describes the side effects it needs as [`Effect`]s.

use crate::alert::AlertPresenter;
use crate::api::RemovalRequest;
use crate::config::AppConfig;
use crate::constants::progress::REVEAL_DELAY_MS;
use crate::constants::viewer::TRANSITION;
use crate::drop_zone::{DropZone, ReadOutcome};
use crate::effect::Effect;
use crate::error::AppError;
use crate::message::Message;
use crate::session::{RunId, RunOutcome, Session};
use crate::validation::SourceFile;
use crate::view_model::{PreviewView, ProgressView, ViewModel, ViewerView};
use crate::viewer::ViewerState;

/// Main Cutout application state.
#[derive(Debug)]
pub struct CutoutApp {
    config: AppConfig,
    drop_zone: DropZone,
    alerts: AlertPresenter,
    session: Session,
    viewer: ViewerState,
    modal_open: bool,
}

impl CutoutApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            drop_zone: DropZone::new(),
            alerts: AlertPresenter::new(),
            session: Session::new(),
            viewer: ViewerState::new(),
            modal_open: false,
        }
    }

    pub fn is_viewer_open(&self) -> bool {
        self.modal_open
    }

    /// Whether interval ticks for `run` are still wanted.
    pub fn is_running(&self, run: RunId) -> bool {
        self.session.is_running(run)
    }

    /// Handle one message and return the effects it requires.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::DragOver => self.drop_zone.drag_over(),
            Message::DragEnded => self.drop_zone.drag_ended(),
            Message::FileChosen(meta) => match self.drop_zone.select(meta) {
                Ok(generation) => effects.push(Effect::ReadFile { generation }),
                Err(e) => {
                    effects.push(Effect::ClearFileInput);
                    self.report(e.into(), &mut effects);
                }
            },
            Message::FileRead { generation, bytes } => {
                if self.drop_zone.finish_read(generation, bytes) == ReadOutcome::Loaded {
                    log::info!("Preview ready for generation {}", generation);
                }
            }
            Message::FileReadFailed { generation, reason } => {
                if self.drop_zone.fail_read(generation) {
                    effects.push(Effect::ClearFileInput);
                    self.report(AppError::FileRead(reason), &mut effects);
                }
            }
            Message::BrowseRequested => effects.push(Effect::OpenFilePicker),
            Message::RemovePreview => {
                self.drop_zone.clear();
                effects.push(Effect::ClearFileInput);
            }

            Message::Submit => match self.drop_zone.loaded() {
                Some(loaded) => {
                    let file = loaded.file.clone();
                    match self.session.begin(file.clone()) {
                        Ok(run) => self.launch(run, file, &mut effects),
                        Err(e) => self.report(e, &mut effects),
                    }
                }
                None => self.report(AppError::NoFileSelected, &mut effects),
            },
            Message::Retry => match self.session.retry() {
                Ok((run, file)) => self.launch(run, file, &mut effects),
                Err(e) => self.report(e, &mut effects),
            },
            Message::Reset => match self.session.reset() {
                Ok(()) => {
                    log::info!("Session reset");
                    self.drop_zone.reset();
                    self.alerts.clear();
                    self.close_viewer();
                    effects.push(Effect::ReleaseResult);
                    effects.push(Effect::ClearFileInput);
                }
                Err(e) => self.report(e, &mut effects),
            },
            Message::ProgressTick(run) => self.session.tick_progress(run),
            Message::DotsTick(run) => self.session.tick_dots(run),
            Message::ServiceResponded { run, result } => match self.session.complete(run, result) {
                Some(RunOutcome::Succeeded(image)) => {
                    effects.push(Effect::StopProgressTimers);
                    effects.push(Effect::PublishResult { run, image });
                    effects.push(Effect::ScheduleReveal {
                        run,
                        delay_ms: REVEAL_DELAY_MS,
                    });
                }
                Some(RunOutcome::Failed(e)) => {
                    effects.push(Effect::StopProgressTimers);
                    self.report(e.into(), &mut effects);
                }
                None => {}
            },
            Message::RevealResult(run) => {
                self.session.reveal(run);
            }
            Message::PublishFailed { run, reason } => {
                if self.session.abandon(run) {
                    effects.push(Effect::ReleaseResult);
                    self.report(AppError::ResultUnavailable(reason), &mut effects);
                }
            }

            Message::AlertExpired(id) | Message::AlertClosed(id) => {
                self.alerts.dismiss(id);
            }

            Message::OpenViewer => {
                if self.session.processed().is_some() {
                    self.modal_open = true;
                    self.viewer.reset();
                }
            }
            Message::CloseViewer => self.close_viewer(),
            Message::ViewerKey(key) => {
                if self.modal_open && !self.viewer.apply_key(key) {
                    self.close_viewer();
                }
            }
            Message::ViewerInput(input) => {
                if self.modal_open {
                    self.viewer.apply_input(&input);
                }
            }
            Message::Download => match self.session.processed() {
                Some(image) => effects.push(Effect::Download {
                    image: image.clone(),
                    file_name: self.config.preferences.download_file_name.clone(),
                }),
                None => log::debug!("Download requested with no result"),
            },
        }

        effects
    }

    /// Snapshot of everything the page should show.
    pub fn view(&self) -> ViewModel {
        let progress = self.session.progress();
        ViewModel {
            drop_highlighted: self.drop_zone.is_highlighted(),
            preview: self.drop_zone.loaded().map(|loaded| PreviewView {
                file_name: loaded.file.name().to_string(),
                thumbnail: loaded.thumbnail.clone(),
            }),
            submit_enabled: self.drop_zone.is_loaded() && !self.session.is_busy(),
            retry_enabled: !self.session.is_busy(),
            alert: self.alerts.current().cloned(),
            progress: progress.is_visible().then(|| ProgressView {
                percent: progress.percent(),
                dots: progress.dots(),
            }),
            result_visible: self.session.is_result_visible(),
            modal_open: self.modal_open,
            viewer: ViewerView {
                transform: self.viewer.transform().css(),
                transition: TRANSITION,
            },
        }
    }

    fn launch(&mut self, run: RunId, file: SourceFile, effects: &mut Vec<Effect>) {
        log::info!("Submitting '{}' ({} bytes) as run {}", file.name(), file.bytes.len(), run);
        effects.push(Effect::ReleaseResult);
        effects.push(Effect::StartProgressTimers(run));
        effects.push(Effect::SendRequest {
            run,
            request: RemovalRequest::new(&self.config.service, file),
        });
    }

    fn close_viewer(&mut self) {
        self.modal_open = false;
        self.viewer.reset();
    }

    fn report(&mut self, error: AppError, effects: &mut Vec<Effect>) {
        if !error.is_reportable() {
            log::debug!("Ignored: {}", error);
            return;
        }

        let id = self.alerts.show(error.user_message(), error.severity());
        effects.push(Effect::ScheduleAlertDismiss {
            id,
            delay_ms: self.config.preferences.alert_duration_ms,
        });
        effects.push(Effect::ScrollToTop);
    }
}
