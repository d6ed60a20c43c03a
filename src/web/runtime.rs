//! Message dispatch and effect execution.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlAnchorElement, ScrollBehavior, ScrollToOptions};

use super::dom::Dom;
use super::fetch::{self, ObjectUrl};
use super::timer::{Interval, set_timeout};
use crate::CutoutApp;
use crate::api::ProcessedImage;
use crate::config::AppConfig;
use crate::constants::progress::{DOTS_INTERVAL_MS, TICK_INTERVAL_MS};
use crate::effect::Effect;
use crate::error::WebError;
use crate::message::Message;

pub type SharedRuntime = Rc<RefCell<Runtime>>;

/// Application state plus the browser resources it drives.
pub struct Runtime {
    app: CutoutApp,
    pub dom: Dom,
    /// File handed over by the last pick or drop, waiting for `ReadFile`
    staged_file: Option<File>,
    timers: Vec<Interval>,
    result_url: Option<ObjectUrl>,
}

impl Runtime {
    pub fn new(config: AppConfig, dom: Dom) -> Self {
        Self {
            app: CutoutApp::new(config),
            dom,
            staged_file: None,
            timers: Vec::new(),
            result_url: None,
        }
    }

    pub fn is_viewer_open(&self) -> bool {
        self.app.is_viewer_open()
    }

    pub fn stage_file(&mut self, file: File) {
        self.staged_file = Some(file);
    }
}

/// Render the current state without changing it.
pub fn render(runtime: &SharedRuntime) {
    let mut rt = runtime.borrow_mut();
    let view = rt.app.view();
    if let Err(e) = rt.dom.render(&view) {
        log::error!("Render failed: {}", e);
    }
}

/// Update the application, render, then perform the resulting effects.
///
/// The runtime is not borrowed while effects run, so effects may dispatch.
pub fn dispatch(runtime: &SharedRuntime, message: Message) {
    log::trace!("Message: {:?}", message);
    let effects = runtime.borrow_mut().app.update(message);
    render(runtime);

    for effect in effects {
        let publishing = match &effect {
            Effect::PublishResult { run, .. } => Some(*run),
            _ => None,
        };
        if let Err(e) = perform(runtime, effect) {
            log::error!("Effect failed: {}", e);
            if let Some(run) = publishing {
                // Skip the reveal; the application rolls the run back
                let reason = e.to_string();
                dispatch(runtime, Message::PublishFailed { run, reason });
                return;
            }
        }
    }
}

fn perform(runtime: &SharedRuntime, effect: Effect) -> Result<(), WebError> {
    match effect {
        Effect::OpenFilePicker => {
            let input = runtime.borrow().dom.file_input.clone();
            input.click();
        }
        Effect::ClearFileInput => runtime.borrow().dom.file_input.set_value(""),
        Effect::ReadFile { generation } => {
            let Some(file) = runtime.borrow_mut().staged_file.take() else {
                log::warn!("No staged file for read generation {}", generation);
                return Ok(());
            };
            let runtime = Rc::clone(runtime);
            spawn_local(async move {
                let message = match fetch::read_blob(&file).await {
                    Ok(bytes) => Message::FileRead { generation, bytes },
                    Err(reason) => Message::FileReadFailed { generation, reason },
                };
                dispatch(&runtime, message);
            });
        }

        Effect::StartProgressTimers(run) => {
            let progress = {
                let runtime = Rc::clone(runtime);
                Interval::new(TICK_INTERVAL_MS, move || {
                    if runtime.borrow().app.is_running(run) {
                        dispatch(&runtime, Message::ProgressTick(run));
                    }
                })?
            };
            let dots = {
                let runtime = Rc::clone(runtime);
                Interval::new(DOTS_INTERVAL_MS, move || {
                    if runtime.borrow().app.is_running(run) {
                        dispatch(&runtime, Message::DotsTick(run));
                    }
                })?
            };
            // Replacing the guards clears any intervals left from an older run
            runtime.borrow_mut().timers = vec![progress, dots];
        }
        Effect::StopProgressTimers => runtime.borrow_mut().timers.clear(),
        Effect::SendRequest { run, request } => {
            let runtime = Rc::clone(runtime);
            spawn_local(async move {
                let result = fetch::send(&request).await;
                dispatch(&runtime, Message::ServiceResponded { run, result });
            });
        }
        Effect::ScheduleReveal { run, delay_ms } => {
            let runtime = Rc::clone(runtime);
            set_timeout(delay_ms, move || dispatch(&runtime, Message::RevealResult(run)))?;
        }

        Effect::PublishResult { image, .. } => {
            let url = ObjectUrl::new(&image)?;
            let mut rt = runtime.borrow_mut();
            rt.dom.show_result(Some(url.as_str()))?;
            rt.result_url = Some(url);
        }
        Effect::ReleaseResult => {
            let mut rt = runtime.borrow_mut();
            rt.dom.show_result(None)?;
            rt.result_url = None;
        }
        Effect::Download { image, file_name } => download(&image, &file_name)?,

        Effect::ScheduleAlertDismiss { id, delay_ms } => {
            let runtime = Rc::clone(runtime);
            let delay_ms = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            set_timeout(delay_ms, move || dispatch(&runtime, Message::AlertExpired(id)))?;
        }
        Effect::ScrollToTop => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            super::window()?.scroll_to_with_scroll_to_options(&options);
        }
    }
    Ok(())
}

fn download(image: &ProcessedImage, file_name: &str) -> Result<(), WebError> {
    let document = super::document()?;
    let body = document.body().ok_or(WebError::MissingElement("body"))?;
    let url = ObjectUrl::new(image)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| WebError::WrongElementType("a"))?;
    anchor.set_href(url.as_str());
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    log::info!("Downloaded result as '{}'", file_name);
    Ok(())
}
