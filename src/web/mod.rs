//! Browser runtime.
//!
//! Binds the page, turns DOM events into [`crate::message::Message`]s,
//! performs [`crate::effect::Effect`]s and renders the view model after
//! every update.

mod dom;
mod events;
mod fetch;
mod runtime;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::AppConfig;
use crate::constants::storage::CONFIG_KEY;
use crate::error::WebError;

use dom::Dom;
use runtime::Runtime;

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(js_error_message(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub(crate) fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub(crate) fn document() -> Result<Document, WebError> {
    window()?.document().ok_or(WebError::NoDocument)
}

/// Raw config document from localStorage, if any.
pub fn stored_config() -> Option<String> {
    let storage = window().ok()?.local_storage().ok()??;
    storage.get_item(CONFIG_KEY).ok()?
}

/// Bind the page and start handling events.
pub fn mount(config: AppConfig) -> Result<(), WebError> {
    let dom = Dom::bind(document()?)?;
    let runtime = Rc::new(RefCell::new(Runtime::new(config, dom)));

    events::bind(&runtime)?;
    runtime::render(&runtime);

    log::info!("Page bound, waiting for an image");
    Ok(())
}
