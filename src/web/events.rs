//! DOM event listeners.
//!
//! Every listener lives as long as the page, so closures are leaked with
//! `forget` once registered.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, DragEvent, Element, Event, EventTarget, File, KeyboardEvent,
    TouchEvent, WheelEvent,
};

use super::dom::{ALERT_ID_ATTRIBUTE, Dom};
use super::runtime::{SharedRuntime, dispatch};
use crate::constants::dom;
use crate::error::WebError;
use crate::message::Message;
use crate::validation::FileMeta;
use crate::viewer::{TouchPoint, ViewerInput, ViewerKey};

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`] but allowed to call `preventDefault` on scroll-type events.
fn listen_active(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebError> {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Listener that only suppresses the default action and sends `message`.
fn on_click(
    runtime: &SharedRuntime,
    target: &EventTarget,
    message: Message,
) -> Result<(), WebError> {
    let runtime = Rc::clone(runtime);
    listen(target, "click", move |event| {
        suppress(&event);
        dispatch(&runtime, message.clone());
    })
}

fn suppress(event: &Event) {
    event.prevent_default();
    event.stop_propagation();
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn within(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// Stage `file` for reading and let the application validate it.
fn choose(runtime: &SharedRuntime, file: File) {
    let meta = FileMeta::new(file.name(), file.type_(), file.size() as u64);
    log::debug!("Chosen '{}' ({}, {} bytes)", meta.name, meta.mime, meta.size);
    runtime.borrow_mut().stage_file(file);
    dispatch(runtime, Message::FileChosen(meta));
}

/// Register every listener the page needs.
pub fn bind(runtime: &SharedRuntime) -> Result<(), WebError> {
    let rt = runtime.borrow();
    let page = &rt.dom;

    bind_intake(runtime, page)?;
    bind_pipeline(runtime, page)?;
    bind_alerts(runtime, page)?;
    bind_viewer(runtime, page)?;
    Ok(())
}

fn bind_intake(runtime: &SharedRuntime, page: &Dom) -> Result<(), WebError> {
    let body = page
        .document
        .body()
        .ok_or(WebError::MissingElement("body"))?;
    for kind in ["dragenter", "dragover", "dragleave", "drop"] {
        listen(&body, kind, |event| suppress(&event))?;
    }

    for kind in ["dragenter", "dragover"] {
        let runtime = Rc::clone(runtime);
        listen(&page.drop_zone, kind, move |event| {
            suppress(&event);
            dispatch(&runtime, Message::DragOver);
        })?;
    }
    {
        let runtime = Rc::clone(runtime);
        listen(&page.drop_zone, "dragleave", move |event| {
            suppress(&event);
            dispatch(&runtime, Message::DragEnded);
        })?;
    }
    {
        let runtime = Rc::clone(runtime);
        listen(&page.drop_zone, "drop", move |event| {
            suppress(&event);
            dispatch(&runtime, Message::DragEnded);
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(|drag| drag.data_transfer())
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                choose(&runtime, file);
            }
        })?;
    }

    {
        // Clicks on the preview, its controls or the input itself do not
        // open the picker again
        let runtime = Rc::clone(runtime);
        let exempt = [
            dom::PREVIEW_IMAGE,
            dom::PREVIEW_FILE_NAME,
            dom::REMOVE_PREVIEW_BUTTON,
            dom::SELECT_FILE_BUTTON,
            dom::FILE_INPUT,
        ]
        .map(|id| format!("#{}", id));
        listen(&page.drop_zone, "click", move |event| {
            let exempted = target_element(&event).is_some_and(|target| {
                exempt
                    .iter()
                    .any(|selector| within(&target, selector).is_some())
            });
            if exempted {
                return;
            }
            dispatch(&runtime, Message::BrowseRequested);
        })?;
    }
    {
        let runtime = Rc::clone(runtime);
        let input = page.file_input.clone();
        listen(&page.file_input, "change", move |_| {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                choose(&runtime, file);
            }
        })?;
    }

    on_click(runtime, &page.select_file_button, Message::BrowseRequested)?;
    on_click(runtime, &page.remove_preview_button, Message::RemovePreview)?;
    Ok(())
}

fn bind_pipeline(runtime: &SharedRuntime, page: &Dom) -> Result<(), WebError> {
    {
        let runtime = Rc::clone(runtime);
        listen(&page.upload_form, "submit", move |event| {
            event.prevent_default();
            dispatch(&runtime, Message::Submit);
        })?;
    }
    on_click(runtime, &page.retry_button, Message::Retry)?;
    on_click(runtime, &page.cancel_button, Message::Reset)?;
    on_click(runtime, &page.download_button, Message::Download)?;
    Ok(())
}

fn bind_alerts(runtime: &SharedRuntime, page: &Dom) -> Result<(), WebError> {
    // Delegated: alerts are re-created on every change
    let runtime = Rc::clone(runtime);
    let alert_selector = format!("[{}]", ALERT_ID_ATTRIBUTE);
    listen(&page.alert_container, "click", move |event| {
        let Some(target) = target_element(&event) else {
            return;
        };
        if within(&target, ".btn-close").is_none() {
            return;
        }
        let id = within(&target, &alert_selector)
            .and_then(|alert| alert.get_attribute(ALERT_ID_ATTRIBUTE))
            .and_then(|id| id.parse::<u64>().ok());
        if let Some(id) = id {
            dispatch(&runtime, Message::AlertClosed(id));
        }
    })
}

fn touch_points(event: &TouchEvent) -> Vec<TouchPoint> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|index| touches.get(index))
        .map(|touch| TouchPoint::new(touch.client_x() as f32, touch.client_y() as f32))
        .collect()
}

fn bind_viewer(runtime: &SharedRuntime, page: &Dom) -> Result<(), WebError> {
    on_click(runtime, &page.processed_image, Message::OpenViewer)?;
    on_click(runtime, &page.modal_close_button, Message::CloseViewer)?;
    {
        let runtime = Rc::clone(runtime);
        let modal = page.modal.clone();
        listen(&page.modal, "click", move |event| {
            // Only the backdrop itself, not the dialog inside it
            if event
                .target()
                .is_some_and(|target| js_sys::Object::is(&target, &modal))
            {
                dispatch(&runtime, Message::CloseViewer);
            }
        })?;
    }
    {
        let runtime = Rc::clone(runtime);
        listen(&page.document, "keydown", move |event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|keyboard| ViewerKey::from_key_name(&keyboard.key()))
            else {
                return;
            };
            if !runtime.borrow().is_viewer_open() {
                return;
            }
            event.prevent_default();
            dispatch(&runtime, Message::ViewerKey(key));
        })?;
    }
    {
        let runtime = Rc::clone(runtime);
        listen_active(&page.zoom_container, "wheel", move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let input = ViewerInput::Wheel {
                delta_x: wheel.delta_x() as f32,
                delta_y: wheel.delta_y() as f32,
                shift: wheel.shift_key(),
            };
            dispatch(&runtime, Message::ViewerInput(input));
        })?;
    }

    let touch_kinds: [(&str, fn(Vec<TouchPoint>) -> ViewerInput); 4] = [
        ("touchstart", ViewerInput::TouchStart),
        ("touchmove", ViewerInput::TouchMove),
        ("touchend", ViewerInput::TouchEnd),
        ("touchcancel", ViewerInput::TouchEnd),
    ];
    for (kind, to_input) in touch_kinds {
        let runtime = Rc::clone(runtime);
        let is_move = kind == "touchmove";
        listen_active(&page.zoom_container, kind, move |event| {
            let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if is_move {
                event.prevent_default();
            }
            dispatch(&runtime, Message::ViewerInput(to_input(touch_points(touch))));
        })?;
    }
    Ok(())
}
