//! `setInterval`/`setTimeout` wrappers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::WebError;

/// A running interval, cleared when dropped.
pub struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, WebError> {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let handle = super::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// Run `callback` once after `delay_ms`.
pub fn set_timeout(delay_ms: i32, callback: impl FnOnce() + 'static) -> Result<(), WebError> {
    let callback = Closure::once_into_js(callback);
    super::window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)?;
    Ok(())
}
