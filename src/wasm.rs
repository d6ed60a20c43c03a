use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::web;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // The log level lives in the config, so parse before the logger exists
    // and report problems afterwards.
    let parsed = web::stored_config().map(|json| AppConfig::from_json(&json));
    let level = match &parsed {
        Some(Ok(config)) => config.preferences.log_level,
        _ => Default::default(),
    };
    if let Err(e) = console_log::init_with_level(level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }

    let config = match parsed {
        Some(Ok(config)) => {
            log::info!("Loaded config from localStorage");
            config
        }
        Some(Err(e)) => {
            log::warn!("Ignoring stored config: {}", e);
            AppConfig::default()
        }
        None => AppConfig::default(),
    };
    if config.service.api_key.is_empty() {
        log::warn!("No API key configured; requests will be rejected");
    }

    log::info!("Cutout starting...");
    if let Err(e) = web::mount(config) {
        log::error!("Failed to start: {}", e);
    }
}
