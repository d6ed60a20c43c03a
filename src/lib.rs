//! Cutout - background removal in the browser
//!
//! Upload an image, send it to the remove.bg API, inspect the result in a
//! zoomable viewer and download it. The application logic is plain Rust and
//! runs natively under test; the browser bindings are wasm32-only.

pub mod alert;
pub mod api;
mod app;
pub mod config;
pub mod constants;
pub mod drop_zone;
pub mod effect;
pub mod error;
pub mod message;
pub mod progress;
pub mod session;
pub mod validation;
pub mod view_model;
pub mod viewer;

#[cfg(test)]
mod tests;

pub use app::CutoutApp;
pub use config::AppConfig;
pub use effect::Effect;
pub use message::Message;

// Browser runtime and WASM entry point
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
