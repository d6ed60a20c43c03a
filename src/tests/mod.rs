//! Scenario tests for the application state machine.
//!
//! These tests drive [`crate::CutoutApp`] with messages the way the browser
//! runtime would and check both the returned effects and the rendered view.

mod pipeline_tests;
mod viewer_tests;

use crate::api::ProcessedImage;
use crate::app::CutoutApp;
use crate::config::AppConfig;
use crate::effect::Effect;
use crate::message::Message;
use crate::session::RunId;
use crate::validation::FileMeta;

const MIB: u64 = 1024 * 1024;

/// App with a known API key and endpoint.
fn test_app() -> CutoutApp {
    let mut config = AppConfig::default();
    config.service.endpoint = "https://example.test/removebg".to_string();
    config.service.api_key = "test-key".to_string();
    CutoutApp::new(config)
}

/// Drop a file and complete its read. Returns the effects of the drop.
fn load_file(app: &mut CutoutApp, meta: FileMeta, bytes: Vec<u8>) -> Vec<Effect> {
    let effects = app.update(Message::FileChosen(meta));
    if let Some(Effect::ReadFile { generation }) = effects.first() {
        app.update(Message::FileRead {
            generation: *generation,
            bytes,
        });
    }
    effects
}

/// Load a small PNG and submit it. Returns the run id.
fn submit_png(app: &mut CutoutApp) -> RunId {
    load_file(app, FileMeta::new("photo.png", "image/png", 4), vec![1, 2, 3, 4]);
    let effects = app.update(Message::Submit);
    sent_run(&effects).expect("submit should send a request")
}

fn sent_run(effects: &[Effect]) -> Option<RunId> {
    effects.iter().find_map(|e| match e {
        Effect::SendRequest { run, .. } => Some(*run),
        _ => None,
    })
}

fn result_image() -> ProcessedImage {
    ProcessedImage {
        bytes: vec![0x89, b'P', b'N', b'G'].into(),
        mime: "image/png".to_string(),
    }
}

/// Submit, succeed and reveal.
fn finished_app() -> CutoutApp {
    let mut app = test_app();
    let run = submit_png(&mut app);
    app.update(Message::ServiceResponded {
        run,
        result: Ok(result_image()),
    });
    app.update(Message::RevealResult(run));
    app
}
