//! Submission, progress, service outcomes, retry and reset.

use super::*;
use crate::alert::Severity;
use crate::api::{FormField, interpret_response};
use crate::error::ServiceError;

#[test]
fn test_submit_starts_timers_and_sends_request() {
    let mut app = test_app();
    load_file(&mut app, FileMeta::new("photo.png", "image/png", 4), vec![1, 2, 3, 4]);
    let effects = app.update(Message::Submit);

    let run = sent_run(&effects).unwrap();
    assert!(effects.contains(&Effect::StartProgressTimers(run)));

    let request = effects
        .iter()
        .find_map(|e| match e {
            Effect::SendRequest { request, .. } => Some(request.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(request.endpoint, "https://example.test/removebg");
    assert_eq!(request.headers(), vec![("X-Api-Key", "test-key")]);
    assert!(matches!(
        request.form_fields()[0],
        FormField::File { name: "image_file", bytes: [1, 2, 3, 4], .. }
    ));

    let view = app.view();
    assert_eq!(view.progress.unwrap().percent, 0);
    assert!(!view.result_visible);
    assert!(!view.submit_enabled);
    assert!(!view.retry_enabled);
}

#[test]
fn test_progress_ramp_and_dots() {
    let mut app = test_app();
    let run = submit_png(&mut app);
    for _ in 0..100 {
        app.update(Message::ProgressTick(run));
    }
    app.update(Message::DotsTick(run));
    app.update(Message::DotsTick(run));

    let progress = app.view().progress.unwrap();
    assert_eq!(progress.percent, 90);
    assert_eq!(progress.dots, "..");
}

#[test]
fn test_success_reveals_result_after_delay() {
    let mut app = test_app();
    let run = submit_png(&mut app);
    app.update(Message::ProgressTick(run));

    let effects = app.update(Message::ServiceResponded {
        run,
        result: Ok(result_image()),
    });
    assert_eq!(
        effects,
        vec![
            Effect::StopProgressTimers,
            Effect::PublishResult {
                run,
                image: result_image(),
            },
            Effect::ScheduleReveal { run, delay_ms: 500 },
        ]
    );

    let view = app.view();
    let progress = view.progress.unwrap();
    assert_eq!(progress.percent, 100);
    assert_eq!(progress.dots, "");
    assert!(!view.result_visible);

    app.update(Message::RevealResult(run));
    let view = app.view();
    assert!(view.progress.is_none());
    assert!(view.result_visible);
    assert!(view.alert.is_none());
    assert!(view.retry_enabled);
}

#[test]
fn test_service_error_title_shown() {
    let mut app = test_app();
    let run = submit_png(&mut app);
    let body = br#"{"errors":[{"title":"insufficient credits"}]}"#.to_vec();
    let result = interpret_response(402, Some("application/json"), body);

    let effects = app.update(Message::ServiceResponded { run, result });
    assert_eq!(effects.first(), Some(&Effect::StopProgressTimers));
    assert!(!effects.iter().any(|e| matches!(e, Effect::PublishResult { .. })));

    let view = app.view();
    assert!(view.progress.is_none());
    assert!(!view.result_visible);
    let alert = view.alert.unwrap();
    assert_eq!(alert.severity, Severity::Danger);
    assert_eq!(alert.message, "Error: insufficient credits");
}

#[test]
fn test_transport_failure_message() {
    let mut app = test_app();
    let run = submit_png(&mut app);
    app.update(Message::ServiceResponded {
        run,
        result: Err(ServiceError::Transport("Failed to fetch".to_string())),
    });
    assert_eq!(app.view().alert.unwrap().message, "Error: Failed to fetch");
}

#[test]
fn test_outcomes_are_exclusive() {
    for succeed in [true, false] {
        let mut app = test_app();
        let run = submit_png(&mut app);
        let result = if succeed {
            Ok(result_image())
        } else {
            Err(ServiceError::Status { status: 500 })
        };
        app.update(Message::ServiceResponded { run, result });
        app.update(Message::RevealResult(run));

        let view = app.view();
        assert!(view.progress.is_none());
        assert_eq!(view.result_visible, succeed);
        assert_eq!(view.alert.is_some(), !succeed);
    }
}

#[test]
fn test_double_submit_ignored() {
    let mut app = test_app();
    submit_png(&mut app);
    let effects = app.update(Message::Submit);
    assert!(effects.is_empty());
    assert!(app.view().alert.is_none());
}

#[test]
fn test_retry_without_submission_warns() {
    let mut app = test_app();
    let effects = app.update(Message::Retry);
    assert!(sent_run(&effects).is_none());
    assert!(!effects.iter().any(|e| matches!(e, Effect::StartProgressTimers(_))));
    assert_eq!(app.view().alert.unwrap().severity, Severity::Warning);
}

#[test]
fn test_retry_reuses_last_file() {
    let mut app = finished_app();
    // The drop zone no longer matters for retry
    app.update(Message::RemovePreview);

    let effects = app.update(Message::Retry);
    let request = effects
        .iter()
        .find_map(|e| match e {
            Effect::SendRequest { request, .. } => Some(request.clone()),
            _ => None,
        })
        .expect("retry sends a request");
    assert_eq!(request.file.name(), "photo.png");
    assert!(effects.contains(&Effect::ReleaseResult));

    let view = app.view();
    assert!(!view.result_visible);
    assert_eq!(view.progress.unwrap().percent, 0);
}

#[test]
fn test_stale_response_ignored() {
    let mut app = test_app();
    let first = submit_png(&mut app);
    app.update(Message::ServiceResponded {
        run: first,
        result: Err(ServiceError::EmptyResult),
    });
    let effects = app.update(Message::Retry);
    let second = sent_run(&effects).unwrap();

    let effects = app.update(Message::ServiceResponded {
        run: first,
        result: Ok(result_image()),
    });
    assert!(effects.is_empty());
    assert!(app.is_running(second));
}

#[test]
fn test_reset_returns_to_initial_state() {
    let mut app = finished_app();
    app.update(Message::OpenViewer);

    let effects = app.update(Message::Reset);
    assert_eq!(effects, vec![Effect::ReleaseResult, Effect::ClearFileInput]);

    let view = app.view();
    assert!(view.preview.is_none());
    assert!(!view.result_visible);
    assert!(!view.modal_open);

    // Nothing left to retry
    app.update(Message::Retry);
    assert_eq!(app.view().alert.unwrap().severity, Severity::Warning);
}

#[test]
fn test_download_uses_configured_name() {
    let mut app = finished_app();
    let effects = app.update(Message::Download);
    assert_eq!(
        effects,
        vec![Effect::Download {
            image: result_image(),
            file_name: "removed-background.png".to_string(),
        }]
    );

    let mut empty = test_app();
    assert!(empty.update(Message::Download).is_empty());
}

#[test]
fn test_unpublishable_result_rolls_back() {
    let mut app = test_app();
    let run = submit_png(&mut app);
    app.update(Message::ServiceResponded {
        run,
        result: Ok(result_image()),
    });

    let effects = app.update(Message::PublishFailed {
        run,
        reason: "out of memory".to_string(),
    });
    assert!(effects.contains(&Effect::ReleaseResult));

    // The reveal scheduled earlier must not show an empty panel
    app.update(Message::RevealResult(run));
    let view = app.view();
    assert!(view.progress.is_none());
    assert!(!view.result_visible);
    assert!(view.retry_enabled);
    let alert = view.alert.unwrap();
    assert_eq!(alert.severity, Severity::Danger);
    assert!(alert.message.contains("out of memory"));
    assert!(app.update(Message::Download).is_empty());
}

#[test]
fn test_publish_failure_for_old_run_ignored() {
    let mut app = finished_app();
    let effects = app.update(Message::PublishFailed {
        run: 1,
        reason: "late".to_string(),
    });
    assert!(effects.is_empty());
    assert!(app.view().result_visible);
}
