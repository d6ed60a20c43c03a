//! Side effects requested by [`crate::CutoutApp::update`].
//!
//! The application state never touches the browser. It returns effects and
//! the runtime performs them, feeding results back as messages.

use crate::api::{ProcessedImage, RemovalRequest};
use crate::session::RunId;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open the hidden file input's picker
    OpenFilePicker,
    /// Reset the hidden file input so the same file can be chosen again
    ClearFileInput,
    /// Read the most recently chosen file, answering with
    /// `FileRead`/`FileReadFailed` for `generation`
    ReadFile { generation: u64 },

    /// Start the progress and ellipsis intervals for `run`
    StartProgressTimers(RunId),
    /// Stop both intervals
    StopProgressTimers,
    /// Perform the background-removal call
    SendRequest { run: RunId, request: RemovalRequest },
    /// Send `RevealResult(run)` after `delay_ms`
    ScheduleReveal { run: RunId, delay_ms: i32 },

    /// Make the result of `run` displayable in the inline and modal images,
    /// releasing any previous result URL. On failure the runtime answers
    /// with `PublishFailed` and performs no further effects of the update.
    PublishResult { run: RunId, image: ProcessedImage },
    /// Release the displayed result URL
    ReleaseResult,
    /// Save the image under `file_name`
    Download {
        image: ProcessedImage,
        file_name: String,
    },

    /// Send `AlertExpired(id)` after `delay_ms`
    ScheduleAlertDismiss { id: u64, delay_ms: u32 },
    /// Smooth-scroll the page to the top
    ScrollToTop,
}
