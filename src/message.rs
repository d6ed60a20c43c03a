//! Application message types for Cutout.
//!
//! All UI events and async completions are represented as messages in the
//! Elm architecture style.

use crate::api::ProcessedImage;
use crate::error::ServiceError;
use crate::session::RunId;
use crate::validation::FileMeta;
use crate::viewer::{ViewerInput, ViewerKey};

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Drop zone
    /// A drag entered or moved over the drop zone
    DragOver,
    /// A drag left the drop zone or was dropped
    DragEnded,
    /// A file was dropped or picked
    FileChosen(FileMeta),
    /// The bytes of a chosen file were read
    FileRead { generation: u64, bytes: Vec<u8> },
    /// Reading a chosen file failed
    FileReadFailed { generation: u64, reason: String },
    /// Drop zone or "select file" button clicked
    BrowseRequested,
    /// Remove button on the preview clicked
    RemovePreview,

    // Pipeline
    /// Upload form submitted
    Submit,
    /// "Process again" clicked
    Retry,
    /// "Cancel" on the result panel clicked
    Reset,
    /// Progress bar timer fired
    ProgressTick(RunId),
    /// Ellipsis timer fired
    DotsTick(RunId),
    /// The background-removal request settled
    ServiceResponded {
        run: RunId,
        result: Result<ProcessedImage, ServiceError>,
    },
    /// Reveal delay elapsed
    RevealResult(RunId),
    /// The processed image of a run could not be shown
    PublishFailed { run: RunId, reason: String },

    // Alerts
    /// Auto-dismiss timer for an alert fired
    AlertExpired(u64),
    /// Close button of an alert clicked
    AlertClosed(u64),

    // Viewer
    /// Result image clicked
    OpenViewer,
    /// Close button or backdrop clicked
    CloseViewer,
    /// Key pressed anywhere on the page
    ViewerKey(ViewerKey),
    /// Wheel or touch input over the zoom container
    ViewerInput(ViewerInput),
    /// Download button clicked
    Download,
}
