//! Error types for the upload, processing and browser layers.

use thiserror::Error;

use crate::alert::Severity;
use crate::constants::upload::MAX_FILE_SIZE;

/// Shown when the service fails without telling us why.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while processing the image.";

/// A candidate file was rejected before any preview or network work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Declared size is above the upload limit
    #[error("File is larger than {} MB, please choose a smaller file.", MAX_FILE_SIZE / (1024 * 1024))]
    TooLarge {
        /// Declared size in bytes
        size: u64,
    },

    /// Declared MIME type is not one we accept
    #[error("Unsupported file type. Only JPG, PNG and GIF images are supported.")]
    UnsupportedType {
        /// The declared type, possibly empty
        mime: String,
    },
}

/// The background-removal call did not produce an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with its structured error body
    #[error("service rejected the request (HTTP {status})")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// `title` of the first reported error, if any
        title: Option<String>,
    },

    /// Non-success status without a readable error body
    #[error("service returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// Success status but no image bytes
    #[error("the service returned an empty image")]
    EmptyResult,
}

impl ServiceError {
    /// Best-effort text for the user: the service's own error title, then
    /// the transport or status description, then a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected {
                title: Some(title), ..
            } if !title.trim().is_empty() => title.clone(),
            ServiceError::Rejected { .. } => FALLBACK_ERROR_MESSAGE.to_string(),
            ServiceError::Transport(message) if message.trim().is_empty() => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Everything that can go wrong while handling a user action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Submit pressed with nothing in the drop zone
    #[error("Please select an image first!")]
    NoFileSelected,

    /// Retry pressed before anything was submitted
    #[error("Nothing to process again, please select an image.")]
    NothingToRetry,

    /// Reading the selected file failed
    #[error("Could not read the selected file: {0}")]
    FileRead(String),

    /// The processed image came back but could not be put on the page
    #[error("Error: could not display the processed image ({0})")]
    ResultUnavailable(String),

    /// A run is already in flight
    #[error("an image is already being processed")]
    Busy,
}

impl AppError {
    /// Severity of the alert raised for this error.
    pub fn severity(&self) -> Severity {
        match self {
            AppError::NoFileSelected | AppError::NothingToRetry | AppError::Busy => {
                Severity::Warning
            }
            AppError::Validation(_)
            | AppError::Service(_)
            | AppError::FileRead(_)
            | AppError::ResultUnavailable(_) => Severity::Danger,
        }
    }

    /// Text shown in the alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Service(e) => format!("Error: {}", e.user_message()),
            other => other.to_string(),
        }
    }

    /// Whether the user should be told about this error at all.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, AppError::Busy)
    }
}

/// Errors loading the application configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config written by an incompatible version
    #[error("Unsupported config version {found} (expected at most {supported})")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },
}

/// Errors from the browser bindings.
#[derive(Error, Debug)]
pub enum WebError {
    /// No global `window` (not running in a page)
    #[error("No window available")]
    NoWindow,

    /// The window has no document
    #[error("No document available")]
    NoDocument,

    /// An element the page markup must provide is absent
    #[error("Element #{0} not found")]
    MissingElement(&'static str),

    /// An element exists but is not of the expected kind
    #[error("Element #{0} has an unexpected type")]
    WrongElementType(&'static str),

    /// A JavaScript exception
    #[error("JavaScript error: {0}")]
    Js(String),
}
