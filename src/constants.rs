//! Global constants for the Cutout front end

/// Limits applied to candidate files before any preview or network work.
pub mod upload {
    /// Largest accepted file, in bytes (5 MiB)
    pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
    /// Declared MIME types accepted for upload. `image/jpg` is a common alias.
    pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/jpg"];
}

/// Remote background-removal service.
pub mod service {
    /// remove.bg v1 endpoint
    pub const DEFAULT_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";
    /// Header carrying the static API credential
    pub const API_KEY_HEADER: &str = "X-Api-Key";
    /// Multipart field holding the image payload
    pub const IMAGE_FIELD: &str = "image_file";
    /// Multipart field selecting the output resolution
    pub const SIZE_FIELD: &str = "size";
    /// Let the service pick the largest size the account allows
    pub const DEFAULT_SIZE: &str = "auto";
    /// Type assumed for a result whose format cannot be determined
    pub const FALLBACK_RESULT_MIME: &str = "image/png";
}

/// Cosmetic progress indicator timing.
pub mod progress {
    /// Interval between progress bar steps (ms)
    pub const TICK_INTERVAL_MS: i32 = 100;
    /// Percent added per tick
    pub const STEP_PERCENT: u8 = 2;
    /// The bar never passes this until the request settles
    pub const CAP_PERCENT: u8 = 90;
    /// Interval between ellipsis frames (ms)
    pub const DOTS_INTERVAL_MS: i32 = 500;
    /// Ellipsis cycles through 0..=MAX_DOTS dots
    pub const MAX_DOTS: u8 = 3;
    /// Delay between a successful response and revealing the result (ms)
    pub const REVEAL_DELAY_MS: i32 = 500;
}

/// Alert presenter defaults.
pub mod alert {
    /// Auto-dismiss delay (ms)
    pub const DEFAULT_DURATION_MS: u32 = 5000;
}

/// Image viewer zoom and pan behavior.
pub mod viewer {
    /// Minimum zoom factor
    pub const MIN_SCALE: f32 = 1.0;
    /// Maximum zoom factor
    pub const MAX_SCALE: f32 = 5.0;
    /// Zoom change per wheel notch or key press
    pub const SCALE_STEP: f32 = 0.1;
    /// Pan change per shift+wheel notch or arrow key press (px)
    pub const PAN_STEP: f32 = 20.0;
    /// Pinch distance (px) that changes zoom by 1.0
    pub const PINCH_DIVISOR: f32 = 200.0;
    /// Finger travel (px) that pans by 1px
    pub const TOUCH_PAN_DIVISOR: f32 = 10.0;
    /// CSS transition applied to every transform change
    pub const TRANSITION: &str = "transform 0.1s ease-out";
}

/// Download defaults.
pub mod download {
    /// File name offered for the processed image
    pub const DEFAULT_FILE_NAME: &str = "removed-background.png";
}

/// Browser storage keys.
pub mod storage {
    /// localStorage key holding a JSON [`crate::config::AppConfig`]
    pub const CONFIG_KEY: &str = "cutout.config";
}

/// Ids of the page elements the runtime binds to.
pub mod dom {
    pub const DROP_ZONE: &str = "dropZone";
    pub const FILE_INPUT: &str = "image";
    pub const SELECT_FILE_BUTTON: &str = "selectFileBtn";
    pub const DROP_ZONE_CONTENT: &str = "dropZoneContent";
    pub const DROP_ZONE_PREVIEW: &str = "dropZonePreview";
    pub const PREVIEW_IMAGE: &str = "previewImage";
    pub const PREVIEW_FILE_NAME: &str = "previewFileName";
    pub const REMOVE_PREVIEW_BUTTON: &str = "removePreviewBtn";
    pub const UPLOAD_FORM: &str = "uploadForm";
    pub const SUBMIT_BUTTON: &str = "submitBtn";
    pub const ALERT_CONTAINER: &str = "alertContainer";
    pub const PROGRESS_CONTAINER: &str = "progressBarContainer";
    pub const PROGRESS_BAR: &str = "progressBar";
    pub const DOTS: &str = "dots";
    pub const RESULT_PANEL: &str = "result";
    pub const PROCESSED_IMAGE: &str = "processedImage";
    pub const RETRY_BUTTON: &str = "retryBtn";
    pub const DOWNLOAD_BUTTON: &str = "downloadBtn";
    pub const CANCEL_BUTTON: &str = "cancelResultBtn";
    pub const MODAL: &str = "imageModal";
    pub const MODAL_CLOSE_BUTTON: &str = "modalCloseBtn";
    pub const ZOOM_CONTAINER: &str = "zoomContainer";
    pub const MODAL_IMAGE: &str = "modalImage";

    /// Classes toggled on the drop zone while a drag hovers it
    pub const DRAG_HIGHLIGHT_CLASSES: &[&str] = &["border-primary", "bg-primary-subtle"];
    /// Class hiding an element
    pub const HIDDEN_CLASS: &str = "d-none";
    /// Class marking an open modal
    pub const MODAL_SHOWN_CLASS: &str = "show";
}
