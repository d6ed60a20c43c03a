//! Render snapshot of the application state.
//!
//! The runtime writes a [`ViewModel`] into the page after every message, so
//! everything the page shows (apart from the result image URL, which the
//! runtime owns) is derived from here.

use std::rc::Rc;

use crate::alert::Alert;

/// The preview shown in a loaded drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub file_name: String,
    pub thumbnail: Rc<str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u8,
    pub dots: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    /// CSS `transform` of the modal image
    pub transform: String,
    /// CSS `transition` of the modal image
    pub transition: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Drop zone highlighted while a drag hovers it
    pub drop_highlighted: bool,
    /// `None` shows the empty drop target
    pub preview: Option<PreviewView>,
    pub submit_enabled: bool,
    pub retry_enabled: bool,
    pub alert: Option<Alert>,
    /// `None` hides the progress container
    pub progress: Option<ProgressView>,
    pub result_visible: bool,
    pub modal_open: bool,
    /// Written even while closed so the image is reset for the next opening
    pub viewer: ViewerView,
}
