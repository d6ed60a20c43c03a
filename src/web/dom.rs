//! Page elements and rendering of the [`ViewModel`].

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement};

use crate::alert::Alert;
use crate::constants::dom::{self, DRAG_HIGHLIGHT_CLASSES, HIDDEN_CLASS, MODAL_SHOWN_CLASS};
use crate::error::WebError;
use crate::view_model::{PreviewView, ProgressView, ViewModel, ViewerView};

/// Attribute carrying the alert id on a rendered alert.
pub const ALERT_ID_ATTRIBUTE: &str = "data-alert-id";

fn element<T: JsCast>(document: &Document, id: &'static str) -> Result<T, WebError> {
    document
        .get_element_by_id(id)
        .ok_or(WebError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElementType(id))
}

fn set_displayed(element: &HtmlElement, displayed: bool) -> Result<(), WebError> {
    let style = element.style();
    if displayed {
        style.remove_property("display")?;
    } else {
        style.set_property("display", "none")?;
    }
    Ok(())
}

fn set_hidden_class(element: &HtmlElement, hidden: bool) -> Result<(), WebError> {
    element.class_list().toggle_with_force(HIDDEN_CLASS, hidden)?;
    Ok(())
}

/// Every element the runtime reads or writes.
pub struct Dom {
    pub document: Document,
    pub drop_zone: HtmlElement,
    pub file_input: HtmlInputElement,
    pub select_file_button: HtmlElement,
    drop_zone_content: HtmlElement,
    drop_zone_preview: HtmlElement,
    pub preview_image: HtmlImageElement,
    pub preview_file_name: HtmlElement,
    pub remove_preview_button: HtmlElement,
    pub upload_form: HtmlElement,
    submit_button: HtmlButtonElement,
    pub alert_container: HtmlElement,
    progress_container: HtmlElement,
    progress_bar: HtmlElement,
    dots: HtmlElement,
    result_panel: HtmlElement,
    pub processed_image: HtmlImageElement,
    pub retry_button: HtmlButtonElement,
    pub download_button: HtmlElement,
    pub cancel_button: HtmlElement,
    pub modal: HtmlElement,
    pub modal_close_button: HtmlElement,
    pub zoom_container: HtmlElement,
    pub modal_image: HtmlImageElement,

    // What is currently in the page, to skip redundant writes
    rendered_alert: Option<u64>,
    rendered_thumbnail: Option<Rc<str>>,
}

impl Dom {
    /// Look up every element by id.
    pub fn bind(document: Document) -> Result<Self, WebError> {
        Ok(Self {
            drop_zone: element(&document, dom::DROP_ZONE)?,
            file_input: element(&document, dom::FILE_INPUT)?,
            select_file_button: element(&document, dom::SELECT_FILE_BUTTON)?,
            drop_zone_content: element(&document, dom::DROP_ZONE_CONTENT)?,
            drop_zone_preview: element(&document, dom::DROP_ZONE_PREVIEW)?,
            preview_image: element(&document, dom::PREVIEW_IMAGE)?,
            preview_file_name: element(&document, dom::PREVIEW_FILE_NAME)?,
            remove_preview_button: element(&document, dom::REMOVE_PREVIEW_BUTTON)?,
            upload_form: element(&document, dom::UPLOAD_FORM)?,
            submit_button: element(&document, dom::SUBMIT_BUTTON)?,
            alert_container: element(&document, dom::ALERT_CONTAINER)?,
            progress_container: element(&document, dom::PROGRESS_CONTAINER)?,
            progress_bar: element(&document, dom::PROGRESS_BAR)?,
            dots: element(&document, dom::DOTS)?,
            result_panel: element(&document, dom::RESULT_PANEL)?,
            processed_image: element(&document, dom::PROCESSED_IMAGE)?,
            retry_button: element(&document, dom::RETRY_BUTTON)?,
            download_button: element(&document, dom::DOWNLOAD_BUTTON)?,
            cancel_button: element(&document, dom::CANCEL_BUTTON)?,
            modal: element(&document, dom::MODAL)?,
            modal_close_button: element(&document, dom::MODAL_CLOSE_BUTTON)?,
            zoom_container: element(&document, dom::ZOOM_CONTAINER)?,
            modal_image: element(&document, dom::MODAL_IMAGE)?,
            document,
            rendered_alert: None,
            rendered_thumbnail: None,
        })
    }

    /// Write `view` into the page.
    pub fn render(&mut self, view: &ViewModel) -> Result<(), WebError> {
        let classes = self.drop_zone.class_list();
        for class in DRAG_HIGHLIGHT_CLASSES {
            classes.toggle_with_force(class, view.drop_highlighted)?;
        }

        self.render_preview(view.preview.as_ref())?;
        self.submit_button.set_disabled(!view.submit_enabled);
        self.retry_button.set_disabled(!view.retry_enabled);
        self.render_alert(view.alert.as_ref())?;
        self.render_progress(view.progress.as_ref())?;
        set_displayed(&self.result_panel, view.result_visible)?;
        self.render_viewer(view.modal_open, &view.viewer)?;
        Ok(())
    }

    /// Point both result images at `url`, or clear them.
    pub fn show_result(&self, url: Option<&str>) -> Result<(), WebError> {
        for image in [&self.processed_image, &self.modal_image] {
            match url {
                Some(url) => image.set_src(url),
                None => image.remove_attribute("src")?,
            }
        }
        Ok(())
    }

    fn render_preview(&mut self, preview: Option<&PreviewView>) -> Result<(), WebError> {
        set_hidden_class(&self.drop_zone_content, preview.is_some())?;
        set_hidden_class(&self.drop_zone_preview, preview.is_none())?;
        set_hidden_class(&self.remove_preview_button, preview.is_none())?;

        match preview {
            Some(preview) => {
                let unchanged = self
                    .rendered_thumbnail
                    .as_ref()
                    .is_some_and(|shown| Rc::ptr_eq(shown, &preview.thumbnail));
                if !unchanged {
                    self.preview_image.set_src(&preview.thumbnail);
                    self.rendered_thumbnail = Some(preview.thumbnail.clone());
                }
                self.preview_file_name.set_text_content(Some(&preview.file_name));
            }
            None => {
                if self.rendered_thumbnail.take().is_some() {
                    self.preview_image.remove_attribute("src")?;
                }
                self.preview_file_name.set_text_content(None);
            }
        }
        Ok(())
    }

    fn render_alert(&mut self, alert: Option<&Alert>) -> Result<(), WebError> {
        let id = alert.map(|alert| alert.id);
        if id == self.rendered_alert {
            return Ok(());
        }

        self.alert_container.set_inner_html("");
        if let Some(alert) = alert {
            let node = self.document.create_element("div")?;
            node.set_id(&alert.element_id());
            node.set_class_name(&format!(
                "alert alert-{} alert-dismissible fade show",
                alert.severity.name()
            ));
            node.set_attribute("role", "alert")?;
            node.set_attribute(ALERT_ID_ATTRIBUTE, &alert.id.to_string())?;

            let icon = self.document.create_element("i")?;
            icon.set_class_name(&format!("bi bi-{}-fill me-2", alert.severity.icon()));
            node.append_child(&icon)?;
            node.append_child(&self.document.create_text_node(&alert.message))?;

            let close = self.document.create_element("button")?;
            close.set_attribute("type", "button")?;
            close.set_attribute("aria-label", "Close")?;
            close.set_class_name("btn-close");
            node.append_child(&close)?;

            self.alert_container.append_child(&node)?;
        }
        self.rendered_alert = id;
        Ok(())
    }

    fn render_progress(&self, progress: Option<&ProgressView>) -> Result<(), WebError> {
        set_displayed(&self.progress_container, progress.is_some())?;
        match progress {
            Some(progress) => {
                let percent = progress.percent.to_string();
                self.progress_bar
                    .style()
                    .set_property("width", &format!("{}%", percent))?;
                self.progress_bar.set_attribute("aria-valuenow", &percent)?;
                self.dots.set_text_content(Some(&progress.dots));
            }
            None => self.dots.set_text_content(None),
        }
        Ok(())
    }

    fn render_viewer(&self, open: bool, viewer: &ViewerView) -> Result<(), WebError> {
        self.modal
            .class_list()
            .toggle_with_force(MODAL_SHOWN_CLASS, open)?;
        self.modal
            .style()
            .set_property("display", if open { "block" } else { "none" })?;
        self.modal
            .set_attribute("aria-hidden", if open { "false" } else { "true" })?;

        let style = self.modal_image.style();
        style.set_property("transition", viewer.transition)?;
        style.set_property("transform", &viewer.transform)?;
        Ok(())
    }
}
