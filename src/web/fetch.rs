//! Network and blob plumbing: the multipart upload, file reads and object URLs.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response, Url};

use super::js_error_message;
use crate::api::{FormField, ProcessedImage, RemovalRequest, interpret_response};
use crate::error::{ServiceError, WebError};

/// Send `request` and interpret whatever comes back.
pub async fn send(request: &RemovalRequest) -> Result<ProcessedImage, ServiceError> {
    match post(request).await {
        Ok((status, content_type, body)) => {
            log::debug!("Service answered HTTP {} with {} bytes", status, body.len());
            interpret_response(status, content_type.as_deref(), body)
        }
        Err(e) => {
            let message = js_error_message(&e);
            log::error!("Request to {} failed: {}", request.endpoint, message);
            Err(ServiceError::Transport(message))
        }
    }
}

async fn post(request: &RemovalRequest) -> Result<(u16, Option<String>, Vec<u8>), JsValue> {
    let headers = Headers::new()?;
    for (name, value) in request.headers() {
        headers.set(name, value)?;
    }

    let form = FormData::new()?;
    for field in request.form_fields() {
        match field {
            FormField::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let blob = blob_from_bytes(bytes, mime)?;
                form.append_with_blob_and_filename(name, &blob, file_name)?;
            }
            FormField::Text { name, value } => form.append_with_str(name, value)?,
        }
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&form);
    let http_request = Request::new_with_str_and_init(&request.endpoint, &init)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&http_request))
        .await?
        .dyn_into()?;

    let status = response.status();
    let content_type = response.headers().get("content-type")?;
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok((status, content_type, Uint8Array::new(&buffer).to_vec()))
}

/// Read the whole of a picked or dropped file.
pub async fn read_blob(blob: &Blob) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(|e| js_error_message(&e))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn blob_from_bytes(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// An object URL for an image, revoked when dropped.
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(image: &ProcessedImage) -> Result<Self, WebError> {
        let blob = blob_from_bytes(&image.bytes, &image.mime)?;
        Ok(Self(Url::create_object_url_with_blob(&blob)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke {}: {}", self.0, js_error_message(&e));
        }
    }
}
