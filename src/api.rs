//! remove.bg request construction and response interpretation.
//!
//! Nothing here touches the network. The browser runtime turns a
//! [`RemovalRequest`] into a `fetch` call and hands the raw response back to
//! [`interpret_response`].

use std::rc::Rc;

use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::constants::service::{
    API_KEY_HEADER, FALLBACK_RESULT_MIME, IMAGE_FIELD, SIZE_FIELD,
};
use crate::error::ServiceError;
use crate::validation::SourceFile;

/// One outbound background-removal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub endpoint: String,
    pub api_key: String,
    pub size: String,
    pub file: SourceFile,
}

/// A multipart form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField<'a> {
    File {
        name: &'static str,
        file_name: &'a str,
        mime: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'static str,
        value: &'a str,
    },
}

impl RemovalRequest {
    pub fn new(service: &ServiceConfig, file: SourceFile) -> Self {
        Self {
            endpoint: service.endpoint.clone(),
            api_key: service.api_key.clone(),
            size: service.size.clone(),
            file,
        }
    }

    /// Request headers. The browser sets the multipart content type itself.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![(API_KEY_HEADER, self.api_key.as_str())]
    }

    /// Multipart body fields, in order.
    pub fn form_fields(&self) -> Vec<FormField<'_>> {
        vec![
            FormField::File {
                name: IMAGE_FIELD,
                file_name: self.file.name(),
                mime: self.file.mime(),
                bytes: &self.file.bytes,
            },
            FormField::Text {
                name: SIZE_FIELD,
                value: &self.size,
            },
        ]
    }
}

/// Image returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub bytes: Rc<[u8]>,
    pub mime: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Turn a raw HTTP response into an image or a [`ServiceError`].
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> Result<ProcessedImage, ServiceError> {
    if !(200..300).contains(&status) {
        return Err(parse_error_body(status, &body));
    }

    if body.is_empty() {
        return Err(ServiceError::EmptyResult);
    }

    let mime = result_mime(content_type, &body);
    Ok(ProcessedImage {
        bytes: body.into(),
        mime,
    })
}

fn parse_error_body(status: u16, body: &[u8]) -> ServiceError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => {
            let first = parsed.errors.into_iter().next();
            if let Some(entry) = &first {
                log::warn!(
                    "Service error {}: code={:?} title={:?} detail={:?}",
                    status,
                    entry.code,
                    entry.title,
                    entry.detail
                );
            }
            ServiceError::Rejected {
                status,
                title: first.and_then(|e| e.title),
            }
        }
        Err(e) => {
            log::warn!("Unreadable error body for HTTP {}: {}", status, e);
            ServiceError::Status { status }
        }
    }
}

/// Prefer the declared image type, then the byte signature.
fn result_mime(content_type: Option<&str>, bytes: &[u8]) -> String {
    let declared = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| ct.starts_with("image/"));

    if let Some(declared) = declared {
        return declared.to_string();
    }

    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => FALLBACK_RESULT_MIME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FileMeta;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn request() -> RemovalRequest {
        let service = ServiceConfig {
            endpoint: "https://example.test/removebg".to_string(),
            api_key: "secret".to_string(),
            size: "auto".to_string(),
        };
        let file = SourceFile::new(FileMeta::new("cat.jpg", "image/jpeg", 3), vec![1, 2, 3]);
        RemovalRequest::new(&service, file)
    }

    #[test]
    fn test_request_shape() {
        let req = request();
        assert_eq!(req.endpoint, "https://example.test/removebg");
        assert_eq!(req.headers(), vec![("X-Api-Key", "secret")]);

        let fields = req.form_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields[0],
            FormField::File {
                name: "image_file",
                file_name: "cat.jpg",
                mime: "image/jpeg",
                bytes: &[1, 2, 3],
            }
        );
        assert_eq!(
            fields[1],
            FormField::Text {
                name: "size",
                value: "auto"
            }
        );
    }

    #[test]
    fn test_success_uses_declared_type() {
        let img = interpret_response(200, Some("image/png; charset=binary"), vec![1, 2]).unwrap();
        assert_eq!(img.mime, "image/png");
        assert_eq!(&*img.bytes, &[1, 2]);
    }

    #[test]
    fn test_success_sniffs_missing_type() {
        let img = interpret_response(200, None, PNG_SIGNATURE.to_vec()).unwrap();
        assert_eq!(img.mime, "image/png");

        let unknown = interpret_response(200, Some("application/octet-stream"), vec![0, 1]).unwrap();
        assert_eq!(unknown.mime, FALLBACK_RESULT_MIME);
    }

    #[test]
    fn test_empty_success_is_error() {
        assert_eq!(
            interpret_response(200, Some("image/png"), Vec::new()),
            Err(ServiceError::EmptyResult)
        );
    }

    #[test]
    fn test_error_body_title() {
        let body = br#"{"errors":[{"title":"insufficient credits","code":"insufficient_credits"}]}"#;
        let err = interpret_response(402, Some("application/json"), body.to_vec()).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected {
                status: 402,
                title: Some("insufficient credits".to_string())
            }
        );
        assert_eq!(err.user_message(), "insufficient credits");
    }

    #[test]
    fn test_error_body_without_entries() {
        let err = interpret_response(400, None, br#"{"errors":[]}"#.to_vec()).unwrap_err();
        assert_eq!(err, ServiceError::Rejected { status: 400, title: None });

        let err = interpret_response(400, None, br#"{}"#.to_vec()).unwrap_err();
        assert_eq!(err, ServiceError::Rejected { status: 400, title: None });
    }

    #[test]
    fn test_non_json_error_body() {
        let err = interpret_response(502, Some("text/html"), b"<html>bad gateway</html>".to_vec())
            .unwrap_err();
        assert_eq!(err, ServiceError::Status { status: 502 });
        assert_eq!(err.user_message(), "service returned HTTP 502");
    }
}
