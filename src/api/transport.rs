//! HTTP transport seam.
//!
//! [`ApiClient`](super::ApiClient) builds [`ApiRequest`]s and hands them to a
//! [`Transport`]. The production transport is [`HttpTransport`] over `reqwest`;
//! tests script responses through a mock implementation.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP verbs used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// Uploaded file
    File {
        /// Field name
        name: String,
        /// File name reported to the backend
        file_name: String,
        /// MIME type of the content
        mime: String,
        /// File content
        bytes: Vec<u8>,
    },
}

impl FormField {
    /// Text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Field name as sent on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data` fields
    Multipart(Vec<FormField>),
}

/// A request relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path appended to the base URL, without a leading slash
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// Extra headers, such as `Cookie`
    pub headers: Vec<(String, String)>,
    /// Payload
    pub body: RequestBody,
}

impl ApiRequest {
    /// Request with no query, headers, or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Appends query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets any body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Value of a query parameter, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the backend, before status interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body; `Null` when the body was empty or not JSON
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl ApiResponse {
    /// Response without cookies.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            set_cookies: Vec::new(),
        }
    }

    /// 2xx and 3xx count as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 400
    }
}

/// Sends requests to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request. Only transport failures are errors; any HTTP
    /// status is returned as a response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest` transport against a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport. `base_url` must end with `/`.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn multipart(fields: Vec<FormField>) -> Result<Form> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => form.part(name, Part::bytes(bytes).file_name(file_name).mime_str(&mime)?),
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = ?request.method, %url, "sending request");

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &url)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(Self::multipart(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        debug!(status, "received response");
        Ok(ApiResponse {
            status,
            body,
            set_cookies,
        })
    }
}

/// Reads an image file for upload, guessing its MIME type from the extension.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read.
pub async fn image_field(name: &str, path: &std::path::Path) -> Result<FormField> {
    let bytes = tokio::fs::read(path).await.map_err(Error::Io)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    Ok(FormField::File {
        name: name.to_string(),
        file_name,
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::new(Method::Get, "admin/products")
            .with_query(vec![("page".to_string(), "2".to_string())])
            .with_json(json!({"a": 1}));
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("limit"), None);
        assert_eq!(request.body, RequestBody::Json(json!({"a": 1})));
    }

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, Value::Null).is_success());
        assert!(ApiResponse::new(201, Value::Null).is_success());
        assert!(ApiResponse::new(304, Value::Null).is_success());
        assert!(!ApiResponse::new(401, Value::Null).is_success());
        assert!(!ApiResponse::new(500, Value::Null).is_success());
    }

    #[tokio::test]
    async fn test_image_field_reads_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile()?;
        file.write_all(b"\x89PNG")?;

        let field = image_field("image", file.path()).await?;
        match field {
            FormField::File {
                name, mime, bytes, ..
            } => {
                assert_eq!(name, "image");
                assert_eq!(mime, "image/png");
                assert_eq!(bytes, b"\x89PNG");
            }
            FormField::Text { .. } => panic!("expected a file field"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_image_field_missing_file() {
        let result = image_field("image", std::path::Path::new("/nonexistent/dye.jpg")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
