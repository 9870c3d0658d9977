use super::transport::{ApiRequest, ApiResponse, FormField, Method, RequestBody, Transport};
use crate::errors::{Error, GENERIC_FAILURE, Result};
use crate::models::{Page, PageKeys, PageRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Client for the marketplace backend.
///
/// Carries the session cookie the way a browser would with `withCredentials`:
/// it is attached to every request and replaced by any `Set-Cookie` the
/// backend sends.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cookie: RwLock<Option<String>>,
}

impl ApiClient {
    /// Client with no session cookie yet.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cookie: RwLock::new(None),
        }
    }

    /// Restores a cookie saved by a previous run.
    pub async fn set_cookie(&self, cookie: Option<String>) {
        *self.cookie.write().await = cookie;
    }

    /// Current session cookie, for persisting.
    pub async fn cookie(&self) -> Option<String> {
        self.cookie.read().await.clone()
    }

    /// Sends a request and returns the body of a successful response.
    ///
    /// # Errors
    /// [`Error::Network`] if no response arrived, [`Error::Api`] for a status
    /// outside 2xx/3xx carrying the body's `message`.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Value> {
        if let Some(cookie) = self.cookie.read().await.clone() {
            request.headers.push(("Cookie".to_string(), cookie));
        }
        let path = request.path.clone();
        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(%path, error = %e, "request did not complete");
        })?;
        self.remember_cookies(&response).await;

        if response.is_success() {
            Ok(response.body)
        } else {
            let message = message_of(&response.body).unwrap_or(GENERIC_FAILURE).to_string();
            warn!(%path, status = response.status, %message, "request rejected");
            Err(Error::Api {
                status: response.status,
                message,
            })
        }
    }

    async fn remember_cookies(&self, response: &ApiResponse) {
        if response.set_cookies.is_empty() {
            return;
        }
        let pairs: Vec<&str> = response
            .set_cookies
            .iter()
            .filter_map(|raw| raw.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();
        if !pairs.is_empty() {
            *self.cookie.write().await = Some(pairs.join("; "));
        }
    }

    pub(crate) async fn get(&self, path: impl Into<String>, query: Vec<(String, String)>) -> Result<Value> {
        self.execute(ApiRequest::new(Method::Get, path).with_query(query))
            .await
    }

    pub(crate) async fn get_as<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T> {
        let body = self.get(path, Vec::new()).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetches one page of a list endpoint.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        mut query: Vec<(String, String)>,
        page: PageRequest,
        keys: PageKeys,
    ) -> Result<Page<T>> {
        query.extend(page.query());
        let body = self.get(path, query).await?;
        Page::from_body(&body, keys, page)
    }

    pub(crate) async fn send_json(
        &self,
        method: Method,
        path: impl Into<String>,
        body: Value,
    ) -> Result<Value> {
        self.execute(ApiRequest::new(method, path).with_json(body))
            .await
    }

    pub(crate) async fn send_body(
        &self,
        method: Method,
        path: impl Into<String>,
        body: RequestBody,
    ) -> Result<Value> {
        self.execute(ApiRequest::new(method, path).with_body(body))
            .await
    }

    pub(crate) async fn delete(&self, path: impl Into<String>) -> Result<Value> {
        self.execute(ApiRequest::new(Method::Delete, path)).await
    }

    /// Sends a body-less PUT, the shape of every flag toggle endpoint.
    pub(crate) async fn put_empty(&self, path: impl Into<String>) -> Result<Value> {
        self.send_json(Method::Put, path, Value::Object(serde_json::Map::new()))
            .await
    }
}

/// The `message` field of a response body, if it has a non-empty one.
#[must_use]
pub fn message_of(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
}

/// Success text for a mutation: the backend's message or the given default.
pub(crate) fn message_or(body: &Value, default: &str) -> String {
    message_of(body).unwrap_or(default).to_string()
}

/// Builds a form body: multipart when a file is attached, JSON otherwise.
///
/// `fields` are the text fields in wire order; `null` values are left out of JSON
/// and sent empty in multipart. `image` is the already-read file field, or `None`
/// to send `image_url` (if any) as a plain JSON field.
pub(crate) fn form_body(
    fields: Vec<(&'static str, Value)>,
    image: Option<FormField>,
    image_url: Option<String>,
) -> RequestBody {
    if let Some(file) = image {
        let mut parts: Vec<FormField> = fields
            .into_iter()
            .map(|(name, value)| FormField::text(name, text_of(&value)))
            .collect();
        parts.push(file);
        RequestBody::Multipart(parts)
    } else {
        let mut map = serde_json::Map::new();
        for (name, value) in fields.into_iter().filter(|(_, v)| !v.is_null()) {
            map.insert(name.to_string(), value);
        }
        if let Some(url) = image_url {
            map.insert("image".to_string(), Value::String(url));
        }
        RequestBody::Json(Value::Object(map))
    }
}

// Multipart fields are plain strings; `null` becomes an empty field.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_execute_returns_body_on_success() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"ok": true}));
        let client = ApiClient::new(mock.clone());

        let body = client.get("product", Vec::new()).await?;
        assert_eq!(body["ok"], true);
        assert_eq!(mock.requests()[0].path, "product");
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_maps_status_to_api_error() {
        let mock = MockTransport::new();
        mock.push(404, json!({"message": "Product not found"}));
        let client = ApiClient::new(mock);

        let err = client.get("product/product/x", Vec::new()).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Product not found"));
    }

    #[tokio::test]
    async fn test_missing_message_uses_generic_text() {
        let mock = MockTransport::new();
        mock.push(500, Value::Null);
        let client = ApiClient::new(mock);

        let err = client.delete("seller/product/p1").await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_cookie_is_captured_and_sent() -> Result<()> {
        let mock = MockTransport::new();
        mock.push_response(ApiResponse {
            status: 200,
            body: json!({}),
            set_cookies: vec!["token=abc; Path=/; HttpOnly".to_string()],
        });
        mock.push(200, json!({}));
        let client = ApiClient::new(mock.clone());

        client.get("first", Vec::new()).await?;
        assert_eq!(client.cookie().await.as_deref(), Some("token=abc"));

        client.get("second", Vec::new()).await?;
        let requests = mock.requests();
        assert!(requests[0].headers.is_empty());
        assert_eq!(
            requests[1].headers,
            vec![("Cookie".to_string(), "token=abc".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_form_body_json_when_no_file() {
        let body = form_body(
            vec![("name", json!("Acid Red")), ("price", json!(12.5)), ("tone", Value::Null)],
            None,
            Some("https://img.example/acid.png".to_string()),
        );
        assert_eq!(
            body,
            RequestBody::Json(json!({
                "name": "Acid Red",
                "price": 12.5,
                "image": "https://img.example/acid.png"
            }))
        );
    }

    #[test]
    fn test_form_body_multipart_with_file() {
        let file = FormField::File {
            name: "image".to_string(),
            file_name: "dye.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let body = form_body(
            vec![("name", json!("Acid Red")), ("stock", json!(40)), ("ci", Value::Null)],
            Some(file),
            None,
        );
        let RequestBody::Multipart(parts) = body else {
            panic!("expected multipart");
        };
        let names: Vec<&str> = parts.iter().map(FormField::name).collect();
        assert_eq!(names, vec!["name", "stock", "ci", "image"]);
        assert_eq!(parts[1], FormField::text("stock", "40"));
        assert_eq!(parts[2], FormField::text("ci", ""));
    }
}
