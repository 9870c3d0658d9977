//! Public inquiry board: buyers post stock requests without an account and
//! keep their ids locally to follow them up.

use super::client::{ApiClient, form_body};
use super::segment;
use super::transport::Method;
use crate::core::forms::{RequestForm, Validate};
use crate::errors::Result;
use crate::models::{Page, PageKeys, PageRequest, SortOrder, StockRequest};
use serde_json::Value;
use tracing::info;

const PUBLIC_REQUESTS: PageKeys = PageKeys::new("requests", "totalBuy");

/// Text shown after a request was recorded.
pub const REQUEST_RECORDED: &str = "Your Request has been recorded successfully";

impl ApiClient {
    /// Posts a stock request and returns the id the backend assigned to it.
    pub async fn submit_request(&self, form: &RequestForm) -> Result<String> {
        form.validate()?;
        let (file, url) = form.image.resolve().await?;
        let body = self
            .send_body(Method::Post, "seller/request/add", form_body(form.fields(), file, url))
            .await?;
        let id: String = serde_json::from_value(
            body.pointer("/request/_id").cloned().unwrap_or(Value::Null),
        )?;
        info!(request = %id, "stock request recorded");
        Ok(id)
    }

    /// Verified requests on the public board, sorted by date.
    pub async fn public_requests(
        &self,
        sort: SortOrder,
        page: PageRequest,
    ) -> Result<Page<StockRequest>> {
        self.get_page(
            "seller/public/requests",
            vec![("sort".to_string(), sort.to_string())],
            page,
            PUBLIC_REQUESTS,
        )
        .await
    }

    /// Verified requests matching `search`.
    pub async fn search_public_requests(
        &self,
        search: &str,
        page: PageRequest,
    ) -> Result<Page<StockRequest>> {
        self.get_page(
            format!("seller/public/requests/search/{}", segment(search)),
            Vec::new(),
            page,
            PUBLIC_REQUESTS,
        )
        .await
    }

    /// Current state of the requests with the given ids.
    pub async fn tracked_request_status(&self, ids: &[String]) -> Result<Vec<StockRequest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = ids
            .iter()
            .map(|id| ("requests[]".to_string(), id.clone()))
            .collect();
        let body = self.get("seller/public/user/requests", query).await?;
        match body.get("requestsData") {
            Some(list) if list.is_array() => Ok(serde_json::from_value(list.clone())?),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{FormField, RequestBody};
    use crate::core::forms::ImageInput;
    use crate::models::ContactMethod;
    use crate::test_utils::{MockTransport, request_json};
    use serde_json::json;
    use std::io::Write;

    fn form() -> RequestForm {
        RequestForm {
            name: "Vat Blue 1".to_string(),
            quantity: 25.0,
            contact: "9876543210".to_string(),
            contact_method: ContactMethod::Whatsapp,
            ..RequestForm::default()
        }
    }

    #[tokio::test]
    async fn test_submit_returns_new_id() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(201, json!({"request": {"_id": "r42"}}));
        let client = ApiClient::new(mock.clone());

        let id = client.submit_request(&form()).await?;
        assert_eq!(id, "r42");

        let RequestBody::Json(body) = &mock.requests()[0].body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["contactMethod"], "whatsapp");
        assert!(body.get("ci").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_with_local_image_is_multipart() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile()?;
        file.write_all(b"jpeg")?;

        let mock = MockTransport::new();
        mock.push(201, json!({"request": {"_id": "r43"}}));
        let client = ApiClient::new(mock.clone());

        let with_image = RequestForm {
            image: ImageInput::File(file.path().to_path_buf()),
            ..form()
        };
        client.submit_request(&with_image).await?;

        let RequestBody::Multipart(parts) = &mock.requests()[0].body else {
            panic!("expected multipart");
        };
        assert!(parts.contains(&FormField::text("note", "")));
        assert!(matches!(parts.last(), Some(FormField::File { mime, .. }) if mime == "image/jpeg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_id_is_an_error() {
        let mock = MockTransport::new();
        mock.push(201, json!({"message": "ok"}));
        let client = ApiClient::new(mock);

        let result = client.submit_request(&form()).await;
        assert!(matches!(result, Err(crate::errors::Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_tracked_requests_send_array_params() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"requestsData": [request_json("r1", "pending")], "count": 1}));
        let client = ApiClient::new(mock.clone());

        let ids = vec!["r1".to_string(), "r2".to_string()];
        let requests = client.tracked_request_status(&ids).await?;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            mock.requests()[0].query,
            vec![
                ("requests[]".to_string(), "r1".to_string()),
                ("requests[]".to_string(), "r2".to_string())
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_no_tracked_ids_skips_network() -> Result<()> {
        let mock = MockTransport::new();
        let client = ApiClient::new(mock.clone());

        assert!(client.tracked_request_status(&[]).await?.is_empty());
        assert!(mock.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_public_board_sort_and_search() -> Result<()> {
        let mock = MockTransport::new();
        mock.push(200, json!({"requests": [request_json("r1", "pending")], "totalBuy": 1}));
        mock.push(200, json!({"requests": [], "totalBuy": 0}));
        let client = ApiClient::new(mock.clone());

        let page = client
            .public_requests(SortOrder::Desc, PageRequest::default())
            .await?;
        client
            .search_public_requests("vat", PageRequest::default())
            .await?;

        assert_eq!(page.meta.total, 1);
        let requests = mock.requests();
        assert_eq!(requests[0].query_value("sort"), Some("desc"));
        assert_eq!(requests[1].path, "seller/public/requests/search/vat");
        Ok(())
    }
}
