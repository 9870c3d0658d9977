//! Shared test utilities for `ChemStock`.
//!
//! A scripted transport standing in for the backend, an in-memory store, a
//! notifier that records what it was told, and JSON fixtures in the backend's
//! shape.

use crate::api::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::config::app::STORE_NAME;
use crate::errors::Result;
use crate::notify::{Level, Notifier};
use crate::store::Session;
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays queued responses and records every request.
///
/// An empty queue answers `500` so a test that forgot to script a call fails
/// loudly instead of hanging.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Empty transport, shared so tests can inspect it afterwards.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a response with no cookies.
    pub fn push(&self, status: u16, body: Value) {
        self.push_response(ApiResponse::new(status, body));
    }

    /// Queues a prepared response.
    pub fn push_response(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(500, json!({"message": "no scripted response"}))))
    }
}

/// Creates an in-memory `SQLite` store with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fresh session over an in-memory store and a scripted backend.
pub async fn setup_session() -> Result<(Session, Arc<MockTransport>)> {
    let db = setup_test_db().await?;
    let mock = MockTransport::new();
    let api = Arc::new(ApiClient::new(mock.clone()));
    let session = Session::open(db, api, STORE_NAME).await?;
    Ok((session, mock))
}

/// Notifier that keeps every notification for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every notification in order.
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().unwrap().clone()
    }

    /// Error messages in order.
    pub fn errors(&self) -> Vec<String> {
        self.with_level(Level::Error)
    }

    /// Success messages in order.
    pub fn successes(&self) -> Vec<String> {
        self.with_level(Level::Success)
    }

    fn with_level(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

/// A user document as the backend returns it.
pub fn user_json(id: &str, username: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "username": username,
        "email": format!("{}@example.com", username.to_lowercase()),
        "countryCode": "+91",
        "phoneNumber": "9876543210",
        "company": format!("{username} Chemicals"),
        "speciality": "reactive dyes",
        "role": role,
        "isActive": true,
        "isVerified": false
    })
}

/// A product document priced in INR.
pub fn product_json(id: &str, name: &str, price: f64) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": "Test product",
        "price": price,
        "currency": "INR",
        "stock": 50,
        "stockUnit": "kg",
        "isVisible": true,
        "isFeatured": false,
        "isVerified": false,
        "status": "active",
        "seller": {"_id": "s1", "username": "Acme", "company": "Acme Chemicals"}
    })
}

/// An order document with the given status.
pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "product": {"_id": "p1", "name": "Acid Red 88"},
        "productName": "Acid Red 88",
        "buyerName": "Kiran",
        "buyerContact": "+919876543210",
        "contactMethod": "whatsapp",
        "quantity": 2,
        "price": 120.0,
        "currency": "INR",
        "totalAmount": 240.0,
        "status": status
    })
}

/// A stock request document with the given status.
pub fn request_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": "Vat Blue 1",
        "quantity": 25,
        "stockUnit": "kg",
        "contact": "9876543210",
        "contactMethod": "whatsapp",
        "isVerified": false,
        "status": status
    })
}
