// In-memory stand-in for the booking service, so scenario logic is
// exercisable without the network. Reproduces the live service's quirks:
// DELETE answers 201 Created, missing/unknown tokens answer 403 Forbidden
// with a plain-text body, and bad auth credentials answer 200 with a
// {"reason": ...} body rather than an error status.

use crate::dispatcher::{DispatchError, Method, RequestDispatcher};
use crate::model::{AuthCredentials, BookingRecord, ResponseCapture};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MockBookerService {
    credentials: AuthCredentials,
    bookings: Mutex<HashMap<i64, BookingRecord>>,
    issued_tokens: Mutex<HashSet<String>>,
    next_id: AtomicI64,
    token_counter: AtomicI64,
}

impl MockBookerService {
    pub fn new() -> Self {
        Self::with_credentials(AuthCredentials::new("admin", "password123"))
    }

    pub fn with_credentials(credentials: AuthCredentials) -> Self {
        Self {
            credentials,
            bookings: Mutex::new(HashMap::new()),
            issued_tokens: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
            token_counter: AtomicI64::new(0),
        }
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().len()
    }

    fn handle_auth(&self, body: Option<&Value>) -> ResponseCapture {
        let presented = body.and_then(|b| {
            serde_json::from_value::<AuthCredentials>(b.clone()).ok()
        });
        match presented {
            Some(creds) if creds == self.credentials => {
                let serial = self.token_counter.fetch_add(1, Ordering::SeqCst);
                let token = format!("mocktoken{serial:08}");
                self.issued_tokens.lock().insert(token.clone());
                json_response(200, json!({ "token": token }))
            }
            // The live service does not use an error status here.
            _ => json_response(200, json!({ "reason": "Bad credentials" })),
        }
    }

    fn authorized(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.issued_tokens.lock().contains(t))
    }

    fn handle_create(&self, body: Option<&Value>) -> ResponseCapture {
        let Some(record) = decode_booking(body) else {
            return text_response(400, "Bad Request");
        };
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let echo = serde_json::to_value(&record).unwrap_or(Value::Null);
        self.bookings.lock().insert(id, record);
        json_response(200, json!({ "bookingid": id, "booking": echo }))
    }

    fn handle_list(&self) -> ResponseCapture {
        let refs: Vec<Value> = self
            .bookings
            .lock()
            .keys()
            .map(|id| json!({ "bookingid": id }))
            .collect();
        json_response(200, Value::Array(refs))
    }

    fn handle_read(&self, id: i64) -> ResponseCapture {
        match self.bookings.lock().get(&id) {
            Some(record) => {
                json_response(200, serde_json::to_value(record).unwrap_or(Value::Null))
            }
            None => text_response(404, "Not Found"),
        }
    }

    fn handle_update(&self, id: i64, body: Option<&Value>, token: Option<&str>) -> ResponseCapture {
        if !self.authorized(token) {
            return text_response(403, "Forbidden");
        }
        let Some(record) = decode_booking(body) else {
            return text_response(400, "Bad Request");
        };
        let mut bookings = self.bookings.lock();
        if !bookings.contains_key(&id) {
            return text_response(404, "Not Found");
        }
        let echo = serde_json::to_value(&record).unwrap_or(Value::Null);
        bookings.insert(id, record);
        json_response(200, echo)
    }

    fn handle_delete(&self, id: i64, token: Option<&str>) -> ResponseCapture {
        if !self.authorized(token) {
            return text_response(403, "Forbidden");
        }
        if self.bookings.lock().remove(&id).is_some() {
            // Quirk of the live service: delete answers 201 Created.
            text_response(201, "Created")
        } else {
            text_response(404, "Not Found")
        }
    }
}

impl Default for MockBookerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestDispatcher for MockBookerService {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<ResponseCapture, DispatchError> {
        let response = match (method, path) {
            (Method::Post, "/auth") => self.handle_auth(body),
            (Method::Get, "/booking") => self.handle_list(),
            (Method::Post, "/booking") => self.handle_create(body),
            _ => match path.strip_prefix("/booking/").map(str::parse::<i64>) {
                Some(Ok(id)) => match method {
                    Method::Get => self.handle_read(id),
                    Method::Put => self.handle_update(id, body, token),
                    Method::Delete => self.handle_delete(id, token),
                    Method::Post => text_response(404, "Not Found"),
                },
                _ => text_response(404, "Not Found"),
            },
        };

        tracing::debug!(
            method = %method,
            path,
            status = response.status,
            "mock service handled request"
        );
        Ok(response)
    }

    fn base_url(&self) -> &str {
        "mock://booker"
    }
}

fn decode_booking(body: Option<&Value>) -> Option<BookingRecord> {
    body.and_then(|b| serde_json::from_value(b.clone()).ok())
}

fn json_response(status: u16, value: Value) -> ResponseCapture {
    ResponseCapture {
        status,
        content_type: Some("application/json; charset=utf-8".to_string()),
        body: value.to_string(),
    }
}

fn text_response(status: u16, body: &str) -> ResponseCapture {
    ResponseCapture {
        status,
        content_type: Some("text/plain".to_string()),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn delete_requires_a_token_and_answers_201() {
        let mock = MockBookerService::new();
        let body = serde_json::to_value(fixtures::sample_booking()).unwrap();
        let created = mock
            .send(Method::Post, "/booking", Some(&body), None)
            .await
            .unwrap();
        assert_eq!(created.status, 200);

        let unauthorized = mock
            .send(Method::Delete, "/booking/1", None, None)
            .await
            .unwrap();
        assert_eq!(unauthorized.status, 403);
        assert_eq!(unauthorized.body, "Forbidden");

        let auth_body = serde_json::json!({ "username": "admin", "password": "password123" });
        let auth = mock
            .send(Method::Post, "/auth", Some(&auth_body), None)
            .await
            .unwrap();
        let token: serde_json::Value = auth.json().unwrap();
        let token = token["token"].as_str().unwrap().to_string();

        let deleted = mock
            .send(Method::Delete, "/booking/1", None, Some(&token))
            .await
            .unwrap();
        assert_eq!(deleted.status, 201);
        assert_eq!(mock.booking_count(), 0);
    }

    #[tokio::test]
    async fn unknown_paths_and_ids_answer_404() {
        let mock = MockBookerService::new();
        let missing = mock
            .send(Method::Get, "/booking/999", None, None)
            .await
            .unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, "Not Found");

        let bogus = mock.send(Method::Get, "/ping", None, None).await.unwrap();
        assert_eq!(bogus.status, 404);

        let non_numeric = mock
            .send(Method::Get, "/booking/abc", None, None)
            .await
            .unwrap();
        assert_eq!(non_numeric.status, 404);
    }
}
