// Wire data model for the restful-booker service.
// Field names are serde-renamed to the service's lowercase wire keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One booking record as sent to and returned by the service. No identity
// until the service assigns one on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "firstname")]
    pub first_name: String,

    #[serde(rename = "lastname")]
    pub last_name: String,

    #[serde(rename = "totalprice")]
    pub total_price: i64,

    #[serde(rename = "depositpaid")]
    pub deposit_paid: bool,

    #[serde(rename = "bookingdates")]
    pub dates: StayDates,

    #[serde(
        rename = "additionalneeds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_needs: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    #[serde(rename = "checkin")]
    pub check_in: NaiveDate,

    #[serde(rename = "checkout")]
    pub check_out: NaiveDate,
}

// POST /booking response: the assigned id plus an echo of the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBooking {
    #[serde(rename = "bookingid")]
    pub booking_id: i64,
    pub booking: BookingRecord,
}

// One element of the GET /booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BookingRef {
    #[serde(rename = "bookingid")]
    pub booking_id: i64,
}

// Credentials for POST /auth. Always injected by the caller, never embedded
// in the auth provider itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub username: String,
    pub password: String,
}

impl AuthCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    // Resolved once at startup. The fallback is the public demo service's
    // published account; a real deployment points these variables at a
    // secret store instead.
    pub fn from_env() -> Self {
        let username =
            std::env::var("BOOKER_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password =
            std::env::var("BOOKER_PASSWORD").unwrap_or_else(|_| "password123".to_string());
        Self { username, password }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

// What one HTTP exchange produced, detached from the client that made it.
#[derive(Debug, Clone)]
pub struct ResponseCapture {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ResponseCapture {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    // Indented rendering for JSON bodies, raw text for everything else.
    pub fn pretty_body(&self) -> String {
        if self.is_json() {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.body) {
                if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                    return pretty;
                }
            }
        }
        self.body.clone()
    }
}
