// Scenario runner: the five ordered exercises of the booking API (list,
// create, read, update, delete-and-confirm), chained through an explicit
// per-run context instead of thread-keyed globals.

use crate::auth::{AuthError, AuthProvider};
use crate::dispatcher::{DispatchError, Method, RequestDispatcher};
use crate::model::{AuthCredentials, BookingRecord, BookingRef, CreatedBooking};
use crate::report::Reporter;
use std::sync::Arc;
use thiserror::Error;

pub const BOOKING_PATH: &str = "/booking";

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("request failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    // Already recorded in the report by the time this is raised.
    #[error("unexpected status {actual} for {path}")]
    UnexpectedStatus { path: String, actual: u16 },

    #[error("scenario requires a created booking, but none exists yet")]
    MissingBookingId,

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response body failed expectations: {0}")]
    BodyMismatch(String),
}

// The sole state shared across scenarios: the identifier the create
// scenario obtained. Passed by value through the chain, so concurrent runs
// each own their own and cannot observe one another.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    pub booking_id: Option<i64>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_booking_id(&self) -> Result<i64, ScenarioError> {
        self.booking_id.ok_or(ScenarioError::MissingBookingId)
    }
}

pub struct ScenarioRunner {
    dispatcher: Arc<dyn RequestDispatcher>,
    auth: AuthProvider,
    reporter: Arc<Reporter>,
}

impl ScenarioRunner {
    pub fn new(
        dispatcher: Arc<dyn RequestDispatcher>,
        credentials: AuthCredentials,
        reporter: Arc<Reporter>,
    ) -> Self {
        let auth = AuthProvider::new(Arc::clone(&dispatcher), credentials);
        Self {
            dispatcher,
            auth,
            reporter,
        }
    }

    // GET over the collection; the decoded listing must be non-empty.
    pub async fn list_bookings(&self) -> Result<Vec<BookingRef>, ScenarioError> {
        let title = "Get All Bookings";
        let response = self
            .dispatcher
            .send(Method::Get, BOOKING_PATH, None, None)
            .await?;
        self.expect_status(&response, title, BOOKING_PATH, &[200])?;

        let listing: Vec<BookingRef> = response.json()?;
        if listing.is_empty() {
            let url = self.full_url(BOOKING_PATH);
            self.reporter
                .record_failure(&response, title, &url, "booking listing is empty");
            return Err(ScenarioError::BodyMismatch(
                "booking listing is empty".to_string(),
            ));
        }

        self.reporter
            .record_call(&response, title, &self.full_url(BOOKING_PATH));
        Ok(listing)
    }

    // POST the record; stores the assigned id into the context for the
    // dependent scenarios.
    pub async fn create_booking(
        &self,
        ctx: &mut ScenarioContext,
        record: &BookingRecord,
    ) -> Result<i64, ScenarioError> {
        let title = "Create Booking";
        let body = serde_json::to_value(record)?;
        let response = self
            .dispatcher
            .send(Method::Post, BOOKING_PATH, Some(&body), None)
            .await?;
        self.expect_status(&response, title, BOOKING_PATH, &[200, 201])?;

        let created: CreatedBooking = response.json()?;
        if created.booking_id <= 0 {
            let url = self.full_url(BOOKING_PATH);
            let message = format!("non-positive booking id {}", created.booking_id);
            self.reporter
                .record_failure(&response, title, &url, &message);
            return Err(ScenarioError::BodyMismatch(message));
        }

        ctx.booking_id = Some(created.booking_id);
        self.reporter
            .record_call(&response, title, &self.full_url(BOOKING_PATH));
        Ok(created.booking_id)
    }

    // GET by the stored id; checks presence and shape of every field, not
    // exact values.
    pub async fn read_booking(&self, ctx: &ScenarioContext) -> Result<BookingRecord, ScenarioError> {
        let title = "Get Booking By ID";
        let path = self.booking_path(ctx)?;
        let response = self.dispatcher.send(Method::Get, &path, None, None).await?;
        self.expect_status(&response, title, &path, &[200])?;

        let booking: BookingRecord = response.json()?;
        self.check_shape(&response, title, &path, &booking)?;

        self.reporter
            .record_call(&response, title, &self.full_url(&path));
        Ok(booking)
    }

    // Fresh token, then PUT the replacement record; the response body must
    // reflect the new values exactly.
    pub async fn update_booking(
        &self,
        ctx: &ScenarioContext,
        record: &BookingRecord,
    ) -> Result<BookingRecord, ScenarioError> {
        let title = "Update Booking";
        let path = self.booking_path(ctx)?;
        let token = self.auth.get_token().await?;

        let body = serde_json::to_value(record)?;
        let response = self
            .dispatcher
            .send(Method::Put, &path, Some(&body), Some(&token))
            .await?;
        self.expect_status(&response, title, &path, &[200])?;

        let updated: BookingRecord = response.json()?;
        if updated != *record {
            let url = self.full_url(&path);
            let message = "updated booking does not match the sent record".to_string();
            self.reporter
                .record_failure(&response, title, &url, &message);
            return Err(ScenarioError::BodyMismatch(message));
        }

        self.reporter
            .record_call(&response, title, &self.full_url(&path));
        Ok(updated)
    }

    // Fresh token, DELETE by the stored id, then confirm server-side with a
    // follow-up GET that must answer 404. Clears the context id on success.
    pub async fn delete_booking(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let title = "Delete Booking";
        let path = self.booking_path(ctx)?;
        let token = self.auth.get_token().await?;

        let response = self
            .dispatcher
            .send(Method::Delete, &path, None, Some(&token))
            .await?;
        // The service answers 201 Created on delete; 200 accepted too.
        self.expect_status(&response, title, &path, &[200, 201])?;
        self.reporter
            .record_call(&response, title, &self.full_url(&path));

        let confirm_title = "Get Booking After Deletion";
        let confirm = self.dispatcher.send(Method::Get, &path, None, None).await?;
        self.expect_status(&confirm, confirm_title, &path, &[404])?;
        self.reporter
            .record_call(&confirm, confirm_title, &self.full_url(&path));

        ctx.booking_id = None;
        Ok(())
    }

    fn booking_path(&self, ctx: &ScenarioContext) -> Result<String, ScenarioError> {
        let id = ctx.require_booking_id()?;
        Ok(format!("{BOOKING_PATH}/{id}"))
    }

    fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.dispatcher.base_url(), path)
    }

    // Records the check in the report, then aborts the scenario on mismatch.
    fn expect_status(
        &self,
        response: &crate::model::ResponseCapture,
        title: &str,
        path: &str,
        accepted: &[u16],
    ) -> Result<(), ScenarioError> {
        let url = self.full_url(path);
        if self.reporter.check_status(response, title, &url, accepted) {
            Ok(())
        } else {
            Err(ScenarioError::UnexpectedStatus {
                path: path.to_string(),
                actual: response.status,
            })
        }
    }

    fn check_shape(
        &self,
        response: &crate::model::ResponseCapture,
        title: &str,
        path: &str,
        booking: &BookingRecord,
    ) -> Result<(), ScenarioError> {
        let mut problems = Vec::new();
        if booking.first_name.is_empty() {
            problems.push("firstname is empty");
        }
        if booking.last_name.is_empty() {
            problems.push("lastname is empty");
        }
        if booking.total_price <= 0 {
            problems.push("totalprice is not positive");
        }
        if booking.additional_needs.is_none() {
            problems.push("additionalneeds is absent");
        }
        if booking.dates.check_out < booking.dates.check_in {
            problems.push("checkout precedes checkin");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let message = problems.join("; ");
            let url = self.full_url(path);
            self.reporter
                .record_failure(response, title, &url, &message);
            Err(ScenarioError::BodyMismatch(message))
        }
    }
}
