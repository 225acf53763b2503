// End-to-end test suite for the public restful-booker demo API: a thin
// request dispatcher, an auth-token fetcher, a run-wide report ledger,
// fixed sample data, and the CRUD scenarios chained over one booking id.

pub mod auth;
pub mod config;
pub mod dispatcher;
pub mod fixtures;
pub mod model;
pub mod report;
pub mod scenarios;

#[cfg(test)]
pub mod mock_service;

// Re-export key types for convenience
pub use auth::{AuthError, AuthProvider};
pub use config::ClientConfig;
pub use dispatcher::{DispatchError, HttpDispatcher, Method, RequestDispatcher};
pub use model::{
    AuthCredentials, BookingRecord, BookingRef, CreatedBooking, ResponseCapture, StayDates,
};
pub use report::{Outcome, ReportEntry, Reporter};
pub use scenarios::{ScenarioContext, ScenarioError, ScenarioRunner};
