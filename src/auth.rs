// Auth provider: trades fixed credentials for a short-lived token via
// POST /auth. Tokens are fetched fresh per scenario, never cached.

use crate::dispatcher::{DispatchError, Method, RequestDispatcher};
use crate::model::{AuthCredentials, AuthResponse};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

pub const AUTH_PATH: &str = "/auth";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("auth endpoint answered {status}, expected 200: {body}")]
    UnexpectedStatus { status: u16, body: String },

    // Covers the service's bad-credentials shape ({"reason": ...}) and any
    // other body without a token field.
    #[error("auth response carried no token: {0}")]
    MalformedResponse(String),
}

pub struct AuthProvider {
    dispatcher: Arc<dyn RequestDispatcher>,
    credentials: AuthCredentials,
}

impl AuthProvider {
    pub fn new(dispatcher: Arc<dyn RequestDispatcher>, credentials: AuthCredentials) -> Self {
        Self {
            dispatcher,
            credentials,
        }
    }

    pub async fn get_token(&self) -> Result<String, AuthError> {
        let body = json!({
            "username": self.credentials.username,
            "password": self.credentials.password,
        });
        let response = self
            .dispatcher
            .send(Method::Post, AUTH_PATH, Some(&body), None)
            .await?;

        if response.status != 200 {
            return Err(AuthError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: AuthResponse = response
            .json()
            .map_err(|_| AuthError::MalformedResponse(response.body.clone()))?;
        if parsed.token.is_empty() {
            return Err(AuthError::MalformedResponse(response.body));
        }

        tracing::debug!("obtained auth token");
        Ok(parsed.token)
    }
}
