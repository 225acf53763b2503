// Client configuration for a suite run.

use crate::model::AuthCredentials;
use std::path::PathBuf;
use std::time::Duration;

// The public demo deployment of restful-booker.
pub const DEFAULT_BASE_URL: &str = "https://restful-booker.herokuapp.com";

// Where the run's report artifact lands, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "test-output/report.html";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub credentials: AuthCredentials,
    pub report_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            credentials: AuthCredentials::from_env(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}
