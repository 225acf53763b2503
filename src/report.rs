// Result logger/reporter: an append-only ledger of per-call outcomes,
// rendered to a single HTML artifact once at the end of the run.

use crate::model::ResponseCapture;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    // Informational call capture, no verdict attached.
    Info,
    Pass,
    Fail,
}

impl Outcome {
    fn css_class(&self) -> &'static str {
        match self {
            Outcome::Info => "info",
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Outcome::Info => "INFO",
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub title: String,
    pub url: String,
    pub status: u16,
    pub body_rendering: String,
    pub outcome: Outcome,
}

// Shared across scenario threads; the mutex serializes appends so entries
// are never interleaved or lost.
pub struct Reporter {
    entries: Mutex<Vec<ReportEntry>>,
    report_path: PathBuf,
    flushed: AtomicBool,
}

impl Reporter {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            report_path: report_path.into(),
            flushed: AtomicBool::new(false),
        }
    }

    // Captures one call verbatim: URL, status and the (pretty-printed when
    // JSON) response body.
    pub fn record_call(&self, response: &ResponseCapture, title: &str, url: &str) {
        self.append(ReportEntry {
            title: title.to_string(),
            url: url.to_string(),
            status: response.status,
            body_rendering: response.pretty_body(),
            outcome: Outcome::Info,
        });
    }

    // Records a scenario-level failure that is not a status mismatch, e.g.
    // a response body that decoded but failed its shape checks.
    pub fn record_failure(&self, response: &ResponseCapture, title: &str, url: &str, message: &str) {
        self.append(ReportEntry {
            title: title.to_string(),
            url: url.to_string(),
            status: response.status,
            body_rendering: format!("{message}\n\n{}", response.pretty_body()),
            outcome: Outcome::Fail,
        });
    }

    // True iff the actual status is in the accepted set. Appends exactly one
    // entry either way: a pass line on match, the full body on mismatch.
    pub fn check_status(
        &self,
        response: &ResponseCapture,
        title: &str,
        url: &str,
        accepted: &[u16],
    ) -> bool {
        let matched = accepted.contains(&response.status);
        let entry = if matched {
            ReportEntry {
                title: title.to_string(),
                url: url.to_string(),
                status: response.status,
                body_rendering: format!("Status code {} is as expected.", response.status),
                outcome: Outcome::Pass,
            }
        } else {
            ReportEntry {
                title: title.to_string(),
                url: url.to_string(),
                status: response.status,
                body_rendering: format!(
                    "Unexpected status code. Expected one of {:?}, actual {}.\n\n{}",
                    accepted,
                    response.status,
                    response.pretty_body()
                ),
                outcome: Outcome::Fail,
            }
        };
        self.append(entry);
        matched
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.entries.lock().clone()
    }

    pub fn path(&self) -> &Path {
        &self.report_path
    }

    // Renders the ledger to the configured path. One-shot: the first call
    // writes the artifact, later calls are no-ops.
    pub fn flush(&self) -> Result<(), ReportError> {
        if self.flushed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let entries = self.entries.lock();
        let html = render_html(&entries);

        if let Some(parent) = self.report_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                    path: self.report_path.clone(),
                    source,
                })?;
            }
        }
        std::fs::write(&self.report_path, html).map_err(|source| ReportError::Io {
            path: self.report_path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.report_path.display(),
            entries = entries.len(),
            "report flushed"
        );
        Ok(())
    }

    fn append(&self, entry: ReportEntry) {
        self.entries.lock().push(entry);
    }
}

fn render_html(entries: &[ReportEntry]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>booker-suite report</title>\n<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         .entry { border: 1px solid #ccc; border-radius: 4px; padding: 1em; margin-bottom: 1em; }\n\
         .pass { border-left: 6px solid #2e7d32; }\n\
         .fail { border-left: 6px solid #c62828; }\n\
         .info { border-left: 6px solid #1565c0; }\n\
         pre { background: #f5f5f5; padding: 0.5em; overflow-x: auto; }\n\
         </style>\n</head>\n<body>\n<h1>booker-suite report</h1>\n",
    );

    for entry in entries {
        html.push_str(&format!(
            "<div class=\"entry {}\">\n<h2>[{}] {}</h2>\n\
             <p><b>Request URL:</b> {}</p>\n<p><b>Status:</b> {}</p>\n<pre>{}</pre>\n</div>\n",
            entry.outcome.css_class(),
            entry.outcome.label(),
            escape_html(&entry.title),
            escape_html(&entry.url),
            entry.status,
            escape_html(&entry.body_rendering),
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
