//! AI triage flow: exam summarization, prompt assembly, the inference
//! client, and lenient interpretation of the oracle's response.

pub mod client;
pub mod interpret;
pub mod prompt;
pub mod summary;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Cannot reach inference service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Inference service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse inference response: {0}")]
    ResponseParsing(String),
}
