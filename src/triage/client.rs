//! HTTP client for the remote inference service (Ollama-compatible
//! `/api/generate`), behind a trait so handlers can be tested with a mock.

use serde::{Deserialize, Serialize};

use super::TriageError;
use crate::config::AppConfig;

/// A text-completion oracle. One synchronous round-trip per call; no
/// retries, no request-level timeout.
pub trait LlmClient: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, TriageError>;
    fn model(&self) -> &str;
    fn host(&self) -> &str;
}

/// Inference client backed by a blocking reqwest client.
pub struct HttpInferenceClient {
    host: String,
    model: String,
    temperature: f64,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpInferenceClient {
    /// Build from the startup configuration. A hung oracle stalls only
    /// the requesting connection, so no timeout is configured.
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            host: config.ai_host.trim_end_matches('/').to_string(),
            model: config.ai_model.clone(),
            temperature: config.ai_temperature,
            api_key: config.ai_api_key.clone(),
            client,
        }
    }
}

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    /// Ask the oracle to constrain its own output to JSON.
    format: &'a str,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
}

/// Response body from `/api/generate`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient for HttpInferenceClient {
    fn generate(&self, prompt: &str) -> Result<String, TriageError> {
        let url = format!("{}/api/generate", self.host);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                TriageError::Connection(self.host.clone())
            } else {
                TriageError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TriageError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| TriageError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Mock oracle for tests: configurable response or failure, a call
/// counter so tests can assert the oracle was never contacted, and the
/// last prompt seen.
pub struct MockLlmClient {
    response: Result<String, (u16, String)>,
    calls: std::sync::atomic::AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Err((status, body.to_string())),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("mock lock").clone()
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, prompt: &str) -> Result<String, TriageError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_prompt.lock().expect("mock lock") = Some(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => Err(TriageError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn host(&self) -> &str {
        "http://mock"
    }
}
