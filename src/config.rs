//! Application configuration, built once at startup from the environment
//! and passed by reference to the components that need it.

use std::path::PathBuf;

pub const APP_NAME: &str = "prontuario-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default sampling temperature for triage requests.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Runtime configuration.
///
/// Everything is optional in the environment; absent variables fall back
/// to local-development defaults. `AI_TEMPERATURE` additionally falls back
/// to [`DEFAULT_TEMPERATURE`] on non-numeric input instead of failing.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the inference service (Ollama-compatible).
    pub ai_host: String,
    /// Model identifier sent with every inference request.
    pub ai_model: String,
    /// Optional bearer credential forwarded to the inference service.
    pub ai_api_key: Option<String>,
    /// Sampling temperature for inference requests.
    pub ai_temperature: f64,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Directory where uploaded exam files are stored.
    pub uploads_dir: PathBuf,
    /// Directory served for paths outside the API prefixes.
    pub static_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let ai_host = env_or("AI_HOST", "http://localhost:11434");
        let ai_model = env_or("AI_MODEL", "llama3");
        let ai_api_key = std::env::var("AI_API_KEY").ok().filter(|k| !k.is_empty());
        let ai_temperature = parse_temperature(std::env::var("AI_TEMPERATURE").ok().as_deref());

        Self {
            ai_host: ai_host.trim_end_matches('/').to_string(),
            ai_model,
            ai_api_key,
            ai_temperature,
            database_path: PathBuf::from(env_or("DATABASE_PATH", "prontuarios.db")),
            uploads_dir: PathBuf::from(env_or("UPLOADS_DIR", "uploads")),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "public")),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn default_log_filter() -> &'static str {
        "info,prontuario_api=debug"
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Parse the sampling temperature, falling back to the default on
/// absent or non-numeric input.
fn parse_temperature(raw: Option<&str>) -> f64 {
    match raw {
        Some(s) => match s.trim().parse::<f64>() {
            Ok(t) => t,
            Err(_) => {
                tracing::warn!(value = s, "AI_TEMPERATURE is not numeric; using default");
                DEFAULT_TEMPERATURE
            }
        },
        None => DEFAULT_TEMPERATURE,
    }
}
