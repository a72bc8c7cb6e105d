use anyhow::{Context, Result};

/// Secret id holding the OpenAI key in AWS Secrets Manager.
pub const DEFAULT_SECRET_ID: &str = "tailor-resume-ai-OPENAI_API_KEY";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a numeric variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local development key. When set, the secret store is never queried.
    pub openai_api_key: Option<String>,
    pub openai_secret_id: String,
    pub aws_region: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_upload_bytes: usize,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_secret_id: env_or("OPENAI_SECRET_ID", DEFAULT_SECRET_ID),
            aws_region: env_or("AWS_REGION", "us-east-1"),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "600")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Empty values count as unset, matching how the key is treated in local `.env` files.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
