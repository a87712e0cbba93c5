use std::env;

const DEFAULT_PROMPT: &str = "$ ";
const DEFAULT_LOG: &str = "warn";

/// Settings for the interactive driver, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            prompt: env::var("MINISH_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string()),
            log_filter: env::var("MINISH_LOG").unwrap_or_else(|_| DEFAULT_LOG.to_string()),
        }
    }
}
