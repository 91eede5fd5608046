use std::{default::Default, time::Duration};

use crate::connection::RetryConfig;

/// Contains Config properties which will be used by the Client
#[derive(Clone)]
pub struct ClientConfig {
    /// Hostname the embedding page or process identifies as; when this is a
    /// recognized local development host, API calls stay on `local_origin`
    pub page_host: String,
    /// Origin used for same-origin calls during local development
    pub local_origin: String,
    /// Fixed origin used when not running locally, reaching the API service
    /// directly instead of through the hosting proxy and its hard timeout
    pub remote_origin: String,
    /// Retry policy applied to every Game API call
    pub retry: RetryConfig,
    /// Pause between an accepted human action and the reply of an automated
    /// opponent, letting the UI settle before the next state swap
    pub human_turn_debounce: Duration,
    /// Pause between consecutive automated turns when both sides are
    /// automated
    pub automated_turn_interval: Duration,
    /// Server-side budget for re-asking a model after an illegal answer,
    /// clamped to 1..=3 when sent
    pub llm_retry_budget: u8,
    /// Model identifier assumed for a side when none is configured
    pub default_sente_model: String,
    pub default_gote_model: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_host: "localhost".to_string(),
            local_origin: "http://127.0.0.1:5000".to_string(),
            remote_origin: "https://shogi-api-5hgqbhxnha-uc.a.run.app".to_string(),
            retry: RetryConfig::default(),
            human_turn_debounce: Duration::from_millis(500),
            automated_turn_interval: Duration::from_millis(1000),
            llm_retry_budget: 2,
            default_sente_model: "gemini-2.5-pro".to_string(),
            default_gote_model: "gemini-2.5-pro".to_string(),
        }
    }
}
