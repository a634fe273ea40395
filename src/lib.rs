pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::ai_service::AIService;
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub ai_service: AIService,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();

        let ai_service = AIService::new(
            config.groq_api_key.clone(),
            config.groq_model.clone(),
            config.groq_api_base.clone(),
            timeout,
            http_client,
        );

        Self { ai_service }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
