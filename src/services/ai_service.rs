use crate::error::{Error, Result};
use crate::models::quiz::{Difficulty, Quiz};
use crate::services::{parser_service, prompt_service};
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl AIService {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url,
            timeout,
        }
    }

    /// Run the whole generation pipeline: prompt, chat completion, parse.
    ///
    /// One outbound call per invocation, no retries. A failed parse ends
    /// the request.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Quiz> {
        let prompt = prompt_service::build_quiz_prompt(topic, difficulty, count)?;

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.4,
            "max_tokens": 3000
        });

        tracing::info!(topic, %difficulty, count, "Requesting quiz from model");
        let content = self.chat_completion(payload).await?;
        tracing::debug!(len = content.len(), "Model response received, parsing");

        let quiz = parser_service::parse_quiz(&content, topic, difficulty, count as usize)?;
        tracing::info!(questions = quiz.questions.len(), "Quiz generated");
        Ok(quiz)
    }

    /// POST an OpenAI-style chat completion and return the message content.
    async fn chat_completion(&self, payload: JsonValue) -> Result<String> {
        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Api(format!("Provider returned {}: {}", status, text)));
        }

        let body: JsonValue = res.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Api("Provider response missing message content".to_string()))
    }
}
