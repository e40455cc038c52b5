use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::ChatError;
use crate::i18n::Language;
use crate::state::ChatMessage;

/// Body of `POST /api/chat`.
///
/// `history` holds the turns *before* `message`; the new message is only sent
/// once, in its own field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub language: Language,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_configured: bool,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);

        tracing::debug!(
            url = %url,
            history = request.history.len(),
            language = request.language.as_str(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(ChatError::Status(response.status()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Malformed(e.to_string()))?;
        Ok(chat_response.response)
    }

    pub async fn health(&self) -> Result<HealthStatus, ChatError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(ChatError::Status(response.status()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| ChatError::Malformed(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> ChatError {
        if error.is_timeout() {
            ChatError::Timeout(self.timeout)
        } else {
            ChatError::Transport(error)
        }
    }
}
