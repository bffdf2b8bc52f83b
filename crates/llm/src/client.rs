use inspira_core::{DEFAULT_CHAT_MODEL, ModelConfig};

use crate::ai_types::{GenerateRequest, GenerateResponse, GenerationConfig, Part};
use crate::error::LlmError;

/// Maximum response body length echoed into error contexts.
pub const MAX_ERROR_CONTEXT_LEN: usize = 200;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: usize = 3;
const RETRY_DELAYS: [u64; 4] = [0, 1, 2, 4];

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) temperature: Option<f32>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new client with the given API key and base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url, model: DEFAULT_CHAT_MODEL.to_owned(), temperature: None })
    }

    /// Client for a stored model configuration.
    ///
    /// # Errors
    /// Same as [`GeminiClient::new`].
    pub fn from_model_config(config: &ModelConfig) -> Result<Self, LlmError> {
        Ok(Self::new(config.api_key.clone(), config.base_url.clone())?
            .with_model(config.model.clone())
            .with_temperature(config.temperature))
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generation config seeded with this client's temperature.
    pub(crate) fn generation_config(&self) -> GenerationConfig {
        GenerationConfig { temperature: self.temperature, ..GenerationConfig::default() }
    }

    /// Send a `generateContent` request and return the first candidate's parts.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the response body cannot be parsed, or no
    /// candidate is returned.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Vec<Part>, LlmError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = RETRY_DELAYS.get(attempt).copied().unwrap_or(4);
                let delay = std::time::Duration::from_secs(delay_secs);
                tokio::time::sleep(delay).await;
                tracing::warn!(model = %self.model, attempt, max = MAX_RETRIES, ?delay, "Gemini retry");
            }

            let response_result = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(request)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(LlmError::HttpRequest(e));
                        continue;
                    },
                };

                let parsed: GenerateResponse =
                    serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                        context: format!(
                            "generateContent response (body: {})",
                            truncate(&body, MAX_ERROR_CONTEXT_LEN)
                        ),
                        source: e,
                    })?;

                let parts = parsed
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content)
                    .map(|c| c.parts)
                    .ok_or(LlmError::EmptyResponse)?;
                tracing::debug!(model = %self.model, attempt, parts = parts.len(), "Gemini reply");
                return Ok(parts);
            }

            let status_code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());

            let err = LlmError::HttpStatus { code: status_code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error.unwrap_or(LlmError::EmptyResponse))))
    }
}

/// Concatenated text of all text parts.
pub(crate) fn joined_text(parts: &[Part]) -> String {
    parts.iter().filter_map(|p| p.text.as_deref()).collect::<Vec<_>>().join("")
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
