//! Gemini client for text generation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{CATEGORIZE_FALLBACK, DESCRIBE_FALLBACK, DESCRIBE_UNAVAILABLE, Enrichment};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base address, e.g. `"https://generativelanguage.googleapis.com"`.
    pub addr: String,

    /// API key. An empty key disables generation entirely.
    pub api_key: String,

    /// Model name to generate with.
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            addr: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
        }
    }
}

/// HTTP client for Gemini `generateContent` calls.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create a client keyed from the `GEMINI_API_KEY` environment
    /// variable; an unset variable leaves generation disabled.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            ..GeminiConfig::default()
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.addr, self.config.model, self.config.api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GeminiError::UnexpectedResponse(format!(
                "generateContent failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GeminiError::UnexpectedResponse("empty candidate list".to_string()))
    }
}

#[async_trait]
impl Enrichment for GeminiClient {
    async fn describe(&self, product_name: &str, price: u64) -> String {
        if self.config.api_key.is_empty() {
            return DESCRIBE_UNAVAILABLE.to_string();
        }

        let price = format_minor(price);
        let prompt = format!(
            "Write a short, catchy, short-video-style sales description \
             (max 15 words) for a product named \"{product_name}\" that \
             costs ${price}. Use emojis."
        );

        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(%error, "description generation failed; using fallback");
                DESCRIBE_FALLBACK.to_string()
            }
        }
    }

    async fn categorize(&self, text: &str) -> String {
        if self.config.api_key.is_empty() {
            return CATEGORIZE_FALLBACK.to_string();
        }

        let prompt = format!(
            "Categorize this video content into a single category word \
             (e.g., Fashion, Tech, Beauty, Food, Comedy) based on this \
             description: \"{text}\". Return only the word."
        );

        match self.generate(&prompt).await {
            Ok(word) => word,
            Err(error) => {
                tracing::warn!(%error, "categorization failed; using fallback");
                CATEGORIZE_FALLBACK.to_string()
            }
        }
    }
}

fn format_minor(minor: u64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Errors that can occur when communicating with Gemini.
#[derive(Debug, Error)]
enum GeminiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini returned a non-2xx response or unexpected body.
    #[error("unexpected response from Gemini: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_degrades_without_a_network_call() {
        let client = GeminiClient::new(GeminiConfig::default());

        assert_eq!(
            client.describe("Speedster X", 12_999).await,
            DESCRIBE_UNAVAILABLE
        );
        assert_eq!(client.categorize("running shoes").await, CATEGORIZE_FALLBACK);
    }

    #[tokio::test]
    async fn unreachable_server_degrades_to_fallbacks() {
        let client = GeminiClient::new(GeminiConfig {
            // Discard port on localhost: connection is refused immediately.
            addr: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            ..GeminiConfig::default()
        });

        assert_eq!(
            client.describe("Speedster X", 12_999).await,
            DESCRIBE_FALLBACK
        );
        assert_eq!(client.categorize("running shoes").await, CATEGORIZE_FALLBACK);
    }

    #[test]
    fn format_minor_renders_two_decimal_places() {
        assert_eq!(format_minor(12_999), "129.99");
        assert_eq!(format_minor(50), "0.50");
        assert_eq!(format_minor(500), "5.00");
    }

    #[test]
    fn response_shape_parses() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "  Fire sneakers! 🔥  " } ] } }
            ]
        }"#;

        let parsed: GenerateResponse =
            serde_json::from_str(raw).expect("response should parse");

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string());

        assert_eq!(text.as_deref(), Some("Fire sneakers! 🔥"));
    }
}
