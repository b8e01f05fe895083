use async_trait::async_trait;
use recall_core::{ArticleAnalysisResult, Config, Error, FiveW1H, PodcastCorrectionResult, Result, TutorModel};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::prompts;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

pub struct GeminiModel {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiModel {
    /// A missing key is not fatal here; each call reports it instead.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone();
        if api_key.is_none() {
            tracing::warn!("No Gemini API key configured (set API_KEY); analysis and review calls will fail");
        }
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model_name.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate<T: DeserializeOwned>(&self, prompt: String, schema: Value) -> Result<T> {
        let api_key = self.api_key
            .as_deref()
            .ok_or_else(|| Error::Inference("Gemini API key is not configured".to_string()))?;

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        tracing::debug!("Calling {} ({})", self.model, self.endpoint());
        let response = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!("Gemini returned {}: {}", status, body)));
        }

        let response = response.json::<GenerateResponse>().await?;
        let text = response_text(response)?;
        parse_payload(&text)
    }
}

/// Concatenated text of the first candidate; no text is a hard failure.
fn response_text(response: GenerateResponse) -> Result<String> {
    let text = response.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(text)
}

fn parse_payload<T: DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .map_err(|e| Error::Inference(format!("Malformed model response: {}", e)))
}

#[async_trait]
impl TutorModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn analyze_article(&self, text: &str) -> Result<ArticleAnalysisResult> {
        self.generate(prompts::analysis_prompt(text), prompts::analysis_schema()).await
    }

    async fn review_summary(&self, topic: &str, inputs: &FiveW1H) -> Result<PodcastCorrectionResult> {
        self.generate(prompts::review_prompt(topic, inputs), prompts::review_schema()).await
    }
}
