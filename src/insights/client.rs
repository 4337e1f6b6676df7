use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seam over the external text-generation endpoint so handlers and tests
/// never depend on the live service.
#[async_trait]
pub trait InsightClient: Send + Sync {
    /// Whether a live endpoint is configured at all.
    fn is_configured(&self) -> bool {
        true
    }

    /// Send a prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Stand-in used when no API key is configured. `generate` is never
/// expected to be reached for it.
pub struct UnconfiguredClient;

#[async_trait]
impl InsightClient for UnconfiguredClient {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("AI client not configured")
    }
}

// Wire format of the generateContent endpoint.

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint. The request blocks the
/// calling handler for at most the configured timeout.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("build http client")?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            endpoint.trim_end_matches('/'),
            model,
            api_key
        );
        Ok(Self { http, url })
    }
}

#[async_trait]
impl InsightClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .context("send generateContent request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("generateContent returned {status}");
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("decode generateContent response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .context("response contained no generated text")?;

        debug!(chars = text.len(), "generated insight text");
        Ok(text)
    }
}
