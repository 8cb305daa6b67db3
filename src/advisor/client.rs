//! Advisory service client
//!
//! `AdvisoryCapability` is the seam the session calls through; the real
//! implementation talks to Gemini over HTTP, the stub answers from a canned
//! script for tests.

use crate::config::AdvisorConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// System instruction framing the model as the product's advisor
const SYSTEM_INSTRUCTION: &str = "You are the Aikyam Bio-Advisor for the Pure Focus+ \
nootropic supplement. Answer questions about ingredients, dosing, timing and \
interactions concisely. If a question needs medical judgement, recommend a \
healthcare professional instead of answering.";

/// Failure of the advisory capability
///
/// Every variant is a recoverable, local failure: the session logs it and
/// leaves the transcript untouched. Nothing here ever propagates past the
/// session boundary.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Client cannot be used at all (missing API key)
    #[error("advisor is not configured: {0}")]
    NotConfigured(String),

    /// Network-level failure
    #[error("advisory transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Call did not settle within the configured timeout
    #[error("advisory call timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    /// Service answered with a non-success status (quota, auth, outage)
    #[error("advisory service returned status {status}")]
    Service { status: u16 },

    /// Response body did not contain reply text where expected
    #[error("malformed advisory response")]
    InvalidResponse,
}

/// The external question-answering capability
///
/// One call per accepted submission; implementations must settle (return or
/// fail) rather than hang, which the HTTP client enforces with a timeout.
#[async_trait]
pub trait AdvisoryCapability: Send + Sync {
    async fn advise(&self, query: &str) -> Result<String, AdvisorError>;
}

/// Gemini-backed advisor client
pub struct GeminiAdvisor {
    client: reqwest::Client,
    config: AdvisorConfig,
    api_key: String,
}

impl GeminiAdvisor {
    /// Build a client from config; fails fast when no API key is available
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AdvisorError::NotConfigured("missing API key".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(GeminiAdvisor {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl AdvisoryCapability for GeminiAdvisor {
    async fn advise(&self, query: &str) -> Result<String, AdvisorError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let body = serde_json::json!({
            "system_instruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": query }]
            }]
        });

        debug!(model = %self.config.model, "sending advisory request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Service {
                status: status.as_u16(),
            });
        }

        let response_json: serde_json::Value = response.json().await?;
        let reply = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(AdvisorError::InvalidResponse)?;

        Ok(reply.trim().to_string())
    }
}

/// Scripted advisor for tests: answers every query the same way, or fails
pub struct StubAdvisor {
    behavior: StubBehavior,
}

enum StubBehavior {
    Reply(String),
    Fail,
}

impl StubAdvisor {
    /// Stub that answers every query with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        StubAdvisor {
            behavior: StubBehavior::Reply(reply.into()),
        }
    }

    /// Stub that fails every query with a service error
    pub fn failing() -> Self {
        StubAdvisor {
            behavior: StubBehavior::Fail,
        }
    }
}

#[async_trait]
impl AdvisoryCapability for StubAdvisor {
    async fn advise(&self, _query: &str) -> Result<String, AdvisorError> {
        match &self.behavior {
            StubBehavior::Reply(reply) => Ok(reply.clone()),
            StubBehavior::Fail => Err(AdvisorError::Service { status: 503 }),
        }
    }
}
