//! Gemini `generateContent` REST client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use crate::ContentGenerator;
use crate::error::AssistError;
use crate::prompt::{DEFAULT_CONTEXT_LIMIT, build_prompt};

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API client.
pub struct GeminiClient {
    agent: Agent,
    base_url: String,
    model: String,
    api_key: String,
    context_limit: usize,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::MissingApiKey`] if `api_key` is absent or blank.
    pub fn new(base_url: &str, model: &str, api_key: Option<&str>) -> Result<Self, AssistError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AssistError::MissingApiKey)?;

        Ok(Self {
            agent: build_agent(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            api_key: api_key.to_owned(),
            context_limit: DEFAULT_CONTEXT_LIMIT,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    /// Override the number of context characters sent with each request.
    #[must_use]
    pub fn with_context_limit(mut self, context_limit: usize) -> Self {
        self.context_limit = context_limit;
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send `prompt` and return the concatenated text of the first candidate.
    fn generate(&self, prompt: &str) -> Result<String, AssistError> {
        let url = self.generate_url();
        info!(model = %self.model, "Requesting content generation");

        let response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send(serde_json::to_vec(&GenerateContentRequest::new(prompt))?.as_slice())?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read response body)".to_owned());

        if status >= 400 {
            return Err(AssistError::HttpResponse { status, body });
        }

        let text = parse_response(&body)?;
        debug!(chars = text.chars().count(), "Content generation finished");
        Ok(text)
    }
}

impl ContentGenerator for GeminiClient {
    fn improve(&self, current: &str, instruction: &str) -> Result<String, AssistError> {
        let prompt = build_prompt(current, instruction, self.context_limit);
        let text = self.generate(&prompt)?;
        if text.trim().is_empty() {
            return Ok(current.to_owned());
        }
        Ok(text)
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Extract the generated text from a `generateContent` response body.
fn parse_response(body: &str) -> Result<String, AssistError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates".to_owned());
        return Err(AssistError::EmptyResponse(reason));
    };
    Ok(candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default())
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// `generateContent` response.
///
/// Only includes the fields that are read. Serde ignores the rest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
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

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_requires_api_key() {
        assert!(matches!(
            GeminiClient::new(DEFAULT_BASE_URL, DEFAULT_MODEL, None),
            Err(AssistError::MissingApiKey)
        ));
        assert!(matches!(
            GeminiClient::new(DEFAULT_BASE_URL, DEFAULT_MODEL, Some("  ")),
            Err(AssistError::MissingApiKey)
        ));
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new("https://api.example.com/v1/", "m-1", Some("k")).unwrap();
        assert_eq!(
            client.generate_url(),
            "https://api.example.com/v1/models/m-1:generateContent"
        );
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&GenerateContentRequest::new("Hi \"there\"")).unwrap();
        assert_eq!(body, r#"{"contents":[{"parts":[{"text":"Hi \"there\""}]}]}"#);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r##"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "# Title\n"}, {"text": "Body"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"##;
        assert_eq!(parse_response(body).unwrap(), "# Title\nBody");
    }

    #[test]
    fn test_parse_response_candidate_without_content() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "");
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, AssistError::EmptyResponse(ref reason) if reason == "SAFETY"));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        assert!(matches!(
            parse_response("<html>"),
            Err(AssistError::Json(_))
        ));
    }
}
