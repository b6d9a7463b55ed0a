//! OpenAI-backed content analysis
//!
//! Sends page markdown to a chat-completions endpoint and records the
//! model's JSON answer. Enrichment is strictly best-effort: a missing
//! credential, a failed call, or an unusable response produces a degraded
//! record on that page, never a crawl failure.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::report::EnrichmentRecord;
use crate::{EnrichError, EnrichResult};

/// Endpoint used when no override is given.
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model requested for every analysis call.
const ENRICH_MODEL: &str = "gpt-4o";

/// Low temperature keeps the analysis consistent across pages.
const ENRICH_TEMPERATURE: f64 = 0.3;

/// Timeout for one analysis call.
const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

/// System role given to the model.
const SYSTEM_PROMPT: &str = "You are an expert SEO and content analyst.";

/// Analysis instruction used when the caller does not supply one.
pub const DEFAULT_ANALYSIS_PROMPT: &str = "Summarize this content in 3 bullet points.";

/// Pages longer than this are cut down to their leading prefix before the
/// call, keeping request sizes bounded.
const MAX_CONTENT_CHARS: usize = 8000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    response_format: ResponseFormat<'a>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Content analysis client
///
/// Holds the credential for the whole crawl, so the environment is read
/// once at startup rather than per page. The endpoint can be redirected
/// for self-hosted gateways and tests.
pub struct Enricher {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    prompt: String,
}

impl Enricher {
    /// Creates an enricher with the given credential and instruction.
    ///
    /// `api_key` may be `None`; analysis then degrades immediately
    /// without any network traffic.
    pub fn new(
        api_key: Option<String>,
        prompt: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(ANALYSIS_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            prompt: prompt.into(),
        })
    }

    /// Redirects analysis calls to a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Analyzes page content, always producing a record.
    ///
    /// Failures of any kind are logged and folded into a degraded record;
    /// the caller never has to handle an error.
    pub async fn analyze(&self, content: &str) -> EnrichmentRecord {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                warn!("AI analysis requested but no API key is configured");
                return EnrichmentRecord::degraded("No API key configured");
            }
        };

        match self.request_analysis(api_key, content).await {
            Ok(record) => record,
            Err(err) => {
                warn!("AI analysis failed: {}", err);
                EnrichmentRecord::degraded(format!("Analysis failed: {}", err))
            }
        }
    }

    async fn request_analysis(
        &self,
        api_key: &str,
        content: &str,
    ) -> EnrichResult<EnrichmentRecord> {
        let truncated = truncate_chars(content, MAX_CONTENT_CHARS);
        let user_content = format!("{}\n\n---\n\nCONTENT:\n{}", self.prompt, truncated);

        let request = ChatRequest {
            model: ENRICH_MODEL,
            temperature: ENRICH_TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let model_used = chat.model.unwrap_or_else(|| ENRICH_MODEL.to_string());
        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or(EnrichError::EmptyResponse)?;

        // The model is asked for JSON but may not comply; keep whatever
        // came back.
        let text = choice.message.content;
        let summary = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::Value::String(text));

        Ok(EnrichmentRecord {
            summary,
            model_used,
        })
    }
}

/// Cuts `content` down to its first `max_chars` characters.
fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn enricher_for(server: &MockServer, api_key: Option<&str>) -> Enricher {
        Enricher::new(api_key.map(String::from), DEFAULT_ANALYSIS_PROMPT)
            .unwrap()
            .with_base_url(server.uri())
    }

    fn chat_body(model: &str, content: &str) -> serde_json::Value {
        json!({
            "model": model,
            "choices": [{"message": {"content": content}}]
        })
    }

    #[tokio::test]
    async fn test_missing_key_degrades_without_a_request() {
        let enricher = Enricher::new(None, DEFAULT_ANALYSIS_PROMPT).unwrap();
        let record = enricher.analyze("# Page").await;

        assert_eq!(record.summary, json!("No API key configured"));
        assert_eq!(record.model_used, "N/A");
    }

    #[tokio::test]
    async fn test_parses_a_json_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
                "gpt-4o-2024-08-06",
                r#"{"summary": "A fine page"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let record = enricher_for(&server, Some("test-key")).analyze("# Page").await;

        assert_eq!(record.summary["summary"], "A fine page");
        assert_eq!(record.model_used, "gpt-4o-2024-08-06");
    }

    #[tokio::test]
    async fn test_sends_the_expected_chat_request() {
        let expected_content = format!(
            "{}\n\n---\n\nCONTENT:\n{}",
            DEFAULT_ANALYSIS_PROMPT,
            "x".repeat(MAX_CONTENT_CHARS)
        );
        let matcher = move |request: &Request| {
            let body: serde_json::Value = match serde_json::from_slice(&request.body) {
                Ok(body) => body,
                Err(_) => return false,
            };
            body["model"] == "gpt-4o"
                && body["temperature"] == json!(0.3)
                && body["response_format"]["type"] == "json_object"
                && body["messages"][0]["role"] == "system"
                && body["messages"][0]["content"] == SYSTEM_PROMPT
                && body["messages"][1]["role"] == "user"
                && body["messages"][1]["content"] == expected_content.as_str()
        };

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(matcher)
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("gpt-4o", r#"{"ok": true}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Oversized content must be cut to the leading prefix.
        let oversized = "x".repeat(MAX_CONTENT_CHARS + 2000);
        let record = enricher_for(&server, Some("test-key")).analyze(&oversized).await;

        assert_eq!(record.summary, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_service_errors_degrade() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let record = enricher_for(&server, Some("test-key")).analyze("# Page").await;

        let summary = record.summary.as_str().unwrap();
        assert!(summary.starts_with("Analysis failed:"), "got: {summary}");
        assert!(summary.contains("500"));
        assert_eq!(record.model_used, "N/A");
    }

    #[tokio::test]
    async fn test_empty_choices_degrade() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-4o",
                "choices": []
            })))
            .mount(&server)
            .await;

        let record = enricher_for(&server, Some("test-key")).analyze("# Page").await;

        assert_eq!(record.model_used, "N/A");
        assert!(record.summary.as_str().unwrap().starts_with("Analysis failed:"));
    }

    #[tokio::test]
    async fn test_non_json_answers_are_kept_as_strings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_body("gpt-4o", "Plain prose, not JSON")),
            )
            .mount(&server)
            .await;

        let record = enricher_for(&server, Some("test-key")).analyze("# Page").await;

        assert_eq!(record.summary, json!("Plain prose, not JSON"));
        assert_eq!(record.model_used, "gpt-4o");
    }

    #[test]
    fn test_truncation_respects_character_boundaries() {
        let content = "é".repeat(5);
        assert_eq!(truncate_chars(&content, 3), "ééé");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
