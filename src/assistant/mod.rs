use crate::catalog::Product;
use crate::config::Config;
use crate::event::AppEvent;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use thiserror::Error;
use tokio::runtime::Handle;

pub mod gate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ErrorEnvelope>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("could not reach the assistant: {0}")]
    Network(String),
    #[error("assistant returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected assistant reply: {0}")]
    MalformedReply(String),
}

impl AssistantError {
    fn from_http_status(status: reqwest::StatusCode, body: &str) -> Self {
        // Error bodies usually carry an {error: {message}} envelope; fall back
        // to the raw body when they do not.
        let message = serde_json::from_str::<ChatResponse>(body)
            .ok()
            .and_then(|payload| payload.error)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }
}

fn extract_reply(response: ChatResponse) -> Result<String, AssistantError> {
    if let Some(envelope) = response.error {
        return Err(AssistantError::MalformedReply(envelope.message));
    }
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AssistantError::MalformedReply("response carried no choices".to_string()))
}

fn selection_summary(selection: &[Product]) -> String {
    selection
        .iter()
        .map(|product| format!("- {} by {} ({})", product.name, product.brand, product.category))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn system_preamble(selection: &[Product]) -> ChatMessage {
    let mut content = String::from(
        "You are a friendly beauty advisor. Build personalized routines from the \
user's selected products and answer follow-up questions about skincare, haircare, \
makeup, and fragrance. Keep answers practical and concise, and only discuss beauty \
topics.",
    );
    if !selection.is_empty() {
        content.push_str("\n\nCurrently selected products:\n");
        content.push_str(&selection_summary(selection));
    }
    ChatMessage::system(content)
}

pub fn routine_prompt(selection: &[Product]) -> String {
    format!(
        "Create a step-by-step routine using these products:\n{}",
        selection_summary(selection)
    )
}

/// Thin client for the chat-completion endpoint. Requests run on the tokio
/// runtime handle; outcomes come back to the UI thread as app events.
#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl AssistantClient {
    pub fn new(config: &Config, tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let runtime_handle = Handle::try_current().context("tokio runtime unavailable")?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            tx,
            runtime_handle,
        })
    }

    pub fn send(&self, messages: Vec<ChatMessage>) {
        let client = self.clone();
        self.runtime_handle.spawn(async move {
            tracing::debug!(messages = messages.len(), "sending assistant request");
            let event = match client.complete(&messages).await {
                Ok(reply) => AppEvent::AssistantReply(reply),
                Err(err) => {
                    tracing::warn!(error = %err, "assistant request failed");
                    AppEvent::AssistantFailed(err.to_string())
                }
            };
            let _ = client.tx.send(event);
        });
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AssistantError> {
        let mut request = self.http.post(&self.endpoint).json(&ChatRequest { messages });
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| AssistantError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::from_http_status(status, &body));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| AssistantError::MalformedReply(err.to_string()))?;
        extract_reply(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        extract_reply, routine_prompt, system_preamble, AssistantError, ChatResponse,
    };
    use crate::catalog::Product;

    fn product(name: &str, brand: &str, category: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            image: "img/1.png".to_string(),
            description: None,
        }
    }

    fn parse(body: &str) -> ChatResponse {
        serde_json::from_str(body).expect("response fixture should parse")
    }

    #[test]
    fn extract_reply_reads_first_choice_content() {
        let response = parse(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Start with the cleanser."}}]}"#,
        );
        let reply = extract_reply(response).expect("well-formed payload should yield a reply");
        assert_eq!(reply, "Start with the cleanser.");
    }

    #[test]
    fn extract_reply_fails_on_empty_choices() {
        let response = parse(r#"{"choices": []}"#);
        let error = extract_reply(response).expect_err("empty choices should fail");
        assert!(matches!(error, AssistantError::MalformedReply(_)));
    }

    #[test]
    fn extract_reply_surfaces_error_envelope() {
        let response = parse(r#"{"error": {"message": "model overloaded"}}"#);
        let error = extract_reply(response).expect_err("error envelope should fail");
        assert!(error.to_string().contains("model overloaded"));
    }

    #[test]
    fn http_error_prefers_envelope_message() {
        let error = AssistantError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": {"message": "upstream timeout"}}"#,
        );
        match error {
            AssistantError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream timeout");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn http_error_falls_back_to_raw_body() {
        let error =
            AssistantError::from_http_status(reqwest::StatusCode::BAD_GATEWAY, "bad gateway\n");
        match error {
            AssistantError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn system_preamble_summarizes_selection() {
        let selection = vec![product("Hydrating Cleanser", "CeraVe", "skincare")];
        let preamble = system_preamble(&selection);
        assert_eq!(preamble.role, "system");
        assert!(preamble.content.contains("Hydrating Cleanser by CeraVe (skincare)"));
    }

    #[test]
    fn routine_prompt_lists_every_product() {
        let selection = vec![
            product("Hydrating Cleanser", "CeraVe", "skincare"),
            product("Revitalift Serum", "L'Oréal Paris", "skincare"),
        ];
        let prompt = routine_prompt(&selection);
        assert!(prompt.contains("Hydrating Cleanser"));
        assert!(prompt.contains("Revitalift Serum"));
    }
}
