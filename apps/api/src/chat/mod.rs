//! Career-assistant chat — a single-shot completion with a bounded
//! conversation window embedded in the prompt. No structured-JSON
//! expectation; the raw completion text goes back to the caller.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::gateway::CompletionGateway;
use crate::llm_client::GenerationOptions;

pub mod handlers;

/// Only the most recent turns are embedded; older turns are silently
/// dropped, not an error.
pub const WINDOW_TURNS: usize = 10;

const CHAT_TEMPLATE: &str = r#"You are a helpful AI career assistant. Provide professional advice about resumes, job search, career development, and interview preparation. Keep responses concise and actionable.

Conversation History:
{history}

User message: {message}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Formats the most recent `WINDOW_TURNS` turns as a prompt-embeddable
/// transcript, chronological order preserved. Empty history renders as an
/// empty string.
pub fn render_window(history: &[ChatTurn]) -> String {
    let start = history.len().saturating_sub(WINDOW_TURNS);
    history[start..]
        .iter()
        .map(|turn| match turn.role {
            ChatRole::User => format!("User: {}", turn.content),
            ChatRole::Assistant => format!("Assistant: {}", turn.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sends one chat completion. Unlike the analysis paths there is no local
/// fallback: a provider failure surfaces as `AppError::Provider`.
pub async fn chat(
    gateway: &CompletionGateway,
    message: &str,
    history: &[ChatTurn],
) -> Result<String, AppError> {
    let prompt = CHAT_TEMPLATE
        .replace("{history}", &render_window(history))
        .replace("{message}", message);

    gateway
        .complete(&prompt, &GenerationOptions::default())
        .await
        .map_err(|e| AppError::Provider(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: ChatRole, content: &str) -> ChatTurn {
        ChatTurn {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_render_empty_history_is_empty_string() {
        assert_eq!(render_window(&[]), "");
    }

    #[test]
    fn test_render_labels_roles() {
        let history = vec![
            turn(ChatRole::User, "How do I improve my resume?"),
            turn(ChatRole::Assistant, "Quantify your achievements."),
        ];
        assert_eq!(
            render_window(&history),
            "User: How do I improve my resume?\nAssistant: Quantify your achievements."
        );
    }

    #[test]
    fn test_render_keeps_only_last_ten_turns_in_order() {
        let history: Vec<ChatTurn> = (0..15)
            .map(|i| {
                let role = if i % 2 == 0 {
                    ChatRole::User
                } else {
                    ChatRole::Assistant
                };
                turn(role, &format!("turn {i}"))
            })
            .collect();

        let rendered = render_window(&history);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Assistant: turn 5");
        assert_eq!(lines[9], "User: turn 14");
        assert!(!rendered.contains("turn 4"));
    }

    #[test]
    fn test_render_exactly_ten_turns_keeps_all() {
        let history: Vec<ChatTurn> =
            (0..10).map(|i| turn(ChatRole::User, &format!("m{i}"))).collect();
        assert_eq!(render_window(&history).lines().count(), 10);
    }

    #[test]
    fn test_chat_role_deserializes_lowercase() {
        let role: ChatRole = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_chat_embeds_window_and_message() {
        use std::sync::Arc;

        use async_trait::async_trait;

        use crate::llm_client::{CompletionBackend, ProviderError};

        /// Echoes the prompt back so the test can inspect what was sent.
        struct EchoBackend;

        #[async_trait]
        impl CompletionBackend for EchoBackend {
            async fn complete(
                &self,
                prompt: &str,
                _options: &GenerationOptions,
            ) -> Result<String, ProviderError> {
                Ok(prompt.to_string())
            }
        }

        let gateway = CompletionGateway::new(Arc::new(EchoBackend));
        let history = vec![turn(ChatRole::User, "earlier question")];
        let sent = chat(&gateway, "current question", &history).await.unwrap();

        assert!(sent.contains("User: earlier question"));
        assert!(sent.contains("User message: current question"));
        assert!(sent.contains("career assistant"));
    }
}
