#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Message;
use super::Role;
use super::Subject;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Local,
    OpenAI,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

pub struct BackendPrompt {
    pub subject_id: String,
    pub messages: Vec<PromptMessage>,
    pub credential: Option<String>,
}

impl BackendPrompt {
    /// Builds the payload for a completion. The subject's system instruction
    /// always comes first, followed by the whole conversation in order.
    pub fn new(subject: &Subject, history: &[Message], credential: Option<String>) -> BackendPrompt {
        let mut messages = vec![PromptMessage {
            role: Role::System,
            content: BackendPrompt::system_instruction(subject),
        }];

        messages.extend(history.iter().map(|message| {
            return PromptMessage {
                role: message.role(),
                content: message.content().to_string(),
            };
        }));

        return BackendPrompt {
            subject_id: subject.id.to_string(),
            messages,
            credential,
        };
    }

    pub fn system_instruction(subject: &Subject) -> String {
        let name = subject.name;
        return format!("You are Scholar Scribe, an academic assistant specializing in {name}. Give accurate, well structured answers suitable for university level study, and point to reputable sources where relevant.");
    }

    /// Text of the most recent user message, empty when there is none.
    pub fn last_user_text(&self) -> &str {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.role == Role::User)
            .map(|message| return message.content.as_str())
            .unwrap_or("");
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used when a chat starts to verify the backend is usable.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single completion and returns the assistant text. The whole
    /// reply is returned at once, nothing is streamed.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
