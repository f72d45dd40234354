#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::CredentialStore;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatSession;
use crate::domain::models::Message;
use crate::domain::models::Notification;
use crate::domain::models::Role;
use crate::domain::models::SubjectCatalog;
use crate::domain::models::DEFAULT_SUBJECT;

pub const CONNECTION_ERROR: &str =
    "There was a problem connecting to the AI service. Please check your API key and try again.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened.
    Ignored,
    /// Another request is still in flight, nothing happened.
    Busy,
    Replied,
    Failed,
}

pub struct ChatSessionController {
    backend: BackendBox,
    credentials: CredentialStore,
    state: Mutex<ChatSession>,
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChatSessionController {
    pub fn new(
        backend: BackendBox,
        credentials: CredentialStore,
        subject_id: &str,
        tx: mpsc::UnboundedSender<Notification>,
    ) -> ChatSessionController {
        let mut subject = subject_id;
        if !SubjectCatalog::contains(subject) {
            tracing::warn!(subject = subject_id, "Unknown subject, using default");
            subject = DEFAULT_SUBJECT;
        }

        return ChatSessionController {
            backend,
            credentials,
            state: Mutex::new(ChatSession::new(subject)),
            tx,
        };
    }

    pub fn create_conversation_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }

    /// Verifies the backend can serve requests. Failures are reported as a
    /// notification, the chat stays usable.
    pub async fn check_backend(&self) -> Result<bool> {
        if let Err(err) = self.backend.health_check().await {
            tracing::error!(err = ?err, backend = %self.backend.name(), "Backend health check failed");
            self.tx.send(Notification::error(
                "Error",
                &format!("The {} backend is not ready: {err}", self.backend.name()),
            ))?;
            return Ok(false);
        }

        return Ok(true);
    }

    /// Sends a user message and waits for the reply. The user message is part
    /// of the history before the backend is contacted, and stays there if the
    /// request fails. Only one request may be in flight, extra sends are
    /// rejected with `SendOutcome::Busy`.
    pub async fn send_message(&self, content: &str) -> Result<SendOutcome> {
        if content.trim().is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let history: Vec<Message>;
        let subject_id: String;
        {
            let mut state = self.state.lock().await;
            if state.is_loading {
                tracing::warn!("Message rejected while a request is in flight");
                return Ok(SendOutcome::Busy);
            }

            state.messages.push(Message::new(Role::User, content));
            state.is_loading = true;
            if state.conversation_id.is_none() {
                state.conversation_id = Some(ChatSessionController::create_conversation_id());
            }

            history = state.messages.clone();
            subject_id = state.selected_subject.to_string();
        }

        let res = self.request_completion(&subject_id, &history).await;

        let mut state = self.state.lock().await;
        state.is_loading = false;

        match res {
            Ok(text) => {
                state.messages.push(Message::new(Role::Assistant, &text));
                return Ok(SendOutcome::Replied);
            }
            Err(err) => {
                drop(state);
                tracing::error!(err = ?err, backend = %self.backend.name(), "Completion request failed");
                self.tx.send(Notification::error("Error", CONNECTION_ERROR))?;
                return Ok(SendOutcome::Failed);
            }
        }
    }

    async fn request_completion(&self, subject_id: &str, history: &[Message]) -> Result<String> {
        let subject = match SubjectCatalog::lookup(subject_id) {
            Some(subject) => subject,
            None => bail!(format!("No subject found for id {subject_id}")),
        };

        let credential = self.credentials.read().await?;
        let prompt = BackendPrompt::new(subject, history, credential);
        tracing::debug!(
            subject = subject_id,
            messages = prompt.messages.len(),
            "Requesting completion"
        );

        return self.backend.get_completion(prompt).await;
    }

    /// Returns whether the subject changed. Unknown ids are ignored.
    pub async fn change_subject(&self, subject_id: &str) -> bool {
        if !SubjectCatalog::contains(subject_id) {
            return false;
        }

        self.state.lock().await.selected_subject = subject_id.to_string();
        return true;
    }

    pub async fn clear_chat(&self) {
        let mut state = self.state.lock().await;
        state.messages.clear();
        state.conversation_id = None;
    }

    pub async fn messages(&self) -> Vec<Message> {
        return self.state.lock().await.messages.clone();
    }

    pub async fn is_loading(&self) -> bool {
        return self.state.lock().await.is_loading;
    }

    pub async fn selected_subject(&self) -> String {
        return self.state.lock().await.selected_subject.to_string();
    }

    pub async fn conversation_id(&self) -> Option<String> {
        return self.state.lock().await.conversation_id.clone();
    }

    pub async fn snapshot(&self) -> ChatSession {
        return self.state.lock().await.clone();
    }
}
