use super::Message;

/// State of the one conversation a chat holds. Only the chat session
/// controller mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSession {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub selected_subject: String,
    pub conversation_id: Option<String>,
}

impl ChatSession {
    pub fn new(subject_id: &str) -> ChatSession {
        return ChatSession {
            messages: vec![],
            is_loading: false,
            selected_subject: subject_id.to_string(),
            conversation_id: None,
        };
    }
}
