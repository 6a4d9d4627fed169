use serde::{Deserialize, Serialize};

/// One user message for the assistant, forwarded verbatim upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Events produced while relaying an assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Token(String),
    Done,
    Error(String),
}
