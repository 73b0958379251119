//! Outbound generation request.

use serde::{Deserialize, Serialize};

use super::message::ConversationMessage;

/// Body of `POST /messages`.
///
/// Construction never fails and nothing is validated locally: an empty
/// conversation or a zero `max_tokens` is sent as-is and rejected by the API.
/// Unset optional fields are left out of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ConversationMessage>,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens,
            temperature: None,
            system: None,
        }
    }

    /// Append one message to the conversation.
    pub fn message(mut self, message: ConversationMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Append messages in order.
    pub fn messages(mut self, messages: impl IntoIterator<Item = ConversationMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the system instruction.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}
