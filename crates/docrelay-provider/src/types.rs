use serde::{Deserialize, Serialize};

/// Role of a message sent to the provider's chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub role: MessageRole,
    pub content: String,
}

impl OutboundMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Wire payload for `POST /chats/message`.
///
/// The provider keeps its own conversational context keyed by
/// `sourceId`, so `messages` always carries just the current message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub source_id: String,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: String,
}

/// Response of `POST /sources/add-file`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFileResponse {
    #[serde(default)]
    pub source_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_serializes_to_provider_wire_format() {
        let request = ChatRequest {
            source_id: "src_abc".to_string(),
            messages: vec![OutboundMessage::user("What is this PDF about?")],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "sourceId": "src_abc",
                "messages": [{ "role": "user", "content": "What is this PDF about?" }]
            })
        );
    }

    #[test]
    fn chat_reply_parses_content() {
        let reply: ChatReply = serde_json::from_str(r#"{"content":"It is a menu."}"#).unwrap();
        assert_eq!(reply.content, "It is a menu.");
    }

    #[test]
    fn add_file_response_defaults_missing_source_id() {
        let parsed: AddFileResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.source_id.is_empty());

        let parsed: AddFileResponse = serde_json::from_str(r#"{"sourceId":"src_1"}"#).unwrap();
        assert_eq!(parsed.source_id, "src_1");
    }
}
