use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of one turn in a session's conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One exchange unit inside a session's history. Turns are append-only
/// and never edited or removed individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Database-agnostic view of one uploaded PDF and its conversation.
///
/// `id` and `owner` are hex renderings of the underlying ObjectIds;
/// ownership is fixed at creation and never transferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSession {
    pub id: String,
    /// Opaque identifier issued by the external provider. Not assumed
    /// unique across users; lookups always pair it with the owner.
    pub source_id: String,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub chat_history: Vec<ChatTurn>,
    pub owner: String,
}

/// Read-only projection of the auth collaborator's user entity. Only
/// `_id` and `email` are ever read; this crate never writes users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_role_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn chat_turn_serializes_camel_case() {
        let turn = ChatTurn::user("hello");
        let value = serde_json::to_value(&turn).unwrap();

        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "hello");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn constructors_set_roles() {
        assert_eq!(ChatTurn::user("a").role, TurnRole::User);
        assert_eq!(ChatTurn::assistant("b").role, TurnRole::Assistant);
    }
}
