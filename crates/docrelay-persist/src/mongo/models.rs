use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChatTurn, DocumentSession, UserRecord};

/// MongoDB document for one uploaded PDF (collection `pdfs`).
///
/// Field names stay camelCase on the wire; the owner is stored under
/// `user` as in the original deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoSession {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub source_id: String,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
    #[serde(rename = "user")]
    pub owner: ObjectId,
}

/// Read-only projection of a `users` document. Everything else in the
/// document (password hash included) is never deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub email: String,
}

impl From<MongoSession> for DocumentSession {
    fn from(session: MongoSession) -> Self {
        Self {
            id: session.id.to_hex(),
            source_id: session.source_id,
            name: session.name,
            uploaded_at: session.uploaded_at,
            chat_history: session.chat_history,
            owner: session.owner.to_hex(),
        }
    }
}

impl From<MongoUser> for UserRecord {
    fn from(user: MongoUser) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
        }
    }
}
