use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Client;

use crate::error::{Result, StoreError};
use crate::models::{ChatTurn, DocumentSession, UserRecord};
use crate::mongo::repositories::{MongoSessionRepository, MongoUserRepository};
use crate::trait_store::{SessionStore, UserStore};

/// MongoDB-backed implementation of both store traits.
pub struct MongoStore {
    sessions: MongoSessionRepository,
    users: MongoUserRepository,
}

impl MongoStore {
    /// Connect to MongoDB and create the store.
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            sessions: MongoSessionRepository::new(&client, database),
            users: MongoUserRepository::new(&client, database),
        })
    }
}

/// Owner ids come from validated auth tokens and are expected to be
/// well-formed; a malformed one is a caller bug, not a lookup miss.
fn parse_owner(owner: &str) -> Result<ObjectId> {
    ObjectId::parse_str(owner).map_err(|e| StoreError::InvalidObjectId(e.to_string()))
}

#[async_trait]
impl SessionStore for MongoStore {
    async fn create_session(
        &self,
        owner: &str,
        source_id: &str,
        name: &str,
    ) -> Result<DocumentSession> {
        let owner = parse_owner(owner)?;
        let session = self.sessions.insert(owner, source_id, name).await?;
        tracing::debug!(session_id = %session.id, source_id, "session created");
        Ok(session.into())
    }

    async fn find_by_source(
        &self,
        owner: &str,
        source_id: &str,
    ) -> Result<Option<DocumentSession>> {
        let owner = parse_owner(owner)?;
        let session = self.sessions.find_by_source(owner, source_id).await?;
        Ok(session.map(Into::into))
    }

    async fn append_turns(
        &self,
        owner: &str,
        source_id: &str,
        turns: Vec<ChatTurn>,
    ) -> Result<bool> {
        let owner = parse_owner(owner)?;
        self.sessions.push_turns(owner, source_id, &turns).await
    }

    async fn list_sessions(&self, owner: &str) -> Result<Vec<DocumentSession>> {
        let owner = parse_owner(owner)?;
        let sessions = self.sessions.list_for_owner(owner).await?;
        Ok(sessions.into_iter().map(Into::into).collect())
    }

    async fn delete_session(&self, owner: &str, session_id: &str) -> Result<bool> {
        let owner = parse_owner(owner)?;
        // A malformed session id behaves like a missing session.
        let Ok(id) = ObjectId::parse_str(session_id) else {
            return Ok(false);
        };
        self.sessions.delete(owner, id).await
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let Ok(id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };
        let user = self.users.find_by_id(id).await?;
        Ok(user.map(Into::into))
    }
}
