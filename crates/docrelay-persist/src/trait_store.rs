use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChatTurn, DocumentSession, UserRecord};

/// Trait for session persistence operations.
///
/// Every operation is scoped by the owning user; a session is never
/// visible to or mutable by a non-owner, and callers cannot tell a
/// foreign session apart from a missing one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session with an empty history.
    async fn create_session(
        &self,
        owner: &str,
        source_id: &str,
        name: &str,
    ) -> Result<DocumentSession>;

    /// Look a session up by `(source_id, owner)`.
    async fn find_by_source(
        &self,
        owner: &str,
        source_id: &str,
    ) -> Result<Option<DocumentSession>>;

    /// Append turns to a session's history in one atomic update, so a
    /// user turn is never separated from its assistant turn. Returns
    /// false when no session matched.
    async fn append_turns(
        &self,
        owner: &str,
        source_id: &str,
        turns: Vec<ChatTurn>,
    ) -> Result<bool>;

    /// All sessions owned by `owner`, in insertion order.
    async fn list_sessions(&self, owner: &str) -> Result<Vec<DocumentSession>>;

    /// Delete by `(id, owner)`. Returns false when nothing matched:
    /// unknown id, foreign owner, or an id that is not a valid
    /// ObjectId all look the same to the caller.
    async fn delete_session(&self, owner: &str, session_id: &str) -> Result<bool>;
}

/// Read-only access to the auth collaborator's users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>>;
}
