use bson::oid::ObjectId;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::ChatTurn;
use crate::mongo::models::MongoSession;

const COLLECTION: &str = "pdfs";

#[derive(Clone)]
pub struct MongoSessionRepository {
    collection: Collection<MongoSession>,
}

impl MongoSessionRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }

    /// Insert a new session with an empty history.
    pub async fn insert(
        &self,
        owner: ObjectId,
        source_id: &str,
        name: &str,
    ) -> Result<MongoSession> {
        let session = MongoSession {
            id: ObjectId::new(),
            source_id: source_id.to_string(),
            name: name.to_string(),
            uploaded_at: Utc::now(),
            chat_history: Vec::new(),
            owner,
        };

        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    /// Find a session by provider source id, scoped to its owner.
    pub async fn find_by_source(
        &self,
        owner: ObjectId,
        source_id: &str,
    ) -> Result<Option<MongoSession>> {
        let filter = doc! { "sourceId": source_id, "user": owner };
        Ok(self.collection.find_one(filter).await?)
    }

    /// Append turns with a single `$push`/`$each`, so the whole
    /// exchange lands atomically and in order.
    pub async fn push_turns(
        &self,
        owner: ObjectId,
        source_id: &str,
        turns: &[ChatTurn],
    ) -> Result<bool> {
        let entries = turns
            .iter()
            .map(bson::to_bson)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let filter = doc! { "sourceId": source_id, "user": owner };
        let update = doc! { "$push": { "chatHistory": { "$each": entries } } };

        let result = self.collection.update_one(filter, update).await?;
        Ok(result.modified_count > 0)
    }

    /// List every session owned by `owner`.
    pub async fn list_for_owner(&self, owner: ObjectId) -> Result<Vec<MongoSession>> {
        let filter = doc! { "user": owner };
        let sessions = self.collection.find(filter).await?.try_collect().await?;
        Ok(sessions)
    }

    /// Delete by `(_id, user)`; the owner filter makes foreign
    /// sessions indistinguishable from missing ones.
    pub async fn delete(&self, owner: ObjectId, id: ObjectId) -> Result<bool> {
        let filter = doc! { "_id": id, "user": owner };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }
}
