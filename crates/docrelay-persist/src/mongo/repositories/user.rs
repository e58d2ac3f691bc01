use bson::oid::ObjectId;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::mongo::models::MongoUser;

const COLLECTION: &str = "users";

/// Read-only view of the auth collaborator's `users` collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<MongoUser>,
}

impl MongoUserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<MongoUser>> {
        let filter = doc! { "_id": id };
        Ok(self.collection.find_one(filter).await?)
    }
}
