use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
