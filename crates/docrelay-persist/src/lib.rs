//! MongoDB persistence for per-user PDF chat sessions.
//!
//! Database-agnostic models and the `SessionStore` / `UserStore`
//! traits live at the crate root; the Mongo-backed implementation is
//! under `mongo`. Collection layout is wire-compatible with the
//! original deployment (`pdfs` and `users`, camelCase field names).

pub mod error;
pub mod models;
pub mod mongo;
pub mod trait_store;

pub use error::{Result, StoreError};
pub use models::{ChatTurn, DocumentSession, TurnRole, UserRecord};
pub use mongo::MongoStore;
pub use trait_store::{SessionStore, UserStore};
