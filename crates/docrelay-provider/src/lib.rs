//! Client for the hosted PDF question-answering provider.
//!
//! The provider exposes two endpoints this crate consumes:
//! - `POST /sources/add-file` registers a binary file and returns an
//!   opaque source identifier;
//! - `POST /chats/message` answers a message against a registered
//!   source. Only the chat endpoint goes through the retry wrapper.

pub mod client;
pub mod error;
pub mod retry;
pub mod traits;
pub mod types;

pub use client::ChatPdfClient;
pub use error::ProviderError;
pub use traits::ProviderClient;
pub use types::{ChatReply, ChatRequest, MessageRole, OutboundMessage};
