//! In-memory doubles for the store and provider seams, shared by the
//! service and router test suites.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use docrelay_api::auth::CurrentUser;
use docrelay_api::config::{
    Config, CorsConfig, LoggingConfig, MongoDbConfig, ProviderConfig, ServerConfig,
};
use docrelay_api::state::AppState;
use docrelay_persist::{
    ChatTurn, DocumentSession, Result as StoreResult, SessionStore, UserRecord, UserStore,
};
use docrelay_provider::{ProviderClient, ProviderError};

pub const OWNER: &str = "507f1f77bcf86cd799439011";
pub const OTHER_OWNER: &str = "507f1f77bcf86cd799439012";
pub const JWT_SECRET: &str = "test-secret";

pub fn current_user(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: format!("{}@example.com", id),
    }
}

/// Session store backed by a Vec, tracking how often it was touched.
pub struct MemoryStore {
    pub sessions: Mutex<Vec<DocumentSession>>,
    pub users: Mutex<Vec<UserRecord>>,
    pub calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryStore {
    /// Empty store that knows the two test users.
    pub fn new() -> Arc<Self> {
        let users = vec![
            UserRecord {
                id: OWNER.to_string(),
                email: format!("{}@example.com", OWNER),
            },
            UserRecord {
                id: OTHER_OWNER.to_string(),
                email: format!("{}@example.com", OTHER_OWNER),
            },
        ];
        Arc::new(Self {
            sessions: Mutex::new(Vec::new()),
            users: Mutex::new(users),
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
        })
    }

    pub fn seed_session(&self, owner: &str, source_id: &str, name: &str) -> DocumentSession {
        let id = format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = DocumentSession {
            id,
            source_id: source_id.to_string(),
            name: name.to_string(),
            uploaded_at: Utc::now(),
            chat_history: Vec::new(),
            owner: owner.to_string(),
        };
        self.sessions.lock().unwrap().push(session.clone());
        session
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(
        &self,
        owner: &str,
        source_id: &str,
        name: &str,
    ) -> StoreResult<DocumentSession> {
        self.touch();
        Ok(self.seed_session(owner, source_id, name))
    }

    async fn find_by_source(
        &self,
        owner: &str,
        source_id: &str,
    ) -> StoreResult<Option<DocumentSession>> {
        self.touch();
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .find(|s| s.owner == owner && s.source_id == source_id)
            .cloned())
    }

    async fn append_turns(
        &self,
        owner: &str,
        source_id: &str,
        turns: Vec<ChatTurn>,
    ) -> StoreResult<bool> {
        self.touch();
        let mut sessions = self.sessions.lock().unwrap();
        match sessions
            .iter_mut()
            .find(|s| s.owner == owner && s.source_id == source_id)
        {
            Some(session) => {
                session.chat_history.extend(turns);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_sessions(&self, owner: &str) -> StoreResult<Vec<DocumentSession>> {
        self.touch();
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().filter(|s| s.owner == owner).cloned().collect())
    }

    async fn delete_session(&self, owner: &str, session_id: &str) -> StoreResult<bool> {
        self.touch();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !(s.owner == owner && s.id == session_id));
        Ok(sessions.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        self.touch();
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }
}

/// Provider double with scripted outcomes per endpoint; defaults to
/// success when nothing is scripted.
pub struct MockProvider {
    pub register_results: Mutex<VecDeque<Result<String, ProviderError>>>,
    pub message_results: Mutex<VecDeque<Result<String, ProviderError>>>,
    pub register_calls: AtomicUsize,
    pub message_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            register_results: Mutex::new(VecDeque::new()),
            message_results: Mutex::new(VecDeque::new()),
            register_calls: AtomicUsize::new(0),
            message_calls: AtomicUsize::new(0),
        })
    }

    pub fn script_register(&self, result: Result<String, ProviderError>) {
        self.register_results.lock().unwrap().push_back(result);
    }

    pub fn script_message(&self, result: Result<String, ProviderError>) {
        self.message_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn register_file(
        &self,
        _bytes: Vec<u8>,
        _file_name: &str,
    ) -> Result<String, ProviderError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("src_default".to_string()))
    }

    async fn send_message(
        &self,
        _source_id: &str,
        _message: &str,
    ) -> Result<String, ProviderError> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        self.message_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("a reply".to_string()))
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        cors: CorsConfig {
            enabled: false,
            origins: Vec::new(),
        },
        mongodb: MongoDbConfig {
            database: "docrelay_test".to_string(),
        },
        provider: ProviderConfig {
            base_url: "http://127.0.0.1:0".to_string(),
            max_attempts: 3,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
        mongodb_uri: String::new(),
        chatpdf_api_key: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
    }
}

pub fn test_state(store: Arc<MemoryStore>, provider: Arc<MockProvider>) -> Arc<AppState> {
    Arc::new(AppState::new(
        test_config(),
        store.clone(),
        store,
        provider,
    ))
}
