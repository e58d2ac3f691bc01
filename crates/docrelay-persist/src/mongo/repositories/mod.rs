pub mod session;
pub mod user;

pub use session::MongoSessionRepository;
pub use user::MongoUserRepository;
