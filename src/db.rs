pub mod kv_store;
pub mod session_repo;
pub use session_repo::SessionRepository;
pub mod client;
pub use client::ApiClient;
pub mod auth_repo;
pub use auth_repo::AuthRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod resource_repo;
pub use resource_repo::{ResourceApi, RestRepository};
