pub mod wire;
pub mod auth;
pub mod resource;
pub mod inventory;
pub mod users;
