pub mod auth;
pub mod navigation;
pub mod resources;
pub mod inventory;
pub mod users;
