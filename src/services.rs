pub mod session;
pub mod auth;
pub mod resource_list;
