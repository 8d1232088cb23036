pub mod config;
pub mod dispatch;
pub mod item;
pub mod request;
pub mod route;
pub mod store;
