pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod sheets;
pub mod storage;

pub use config::ServerConfig;
pub use server::{AppState, Server, build_router};
