//! Server core functionality
//!
//! Shared application state, the HTTP router, and the listener that serves it.

pub mod core;
pub mod routes;
pub mod state;

pub use self::core::Server;
pub use routes::build_router;
pub use state::AppState;
