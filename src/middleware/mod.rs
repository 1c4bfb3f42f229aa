//! Server middleware
//!
//! Request logging and the validated login body extractor.

pub mod logging;
pub mod validation;

pub use logging::log_request;
pub use validation::ValidatedLogin;
