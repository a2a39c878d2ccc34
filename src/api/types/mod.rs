//! Request and response types of the HTTP API

pub mod error;
pub mod sentence;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use sentence::SentenceQuery;
