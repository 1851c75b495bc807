//! Error handling for the Folio API server.

pub mod response;
pub mod types;

pub use response::panic_response;
pub use types::{ApiError, ApiResult};
