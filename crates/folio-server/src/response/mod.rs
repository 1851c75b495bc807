//! Response helpers.

pub mod cache;

pub use cache::{CachePolicy, Cached, NO_CACHE};
