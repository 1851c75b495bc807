//! Environment and execution-mode handling shared by the Folio crates.

pub mod env;
pub mod mode;

pub use env::*;
pub use mode::*;
