//! Process resource sampling.

pub mod resources;

pub use resources::ProcessMemory;
