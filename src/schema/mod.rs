//! Schema module - Configuration and problem types for ripple-spreading search.

mod config;
#[cfg(not(target_arch = "wasm32"))]
mod generator;
mod network;

pub use config::*;
pub use network::*;
