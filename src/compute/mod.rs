//! Compute module - Ripple-spreading search over multi-objective networks.

mod extract;
mod network;
mod pareto;
mod propagator;
mod speed;
mod store;

pub use extract::*;
pub use network::*;
pub use pareto::*;
pub use propagator::*;
pub use speed::*;
pub use store::*;
