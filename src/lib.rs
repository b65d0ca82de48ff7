//! Ripple-spreading search for Pareto-optimal paths.
//!
//! Given a directed network whose edges carry vector-valued costs (distance,
//! toll, ...), this crate finds every simple path from a source to a
//! destination that is not Pareto-dominated by another path. Instead of a
//! label-correcting search it simulates wavefronts ("ripples") spreading
//! from the source at a fixed speed; ripples reaching a node spawn new
//! ripples there and only non-dominated ripples survive.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Serializable network, problem and search configuration
//! - `compute`: Network model, speed selection, ripple store, Pareto filter
//!   and the propagator that drives the simulation
//!
//! # Example
//!
//! ```rust
//! use ripple_pareto::{NetworkConfig, pareto_paths};
//!
//! let mut network = NetworkConfig::with_nodes(3);
//! network
//!     .add_edge(0, 1, vec![1.0, 1.0])
//!     .add_edge(1, 2, vec![1.0, 1.0])
//!     .add_edge(0, 2, vec![3.0, 1.0]);
//!
//! let paths = pareto_paths(&network, 0, 2).unwrap();
//! assert_eq!(paths.len(), 2);
//! for p in &paths {
//!     println!("{:?} costs {:?}", p.path, p.objective);
//! }
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    ParetoPath, ParetoSolution, RipplePropagator, RippleState, SearchError, SearchStats,
    pareto_paths, solve,
};
pub use schema::{ConfigError, NetworkConfig, ProblemConfig, SearchConfig};
