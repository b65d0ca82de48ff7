//! Reading results out of a finished search.

use serde::{Deserialize, Serialize};

use super::network::NodeId;
use super::store::RippleStore;

/// One Pareto-optimal path and its cost vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoPath {
    pub path: Vec<NodeId>,
    pub objective: Vec<f64>,
}

/// Destination archive as `(path, objective)` records, in creation order.
///
/// Empty when nothing reached the destination.
pub fn extract_pareto_paths(store: &RippleStore, destination: NodeId) -> Vec<ParetoPath> {
    store
        .archive_of(destination)
        .iter()
        .map(|&id| {
            let ripple = store.get(id);
            ParetoPath {
                path: ripple.path.clone(),
                objective: ripple.objective.clone(),
            }
        })
        .collect()
}

/// Search statistics for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Ticks simulated until quiescence.
    pub ticks: u64,
    /// Ripples ever created, including the initial one.
    pub ripples_created: usize,
    /// Largest active set seen at the start of a tick.
    pub peak_active: usize,
    /// Crossings detected across all ticks.
    pub candidates_emitted: usize,
    /// Crossings rejected by the Pareto filter.
    pub candidates_pruned: usize,
    /// Entries in the destination archive.
    pub pareto_paths: usize,
    /// Objective used for timing.
    pub reference_dimension: usize,
    /// Radius growth per tick.
    pub speed: f64,
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoSolution {
    pub paths: Vec<ParetoPath>,
    pub stats: SearchStats,
}
