//! Configuration types for ripple-spreading search parameters.

use serde::{Deserialize, Serialize};

/// Default for [`SearchConfig::parallel`].
fn default_parallel() -> bool {
    true
}

/// Search-wide settings that do not depend on the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on simulated ticks. `None` runs to quiescence.
    #[serde(default)]
    pub max_ticks: Option<u64>,
    /// Wall-clock bound in milliseconds. `None` disables the check.
    /// Not available on wasm32, which has no monotonic clock.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    /// Spread active ripples and filter node groups on the rayon pool.
    /// Ignored on wasm32, where everything runs on one thread.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_ticks: None,
            time_limit_ms: None,
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Sequential search with no safety bounds.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ticks == Some(0) {
            return Err(ConfigError::InvalidTickLimit);
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::InvalidTimeLimit);
        }
        #[cfg(target_arch = "wasm32")]
        if self.time_limit_ms.is_some() {
            return Err(ConfigError::TimeLimitUnsupported);
        }
        Ok(())
    }
}

/// Configuration validation errors.
///
/// All of these are reported before any simulation work starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Network has no edges, objective count is undefined")]
    EmptyNetwork,
    #[error("Edge {from}->{to} has an empty weight vector")]
    EmptyWeights { from: usize, to: usize },
    #[error("Edge {from}->{to} weight[{index}] = {value} must be finite and positive")]
    InvalidWeight {
        from: usize,
        to: usize,
        index: usize,
        value: f64,
    },
    #[error("Edge {from}->{to} has {found} objectives, expected {expected}")]
    InconsistentObjectives {
        from: usize,
        to: usize,
        expected: usize,
        found: usize,
    },
    #[error("Edge {from}->{to} references a node outside 0..{node_count}")]
    NeighborOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },
    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(usize),
    #[error("Source node {node} is outside 0..{node_count}")]
    SourceOutOfRange { node: usize, node_count: usize },
    #[error("Destination node {node} is outside 0..{node_count}")]
    DestinationOutOfRange { node: usize, node_count: usize },
    #[error("Tick limit must be positive")]
    InvalidTickLimit,
    #[error("Time limit must be positive")]
    InvalidTimeLimit,
    #[error("Time limits are not supported on this target")]
    TimeLimitUnsupported,
    #[error("Failed to read problem file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse problem file: {0}")]
    Parse(#[from] serde_json::Error),
}
