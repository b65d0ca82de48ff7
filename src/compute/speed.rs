//! Reference dimension and spreading speed selection.

use super::network::{Network, NodeId};

/// Scalar timing model derived from a network.
///
/// Ripples grow by `speed` per tick and cross an edge when their radius
/// reaches that edge's reference length.
#[derive(Debug, Clone)]
pub struct ReferenceSpeed {
    /// Objective index used for timing.
    pub dimension: usize,
    /// Radius increment per tick; the smallest reference length.
    pub speed: f64,
    /// Reference length per edge, parallel to `Network::neighbors`.
    lengths: Vec<Vec<f64>>,
}

impl ReferenceSpeed {
    /// Choose the objective with the smallest max/min spread.
    ///
    /// Every reference length is then `>= speed`, so a radius advancing by
    /// `speed` from a start in `[0, speed)` lands in each edge's window
    /// `[L, L + speed)` exactly once.
    pub fn select(network: &Network) -> Self {
        let objectives = network.objectives();
        let mut min = vec![f64::INFINITY; objectives];
        let mut max = vec![0.0f64; objectives];

        for (_, edge) in network.edges() {
            for (k, &w) in edge.weights.iter().enumerate() {
                min[k] = min[k].min(w);
                max[k] = max[k].max(w);
            }
        }

        // First index wins ties.
        let mut dimension = 0;
        let mut best_ratio = f64::INFINITY;
        for k in 0..objectives {
            let ratio = max[k] / min[k];
            if ratio < best_ratio {
                best_ratio = ratio;
                dimension = k;
            }
        }

        let lengths = (0..network.node_count())
            .map(|node| {
                network
                    .neighbors(node)
                    .iter()
                    .map(|edge| edge.weights[dimension])
                    .collect()
            })
            .collect();

        log::debug!(
            "Reference dimension {} (spread {:.3}), speed {}",
            dimension,
            best_ratio,
            min[dimension]
        );

        Self {
            dimension,
            speed: min[dimension],
            lengths,
        }
    }

    /// Reference lengths of the outgoing edges of `node`.
    #[inline]
    pub fn lengths(&self, node: NodeId) -> &[f64] {
        &self.lengths[node]
    }
}
