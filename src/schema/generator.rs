//! Deterministic random networks for benchmarks and demos.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::NetworkConfig;

impl NetworkConfig {
    /// Generate a random directed network.
    ///
    /// Every ordered pair `(i, j)` with `i != j` gets an edge with
    /// probability `edge_probability`. Weight components are integers drawn
    /// uniformly from `1..=max_weight`, so path costs stay exact in `f64`.
    /// A chain `0 -> 1 -> ... -> nodes-1` is always present, which keeps
    /// the last node reachable from node 0.
    pub fn random(
        nodes: usize,
        edge_probability: f64,
        objectives: usize,
        max_weight: u32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_weight = max_weight.max(1);
        let objectives = objectives.max(1);
        let edge_probability = edge_probability.clamp(0.0, 1.0);

        let draw = |rng: &mut StdRng| -> Vec<f64> {
            (0..objectives)
                .map(|_| rng.gen_range(1..=max_weight) as f64)
                .collect()
        };

        let mut network = Self::with_nodes(nodes);
        for from in 0..nodes {
            for to in 0..nodes {
                if from == to {
                    continue;
                }
                if to == from + 1 || rng.gen_bool(edge_probability) {
                    let weights = draw(&mut rng);
                    network.add_edge(from, to, weights);
                }
            }
        }
        network
    }
}
