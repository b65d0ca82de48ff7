//! Immutable multi-objective network model.

use std::collections::{BTreeMap, HashMap};

use crate::schema::{ConfigError, NetworkConfig};

/// Node identifier, `0..node_count`.
pub type NodeId = usize;

/// A directed edge with its full weight vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weights: Vec<f64>,
}

/// Validated adjacency representation.
///
/// Edges of each node are stored in ascending target order; that order is
/// the order in which ripples visit neighbors.
#[derive(Debug, Clone)]
pub struct Network {
    edges: Vec<Vec<Edge>>,
    /// Per node: target -> position in `edges[node]`.
    lookup: Vec<HashMap<NodeId, usize>>,
    objectives: usize,
}

impl Network {
    /// Build and validate a network from an adjacency list.
    pub fn new(adjacency: Vec<BTreeMap<NodeId, Vec<f64>>>) -> Result<Self, ConfigError> {
        let node_count = adjacency.len();
        let mut objectives: Option<usize> = None;
        let mut edges = Vec::with_capacity(node_count);
        let mut lookup = Vec::with_capacity(node_count);

        for (from, neighbors) in adjacency.into_iter().enumerate() {
            let mut node_edges = Vec::with_capacity(neighbors.len());
            let mut node_lookup = HashMap::with_capacity(neighbors.len());

            for (to, weights) in neighbors {
                if to >= node_count {
                    return Err(ConfigError::NeighborOutOfRange {
                        from,
                        to,
                        node_count,
                    });
                }
                if to == from {
                    return Err(ConfigError::SelfLoop(from));
                }
                if weights.is_empty() {
                    return Err(ConfigError::EmptyWeights { from, to });
                }
                let expected = *objectives.get_or_insert(weights.len());
                if weights.len() != expected {
                    return Err(ConfigError::InconsistentObjectives {
                        from,
                        to,
                        expected,
                        found: weights.len(),
                    });
                }
                if let Some((index, &value)) = weights
                    .iter()
                    .enumerate()
                    .find(|(_, w)| !(w.is_finite() && **w > 0.0))
                {
                    return Err(ConfigError::InvalidWeight {
                        from,
                        to,
                        index,
                        value,
                    });
                }

                node_lookup.insert(to, node_edges.len());
                node_edges.push(Edge {
                    target: to,
                    weights,
                });
            }

            edges.push(node_edges);
            lookup.push(node_lookup);
        }

        let objectives = objectives.ok_or(ConfigError::EmptyNetwork)?;

        Ok(Self {
            edges,
            lookup,
            objectives,
        })
    }

    /// Build and validate a network from its serialized description.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, ConfigError> {
        Self::new(config.adjacency.clone())
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Length of every weight vector.
    #[inline]
    pub fn objectives(&self) -> usize {
        self.objectives
    }

    /// Outgoing edges of `node`, ascending by target.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.edges[node]
    }

    /// Weight vector of `from -> to`, if that edge exists.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<&[f64]> {
        let index = *self.lookup.get(from)?.get(&to)?;
        Some(&self.edges[from][index].weights)
    }

    /// Iterate all edges as `(from, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |edge| (from, edge)))
    }

    /// Check that both endpoints of a search lie inside the network.
    pub fn check_endpoints(&self, source: NodeId, destination: NodeId) -> Result<(), ConfigError> {
        let node_count = self.node_count();
        if source >= node_count {
            return Err(ConfigError::SourceOutOfRange {
                node: source,
                node_count,
            });
        }
        if destination >= node_count {
            return Err(ConfigError::DestinationOutOfRange {
                node: destination,
                node_count,
            });
        }
        Ok(())
    }

    /// Sum of edge weights along consecutive nodes of `path`.
    ///
    /// Returns `None` if some hop is not an edge.
    pub fn path_cost(&self, path: &[NodeId]) -> Option<Vec<f64>> {
        let mut cost = vec![0.0; self.objectives];
        for hop in path.windows(2) {
            let weights = self.weight(hop[0], hop[1])?;
            for (c, w) in cost.iter_mut().zip(weights) {
                *c += w;
            }
        }
        Some(cost)
    }
}
