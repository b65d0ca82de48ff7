//! Network and problem descriptions as read from JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, SearchConfig};

/// Adjacency description of a multi-objective network.
///
/// Entry `i` maps each neighbor of node `i` to the weight vector of edge
/// `i -> neighbor`. Serialized as a plain JSON array of objects:
///
/// ```json
/// [{ "1": [5.0, 5.0] }, {}]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkConfig {
    pub adjacency: Vec<BTreeMap<usize, Vec<f64>>>,
}

impl NetworkConfig {
    /// Create a network with `nodes` nodes and no edges.
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); nodes],
        }
    }

    /// Add (or replace) the directed edge `from -> to`, growing the node
    /// list if needed.
    pub fn add_edge(&mut self, from: usize, to: usize, weights: Vec<f64>) -> &mut Self {
        let needed = from.max(to) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize_with(needed, BTreeMap::new);
        }
        self.adjacency[from].insert(to, weights);
        self
    }

    /// Add both `a -> b` and `b -> a` with the same weights.
    pub fn add_undirected(&mut self, a: usize, b: usize, weights: Vec<f64>) -> &mut Self {
        self.add_edge(a, b, weights.clone());
        self.add_edge(b, a, weights)
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum()
    }
}

/// A complete search problem: network, endpoints, and search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemConfig {
    pub network: NetworkConfig,
    pub source: usize,
    pub destination: usize,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ProblemConfig {
    /// Load a problem from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let problem: Self = serde_json::from_str(&content)?;
        problem.search.validate()?;
        Ok(problem)
    }

    /// Five-node, two-objective demo problem (node 0 to node 4).
    pub fn example() -> Self {
        let mut network = NetworkConfig::with_nodes(5);
        network
            .add_undirected(0, 1, vec![62.0, 50.0])
            .add_undirected(0, 2, vec![44.0, 90.0])
            .add_undirected(0, 3, vec![67.0, 10.0])
            .add_undirected(1, 2, vec![33.0, 25.0])
            .add_undirected(1, 4, vec![52.0, 90.0])
            .add_undirected(2, 3, vec![32.0, 10.0])
            .add_undirected(2, 4, vec![52.0, 40.0])
            .add_undirected(3, 4, vec![54.0, 100.0]);

        Self {
            network,
            source: 0,
            destination: 4,
            search: SearchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_add_edge_grows_nodes() {
        let mut network = NetworkConfig::default();
        network.add_edge(0, 3, vec![1.0]);
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn test_adjacency_json_shape() {
        let json = r#"[{"1": [5, 5]}, {}]"#;
        let network: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.adjacency[0][&1], vec![5.0, 5.0]);
    }

    #[test]
    fn test_example_is_symmetric() {
        let problem = ProblemConfig::example();
        assert_eq!(problem.network.node_count(), 5);
        assert_eq!(problem.network.edge_count(), 16);
        for (from, edges) in problem.network.adjacency.iter().enumerate() {
            for (to, weights) in edges {
                assert_eq!(&problem.network.adjacency[*to][&from], weights);
            }
        }
    }

    #[test]
    fn test_load_from_file() {
        let problem = ProblemConfig::example();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&problem).unwrap().as_bytes())
            .unwrap();

        let loaded = ProblemConfig::load(file.path()).unwrap();
        assert_eq!(loaded.network, problem.network);
        assert_eq!(loaded.source, 0);
        assert_eq!(loaded.destination, 4);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            ProblemConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProblemConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
