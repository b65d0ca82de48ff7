//! Ripple propagator - Main simulation driver for the Pareto path search.
//!
//! Each tick grows every active ripple, collects the edge crossings it
//! produced, runs the crossings through the Pareto filter node by node and
//! commits the survivors as new ripples.

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use crate::schema::{ConfigError, NetworkConfig, SearchConfig};

use super::{
    Candidate, Network, NodeId, ParetoFilter, ParetoPath, ParetoSolution, ReferenceSpeed, Ripple,
    RippleId, RippleStore, SearchStats, extract_pareto_paths,
};

/// Errors returned by a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Search did not finish within {limit} ticks")]
    TickLimitExceeded { limit: u64 },

    #[error("Search did not finish within {limit_ms} ms ({ticks} ticks simulated)")]
    TimeLimitExceeded { limit_ms: u64, ticks: u64 },
}

/// Simulation state container.
#[derive(Debug, Clone)]
pub struct RippleState {
    /// Every ripple created so far, with archives and the active set.
    pub store: RippleStore,
    /// Simulated distance (`tick * speed`).
    pub time: f64,
    /// Tick count.
    pub tick: u64,
    /// Running statistics.
    pub stats: SearchStats,
}

impl RippleState {
    /// True once no ripple can spread any further.
    #[inline]
    pub fn is_quiescent(&self) -> bool {
        self.store.active().is_empty()
    }
}

/// Summary of a single tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Ripples grown this tick.
    pub advanced: usize,
    /// Crossings detected.
    pub emitted: usize,
    /// Crossings that became ripples.
    pub created: usize,
    /// Ripples that went inactive.
    pub retired: usize,
}

/// Crossings produced by one active ripple in one tick.
struct Emission {
    id: RippleId,
    candidates: Vec<Candidate>,
    exhausted: bool,
}

/// CPU ripple-spreading propagator.
#[derive(Debug, Clone)]
pub struct RipplePropagator {
    network: Network,
    reference: ReferenceSpeed,
    config: SearchConfig,
    source: NodeId,
    destination: NodeId,
}

impl RipplePropagator {
    /// Create a propagator; all configuration errors surface here.
    pub fn new(
        network: Network,
        source: NodeId,
        destination: NodeId,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        network.check_endpoints(source, destination)?;
        let reference = ReferenceSpeed::select(&network);

        Ok(Self {
            network,
            reference,
            config,
            source,
            destination,
        })
    }

    /// State holding the single ripple at the source.
    pub fn initial_state(&self) -> RippleState {
        let mut store = RippleStore::new(self.network.node_count());
        let root = store.create(
            self.source,
            0.0,
            vec![self.source],
            vec![0.0; self.network.objectives()],
            0,
        );
        store.archive(self.source, root);
        if self.source == self.destination {
            store.terminate(root);
        } else {
            store.activate(root);
        }

        RippleState {
            store,
            time: 0.0,
            tick: 0,
            stats: SearchStats {
                ripples_created: 1,
                reference_dimension: self.reference.dimension,
                speed: self.reference.speed,
                ..Default::default()
            },
        }
    }

    /// List the crossings of one ripple during `tick`.
    ///
    /// The wavefront covers the reference distance `((tick - 1) * v, tick * v]`
    /// this tick. An edge is crossed when the reference cost of the extended
    /// path lands in that window, not when the accumulated radius passes the
    /// edge length, so each edge is crossed exactly once. A ripple's first
    /// tick also takes crossings that landed before the window, which happens
    /// when the parent overshot.
    fn spread(&self, ripple: &Ripple, tick: u64) -> Emission {
        let v = self.reference.speed;
        let dimension = self.reference.dimension;
        let before = (tick - 1) as f64 * v;
        let after = tick as f64 * v;
        let first = ripple.born_at + 1 == tick;
        let edges = self.network.neighbors(ripple.epicenter);
        let lengths = self.reference.lengths(ripple.epicenter);

        let mut candidates = Vec::new();
        let mut exhausted = true;

        for (edge, &length) in edges.iter().zip(lengths) {
            // Same sum as the child's objective in the reference dimension.
            let arrival = ripple.objective[dimension] + length;

            if arrival <= after
                && (first || before < arrival)
                && !ripple.path.contains(&edge.target)
            {
                let mut path = Vec::with_capacity(ripple.path.len() + 1);
                path.extend_from_slice(&ripple.path);
                path.push(edge.target);

                let objective = ripple
                    .objective
                    .iter()
                    .zip(&edge.weights)
                    .map(|(o, w)| o + w)
                    .collect();

                candidates.push(Candidate {
                    node: edge.target,
                    radius: (after - arrival).max(0.0),
                    path,
                    objective,
                });
            }
            // Visited neighbors still keep the ripple alive.
            if after < arrival {
                exhausted = false;
            }
        }

        Emission {
            id: ripple.id,
            candidates,
            exhausted,
        }
    }

    /// Perform one simulation tick.
    pub fn step(&self, state: &mut RippleState) -> TickReport {
        let v = self.reference.speed;
        let tick = state.tick + 1;
        let active: Vec<RippleId> = state.store.active().to_vec();
        state.stats.peak_active = state.stats.peak_active.max(active.len());

        // 1. Growth
        for &id in &active {
            state.store.grow(id, v);
        }

        // 2. Crossing detection (pure per ripple)
        let store = &state.store;

        #[cfg(not(target_arch = "wasm32"))]
        let emissions: Vec<Emission> = if self.config.parallel {
            active
                .par_iter()
                .map(|&id| self.spread(store.get(id), tick))
                .collect()
        } else {
            active
                .iter()
                .map(|&id| self.spread(store.get(id), tick))
                .collect()
        };

        #[cfg(target_arch = "wasm32")]
        let emissions: Vec<Emission> = active
            .iter()
            .map(|&id| self.spread(store.get(id), tick))
            .collect();

        // 3. Retire exhausted ripples
        let retired: Vec<RippleId> = emissions
            .iter()
            .filter(|e| e.exhausted)
            .map(|e| e.id)
            .collect();
        state.store.deactivate_all(&retired);

        // 4. Group crossings by target node
        let mut groups: BTreeMap<NodeId, Vec<Candidate>> = BTreeMap::new();
        let mut emitted = 0;
        for emission in emissions {
            emitted += emission.candidates.len();
            for candidate in emission.candidates {
                groups.entry(candidate.node).or_default().push(candidate);
            }
        }

        // 5. Pareto filter per node; nodes are independent within a tick
        let survivors: Vec<(NodeId, Vec<Candidate>)> = {
            let filter = ParetoFilter::new(&state.store, self.destination);
            let groups: Vec<(NodeId, Vec<Candidate>)> = groups.into_iter().collect();

            #[cfg(not(target_arch = "wasm32"))]
            let survivors: Vec<(NodeId, Vec<Candidate>)> = if self.config.parallel {
                groups
                    .into_par_iter()
                    .map(|(node, candidates)| (node, filter.survivors(node, candidates)))
                    .collect()
            } else {
                groups
                    .into_iter()
                    .map(|(node, candidates)| (node, filter.survivors(node, candidates)))
                    .collect()
            };

            #[cfg(target_arch = "wasm32")]
            let survivors: Vec<(NodeId, Vec<Candidate>)> = groups
                .into_iter()
                .map(|(node, candidates)| (node, filter.survivors(node, candidates)))
                .collect();

            survivors
        };

        // 6. Commit survivors (serial)
        let mut created = 0;
        for (node, candidates) in survivors {
            for candidate in candidates {
                let id = state.store.create(
                    node,
                    candidate.radius,
                    candidate.path,
                    candidate.objective,
                    tick,
                );
                state.store.archive(node, id);
                if node == self.destination {
                    state.store.terminate(id);
                } else {
                    state.store.activate(id);
                }
                created += 1;
            }
        }

        state.tick = tick;
        state.time = tick as f64 * v;
        state.stats.ticks = state.tick;
        state.stats.ripples_created += created;
        state.stats.candidates_emitted += emitted;
        state.stats.candidates_pruned += emitted - created;

        let report = TickReport {
            tick: state.tick,
            advanced: active.len(),
            emitted,
            created,
            retired: retired.len(),
        };

        log::debug!(
            "Tick {}: advanced={}, emitted={}, created={}, retired={}, active={}",
            report.tick,
            report.advanced,
            report.emitted,
            report.created,
            report.retired,
            state.store.active().len()
        );

        report
    }

    /// Run until quiescence, honouring the configured safety bounds.
    pub fn run(&self, state: &mut RippleState) -> Result<(), SearchError> {
        // No monotonic clock on wasm32; `SearchConfig::validate` rejects
        // a time limit there.
        #[cfg(not(target_arch = "wasm32"))]
        let deadline = self
            .config
            .time_limit_ms
            .map(|limit_ms| (Instant::now(), limit_ms));

        while !state.is_quiescent() {
            if let Some(limit) = self.config.max_ticks
                && state.tick >= limit
            {
                log::warn!(
                    "Tick limit {} reached with {} active ripples",
                    limit,
                    state.store.active().len()
                );
                return Err(SearchError::TickLimitExceeded { limit });
            }
            #[cfg(not(target_arch = "wasm32"))]
            if let Some((started, limit_ms)) = deadline
                && started.elapsed().as_millis() >= u128::from(limit_ms)
            {
                log::warn!("Time limit {} ms reached at tick {}", limit_ms, state.tick);
                return Err(SearchError::TimeLimitExceeded {
                    limit_ms,
                    ticks: state.tick,
                });
            }
            self.step(state);
        }
        Ok(())
    }

    /// Run a full search from a fresh state.
    pub fn solve(&self) -> Result<ParetoSolution, SearchError> {
        log::info!(
            "Searching {} -> {} over {} nodes / {} edges ({} objectives), reference dimension {}, speed {}",
            self.source,
            self.destination,
            self.network.node_count(),
            self.network.edge_count(),
            self.network.objectives(),
            self.reference.dimension,
            self.reference.speed
        );

        let mut state = self.initial_state();
        self.run(&mut state)?;

        let paths = extract_pareto_paths(&state.store, self.destination);
        let mut stats = state.stats;
        stats.pareto_paths = paths.len();

        log::info!(
            "Found {} Pareto paths in {} ticks ({} ripples)",
            stats.pareto_paths,
            stats.ticks,
            stats.ripples_created
        );

        Ok(ParetoSolution { paths, stats })
    }

    /// Get the validated network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Get the timing model.
    pub fn reference(&self) -> &ReferenceSpeed {
        &self.reference
    }

    /// Get configuration reference.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// Validate `network` and compute every Pareto-optimal path from `source`
/// to `destination`.
pub fn solve(
    network: &NetworkConfig,
    source: NodeId,
    destination: NodeId,
    config: SearchConfig,
) -> Result<ParetoSolution, SearchError> {
    let network = Network::from_config(network)?;
    RipplePropagator::new(network, source, destination, config)?.solve()
}

/// [`solve`] with default settings, returning only the paths.
pub fn pareto_paths(
    network: &NetworkConfig,
    source: NodeId,
    destination: NodeId,
) -> Result<Vec<ParetoPath>, SearchError> {
    Ok(solve(network, source, destination, SearchConfig::default())?.paths)
}
