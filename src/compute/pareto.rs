//! Pareto dominance and per-node survivor selection.
//!
//! Filtering is a pure function from a candidate list to a retained
//! sublist. The store is only read here; survivors are committed by the
//! propagator.

use super::network::NodeId;
use super::store::RippleStore;

/// A ripple proposed for a node during the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Node the candidate arrived at.
    pub node: NodeId,
    /// Overshoot past the crossed edge; the starting radius if it survives.
    pub radius: f64,
    pub path: Vec<NodeId>,
    pub objective: Vec<f64>,
}

/// Returns `true` if `a` Pareto-dominates `b`: no component worse and at
/// least one strictly better.
///
/// Vectors of different length are incomparable.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut strictly_better = false;
    for i in 0..a.len() {
        if a[i] > b[i] {
            return false;
        }
        if a[i] < b[i] {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Keep the items whose key is not dominated by any other item's key.
///
/// Equal keys do not dominate each other, so duplicates all survive.
/// Input order is preserved.
pub fn non_dominated<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &[f64],
{
    let keep: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            !items
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && dominates(key(other), key(item)))
        })
        .collect();

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Survivor selection against the archives of one tick.
#[derive(Debug, Clone, Copy)]
pub struct ParetoFilter<'a> {
    store: &'a RippleStore,
    destination: NodeId,
    /// Number of destination ripples archived before this tick.
    destination_horizon: usize,
}

impl<'a> ParetoFilter<'a> {
    /// Snapshot the destination archive as of the start of the tick.
    pub fn new(store: &'a RippleStore, destination: NodeId) -> Self {
        Self {
            store,
            destination,
            destination_horizon: store.archive_of(destination).len(),
        }
    }

    /// Number of destination ripples this filter prunes against.
    #[inline]
    pub fn destination_horizon(&self) -> usize {
        self.destination_horizon
    }

    /// Return the candidates for `node` that survive, in input order.
    ///
    /// 1. Candidates dominated by a sibling are dropped.
    /// 2. Candidates dominated by a ripple archived at `node` are dropped.
    /// 3. Away from the destination, candidates dominated by a destination
    ///    ripple from an earlier tick are dropped: they cannot lead to a
    ///    better complete path.
    pub fn survivors(&self, node: NodeId, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut survivors = non_dominated(candidates, |c| c.objective.as_slice());

        survivors.retain(|candidate| {
            let beaten = self
                .store
                .archived_objectives(node, usize::MAX)
                .any(|archived| dominates(archived, &candidate.objective));
            if beaten {
                log::trace!("Pruned {:?} at node {}: archive", candidate.path, node);
            }
            !beaten
        });

        if node != self.destination {
            survivors.retain(|candidate| {
                let beaten = self
                    .store
                    .archived_objectives(self.destination, self.destination_horizon)
                    .any(|found| dominates(found, &candidate.objective));
                if beaten {
                    log::trace!(
                        "Pruned {:?} at node {}: destination front",
                        candidate.path,
                        node
                    );
                }
                !beaten
            });
        }

        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(node: NodeId, path: Vec<NodeId>, objective: Vec<f64>) -> Candidate {
        Candidate {
            node,
            radius: 0.0,
            path,
            objective,
        }
    }

    #[test]
    fn test_dominates() {
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
        assert!(dominates(&[1.0, 2.0], &[2.0, 3.0]));
        assert!(!dominates(&[1.0, 2.0], &[1.0, 2.0]));
        assert!(!dominates(&[1.0, 3.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 3.0], &[1.0, 2.0]));
        assert!(dominates(&[1.0], &[2.0]));
        assert!(!dominates(&[1.0], &[1.0, 2.0]));
        assert!(!dominates(&[], &[]));
    }

    #[test]
    fn test_non_dominated_keeps_front_in_order() {
        let items = vec![
            vec![3.0, 1.0],
            vec![4.0, 4.0],
            vec![2.0, 2.0],
            vec![2.0, 2.0],
            vec![1.0, 5.0],
        ];
        let front = non_dominated(items, |v| v.as_slice());
        assert_eq!(
            front,
            vec![
                vec![3.0, 1.0],
                vec![2.0, 2.0],
                vec![2.0, 2.0],
                vec![1.0, 5.0]
            ]
        );
    }

    #[test]
    fn test_non_dominated_empty() {
        let front = non_dominated(Vec::<Vec<f64>>::new(), |v| v.as_slice());
        assert!(front.is_empty());
    }

    #[test]
    fn test_survivors_against_node_archive() {
        let mut store = RippleStore::new(3);
        let a = store.create(1, 0.0, vec![0, 1], vec![2.0, 2.0], 1);
        store.archive(1, a);

        let filter = ParetoFilter::new(&store, 2);
        let survivors = filter.survivors(
            1,
            vec![
                candidate(1, vec![0, 2, 1], vec![3.0, 3.0]),
                candidate(1, vec![0, 3, 1], vec![1.0, 4.0]),
                candidate(1, vec![0, 4, 1], vec![2.0, 2.0]),
            ],
        );
        let paths: Vec<_> = survivors.into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec![vec![0, 3, 1], vec![0, 4, 1]]);
    }

    #[test]
    fn test_survivors_against_destination_front() {
        let mut store = RippleStore::new(3);
        let found = store.create(2, 0.0, vec![0, 2], vec![2.0, 2.0], 1);
        store.archive(2, found);

        let filter = ParetoFilter::new(&store, 2);
        assert_eq!(filter.destination_horizon(), 1);

        let survivors = filter.survivors(
            1,
            vec![
                candidate(1, vec![0, 1], vec![3.0, 2.0]),
                candidate(1, vec![0, 3, 1], vec![1.0, 3.0]),
            ],
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].path, vec![0, 3, 1]);
    }

    #[test]
    fn test_destination_skips_front_check() {
        let mut store = RippleStore::new(3);
        let found = store.create(2, 0.0, vec![0, 2], vec![2.0, 2.0], 1);
        store.archive(2, found);

        let filter = ParetoFilter::new(&store, 2);
        // Dominated at the destination by its own archive.
        let survivors = filter.survivors(2, vec![candidate(2, vec![0, 1, 2], vec![3.0, 3.0])]);
        assert!(survivors.is_empty());

        let survivors = filter.survivors(2, vec![candidate(2, vec![0, 1, 2], vec![1.0, 3.0])]);
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn test_horizon_ignores_later_destination_ripples() {
        let mut store = RippleStore::new(3);
        let filter_store = store.clone();
        let filter = ParetoFilter::new(&filter_store, 2);

        let late = store.create(2, 0.0, vec![0, 2], vec![1.0, 1.0], 1);
        store.archive(2, late);

        // The filter was built before `late` existed.
        let survivors = filter.survivors(1, vec![candidate(1, vec![0, 1], vec![5.0, 5.0])]);
        assert_eq!(survivors.len(), 1);

        // A filter taken after sees it.
        let survivors =
            ParetoFilter::new(&store, 2).survivors(1, vec![candidate(1, vec![0, 1], vec![5.0, 5.0])]);
        assert!(survivors.is_empty());
    }
}
