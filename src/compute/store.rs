//! Append-only ripple arena with per-node archives.

use serde::{Deserialize, Serialize};

use super::network::NodeId;

/// Stable handle of a ripple inside a [`RippleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RippleId(pub usize);

/// One spreading wavefront and the path it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub id: RippleId,
    /// Node the ripple radiates from (last node of `path`).
    pub epicenter: NodeId,
    /// Distance travelled from the epicenter.
    pub radius: f64,
    /// Simple path from the source to the epicenter.
    pub path: Vec<NodeId>,
    /// Accumulated cost of `path`.
    pub objective: Vec<f64>,
    /// Tick that created the ripple (0 for the root).
    pub born_at: u64,
}

/// Lifecycle of a ripple. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, not yet scheduled.
    Created,
    /// Growing every tick.
    Active,
    /// Exhausted its crossings; retained for dominance checks.
    Inactive,
    /// Created at the destination; never grows.
    Terminal,
}

/// Arena of every ripple ever created.
///
/// Nothing is removed or relocated: a [`RippleId`] indexes the arena
/// directly and archives only grow.
#[derive(Debug, Clone)]
pub struct RippleStore {
    ripples: Vec<Ripple>,
    lifecycle: Vec<Lifecycle>,
    /// Per node, ripple ids in creation order.
    archives: Vec<Vec<RippleId>>,
    /// Active ripples in activation order.
    active: Vec<RippleId>,
}

impl RippleStore {
    /// Create an empty store for a network of `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            ripples: Vec::new(),
            lifecycle: Vec::new(),
            archives: vec![Vec::new(); node_count],
            active: Vec::new(),
        }
    }

    /// Append a new ripple created at tick `born_at` and return its handle.
    pub fn create(
        &mut self,
        epicenter: NodeId,
        radius: f64,
        path: Vec<NodeId>,
        objective: Vec<f64>,
        born_at: u64,
    ) -> RippleId {
        let id = RippleId(self.ripples.len());
        self.ripples.push(Ripple {
            id,
            epicenter,
            radius,
            path,
            objective,
            born_at,
        });
        self.lifecycle.push(Lifecycle::Created);
        id
    }

    /// Record `id` in the archive of `node`. Repeated calls are no-ops.
    ///
    /// Archives stay sorted by id, so the common case of archiving the
    /// newest ripple is a plain push.
    pub fn archive(&mut self, node: NodeId, id: RippleId) {
        let archive = &mut self.archives[node];
        match archive.last() {
            None => archive.push(id),
            Some(&last) if last < id => archive.push(id),
            Some(_) => {
                if let Err(pos) = archive.binary_search(&id) {
                    archive.insert(pos, id);
                }
            }
        }
    }

    /// Schedule a freshly created ripple. Returns `false` if the ripple has
    /// already left the `Created` state.
    pub fn activate(&mut self, id: RippleId) -> bool {
        if self.lifecycle[id.0] != Lifecycle::Created {
            return false;
        }
        self.lifecycle[id.0] = Lifecycle::Active;
        self.active.push(id);
        true
    }

    /// Mark a freshly created ripple as terminal (destination ripple).
    pub fn terminate(&mut self, id: RippleId) -> bool {
        if self.lifecycle[id.0] != Lifecycle::Created {
            return false;
        }
        self.lifecycle[id.0] = Lifecycle::Terminal;
        true
    }

    /// Remove `id` from the active set. Its archive entry is untouched.
    pub fn deactivate(&mut self, id: RippleId) -> bool {
        if self.lifecycle[id.0] != Lifecycle::Active {
            return false;
        }
        self.lifecycle[id.0] = Lifecycle::Inactive;
        self.active.retain(|&a| a != id);
        true
    }

    /// Deactivate several ripples with one pass over the active set.
    pub fn deactivate_all(&mut self, ids: &[RippleId]) {
        if ids.is_empty() {
            return;
        }
        for id in ids {
            if self.lifecycle[id.0] == Lifecycle::Active {
                self.lifecycle[id.0] = Lifecycle::Inactive;
            }
        }
        let lifecycle = &self.lifecycle;
        self.active.retain(|id| lifecycle[id.0] == Lifecycle::Active);
    }

    /// Grow the radius of a ripple.
    #[inline]
    pub fn grow(&mut self, id: RippleId, delta: f64) {
        self.ripples[id.0].radius += delta;
    }

    #[inline]
    pub fn get(&self, id: RippleId) -> &Ripple {
        &self.ripples[id.0]
    }

    #[inline]
    pub fn lifecycle(&self, id: RippleId) -> Lifecycle {
        self.lifecycle[id.0]
    }

    #[inline]
    pub fn is_active(&self, id: RippleId) -> bool {
        self.lifecycle[id.0] == Lifecycle::Active
    }

    /// Archive of `node` in creation order.
    #[inline]
    pub fn archive_of(&self, node: NodeId) -> &[RippleId] {
        &self.archives[node]
    }

    /// Objectives of the first `limit` ripples archived at `node`.
    pub fn archived_objectives(
        &self,
        node: NodeId,
        limit: usize,
    ) -> impl Iterator<Item = &[f64]> + '_ {
        self.archives[node]
            .iter()
            .take(limit)
            .map(|id| self.ripples[id.0].objective.as_slice())
    }

    /// Active ripples in activation order.
    #[inline]
    pub fn active(&self) -> &[RippleId] {
        &self.active
    }

    /// Total number of ripples ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Number of nodes the store was sized for.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.archives.len()
    }
}
