//! The [`Graph`] store: nodes, name lookup, adjacency, and kinematic state.

use edamame_core::{GraphError, NodeId, Vec2};
use indexmap::IndexSet;
use rand::Rng;

use crate::adjacency::Adjacency;
use crate::record::{EdgeRecord, NodeRecord, NodeView, DEFAULT_RADIUS};

/// An undirected graph with per-node layout state.
///
/// Node names are unique. Each node gets a dense [`NodeId`] equal to its
/// insertion position. Positions and velocities live in parallel arrays
/// indexed by `NodeId`; see [`split_mut`](Self::split_mut) for how the
/// stepper borrows them.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    names: IndexSet<String>,
    radii: Vec<f32>,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    adjacency: Adjacency,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            names: IndexSet::with_capacity(nodes),
            radii: Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            velocities: Vec::with_capacity(nodes),
            adjacency: Adjacency::default(),
        }
    }

    // ── Construction ────────────────────────────────────────────

    /// Add a node at the origin with the default radius.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId, GraphError> {
        self.add_node_record(NodeRecord::new(name, DEFAULT_RADIUS), Vec2::ZERO)
    }

    /// Add a node from a loader record at the given starting position.
    ///
    /// Velocity starts at zero. Fails with [`GraphError::DuplicateNode`]
    /// if the name is taken, leaving the graph untouched.
    pub fn add_node_record(
        &mut self,
        record: NodeRecord,
        position: Vec2,
    ) -> Result<NodeId, GraphError> {
        if self.names.contains(record.name.as_str()) {
            return Err(GraphError::DuplicateNode { name: record.name });
        }
        let id = self.next_id();
        self.names.insert(record.name);
        self.radii.push(record.radius);
        self.positions.push(position);
        self.velocities.push(Vec2::ZERO);
        self.adjacency.push_node();
        Ok(id)
    }

    /// Add a batch of nodes at the origin, all or nothing.
    ///
    /// Every name is checked against the graph and against the rest of
    /// the batch before anything is inserted.
    pub fn add_nodes<I>(&mut self, records: I) -> Result<Vec<NodeId>, GraphError>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        let records: Vec<NodeRecord> = records.into_iter().collect();
        {
            let mut seen = IndexSet::with_capacity(records.len());
            for record in &records {
                let name = record.name.as_str();
                if self.names.contains(name) || !seen.insert(name) {
                    return Err(GraphError::DuplicateNode {
                        name: record.name.clone(),
                    });
                }
            }
        }
        records
            .into_iter()
            .map(|record| self.add_node_record(record, Vec2::ZERO))
            .collect()
    }

    /// Connect two existing nodes by name.
    ///
    /// Returns `Ok(false)` if the edge already existed. Fails with
    /// [`GraphError::UnknownNode`] if either name is absent, leaving the
    /// adjacency relation untouched.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<bool, GraphError> {
        let a = self.require(a)?;
        let b = self.require(b)?;
        Ok(self.adjacency.insert(a, b))
    }

    /// Connect two existing nodes by id.
    pub fn add_edge_ids(&mut self, a: NodeId, b: NodeId) -> Result<bool, GraphError> {
        for id in [a, b] {
            if id.index() >= self.node_count() {
                return Err(GraphError::UnknownNode {
                    name: format!("#{id}"),
                });
            }
        }
        Ok(self.adjacency.insert(a, b))
    }

    /// Append a node whose name the caller guarantees is unused.
    pub(crate) fn push_fresh_node(&mut self, name: String) -> NodeId {
        debug_assert!(!self.names.contains(name.as_str()));
        let id = self.next_id();
        self.names.insert(name);
        self.radii.push(DEFAULT_RADIUS);
        self.positions.push(Vec2::ZERO);
        self.velocities.push(Vec2::ZERO);
        self.adjacency.push_node();
        id
    }

    /// Connect two ids the caller guarantees are in range.
    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        debug_assert!(a.index() < self.node_count() && b.index() < self.node_count());
        self.adjacency.insert(a, b)
    }

    /// Add a batch of edges, all or nothing.
    ///
    /// Returns the number of edges that were newly inserted.
    pub fn add_edges<I>(&mut self, records: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let resolved = records
            .into_iter()
            .map(|edge| -> Result<(NodeId, NodeId), GraphError> {
                Ok((self.require(&edge.a)?, self.require(&edge.b)?))
            })
            .collect::<Result<Vec<_>, GraphError>>()?;
        Ok(resolved
            .into_iter()
            .filter(|&(a, b)| self.adjacency.insert(a, b))
            .count())
    }

    /// Place every node uniformly in `[-half_extent, half_extent)²` and
    /// zero all velocities.
    ///
    /// The generator is supplied by the caller so runs are reproducible
    /// from a seed.
    pub fn scatter<R: Rng>(&mut self, rng: &mut R, half_extent: f64) {
        let span = 2.0 * half_extent;
        for (pos, vel) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *pos = Vec2::new(
                span * rng.random::<f64>() - half_extent,
                span * rng.random::<f64>() - half_extent,
            );
            *vel = Vec2::ZERO;
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a node with this name exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether the named nodes are adjacent. False if either is absent.
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_id(a), self.node_id(b)) {
            (Some(a), Some(b)) => self.adjacency.is_connected(a, b),
            _ => false,
        }
    }

    /// Resolve a name to its id.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get_index_of(name).map(Self::id_from_index)
    }

    /// Name of the node with this id.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get_index(id.index()).map(String::as_str)
    }

    /// Render radius of the node with this id.
    pub fn radius(&self, id: NodeId) -> Option<f32> {
        self.radii.get(id.index()).copied()
    }

    /// Current position of the node with this id.
    pub fn position(&self, id: NodeId) -> Option<Vec2> {
        self.positions.get(id.index()).copied()
    }

    /// Current velocity of the node with this id.
    pub fn velocity(&self, id: NodeId) -> Option<Vec2> {
        self.velocities.get(id.index()).copied()
    }

    /// Overwrite one node's position.
    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> Result<(), GraphError> {
        let slot = self
            .positions
            .get_mut(id.index())
            .ok_or_else(|| GraphError::UnknownNode {
                name: format!("#{id}"),
            })?;
        *slot = position;
        Ok(())
    }

    /// Overwrite one node's velocity.
    pub fn set_velocity(&mut self, id: NodeId, velocity: Vec2) -> Result<(), GraphError> {
        let slot = self
            .velocities
            .get_mut(id.index())
            .ok_or_else(|| GraphError::UnknownNode {
                name: format!("#{id}"),
            })?;
        *slot = velocity;
        Ok(())
    }

    /// The adjacency relation.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// All positions, indexed by `NodeId`.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// All velocities, indexed by `NodeId`.
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Borrow topology immutably and both kinematic arrays mutably.
    ///
    /// This is the only way to mutate layout state in bulk. Topology is
    /// frozen for as long as the returned borrows live.
    pub fn split_mut(&mut self) -> (&Adjacency, &mut [Vec2], &mut [Vec2]) {
        (&self.adjacency, &mut self.positions, &mut self.velocities)
    }

    /// Arithmetic mean of all node positions.
    pub fn center_of_mass(&self) -> Result<Vec2, GraphError> {
        if self.positions.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let sum = self
            .positions
            .iter()
            .fold(Vec2::ZERO, |acc, &p| acc + p);
        Ok(sum * (1.0 / self.positions.len() as f64))
    }

    /// Positions translated so the centre of mass sits at the origin.
    pub fn recentered_positions(&self) -> Result<Vec<Vec2>, GraphError> {
        let com = self.center_of_mass()?;
        Ok(self.positions.iter().map(|&p| p - com).collect())
    }

    /// Iterate all nodes in id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeView<'_>> + '_ {
        self.names.iter().enumerate().map(move |(i, name)| NodeView {
            id: Self::id_from_index(i),
            name: name.as_str(),
            position: self.positions[i],
            velocity: self.velocities[i],
            radius: self.radii[i],
        })
    }

    /// Iterate each undirected edge once, as `(name_a, name_b)` with
    /// `id_a < id_b`. A self-loop, which `add_edge` does not reject, is
    /// yielded once as `(name, name)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        (0..self.node_count()).flat_map(move |i| {
            let a = Self::id_from_index(i);
            self.adjacency
                .neighbours(a)
                .filter(move |&b| a <= b)
                .map(move |b| (self.names[a.index()].as_str(), self.names[b.index()].as_str()))
        })
    }

    // ── Internals ───────────────────────────────────────────────

    fn require(&self, name: &str) -> Result<NodeId, GraphError> {
        self.node_id(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_string(),
        })
    }

    fn next_id(&self) -> NodeId {
        Self::id_from_index(self.names.len())
    }

    /// Node counts are bounded by memory long before `u32::MAX`.
    fn id_from_index(index: usize) -> NodeId {
        NodeId(index as u32)
    }
}
