//! Exact all-pairs force model.

use edamame_core::{NodeId, Vec2};
use edamame_graph::Adjacency;

use crate::law::{pair_force, ForceParams};
use crate::model::ForceModel;

/// Sums the pair law over every other node in id order.
#[derive(Clone, Copy, Debug)]
pub struct ExactForces<'a> {
    params: ForceParams,
    adjacency: &'a Adjacency,
}

impl<'a> ExactForces<'a> {
    /// Create an exact model over `adjacency`.
    pub fn new(params: ForceParams, adjacency: &'a Adjacency) -> Self {
        Self { params, adjacency }
    }
}

impl ForceModel for ExactForces<'_> {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn net_force(&self, node: NodeId, positions: &[Vec2]) -> Vec2 {
        let here = positions[node.index()];
        let mut total = Vec2::ZERO;
        for (j, &there) in positions.iter().enumerate() {
            let other = NodeId(j as u32);
            if other == node {
                continue;
            }
            let connected = self.adjacency.is_connected(node, other);
            total += pair_force(&self.params, here, there, connected);
        }
        total
    }
}
