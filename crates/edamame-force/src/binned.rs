//! Spatially hashed force model.

use edamame_core::{NodeId, Vec2};
use edamame_graph::Adjacency;
use edamame_space::SpatialIndex;

use crate::law::{bin_force, pair_force, ForceParams};
use crate::model::ForceModel;

/// Exact forces within the home bin, aggregated forces from all others.
///
/// The home bin is the bin containing the node's *current* position; its
/// member list comes from the index and so reflects the last rebuild.
/// Every other occupied bin acts as a point mass at its grid origin with
/// `connections_to(node)` springs and the remaining members repelling.
#[derive(Clone, Copy, Debug)]
pub struct BinnedForces<'a> {
    params: ForceParams,
    adjacency: &'a Adjacency,
    index: &'a SpatialIndex,
}

impl<'a> BinnedForces<'a> {
    /// Create a binned model over `adjacency` and a built `index`.
    pub fn new(params: ForceParams, adjacency: &'a Adjacency, index: &'a SpatialIndex) -> Self {
        Self {
            params,
            adjacency,
            index,
        }
    }
}

impl ForceModel for BinnedForces<'_> {
    fn name(&self) -> &'static str {
        "binned"
    }

    fn net_force(&self, node: NodeId, positions: &[Vec2]) -> Vec2 {
        let here = positions[node.index()];
        let home = self.index.bin_of(here);
        let indexed = self.index.indexed_bin(node);
        let bin_size = self.index.bin_size();
        let mut total = Vec2::ZERO;

        if let Some(bin) = self.index.bin(home) {
            for &other in bin.members() {
                if other == node {
                    continue;
                }
                let connected = self.adjacency.is_connected(node, other);
                total += pair_force(&self.params, here, positions[other.index()], connected);
            }
        }

        for (key, bin) in self.index.bins() {
            if key == home {
                continue;
            }
            let mut members = bin.len() as u32;
            // A node that drifted out of its indexed bin must not push itself.
            if indexed == Some(key) {
                members -= 1;
            }
            let connected = bin.connections_to(node);
            let unconnected = members.saturating_sub(connected);
            if connected == 0 && unconnected == 0 {
                continue;
            }
            total += bin_force(
                &self.params,
                here,
                key.origin(bin_size),
                connected,
                unconnected,
            );
        }
        total
    }
}
