//! Owned copies of layout output, taken between steps.

use edamame_core::Vec2;
use edamame_graph::Graph;

/// Node positions captured after a completed step.
///
/// Holds `(name, position, radius)` per node in insertion order. Being an
/// owned copy, a snapshot can cross threads and outlive the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionSnapshot {
    /// Steps completed in the run when the snapshot was taken.
    pub step: u64,
    /// `(name, position, radius)` per node.
    pub positions: Vec<(String, Vec2, f32)>,
}

impl PositionSnapshot {
    /// Copy the current positions out of `graph`.
    pub fn capture(graph: &Graph, step: u64) -> Self {
        let positions = graph
            .nodes()
            .map(|node| (node.name.to_owned(), node.position, node.radius))
            .collect();
        Self { step, positions }
    }

    /// Number of nodes captured.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no nodes were captured.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of the node called `name`, if captured.
    pub fn position(&self, name: &str) -> Option<Vec2> {
        self.positions
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|&(_, p, _)| p)
    }

    /// Mean of all captured positions, or `None` for an empty snapshot.
    pub fn center_of_mass(&self) -> Option<Vec2> {
        if self.positions.is_empty() {
            return None;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vec2::ZERO, |acc, &(_, p, _)| acc + p);
        Some(sum * (1.0 / self.positions.len() as f64))
    }

    /// Positions relative to the centre of mass, as drawn by exporters.
    pub fn recentered(&self) -> Vec<(String, Vec2, f32)> {
        let center = self.center_of_mass().unwrap_or(Vec2::ZERO);
        self.positions
            .iter()
            .map(|(name, p, r)| (name.clone(), *p - center, *r))
            .collect()
    }
}
