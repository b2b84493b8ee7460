//! The [`ForceModel`] trait.

use edamame_core::{NodeId, Vec2};

/// Computes the net force on one node from a frozen position array.
///
/// # Contract
///
/// - `net_force()` MUST be deterministic: identical positions give
///   bit-identical output.
/// - Implementations only read shared state, so one model instance is
///   shared by every worker of a force phase (`Sync`).
pub trait ForceModel: Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Net force on `node` given every node's current position.
    fn net_force(&self, node: NodeId, positions: &[Vec2]) -> Vec2;
}
