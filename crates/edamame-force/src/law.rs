//! The pair and bin force laws.

use edamame_core::Vec2;

/// Floor applied to separations before computing repulsion.
///
/// Coincident or near-coincident unconnected nodes would otherwise see an
/// unbounded push. Spring forces use the true distance.
pub const MIN_DISTANCE: f64 = 1.0;

/// Coefficients of the force law, supplied per layout run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    /// Spring stiffness `k` for connected pairs.
    pub spring_constant: f64,
    /// Rest length at which a spring exerts no force.
    pub equilibrium_distance: f64,
    /// Inverse-square repulsion coefficient for unconnected pairs.
    pub repulsion: f64,
}

impl ForceParams {
    /// Spring magnitude at separation `r`: positive pulls together.
    #[inline]
    fn spring(&self, r: f64) -> f64 {
        self.spring_constant * (r - self.equilibrium_distance)
    }

    /// Repulsion magnitude at separation `r`: always negative (pushes apart).
    #[inline]
    fn push(&self, r: f64) -> f64 {
        let r = r.max(MIN_DISTANCE);
        -self.repulsion / (r * r)
    }
}

/// Force on a node at `from` due to a node at `to`.
///
/// The magnitude acts along the angle from `from` to `to`, so positive
/// values attract and negative values repel. Coincident points resolve to
/// the `+x` direction (`atan2(0, 0) = 0`).
#[inline]
pub fn pair_force(params: &ForceParams, from: Vec2, to: Vec2, connected: bool) -> Vec2 {
    let delta = to - from;
    let r = delta.length();
    let f = if connected {
        params.spring(r)
    } else {
        params.push(r)
    };
    Vec2::from_angle(delta.angle()) * f
}

/// Force on a node at `from` due to a whole bin concentrated at `origin`.
///
/// `connected` members pull as springs and `unconnected` members push,
/// all evaluated once at the bin-level distance.
#[inline]
pub fn bin_force(
    params: &ForceParams,
    from: Vec2,
    origin: Vec2,
    connected: u32,
    unconnected: u32,
) -> Vec2 {
    let delta = origin - from;
    let r = delta.length();
    let f = f64::from(connected) * params.spring(r) + f64::from(unconnected) * params.push(r);
    Vec2::from_angle(delta.angle()) * f
}
