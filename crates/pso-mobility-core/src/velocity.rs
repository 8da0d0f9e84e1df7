use crate::vector::Vec3;

/// Coefficients for one velocity update.
///
/// `random_component1` and `random_component2` are already-resolved
/// scalars: in fixed mode they are the configured constants, in
/// resampled mode the caller draws fresh uniform(0, 1) values before
/// each update. Holding plain scalars keeps the rule itself free of
/// any RNG.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PsoParams {
    /// Inertia weight w applied to the current velocity.
    pub inertia_weight: f64,
    /// Cognitive coefficient c1, scaling the pull toward the personal best.
    pub individual_component: f64,
    /// Social coefficient c2, scaling the pull toward the swarm best.
    pub group_component: f64,
    /// Random scalar r1 paired with the cognitive term.
    pub random_component1: f64,
    /// Random scalar r2 paired with the social term.
    pub random_component2: f64,
}

/// Blend inertia, personal attraction, and group attraction into the
/// next velocity, independently per axis:
///
/// `w * v + c1 * r1 * (personal_best - position) + c2 * r2 * (swarm_best - position)`
///
/// No clamping is applied; hosts that need bounded speeds limit the
/// initial velocities they hand out instead.
pub fn compute_velocity(
    current: Vec3,
    position: Vec3,
    personal_best: Vec3,
    swarm_best: Vec3,
    params: &PsoParams,
) -> Vec3 {
    let inertia = current * params.inertia_weight;
    let cognitive =
        (personal_best - position) * (params.individual_component * params.random_component1);
    let social = (swarm_best - position) * (params.group_component * params.random_component2);
    inertia + cognitive + social
}
