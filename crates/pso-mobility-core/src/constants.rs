/// Per-axis weights of the fitness function, in x/y/z order.
///
/// The weights make the fitness surface an asymmetric paraboloid: a
/// deviation along z costs three times as much as the same deviation
/// along x, so swarms close the z gap fastest.
pub const AXIS_WEIGHTS: [f64; 3] = [10.0, 20.0, 30.0];

/// Prime multiplier used when deriving per-particle RNG streams from a
/// base seed, keeping the streams well separated.
pub const RNG_DERIVATION_PRIME: u64 = 7919;

/// Upper bound on swarm size accepted by configuration validation.
pub const MAX_PARTICLES: usize = 100_000;

/// Upper bound on the tick count a single run may execute.
pub const MAX_RUN_TICKS: u64 = 1_000_000;

/// Upper bound on the number of metric samples a single run may collect.
pub const MAX_RUN_SAMPLES: usize = 50_000;
