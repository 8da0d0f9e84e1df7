use crate::constants::RNG_DERIVATION_PRIME;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive an independent RNG stream for the particle at `particle_index`.
///
/// Streams depend only on the base seed and the index, so adding or
/// removing particles never perturbs the draws of the ones that remain.
pub fn derive_particle_rng(base_seed: u64, particle_index: usize) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed.wrapping_add(particle_index as u64 * RNG_DERIVATION_PRIME),
    )
}
