use crate::particle::Particle;
use crate::swarm::SwarmState;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Version stamp for serialized summaries, so later readers can detect
/// incompatible layouts.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One particle's observable output for one tick.
///
/// `position` is the post-step position while `fitness` was evaluated
/// at the pre-step position that led to it; consumers comparing the
/// two see the step that the fitness value triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickTrace {
    pub tick: u64,
    pub particle_id: u32,
    pub position: Vec3,
    pub fitness: f64,
    pub target: Vec3,
    /// Swarm-wide best position as seen by this particle's update.
    pub swarm_best: Vec3,
}

/// Aggregated swarm state sampled at one tick.
///
/// The `Option` fields are `None` until at least one update has been
/// recorded, e.g. when every particle converged before the sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMetrics {
    pub tick: u64,
    pub swarm_best_fitness: Option<f64>,
    pub swarm_best_position: Option<Vec3>,
    /// Mean of the per-particle personal-best fitness values.
    pub mean_personal_best: Option<f64>,
    pub active_count: usize,
    pub converged_count: usize,
    pub shared_history_len: usize,
}

/// End-of-run report produced by [`crate::swarm::Swarm::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Ticks actually executed.
    pub ticks: u64,
    pub sample_every: u64,
    pub final_best_fitness: Option<f64>,
    pub final_best_position: Option<Vec3>,
    pub converged_count: usize,
    pub samples: Vec<TickMetrics>,
}

/// Aggregate the swarm's current state into a [`TickMetrics`] sample.
pub fn collect_tick_metrics(tick: u64, particles: &[Particle], shared: &SwarmState) -> TickMetrics {
    let converged_count = particles.iter().filter(|p| p.is_converged()).count();
    let personal_bests: Vec<f64> = particles
        .iter()
        .filter_map(Particle::personal_best_fitness)
        .collect();
    let mean_personal_best = if personal_bests.is_empty() {
        None
    } else {
        Some(personal_bests.iter().sum::<f64>() / personal_bests.len() as f64)
    };
    TickMetrics {
        tick,
        swarm_best_fitness: shared.best_fitness(),
        swarm_best_position: shared.best_position(),
        mean_personal_best,
        active_count: particles.len() - converged_count,
        converged_count,
        shared_history_len: shared.history_len(),
    }
}
