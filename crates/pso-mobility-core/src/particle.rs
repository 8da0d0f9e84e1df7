use crate::fitness;
use crate::history::FitnessHistory;
use crate::swarm::SwarmState;
use crate::trace::TickTrace;
use crate::vector::Vec3;
use crate::velocity::{self, PsoParams};

/// Lifecycle of a particle. `Converged` is terminal: a converged
/// particle never records, never moves, and never resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    Active,
    Converged,
}

/// One mobile node steering toward the swarm's target.
///
/// `position` and `velocity` are public so hosts can read them between
/// ticks for their own bookkeeping (e.g. feeding positions to a radio
/// propagation model). The fitness history stays private; it is only
/// written through [`Particle::update`].
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    state: ParticleState,
    history: FitnessHistory,
}

impl Particle {
    pub fn new(id: u32, position: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            position,
            velocity,
            state: ParticleState::Active,
            history: FitnessHistory::new(),
        }
    }

    pub fn state(&self) -> ParticleState {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == ParticleState::Converged
    }

    /// Best position this particle has ever recorded, or `None` before
    /// its first update.
    pub fn personal_best(&self) -> Option<Vec3> {
        self.history.best().map(|(_, position)| position)
    }

    pub fn personal_best_fitness(&self) -> Option<f64> {
        self.history.best().map(|(fitness, _)| fitness)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Limit how many entries the personal history retains (0 =
    /// unbounded). Applies to future updates.
    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history.set_capacity_limit(capacity);
    }

    /// Advance this particle by one tick.
    ///
    /// The convergence check runs first, before any mutation: if the
    /// position lies within `convergence_tolerance` of the target on
    /// every axis (exact equality when the tolerance is 0.0), the
    /// particle flips to `Converged` and the tick is a no-op. Otherwise
    /// the update evaluates fitness at the current position, records it
    /// in both the personal and the shared history, recomputes the
    /// velocity from the two bests, and steps the position by the new
    /// velocity.
    ///
    /// Returns the tick's observable record, or `None` when the
    /// particle is (or just became) converged. Hosts detect completion
    /// by polling [`Particle::is_converged`]; there is no other signal.
    pub fn update(
        &mut self,
        tick: u64,
        shared: &mut SwarmState,
        params: &PsoParams,
        convergence_tolerance: f64,
    ) -> Option<TickTrace> {
        if self.state == ParticleState::Converged {
            return None;
        }
        if self.position.within(shared.target(), convergence_tolerance) {
            self.state = ParticleState::Converged;
            return None;
        }

        let fitness = fitness::evaluate(self.position, shared.target());
        let personal_best = self.history.record(fitness, self.position);
        let swarm_best = shared.record(fitness, self.position);

        self.velocity = velocity::compute_velocity(
            self.velocity,
            self.position,
            personal_best,
            swarm_best,
            params,
        );
        self.position += self.velocity;

        Some(TickTrace {
            tick,
            particle_id: self.id,
            position: self.position,
            fitness,
            target: shared.target(),
            swarm_best,
        })
    }
}
