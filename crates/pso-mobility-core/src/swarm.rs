use crate::config::{CoefficientMode, SwarmConfig, SwarmConfigError};
use crate::constants::{MAX_RUN_SAMPLES, MAX_RUN_TICKS};
use crate::history::FitnessHistory;
use crate::particle::Particle;
use crate::rng;
use crate::trace::{collect_tick_metrics, RunSummary, TickMetrics, TickTrace, SCHEMA_VERSION};
use crate::vector::Vec3;
use crate::velocity::PsoParams;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::collections::HashSet;

/// State shared by every particle of one swarm: the sought target and
/// the fitness history all particles report into.
///
/// A `SwarmState` is owned by its [`Swarm`] and lent mutably to one
/// particle update at a time, so recordings serialize by construction
/// and two swarms can never observe each other.
#[derive(Clone, Debug)]
pub struct SwarmState {
    target: Vec3,
    history: FitnessHistory,
}

impl SwarmState {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            history: FitnessHistory::new(),
        }
    }

    /// Shared state whose history keeps at most `capacity` entries
    /// (0 = unbounded).
    pub fn with_history_capacity(target: Vec3, capacity: usize) -> Self {
        Self {
            target,
            history: FitnessHistory::with_capacity_limit(capacity),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Record one observation and return the swarm-wide best position
    /// now on record.
    pub fn record(&mut self, fitness: f64, position: Vec3) -> Vec3 {
        self.history.record(fitness, position)
    }

    /// `None` until the first observation is recorded.
    pub fn best_position(&self) -> Option<Vec3> {
        self.history.best().map(|(_, position)| position)
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.history.best().map(|(fitness, _)| fitness)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwarmInitError {
    Config(SwarmConfigError),
    ParticleCountMismatch { expected: usize, actual: usize },
    DuplicateParticleId { id: u32 },
    NonFiniteParticleState { id: u32 },
}

impl std::fmt::Display for SwarmInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwarmInitError::Config(err) => write!(f, "invalid config: {err}"),
            SwarmInitError::ParticleCountMismatch { expected, actual } => write!(
                f,
                "particle count ({actual}) must match num_particles ({expected})"
            ),
            SwarmInitError::DuplicateParticleId { id } => {
                write!(f, "particle id {id} appears more than once")
            }
            SwarmInitError::NonFiniteParticleState { id } => {
                write!(f, "particle {id} has a non-finite position or velocity")
            }
        }
    }
}

impl std::error::Error for SwarmInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwarmInitError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SwarmConfigError> for SwarmInitError {
    fn from(err: SwarmConfigError) -> Self {
        SwarmInitError::Config(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidSampleEvery,
    TooManyTicks { max: u64, actual: u64 },
    TooManySamples { max: usize, actual: usize },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::InvalidSampleEvery => write!(f, "sample_every must be greater than 0"),
            RunError::TooManyTicks { max, actual } => {
                write!(f, "tick count ({actual}) exceeds supported maximum ({max})")
            }
            RunError::TooManySamples { max, actual } => {
                write!(f, "sample count ({actual}) exceeds supported maximum ({max})")
            }
        }
    }
}

impl std::error::Error for RunError {}

/// A swarm of particles plus everything their updates need: the shared
/// state, the configuration, the current inertia weight, and the RNG
/// that backs resampled coefficients.
///
/// Updates run strictly sequentially in particle order, so within a
/// tick the first particle's recording is visible to the second. All
/// state lives in the instance; independent swarms never interact.
pub struct Swarm {
    pub particles: Vec<Particle>,
    shared: SwarmState,
    config: SwarmConfig,
    tick: u64,
    inertia_weight: f64,
    rng: ChaCha12Rng,
}

impl Swarm {
    /// Build a swarm from pre-placed particles and a validated config.
    ///
    /// The config's history capacity is applied to every particle and
    /// to the shared history. Particle ids must be unique; hosts use
    /// them to correlate tick records with their own entities. Initial
    /// positions and velocities must be finite.
    pub fn new(mut particles: Vec<Particle>, config: SwarmConfig) -> Result<Self, SwarmInitError> {
        config.validate()?;
        if particles.len() != config.num_particles {
            return Err(SwarmInitError::ParticleCountMismatch {
                expected: config.num_particles,
                actual: particles.len(),
            });
        }
        let mut seen = HashSet::new();
        for particle in &particles {
            if !particle.position.is_finite() || !particle.velocity.is_finite() {
                return Err(SwarmInitError::NonFiniteParticleState { id: particle.id });
            }
            if !seen.insert(particle.id) {
                return Err(SwarmInitError::DuplicateParticleId { id: particle.id });
            }
        }

        for particle in &mut particles {
            particle.set_history_capacity(config.history_capacity);
        }
        let shared = SwarmState::with_history_capacity(config.target, config.history_capacity);
        let rng = rng::create_rng(config.seed);
        let inertia_weight = config.inertia_weight;
        Ok(Self {
            particles,
            shared,
            config,
            tick: 0,
            inertia_weight,
            rng,
        })
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Number of the next tick to execute (0 before the first step).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Inertia weight the next tick will use.
    pub fn inertia_weight(&self) -> f64 {
        self.inertia_weight
    }

    pub fn target(&self) -> Vec3 {
        self.shared.target()
    }

    pub fn shared(&self) -> &SwarmState {
        &self.shared
    }

    pub fn best_position(&self) -> Option<Vec3> {
        self.shared.best_position()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.shared.best_fitness()
    }

    pub fn shared_history_len(&self) -> usize {
        self.shared.history_len()
    }

    pub fn converged_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_converged()).count()
    }

    /// Execute one tick: update every particle in index order, then
    /// apply inertia decay if enabled, then advance the tick counter.
    ///
    /// Returns one record per particle that actually updated; converged
    /// particles contribute nothing. In `ResampledPerTick` mode each
    /// particle gets its own fresh r1/r2 pair, drawn in update order
    /// from the swarm RNG so runs stay reproducible.
    pub fn step(&mut self) -> Vec<TickTrace> {
        let mut traces = Vec::with_capacity(self.particles.len());
        let tolerance = self.config.convergence_tolerance;
        for particle in &mut self.particles {
            let (r1, r2) = match self.config.coefficient_mode {
                CoefficientMode::Fixed => {
                    (self.config.random_component1, self.config.random_component2)
                }
                CoefficientMode::ResampledPerTick => {
                    (self.rng.random::<f64>(), self.rng.random::<f64>())
                }
            };
            let params = PsoParams {
                inertia_weight: self.inertia_weight,
                individual_component: self.config.individual_component,
                group_component: self.config.group_component,
                random_component1: r1,
                random_component2: r2,
            };
            if let Some(trace) = particle.update(self.tick, &mut self.shared, &params, tolerance) {
                traces.push(trace);
            }
        }
        if self.config.inertia_decay {
            self.inertia_weight = (self.inertia_weight - self.config.inertia_decrement())
                .max(self.config.inertia_floor);
        }
        self.tick += 1;
        traces
    }

    /// Validate run parameters against the guard rails and return the
    /// number of samples the run will collect.
    ///
    /// Used by [`Swarm::run`] and by hosts that drive [`Swarm::step`]
    /// in their own loop; both get the same rejections.
    pub fn check_run_bounds(ticks: u64, sample_every: u64) -> Result<usize, RunError> {
        if sample_every == 0 {
            return Err(RunError::InvalidSampleEvery);
        }
        if ticks > MAX_RUN_TICKS {
            return Err(RunError::TooManyTicks {
                max: MAX_RUN_TICKS,
                actual: ticks,
            });
        }
        let expected_samples = if ticks == 0 {
            0
        } else {
            (((ticks - 1) / sample_every) + 1) as usize
        };
        if expected_samples > MAX_RUN_SAMPLES {
            return Err(RunError::TooManySamples {
                max: MAX_RUN_SAMPLES,
                actual: expected_samples,
            });
        }
        Ok(expected_samples)
    }

    /// Execute `ticks` ticks and aggregate metrics every `sample_every`
    /// ticks, returning the end-of-run summary. The final tick is always
    /// sampled, so the summary ends with the terminal metrics even when
    /// `ticks` is not a multiple of `sample_every`. Guard rails reject
    /// parameter combinations that would loop or allocate excessively.
    pub fn run(&mut self, ticks: u64, sample_every: u64) -> Result<RunSummary, RunError> {
        let expected_samples = Self::check_run_bounds(ticks, sample_every)?;

        let mut samples: Vec<TickMetrics> = Vec::with_capacity(expected_samples);
        for done in 1..=ticks {
            let executed = self.tick;
            self.step();
            if done % sample_every == 0 || done == ticks {
                samples.push(collect_tick_metrics(executed, &self.particles, &self.shared));
            }
        }

        Ok(RunSummary {
            schema_version: SCHEMA_VERSION,
            ticks,
            sample_every,
            final_best_fitness: self.shared.best_fitness(),
            final_best_position: self.shared.best_position(),
            converged_count: self.converged_count(),
            samples,
        })
    }
}
