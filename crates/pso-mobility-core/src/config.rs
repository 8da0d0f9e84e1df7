use crate::constants::{MAX_PARTICLES, MAX_RUN_TICKS};
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// How the random velocity coefficients r1/r2 are chosen each update.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientMode {
    /// Use `random_component1`/`random_component2` verbatim every tick.
    /// With both at 0.5 the cognitive and social pulls reduce to fixed
    /// half-strength attraction and runs are fully deterministic.
    #[default]
    Fixed,
    /// Draw fresh uniform(0, 1) scalars per particle per tick from the
    /// swarm's seeded RNG; the configured values are ignored.
    ResampledPerTick,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Deterministic seed for reproducible runs.
    pub seed: u64,
    /// Number of particles in the swarm. Must match the particles handed
    /// to `Swarm::new`.
    pub num_particles: usize,
    /// Position the swarm seeks; fitness is zero exactly there.
    pub target: Vec3,
    /// Default tick count for a full run.
    pub total_ticks: u64,
    /// Inertia weight w applied to the previous velocity.
    pub inertia_weight: f64,
    /// Lowest value inertia decay may reach.
    pub inertia_floor: f64,
    /// When true, inertia decreases linearly each tick from
    /// `inertia_weight` toward `inertia_floor` over `total_ticks`.
    pub inertia_decay: bool,
    /// Cognitive coefficient c1 (pull toward the personal best).
    pub individual_component: f64,
    /// Social coefficient c2 (pull toward the swarm best).
    pub group_component: f64,
    /// Random scalar r1 used in `CoefficientMode::Fixed`.
    pub random_component1: f64,
    /// Random scalar r2 used in `CoefficientMode::Fixed`.
    pub random_component2: f64,
    /// Fixed or per-tick-resampled random coefficients.
    pub coefficient_mode: CoefficientMode,
    /// Lower bound for initial per-axis velocities drawn by hosts.
    pub velocity_min: f64,
    /// Upper bound for initial per-axis velocities drawn by hosts.
    pub velocity_max: f64,
    /// Lower bound for initial per-axis positions drawn by hosts.
    pub position_min: f64,
    /// Upper bound for initial per-axis positions drawn by hosts.
    pub position_max: f64,
    /// Maximum entries kept per fitness history (0 = unbounded).
    pub history_capacity: usize,
    /// Per-axis distance from the target below which a particle counts
    /// as converged. 0.0 requires exact equality.
    pub convergence_tolerance: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_particles: 10,
            target: Vec3::new(55.0, 25.0, 15.0),
            total_ticks: 200,
            inertia_weight: 0.9,
            inertia_floor: 0.4,
            inertia_decay: false,
            individual_component: 2.0,
            group_component: 2.0,
            random_component1: 0.5,
            random_component2: 0.5,
            coefficient_mode: CoefficientMode::Fixed,
            velocity_min: -10.0,
            velocity_max: 10.0,
            position_min: 0.0,
            position_max: 100.0,
            history_capacity: 0,
            convergence_tolerance: 0.0,
        }
    }
}

macro_rules! define_swarm_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SwarmConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SwarmConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_swarm_config_error! {
    InvalidNumParticles => "num_particles must be greater than 0";
    TooManyParticles { max: usize, actual: usize } => "Too many particles: {} > max {}", actual, max;
    InvalidTotalTicks => "total_ticks must be greater than 0";
    TotalTicksTooLarge { max: u64, actual: u64 } => "total_ticks ({actual}) exceeds supported maximum ({max})";
    InvalidTarget => "target components must be finite";
    InvalidInertiaWeight => "inertia_weight must be finite and non-negative";
    InvalidInertiaFloor => "inertia_floor must be finite, non-negative, and at most inertia_weight";
    InvalidIndividualComponent => "individual_component must be finite and non-negative";
    InvalidGroupComponent => "group_component must be finite and non-negative";
    InvalidRandomComponent1 => "random_component1 must be finite and non-negative";
    InvalidRandomComponent2 => "random_component2 must be finite and non-negative";
    InvalidVelocityBounds => "velocity_min/velocity_max must be finite and ordered";
    InvalidPositionBounds => "position_min/position_max must be finite and ordered";
    InvalidConvergenceTolerance => "convergence_tolerance must be finite and non-negative";
}

impl std::error::Error for SwarmConfigError {}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), SwarmConfigError> {
        self.validate_swarm_shape()?;
        self.validate_target()?;
        self.validate_coefficients()?;
        self.validate_initial_bounds()?;
        self.validate_convergence()?;
        Ok(())
    }

    /// Per-tick inertia reduction when `inertia_decay` is on. Derived
    /// so a full run of `total_ticks` lands exactly on the floor.
    pub fn inertia_decrement(&self) -> f64 {
        (self.inertia_weight - self.inertia_floor) / self.total_ticks as f64
    }

    fn validate_swarm_shape(&self) -> Result<(), SwarmConfigError> {
        if self.num_particles == 0 {
            return Err(SwarmConfigError::InvalidNumParticles);
        }
        if self.num_particles > MAX_PARTICLES {
            return Err(SwarmConfigError::TooManyParticles {
                max: MAX_PARTICLES,
                actual: self.num_particles,
            });
        }
        if self.total_ticks == 0 {
            return Err(SwarmConfigError::InvalidTotalTicks);
        }
        if self.total_ticks > MAX_RUN_TICKS {
            return Err(SwarmConfigError::TotalTicksTooLarge {
                max: MAX_RUN_TICKS,
                actual: self.total_ticks,
            });
        }
        Ok(())
    }

    fn validate_target(&self) -> Result<(), SwarmConfigError> {
        if !self.target.is_finite() {
            return Err(SwarmConfigError::InvalidTarget);
        }
        Ok(())
    }

    fn validate_coefficients(&self) -> Result<(), SwarmConfigError> {
        if !(self.inertia_weight.is_finite() && self.inertia_weight >= 0.0) {
            return Err(SwarmConfigError::InvalidInertiaWeight);
        }
        if !(self.inertia_floor.is_finite()
            && self.inertia_floor >= 0.0
            && self.inertia_floor <= self.inertia_weight)
        {
            return Err(SwarmConfigError::InvalidInertiaFloor);
        }
        if !(self.individual_component.is_finite() && self.individual_component >= 0.0) {
            return Err(SwarmConfigError::InvalidIndividualComponent);
        }
        if !(self.group_component.is_finite() && self.group_component >= 0.0) {
            return Err(SwarmConfigError::InvalidGroupComponent);
        }
        if !(self.random_component1.is_finite() && self.random_component1 >= 0.0) {
            return Err(SwarmConfigError::InvalidRandomComponent1);
        }
        if !(self.random_component2.is_finite() && self.random_component2 >= 0.0) {
            return Err(SwarmConfigError::InvalidRandomComponent2);
        }
        Ok(())
    }

    fn validate_initial_bounds(&self) -> Result<(), SwarmConfigError> {
        if !(self.velocity_min.is_finite()
            && self.velocity_max.is_finite()
            && self.velocity_min <= self.velocity_max)
        {
            return Err(SwarmConfigError::InvalidVelocityBounds);
        }
        if !(self.position_min.is_finite()
            && self.position_max.is_finite()
            && self.position_min <= self.position_max)
        {
            return Err(SwarmConfigError::InvalidPositionBounds);
        }
        Ok(())
    }

    fn validate_convergence(&self) -> Result<(), SwarmConfigError> {
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance >= 0.0) {
            return Err(SwarmConfigError::InvalidConvergenceTolerance);
        }
        Ok(())
    }
}
