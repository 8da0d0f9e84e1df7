pub mod config;
pub mod constants;
pub mod fitness;
pub mod history;
pub mod particle;
pub mod rng;
pub mod swarm;
pub mod trace;
pub mod vector;
pub mod velocity;

pub use constants::AXIS_WEIGHTS;
pub use trace::{RunSummary, TickMetrics, TickTrace};
