use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pso_mobility_core::config::SwarmConfig;
use pso_mobility_core::particle::Particle;
use pso_mobility_core::rng::derive_particle_rng;
use pso_mobility_core::swarm::Swarm;
use pso_mobility_core::trace::{collect_tick_metrics, RunSummary, SCHEMA_VERSION};
use pso_mobility_core::vector::Vec3;
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pso-mobility")]
#[command(about = "PSO swarm mobility runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a swarm simulation from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of ticks to run (default: the config's total_ticks)
        #[arg(long)]
        ticks: Option<u64>,

        /// Collect aggregate metrics every N ticks
        #[arg(long, default_value_t = 1)]
        sample_every: u64,

        /// Write per-particle tick records to this file (JSON lines)
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

/// Scatter particles uniformly inside the configured position box with
/// uniform initial velocities, one derived RNG stream per particle so
/// swarm size changes never reshuffle earlier particles.
fn create_particles(config: &SwarmConfig) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(config.num_particles);
    for index in 0..config.num_particles {
        let mut rng = derive_particle_rng(config.seed, index);
        let position = Vec3::new(
            rng.random_range(config.position_min..=config.position_max),
            rng.random_range(config.position_min..=config.position_max),
            rng.random_range(config.position_min..=config.position_max),
        );
        let velocity = Vec3::new(
            rng.random_range(config.velocity_min..=config.velocity_max),
            rng.random_range(config.velocity_min..=config.velocity_max),
            rng.random_range(config.velocity_min..=config.velocity_max),
        );
        particles.push(Particle::new(index as u32, position, velocity));
    }
    particles
}

fn run_swarm(
    config_path: PathBuf,
    out: Option<PathBuf>,
    ticks: Option<u64>,
    sample_every: u64,
    trace: Option<PathBuf>,
) -> Result<()> {
    let file = File::open(&config_path).context("failed to open config file")?;
    let reader = BufReader::new(file);
    let swarm_config: SwarmConfig =
        serde_json::from_reader(reader).context("failed to parse config")?;

    swarm_config.validate().context("Config validation error")?;

    let ticks = ticks.unwrap_or(swarm_config.total_ticks);
    // Same rejections whether the run is traced here or driven by run().
    let expected_samples =
        Swarm::check_run_bounds(ticks, sample_every).context("invalid run parameters")?;

    println!("Loaded config from {:?}", config_path);
    println!(
        "Seeking {} with {} particles for {} ticks...",
        swarm_config.target, swarm_config.num_particles, ticks
    );

    let particles = create_particles(&swarm_config);
    let mut swarm =
        Swarm::new(particles, swarm_config).context("failed to initialize swarm")?;

    let summary = match trace {
        Some(trace_path) => {
            let file = File::create(&trace_path).context("failed to create trace file")?;
            let mut writer = BufWriter::new(file);
            let mut samples = Vec::with_capacity(expected_samples);
            for done in 1..=ticks {
                let executed = swarm.tick();
                for record in swarm.step() {
                    serde_json::to_writer(&mut writer, &record)
                        .context("failed to write trace record")?;
                    writer
                        .write_all(b"\n")
                        .context("failed to write trace record")?;
                }
                if done % sample_every == 0 || done == ticks {
                    samples.push(collect_tick_metrics(
                        executed,
                        &swarm.particles,
                        swarm.shared(),
                    ));
                }
            }
            writer.flush().context("failed to flush trace file")?;
            println!("Trace written to {:?}", trace_path);
            RunSummary {
                schema_version: SCHEMA_VERSION,
                ticks,
                sample_every,
                final_best_fitness: swarm.best_fitness(),
                final_best_position: swarm.best_position(),
                converged_count: swarm.converged_count(),
                samples,
            }
        }
        None => swarm.run(ticks, sample_every).context("run failed")?,
    };

    println!("Run complete after {} ticks", summary.ticks);
    match (summary.final_best_fitness, summary.final_best_position) {
        (Some(fitness), Some(position)) => {
            println!("Best fitness {fitness:.6} at {position}");
        }
        _ => println!("No updates were recorded"),
    }
    println!(
        "Converged: {}/{}",
        summary.converged_count,
        swarm.particles.len()
    );

    if let Some(out_dir) = out {
        std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
        let summary_path = out_dir.join("summary.json");
        let file = File::create(summary_path).context("failed to create summary file")?;
        serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
        println!("Results saved to {:?}", out_dir);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SwarmConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            out,
            ticks,
            sample_every,
            trace,
        } => {
            run_swarm(config, out, ticks, sample_every, trace)?;
        }
    }
    Ok(())
}
