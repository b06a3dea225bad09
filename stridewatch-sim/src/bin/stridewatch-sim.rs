use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use stridewatch_core::render_progress;
use stridewatch_sim::runner::TELEMETRY_DEPTH;
use stridewatch_sim::{random_steps, ConsoleMatrix, SimConfig, Simulation};

#[derive(Parser, Debug)]
#[command(name = "stridewatch-sim")]
#[command(about = "Run the stridewatch step detector against a synthetic walk", long_about = None)]
struct Args {
    /// JSON configuration file (detector, gait, target, duration)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated duration in seconds, overrides the config file
    #[arg(long, value_name = "SECONDS")]
    duration: Option<u64>,

    /// Stride period in milliseconds (0 = standing still)
    #[arg(long, value_name = "MS")]
    cadence: Option<u32>,

    /// Stride swing in milli-g
    #[arg(long, value_name = "MG")]
    amplitude: Option<f32>,

    /// Sensor noise standard deviation in milli-g
    #[arg(long, value_name = "MG")]
    noise: Option<f32>,

    /// Noise seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Step goal shown on the matrix
    #[arg(long)]
    target: Option<u32>,

    /// Run as fast as possible instead of in real time
    #[arg(long, default_value_t = false)]
    fast: bool,

    /// Print the run summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,

    /// Draw a random step count for the target and exit
    #[arg(long, default_value_t = false)]
    random_steps: bool,

    /// Log every credited step
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(seconds) = self.duration {
            config.duration_ms = seconds.saturating_mul(1000);
        }
        if let Some(cadence) = self.cadence {
            config.gait.cadence_ms = cadence;
        }
        if let Some(amplitude) = self.amplitude {
            config.gait.amplitude_mg = amplitude;
        }
        if let Some(noise) = self.noise {
            config.gait.noise_mg = noise;
        }
        if let Some(seed) = self.seed {
            config.gait.seed = Some(seed);
        }
        if let Some(target) = self.target {
            config.target = target;
        }

        config.validate().context("invalid command line overrides")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.sim_config()?;

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    if args.random_steps {
        let mut rng = match config.gait.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let steps = random_steps(&mut rng, config.target);
        let mut matrix = ConsoleMatrix::new(!args.fast);
        let rendered = render_progress(&mut matrix, steps as i64, config.target)?;

        println!("{} of {} steps: {:?}", steps, config.target, rendered);
        print!("{}", matrix);
        return Ok(());
    }

    let target = config.target;
    let mut sim = Simulation::new(config, !args.fast);
    let mut shown = 0;
    let summary = sim.run(|sim, event| {
        if sim.redraws() > shown {
            shown = sim.redraws();
            info!("t={:>6} ms: {} of {} steps", event.timestamp, event.step_count, target);
            if !args.json {
                print!("{}", sim.matrix());
            }
        }
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Final display:");
    print!("{}", sim.matrix());
    println!(
        "{} steps in {:.1} s ({} ticks, {} stale resets)",
        summary.steps,
        summary.duration_ms as f64 / 1000.0,
        summary.ticks,
        summary.stale_resets
    );
    match summary.accuracy() {
        Some(accuracy) => println!(
            "{} strides generated, {:.1}% counted",
            summary.expected_strides,
            accuracy * 100.0
        ),
        None => println!("No strides generated"),
    }
    if let Some(calibration) = summary.calibration {
        let window_ms = TELEMETRY_DEPTH as u64 * sim.counter().detector().sample_interval_ms() as u64;
        println!(
            "Last {:.1} s: swing {:.0} mg, threshold at {:.0}% of swing",
            window_ms as f64 / 1000.0,
            calibration.swing(),
            calibration.threshold_ratio().unwrap_or(0.0) * 100.0
        );
        if calibration.swing() < 100.0 {
            warn!("Signal swing is small; consider a lower threshold multiplier");
        }
    }

    Ok(())
}
