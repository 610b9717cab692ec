use anyhow::{Context, Result};
use clap::Parser;
use formica_lib::app::{self, App};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Override the world seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Pace frames at the configured target fps instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        let level = if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        formica_core::init_logging(level);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = app::load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    let mut app = App::new(config).context("building simulation")?;
    if args.realtime {
        app.run_realtime(args.frames).await;
    } else {
        app.run_frames(args.frames);
    }

    let summary = app.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Simulated {:.2}s over {} frames: {} heading passes, {} pheromone cycles.",
            summary.simulated_seconds,
            summary.frames,
            summary.heading_passes,
            summary.pheromone_cycles
        );
        println!(
            "Field: total {:.3}, max {:.3}, {} marked cells. Avg frame {}us, wall time {:.2}s.",
            summary.field.total,
            summary.field.max,
            summary.field.nonzero_cells,
            summary.avg_frame_us,
            summary.wall_seconds
        );
    }

    Ok(())
}
