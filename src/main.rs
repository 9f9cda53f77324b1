mod clock;
mod config;
mod metrics;
mod relativity;
mod report;
mod tui;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Settings};
use metrics::{Sweep, DEFAULT_MAX_BETA, DEFAULT_SAMPLES};
use relativity::{RelativisticState, StateInputs};

/// relviz - special relativity visualizer
#[derive(Parser)]
#[command(name = "relviz", about = "Explore time dilation, length contraction and relativistic energy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive TUI
    Tui,
    /// Sweep velocity, export metrics.csv and plot.png
    Metrics {
        /// Number of evenly spaced samples
        #[arg(long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
        /// Highest velocity fraction in the sweep (must be below 1)
        #[arg(long, default_value_t = DEFAULT_MAX_BETA)]
        max_beta: f64,
    },
    /// Print the readouts for a single velocity
    State {
        /// Velocity as a fraction of c, in [0, 1)
        #[arg(long)]
        beta: f64,
    },
}

/// Log file used while the TUI owns the terminal.
const LOG_FILE: &str = "relviz.log";

/// Interactive runs log to a file in the output directory; batch runs log to stderr.
fn log_file(interactive: bool, output_dir: &Path) -> Option<PathBuf> {
    interactive.then(|| output_dir.join(LOG_FILE))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn init_tracing(interactive: bool, output_dir: &Path) -> anyhow::Result<()> {
    let default_level = if interactive { "warn" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false);

    match log_file(interactive, output_dir) {
        Some(path) => builder
            .with_writer(Mutex::new(open_log(&path)?))
            .with_ansi(false)
            .init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(interactive, &cli.settings.output_dir)?;

    let config = AppConfig::try_from(cli.settings)?;
    info!(theme = ?config.theme, mass_lbs = config.mass_lbs, "relviz starting");

    match cli.command {
        Some(Commands::Tui) | None => tui::start(config)?,
        Some(Commands::Metrics { samples, max_beta }) => run_metrics(&config, samples, max_beta)?,
        Some(Commands::State { beta }) => print_state(config.inputs.at(beta))?,
    }

    Ok(())
}

fn run_metrics(config: &AppConfig, samples: usize, max_beta: f64) -> anyhow::Result<()> {
    anyhow::ensure!(samples > 0, "at least one sample is required");

    let log = metrics::collect(Sweep::new(config.inputs, max_beta, samples))?;

    std::fs::create_dir_all(&config.output_dir)?;
    let csv_path = config.output_dir.join("metrics.csv");
    let png_path = config.output_dir.join("plot.png");
    metrics::export_csv(&log, &csv_path)?;
    metrics::plot_results(&log, config.palette, &png_path)?;

    println!("✅ Metrics written to {}", csv_path.display());
    println!("✅ Plot saved to {}", png_path.display());
    Ok(())
}

fn print_state(inputs: StateInputs) -> anyhow::Result<()> {
    let state = RelativisticState::compute(inputs)?;
    for line in report::readout_lines(&state) {
        println!("{line}");
    }
    Ok(())
}
