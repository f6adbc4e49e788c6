//! Parkour - headless first-person locomotion demo
//!
//! Runs the wall-running controller over a small course from a scripted
//! input track and logs what it did.

mod course;
mod demo;
mod script;
mod settings;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::GameSettings;

fn main() -> Result<()> {
    // Settings pick the log level, so loading logs through a temporary subscriber
    let bootstrap = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    let settings = tracing::subscriber::with_default(bootstrap, GameSettings::load);

    // RUST_LOG overrides the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.log_level()).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting parkour demo...");

    let summary = demo::run(&settings).context("Demo run failed")?;

    info!(
        "Finished after {} fixed steps: {} landings, {} jumps, {} double jumps, {} wall runs, {} wall jumps",
        summary.fixed_steps,
        summary.landings,
        summary.jumps,
        summary.double_jumps,
        summary.wall_runs,
        summary.wall_jumps,
    );
    info!(
        "Final position ({:.2}, {:.2}, {:.2}), turbo {:.0}, aerial brakes {}",
        summary.final_position.x,
        summary.final_position.y,
        summary.final_position.z,
        summary.turbo_points,
        summary.aerial_brakes,
    );

    if settings.demo.save_on_exit {
        settings.save().context("Failed to save settings")?;
    }

    Ok(())
}
