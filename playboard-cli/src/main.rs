//! # Playboard CLI
//!
//! Replays a scripted editor session without a browser.

use clap::Parser;
use playboard_cli::{CliArgs, RunConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playboard_cli=info,playboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = RunConfig::from(args);

    let steps = config.steps()?;
    tracing::info!("Loaded {} script steps", steps.len());

    let mut runner = config.runner()?;
    runner.run(&steps)?;

    if config.play {
        let ticks = runner.play_to_end()?;
        tracing::info!("Playback finished after {} ticks", ticks);
    }

    println!("{}", runner.summary());

    if config.dump_scene {
        println!("{}", serde_json::to_string_pretty(runner.editor().scene())?);
    }

    Ok(())
}
