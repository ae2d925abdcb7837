//! Kinetic CLI - headless driver for animation scenes
//!
//! Plays animation trees described in TOML scene files against a simulated
//! (or real) clock and prints the animated properties frame by frame.

mod config;
mod curve;
mod run;
mod scene;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use kinetic_animation::interpolator::{DEFAULT_OVERFLOW, DEFAULT_POWER};
use kinetic_animation::{Interpolator, Time};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;
use crate::run::RunOptions;
use crate::scene::Scene;

/// Headless driver for Kinetic animation scenes
#[derive(Parser, Debug)]
#[command(name = "kinetic")]
#[command(about = "Play Kinetic animation scenes and inspect interpolators")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scene file
    Run {
        /// Path to the scene (.toml)
        scene: PathBuf,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Play the built-in six-bar demo scene
    Demo {
        #[command(flatten)]
        playback: PlaybackArgs,

        /// Print the demo scene as TOML instead of playing it
        #[arg(long)]
        print: bool,
    },

    /// Print the shape of an interpolator
    Curve {
        #[arg(value_enum)]
        kind: CurveKind,

        /// Number of intervals to sample
        #[arg(short, long, default_value = "20")]
        samples: u32,

        /// Exponent for power and back curves
        #[arg(long)]
        power: Option<f64>,

        /// Overshoot for the back curve
        #[arg(long)]
        overflow: Option<f64>,

        /// Rate for the exponential curve
        #[arg(long)]
        lambda: Option<f64>,

        /// Time-reverse the curve
        #[arg(long)]
        inverse: bool,
    },
}

#[derive(clap::Args, Debug)]
struct PlaybackArgs {
    /// Milliseconds between polls (overrides the scene)
    #[arg(long, value_parser = clap::value_parser!(Time).range(1..))]
    frame_ms: Option<Time>,

    /// Stop after this many polls (overrides the scene)
    #[arg(long)]
    max_frames: Option<u64>,

    /// Pace polls against the wall clock instead of simulating time
    #[arg(long)]
    realtime: bool,
}

impl PlaybackArgs {
    fn apply(&self, mut options: RunOptions) -> RunOptions {
        if let Some(frame_ms) = self.frame_ms {
            options.frame_ms = frame_ms;
        }
        if self.max_frames.is_some() {
            options.max_frames = self.max_frames;
        }
        options.realtime = self.realtime;
        options
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CurveKind {
    Linear,
    Power,
    Back,
    Sine,
    Exponential,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run { scene, playback } => {
            let config = SceneConfig::load(&scene)?;
            play(&config, &playback)
        }
        Commands::Demo { playback, print } => {
            let config = SceneConfig::demo();
            if print {
                print!("{}", config.to_toml()?);
                return Ok(());
            }
            play(&config, &playback)
        }
        Commands::Curve {
            kind,
            samples,
            power,
            overflow,
            lambda,
            inverse,
        } => {
            let mut interpolator = match kind {
                CurveKind::Linear => Interpolator::Linear,
                CurveKind::Power => power.map_or_else(Interpolator::power, Interpolator::with_power),
                CurveKind::Back => match (overflow, power) {
                    (None, None) => Interpolator::back(),
                    (overflow, power) => Interpolator::with_back(
                        overflow.unwrap_or(DEFAULT_OVERFLOW),
                        power.unwrap_or(DEFAULT_POWER),
                    ),
                },
                CurveKind::Sine => Interpolator::Sine,
                CurveKind::Exponential => {
                    lambda.map_or_else(Interpolator::exponential, Interpolator::with_lambda)
                }
            };
            if inverse {
                interpolator = interpolator.inverse();
            }
            let stdout = io::stdout();
            let mut out = stdout.lock();
            curve::write_curve(&interpolator, samples, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn play(config: &SceneConfig, playback: &PlaybackArgs) -> Result<()> {
    let scene = Scene::build(config)?;
    let options = playback.apply(RunOptions::for_scene(&scene));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run::play(scene, &options, &mut out)?;
    out.flush()?;

    if !summary.finished {
        tracing::warn!(
            frames = summary.frames,
            "scene did not finish within the frame limit"
        );
    }
    Ok(())
}
