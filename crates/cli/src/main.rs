#![deny(unsafe_code)]
//! CLI binary for folio-fx.
//!
//! Subcommands:
//! - `render`: run the particle background N frames, write a PNG
//! - `stats`: run the particle background N frames, print motion statistics
//! - `counter`: print the texts a stat counter shows while counting up
//! - `schema`: print the particle parameter schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use folio_fx_core::{FrameLoop, Simulation, Srgb, Viewport};
use folio_fx_counter::{CounterAnimation, StatSpec};
use folio_fx_particles::{ParticleConfig, ParticleField};
use folio_fx_raster::RgbaCanvas;
use glam::DVec2;
use log::info;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "folio-fx", about = "Portfolio background and counter effects CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every command that runs the particle field.
#[derive(Args)]
struct FieldArgs {
    /// Viewport width in CSS pixels.
    #[arg(short = 'W', long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(short = 'H', long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio; values below 1 are treated as 1.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 120, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,

    /// PRNG seed for deterministic jitter, sizes and angles.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Hold the cursor at X,Y (CSS pixels) while simulating.
    #[arg(long, value_parser = parse_point)]
    cursor: Option<DVec2>,

    /// Move the cursor away after this many frames.
    #[arg(long, requires = "cursor")]
    release_after: Option<u64>,

    /// Particle parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run the particle background and write a PNG snapshot of the last frame.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Page background color; transparent when omitted.
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "background.png")]
        output: PathBuf,
    },
    /// Run the particle background and print how far the squares moved.
    Stats {
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Print every distinct text a stat shows while counting up.
    Counter {
        /// Value to count to (same rules as `data-target`).
        #[arg(long)]
        target: String,

        /// Number format; `k` abbreviates thousands.
        #[arg(long)]
        format: Option<String>,

        /// Text appended to every value.
        #[arg(long)]
        suffix: Option<String>,

        /// Frame rate used to sample the animation.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
    /// Print the particle parameter schema.
    Schema,
}

fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok(DVec2::new(coord(x)?, coord(y)?))
}

/// Builds the field and runs all but the last frame; the caller runs the
/// last one so it can paint it.
fn simulate(args: &FieldArgs) -> Result<FrameLoop<ParticleField>, CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let viewport = Viewport::new(args.width, args.height, args.dpr)?;
    let field = ParticleField::from_json(viewport, args.seed, &params)?;
    info!(
        "simulating {} cells for {} frames (seed {})",
        field.cells().len(),
        args.frames,
        args.seed
    );

    let mut frames = FrameLoop::new(field);
    frames.start();
    if let Some(at) = args.cursor {
        frames.simulation_mut().cursor_mut().pointer_move(at);
    }
    for frame in 0..args.frames - 1 {
        if args.release_after == Some(frame) {
            frames.simulation_mut().cursor_mut().leave();
        }
        frames.simulation_mut().step()?;
    }
    if args.release_after == Some(args.frames - 1) {
        frames.simulation_mut().cursor_mut().leave();
    }
    Ok(frames)
}

/// Samples the count-up at `fps` and keeps each text the first time it
/// appears, ending on the final one.
fn counter_texts(spec: StatSpec, fps: f64) -> Vec<String> {
    let anim = CounterAnimation::new(spec, 0.0);
    let step = 1000.0 / fps;
    let mut texts: Vec<String> = Vec::new();
    let mut frame = 0_u64;
    loop {
        let shown = anim.frame(frame as f64 * step);
        if texts.last() != Some(&shown.text) {
            texts.push(shown.text);
        }
        if shown.done {
            return texts;
        }
        frame += 1;
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&ParticleConfig::schema())?);
        }
        Command::Render {
            field,
            background,
            output,
        } => {
            let background = background
                .as_deref()
                .map(Srgb::from_css)
                .transpose()
                .map_err(|e| CliError::Input(format!("invalid --background: {e}")))?;

            let mut frames = simulate(&field)?;
            let mut canvas = RgbaCanvas::new(frames.simulation().viewport(), background);
            frames.tick(&mut canvas)?;
            folio_fx_raster::snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": canvas.width(),
                    "height": canvas.height(),
                    "dpr": canvas.scale(),
                    "frames": field.frames,
                    "seed": field.seed,
                    "cells": frames.simulation().cells().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} cells ({}x{} px, {} frames, seed {}) -> {}",
                    frames.simulation().cells().len(),
                    canvas.width(),
                    canvas.height(),
                    field.frames,
                    field.seed,
                    output.display()
                );
            }
        }
        Command::Stats { field } => {
            let mut frames = simulate(&field)?;
            frames.simulation_mut().step()?;
            let stats = frames.simulation().stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("cells:       {}", stats.cells);
                println!("displaced:   {}", stats.displaced);
                println!("max offset:  {:.3}", stats.max_offset);
                println!("mean offset: {:.3}", stats.mean_offset);
                println!("mean speed:  {:.3}", stats.mean_speed);
            }
        }
        Command::Counter {
            target,
            format,
            suffix,
            fps,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(CliError::Input(format!("--fps must be positive, got {fps}")));
            }
            let spec =
                StatSpec::from_attributes(Some(&target), format.as_deref(), suffix.as_deref())?;
            let duration_ms = folio_fx_counter::duration_for(spec.target);
            let target = spec.target;
            let texts = counter_texts(spec, fps);
            if cli.json {
                let info = serde_json::json!({
                    "target": target,
                    "duration_ms": duration_ms,
                    "texts": texts,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for text in &texts {
                    println!("{text}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
