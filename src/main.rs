// src/main.rs - Pixscope command line entry point

use std::process;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info};

use pixscope::{
    cli::{Args, Command},
    error::{report_error, ToolkitError, ToolkitResult},
    image_source::load_image,
    Annotation, Point2D, ToolEvent, ToolKind, ToolkitConfig, Workbench,
};

/// JSON envelope for every command
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    command: &'a str,
    generated_at: DateTime<Utc>,
    version: &'static str,
    result: T,
}

#[derive(Serialize)]
struct MeasurementOutput<R: Serialize> {
    report: R,
    annotations: Vec<Annotation>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = pixscope::init_logging(args.effective_log_level()) {
        eprintln!("❌ Failed to setup logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = args.validate() {
        error!("❌ Invalid arguments: {}", e);
        eprintln!("❌ Invalid arguments: {}", e);
        process::exit(2);
    }

    match run(&args) {
        Ok(()) => debug!("✅ {} finished", args.command_name()),
        Err(e) => {
            report_error(&e);
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> ToolkitResult<()> {
    let config = ToolkitConfig::load_or_default(args.config.as_deref())?;
    info!("⚙️ Theme {:?}, snap step {}°", config.theme, config.snap_step_degrees);
    let mut bench = Workbench::new(config);

    match &args.command {
        Command::Sample { image, point } => {
            bench.load_image(load_image(image)?);
            bench.activate(Some(ToolKind::ColorPicker));

            if !bench.dispatch(ToolEvent::PointerMove(*point)) {
                return Err(ToolkitError::validation(format!("{} is outside the image", point)));
            }
            let sample = bench.sampler().sample().cloned();
            emit(args, &bench, sample)
        }

        Command::Convert(convert) => {
            let edit = convert
                .to_edit()
                .ok_or_else(|| ToolkitError::validation("no color given"))?;
            // Surface the reason; the sampler itself ignores bad input silently
            edit.resolve()?;

            bench.activate(Some(ToolKind::ColorPicker));
            bench.sampler_mut().apply_edit(edit);
            let sample = bench.sampler().sample().cloned();
            emit(args, &bench, sample)
        }

        Command::Measure { from, to, lock_axis, scale } => {
            bench.activate(Some(ToolKind::Distance));
            bench.dispatch(ToolEvent::ScaleChanged(*scale));
            place(&mut bench, &[*from, *to], *lock_axis);

            let output = MeasurementOutput {
                report: bench.distance_tool().report(),
                annotations: bench.annotations(),
            };
            emit(args, &bench, output)
        }

        Command::Angle { vertex, ray1, ray2, snap, scale } => {
            bench.activate(Some(ToolKind::Angle));
            bench.dispatch(ToolEvent::ScaleChanged(*scale));
            place(&mut bench, &[*vertex, *ray1, *ray2], *snap);

            let output = MeasurementOutput {
                report: bench.angle_tool().report(),
                annotations: bench.annotations(),
            };
            emit(args, &bench, output)
        }
    }
}

/// Replay clicks the way a pointer would: move, then press
fn place(bench: &mut Workbench, points: &[Point2D], modifier: bool) {
    for (i, point) in points.iter().enumerate() {
        // The modifier only constrains points after the first
        if i == 1 && modifier {
            bench.dispatch(ToolEvent::ModifierChanged(true));
        }
        bench.dispatch(ToolEvent::PointerMove(*point));
        bench.dispatch(ToolEvent::PointerDown(*point));
    }
}

/// Print either the JSON envelope or the active tool's info panel
fn emit<T: Serialize>(args: &Args, bench: &Workbench, result: T) -> ToolkitResult<()> {
    if args.json {
        let report = Report {
            command: args.command_name(),
            generated_at: Utc::now(),
            version: pixscope::VERSION,
            result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let panel = bench
            .info_panel()
            .ok_or_else(|| ToolkitError::validation("no active tool"))?;
        print!("{}", panel);
    }
    Ok(())
}
