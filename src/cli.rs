// src/cli.rs - Command line interface for the pixscope harness

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::color::ColorEdit;
use crate::geometry::Point2D;

/// Pixscope - measure distances and angles, sample and convert colors
#[derive(Parser, Debug, Clone)]
#[command(name = "pixscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Image annotation and colorimetry toolkit")]
#[command(long_about = r##"
Pixscope drives the measurement tools and the color sampler from the
command line, the same way a desktop image viewer drives them with
pointer events.

All coordinates are in image pixels, written as "x,y".

EXAMPLES:
  # Color of the pixel under (120.5, 48)
  pixscope sample photo.png 120.5,48

  # Every representation of an orange
  pixscope convert --hex "#FF8000"

  # Horizontal distance with the axis lock held
  pixscope measure 10,10 200,17 --lock-axis

  # Angle at the origin, snapped to 15 degree steps
  pixscope --json angle 0,0 10,1 1,10 --snap
"##)]
pub struct Args {
    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    #[arg(help = "Enable verbose logging (same as --log-level debug)")]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    #[arg(value_enum)]
    #[arg(help = "Logging level (error, warn, info, debug, trace)")]
    pub log_level: LogLevel,

    /// Configuration file path
    #[arg(long, global = true)]
    #[arg(help = "Load configuration from file instead of the default location")]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of a text panel
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sample the pixel color at a point of an image
    Sample {
        /// PNG or JPEG image
        image: PathBuf,

        /// Content position "x,y"
        #[arg(allow_hyphen_values = true)]
        point: Point2D,
    },

    /// Convert a color between RGB, HSV, device HSV, Lab and hex
    Convert(ConvertArgs),

    /// Measure the distance between two points
    Measure {
        #[arg(allow_hyphen_values = true)]
        from: Point2D,

        #[arg(allow_hyphen_values = true)]
        to: Point2D,

        /// Hold the axis-lock modifier while placing the end point
        #[arg(long, default_value_t = false)]
        lock_axis: bool,

        /// View scale used for overlay cosmetics
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },

    /// Measure the angle between two rays sharing a vertex
    Angle {
        #[arg(allow_hyphen_values = true)]
        vertex: Point2D,

        #[arg(allow_hyphen_values = true)]
        ray1: Point2D,

        #[arg(allow_hyphen_values = true)]
        ray2: Point2D,

        /// Hold the angle-snap modifier while placing both rays
        #[arg(long, default_value_t = false)]
        snap: bool,

        /// View scale used for overlay cosmetics
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
}

/// Exactly one input representation
#[derive(ClapArgs, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ConvertArgs {
    /// "R,G,B" with channels 0-255
    #[arg(long, value_parser = parse_int_triple)]
    pub rgb: Option<[i32; 3]>,

    /// "#RRGGBB" (the leading # is optional)
    #[arg(long)]
    pub hex: Option<String>,

    /// "H,S,V" with H 0-360 and S/V 0-100
    #[arg(long, value_parser = parse_int_triple)]
    pub hsv: Option<[i32; 3]>,

    /// "H,S,V" with H 0-180 and S/V 0-255
    #[arg(long, value_parser = parse_int_triple)]
    pub device_hsv: Option<[i32; 3]>,

    /// "L,a,b" with L 0-100 and a/b -128-128
    #[arg(long, value_parser = parse_float_triple, allow_hyphen_values = true)]
    pub lab: Option<[f64; 3]>,
}

impl ConvertArgs {
    /// The color edit described by whichever flag was given
    pub fn to_edit(&self) -> Option<ColorEdit> {
        if let Some([r, g, b]) = self.rgb {
            return Some(ColorEdit::Rgb { r, g, b });
        }
        if let Some(hex) = &self.hex {
            return Some(ColorEdit::Hex(hex.clone()));
        }
        if let Some([h, s, v]) = self.hsv {
            return Some(ColorEdit::DisplayHsv { h, s, v });
        }
        if let Some([h, s, v]) = self.device_hsv {
            return Some(ColorEdit::DeviceHsv { h, s, v });
        }
        self.lab.map(|[l, a, b]| ColorEdit::Lab { l, a, b })
    }
}

fn split_triple(s: &str) -> Result<[&str; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(format!("expected three comma-separated values, got \"{}\"", s)),
    }
}

fn parse_int_triple(s: &str) -> Result<[i32; 3], String> {
    let [a, b, c] = split_triple(s)?;
    let parse = |v: &str| v.parse::<i32>().map_err(|_| format!("invalid integer \"{}\"", v));
    Ok([parse(a)?, parse(b)?, parse(c)?])
}

fn parse_float_triple(s: &str) -> Result<[f64; 3], String> {
    let [a, b, c] = split_triple(s)?;
    let parse = |v: &str| match v.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(format!("invalid number \"{}\"", v)),
    };
    Ok([parse(a)?, parse(b)?, parse(c)?])
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug information and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    /// Filter directive name
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Args {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Measure { scale, .. } | Command::Angle { scale, .. } => {
                if !(scale.is_finite() && *scale > 0.0) {
                    return Err(format!("--scale must be a positive number, got {}", scale));
                }
            }
            Command::Sample { .. } | Command::Convert(_) => {}
        }
        Ok(())
    }

    /// Log level after applying `--verbose`
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }

    /// Subcommand name for reports
    pub fn command_name(&self) -> &'static str {
        match self.command {
            Command::Sample { .. } => "sample",
            Command::Convert(_) => "convert",
            Command::Measure { .. } => "measure",
            Command::Angle { .. } => "angle",
        }
    }
}
