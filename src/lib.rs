// src/lib.rs - Pixscope Library

//! # Pixscope
//!
//! Image annotation and colorimetry toolkit for desktop image viewers.
//!
//! ## Features
//!
//! - **Distance tool**: two-click measurement with an axis-lock modifier
//! - **Angle tool**: three-click measurement with 15° angle snapping
//! - **Color sampler**: pointer sampling plus linked RGB, HSV, device HSV, Lab and hex editing
//! - **Scale-invariant overlays**: stroke, font and label sizes stay constant on screen while zooming
//!
//! ## Architecture
//!
//! The tools never draw. The host view forwards [`tools::ToolEvent`]s in content
//! coordinates and renders the [`annotation::Annotation`] descriptors the tools
//! produce. [`workbench::Workbench`] is a ready-made host router that keeps the
//! tools mutually exclusive and clears measurements when the image or view changes.
//!
//! ## Usage
//!
//! ```rust
//! use pixscope::{Point2D, ToolEvent, ToolKind, Workbench};
//!
//! let mut bench = Workbench::default();
//! bench.activate(Some(ToolKind::Distance));
//! bench.dispatch(ToolEvent::PointerDown(Point2D::new(0.0, 0.0)));
//! bench.dispatch(ToolEvent::PointerDown(Point2D::new(30.0, 40.0)));
//!
//! assert_eq!(bench.distance_tool().report().distance, 50.0);
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod annotation;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod image_source;
pub mod panel;
pub mod signal;
pub mod style;
pub mod tools;
pub mod workbench;

// Re-exports for convenience
pub use annotation::{Annotation, CosmeticsConfig};
pub use cli::{Args, LogLevel};
pub use color::{ColorEdit, ColorField, ColorSample, ColorSampler, Rgb};
pub use config::ToolkitConfig;
pub use error::{ToolkitError, ToolkitResult};
pub use geometry::Point2D;
pub use panel::InfoPanel;
pub use style::{StylePolicy, Theme};
pub use tools::{AngleTool, AnnotationTool, DistanceTool, ToolEvent, ToolKind};
pub use workbench::{ViewChange, Workbench};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with specified level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(level: LogLevel) -> ToolkitResult<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("pixscope={}", level.as_str())))
        .map_err(|e| ToolkitError::config(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ToolkitError::config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
