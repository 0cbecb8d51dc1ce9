//! Command line surface of the `wire3d` binary

use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use wire3d_terminal::{RenderConfig, ScaleMode};

/// Spin a wireframe shape in the terminal. Press q to quit.
#[derive(Debug, Parser)]
#[command(name = "wire3d", version)]
pub struct Args {
    /// Shape file to render (.csv with POINTS and EDGES sections)
    #[arg(short = 'f', long = "file", default_value = "shape.csv")]
    pub file: PathBuf,

    /// Camera distance from the projection plane
    #[arg(long, default_value_t = wire3d_core::projection::DEFAULT_DISTANCE, value_parser = positive_f32)]
    pub distance: f32,

    /// Fraction of the display the shape may fill
    #[arg(long, default_value_t = wire3d_core::projection::DEFAULT_SOFT_LIMIT, value_parser = positive_f32)]
    pub soft_limit: f32,

    /// Rotation per frame, in radians
    #[arg(long, default_value_t = wire3d_core::transform::DEFAULT_ANGLE_STEP, allow_negative_numbers = true)]
    pub step: f32,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_ms: u64,

    /// When to fit the shape to the display
    #[arg(long, value_enum, default_value_t = ScaleMode::Static)]
    pub scale: ScaleMode,

    /// Show a status line on the top row
    #[arg(long)]
    pub hud: bool,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            distance: self.distance,
            soft_limit: self.soft_limit,
            angle_step: self.step,
            frame_interval: Duration::from_millis(self.frame_ms),
            scale_mode: self.scale,
            show_hud: self.hud,
        }
    }

    /// Display name for the loaded shape.
    pub fn label(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// One-line usage text for error reports.
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}

fn positive_f32(value: &str) -> Result<f32, String> {
    let parsed: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}
