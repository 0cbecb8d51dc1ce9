/// Runtime tunables for the render loop
use std::time::Duration;

use clap::ValueEnum;
use wire3d_core::projection::{DEFAULT_DISTANCE, DEFAULT_SOFT_LIMIT};
use wire3d_core::transform::DEFAULT_ANGLE_STEP;

/// Default pause between frame starts (~20 FPS).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// When the display scale is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScaleMode {
    /// Fit the unrotated shape once, refit only on resize.
    #[default]
    Static,
    /// Refit the rotated shape every frame.
    Dynamic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub distance: f32,
    pub soft_limit: f32,
    pub angle_step: f32,
    pub frame_interval: Duration,
    pub scale_mode: ScaleMode,
    pub show_hud: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            soft_limit: DEFAULT_SOFT_LIMIT,
            angle_step: DEFAULT_ANGLE_STEP,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            scale_mode: ScaleMode::Static,
            show_hud: false,
        }
    }
}
