/// Perspective projection and screen fitting
use nalgebra::{Point2, Point3};
use tracing::debug;

/// Default camera-to-plane distance.
pub const DEFAULT_DISTANCE: f32 = 5.0;
/// Fraction of the display the shape may fill.
pub const DEFAULT_SOFT_LIMIT: f32 = 0.7;
/// Scale used when the projected extent is zero.
pub const DEFAULT_SCALE: f32 = 10.0;

/// Smallest `distance + z` treated as in front of the camera.
const MIN_DENOMINATOR: f32 = 1e-4;
/// Extents below this count as zero.
const MIN_EXTENT: f32 = 1e-6;

/// Fixed camera looking down the z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    /// Perspective factor `distance / (distance + z)`; `None` at or behind
    /// the singularity.
    pub fn factor(&self, z: f32) -> Option<f32> {
        let denominator = self.distance + z;
        if !denominator.is_finite() || denominator < MIN_DENOMINATOR {
            return None;
        }
        Some(self.distance / denominator)
    }

    /// Project a point onto the image plane.
    pub fn project(&self, point: &Point3<f32>) -> Option<Point2<f32>> {
        let factor = self.factor(point.z)?;
        Some(Point2::new(point.x * factor, point.y * factor))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

/// Maps projected coordinates to display cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Display position of a projected point. Rows grow downward so y flips.
    pub fn to_screen(&self, projected: &Point2<f32>) -> Point2<f32> {
        Point2::new(
            self.width as f32 / 2.0 + projected.x * self.scale,
            self.height as f32 / 2.0 - projected.y * self.scale,
        )
    }
}

/// Scale that fits the projection of `points` into `soft_limit` of a
/// `width` x `height` display.
///
/// Axes with no extent are ignored; if neither axis has any, the result is
/// [`DEFAULT_SCALE`]. Points the camera cannot project do not count.
pub fn auto_scale<'a>(
    points: impl IntoIterator<Item = &'a Point3<f32>>,
    camera: &Camera,
    width: u16,
    height: u16,
    soft_limit: f32,
) -> f32 {
    let (max_x, max_y) = points
        .into_iter()
        .filter_map(|p| camera.project(p))
        .fold((0.0f32, 0.0f32), |(mx, my), p| {
            (mx.max(p.x.abs()), my.max(p.y.abs()))
        });

    let fit_x = (max_x > MIN_EXTENT).then(|| width as f32 * soft_limit / (2.0 * max_x));
    let fit_y = (max_y > MIN_EXTENT).then(|| height as f32 * soft_limit / (2.0 * max_y));

    match (fit_x, fit_y) {
        (Some(x), Some(y)) => x.min(y),
        (Some(x), None) => x,
        (None, Some(y)) => y,
        (None, None) => {
            debug!("projected extent is zero, using default scale");
            DEFAULT_SCALE
        }
    }
}
