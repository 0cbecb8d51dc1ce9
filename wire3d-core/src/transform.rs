/// Rotation about the vertical axis through a pivot
use nalgebra::{Point3, Rotation3, Vector3};

use crate::geometry::{Edge, Shape};

/// Default per-frame angle increment (radians).
pub const DEFAULT_ANGLE_STEP: f32 = 0.1;

/// Continuously advancing rotation angle
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    pub angle: f32,
    pub step: f32,
}

impl Spin {
    pub fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    /// Move one frame forward. The angle wraps at a full turn so it never
    /// loses precision on long runs.
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step) % std::f32::consts::TAU;
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(DEFAULT_ANGLE_STEP)
    }
}

/// Rotate `point` by `angle` radians about the Y axis through `pivot`.
///
/// `x' = x cos + z sin`, `y' = y`, `z' = -x sin + z cos`, relative to the pivot.
pub fn rotate_about_y(point: &Point3<f32>, pivot: &Point3<f32>, angle: f32) -> Point3<f32> {
    let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), angle);
    pivot + rotation * (point - pivot)
}

/// Per-frame copy of a shape's points after rotation. Edges are borrowed
/// from the source shape since they never move.
#[derive(Debug, Clone)]
pub struct TransformedShape<'a> {
    pub points: Vec<Point3<f32>>,
    pub edges: &'a [Edge],
}

impl<'a> TransformedShape<'a> {
    /// Rotate every point of `shape` about `pivot`.
    pub fn rotated(shape: &'a Shape, pivot: &Point3<f32>, angle: f32) -> Self {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), angle);
        let points = shape
            .points()
            .iter()
            .map(|p| pivot + rotation * (p - pivot))
            .collect();

        Self {
            points,
            edges: shape.edges(),
        }
    }

    /// Endpoints of `edge`, or `None` if it indexes past the point list.
    pub fn endpoints(&self, edge: &Edge) -> Option<(Point3<f32>, Point3<f32>)> {
        let start = self.points.get(edge.start)?;
        let end = self.points.get(edge.end)?;
        Some((*start, *end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_rotation() {
        let pivot = Point3::new(0.5, -1.0, 2.0);
        for p in [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.0, 0.25),
            Point3::origin(),
        ] {
            assert_relative_eq!(rotate_about_y(&p, &pivot, 0.0), p, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rotation_round_trip() {
        let pivot = Point3::new(1.0, 1.0, 1.0);
        let p = Point3::new(3.0, -2.0, 0.5);
        for angle in [0.1, 1.3, -2.7, 5.0] {
            let there = rotate_about_y(&p, &pivot, angle);
            let back = rotate_about_y(&there, &pivot, -angle);
            assert_relative_eq!(back, p, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_matches_axis_formula() {
        let p = Point3::new(1.0, 5.0, 0.0);
        // x' = cos, z' = -sin at a quarter turn
        let r = rotate_about_y(&p, &Point3::origin(), FRAC_PI_2);
        assert_relative_eq!(r, Point3::new(0.0, 5.0, -1.0), epsilon = 1e-6);

        let p = Point3::new(0.0, 0.0, 1.0);
        let r = rotate_about_y(&p, &Point3::origin(), FRAC_PI_2);
        assert_relative_eq!(r, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = Point3::new(2.0, 3.0, 4.0);
        assert_relative_eq!(rotate_about_y(&pivot, &pivot, 1.7), pivot, epsilon = 1e-6);
    }

    #[test]
    fn test_spin_advances() {
        let mut spin = Spin::default();
        spin.advance();
        spin.advance();
        assert_relative_eq!(spin.angle, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_transformed_endpoints_skip_out_of_range() {
        let mut shape = Shape::new();
        shape.push_point(Point3::new(1.0, 0.0, 0.0)).unwrap();
        shape.push_point(Point3::new(-1.0, 0.0, 0.0)).unwrap();
        shape.push_edge(Edge::plain(0, 1)).unwrap();
        shape.push_edge(Edge::plain(0, 7)).unwrap();

        let transformed = TransformedShape::rotated(&shape, &shape.centroid(), 0.0);
        assert_eq!(transformed.edges.len(), 2);
        assert!(transformed.endpoints(&transformed.edges[0]).is_some());
        assert!(transformed.endpoints(&transformed.edges[1]).is_none());
    }
}
