/// Wireframe shape model: points, edges and their depth bounds
use nalgebra::Point3;

use crate::error::CapacityExceeded;

/// Maximum number of points a shape holds.
pub const MAX_POINTS: usize = 100;
/// Maximum number of edges a shape holds.
pub const MAX_EDGES: usize = 2 * MAX_POINTS;

/// Lowest and highest palette entry an edge may use.
pub const MIN_COLOR: u8 = 1;
pub const MAX_COLOR: u8 = 9;

/// A connection between two points, drawn in one palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub color: u8,
}

impl Edge {
    /// Build an edge, clamping `color` into the palette range.
    pub fn new(start: usize, end: usize, color: i64) -> Self {
        let color = color.clamp(MIN_COLOR as i64, MAX_COLOR as i64) as u8;
        Self { start, end, color }
    }

    /// Edge drawn in the default color.
    pub fn plain(start: usize, end: usize) -> Self {
        Self::new(start, end, MIN_COLOR as i64)
    }
}

/// Span of z-values used to normalize depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    /// Map `z` to `0.0..=1.0` across the range (values outside extrapolate).
    /// A flat range puts everything at the midpoint.
    pub fn normalize(&self, z: f32) -> f32 {
        let span = self.max - self.min;
        if span.abs() <= f32::EPSILON {
            return 0.5;
        }
        (z - self.min) / span
    }
}

/// A capacity-bounded wireframe
#[derive(Debug, Clone)]
pub struct Shape {
    points: Vec<Point3<f32>>,
    edges: Vec<Edge>,
    point_limit: usize,
    edge_limit: usize,
    min_z: f32,
    max_z: f32,
}

impl Shape {
    pub fn new() -> Self {
        Self::with_limits(MAX_POINTS, MAX_EDGES)
    }

    pub fn with_limits(point_limit: usize, edge_limit: usize) -> Self {
        Self {
            points: Vec::with_capacity(point_limit),
            edges: Vec::with_capacity(edge_limit),
            point_limit,
            edge_limit,
            min_z: 0.0,
            max_z: 0.0,
        }
    }

    /// Append a point, keeping the depth bounds current.
    pub fn push_point(&mut self, point: Point3<f32>) -> Result<(), CapacityExceeded> {
        if self.points.len() >= self.point_limit {
            return Err(CapacityExceeded {
                capacity: self.point_limit,
            });
        }

        if self.points.is_empty() {
            self.min_z = point.z;
            self.max_z = point.z;
        } else {
            self.min_z = self.min_z.min(point.z);
            self.max_z = self.max_z.max(point.z);
        }
        self.points.push(point);
        Ok(())
    }

    pub fn push_edge(&mut self, edge: Edge) -> Result<(), CapacityExceeded> {
        if self.edges.len() >= self.edge_limit {
            return Err(CapacityExceeded {
                capacity: self.edge_limit,
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest z across the loaded points (0 for an empty shape).
    pub fn min_z(&self) -> f32 {
        self.min_z
    }

    /// Largest z across the loaded points (0 for an empty shape).
    pub fn max_z(&self) -> f32 {
        self.max_z
    }

    pub fn depth_range(&self) -> DepthRange {
        DepthRange {
            min: self.min_z,
            max: self.max_z,
        }
    }

    /// Arithmetic mean of all points; the origin when there are none.
    pub fn centroid(&self) -> Point3<f32> {
        if self.points.is_empty() {
            return Point3::origin();
        }

        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.points.len() as f32)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}
