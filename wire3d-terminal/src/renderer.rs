/// Depth-buffered wireframe rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point3;
use std::io::Write;
use tracing::trace;
use wire3d_core::{Camera, DepthRange, TransformedShape, Viewport};

use crate::palette;

/// A drawn character. Always a short static string so multi-byte glyphs
/// and plain ASCII go through the same path.
pub type Glyph = &'static str;

/// Glyphs from farthest (sparsest) to nearest (densest)
pub const GLYPH_RAMP: [Glyph; 7] = [".", ":", "-", "=", "+", "#", "@"];

/// Upper bounds of normalized depth for each glyph but the last
const DEPTH_THRESHOLDS: [f32; 6] = [0.2, 0.4, 0.6, 0.8, 1.0, 1.2];

/// Depth-tested cells cover at most this many columns and rows. Cells past
/// it are drawn without a depth test.
pub const DEPTH_BUFFER_COLS: usize = 512;
pub const DEPTH_BUFFER_ROWS: usize = 256;

/// Edges longer than this many cells are not drawn.
pub const MAX_LINE_STEPS: i64 = 8192;

/// Stored depth of a cell nothing has been drawn to.
const EMPTY_DEPTH: f32 = f32::NEG_INFINITY;

/// Pick the glyph for a depth normalized across the shape's z range.
pub fn glyph_for_depth(normalized: f32) -> Glyph {
    let bucket = DEPTH_THRESHOLDS
        .iter()
        .position(|&limit| normalized < limit)
        .unwrap_or(DEPTH_THRESHOLDS.len());
    GLYPH_RAMP[bucket]
}

/// Fixed-capacity per-cell depth store
pub struct DepthBuffer {
    depths: Box<[f32]>,
}

impl DepthBuffer {
    pub fn new() -> Self {
        Self {
            depths: vec![EMPTY_DEPTH; DEPTH_BUFFER_COLS * DEPTH_BUFFER_ROWS].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(EMPTY_DEPTH);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        Self::slot(x, y).map(|i| self.depths[i])
    }

    /// Record `depth` at a cell if it beats what is stored. Returns whether
    /// the cell should be drawn; cells outside the buffer always are.
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let Some(i) = Self::slot(x, y) else {
            return true;
        };
        if depth > self.depths[i] {
            self.depths[i] = depth;
            true
        } else {
            false
        }
    }

    fn slot(x: usize, y: usize) -> Option<usize> {
        (x < DEPTH_BUFFER_COLS && y < DEPTH_BUFFER_ROWS).then(|| y * DEPTH_BUFFER_COLS + x)
    }
}

impl Default for DepthBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// What a display cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: u8,
}

/// Line endpoint in display cells, with its 3D depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

impl ScreenPoint {
    /// Project and place a point; `None` if the camera cannot see it.
    pub fn from_world(point: &Point3<f32>, camera: &Camera, viewport: &Viewport) -> Option<Self> {
        let projected = camera.project(point)?;
        let screen = viewport.to_screen(&projected);
        Some(Self {
            x: screen.x.round() as i32,
            y: screen.y.round() as i32,
            depth: point.z,
        })
    }
}

/// Wireframe renderer that rasterizes edges into a grid of glyph cells
pub struct WireRenderer {
    width: usize,
    height: usize,
    depth_buffer: DepthBuffer,
    cells: Vec<Option<Cell>>,
}

impl WireRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth_buffer: DepthBuffer::new(),
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Match a new display size. Contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
        self.depth_buffer.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.depth_buffer.clear();
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    /// Rasterize every edge of `shape`. Returns how many edges were drawn.
    pub fn render_shape(
        &mut self,
        shape: &TransformedShape<'_>,
        camera: &Camera,
        viewport: &Viewport,
        depth_range: &DepthRange,
    ) -> usize {
        let mut drawn = 0;

        for edge in shape.edges {
            let Some((start, end)) = shape.endpoints(edge) else {
                trace!(start = edge.start, end = edge.end, "edge indexes a missing point");
                continue;
            };

            let from = ScreenPoint::from_world(&start, camera, viewport);
            let to = ScreenPoint::from_world(&end, camera, viewport);
            let (Some(from), Some(to)) = (from, to) else {
                trace!(start = edge.start, end = edge.end, "edge endpoint behind camera");
                continue;
            };

            if self.draw_line(from, to, edge.color, depth_range) {
                drawn += 1;
            }
        }

        drawn
    }

    /// Bresenham line between two cells with linearly interpolated depth.
    /// Returns `false` if the line was too long to draw.
    pub fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: u8,
        depth_range: &DepthRange,
    ) -> bool {
        let (x1, y1) = (to.x as i64, to.y as i64);
        let (mut x, mut y) = (from.x as i64, from.y as i64);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let total = dx.max(-dy);
        if total > MAX_LINE_STEPS {
            trace!(total, "line too long, skipped");
            return false;
        }

        for step in 0..=total {
            let t = if total == 0 {
                0.0
            } else {
                step as f32 / total as f32
            };
            let depth = from.depth + (to.depth - from.depth) * t;
            self.plot(x, y, depth, color, depth_range);

            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }

        true
    }

    fn plot(&mut self, x: i64, y: i64, depth: f32, color: u8, depth_range: &DepthRange) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let (x, y) = (x as usize, y as usize);

        if !self.depth_buffer.test_and_set(x, y, depth) {
            return;
        }

        self.cells[y * self.width + x] = Some(Cell {
            glyph: glyph_for_depth(depth_range.normalize(depth)),
            color,
        });
    }

    /// Queue the whole grid, one row at a time.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(cell) => {
                        writer.queue(SetForegroundColor(palette::color(cell.color)))?;
                        writer.queue(Print(cell.glyph))?;
                        writer.queue(ResetColor)?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        Ok(())
    }
}
