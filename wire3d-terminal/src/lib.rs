/// Terminal wireframe renderer with a depth-tested line rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use wire3d_core::{auto_scale, Camera, DepthRange, Shape, Spin, TransformedShape, Viewport};

pub mod config;
pub mod logging;
pub mod palette;
pub mod renderer;

pub use config::{RenderConfig, ScaleMode};
pub use renderer::WireRenderer;

/// Main application struct: owns the shape and drives the frame loop
pub struct TerminalApp {
    shape: Shape,
    label: String,
    config: RenderConfig,
    camera: Camera,
    centroid: Point3<f32>,
    depth_range: DepthRange,
    spin: Spin,
    viewport: Viewport,
    renderer: WireRenderer,
    running: bool,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Set up for the current terminal size.
    pub fn new(shape: Shape, label: impl Into<String>, config: RenderConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(shape, label, config, width, height))
    }

    /// Set up for a display of the given size.
    pub fn with_size(
        shape: Shape,
        label: impl Into<String>,
        config: RenderConfig,
        width: u16,
        height: u16,
    ) -> Self {
        // Geometry is static, only orientation changes
        let centroid = shape.centroid();
        let depth_range = shape.depth_range();
        let camera = Camera::new(config.distance);
        let spin = Spin::new(config.angle_step);

        let mut app = Self {
            shape,
            label: label.into(),
            config,
            camera,
            centroid,
            depth_range,
            spin,
            viewport: Viewport::new(width, height, 1.0),
            renderer: WireRenderer::new(width as usize, height as usize),
            running: true,
            last_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.fit(width, height);
        app
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn renderer(&self) -> &WireRenderer {
        &self.renderer
    }

    pub fn angle(&self) -> f32 {
        self.spin.angle
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        let restored = terminal::disable_raw_mode()
            .and_then(|_| execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show));

        result.and(restored)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        info!(
            points = self.shape.point_count(),
            edges = self.shape.edge_count(),
            scale = self.viewport.scale,
            "render loop started"
        );

        while self.running {
            let frame_start = Instant::now();

            self.sync_size()?;
            self.step();
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.config.frame_interval {
                std::thread::sleep(self.config.frame_interval - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_sample = now;
            }

            if quit_requested()? {
                self.running = false;
            }
        }

        info!("render loop stopped");
        Ok(())
    }

    /// Render one frame into the cell grid: clear, advance the angle,
    /// rotate and rasterize every edge.
    pub fn step(&mut self) -> usize {
        self.renderer.clear();
        self.spin.advance();

        let transformed = TransformedShape::rotated(&self.shape, &self.centroid, self.spin.angle);
        if self.config.scale_mode == ScaleMode::Dynamic {
            self.viewport.scale = auto_scale(
                &transformed.points,
                &self.camera,
                self.viewport.width,
                self.viewport.height,
                self.config.soft_limit,
            );
        }

        self.renderer
            .render_shape(&transformed, &self.camera, &self.viewport, &self.depth_range)
    }

    /// Follow a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.viewport.width, self.viewport.height) {
            debug!(width, height, "display resized");
            self.fit(width, height);
        }
    }

    fn sync_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.resize(width, height);
        Ok(())
    }

    /// Size the grid and derive the static scale from the unrotated shape.
    fn fit(&mut self, width: u16, height: u16) {
        let scale = auto_scale(
            self.shape.points(),
            &self.camera,
            width,
            height,
            self.config.soft_limit,
        );
        self.viewport = Viewport::new(width, height, scale);
        self.renderer.resize(width as usize, height as usize);
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        if self.config.show_hud {
            let status = format!(
                "{} | {} points {} edges | FPS: {:.1} | q=quit",
                self.label,
                self.shape.point_count(),
                self.shape.edge_count(),
                self.fps
            );
            let status: String = status.chars().take(self.viewport.width as usize).collect();
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                Print(status),
                ResetColor
            )?;
        }

        stdout.flush()
    }
}

/// Drain pending input without blocking; true once `q` was pressed.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wire3d_core::{parse_shape, Edge};

    const CUBE: &str = "\
POINTS
-1,-1,-1
1,-1,-1
1,1,-1
-1,1,-1
-1,-1,1
1,-1,1
1,1,1
-1,1,1
EDGES
0,1,2
1,2,2
2,3,2
3,0,2
4,5,3
5,6,3
6,7,3
7,4,3
0,4
1,5
2,6
3,7
";

    fn count_cells(renderer: &WireRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.cell(x, y).is_some())
            .count()
    }

    #[test]
    fn test_step_draws_every_edge() {
        let mut app = TerminalApp::with_size(parse_shape(CUBE), "cube", RenderConfig::default(), 80, 24);
        assert_eq!(app.step(), 12);
        assert!(count_cells(app.renderer()) > 0);
        assert_relative_eq!(app.angle(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_static_scale_survives_frames() {
        let mut app = TerminalApp::with_size(parse_shape(CUBE), "cube", RenderConfig::default(), 80, 24);
        let scale = app.viewport().scale;
        for _ in 0..5 {
            app.step();
        }
        assert_eq!(app.viewport().scale, scale);
    }

    #[test]
    fn test_dynamic_scale_follows_rotation() {
        let config = RenderConfig {
            scale_mode: ScaleMode::Dynamic,
            angle_step: 0.7,
            ..RenderConfig::default()
        };
        let mut app = TerminalApp::with_size(parse_shape(CUBE), "cube", config, 80, 24);
        let initial = app.viewport().scale;
        app.step();
        assert!(app.viewport().scale.is_finite());
        assert!((app.viewport().scale - initial).abs() > 1e-4);
    }

    #[test]
    fn test_resize_refits() {
        let mut app = TerminalApp::with_size(parse_shape(CUBE), "cube", RenderConfig::default(), 80, 24);
        let scale = app.viewport().scale;
        app.resize(160, 48);
        assert_eq!(app.renderer().width(), 160);
        assert_eq!(app.renderer().height(), 48);
        assert!(app.viewport().scale > scale);
        app.step();
    }

    #[test]
    fn test_empty_shape_frames() {
        let mut app = TerminalApp::with_size(Shape::new(), "empty", RenderConfig::default(), 80, 24);
        assert_eq!(app.step(), 0);
        assert_eq!(count_cells(app.renderer()), 0);
    }

    #[test]
    fn test_invalid_edges_are_skipped() {
        let mut shape = parse_shape(CUBE);
        shape.push_edge(Edge::plain(0, 8)).unwrap();
        let mut app = TerminalApp::with_size(shape, "cube", RenderConfig::default(), 80, 24);
        assert_eq!(app.step(), 12);
    }

    #[test]
    fn test_zero_sized_display() {
        let mut app = TerminalApp::with_size(parse_shape(CUBE), "cube", RenderConfig::default(), 0, 0);
        app.step();
        assert_eq!(count_cells(app.renderer()), 0);
    }
}
