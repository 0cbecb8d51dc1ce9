/// wire3d core library - wireframe geometry shared by the renderers
///
/// Provides the shape model, the shape file loader, rotation about the
/// shape's centroid and perspective projection with display fitting.

pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use error::{CapacityExceeded, LoadError};
pub use geometry::{DepthRange, Edge, Shape, MAX_EDGES, MAX_POINTS};
pub use projection::{auto_scale, Camera, Viewport};
pub use scene::{load_shape, parse_into, parse_shape, LoadReport};
pub use transform::{rotate_about_y, Spin, TransformedShape};
