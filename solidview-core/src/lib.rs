/// Solidview Core Library - tessellation, camera and scanline rasterization
///
/// This library turns parametric solids (cuboid, sphere, cylinder, cone) into
/// triangle lists, projects them through a look-at camera and fills them into
/// a pixel buffer with a flat-color scanline rasterizer.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod primitives;
pub mod raster;
pub mod scene;
pub mod shape;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use color::Color;
pub use config::{parse_color, parse_shape, parse_shapes, parse_triple};
pub use error::{ConfigError, ConfigResult};
pub use geometry::{Mesh, Point, ScreenPoint, Triangle, Vector};
pub use raster::{draw_line, fill_triangle, FrameBuffer, PixelBuffer};
pub use scene::{RenderStats, Scene};
pub use shape::{Shape, ShapeKind};
pub use transform::{RotationState, Transform};
