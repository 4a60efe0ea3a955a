/// Scene graph and the per-frame render pass
use nalgebra::{Matrix4, Point3};

use crate::camera::Camera;
use crate::color::Color;
use crate::geometry::{Point, Triangle};
use crate::raster::{draw_line, fill_triangle, FrameBuffer, PixelBuffer};
use crate::shape::Shape;

/// Counters from one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    /// Behind the camera or zero area on screen
    pub skipped: usize,
}

/// Shapes in insertion order plus the camera looking at them.
///
/// There is no depth test: shapes are drawn in order and later triangles
/// overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub background: Color,
    pub show_axes: bool,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            background: Color::BACKGROUND,
            show_axes: true,
            shapes: Vec::new(),
        }
    }

    /// Append a shape and return its index
    pub fn add(&mut self, shape: Shape) -> usize {
        log::debug!("adding {}", shape.display_name());
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        if index < self.shapes.len() {
            let shape = self.shapes.remove(index);
            log::debug!("removed {}", shape.display_name());
            Some(shape)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Triangles across all shapes, visible or not
    pub fn triangle_count(&self) -> usize {
        self.shapes.iter().map(|s| s.mesh().len()).sum()
    }

    fn project(&self, point: &Point3<f32>, width: u32, height: u32) -> Option<Point> {
        self.camera
            .project_to_screen(point, width, height)
            .map(|(x, y, depth)| Point::new(x, y, depth))
    }

    /// Project a model-space triangle to screen space. `None` when a vertex
    /// is behind the camera.
    fn to_screen(
        &self,
        model: &Matrix4<f32>,
        triangle: &Triangle,
        width: u32,
        height: u32,
    ) -> Option<Triangle> {
        let mut projected = [Point::origin(); 3];
        for (out, point) in projected.iter_mut().zip(&triangle.points) {
            let world = model.transform_point(&point.position());
            *out = self.project(&world, width, height)?;
        }
        Some(Triangle::new(projected[0], projected[1], projected[2]))
    }

    fn draw_axes(&self, buffer: &mut FrameBuffer) {
        let (width, height) = (buffer.width() as u32, buffer.height() as u32);
        let Some(origin) = self.project(&Point3::origin(), width, height) else {
            return;
        };
        let axes = [
            (Point3::new(1.0, 0.0, 0.0), Color::RED),
            (Point3::new(0.0, 1.0, 0.0), Color::GREEN),
            (Point3::new(0.0, 0.0, 1.0), Color::BLUE),
        ];
        for (tip, color) in axes {
            if let Some(tip) = self.project(&tip, width, height) {
                draw_line(buffer, &origin, &tip, color);
            }
        }
    }

    /// Clear `buffer` and draw every visible shape with its flat color
    pub fn render(&self, buffer: &mut FrameBuffer) -> RenderStats {
        buffer.clear(self.background);
        let (width, height) = (buffer.width() as u32, buffer.height() as u32);
        let mut stats = RenderStats::default();

        for shape in self.shapes.iter().filter(|s| s.visible) {
            let model = shape.model_matrix();
            for triangle in shape.mesh() {
                match self.to_screen(&model, triangle, width, height) {
                    Some(screen) if screen.screen_area() != 0.0 => {
                        fill_triangle(buffer, &screen, shape.color);
                        stats.drawn += 1;
                    }
                    _ => stats.skipped += 1,
                }
            }
        }

        if self.show_axes {
            self.draw_axes(buffer);
        }

        log::trace!("rendered {} triangles, skipped {}", stats.drawn, stats.skipped);
        stats
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn front_camera() -> Camera {
        Camera::new(Point::new(0.0, 0.0, 10.0), Point::origin())
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::default();
        assert!(scene.is_empty());
        let first = scene.add(Shape::new(ShapeKind::cuboid()));
        let second = scene.add(Shape::new(ShapeKind::cone()));
        assert_eq!((first, second), (0, 1));
        assert_eq!(scene.triangle_count(), 12 + 24);

        let removed = scene.remove(0).map(|s| s.display_name());
        assert_eq!(removed.as_deref(), Some("Cuboid (X:0.00, Y:0.00, Z:0.00)"));
        assert_eq!(scene.len(), 1);
        assert!(scene.remove(5).is_none());
    }

    #[test]
    fn test_render_draws_visible_shapes_only() {
        let mut scene = Scene::new(front_camera());
        scene.show_axes = false;
        scene.add(Shape::new(ShapeKind::cuboid()));

        let mut buffer = FrameBuffer::new(64, 64);
        let stats = scene.render(&mut buffer);
        assert!(stats.drawn > 0);
        assert_eq!(buffer.get(32, 32), Some(Color::GOLD));
        assert_eq!(buffer.get(0, 0), Some(Color::BACKGROUND));

        if let Some(shape) = scene.get_mut(0) {
            shape.visible = false;
        }
        let stats = scene.render(&mut buffer);
        assert_eq!(stats, RenderStats::default());
        assert_eq!(buffer.count(Color::BACKGROUND), 64 * 64);
    }

    #[test]
    fn test_later_shapes_overwrite_earlier() {
        let mut scene = Scene::new(front_camera());
        scene.show_axes = false;
        // The sphere is further away but drawn last
        scene.add(Shape::new(ShapeKind::cuboid()));
        scene.add(Shape::new(ShapeKind::sphere()).with_center(Point::new(0.0, 0.0, -3.0)));

        let mut buffer = FrameBuffer::new(64, 64);
        scene.render(&mut buffer);
        assert_eq!(buffer.get(32, 32), Some(Color::CORNFLOWER_BLUE));
    }

    #[test]
    fn test_shapes_behind_camera_are_skipped() {
        let mut scene = Scene::new(front_camera());
        scene.show_axes = false;
        scene.add(Shape::new(ShapeKind::cuboid()).with_center(Point::new(0.0, 0.0, 20.0)));

        let mut buffer = FrameBuffer::new(32, 32);
        let stats = scene.render(&mut buffer);
        assert_eq!(stats.drawn, 0);
        assert_eq!(stats.skipped, 12);
        assert_eq!(buffer.count(Color::BACKGROUND), 32 * 32);
    }

    #[test]
    fn test_axes_overlay() {
        let mut scene = Scene::new(Camera::default());
        let mut buffer = FrameBuffer::new(80, 60);
        scene.render(&mut buffer);
        assert!(buffer.count(Color::RED) > 0);
        assert!(buffer.count(Color::GREEN) > 0);
        assert!(buffer.count(Color::BLUE) > 0);

        scene.show_axes = false;
        scene.render(&mut buffer);
        assert_eq!(buffer.count(Color::RED), 0);
    }
}
