/// Look-at camera: view basis and perspective projection to pixels
use nalgebra::{Point3, Vector3};

use crate::geometry::{cross, direction, dot3, normalize, Point, Vector};

/// Points closer than this along the view direction are not projected
pub const NEAR: f32 = 0.01;

/// Elevation limit for orbiting, just short of the poles where the basis
/// degenerates
const MAX_ELEVATION: f32 = 89.0 * std::f32::consts::PI / 180.0;

const MIN_DISTANCE: f32 = 0.1;

/// Camera looking from `position` at `target`.
///
/// The basis is recomputed on every access. `position` must differ from
/// `target` and the view direction must not be parallel to +Y, otherwise the
/// basis vectors are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point,
    pub target: Point,
    /// Vertical field of view in degrees
    pub fov: i32,
}

impl Camera {
    pub fn new(position: Point, target: Point) -> Self {
        Self {
            position,
            target,
            fov: 60,
        }
    }

    pub fn world_up() -> Vector {
        direction(0.0, 1.0, 0.0)
    }

    /// Unit view direction
    pub fn normal(&self) -> Vector {
        normalize(&(self.target.homogeneous() - self.position.homogeneous()))
    }

    /// Unit vector pointing right on screen
    pub fn tangent(&self) -> Vector {
        normalize(&cross(&self.normal(), &Self::world_up()))
    }

    /// Unit vector pointing down on screen
    pub fn binormal(&self) -> Vector {
        normalize(&cross(&self.normal(), &self.tangent()))
    }

    /// True when the basis cannot be built from the current position/target
    pub fn is_degenerate(&self) -> bool {
        let forward = self.target.homogeneous() - self.position.homogeneous();
        cross(&forward, &Self::world_up()).norm() <= f32::EPSILON
    }

    /// Coordinates of a world point along tangent, binormal and normal
    pub fn to_camera_space(&self, point: &Point3<f32>) -> Vector3<f32> {
        let (normal, tangent, binormal) = (self.normal(), self.tangent(), self.binormal());
        let d = Vector::new(point.x, point.y, point.z, 1.0) - self.position.homogeneous();
        Vector3::new(dot3(&d, &tangent), dot3(&d, &binormal), dot3(&d, &normal))
    }

    /// Focal length in pixels for a viewport `height` pixels tall
    pub fn focal_length(&self, height: u32) -> f32 {
        let half_fov = (self.fov as f32).to_radians() / 2.0;
        height as f32 / 2.0 / half_fov.tan()
    }

    /// Project a world point to screen space: `(x, y, depth)` with `y`
    /// growing downward. `None` for points at or behind the near distance.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.to_camera_space(point);
        if view.z.is_nan() || view.z <= NEAR {
            return None;
        }

        let focal = self.focal_length(height);
        let screen_x = width as f32 / 2.0 + view.x * focal / view.z;
        let screen_y = height as f32 / 2.0 + view.y * focal / view.z;

        Some((screen_x, screen_y, view.z))
    }

    pub fn distance(&self) -> f32 {
        self.position.distance_to(&self.target)
    }

    /// Rotate the position around the target (radians). Elevation is kept
    /// within +/-89 degrees.
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        let offset = self.position.position() - self.target.position();
        let distance = offset.norm();
        if distance <= f32::EPSILON {
            return;
        }

        let azimuth = offset.z.atan2(offset.x) + d_azimuth;
        let elevation = (offset.y / distance).clamp(-1.0, 1.0).asin() + d_elevation;
        let elevation = elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);

        let offset = Vector3::new(
            distance * elevation.cos() * azimuth.cos(),
            distance * elevation.sin(),
            distance * elevation.cos() * azimuth.sin(),
        );
        self.position = self.position.moved_to(&(self.target.position() + offset));
    }

    /// Scale the distance to the target by `factor`
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position.position() - self.target.position();
        let distance = offset.norm();
        if distance <= f32::EPSILON || factor.is_nan() || factor <= 0.0 {
            return;
        }

        let scaled = (distance * factor).max(MIN_DISTANCE);
        let offset = offset * (scaled / distance);
        self.position = self.position.moved_to(&(self.target.position() + offset));
    }

    pub fn display_name(&self) -> String {
        format!(
            "Camera (X:{:.2}, Y:{:.2}, Z:{:.2})",
            self.position.x, self.position.y, self.position.z
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point::new(3.0, 3.0, 3.0), Point::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit(v: &Vector) {
        assert!((v.norm() - 1.0).abs() < 1e-5, "|{v:?}| != 1");
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.fov, 60);
        assert_eq!(camera.position, Point::new(3.0, 3.0, 3.0));
        assert_eq!(camera.display_name(), "Camera (X:3.00, Y:3.00, Z:3.00)");
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::default();
        let (n, t, b) = (camera.normal(), camera.tangent(), camera.binormal());

        assert_unit(&n);
        assert_unit(&t);
        assert_unit(&b);
        assert!(dot3(&n, &t).abs() < 1e-5);
        assert!(dot3(&n, &b).abs() < 1e-5);
        assert!(dot3(&t, &b).abs() < 1e-5);
        assert_eq!(n.w, 0.0);
    }

    #[test]
    fn test_basis_orientation() {
        let camera = Camera::new(Point::new(0.0, 0.0, 5.0), Point::origin());
        assert!((camera.normal() - direction(0.0, 0.0, -1.0)).norm() < 1e-6);
        assert!((camera.tangent() - direction(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((camera.binormal() - direction(0.0, -1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_coincident_position_and_target() {
        let camera = Camera::new(Point::new(1.0, 1.0, 1.0), Point::new(1.0, 1.0, 1.0));
        assert!(camera.is_degenerate());
        assert!(camera.normal().x.is_nan());
        assert_eq!(camera.project_to_screen(&Point3::origin(), 100, 100), None);
        assert!(!Camera::default().is_degenerate());
    }

    #[test]
    fn test_projection() {
        let camera = Camera::new(Point::new(0.0, 0.0, 5.0), Point::origin());

        let (x, y, depth) = camera.project_to_screen(&Point3::origin(), 200, 100).unwrap();
        assert!((x - 100.0).abs() < 1e-4);
        assert!((y - 50.0).abs() < 1e-4);
        assert!((depth - 5.0).abs() < 1e-5);

        // Up in the world is up on screen, right is right
        let (x, y, _) = camera.project_to_screen(&Point3::new(1.0, 1.0, 0.0), 200, 100).unwrap();
        assert!(x > 100.0);
        assert!(y < 50.0);

        assert_eq!(camera.project_to_screen(&Point3::new(0.0, 0.0, 6.0), 200, 100), None);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::default();
        let distance = camera.distance();

        camera.orbit(0.7, 0.2);
        assert!((camera.distance() - distance).abs() < 1e-4);

        camera.orbit(0.0, 10.0);
        assert!(!camera.is_degenerate());
        assert!(camera.position.y < distance);
    }

    #[test]
    fn test_zoom() {
        let mut camera = Camera::new(Point::new(0.0, 0.0, 4.0), Point::origin());
        camera.zoom(0.5);
        assert!((camera.position.z - 2.0).abs() < 1e-5);
        camera.zoom(0.0001);
        assert!((camera.distance() - 0.1).abs() < 1e-5);
    }
}
