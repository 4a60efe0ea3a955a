/// Geometry primitives: homogeneous vectors, points, triangles and meshes
use std::ops::{Index, IndexMut};

use nalgebra::{Point3, Vector3, Vector4};

/// Homogeneous 4-component vector. Directions carry `w = 0`, positions `w = 1`.
pub type Vector = Vector4<f32>;

/// Areas below this are treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Build a direction vector (`w = 0`)
pub fn direction(x: f32, y: f32, z: f32) -> Vector {
    Vector::new(x, y, z, 0.0)
}

/// Build a position vector (`w = 1`)
pub fn position(x: f32, y: f32, z: f32) -> Vector {
    Vector::new(x, y, z, 1.0)
}

/// Normalize a vector.
///
/// A zero-length input yields NaN components; callers that can produce one
/// (coincident camera position and target, for instance) must accept that.
pub fn normalize(v: &Vector) -> Vector {
    v / v.norm()
}

/// Cross product of the xyz parts. The result is a direction.
pub fn cross(a: &Vector, b: &Vector) -> Vector {
    let c = a.xyz().cross(&b.xyz());
    direction(c.x, c.y, c.z)
}

/// Dot product of the xyz parts, ignoring `w`
pub fn dot3(a: &Vector, b: &Vector) -> f32 {
    a.xyz().dot(&b.xyz())
}

/// A 3D point with auxiliary direction vectors reserved for shading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub normal: Vector,
    pub binormal: Vector,
    pub tangent: Vector,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            normal: Vector::zeros(),
            binormal: Vector::zeros(),
            tangent: Vector::zeros(),
        }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// `(x, y, z, 1)`
    pub fn homogeneous(&self) -> Vector {
        position(self.x, self.y, self.z)
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Same auxiliary vectors, new coordinates
    pub fn moved_to(&self, p: &Point3<f32>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            ..*self
        }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        (self.position() - other.position()).norm()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<Point3<f32>> for Point {
    fn from(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Truncates toward zero; no rounding.
impl From<Point> for ScreenPoint {
    fn from(p: Point) -> Self {
        Self {
            x: p.x as i32,
            y: p.y as i32,
        }
    }
}

/// A triangle face owning three points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Triangle {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// Triangle with each point replaced by `f(point)`
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Point) -> Point,
    {
        Self::new(f(&self.points[0]), f(&self.points[1]), f(&self.points[2]))
    }

    fn edge_cross(&self) -> Vector3<f32> {
        let p0 = self.points[0].position();
        let edge1 = self.points[1].position() - p0;
        let edge2 = self.points[2].position() - p0;
        edge1.cross(&edge2)
    }

    /// Face normal following the winding order.
    /// NaN for degenerate triangles.
    pub fn normal(&self) -> Vector3<f32> {
        self.edge_cross().normalize()
    }

    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.points[0].position().coords
            + self.points[1].position().coords
            + self.points[2].position().coords;
        Point3::from(sum / 3.0)
    }

    pub fn area(&self) -> f32 {
        self.edge_cross().norm() * 0.5
    }

    /// Signed area of the xy projection (shoelace).
    /// Positive when the points run counter-clockwise with y pointing up.
    pub fn screen_area(&self) -> f32 {
        let [a, b, c] = self.points;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) * 0.5
    }

    /// Zero-area triangles render nothing and can be skipped
    pub fn is_degenerate(&self) -> bool {
        self.area() <= DEGENERATE_EPSILON
    }
}

impl Index<usize> for Triangle {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl IndexMut<usize> for Triangle {
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_point_truncates_toward_zero() {
        assert_eq!(ScreenPoint::from(Point::new(3.9, 7.2, 1.0)), ScreenPoint::new(3, 7));
        assert_eq!(ScreenPoint::from(Point::new(-0.7, -2.5, 0.0)), ScreenPoint::new(0, -2));
    }

    #[test]
    fn test_homogeneous_form() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.homogeneous(), Vector::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_copies_are_independent() {
        let mut original = Point::new(1.0, 1.0, 1.0);
        original.normal = direction(0.0, 1.0, 0.0);
        let triangle = Triangle::new(original, Point::origin(), Point::origin());
        original.x = 5.0;
        original.normal.y = -1.0;
        assert_eq!(triangle[0].x, 1.0);
        assert_eq!(triangle[0].normal.y, 1.0);
    }

    #[test]
    fn test_cross_and_normalize() {
        let x = direction(2.0, 0.0, 0.0);
        let y = direction(0.0, 3.0, 0.0);
        let z = normalize(&cross(&x, &y));
        assert!((z - direction(0.0, 0.0, 1.0)).norm() < 1e-6);
        assert_eq!(z.w, 0.0);
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let n = normalize(&Vector::zeros());
        assert!(n.x.is_nan());
    }

    #[test]
    fn test_position_difference_is_direction() {
        let d = position(3.0, 3.0, 3.0) - position(1.0, 0.0, 0.0);
        assert_eq!(d, direction(2.0, 3.0, 3.0));
    }

    #[test]
    fn test_triangle_normal_and_area() {
        let t = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        assert!((t.normal() - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        assert!((t.area() - 2.0).abs() < 1e-6);
        assert!((t.screen_area() - 2.0).abs() < 1e-6);
        assert!(!t.is_degenerate());
    }

    #[test]
    fn test_collinear_triangle_is_degenerate() {
        let t = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(t.is_degenerate());
    }

    #[test]
    fn test_triangle_index_mut() {
        let mut t = Triangle::new(Point::origin(), Point::origin(), Point::origin());
        t[2].y = 4.0;
        assert_eq!(t.points[2].y, 4.0);
    }
}
