//! Parametric solids and the triangle lists generated from them.
//!
//! A [`Shape`] always holds the mesh matching its current [`ShapeKind`]:
//! every change to the kind's parameters rebuilds the whole mesh before the
//! setter returns. Placement (center, scale, rotation) and appearance do not
//! take part in tessellation and are applied when rendering.

use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::geometry::{direction, Mesh, Point, Vector};
use crate::primitives;
use crate::transform::{RotationState, Transform};

/// The primitive solids and their tessellation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Cuboid { x: f32, y: f32, z: f32 },
    Sphere { radius: f32, lat: u32, lon: u32 },
    Cylinder { radius: f32, height: f32, divisions: u32 },
    Cone { radius: f32, height: f32, divisions: u32 },
}

impl ShapeKind {
    pub fn cuboid() -> Self {
        ShapeKind::Cuboid { x: 2.0, y: 2.0, z: 2.0 }
    }

    pub fn sphere() -> Self {
        ShapeKind::Sphere { radius: 2.0, lat: 12, lon: 12 }
    }

    pub fn cylinder() -> Self {
        ShapeKind::Cylinder { radius: 2.0, height: 2.0, divisions: 12 }
    }

    pub fn cone() -> Self {
        ShapeKind::Cone { radius: 1.0, height: 2.0, divisions: 12 }
    }

    /// Build the triangle list for these parameters
    pub fn tessellate(&self) -> Mesh {
        match *self {
            ShapeKind::Cuboid { x, y, z } => primitives::cuboid(x, y, z),
            ShapeKind::Sphere { radius, lat, lon } => primitives::sphere(radius, lat, lon),
            ShapeKind::Cylinder { radius, height, divisions } => {
                primitives::cylinder(radius, height, divisions)
            }
            ShapeKind::Cone { radius, height, divisions } => {
                primitives::cone(radius, height, divisions)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Cuboid { .. } => "Cuboid",
            ShapeKind::Sphere { .. } => "Sphere",
            ShapeKind::Cylinder { .. } => "Cylinder",
            ShapeKind::Cone { .. } => "Cone",
        }
    }

    pub fn default_color(&self) -> Color {
        match self {
            ShapeKind::Cuboid { .. } => Color::GOLD,
            ShapeKind::Sphere { .. } => Color::CORNFLOWER_BLUE,
            ShapeKind::Cylinder { .. } => Color::PALE_VIOLET_RED,
            ShapeKind::Cone { .. } => Color::MOCCASIN,
        }
    }

    /// Add `step` to every linear dimension
    pub fn grow(&mut self, step: f32) {
        match self {
            ShapeKind::Cuboid { x, y, z } => {
                *x += step;
                *y += step;
                *z += step;
            }
            ShapeKind::Sphere { radius, .. } => *radius += step,
            ShapeKind::Cylinder { radius, height, .. } | ShapeKind::Cone { radius, height, .. } => {
                *radius += step;
                *height += step;
            }
        }
    }

    /// Add `delta` to every tessellation count, saturating at zero.
    /// Cuboids have no resolution and are left alone.
    pub fn refine(&mut self, delta: i32) {
        let adjust = |n: &mut u32| *n = n.saturating_add_signed(delta);
        match self {
            ShapeKind::Cuboid { .. } => {}
            ShapeKind::Sphere { lat, lon, .. } => {
                adjust(lat);
                adjust(lon);
            }
            ShapeKind::Cylinder { divisions, .. } | ShapeKind::Cone { divisions, .. } => {
                adjust(divisions)
            }
        }
    }
}

/// A solid placed in the scene together with its generated triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    mesh: Mesh,
    pub center: Point,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    pub rotation: RotationState,
    pub color: Color,
    pub visible: bool,
}

impl Shape {
    /// Shape at the origin with unit scale and the kind's default color
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            mesh: kind.tessellate(),
            center: Point::origin(),
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rotation: RotationState::zero(),
            color: kind.default_color(),
            visible: true,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the parameters and rebuild the mesh
    pub fn set_kind(&mut self, kind: ShapeKind) -> &Mesh {
        self.kind = kind;
        self.regenerate()
    }

    /// Change the parameters in place and rebuild the mesh
    pub fn edit<F>(&mut self, f: F) -> &Mesh
    where
        F: FnOnce(&mut ShapeKind),
    {
        f(&mut self.kind);
        self.regenerate()
    }

    fn regenerate(&mut self) -> &Mesh {
        self.mesh = self.kind.tessellate();
        log::debug!("regenerated {}: {} triangles", self.kind.label(), self.mesh.len());
        &self.mesh
    }

    pub fn center(&self) -> Vector {
        self.center.homogeneous()
    }

    /// `(x, y, z, 0)`
    pub fn scale(&self) -> Vector {
        direction(self.scale_x, self.scale_y, self.scale_z)
    }

    /// Takes x, y and z; `w` is ignored
    pub fn set_scale(&mut self, scale: Vector) {
        self.scale_x = scale.x;
        self.scale_y = scale.y;
        self.scale_z = scale.z;
    }

    /// `(x, y, z, 0)` in radians
    pub fn rotation(&self) -> Vector {
        self.rotation.as_vector()
    }

    /// Takes x, y and z; `w` is ignored
    pub fn set_rotation(&mut self, rotation: Vector) {
        self.rotation = RotationState::from(rotation);
    }

    /// Object-to-world transform: scale, rotate, then translate to the center
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::model_matrix(
            &Vector3::new(self.center.x, self.center.y, self.center.z),
            &self.rotation,
            &Vector3::new(self.scale_x, self.scale_y, self.scale_z),
        )
    }

    pub fn display_name(&self) -> String {
        format!(
            "{} (X:{:.2}, Y:{:.2}, Z:{:.2})",
            self.kind.label(),
            self.center.x,
            self.center.y,
            self.center.z
        )
    }
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Self {
        Self::new(kind)
    }
}
