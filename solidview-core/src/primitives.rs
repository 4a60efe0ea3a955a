//! Procedural tessellation of the primitive solids.
//!
//! Every generator is a pure function of its parameters and builds the whole
//! mesh from scratch. Solids are centred on the origin with Y pointing up.
//! Non-positive sizes collapse the affected axis into zero-area triangles and
//! a division count of zero yields an empty mesh; neither is an error.

use std::f32::consts::{PI, TAU};

use crate::geometry::{Mesh, Point, Triangle};

/// Box with the given extents: 6 faces of 2 triangles, wound outward.
pub fn cuboid(x: f32, y: f32, z: f32) -> Mesh {
    let (hx, hy, hz) = (x / 2.0, y / 2.0, z / 2.0);

    // Lower ring
    let p1 = Point::new(hx, -hy, hz);
    let p2 = Point::new(-hx, -hy, hz);
    let p3 = Point::new(-hx, -hy, -hz);
    let p4 = Point::new(hx, -hy, -hz);

    // Upper ring
    let p5 = Point::new(hx, hy, hz);
    let p6 = Point::new(-hx, hy, hz);
    let p7 = Point::new(-hx, hy, -hz);
    let p8 = Point::new(hx, hy, -hz);

    let faces = [
        // Front
        [p5, p2, p1],
        [p5, p6, p2],
        // Back
        [p7, p4, p3],
        [p7, p8, p4],
        // Up
        [p8, p6, p5],
        [p8, p7, p6],
        // Down
        [p2, p4, p1],
        [p2, p3, p4],
        // Left
        [p6, p3, p2],
        [p6, p7, p3],
        // Right
        [p8, p1, p4],
        [p8, p5, p1],
    ];

    let mut mesh = Mesh::with_capacity(faces.len());
    for [a, b, c] in faces {
        mesh.add_triangle(Triangle::new(a, b, c));
    }

    log::trace!("cuboid {x}x{y}x{z}: {} triangles", mesh.len());
    mesh
}

fn spherical(radius: f32, theta: f32, phi: f32) -> Point {
    Point::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.cos(),
        radius * theta.sin() * phi.sin(),
    )
}

/// UV sphere with `lat` azimuth steps and `lon` polar steps.
///
/// The first and last polar rows touch a pole and emit a single triangle per
/// cell, every other row two: `lat * ((lon - 2) * 2 + 2)` triangles for
/// `lon >= 2`.
pub fn sphere(radius: f32, lat: u32, lon: u32) -> Mesh {
    let per_column = match lon {
        0 => 0,
        1 => 1,
        _ => (lon as usize - 2) * 2 + 2,
    };
    let mut mesh = Mesh::with_capacity(lat as usize * per_column);

    for p in 0..lat {
        let phi1 = p as f32 / lat as f32 * TAU;
        let phi2 = (p + 1) as f32 / lat as f32 * TAU;

        for m in 0..lon {
            let theta1 = m as f32 / lon as f32 * PI;
            let theta2 = (m + 1) as f32 / lon as f32 * PI;

            let p1 = spherical(radius, theta1, phi1);
            let p2 = spherical(radius, theta1, phi2);
            let p3 = spherical(radius, theta2, phi2);
            let p4 = spherical(radius, theta2, phi1);

            if m == 0 {
                mesh.add_triangle(Triangle::new(p1, p3, p4));
            } else if m + 1 == lon {
                mesh.add_triangle(Triangle::new(p3, p1, p2));
            } else {
                mesh.add_triangle(Triangle::new(p1, p2, p4));
                mesh.add_triangle(Triangle::new(p2, p3, p4));
            }
        }
    }

    log::trace!("sphere r={radius} {lat}x{lon}: {} triangles", mesh.len());
    mesh
}

/// Points on the rim of a circle of `radius` at height `y`, one per division
/// boundary, as `(current, next)` pairs.
fn rim(radius: f32, y: f32, divisions: u32) -> impl Iterator<Item = (Point, Point)> {
    (0..divisions).map(move |m| {
        let theta1 = m as f32 / divisions as f32 * TAU;
        let theta2 = (m + 1) as f32 / divisions as f32 * TAU;
        (
            Point::new(radius * theta1.cos(), y, radius * theta1.sin()),
            Point::new(radius * theta2.cos(), y, radius * theta2.sin()),
        )
    })
}

/// Capped cylinder along Y: per division two side triangles plus one
/// triangle for each cap fan.
pub fn cylinder(radius: f32, height: f32, divisions: u32) -> Mesh {
    let top = Point::new(0.0, height / 2.0, 0.0);
    let bottom = Point::new(0.0, -height / 2.0, 0.0);
    let mut mesh = Mesh::with_capacity(divisions as usize * 4);

    let upper = rim(radius, top.y, divisions);
    let lower = rim(radius, bottom.y, divisions);
    for ((p1, p4), (p2, p3)) in upper.zip(lower) {
        mesh.add_triangle(Triangle::new(p4, p2, p1));
        mesh.add_triangle(Triangle::new(p4, p3, p2));

        mesh.add_triangle(Triangle::new(p4, p1, top));
        mesh.add_triangle(Triangle::new(p2, p3, bottom));
    }

    log::trace!("cylinder r={radius} h={height} n={divisions}: {} triangles", mesh.len());
    mesh
}

/// Cone along Y with its base fan at `-height / 2` and the tip at `+height / 2`.
pub fn cone(radius: f32, height: f32, divisions: u32) -> Mesh {
    let center = Point::new(0.0, -height / 2.0, 0.0);
    let tip = Point::new(0.0, height / 2.0, 0.0);
    let mut mesh = Mesh::with_capacity(divisions as usize * 2);

    for (p1, p2) in rim(radius, center.y, divisions) {
        mesh.add_triangle(Triangle::new(p1, p2, center));
        mesh.add_triangle(Triangle::new(p2, p1, tip));
    }

    log::trace!("cone r={radius} h={height} n={divisions}: {} triangles", mesh.len());
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    type Key = [u32; 3];

    fn key(p: &Point) -> Key {
        // -0.0 and 0.0 must land on the same key
        [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
    }

    fn edge_usage(mesh: &Mesh) -> HashMap<(Key, Key), usize> {
        let mut edges = HashMap::new();
        for t in mesh {
            for i in 0..3 {
                let a = key(&t[i]);
                let b = key(&t[(i + 1) % 3]);
                let edge = if a < b { (a, b) } else { (b, a) };
                *edges.entry(edge).or_insert(0) += 1;
            }
        }
        edges
    }

    #[rstest]
    #[case(2.0, 2.0, 2.0)]
    #[case(1.0, 3.0, 0.5)]
    #[case(10.0, 0.25, 4.0)]
    fn test_cuboid_is_closed_box(#[case] x: f32, #[case] y: f32, #[case] z: f32) {
        let mesh = cuboid(x, y, z);
        assert_eq!(mesh.len(), 12);

        for t in &mesh {
            for p in &t.points {
                assert_eq!(p.x.abs(), x / 2.0);
                assert_eq!(p.y.abs(), y / 2.0);
                assert_eq!(p.z.abs(), z / 2.0);
            }
        }

        let edges = edge_usage(&mesh);
        assert_eq!(edges.len(), 18);
        assert!(edges.values().all(|&count| count == 2));
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let mesh = cuboid(2.0, 3.0, 4.0);
        for t in &mesh {
            assert!(t.normal().dot(&t.centroid().coords) > 0.0);
        }
    }

    #[test]
    fn test_cuboid_flat_axis_degenerates() {
        let mesh = cuboid(2.0, 0.0, 2.0);
        assert_eq!(mesh.len(), 12);
        assert!(mesh.iter().any(|t| t.is_degenerate()));
    }

    #[test]
    fn test_sphere_count_and_radius() {
        let mesh = sphere(2.0, 12, 12);
        assert_eq!(mesh.len(), 12 * ((12 - 2) * 2 + 2));
        assert_eq!(mesh.len(), 264);
        for t in &mesh {
            for p in &t.points {
                assert!((p.distance_to(&Point::origin()) - 2.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_sphere_pole_rows_have_no_slivers() {
        let mesh = sphere(1.0, 8, 6);
        assert!(mesh.iter().all(|t| !t.is_degenerate()));
    }

    #[rstest]
    #[case(0, 12)]
    #[case(12, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    fn test_sphere_low_resolution_does_not_panic(#[case] lat: u32, #[case] lon: u32) {
        let mesh = sphere(1.0, lat, lon);
        let expected = match lon {
            0 => 0,
            1 => lat as usize,
            _ => lat as usize * ((lon as usize - 2) * 2 + 2),
        };
        assert_eq!(mesh.len(), expected);
    }

    #[rstest]
    #[case(3)]
    #[case(12)]
    #[case(40)]
    fn test_cylinder_and_cone_counts(#[case] divisions: u32) {
        assert_eq!(cylinder(2.0, 2.0, divisions).len(), 4 * divisions as usize);
        assert_eq!(cone(1.0, 2.0, divisions).len(), 2 * divisions as usize);
    }

    #[test]
    fn test_cylinder_extents() {
        let mesh = cylinder(1.5, 4.0, 12);
        for t in &mesh {
            for p in &t.points {
                assert!((p.y.abs() - 2.0).abs() < 1e-6);
                assert!((p.x * p.x + p.z * p.z).sqrt() <= 1.5 + 1e-5);
            }
        }
    }

    #[test]
    fn test_cone_converges_to_tip() {
        let mesh = cone(1.0, 2.0, 12);
        let tips = mesh
            .iter()
            .filter(|t| t.points.iter().any(|p| p.y == 1.0))
            .count();
        assert_eq!(tips, 12);
        for t in &mesh {
            for p in &t.points {
                assert!(p.y == 1.0 || p.y == -1.0);
            }
        }
    }

    #[test]
    fn test_zero_divisions_is_empty() {
        assert!(cylinder(1.0, 1.0, 0).is_empty());
        assert!(cone(1.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_generators_are_deterministic() {
        assert_eq!(sphere(2.0, 9, 7), sphere(2.0, 9, 7));
        assert_eq!(cylinder(2.0, 3.0, 5), cylinder(2.0, 3.0, 5));
    }
}
