//! End-to-end: descriptors to shapes to pixels

use solidview_core::{
    fill_triangle, parse_shapes, Camera, Color, FrameBuffer, Point, Scene, Shape, ShapeKind,
    Triangle,
};

fn scene_from(text: &str, camera: Camera) -> Scene {
    let mut scene = Scene::new(camera);
    scene.show_axes = false;
    for shape in parse_shapes(text).unwrap() {
        scene.add(shape);
    }
    scene
}

#[test]
fn test_each_solid_renders_its_color() {
    let camera = Camera::new(Point::new(0.0, 0.0, 6.0), Point::origin());
    let descriptors = [
        ("cuboid", Color::GOLD),
        ("sphere radius=1", Color::CORNFLOWER_BLUE),
        ("cylinder radius=1", Color::PALE_VIOLET_RED),
        ("cone", Color::MOCCASIN),
    ];

    for (text, color) in descriptors {
        let scene = scene_from(text, camera);
        let mut buffer = FrameBuffer::new(80, 60);
        let stats = scene.render(&mut buffer);

        assert!(stats.drawn > 0, "{text}");
        assert!(buffer.count(color) > 50, "{text}");
        assert_eq!(buffer.get(0, 0), Some(Color::BACKGROUND), "{text}");
    }
}

#[test]
fn test_placement_moves_pixels() {
    let camera = Camera::new(Point::new(0.0, 0.0, 12.0), Point::origin());
    let scene = scene_from("cuboid x=1 y=1 z=1 center=3,0,0 color=#ff00ff", camera);
    let mut buffer = FrameBuffer::new(80, 60);
    scene.render(&mut buffer);

    let magenta = Color::rgb(255, 0, 255);
    assert!(buffer.count(magenta) > 0);
    for y in 0..60 {
        for x in 0..40 {
            assert_ne!(buffer.get(x, y), Some(magenta), "({x}, {y}) left of centre");
        }
    }
}

#[test]
fn test_hidden_and_degenerate_shapes_draw_nothing() {
    let scene = scene_from(
        "sphere visible=false\n\
         cuboid x=2 y=2 z=0\n\
         cylinder divisions=0",
        Camera::new(Point::new(0.0, 0.0, 12.0), Point::origin()),
    );
    let mut buffer = FrameBuffer::new(40, 40);
    let stats = scene.render(&mut buffer);

    // The flattened box still shows its front and back faces
    assert_eq!(stats.drawn + stats.skipped, 12);
    assert_eq!(buffer.count(Color::CORNFLOWER_BLUE), 0);
    assert_eq!(buffer.count(Color::PALE_VIOLET_RED), 0);
}

#[test]
fn test_regenerated_shape_renders_new_geometry() {
    let camera = Camera::new(Point::new(0.0, 0.0, 12.0), Point::origin());
    let mut scene = Scene::new(camera);
    scene.show_axes = false;
    let index = scene.add(Shape::new(ShapeKind::Cuboid { x: 2.0, y: 2.0, z: 2.0 }));

    let mut small = FrameBuffer::new(80, 60);
    scene.render(&mut small);

    if let Some(shape) = scene.get_mut(index) {
        shape.edit(|kind| {
            if let ShapeKind::Cuboid { x, .. } = kind {
                *x = 4.0;
            }
        });
    }
    let mut wide = FrameBuffer::new(80, 60);
    scene.render(&mut wide);

    assert!(wide.count(Color::GOLD) > small.count(Color::GOLD));
}

#[test]
fn test_tiled_quad_has_no_seams() {
    let mut buffer = FrameBuffer::new(40, 40);
    buffer.clear(Color::BLACK);
    let corners = [
        Point::new(3.2, 4.7, 0.0),
        Point::new(33.9, 2.1, 0.0),
        Point::new(36.4, 31.3, 0.0),
        Point::new(5.5, 35.8, 0.0),
    ];
    fill_triangle(&mut buffer, &Triangle::new(corners[0], corners[1], corners[2]), Color::WHITE);
    fill_triangle(&mut buffer, &Triangle::new(corners[0], corners[2], corners[3]), Color::WHITE);

    // The shared diagonal crosses the middle of the quad
    for i in 8..30 {
        let t = i as f32 / 40.0;
        let x = corners[0].x + t * (corners[2].x - corners[0].x);
        let y = corners[0].y + t * (corners[2].y - corners[0].y);
        assert_eq!(buffer.get(x as usize, y as usize), Some(Color::WHITE), "gap near ({x}, {y})");
    }
}
