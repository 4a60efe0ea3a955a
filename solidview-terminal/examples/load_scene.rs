/// Example: Load a scene file and show it in the terminal
///
/// A scene file holds one shape descriptor per line, e.g.
///
///   # two solids
///   cuboid x=1 y=3 z=1 center=-2,0,0
///   sphere radius=1.5 lat=20 lon=20 center=2,0,0 color=#ff8800
///
/// Usage: cargo run --example load_scene -- path/to/scene.txt
use std::env;
use std::fs;

use anyhow::Context;
use solidview_core::{parse_shapes, Camera, Scene};
use solidview_terminal::logging::{init_logging, LoggingConfig};
use solidview_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: {} <scene-file>", args[0]);
        return Ok(());
    };

    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let shapes = parse_shapes(&text).with_context(|| format!("failed to parse {path}"))?;

    let mut camera = Camera::default();
    camera.zoom(2.0);
    let mut scene = Scene::new(camera);
    for shape in shapes {
        scene.add(shape);
    }

    println!("Loaded {} shapes, {} triangles", scene.len(), scene.triangle_count());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene)?;
    app.run()?;
    Ok(())
}
