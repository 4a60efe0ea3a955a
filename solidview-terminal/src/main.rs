/// Solidview terminal viewer
///
/// Renders cuboids, spheres, cylinders and cones with the software
/// rasterizer, two pixels per character cell.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - +/-: Zoom
///   - Tab: Select next shape
///   - Q/ESC: Quit
use anyhow::Context;
use solidview_terminal::cli::{Options, HELP};
use solidview_terminal::logging::{init_logging, LoggingConfig};
use solidview_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    let options = Options::from_env().context("invalid command line")?;
    if options.help {
        print!("{HELP}");
        return Ok(());
    }

    init_logging(LoggingConfig {
        env_filter: options.log.clone(),
        ..Default::default()
    });

    let scene = options.scene();
    log::info!(
        "starting with {} shapes, {} triangles",
        scene.len(),
        scene.triangle_count()
    );

    let mut app = TerminalApp::new(scene).context("cannot query terminal size")?;
    app.run().context("terminal viewer failed")?;
    Ok(())
}
