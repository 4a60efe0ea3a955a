/// Command line options for the terminal viewer
use std::ffi::OsString;

use pico_args::Arguments;
use solidview_core::{parse_shape, parse_triple, Camera, Point, Scene, Shape, ShapeKind};

pub const HELP: &str = "\
solidview-terminal - render primitive solids in the terminal

USAGE:
  solidview-terminal [OPTIONS]

OPTIONS:
  --shape <DESCRIPTOR>  Add a shape, e.g. \"sphere radius=1 lat=16 center=2,0,0\" (repeatable)
  --eye <X,Y,Z>         Camera position
  --target <X,Y,Z>      Camera target [default: 0,0,0]
  --fov <DEGREES>       Vertical field of view [default: 60]
  --no-axes             Hide the axis overlay
  --log <FILTER>        Log filter, e.g. debug (written to stderr)
  -h, --help            Print this help

KEYS:
  arrows/WASD orbit   +/- zoom   Tab next shape   ,/. shrink/grow
  [/] coarser/finer   e/r spin   v hide/show      x axes
  1-4 add cuboid/sphere/cylinder/cone   Delete remove   q quit
";

#[derive(Debug)]
pub struct Options {
    pub help: bool,
    pub shapes: Vec<Shape>,
    pub eye: Option<Point>,
    pub target: Option<Point>,
    pub fov: Option<i32>,
    pub axes: bool,
    pub log: Option<String>,
}

impl Options {
    pub fn from_env() -> Result<Self, pico_args::Error> {
        Self::parse(Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self, pico_args::Error> {
        Self::parse(Arguments::from_vec(args))
    }

    fn parse(mut args: Arguments) -> Result<Self, pico_args::Error> {
        let options = Self {
            help: args.contains(["-h", "--help"]),
            axes: !args.contains("--no-axes"),
            shapes: args.values_from_fn("--shape", parse_shape)?,
            eye: args.opt_value_from_fn("--eye", parse_triple)?,
            target: args.opt_value_from_fn("--target", parse_triple)?,
            fov: args.opt_value_from_str("--fov")?,
            log: args.opt_value_from_str("--log")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            log::warn!("ignoring unused arguments: {rest:?}");
        }
        Ok(options)
    }

    /// Build the scene to show: the given shapes, or one of each primitive
    /// side by side when none were given.
    pub fn scene(&self) -> Scene {
        let mut camera = Camera::default();
        let mut scene = Scene::new(camera);

        if self.shapes.is_empty() {
            let demo = [
                (ShapeKind::cuboid(), -6.5),
                (ShapeKind::sphere(), -2.5),
                (ShapeKind::cylinder(), 2.0),
                (ShapeKind::cone(), 5.5),
            ];
            for (kind, x) in demo {
                scene.add(Shape::new(kind).with_center(Point::new(x, 0.0, 0.0)));
            }
            camera.zoom(3.0);
        } else {
            for shape in &self.shapes {
                scene.add(shape.clone());
            }
        }

        if let Some(target) = self.target {
            camera.target = target;
        }
        if let Some(eye) = self.eye {
            camera.position = eye;
        }
        if let Some(fov) = self.fov {
            camera.fov = fov;
        }
        if camera.is_degenerate() {
            log::warn!("camera looks straight along the up axis or at itself; nothing will render");
        }

        scene.camera = camera;
        scene.show_axes = self.axes;
        scene
    }
}
