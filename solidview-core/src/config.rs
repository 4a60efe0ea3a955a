//! One-line shape descriptors.
//!
//! Shapes are configured with plain `key=value` pairs after the kind name:
//!
//! ```text
//! sphere radius=1.5 lat=16 lon=12 center=2,0,-1 color=#6495ed
//! cuboid x=2 y=1 z=3 rotation=0,0.5,0 visible=false
//! ```
//!
//! Kind parameters: `x`, `y`, `z` for cuboids; `radius`, `lat`, `lon` for
//! spheres; `radius`, `height`, `divisions` for cylinders and cones. Every
//! kind also takes `center`, `scale`, `rotation` (radians), `color` and
//! `visible`. Omitted parameters keep their defaults.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::{alpha1, char, multispace0, multispace1, u32 as decimal_u32},
    combinator::{all_consuming, map_res, value},
    multi::many0,
    number::complete::float,
    sequence::{preceded, separated_pair, tuple},
    IResult,
};

use crate::color::Color;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::{direction, Point};
use crate::shape::{Shape, ShapeKind};

const COMMON_KEYS: &[&str] = &["center", "scale", "rotation", "color", "visible"];

type Descriptor<'a> = (&'a str, Vec<(&'a str, &'a str)>);

fn key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn raw_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn parameter(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(key, char('='), raw_value)(input)
}

fn descriptor(input: &str) -> IResult<&str, Descriptor<'_>> {
    let (input, kind) = preceded(multispace0, alpha1)(input)?;
    let (input, parameters) = many0(preceded(multispace1, parameter))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (kind, parameters)))
}

fn triple(input: &str) -> IResult<&str, (f32, f32, f32)> {
    tuple((
        float,
        preceded(char(','), float),
        preceded(char(','), float),
    ))(input)
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    let (input, (r, g, b)) = preceded(char('#'), tuple((hex_byte, hex_byte, hex_byte)))(input)?;
    Ok((input, Color::rgb(r, g, b)))
}

fn boolean(input: &str) -> IResult<&str, bool> {
    alt((value(true, tag("true")), value(false, tag("false"))))(input)
}

/// Run `parser` over the whole of `raw`
fn parse_value<'a, T, P>(key: &str, raw: &'a str, expected: &'static str, parser: P) -> ConfigResult<T>
where
    P: FnMut(&'a str) -> IResult<&'a str, T>,
{
    all_consuming(parser)(raw)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        })
}

fn number(key: &str, raw: &str) -> ConfigResult<f32> {
    parse_value(key, raw, "a number", float)
}

fn count(key: &str, raw: &str) -> ConfigResult<u32> {
    parse_value(key, raw, "a non-negative integer", decimal_u32)
}

/// Apply a kind-specific parameter. `Ok(false)` when the kind has no such key.
fn apply_kind_parameter(kind: &mut ShapeKind, key: &str, raw: &str) -> ConfigResult<bool> {
    match kind {
        ShapeKind::Cuboid { x, y, z } => match key {
            "x" => *x = number(key, raw)?,
            "y" => *y = number(key, raw)?,
            "z" => *z = number(key, raw)?,
            _ => return Ok(false),
        },
        ShapeKind::Sphere { radius, lat, lon } => match key {
            "radius" => *radius = number(key, raw)?,
            "lat" => *lat = count(key, raw)?,
            "lon" => *lon = count(key, raw)?,
            _ => return Ok(false),
        },
        ShapeKind::Cylinder { radius, height, divisions }
        | ShapeKind::Cone { radius, height, divisions } => match key {
            "radius" => *radius = number(key, raw)?,
            "height" => *height = number(key, raw)?,
            "divisions" => *divisions = count(key, raw)?,
            _ => return Ok(false),
        },
    }
    Ok(true)
}

fn apply_common_parameter(shape: &mut Shape, key: &str, raw: &str) -> ConfigResult<()> {
    match key {
        "center" => {
            let (x, y, z) = parse_value(key, raw, "x,y,z", triple)?;
            shape.center = Point::new(x, y, z);
        }
        "scale" => {
            let (x, y, z) = parse_value(key, raw, "x,y,z", triple)?;
            shape.set_scale(direction(x, y, z));
        }
        "rotation" => {
            let (x, y, z) = parse_value(key, raw, "x,y,z", triple)?;
            shape.set_rotation(direction(x, y, z));
        }
        "color" => shape.color = parse_color(raw)?,
        "visible" => shape.visible = parse_value(key, raw, "true or false", boolean)?,
        _ => {
            return Err(ConfigError::UnknownParameter {
                shape: shape.kind().label(),
                key: key.to_string(),
            })
        }
    }
    Ok(())
}

/// Parse `x,y,z` into a point
pub fn parse_triple(text: &str) -> ConfigResult<Point> {
    let (x, y, z) = parse_value("point", text.trim(), "x,y,z", triple)?;
    Ok(Point::new(x, y, z))
}

/// Parse `#rrggbb`
pub fn parse_color(text: &str) -> ConfigResult<Color> {
    parse_value("color", text.trim(), "#rrggbb", hex_color)
}

/// Build a shape from a one-line descriptor
pub fn parse_shape(text: &str) -> ConfigResult<Shape> {
    let (name, parameters) = all_consuming(descriptor)(text)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ConfigError::Syntax(text.trim().to_string()))?;

    let mut kind = match name.to_ascii_lowercase().as_str() {
        "cuboid" => ShapeKind::cuboid(),
        "sphere" => ShapeKind::sphere(),
        "cylinder" => ShapeKind::cylinder(),
        "cone" => ShapeKind::cone(),
        _ => return Err(ConfigError::UnknownShape(name.to_string())),
    };

    for &(key, raw) in &parameters {
        if !apply_kind_parameter(&mut kind, key, raw)? && !COMMON_KEYS.contains(&key) {
            return Err(ConfigError::UnknownParameter {
                shape: kind.label(),
                key: key.to_string(),
            });
        }
    }

    let mut shape = Shape::new(kind);
    for &(key, raw) in parameters.iter().filter(|(key, _)| COMMON_KEYS.contains(key)) {
        apply_common_parameter(&mut shape, key, raw)?;
    }

    log::debug!("parsed `{}` as {}", text.trim(), shape.display_name());
    Ok(shape)
}

/// Parse one descriptor per line. Blank lines and lines starting with `#`
/// are skipped.
pub fn parse_shapes(text: &str) -> ConfigResult<Vec<Shape>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_shape)
        .collect()
}
