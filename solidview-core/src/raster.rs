/// Scanline triangle rasterizer and the pixel buffers it draws into
use crate::color::Color;
use crate::geometry::{Point, ScreenPoint, Triangle};

/// A grid of pixels the rasterizer writes into.
///
/// The rasterizer clips every write to `[0, width) x [0, height)` before
/// calling `set_pixel`, so implementations may index without checking.
pub trait PixelBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);
}

/// Row-major in-memory color buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Resize and clear; a no-op when the size is unchanged
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Tightly packed RGBA bytes, row-major
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }
}

impl PixelBuffer for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color;
    }
}

/// Index of the first pixel whose centre lies at or after `v`
fn first_center(v: f32) -> i32 {
    (v - 0.5).ceil() as i32
}

/// Triangle edge as seen by the scanline walk. Slope is dx/dy, zero for
/// horizontal edges.
struct Edge {
    x: f32,
    y: f32,
    slope: f32,
}

impl Edge {
    fn new(from: &Point, to: &Point) -> Self {
        let dy = to.y - from.y;
        let slope = if dy != 0.0 { (to.x - from.x) / dy } else { 0.0 };
        Self {
            x: from.x,
            y: from.y,
            slope,
        }
    }

    fn x_at(&self, y: f32) -> f32 {
        self.x + self.slope * (y - self.y)
    }
}

/// Fill rows whose centre lies in `[bottom, top)`, walking from the top
/// row down, between the `left` and `right` edges.
fn fill_rows<B>(buffer: &mut B, bottom: f32, top: f32, left: &Edge, right: &Edge, color: Color)
where
    B: PixelBuffer + ?Sized,
{
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let first = first_center(bottom).max(0);
    let last = first_center(top).min(height);

    for row in (first..last).rev() {
        let y = row as f32 + 0.5;
        let start = first_center(left.x_at(y)).max(0);
        let end = first_center(right.x_at(y)).min(width);
        for column in start..end {
            buffer.set_pixel(column as usize, row as usize, color);
        }
    }
}

/// Fill a screen-space triangle with a flat color.
///
/// A pixel is covered when its centre lies inside the triangle; the right
/// end of every span and the top of the row range are exclusive, so
/// triangles sharing an edge never paint the same pixel twice. `z` is
/// ignored. Triangles with no vertical extent paint nothing.
pub fn fill_triangle<B>(buffer: &mut B, triangle: &Triangle, color: Color)
where
    B: PixelBuffer + ?Sized,
{
    let mut points = triangle.points;
    // Stable sort: points with equal y keep their input order
    points.sort_by(|p, q| q.y.total_cmp(&p.y));
    let [a, b, c] = points;

    let ab = Edge::new(&a, &b);
    let ac = Edge::new(&a, &c);
    let bc = Edge::new(&b, &c);

    // Below A a larger slope means a smaller x, so A-B is the left boundary
    // of the upper half. Equal slopes take the right-hand branch. With a
    // flat top there is no upper half and B's side follows from x.
    let b_on_left = if a.y > b.y {
        ab.slope > ac.slope
    } else {
        b.x < a.x
    };

    if b_on_left {
        fill_rows(buffer, b.y, a.y, &ab, &ac, color);
        fill_rows(buffer, c.y, b.y, &bc, &ac, color);
    } else {
        fill_rows(buffer, b.y, a.y, &ac, &ab, color);
        fill_rows(buffer, c.y, b.y, &ac, &bc, color);
    }
}

/// Liang-Barsky clip of a segment against `[0, max_x] x [0, max_y]`
fn clip_segment(from: &Point, to: &Point, max_x: f32, max_y: f32) -> Option<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, from.x),
        (dx, max_x - from.x),
        (-dy, from.y),
        (dy, max_y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f32| Point::new(from.x + t * dx, from.y + t * dy, from.z);
    Some((at(t0), at(t1)))
}

/// Bresenham line between two screen-space points, clipped to the buffer
pub fn draw_line<B>(buffer: &mut B, from: &Point, to: &Point, color: Color)
where
    B: PixelBuffer + ?Sized,
{
    let (width, height) = (buffer.width(), buffer.height());
    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    if width == 0 || height == 0 || !finite(from) || !finite(to) {
        return;
    }
    let Some((from, to)) = clip_segment(from, to, (width - 1) as f32, (height - 1) as f32) else {
        return;
    };

    let snap = |p: Point| ScreenPoint::from(Point::new(p.x.round(), p.y.round(), p.z));
    let ScreenPoint { x: mut x, y: mut y } = snap(from);
    let end = snap(to);
    let dx = (end.x - x).abs();
    let dy = -(end.y - y).abs();
    let sx = if x < end.x { 1 } else { -1 };
    let sy = if y < end.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..width as i32).contains(&x) && (0..height as i32).contains(&y) {
            buffer.set_pixel(x as usize, y as usize, color);
        }
        if x == end.x && y == end.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
