/// Solidview Web - WASM front end drawing the software rasterizer into a canvas
///
/// The framebuffer is filled on the Rust side and copied into a 2D canvas
/// context as `ImageData`; no GPU APIs are involved.
use solidview_core::{parse_shape, Camera, FrameBuffer, PixelBuffer, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

#[wasm_bindgen]
pub struct WebViewer {
    scene: Scene,
    framebuffer: FrameBuffer,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebViewer {
        WebViewer {
            scene: Scene::new(Camera::default()),
            framebuffer: FrameBuffer::new(width as usize, height as usize),
        }
    }

    /// Add a shape from a descriptor such as `"sphere radius=1 center=2,0,0"`.
    /// Returns the index of the new shape.
    pub fn add_shape(&mut self, descriptor: &str) -> Result<usize, JsValue> {
        let shape = parse_shape(descriptor).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.scene.add(shape))
    }

    pub fn clear_shapes(&mut self) {
        self.scene.clear();
    }

    pub fn shape_count(&self) -> usize {
        self.scene.len()
    }

    pub fn set_axes(&mut self, visible: bool) {
        self.scene.show_axes = visible;
    }

    /// Orbit the camera around its target (radians)
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.scene.camera.orbit(d_azimuth, d_elevation);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.scene.camera.zoom(factor);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width as usize, height as usize);
    }

    /// Render the scene and copy it into the canvas with id `canvas_id`
    pub fn render(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        self.scene.render(&mut self.framebuffer);

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<HtmlCanvasElement>()?;

        let width = self.framebuffer.width() as u32;
        let height = self.framebuffer.height() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let rgba = self.framebuffer.to_rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&rgba), width, height)?;
        context.put_image_data(&image, 0.0, 0.0)
    }

    /// Render and return the frame as RGBA bytes, row by row
    pub fn pixels(&mut self) -> Vec<u8> {
        self.scene.render(&mut self.framebuffer);
        self.framebuffer.to_rgba()
    }

    pub fn status(&self) -> String {
        format!(
            "{} shapes, {} triangles | {}",
            self.scene.len(),
            self.scene.triangle_count(),
            self.scene.camera.display_name()
        )
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_have_frame_size() {
        let mut viewer = WebViewer::new(32, 16);
        assert_eq!(viewer.pixels().len(), 32 * 16 * 4);
        viewer.resize(8, 8);
        assert_eq!(viewer.pixels().len(), 8 * 8 * 4);
    }

    #[test]
    fn test_add_and_clear_shapes() {
        let mut viewer = WebViewer::new(64, 64);
        assert_eq!(viewer.add_shape("cuboid x=1").ok(), Some(0));
        assert_eq!(viewer.add_shape("cone divisions=8").ok(), Some(1));
        assert_eq!(viewer.shape_count(), 2);
        assert!(viewer.status().starts_with("2 shapes, 28 triangles"));

        viewer.clear_shapes();
        assert_eq!(viewer.shape_count(), 0);
    }

    #[test]
    fn test_cuboid_shows_up_in_pixels() {
        let mut viewer = WebViewer::new(64, 64);
        viewer.set_axes(false);
        viewer.add_shape("cuboid color=#ff0000").ok();
        let rgba = viewer.pixels();
        assert!(rgba.chunks(4).any(|px| px == [255, 0, 0, 255]));
    }
}
