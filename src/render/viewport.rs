use crate::domain::validate_color;
use crate::error::RenderError;
use crate::math::{Ray, Vec3};

// View-plane bounds. Horizontal extent is fixed; the vertical extent is
// scaled by the inverse aspect ratio so pixels stay square.
const LEFT: f32 = -1.0;
const RIGHT: f32 = 1.0;

/// Maps the discrete pixel grid onto the continuous view plane at z = 0.
/// All derived geometry is fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub background: Vec3,
    top: f32,
    x_step: f32,
    y_step: f32,
}

impl Viewport {
    pub fn new(pixel_width: u32, pixel_height: u32, background: Vec3) -> Result<Self, RenderError> {
        // A single row or column would make the per-pixel step divide by
        // zero, so both dimensions need at least two pixels.
        if pixel_width <= 1 || pixel_height <= 1 {
            return Err(RenderError::config(format!(
                "viewport must be at least 2x2 pixels, got {pixel_width}x{pixel_height}"
            )));
        }
        validate_color(background, "background color")?;

        let aspect = pixel_width as f32 / pixel_height as f32;
        let top = -1.0 / aspect;
        let bottom = 1.0 / aspect;
        let x_step = (RIGHT - LEFT) / ((pixel_width - 1) as f32);
        let y_step = (bottom - top) / ((pixel_height - 1) as f32);

        Ok(Self {
            pixel_width,
            pixel_height,
            background,
            top,
            x_step,
            y_step,
        })
    }

    /// Primary ray for pixel `(col, row)`: from the camera through the
    /// pixel's point on the view plane. Fails if the camera sits exactly on
    /// that point (zero direction).
    pub fn pixel_to_ray(&self, camera: Vec3, col: u32, row: u32) -> Result<Ray, RenderError> {
        let x = LEFT + (col as f32 * self.x_step);
        let y = self.top + (row as f32 * self.y_step);
        let point = Vec3::new(x, y, 0.0);
        Ray::new(camera, point - camera)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_width as usize * self.pixel_height as usize
    }
}
