use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use image::{Rgb, RgbImage};
use log::{debug, info};
use rayon::prelude::*;

use crate::domain::Scene;
use crate::error::RenderError;
use crate::math::{reflect, Ray, Vec3};

/// Offset along the surface normal before spawning the bounce ray, so the
/// reflection does not immediately re-hit its own surface.
const RAY_BIAS: f32 = 0.001;

/// Owns one render of an immutable scene. The pixel counter is the only
/// shared mutable state and may be polled from other threads while
/// `render` runs.
pub struct Renderer {
    scene: Scene,
    pixels_done: AtomicUsize,
    cancelled: AtomicBool,
}

impl Renderer {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            pixels_done: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Percentage of pixels written so far, 0..=100. Monotonic over the
    /// course of a render; exactly 100 once `render` has returned an image.
    pub fn progress(&self) -> u8 {
        let total = self.scene.viewport.pixel_count();
        let done = self.pixels_done.load(Ordering::Relaxed).min(total);
        ((done * 100) / total) as u8
    }

    /// Requests a cooperative stop; the render loop checks between
    /// scanlines and bails out with `RenderError::Cancelled`.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Renders every pixel in row-major order and returns the finished
    /// buffer. Scanlines are distributed over worker threads; each pixel
    /// depends only on the immutable scene, so the output matches the
    /// sequential reference exactly.
    pub fn render(&self) -> Result<RgbImage, RenderError> {
        let width = self.scene.viewport.pixel_width as usize;
        let height = self.scene.viewport.pixel_height as usize;
        info!(
            "rendering {}x{} ({} shapes, {} lights, depth limit {})",
            width,
            height,
            self.scene.shapes.len(),
            self.scene.lights.len(),
            self.scene.max_depth
        );

        let mut color_buffer = vec![Vec3::splat(0.0); width * height];
        color_buffer
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(row, colors)| {
                if self.cancelled.load(Ordering::Relaxed) {
                    return Err(RenderError::Cancelled);
                }
                for (col, slot) in colors.iter_mut().enumerate() {
                    let ray = self.scene.viewport.pixel_to_ray(
                        self.scene.camera_position,
                        col as u32,
                        row as u32,
                    )?;
                    *slot = self.ray_bounce(ray, 0)?;
                    self.pixels_done.fetch_add(1, Ordering::Relaxed);
                }
                Ok(())
            })?;

        let mut image = RgbImage::new(width as u32, height as u32);
        for row in 0..height {
            for col in 0..width {
                let color = color_buffer[(row * width) + col];
                image.put_pixel(col as u32, row as u32, to_rgb(color));
            }
        }

        self.pixels_done.store(width * height, Ordering::Relaxed);
        debug!("render finished, {} pixels written", width * height);
        Ok(image)
    }

    /// Recursive shading. Each level either terminates on the depth limit
    /// or a miss (background color), or sums per light: the diffuse and
    /// specular terms plus one mirrored bounce at depth + 1. The sum stays
    /// unclamped; clamping happens at the pixel-write boundary. Work grows
    /// as lights^depth, which the depth limit keeps bounded.
    fn ray_bounce(&self, ray: Ray, depth: u32) -> Result<Vec3, RenderError> {
        let scene = &self.scene;
        if depth == scene.max_depth {
            return Ok(scene.viewport.background);
        }
        let Some(hit) = scene.closest_hit(ray) else {
            return Ok(scene.viewport.background);
        };

        let normal = hit.shape.surface_normal_at(hit.point)?;
        let material = hit.shape.material();
        let mut color = Vec3::splat(0.0);
        for light in &scene.lights {
            let diffuse = hit.shape.color() * normal.dot(ray.direction).max(0.0);

            let to_hit_from_light = (hit.point - light.position).normalize()?;
            let to_hit_from_camera = (hit.point - scene.camera_position).normalize()?;
            let light_mirror = reflect(to_hit_from_light, normal);
            let halfway = (-to_hit_from_light + to_hit_from_camera).normalize()?;
            let highlight = halfway
                .dot(light_mirror)
                .max(0.0)
                .powf(material.specular_exponent);
            let specular = light.color * highlight;

            let bounce = Ray::new(hit.point + (normal * RAY_BIAS), reflect(ray.direction, normal))?;
            let bounced = self.ray_bounce(bounce, depth + 1)?;

            color = color + diffuse + specular + bounced;
        }

        Ok(color)
    }
}

/// Rounds and clamps one channel into the 8-bit pixel range.
fn to_rgb(color: Vec3) -> Rgb<u8> {
    let channel = |c: f32| c.round().clamp(0.0, 255.0) as u8;
    Rgb([channel(color.x), channel(color.y), channel(color.z)])
}

#[cfg(test)]
mod tests {
    use crate::domain::{Light, Material, Shape, Sphere};
    use crate::render::Viewport;

    use super::*;

    fn single_sphere_scene(max_depth: u32) -> Scene {
        Scene::new(
            Viewport::new(8, 8, Vec3::new(10.0, 20.0, 30.0)).unwrap(),
            vec![Shape::Sphere(Sphere {
                center: Vec3::new(0.0, 0.0, 5.0),
                radius: 1.0,
                color: Vec3::new(200.0, 40.0, 40.0),
                material: Material {
                    reflectivity: 0.2,
                    specular_exponent: 16.0,
                },
            })],
            Vec3::new(0.0, 0.0, -1.0),
            vec![Light {
                position: Vec3::new(0.0, -10.0, 10.0),
                color: Vec3::splat(255.0),
            }],
            max_depth,
        )
        .unwrap()
    }

    #[test]
    fn depth_limit_zero_renders_uniform_background() {
        let renderer = Renderer::new(single_sphere_scene(0));
        let image = renderer.render().unwrap();
        for pixel in image.pixels() {
            assert_eq!(*pixel, Rgb([10, 20, 30]));
        }
    }

    #[test]
    fn miss_returns_background_unrounded() {
        let renderer = Renderer::new(single_sphere_scene(2));
        let away = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(
            renderer.ray_bounce(away, 0).unwrap(),
            Vec3::new(10.0, 20.0, 30.0)
        );
    }

    #[test]
    fn progress_is_complete_after_render() {
        let renderer = Renderer::new(single_sphere_scene(1));
        assert_eq!(renderer.progress(), 0);
        renderer.render().unwrap();
        assert_eq!(renderer.progress(), 100);
    }

    #[test]
    fn cancelled_render_fails_without_an_image() {
        let renderer = Renderer::new(single_sphere_scene(1));
        renderer.cancel();
        assert!(matches!(renderer.render(), Err(RenderError::Cancelled)));
        assert!(renderer.progress() < 100);
    }

    #[test]
    fn clamps_and_rounds_at_the_pixel_boundary() {
        assert_eq!(to_rgb(Vec3::new(-4.0, 254.6, 400.0)), Rgb([0, 255, 255]));
        assert_eq!(to_rgb(Vec3::new(0.4, 0.5, 0.6)), Rgb([0, 1, 1]));
    }
}
