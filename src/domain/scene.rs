use crate::error::RenderError;
use crate::math::{Ray, Vec3};
use crate::render::Viewport;

use super::{validate_vec3_finite, Light, Shape};

/// Everything a render reads: immutable for its whole duration.
#[derive(Clone, Debug)]
pub struct Scene {
    pub viewport: Viewport,
    pub shapes: Vec<Shape>,
    pub camera_position: Vec3,
    pub lights: Vec<Light>,
    pub max_depth: u32,
}

/// Nearest intersection along a ray.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub t: f32,
    pub point: Vec3,
    pub shape: &'a Shape,
}

impl Scene {
    pub fn new(
        viewport: Viewport,
        shapes: Vec<Shape>,
        camera_position: Vec3,
        lights: Vec<Light>,
        max_depth: u32,
    ) -> Result<Self, RenderError> {
        validate_vec3_finite(camera_position, "camera position")?;
        for shape in &shapes {
            shape.validate()?;
        }
        if lights.is_empty() {
            return Err(RenderError::config(
                "at least one light must exist in the scene",
            ));
        }
        for light in &lights {
            light.validate_physical()?;
        }

        Ok(Self {
            viewport,
            shapes,
            camera_position,
            lights,
            max_depth,
        })
    }

    /// Tests every shape in sequence order and keeps the strictly smallest
    /// hit distance. No spatial pruning; cost is linear in the shape count.
    pub fn closest_hit(&self, ray: Ray) -> Option<Hit<'_>> {
        let mut closest: Option<(f32, &Shape)> = None;
        for shape in &self.shapes {
            let Some(t) = shape.intersect(ray) else {
                continue;
            };
            match closest {
                Some((nearest, _)) if nearest <= t => {}
                _ => closest = Some((t, shape)),
            }
        }

        closest.map(|(t, shape)| Hit {
            t,
            point: ray.at(t),
            shape,
        })
    }
}
