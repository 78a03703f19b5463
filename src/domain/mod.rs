pub mod light;
pub mod material;
pub mod scene;
pub mod shape;

pub use light::Light;
pub use material::Material;
pub use scene::{Hit, Scene};
pub use shape::{Shape, Sphere, Wall};

use crate::error::RenderError;
use crate::math::Vec3;

pub(crate) fn validate_vec3_finite(value: Vec3, field: &str) -> Result<(), RenderError> {
    if !value.is_finite() {
        return Err(RenderError::config(format!(
            "{field} components must be finite, got ({}, {}, {})",
            value.x, value.y, value.z
        )));
    }
    Ok(())
}

pub(crate) fn validate_color(value: Vec3, field: &str) -> Result<(), RenderError> {
    validate_vec3_finite(value, field)?;
    let in_range = |c: f32| (0.0..=255.0).contains(&c);
    if !in_range(value.x) || !in_range(value.y) || !in_range(value.z) {
        return Err(RenderError::config(format!(
            "{field} components must be within [0, 255], got ({}, {}, {})",
            value.x, value.y, value.z
        )));
    }
    Ok(())
}
