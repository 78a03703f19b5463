use crate::error::RenderError;
use crate::math::Vec3;

use super::{validate_color, validate_vec3_finite};

/// Point light. `color` uses the same [0, 255] channel range as shape
/// colors and contributes to the specular term only.
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Light {
    pub fn validate_physical(&self) -> Result<(), RenderError> {
        validate_vec3_finite(self.position, "light position")?;
        validate_color(self.color, "light color")?;
        Ok(())
    }
}
