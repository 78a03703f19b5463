use crate::error::RenderError;

/// Surface response: how much of the mirrored bounce a shape keeps and how
/// tight its specular highlight is.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub reflectivity: f32,
    pub specular_exponent: f32,
}

impl Material {
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.reflectivity.is_finite() || !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(RenderError::config(format!(
                "reflectivity must be within [0, 1], got {}",
                self.reflectivity
            )));
        }
        if !self.specular_exponent.is_finite() || self.specular_exponent < 0.0 {
            return Err(RenderError::config(format!(
                "specular exponent must be finite and >= 0, got {}",
                self.specular_exponent
            )));
        }
        Ok(())
    }
}
