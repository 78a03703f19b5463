use serde::Deserialize;

use crate::domain::{Light, Material, Scene, Shape, Sphere, Wall};
use crate::error::RenderError;
use crate::math::Vec3;
use crate::render::Viewport;

/// JSON scene description, the hand-off format from whatever front end
/// collected the parameters. Field names mirror the form fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    pub sky_color: [f32; 3],
    pub camera_position: [f32; 3],
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub walls: Vec<WallDescription>,
    pub lights: Vec<LightDescription>,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub reflectivity: f32,
    pub specular_exponent: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallDescription {
    pub left_upper: [f32; 3],
    pub left_lower: [f32; 3],
    pub right_upper: [f32; 3],
    pub right_lower: [f32; 3],
    pub color: [f32; 3],
    pub reflectivity: f32,
    pub specular_exponent: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightDescription {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const fn default_max_depth() -> u32 {
    8
}

fn default_output_path() -> String {
    "render.png".to_string()
}

pub fn vec3_from(value: [f32; 3]) -> Vec3 {
    Vec3::new(value[0], value[1], value[2])
}

impl SceneDescription {
    /// Validates every parameter and assembles the immutable scene.
    /// Spheres keep their listed order and come before walls, so
    /// closest-hit ties resolve the same way as in the source description.
    pub fn build(&self) -> Result<Scene, RenderError> {
        let viewport = Viewport::new(self.width, self.height, vec3_from(self.sky_color))?;

        let mut shapes = Vec::with_capacity(self.spheres.len() + self.walls.len());
        for sphere in &self.spheres {
            shapes.push(Shape::Sphere(Sphere {
                center: vec3_from(sphere.center),
                radius: sphere.radius,
                color: vec3_from(sphere.color),
                material: Material {
                    reflectivity: sphere.reflectivity,
                    specular_exponent: sphere.specular_exponent,
                },
            }));
        }
        for wall in &self.walls {
            shapes.push(Shape::Wall(Wall::new(
                vec3_from(wall.left_upper),
                vec3_from(wall.left_lower),
                vec3_from(wall.right_upper),
                vec3_from(wall.right_lower),
                vec3_from(wall.color),
                Material {
                    reflectivity: wall.reflectivity,
                    specular_exponent: wall.specular_exponent,
                },
            )?));
        }

        let lights = self
            .lights
            .iter()
            .map(|light| Light {
                position: vec3_from(light.position),
                color: vec3_from(light.color),
            })
            .collect();

        Scene::new(
            viewport,
            shapes,
            vec3_from(self.camera_position),
            lights,
            self.max_depth,
        )
    }
}
