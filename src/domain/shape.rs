use crate::error::RenderError;
use crate::math::{Ray, Vec3};

use super::{validate_color, validate_vec3_finite, Material};

/// Walls count a hit as "inside" when the point falls within the
/// axis-aligned bounding box of the four corners, padded by this epsilon.
const CONTAINMENT_EPSILON: f32 = 0.001;

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Vec3,
    pub material: Material,
}

impl Sphere {
    /// Distance along `ray` to the near intersection, if any. Only the near
    /// quadratic root is considered, so rays starting inside the sphere do
    /// not hit it; the far root is never front-facing for an outside
    /// observer.
    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - (self.radius * self.radius);
        let discriminant = (b * b) - (4.0 * c);
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / 2.0;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    pub fn normal_at(&self, point: Vec3) -> Result<Vec3, RenderError> {
        (point - self.center).normalize()
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        validate_vec3_finite(self.center, "sphere center")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(RenderError::config(format!(
                "sphere radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        validate_color(self.color, "sphere color")?;
        self.material.validate()
    }
}

/// Planar quadrilateral. The four corners are assumed coplanar; the plane
/// normal is fixed at construction from two edges.
#[derive(Clone, Copy, Debug)]
pub struct Wall {
    pub left_upper: Vec3,
    pub left_lower: Vec3,
    pub right_upper: Vec3,
    pub right_lower: Vec3,
    pub color: Vec3,
    pub material: Material,
    normal: Vec3,
}

impl Wall {
    pub fn new(
        left_upper: Vec3,
        left_lower: Vec3,
        right_upper: Vec3,
        right_lower: Vec3,
        color: Vec3,
        material: Material,
    ) -> Result<Self, RenderError> {
        let normal = (left_upper - left_lower)
            .cross(right_upper - left_upper)
            .normalize()
            .map_err(|_| {
                RenderError::domain(format!(
                    "wall corners are collinear, plane normal is undefined \
                     (left_upper ({}, {}, {}))",
                    left_upper.x, left_upper.y, left_upper.z
                ))
            })?;

        Ok(Self {
            left_upper,
            left_lower,
            right_upper,
            right_lower,
            color,
            material,
            normal,
        })
    }

    pub fn plane_normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane normal oriented for shading: flipped once when any component
    /// is negative, which keeps the diffuse dot product non-negative for
    /// camera-facing walls.
    pub fn shading_normal(&self) -> Vec3 {
        if self.normal.x < 0.0 || self.normal.y < 0.0 || self.normal.z < 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }

    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        let denom = ray.direction.dot(self.normal);
        // Exact comparison: a ray lying in the plane counts as parallel.
        if denom == 0.0 {
            return None;
        }

        let t = (self.right_lower - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }

        if self.contains(ray.at(t)) {
            Some(t)
        } else {
            None
        }
    }

    /// Bounding-box containment, not a true inside-polygon test: points
    /// near the box corners of a non-rectangular quad are accepted even
    /// when they fall outside the quad itself.
    fn contains(&self, point: Vec3) -> bool {
        let low = self
            .left_upper
            .min(self.left_lower)
            .min(self.right_upper)
            .min(self.right_lower);
        let high = self
            .left_upper
            .max(self.left_lower)
            .max(self.right_upper)
            .max(self.right_lower);

        (point.x >= low.x - CONTAINMENT_EPSILON)
            && (point.x <= high.x + CONTAINMENT_EPSILON)
            && (point.y >= low.y - CONTAINMENT_EPSILON)
            && (point.y <= high.y + CONTAINMENT_EPSILON)
            && (point.z >= low.z - CONTAINMENT_EPSILON)
            && (point.z <= high.z + CONTAINMENT_EPSILON)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        validate_vec3_finite(self.left_upper, "wall corner")?;
        validate_vec3_finite(self.left_lower, "wall corner")?;
        validate_vec3_finite(self.right_upper, "wall corner")?;
        validate_vec3_finite(self.right_lower, "wall corner")?;
        validate_color(self.color, "wall color")?;
        self.material.validate()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Wall(Wall),
}

impl Shape {
    pub fn intersect(&self, ray: Ray) -> Option<f32> {
        match self {
            Self::Sphere(sphere) => sphere.intersect(ray),
            Self::Wall(wall) => wall.intersect(ray),
        }
    }

    pub fn surface_normal_at(&self, point: Vec3) -> Result<Vec3, RenderError> {
        match self {
            Self::Sphere(sphere) => sphere.normal_at(point),
            Self::Wall(wall) => Ok(wall.shading_normal()),
        }
    }

    pub fn color(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.color,
            Self::Wall(wall) => wall.color,
        }
    }

    pub fn material(&self) -> Material {
        match self {
            Self::Sphere(sphere) => sphere.material,
            Self::Wall(wall) => wall.material,
        }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        match self {
            Self::Sphere(sphere) => sphere.validate(),
            Self::Wall(wall) => wall.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matte() -> Material {
        Material {
            reflectivity: 0.0,
            specular_exponent: 8.0,
        }
    }

    fn unit_sphere_ahead() -> Sphere {
        Sphere {
            center: Vec3::new(0.0, 0.0, 5.0),
            radius: 1.0,
            color: Vec3::new(200.0, 40.0, 40.0),
            material: matte(),
        }
    }

    /// Trapezoid in the z = 5 plane: the right edge slants from
    /// (1, -1) up to (0, 1), so its bounding box is wider than the quad.
    fn slanted_wall() -> Wall {
        Wall::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(-1.0, 1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(90.0, 90.0, 220.0),
            matte(),
        )
        .unwrap()
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn sphere_head_on_hit_distance() {
        let sphere = unit_sphere_ahead();
        let t = sphere
            .intersect(ray(Vec3::splat(0.0), Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();
        // |origin - center| - radius
        assert_eq!(t, 4.0);
    }

    #[test]
    fn sphere_misses_ray_aimed_away() {
        let sphere = unit_sphere_ahead();
        assert!(sphere
            .intersect(ray(Vec3::splat(0.0), Vec3::new(0.0, 0.0, -1.0)))
            .is_none());
    }

    #[test]
    fn sphere_never_hits_from_inside() {
        let sphere = unit_sphere_ahead();
        let inside = ray(Vec3::new(0.0, 0.0, 4.5), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(inside).is_none());
    }

    #[test]
    fn sphere_surface_normal_points_outward() {
        let sphere = unit_sphere_ahead();
        let normal = sphere.normal_at(Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn sphere_validation_rejects_non_positive_radius() {
        let mut sphere = unit_sphere_ahead();
        sphere.radius = 0.0;
        assert!(sphere.validate().is_err());
    }

    #[test]
    fn wall_normal_derived_from_corners() {
        assert_eq!(slanted_wall().plane_normal(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn wall_rejects_collinear_corners() {
        let along_x = |x: f32| Vec3::new(x, 0.0, 0.0);
        let result = Wall::new(
            along_x(0.0),
            along_x(1.0),
            along_x(2.0),
            along_x(3.0),
            Vec3::splat(128.0),
            matte(),
        );
        assert!(matches!(result, Err(RenderError::Domain(_))));
    }

    #[test]
    fn wall_parallel_ray_never_hits() {
        let wall = slanted_wall();
        // Coplanar with the wall, still counts as parallel.
        let coplanar = ray(Vec3::new(-5.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(wall.intersect(coplanar).is_none());
    }

    #[test]
    fn wall_hit_inside_quad() {
        let wall = slanted_wall();
        let t = wall
            .intersect(ray(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();
        assert_eq!(t, 5.0);
    }

    #[test]
    fn wall_rejects_hit_behind_origin() {
        let wall = slanted_wall();
        let behind = ray(Vec3::new(0.0, 0.0, 6.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(wall.intersect(behind).is_none());
    }

    // Regression: containment is the corner bounding box, so a point that
    // is inside the box but outside the slanted quad still reports a hit.
    #[test]
    fn wall_hits_inside_bounding_box_outside_true_quad() {
        let wall = slanted_wall();
        let t = wall
            .intersect(ray(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, 1.0)))
            .unwrap();
        assert_eq!(t, 5.0);
    }

    #[test]
    fn wall_shading_normal_flips_negative_components() {
        // Swapping the corner winding flips the derived plane normal.
        let wall = Wall::new(
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(1.0, 1.0, 5.0),
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(-1.0, 1.0, 5.0),
            Vec3::splat(128.0),
            matte(),
        )
        .unwrap();
        assert_eq!(wall.plane_normal(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(wall.shading_normal(), Vec3::new(0.0, 0.0, 1.0));
    }
}
