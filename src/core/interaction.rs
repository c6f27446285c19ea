//! The geometry of a particular point on a surface is represented by
//! a **SurfaceElement**. It is created for every ray/shape hit, owned
//! by the bounce that produced it and dropped afterwards.

// crate
use crate::core::common::Float;
use crate::core::geometry::{pnt3_offset_ray_origin, vec3_dot_nrmf};
use crate::core::geometry::{Normal3f, Point3f, Ray, Vector3f};
use crate::core::material::Material;

#[derive(Debug, Copy, Clone)]
pub struct SurfaceElement {
    /// world space hit point
    pub p: Point3f,
    /// unit length world space geometric normal
    pub n: Normal3f,
    pub material: Material,
    /// index of the shape struck
    pub shape_index: usize,
    /// distance along the ray that produced the hit
    pub t: Float,
}

impl SurfaceElement {
    /// Spawn a ray leaving the surface in direction `d`, starting
    /// slightly off the surface on the side `d` points to.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let o: Point3f = pnt3_offset_ray_origin(&self.p, &self.n, d);
        Ray::new(o, *d)
    }
    /// Point slightly off the surface towards `w`.
    pub fn offset_towards(&self, w: &Vector3f) -> Point3f {
        pnt3_offset_ray_origin(&self.p, &self.n, w)
    }
    /// The normal flipped into the hemisphere of `w`.
    pub fn facing(&self, w: &Vector3f) -> Normal3f {
        if vec3_dot_nrmf(w, &self.n) < 0.0 as Float {
            -self.n
        } else {
            self.n
        }
    }
}
