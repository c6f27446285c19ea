//! Careful abstraction of geometric shapes in a ray tracer is a key
//! component of a clean system design. Every shape here is a
//! canonical unit primitive living in its own object space; a
//! **Shape** places one in the world with an affine transform.
//!
//! Rays are brought into object space with the inverse transform
//! without renormalizing the direction, so the hit distance found in
//! object space is also the world space distance. Hit points go back
//! with the forward matrix, normals with the inverse transpose.

// others
use strum_macros::{Display, EnumIter, EnumString};
// crate
use crate::core::common::{Float, RAY_EPSILON};
use crate::core::geometry::{Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::material::Material;
use crate::core::transform::{Matrix3x3, Transform};
use crate::shapes::quad::Quad;
use crate::shapes::sphere::Sphere;

#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ShapeType {
    Quad,
    Sphere,
}

/// Hit against a canonical shape, in object space.
#[derive(Debug, Copy, Clone)]
pub struct ObjectHit {
    pub t: Float,
    pub p: Point3f,
    pub n: Normal3f,
}

/// Interface of the canonical primitives.
pub trait UnitShape {
    /// Surface area in object space.
    fn object_area() -> Float;
    /// Closest hit with `t_min < t < t_max`.
    fn intersect(o: &Point3f, d: &Vector3f, t_min: Float, t_max: Float) -> Option<ObjectHit>;
    /// Uniformly distributed surface point and its normal.
    fn sample(u: &Point2f) -> (Point3f, Normal3f);
}

/// A point picked on a shape for light sampling.
#[derive(Debug, Copy, Clone)]
pub struct ShapeSample {
    pub p: Point3f,
    pub n: Normal3f,
    /// density with respect to world space surface area
    pub pdf: Float,
}

#[derive(Debug, Copy, Clone)]
pub struct Shape {
    pub shape_type: ShapeType,
    pub object_to_world: Transform,
    /// inverse transpose of the upper 3x3 block of `object_to_world`
    pub normal_matrix: Matrix3x3,
    pub material: Material,
    pub index: usize,
}

impl Shape {
    pub fn new(
        shape_type: ShapeType,
        object_to_world: Transform,
        material: Material,
        index: usize,
    ) -> Self {
        Shape {
            shape_type,
            object_to_world,
            normal_matrix: object_to_world.normal_matrix(),
            material,
            index,
        }
    }
    /// Closed shapes bound a volume and can only be seen from outside.
    pub fn is_closed(&self) -> bool {
        self.shape_type == ShapeType::Sphere
    }
    pub fn intersect(&self, r: &Ray) -> Option<SurfaceElement> {
        if !r.is_valid {
            return None;
        }
        // transform _Ray_ to object space
        let world_to_object: Transform = Transform::inverse(&self.object_to_world);
        let o: Point3f = world_to_object.transform_point(&r.o);
        let d: Vector3f = world_to_object.transform_vector(&r.d);
        let hit: ObjectHit = match self.shape_type {
            ShapeType::Quad => Quad::intersect(&o, &d, RAY_EPSILON, r.t_max),
            ShapeType::Sphere => Sphere::intersect(&o, &d, RAY_EPSILON, r.t_max),
        }?;
        let n: Normal3f = self.world_normal(&hit.n)?;
        Some(SurfaceElement {
            p: self.object_to_world.transform_point(&hit.p),
            n,
            material: self.material,
            shape_index: self.index,
            t: hit.t,
        })
    }
    /// World space surface area. Exact for quads and spheres under
    /// uniform scale; ellipsoids use Thomsen's approximation.
    pub fn area(&self) -> Float {
        match self.shape_type {
            ShapeType::Quad => Quad::object_area() * self.area_scale(&Normal3f::new(0.0, 0.0, 1.0)),
            ShapeType::Sphere => {
                let m: Matrix3x3 = self.object_to_world.m.upper_left();
                let axis = |c: usize| {
                    Vector3f::new(m.cols[c][0], m.cols[c][1], m.cols[c][2]).length() as f64
                };
                let (a, b, c) = (axis(0), axis(1), axis(2));
                let p: f64 = 1.6075;
                let mean: f64 =
                    ((a * b).powf(p) + (a * c).powf(p) + (b * c).powf(p)) / 3.0;
                (4.0 * std::f64::consts::PI * mean.powf(1.0 / p)) as Float
            }
        }
    }
    /// Pick a point on the surface from the unit square sample `u`.
    pub fn sample(&self, u: &Point2f) -> Option<ShapeSample> {
        let (p_obj, n_obj, object_area) = match self.shape_type {
            ShapeType::Quad => {
                let (p, n) = Quad::sample(u);
                (p, n, Quad::object_area())
            }
            ShapeType::Sphere => {
                let (p, n) = Sphere::sample(u);
                (p, n, Sphere::object_area())
            }
        };
        let scale: Float = self.area_scale(&n_obj);
        if !(scale > 0.0 as Float) || !scale.is_finite() {
            return None;
        }
        Some(ShapeSample {
            p: self.object_to_world.transform_point(&p_obj),
            n: self.world_normal(&n_obj)?,
            pdf: 1.0 as Float / (object_area * scale),
        })
    }
    /// Ratio between world and object surface area around a point
    /// with object normal `n` (Nanson's formula).
    fn area_scale(&self, n: &Normal3f) -> Float {
        let det: Float = self.object_to_world.m.upper_left().determinant();
        det.abs() * self.normal_matrix.mul_vec3(&Vector3f::from(*n)).length()
    }
    fn world_normal(&self, n: &Normal3f) -> Option<Normal3f> {
        let nw: Vector3f = self.normal_matrix.mul_vec3(&Vector3f::from(*n));
        let len: Float = nw.length();
        if len > 0.0 as Float && len.is_finite() {
            Some(Normal3f::from(nw / len))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::common::Spectrum;
    use crate::core::rng::Rng;

    fn shape(shape_type: ShapeType, t: Transform) -> Shape {
        Shape::new(shape_type, t, Material::matte(Spectrum::new(0.5)), 0)
    }

    #[test]
    fn unit_sphere_hit_from_minus_z() {
        let s = shape(ShapeType::Sphere, Transform::default());
        let r = Ray::new(Point3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        let se = s.intersect(&r).unwrap();
        assert!((se.p.z + 1.0).abs() < 1e-5);
        assert!((se.t - 4.0).abs() < 1e-5);
        assert!((se.n.z + 1.0).abs() < 1e-5);
        assert!(se.n.x.abs() < 1e-5 && se.n.y.abs() < 1e-5);
    }

    #[test]
    fn rays_missing_the_bounds_report_no_hit() {
        let s = shape(ShapeType::Sphere, Transform::default());
        let r = Ray::new(Point3f::new(0.0, 1.5, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(s.intersect(&r).is_none());
        // pointing away
        let r = Ray::new(Point3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(s.intersect(&r).is_none());
        let q = shape(ShapeType::Quad, Transform::default());
        let r = Ray::new(Point3f::new(1.2, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(q.intersect(&r).is_none());
        // parallel to the plane
        let r = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(q.intersect(&r).is_none());
        assert!(q.intersect(&Ray::invalid()).is_none());
    }

    #[test]
    fn transformed_quad_reports_world_hit() {
        // ceiling light of the reference room
        let t = Transform::translate(&Vector3f::new(0.0, 2.475, -1.5))
            * Transform::rotate_x(-90.0)
            * Transform::scale(0.5, 0.3, 1.0);
        let q = shape(ShapeType::Quad, t);
        let r = Ray::new(Point3f::new(0.2, 0.0, -1.3), Vector3f::new(0.0, 1.0, 0.0));
        let se = q.intersect(&r).unwrap();
        assert!((se.p.y - 2.475).abs() < 1e-5);
        assert!((se.t - 2.475).abs() < 1e-5);
        assert!((se.n.y.abs() - 1.0).abs() < 1e-5);
        // outside the 1.0 x 0.6 footprint
        let r = Ray::new(Point3f::new(0.6, 0.0, -1.5), Vector3f::new(0.0, 1.0, 0.0));
        assert!(q.intersect(&r).is_none());
    }

    #[test]
    fn ray_starting_inside_sphere_hits_far_side() {
        let s = shape(ShapeType::Sphere, Transform::translate(&Vector3f::new(1.0, 0.0, 0.0)));
        let r = Ray::new(Point3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        let se = s.intersect(&r).unwrap();
        assert!((se.t - 1.0).abs() < 1e-5);
        assert!((se.n.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn quad_area_and_pdf_follow_transform() {
        let t = Transform::rotate_x(-90.0) * Transform::scale(0.5, 0.3, 1.0);
        let q = shape(ShapeType::Quad, t);
        assert!((q.area() - 0.6).abs() < 1e-5);
        let s = q.sample(&Point2f { x: 0.25, y: 0.75 }).unwrap();
        assert!((s.pdf - 1.0 / 0.6).abs() < 1e-3);
        assert!(s.p.y.abs() < 1e-6);
        assert!((s.p.x - -0.25).abs() < 1e-6);
    }

    #[test]
    fn sphere_area_and_samples() {
        let s = shape(ShapeType::Sphere, Transform::scale(2.0, 2.0, 2.0));
        let expected = 16.0 * std::f32::consts::PI;
        assert!((s.area() - expected).abs() < 1e-3 * expected);
        let mut rng = Rng::for_pixel(1, 1);
        for _ in 0..32 {
            let smp = s.sample(&rng.get_2d()).unwrap();
            let r = Vector3f::from(smp.p).length();
            assert!((r - 2.0).abs() < 1e-4);
            assert!((smp.pdf * expected - 1.0).abs() < 1e-3);
        }
    }
}
