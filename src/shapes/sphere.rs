// crate
use crate::core::common::{quadratic, Float};
use crate::core::geometry::{vec3_dot_vec3f, Normal3f, Point2f, Point3f, Vector3f};
use crate::core::sampling::{uniform_sample_sphere, uniform_sphere_pdf};
use crate::core::shape::{ObjectHit, UnitShape};

/// Sphere of radius one around the object space origin.
pub struct Sphere;

impl UnitShape for Sphere {
    fn object_area() -> Float {
        1.0 as Float / uniform_sphere_pdf()
    }
    fn intersect(o: &Point3f, d: &Vector3f, t_min: Float, t_max: Float) -> Option<ObjectHit> {
        // compute quadratic sphere coefficients
        let ov: Vector3f = Vector3f::from(*o);
        let a: Float = d.length_squared();
        let b: Float = 2.0 as Float * vec3_dot_vec3f(d, &ov);
        let c: Float = ov.length_squared() - 1.0 as Float;
        // solve quadratic equation for _t_ values
        let (t0, t1) = quadratic(a, b, c)?;
        // check quadric shape _t0_ and _t1_ for nearest intersection
        if t0 >= t_max || t1 <= t_min {
            return None;
        }
        let t_shape_hit: Float = if t0 > t_min {
            t0
        } else if t1 < t_max {
            t1
        } else {
            return None;
        };
        // refine sphere intersection point
        let mut p_hit: Vector3f = ov + *d * t_shape_hit;
        let len: Float = p_hit.length();
        if len == 0.0 as Float {
            return None;
        }
        p_hit = p_hit / len;
        Some(ObjectHit {
            t: t_shape_hit,
            p: Point3f::from(p_hit),
            n: Normal3f::from(p_hit),
        })
    }
    fn sample(u: &Point2f) -> (Point3f, Normal3f) {
        let v: Vector3f = uniform_sample_sphere(u);
        (Point3f::from(v), Normal3f::from(v))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grazing_ray_touches_the_silhouette() {
        let o = Point3f::new(-3.0, 0.999, 0.0);
        let d = Vector3f::new(1.0, 0.0, 0.0);
        let hit = Sphere::intersect(&o, &d, 1e-4, Float::INFINITY).unwrap();
        assert!(hit.n.x < 0.0);
        assert!((Vector3f::from(hit.p).length() - 1.0).abs() < 1e-5);
        let o = Point3f::new(-3.0, 1.001, 0.0);
        assert!(Sphere::intersect(&o, &d, 1e-4, Float::INFINITY).is_none());
    }

    #[test]
    fn object_area_is_four_pi() {
        assert!((Sphere::object_area() - 4.0 * std::f32::consts::PI).abs() < 1e-4);
    }
}
