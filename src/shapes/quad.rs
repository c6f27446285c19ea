// crate
use crate::core::common::Float;
use crate::core::geometry::{Normal3f, Point2f, Point3f, Vector3f};
use crate::core::shape::{ObjectHit, UnitShape};

/// The square `[-1, 1] x [-1, 1]` in the plane `z = 0`, normal `+z`.
/// Both sides are hit.
pub struct Quad;

impl UnitShape for Quad {
    fn object_area() -> Float {
        4.0 as Float
    }
    fn intersect(o: &Point3f, d: &Vector3f, t_min: Float, t_max: Float) -> Option<ObjectHit> {
        // rays parallel to the plane never hit it
        if d.z == 0.0 as Float {
            return None;
        }
        let t: Float = -o.z / d.z;
        if !(t > t_min && t < t_max) {
            return None;
        }
        let p: Point3f = *o + *d * t;
        if p.x.abs() > 1.0 as Float || p.y.abs() > 1.0 as Float {
            return None;
        }
        Some(ObjectHit {
            t,
            p: Point3f::new(p.x, p.y, 0.0),
            n: Normal3f::new(0.0, 0.0, 1.0),
        })
    }
    fn sample(u: &Point2f) -> (Point3f, Normal3f) {
        (
            Point3f::new(
                2.0 as Float * u.x - 1.0 as Float,
                2.0 as Float * u.y - 1.0 as Float,
                0.0,
            ),
            Normal3f::new(0.0, 0.0, 1.0),
        )
    }
}
