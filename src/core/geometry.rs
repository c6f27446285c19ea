//! Almost all nontrivial graphics programs are built on a foundation
//! of geometric classes. These classes represent mathematical
//! constructs like points, vectors, and rays.
//!
//! # Points
//!
//! A **point** is a zero-dimensional location in 3D space. Although
//! the same representation is used for vectors, the fact that a point
//! represents a position whereas a vector represents a direction
//! leads to a number of important differences in how they are
//! treated, most notably under transformations (translations only
//! affect points).
//!
//! # Normals
//!
//! A surface **normal** is a vector that is perpendicular to a
//! surface at a particular position. Normals behave differently from
//! vectors when transformed: they need the inverse transpose of the
//! matrix used for points, otherwise non-uniform scaling tilts them
//! away from the surface.
//!
//! # Rays
//!
//! A **ray** is a semi-infinite line specified by its origin and
//! direction. Rays additionally carry an `is_valid` flag; an invalid
//! ray marks a terminated or degenerate path and every consumer
//! short-circuits on it.
//!
//! ```rust
//! use rs_pathtracer::core::geometry::{Point3f, Ray, Vector3f};
//!
//! let ray = Ray::new(
//!     Point3f { x: 0.0, y: 0.0, z: -5.0 },
//!     Vector3f { x: 0.0, y: 0.0, z: 1.0 },
//! );
//! assert!(ray.is_valid);
//! assert_eq!(ray.position(5.0), Point3f::default());
//! ```

// std
use std::ops;
use std::ops::{Index, IndexMut};
// crate
use crate::core::common::{Float, RAY_EPSILON};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2f {
    pub x: Float,
    pub y: Float,
}

impl Index<usize> for Point2f {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        match index {
            0 => &self.x,
            _ => &self.y,
        }
    }
}

impl_op_ex!(*|a: &Point2f, b: Float| -> Point2f {
    Point2f {
        x: a.x * b,
        y: a.y * b,
    }
});

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Vector3f { x, y, z }
    }
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new vector pointing in the same direction but with unit
    /// length.
    pub fn normalize(&self) -> Vector3f {
        *self / self.length()
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Point3f {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Point3f { x, y, z }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Normal3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Normal3f {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Normal3f { x, y, z }
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new normal pointing in the same direction but with unit
    /// length.
    pub fn normalize(&self) -> Normal3f {
        *self / self.length()
    }
}

impl Index<usize> for Vector3f {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl IndexMut<usize> for Vector3f {
    fn index_mut(&mut self, index: usize) -> &mut Float {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => &mut self.z,
        }
    }
}

impl Index<usize> for Point3f {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl From<Point3f> for Vector3f {
    fn from(p: Point3f) -> Self {
        Vector3f {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Normal3f> for Vector3f {
    fn from(n: Normal3f) -> Self {
        Vector3f {
            x: n.x,
            y: n.y,
            z: n.z,
        }
    }
}

impl From<Vector3f> for Normal3f {
    fn from(v: Vector3f) -> Self {
        Normal3f {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector3f> for Point3f {
    fn from(v: Vector3f) -> Self {
        Point3f {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl_op!(-|a: Vector3f| -> Vector3f {
    Vector3f {
        x: -a.x,
        y: -a.y,
        z: -a.z,
    }
});

impl_op!(-|a: Normal3f| -> Normal3f {
    Normal3f {
        x: -a.x,
        y: -a.y,
        z: -a.z,
    }
});

impl_op_ex!(+|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(+|a: &Point3f, b: &Vector3f| -> Point3f {
    Point3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Point3f, b: &Vector3f| -> Point3f {
    Point3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(-|a: &Point3f, b: &Point3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(+|a: &Normal3f, b: &Normal3f| -> Normal3f {
    Normal3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(*|a: &Vector3f, b: Float| -> Vector3f {
    Vector3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(*|a: &Normal3f, b: Float| -> Normal3f {
    Normal3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(/|a: &Vector3f, b: Float| -> Vector3f {
    let inv: Float = 1.0 as Float / b;
    Vector3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op_ex!(/|a: &Normal3f, b: Float| -> Normal3f {
    let inv: Float = 1.0 as Float / b;
    Normal3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op!(+= |a: &mut Vector3f, b: Vector3f| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

/// Product of the Euclidean magnitudes of the two vectors and the
/// cosine of the angle between them.
pub fn vec3_dot_vec3f(v1: &Vector3f, v2: &Vector3f) -> Float {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

pub fn vec3_dot_nrmf(v1: &Vector3f, n2: &Normal3f) -> Float {
    v1.x * n2.x + v1.y * n2.y + v1.z * n2.z
}

/// Given two vectors in 3D, the cross product is a vector that is
/// perpendicular to both of them.
pub fn vec3_cross_vec3(v1: &Vector3f, v2: &Vector3f) -> Vector3f {
    let v1x: f64 = v1.x as f64;
    let v1y: f64 = v1.y as f64;
    let v1z: f64 = v1.z as f64;
    let v2x: f64 = v2.x as f64;
    let v2y: f64 = v2.y as f64;
    let v2z: f64 = v2.z as f64;
    Vector3f {
        x: ((v1y * v2z) - (v1z * v2y)) as Float,
        y: ((v1z * v2x) - (v1x * v2z)) as Float,
        z: ((v1x * v2y) - (v1y * v2x)) as Float,
    }
}

/// Construct a local coordinate system given only a single 3D vector.
pub fn vec3_coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2: Vector3f = if v1.x.abs() > v1.y.abs() {
        Vector3f {
            x: -v1.z,
            y: 0.0 as Float,
            z: v1.x,
        } / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f {
            x: 0.0 as Float,
            y: v1.z,
            z: -v1.y,
        } / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3: Vector3f = vec3_cross_vec3(v1, &v2);
    (v2, v3)
}

/// Flip a surface normal so that it lies in the same hemisphere as a
/// given vector.
pub fn nrm_faceforward_vec3(n: &Normal3f, v: &Vector3f) -> Normal3f {
    if vec3_dot_nrmf(v, n) < 0.0 as Float {
        -(*n)
    } else {
        *n
    }
}

/// Move a spawned ray's origin off the surface along the normal, on
/// the side the ray leaves through.
pub fn pnt3_offset_ray_origin(p: &Point3f, n: &Normal3f, w: &Vector3f) -> Point3f {
    let mut offset: Vector3f = Vector3f::from(*n) * RAY_EPSILON;
    if vec3_dot_nrmf(w, n) < 0.0 as Float {
        offset = -offset;
    }
    *p + offset
}

#[derive(Debug, Copy, Clone)]
pub struct Ray {
    /// origin
    pub o: Point3f,
    /// direction
    pub d: Vector3f,
    /// limits the ray to a segment along its infinite extent
    pub t_max: Float,
    pub is_valid: bool,
}

impl Default for Ray {
    fn default() -> Self {
        Ray::invalid()
    }
}

impl Ray {
    /// A ray is only valid with a finite, non-zero direction and a
    /// finite origin.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        let is_valid: bool = d.is_finite()
            && d.length_squared() > 0.0 as Float
            && Vector3f::from(o).is_finite();
        Ray {
            o,
            d,
            t_max: Float::INFINITY,
            is_valid,
        }
    }
    pub fn invalid() -> Self {
        Ray {
            o: Point3f::default(),
            d: Vector3f::default(),
            t_max: 0.0 as Float,
            is_valid: false,
        }
    }
    // Ray::operator()
    pub fn position(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}
