//! Draw random samples from a chosen probability distribution.

// std
use std::f32::consts::PI;
// crate
use crate::core::common::{clamp_t, Float};
use crate::core::common::{INV_4_PI, PI_OVER_2, PI_OVER_4};
use crate::core::geometry::{vec3_coordinate_system, Normal3f, Point2f, Vector3f};

/// Piecewise-constant distribution over `n` buckets, used to pick
/// lights proportionally to their power.
#[derive(Debug, Default, Clone)]
pub struct Distribution1D {
    pub func: Vec<Float>,
    pub cdf: Vec<Float>,
    pub func_int: Float,
}

impl Distribution1D {
    pub fn new(f: Vec<Float>) -> Self {
        let n: usize = f.len();
        // compute integral of step function at $x_i$
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0 as Float);
        for i in 1..(n + 1) {
            let previous: Float = cdf[i - 1];
            cdf.push(previous + f[i - 1] / n as Float);
        }
        // transform step function integral into CDF
        let func_int: Float = cdf[n];
        if func_int == 0.0 as Float {
            for (i, c) in cdf.iter_mut().enumerate().skip(1) {
                *c = i as Float / n as Float;
            }
        } else {
            for c in cdf.iter_mut().skip(1) {
                *c /= func_int;
            }
        }
        Distribution1D {
            func: f,
            cdf,
            func_int,
        }
    }
    /// Returns the chosen bucket and its probability.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float) {
        // binary search for the CDF segment containing u
        let mut first: usize = 0;
        let mut len: usize = self.cdf.len();
        while len > 0 {
            let half: usize = len >> 1;
            let middle: usize = first + half;
            // bisect range based on value of _pred_ at _middle_
            if self.cdf[middle] <= u {
                first = middle + 1;
                len -= half + 1;
            } else {
                len = half;
            }
        }
        let offset: usize = clamp_t(
            first as isize - 1_isize,
            0_isize,
            self.cdf.len() as isize - 2_isize,
        ) as usize;
        (offset, self.discrete_pdf(offset))
    }
    pub fn discrete_pdf(&self, index: usize) -> Float {
        if self.func_int > 0.0 as Float {
            self.func[index] / (self.func_int * self.func.len() as Float)
        } else {
            1.0 as Float / self.func.len() as Float
        }
    }
}

/// Cosine-weighted hemisphere sampling using Malley's method.
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d: Point2f = concentric_sample_disk(u);
    let z: Float = (0.0 as Float)
        .max(1.0 as Float - d.x * d.x - d.y * d.y)
        .sqrt();
    Vector3f { x: d.x, y: d.y, z }
}

/// Cosine-weighted direction in the hemisphere around `n`, expressed
/// in world space.
pub fn cosine_sample_hemisphere_about(n: &Normal3f, u: &Point2f) -> Vector3f {
    let w: Vector3f = Vector3f::from(*n);
    let (s, t) = vec3_coordinate_system(&w);
    let local: Vector3f = cosine_sample_hemisphere(u);
    s * local.x + t * local.y + w * local.z
}

/// Uniformly sample rays in a full sphere. Choose a direction.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z: Float = 1.0 as Float - 2.0 as Float * u[0];
    let r: Float = (0.0 as Float).max(1.0 as Float - z * z).sqrt();
    let phi: Float = 2.0 as Float * PI * u[1];
    Vector3f {
        x: r * phi.cos(),
        y: r * phi.sin(),
        z,
    }
}

/// Probability density function (PDF) of a sphere.
pub fn uniform_sphere_pdf() -> Float {
    INV_4_PI
}

/// Uniformly distribute samples over a unit disk.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // map uniform random numbers to $[-1,1]^2$
    let u_offset: Point2f = Point2f {
        x: 2.0 as Float * u.x - 1.0 as Float,
        y: 2.0 as Float * u.y - 1.0 as Float,
    };
    // handle degeneracy at the origin
    if u_offset.x == 0.0 as Float && u_offset.y == 0.0 as Float {
        return Point2f::default();
    }
    // apply concentric mapping to point
    let (r, theta): (Float, Float) = if u_offset.x.abs() > u_offset.y.abs() {
        (u_offset.x, PI_OVER_4 * (u_offset.y / u_offset.x))
    } else {
        (
            u_offset.y,
            PI_OVER_2 - PI_OVER_4 * (u_offset.x / u_offset.y),
        )
    };
    Point2f {
        x: theta.cos(),
        y: theta.sin(),
    } * r
}
