//! Fresnel and Snell helpers shared by the scattering models.
//!
//! All directions point away from the surface, as in the
//! scattering-function convention: `wo` is the direction back towards
//! the previous vertex.

// crate
use crate::core::common::{clamp_t, Float};
use crate::core::geometry::{vec3_dot_nrmf, Normal3f, Vector3f};

/// Mirror `wo` about `n`.
pub fn reflect(wo: &Vector3f, n: &Normal3f) -> Vector3f {
    -(*wo) + Vector3f::from(*n) * (2.0 as Float * vec3_dot_nrmf(wo, n))
}

/// Computes the refraction direction given an incident direction, a
/// surface normal in the same hemisphere as `wi`, and the ratio of
/// indices of refraction (incident over transmitted). Returns `None`
/// on total internal reflection.
pub fn refract(wi: &Vector3f, n: &Normal3f, eta: Float) -> Option<Vector3f> {
    // compute $\cos \theta_\roman{t}$ using Snell's law
    let cos_theta_i: Float = vec3_dot_nrmf(wi, n);
    let sin2_theta_i: Float = (0.0 as Float).max(1.0 as Float - cos_theta_i * cos_theta_i);
    let sin2_theta_t: Float = eta * eta * sin2_theta_i;
    // handle total internal reflection for transmission
    if sin2_theta_t >= 1.0 as Float {
        return None;
    }
    let cos_theta_t: Float = (1.0 as Float - sin2_theta_t).sqrt();
    Some(-(*wi) * eta + Vector3f::from(*n) * (eta * cos_theta_i - cos_theta_t))
}

/// Computes the Fresnel reflection formula for dielectric materials
/// and unpolarized light. A negative cosine means the light arrives
/// from the `eta_t` side and the indices are swapped.
pub fn fr_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_theta_i = clamp_t(cos_theta_i, -1.0, 1.0);
    let mut eta_i = eta_i;
    let mut eta_t = eta_t;
    // potentially swap indices of refraction
    if cos_theta_i <= 0.0 {
        std::mem::swap(&mut eta_i, &mut eta_t);
        cos_theta_i = cos_theta_i.abs();
    }
    // compute _cos_theta_t_ using Snell's law
    let sin_theta_i: Float = (0.0 as Float)
        .max(1.0 as Float - cos_theta_i * cos_theta_i)
        .sqrt();
    let sin_theta_t: Float = eta_i / eta_t * sin_theta_i;
    // handle total internal reflection
    if sin_theta_t >= 1.0 as Float {
        return 1.0 as Float;
    }
    let cos_theta_t: Float = (0.0 as Float)
        .max(1.0 as Float - sin_theta_t * sin_theta_t)
        .sqrt();
    let r_parl: Float = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
        / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
    let r_perp: Float = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
        / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
    (r_parl * r_parl + r_perp * r_perp) / 2.0
}
