// crate
use crate::core::common::{Float, Spectrum, INV_PI};
use crate::core::geometry::{vec3_dot_nrmf, Normal3f, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::material::PathChoice;
use crate::core::rng::Rng;
use crate::core::sampling::cosine_sample_hemisphere_about;

/// Describes a purely diffuse surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatteMaterial {
    /// Lambertian reflectance
    pub kd: Spectrum,
}

impl MatteMaterial {
    pub fn new(kd: Spectrum) -> Self {
        MatteMaterial {
            kd: kd.clamp(0.0 as Float, 1.0 as Float),
        }
    }
    /// Lambertian BRDF: `kd / pi` when `wo` and `wi` lie on the same
    /// side of the surface.
    pub fn f(&self, n: &Normal3f, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if vec3_dot_nrmf(wo, n) * vec3_dot_nrmf(wi, n) > 0.0 as Float {
            self.kd * INV_PI
        } else {
            Spectrum::default()
        }
    }
    /// Cosine-weighted sampling around the normal facing the incoming
    /// ray. `f * cos / pdf` collapses to `kd`.
    pub fn scatter(&self, se: &SurfaceElement, d: &Vector3f, rng: &mut Rng) -> PathChoice {
        let wo: Vector3f = -(*d);
        let n: Normal3f = se.facing(&wo);
        let wi: Vector3f = cosine_sample_hemisphere_about(&n, &rng.get_2d());
        if !wi.is_finite() || vec3_dot_nrmf(&wi, &n) <= 0.0 as Float {
            return PathChoice::terminate(Spectrum::default());
        }
        PathChoice {
            radiance: Spectrum::default(),
            coeff: self.kd,
            scatter: se.spawn_ray(&wi),
            specular: false,
            eta_scale: 1.0 as Float,
        }
    }
}
