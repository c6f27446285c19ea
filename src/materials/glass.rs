// crate
use crate::core::common::{Float, Spectrum};
use crate::core::geometry::{vec3_dot_nrmf, Normal3f, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::material::PathChoice;
use crate::core::reflection::{fr_dielectric, reflect, refract};
use crate::core::rng::Rng;

/// Smooth dielectric interface (glass, water, ...). `eta_pos` is the
/// index on the side the normal points to, `eta_neg` the one inside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlassMaterial {
    pub color: Spectrum,
    pub eta_pos: Float,
    pub eta_neg: Float,
}

impl GlassMaterial {
    pub fn new(color: Spectrum, eta_pos: Float, eta_neg: Float) -> Self {
        GlassMaterial {
            color,
            eta_pos,
            eta_neg,
        }
    }
    /// Pick reflection with probability F and transmission otherwise,
    /// so the Fresnel weight and the selection probability cancel.
    pub fn scatter(&self, se: &SurfaceElement, d: &Vector3f, rng: &mut Rng) -> PathChoice {
        let len: Float = d.length();
        if len == 0.0 as Float || !len.is_finite() {
            return PathChoice::terminate(Spectrum::default());
        }
        let wo: Vector3f = -(*d) / len;
        let cos_o: Float = vec3_dot_nrmf(&wo, &se.n);
        // arriving from inside swaps the two media
        let (eta_i, eta_t, n): (Float, Float, Normal3f) = if cos_o > 0.0 as Float {
            (self.eta_pos, self.eta_neg, se.n)
        } else {
            (self.eta_neg, self.eta_pos, -se.n)
        };
        let f: Float = fr_dielectric(cos_o.abs(), eta_i, eta_t);
        if rng.get_1d() < f {
            return self.reflection(se, &wo, &n);
        }
        match refract(&wo, &n, eta_i / eta_t) {
            Some(wt) => {
                let eta_scale: Float = (eta_i * eta_i) / (eta_t * eta_t);
                PathChoice {
                    radiance: Spectrum::default(),
                    coeff: self.color * eta_scale,
                    scatter: se.spawn_ray(&wt),
                    specular: true,
                    eta_scale,
                }
            }
            // total internal reflection
            None => self.reflection(se, &wo, &n),
        }
    }
    fn reflection(&self, se: &SurfaceElement, wo: &Vector3f, n: &Normal3f) -> PathChoice {
        let wr: Vector3f = reflect(wo, n);
        PathChoice {
            radiance: Spectrum::default(),
            coeff: self.color,
            scatter: se.spawn_ray(&wr),
            specular: true,
            eta_scale: 1.0 as Float,
        }
    }
}
