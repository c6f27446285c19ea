//! Materials decide what happens to a path at a surface.
//!
//! Every shape carries exactly one **Material**, an explicit variant
//! over the three supported surface classes:
//!
//! - **Matte**: Lambertian reflection, cosine-weighted sampling.
//! - **Glass**: a smooth dielectric interface, Fresnel weighted
//!   choice between specular reflection and refraction.
//! - **Emissive**: an area light surface; it terminates paths.
//!
//! `scatter()` is the single entry point for the integrator. It
//! returns a **PathChoice** holding the continuation ray, any
//! radiance produced at this vertex and the throughput multiplier.

// std
use std::fmt;
// others
use strum_macros::{Display, EnumIter, EnumString};
// crate
use crate::core::common::{Float, Spectrum};
use crate::core::geometry::{Ray, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::rng::Rng;
use crate::materials::emissive::EmissiveMaterial;
use crate::materials::glass::GlassMaterial;
use crate::materials::matte::MatteMaterial;

#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum MaterialKind {
    Diffuse,
    Dielectric,
    Emissive,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    Matte(MatteMaterial),
    Glass(GlassMaterial),
    Emissive(EmissiveMaterial),
}

/// Outcome of one scattering decision.
#[derive(Debug, Copy, Clone)]
pub struct PathChoice {
    /// radiance attributable to this vertex
    pub radiance: Spectrum,
    /// throughput multiplier for everything further along the path
    pub coeff: Spectrum,
    /// continuation; invalid when the path ends here
    pub scatter: Ray,
    /// the continuation was sampled from a delta distribution
    pub specular: bool,
    /// radiance scaling picked up by crossing a refractive boundary
    pub eta_scale: Float,
}

impl PathChoice {
    pub fn terminate(radiance: Spectrum) -> Self {
        PathChoice {
            radiance,
            coeff: Spectrum::default(),
            scatter: Ray::invalid(),
            specular: false,
            eta_scale: 1.0 as Float,
        }
    }
}

impl Material {
    pub fn matte(kd: Spectrum) -> Self {
        Material::Matte(MatteMaterial::new(kd))
    }
    pub fn glass(color: Spectrum, eta_pos: Float, eta_neg: Float) -> Self {
        Material::Glass(GlassMaterial::new(color, eta_pos, eta_neg))
    }
    /// Build an emitter radiating `power` from a surface of `area`.
    pub fn emissive(power: Spectrum, area: Float) -> Self {
        Material::Emissive(EmissiveMaterial::new(power, area))
    }
    /// Classify a coefficient-only description: any emission makes an
    /// emitter, differing refractive indices a dielectric, everything
    /// else is diffuse. An emitter given only its power gets its
    /// radiance when it is added to a scene.
    pub fn from_coefficients(
        color: Spectrum,
        power: Spectrum,
        emitted: Spectrum,
        lambertian_reflect: Spectrum,
        eta_pos: Float,
        eta_neg: Float,
    ) -> Self {
        if !power.is_black() || !emitted.is_black() {
            Material::Emissive(EmissiveMaterial {
                color,
                power,
                emitted,
            })
        } else if eta_pos != eta_neg {
            Material::glass(color, eta_pos, eta_neg)
        } else if !lambertian_reflect.is_black() {
            Material::matte(lambertian_reflect)
        } else {
            Material::matte(color)
        }
    }
    /// Resolve emission given only as power against the area of the
    /// shape carrying this material.
    pub fn with_emitting_area(self, area: Float) -> Self {
        match self {
            Material::Emissive(e) => Material::Emissive(e.with_area(area)),
            other => other,
        }
    }
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Matte(_) => MaterialKind::Diffuse,
            Material::Glass(_) => MaterialKind::Dielectric,
            Material::Emissive(_) => MaterialKind::Emissive,
        }
    }
    pub fn color(&self) -> Spectrum {
        match self {
            Material::Matte(m) => m.kd,
            Material::Glass(g) => g.color,
            Material::Emissive(e) => e.color,
        }
    }
    /// Emitted radiance, black for anything but emitters.
    pub fn emitted(&self) -> Spectrum {
        match self {
            Material::Emissive(e) => e.emitted,
            _ => Spectrum::default(),
        }
    }
    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive(_))
    }
    /// Delta distributions can't be evaluated by light sampling.
    pub fn is_specular(&self) -> bool {
        matches!(self, Material::Glass(_))
    }
    /// Refractive indices outside and inside the surface.
    pub fn eta(&self) -> (Float, Float) {
        match self {
            Material::Glass(g) => (g.eta_pos, g.eta_neg),
            _ => (1.0 as Float, 1.0 as Float),
        }
    }
    /// Value of the scattering function for light arriving from `wi`
    /// and leaving towards `wo`.
    pub fn f(&self, se: &SurfaceElement, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            Material::Matte(m) => m.f(&se.n, wo, wi),
            _ => Spectrum::default(),
        }
    }
    /// Choose what happens to a ray travelling along `d` that hit `se`.
    pub fn scatter(&self, se: &SurfaceElement, d: &Vector3f, rng: &mut Rng) -> PathChoice {
        match self {
            Material::Matte(m) => m.scatter(se, d, rng),
            Material::Glass(g) => g.scatter(se, d, rng),
            Material::Emissive(e) => e.scatter(),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = self.color();
        write!(f, "{} ({}, {}, {})", self.kind(), c[0], c[1], c[2])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn coefficients_select_the_variant() {
        let white = Spectrum::new(1.0);
        let black = Spectrum::default();
        let m = Material::from_coefficients(white, Spectrum::new(60.0), black, black, 1.0, 1.0);
        assert_eq!(m.kind(), MaterialKind::Emissive);
        let m = Material::from_coefficients(white, black, black, black, 1.0, 1.5);
        assert_eq!(m.kind(), MaterialKind::Dielectric);
        assert_eq!(m.eta(), (1.0, 1.5));
        let m = Material::from_coefficients(white, black, black, Spectrum::new(0.5), 1.0, 1.0);
        assert_eq!(m.kind(), MaterialKind::Diffuse);
        assert_eq!(m.color(), Spectrum::new(0.5));
        assert_eq!(m.eta(), (1.0, 1.0));
    }

    #[test]
    fn kinds_parse_from_lowercase() {
        assert_eq!(MaterialKind::from_str("dielectric").unwrap(), MaterialKind::Dielectric);
        assert_eq!(MaterialKind::Diffuse.to_string(), "diffuse");
    }
}
