//! Direct lighting shared by the integrators, plus the knobs that
//! control a render.

// others
use strum_macros::{Display, EnumIter, EnumString};
// crate
use crate::core::common::{Float, Spectrum};
use crate::core::film::BlendMode;
use crate::core::geometry::{vec3_dot_nrmf, Normal3f, Point2f, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::light::LightSelection;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::lights::diffuse::{DiffuseAreaLight, LightSample};

/// How one progressive iteration is spread over the CPU.
#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Backend {
    /// contiguous row bands, one scoped thread per band
    RowThreads,
    /// every pixel is its own work item
    PerPixel,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::RowThreads
    }
}

/// Settings for a path tracing session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TracerConfig {
    /// hard limit on the number of bounces
    pub max_depth: u32,
    /// first bounce at which Russian roulette may end a path
    pub rr_start_depth: u32,
    /// roulette only applies below this throughput
    pub rr_threshold: Float,
    pub rr_min_survival: Float,
    pub rr_max_survival: Float,
    pub light_selection: LightSelection,
    pub blend: BlendMode,
    pub backend: Backend,
    /// worker count, 0 means one per logical CPU
    pub num_threads: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        TracerConfig {
            max_depth: 16,
            rr_start_depth: 3,
            rr_threshold: 1.0 as Float,
            rr_min_survival: 0.05 as Float,
            rr_max_survival: 0.95 as Float,
            light_selection: LightSelection::Uniform,
            blend: BlendMode::RunningMean,
            backend: Backend::RowThreads,
            num_threads: 0,
        }
    }
}

impl TracerConfig {
    pub fn worker_count(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}

/// Estimate the light arriving at `se` directly from one randomly
/// chosen area light and leaving towards `wo`.
pub fn sample_direct_light(
    se: &SurfaceElement,
    wo: &Vector3f,
    scene: &Scene,
    rng: &mut Rng,
) -> Spectrum {
    // both samples are drawn even when unused to keep streams aligned
    let u_light: Float = rng.get_1d();
    let u_point: Point2f = rng.get_2d();
    if se.material.is_specular() || se.material.is_emissive() {
        return Spectrum::default();
    }
    match scene.choose_light(u_light) {
        Some((light, light_pdf)) => estimate_direct(se, wo, light, &u_point, scene) / light_pdf,
        None => Spectrum::default(),
    }
}

/// Contribution of a single light sample, with respect to area.
pub fn estimate_direct(
    se: &SurfaceElement,
    wo: &Vector3f,
    light: &DiffuseAreaLight,
    u_light: &Point2f,
    scene: &Scene,
) -> Spectrum {
    let ls: LightSample = match light.sample_li(scene, se, u_light) {
        Some(ls) => ls,
        None => return Spectrum::default(),
    };
    if ls.li.is_black() || ls.pdf == 0.0 as Float {
        return Spectrum::default();
    }
    let f: Spectrum = se.material.f(se, wo, &ls.wi);
    if f.is_black() {
        return Spectrum::default();
    }
    let n: Normal3f = se.facing(wo);
    let cos_surface: Float = vec3_dot_nrmf(&ls.wi, &n).max(0.0 as Float);
    if cos_surface == 0.0 as Float || ls.cos_light == 0.0 as Float {
        return Spectrum::default();
    }
    if !ls.vis.unoccluded(scene) {
        return Spectrum::default();
    }
    ls.li * f * (cos_surface * ls.cos_light / (ls.distance_squared * ls.pdf))
}
