// others
use log::warn;
// crate
use crate::core::common::{clamp_t, Float, Spectrum};
use crate::core::geometry::{Ray, Vector3f};
use crate::core::integrator::{sample_direct_light, TracerConfig};
use crate::core::material::PathChoice;
use crate::core::rng::Rng;
use crate::core::scene::Scene;

/// Path Tracing (Global Illumination)
#[derive(Debug, Copy, Clone)]
pub struct PathIntegrator {
    pub max_depth: u32,
    pub rr_start_depth: u32,
    pub rr_threshold: Float,
    pub rr_min_survival: Float,
    pub rr_max_survival: Float,
}

impl Default for PathIntegrator {
    fn default() -> Self {
        PathIntegrator::new(&TracerConfig::default())
    }
}

impl PathIntegrator {
    pub fn new(config: &TracerConfig) -> Self {
        PathIntegrator {
            max_depth: config.max_depth,
            rr_start_depth: config.rr_start_depth,
            rr_threshold: config.rr_threshold,
            rr_min_survival: config.rr_min_survival,
            rr_max_survival: config.rr_max_survival,
        }
    }
    /// Radiance arriving at the origin of `r` from its direction.
    pub fn li(&self, r: &Ray, scene: &Scene, rng: &mut Rng) -> Spectrum {
        let mut l: Spectrum = Spectrum::default();
        let mut beta: Spectrum = Spectrum::new(1.0 as Float);
        let mut ray: Ray = *r;
        let mut specular_bounce: bool = false;
        let mut bounces: u32 = 0_u32;
        // undoes the radiance scaling of refraction so that roulette
        // does not kill paths that are about to leave a denser medium
        let mut eta_scale: Float = 1.0;
        loop {
            if !ray.is_valid {
                break;
            }
            let se = match scene.intersect(&ray) {
                Some(se) => se,
                // escaped, there is no environment light
                None => break,
            };
            let wo: Vector3f = -ray.d;
            if se.material.is_emissive() {
                // emitters found by light sampling were counted already
                if bounces == 0 || specular_bounce {
                    l += beta * se.material.emitted();
                }
                break;
            }
            if bounces >= self.max_depth {
                break;
            }
            if !se.material.is_specular() {
                let ld: Spectrum = beta * sample_direct_light(&se, &wo.normalize(), scene, rng);
                l += ld;
            }
            let choice: PathChoice = se.material.scatter(&se, &ray.d, rng);
            l += beta * choice.radiance;
            if !choice.scatter.is_valid || choice.coeff.is_black() {
                break;
            }
            beta *= choice.coeff;
            specular_bounce = choice.specular;
            if choice.eta_scale > 0.0 as Float {
                eta_scale /= choice.eta_scale;
            }
            ray = choice.scatter;
            bounces += 1_u32;
            // possibly terminate the path with Russian roulette,
            // with the refraction scaling factored out
            let rr_beta: Spectrum = beta * eta_scale;
            if bounces >= self.rr_start_depth
                && rr_beta.max_component_value() < self.rr_threshold
            {
                let p: Float = clamp_t(
                    rr_beta.max_component_value(),
                    self.rr_min_survival,
                    self.rr_max_survival,
                );
                if rng.get_1d() >= p {
                    break;
                }
                beta /= p;
            }
        }
        if l.has_nans() || !l.is_finite() {
            warn!("non-finite radiance {:?} after {} bounces, setting to black", l, bounces);
            return Spectrum::default();
        }
        if l.y() < -1.0e-5 as Float {
            warn!("negative luminance {} after {} bounces, setting to black", l.y(), bounces);
            return Spectrum::default();
        }
        l
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::geometry::Point3f;
    use crate::core::material::Material;
    use crate::core::shape::ShapeType;
    use crate::core::transform::Transform;

    #[test]
    fn looking_at_a_light_returns_its_radiance() {
        let mut scene = Scene::new();
        let light = Transform::translate(&Vector3f::new(0.0, 0.0, -3.0));
        scene
            .add_area_light(ShapeType::Quad, &light.m, Spectrum::new(8.0))
            .unwrap();
        let expected = scene.shapes[0].material.emitted();
        let integrator = PathIntegrator::default();
        let mut rng = Rng::for_pixel(0, 1);
        let r = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(integrator.li(&r, &scene, &mut rng), expected);
    }

    #[test]
    fn empty_scene_is_black() {
        let scene = Scene::new();
        let integrator = PathIntegrator::default();
        let mut rng = Rng::for_pixel(0, 1);
        let r = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(integrator.li(&r, &scene, &mut rng).is_black());
        assert!(integrator.li(&Ray::invalid(), &scene, &mut rng).is_black());
    }

    #[test]
    fn light_behind_clear_glass_is_seen_through_it() {
        // a thin glass slab (two quads) between the eye and the light
        let mut scene = Scene::new();
        let front = Transform::translate(&Vector3f::new(0.0, 0.0, -2.0));
        let back = Transform::translate(&Vector3f::new(0.0, 0.0, -2.1)) * Transform::rotate_y(180.0);
        let glass = Material::glass(Spectrum::new(1.0), 1.0, 1.5);
        scene.add_shape(ShapeType::Quad, &front.m, glass).unwrap();
        scene.add_shape(ShapeType::Quad, &back.m, glass).unwrap();
        let light = Transform::translate(&Vector3f::new(0.0, 0.0, -4.0));
        scene
            .add_area_light(ShapeType::Quad, &light.m, Spectrum::new(8.0))
            .unwrap();
        let le = scene.shapes[2].material.emitted()[0];
        let integrator = PathIntegrator::default();
        let r = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, -1.0));
        let n = 4000;
        let mut sum = 0.0;
        for i in 0..n {
            let mut rng = Rng::for_pixel(i, 1);
            sum += integrator.li(&r, &scene, &mut rng)[0];
        }
        // two interfaces at normal incidence each pass 96%
        let expected = le * 0.96 * 0.96;
        let mean = sum / n as Float;
        assert!((mean - expected).abs() < 0.05 * le, "{} vs {}", mean, expected);
    }

    #[test]
    fn roulette_keeps_the_estimate_unbiased() {
        // inside a closed grey sphere lit by nothing but a small light:
        // compare roulette starting at once against a late start
        let mut scene = Scene::new();
        let room = Transform::scale(3.0, 3.0, 3.0).m;
        scene
            .add_shape(ShapeType::Sphere, &room, Material::matte(Spectrum::new(0.5)))
            .unwrap();
        let light = Transform::translate(&Vector3f::new(0.0, 1.5, 0.0))
            * Transform::rotate_x(90.0)
            * Transform::scale(0.5, 0.5, 1.0);
        scene
            .add_area_light(ShapeType::Quad, &light.m, Spectrum::new(20.0))
            .unwrap();
        let eager = PathIntegrator {
            rr_start_depth: 0,
            rr_threshold: 1.0,
            max_depth: 64,
            ..PathIntegrator::default()
        };
        let late = PathIntegrator {
            rr_start_depth: 64,
            max_depth: 64,
            ..PathIntegrator::default()
        };
        let r = Ray::new(Point3f::default(), Vector3f::new(0.3, -1.0, 0.2));
        let n = 20_000;
        let (mut a, mut b) = (0.0 as f64, 0.0 as f64);
        for i in 0..n {
            a += eager.li(&r, &scene, &mut Rng::for_pixel(i, 7))[0] as f64;
            b += late.li(&r, &scene, &mut Rng::for_pixel(i, 9))[0] as f64;
        }
        let (a, b) = (a / n as f64, b / n as f64);
        assert!(b > 0.0);
        assert!((a - b).abs() < 0.08 * b, "{} vs {}", a, b);
    }
}
