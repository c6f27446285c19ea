// std
use std::f32::consts::PI;
// crate
use crate::core::common::{Float, Spectrum};
use crate::core::geometry::{vec3_dot_nrmf, Normal3f, Point2f, Point3f, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::light::VisibilityTester;
use crate::core::scene::Scene;
use crate::core::shape::ShapeSample;

/// Incident light from one sampled point on an area light.
#[derive(Debug, Copy, Clone)]
pub struct LightSample {
    /// radiance leaving the light towards the reference point
    pub li: Spectrum,
    /// unit direction from the reference point to the light
    pub wi: Vector3f,
    /// `|n_light . wi|`
    pub cos_light: Float,
    pub distance_squared: Float,
    /// density of the light point with respect to surface area
    pub pdf: Float,
    pub vis: VisibilityTester,
}

/// Area light emitting the same radiance everywhere on a shape.
#[derive(Debug, Copy, Clone)]
pub struct DiffuseAreaLight {
    pub shape_index: usize,
    pub l_emit: Spectrum,
    pub area: Float,
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    pub fn new(shape_index: usize, l_emit: Spectrum, area: Float, two_sided: bool) -> Self {
        DiffuseAreaLight {
            shape_index,
            l_emit,
            area,
            two_sided,
        }
    }
    /// Radiance leaving a point with normal `n` in direction `w`.
    pub fn l(&self, n: &Normal3f, w: &Vector3f) -> Spectrum {
        if self.two_sided || vec3_dot_nrmf(w, n) > 0.0 as Float {
            self.l_emit
        } else {
            Spectrum::default()
        }
    }
    pub fn power(&self) -> Spectrum {
        let sides: Float = if self.two_sided { 2.0 } else { 1.0 };
        self.l_emit * (sides * self.area * PI)
    }
    /// Sample a point on the light as seen from `se`; the shadow ray
    /// goes from just above `se` towards the light point.
    pub fn sample_li(&self, scene: &Scene, se: &SurfaceElement, u: &Point2f) -> Option<LightSample> {
        let smp: ShapeSample = scene.shapes.get(self.shape_index)?.sample(u)?;
        let to_light: Vector3f = smp.p - se.p;
        let distance_squared: Float = to_light.length_squared();
        if smp.pdf == 0.0 as Float || distance_squared == 0.0 as Float {
            return None;
        }
        let wi: Vector3f = to_light / distance_squared.sqrt();
        let cos_light: Float = vec3_dot_nrmf(&-wi, &smp.n);
        // the far side of a closed emitter is hidden by its near side
        if !self.two_sided && cos_light <= 0.0 as Float {
            return None;
        }
        let li: Spectrum = self.l(&smp.n, &-wi);
        let p0: Point3f = se.offset_towards(&wi);
        Some(LightSample {
            li,
            wi,
            cos_light: cos_light.abs(),
            distance_squared,
            pdf: smp.pdf,
            vis: VisibilityTester {
                p0,
                p1: smp.p,
                exclude: [se.shape_index, self.shape_index],
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::geometry::Ray;
    use crate::core::material::Material;
    use crate::core::rng::Rng;
    use crate::core::shape::ShapeType;
    use crate::core::transform::Transform;

    #[test]
    fn sphere_lights_only_face_outwards() {
        let mut scene = Scene::new();
        let floor = Transform::rotate_x(-90.0) * Transform::scale(10.0, 10.0, 1.0);
        scene
            .add_shape(ShapeType::Quad, &floor.m, Material::matte(Spectrum::new(0.5)))
            .unwrap();
        let ball = Transform::translate(&Vector3f::new(0.0, 3.0, 0.0)) * Transform::scale(0.5, 0.5, 0.5);
        scene
            .add_area_light(ShapeType::Sphere, &ball.m, Spectrum::new(10.0))
            .unwrap();
        let light = scene.lights[0];
        assert!(!light.two_sided);
        // one side only: power and emitted radiance agree
        assert!((light.power()[0] - 10.0).abs() < 1e-3);
        let r = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0));
        let se = scene.intersect(&r).unwrap();
        let mut rng = Rng::for_pixel(0, 1);
        let mut seen = 0;
        for _ in 0..256 {
            if let Some(ls) = light.sample_li(&scene, &se, &rng.get_2d()) {
                assert!(ls.cos_light > 0.0);
                assert!(ls.wi.y > 0.0);
                seen += 1;
            }
        }
        // from 3 radii away a bit less than half of the sphere is visible
        assert!(seen > 64 && seen < 160, "{} visible samples", seen);
    }

    #[test]
    fn quad_lights_shine_both_ways() {
        let l = DiffuseAreaLight::new(0, Spectrum::new(1.0), 4.0, true);
        let n = Normal3f::new(0.0, 0.0, 1.0);
        assert_eq!(l.l(&n, &Vector3f::new(0.0, 0.0, -1.0)), Spectrum::new(1.0));
        assert!((l.power()[0] - 8.0 * PI).abs() < 1e-4);
        let one_sided = DiffuseAreaLight::new(0, Spectrum::new(1.0), 4.0, false);
        assert!(one_sided.l(&n, &Vector3f::new(0.0, 0.0, -1.0)).is_black());
    }
}
