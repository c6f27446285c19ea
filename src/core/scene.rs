//! The **Scene** owns every shape and records which of them are area
//! lights. It is built once and only read while rendering; ray
//! queries are a linear scan over the shapes.

// others
use log::debug;
// crate
use crate::core::common::{Float, Spectrum, RAY_EPSILON, SHADOW_EPSILON};
use crate::core::error::{RenderError, Result};
use crate::core::geometry::{Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceElement;
use crate::core::light::LightSelection;
use crate::core::material::Material;
use crate::core::sampling::Distribution1D;
use crate::core::shape::{Shape, ShapeType};
use crate::core::transform::{Matrix4x4, Transform};
use crate::lights::diffuse::DiffuseAreaLight;

#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub lights: Vec<DiffuseAreaLight>,
    light_selection: LightSelection,
    light_distribution: Option<Distribution1D>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }
    /// Append a shape and return its index. Emissive materials make
    /// the shape an area light.
    pub fn add_shape(
        &mut self,
        shape_type: ShapeType,
        object_to_world: &Matrix4x4,
        material: Material,
    ) -> Result<usize> {
        if material.is_emissive() {
            return self.add_area_light_with_material(shape_type, object_to_world, material);
        }
        let shape: Shape = self.new_shape(shape_type, object_to_world, material)?;
        Ok(self.push_shape(shape))
    }
    /// Append an emitter radiating `power` in total. The emitted
    /// radiance is derived from the shape's world space area.
    pub fn add_area_light(
        &mut self,
        shape_type: ShapeType,
        object_to_world: &Matrix4x4,
        power: Spectrum,
    ) -> Result<usize> {
        let area: Float = self
            .new_shape(shape_type, object_to_world, Material::matte(Spectrum::default()))?
            .area();
        self.add_area_light_with_material(
            shape_type,
            object_to_world,
            Material::emissive(power, area),
        )
    }
    pub fn add_area_light_with_material(
        &mut self,
        shape_type: ShapeType,
        object_to_world: &Matrix4x4,
        material: Material,
    ) -> Result<usize> {
        let mut shape: Shape = self.new_shape(shape_type, object_to_world, material)?;
        let area: Float = shape.area();
        shape.material = material.with_emitting_area(area);
        let emitted: Spectrum = shape.material.emitted();
        if emitted.is_black() {
            return Err(RenderError::NotEmissive(shape.index));
        }
        let two_sided: bool = !shape.is_closed();
        let index: usize = self.push_shape(shape);
        self.lights
            .push(DiffuseAreaLight::new(index, emitted, area, two_sided));
        self.update_light_distribution();
        Ok(index)
    }
    fn new_shape(
        &self,
        shape_type: ShapeType,
        object_to_world: &Matrix4x4,
        material: Material,
    ) -> Result<Shape> {
        let index: usize = self.shapes.len();
        let transform: Transform =
            Transform::new(*object_to_world).ok_or(RenderError::SingularTransform(index))?;
        Ok(Shape::new(shape_type, transform, material, index))
    }
    fn push_shape(&mut self, shape: Shape) -> usize {
        let index: usize = shape.index;
        debug!("added {} #{} ({})", shape.shape_type, index, shape.material);
        self.shapes.push(shape);
        index
    }
    pub fn set_light_selection(&mut self, light_selection: LightSelection) {
        self.light_selection = light_selection;
        self.update_light_distribution();
    }
    pub fn light_selection(&self) -> LightSelection {
        self.light_selection
    }
    fn update_light_distribution(&mut self) {
        self.light_distribution = match self.light_selection {
            LightSelection::Uniform => None,
            LightSelection::Power => Some(Distribution1D::new(
                self.lights.iter().map(|l| l.power().y()).collect(),
            )),
        };
    }
    /// Pick a light for the sample `u` and return it with the
    /// probability of having picked it.
    pub fn choose_light(&self, u: Float) -> Option<(&DiffuseAreaLight, Float)> {
        let n_lights: usize = self.lights.len();
        if n_lights == 0 {
            return None;
        }
        let (light_num, pdf): (usize, Float) = match self.light_distribution {
            Some(ref distribution) => distribution.sample_discrete(u),
            None => (
                std::cmp::min((u * n_lights as Float) as usize, n_lights - 1),
                1.0 as Float / n_lights as Float,
            ),
        };
        if pdf == 0.0 as Float {
            return None;
        }
        Some((&self.lights[light_num], pdf))
    }
    /// Closest hit along `ray`, skipping the shape with index `exclude`.
    pub fn find_closest_hit(&self, ray: &Ray, exclude: Option<usize>) -> Option<SurfaceElement> {
        if !ray.is_valid {
            return None;
        }
        let mut r: Ray = *ray;
        let mut closest: Option<SurfaceElement> = None;
        for shape in &self.shapes {
            if Some(shape.index) == exclude {
                continue;
            }
            if let Some(se) = shape.intersect(&r) {
                // only closer hits survive from here on
                r.t_max = se.t;
                closest = Some(se);
            }
        }
        closest
    }
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceElement> {
        self.find_closest_hit(ray, None)
    }
    /// True if nothing but the shapes in `exclude` lies between `p0`
    /// and `p1`.
    pub fn unoccluded(&self, p0: &Point3f, p1: &Point3f, exclude: &[usize]) -> bool {
        let d: Vector3f = *p1 - *p0;
        let mut r: Ray = Ray::new(*p0, d);
        if !r.is_valid {
            return true;
        }
        r.t_max = 1.0 as Float - SHADOW_EPSILON;
        let length: Float = d.length();
        self.shapes
            .iter()
            .filter(|shape| !exclude.contains(&shape.index))
            .filter_map(|shape| shape.intersect(&r))
            // hits are in units of the segment length
            .all(|se| se.t * length <= RAY_EPSILON)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::transform::Transform;
    use pretty_assertions::assert_eq;

    fn grey() -> Material {
        Material::matte(Spectrum::new(0.5))
    }

    #[test]
    fn indices_are_stable_and_lights_registered() {
        let mut scene = Scene::new();
        let a = scene
            .add_shape(ShapeType::Sphere, &Matrix4x4::identity(), grey())
            .unwrap();
        let b = scene
            .add_area_light(ShapeType::Quad, &Matrix4x4::identity(), Spectrum::new(4.0))
            .unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].shape_index, 1);
        // a unit quad is 2 x 2
        assert!((scene.lights[0].area - 4.0).abs() < 1e-5);
        let expected = 4.0 / (std::f32::consts::PI * 4.0);
        assert!((scene.shapes[1].material.emitted()[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn emissive_materials_become_lights() {
        let mut scene = Scene::new();
        let black = Spectrum::default();
        let lamp = Material::from_coefficients(Spectrum::new(1.0), Spectrum::new(40.0), black, black, 1.0, 1.0);
        assert!(lamp.emitted().is_black());
        let index = scene
            .add_shape(ShapeType::Quad, &Matrix4x4::identity(), lamp)
            .unwrap();
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].shape_index, index);
        let expected = 40.0 / (std::f32::consts::PI * 4.0);
        assert!((scene.shapes[index].material.emitted()[0] - expected).abs() < 1e-5);
        assert_eq!(scene.lights[0].l_emit, scene.shapes[index].material.emitted());
        // neither power nor radiance is an error, not a black absorber
        let dark = Material::Emissive(crate::materials::emissive::EmissiveMaterial {
            color: Spectrum::new(1.0),
            power: black,
            emitted: black,
        });
        match scene.add_shape(ShapeType::Quad, &Matrix4x4::identity(), dark) {
            Err(RenderError::NotEmissive(1)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(scene.shapes.len(), 1);
    }

    #[test]
    fn singular_transforms_are_rejected() {
        let mut scene = Scene::new();
        let flat = Transform::scale(1.0, 1.0, 0.0).m;
        match scene.add_shape(ShapeType::Sphere, &flat, grey()) {
            Err(RenderError::SingularTransform(0)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(scene.shapes.is_empty());
    }

    #[test]
    fn closest_hit_and_exclusion() {
        let mut scene = Scene::new();
        let near = Transform::translate(&Vector3f::new(0.0, 0.0, -3.0)).m;
        let far = Transform::translate(&Vector3f::new(0.0, 0.0, -6.0)).m;
        scene.add_shape(ShapeType::Sphere, &far, grey()).unwrap();
        scene.add_shape(ShapeType::Sphere, &near, grey()).unwrap();
        let r = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, -1.0));
        let se = scene.find_closest_hit(&r, None).unwrap();
        assert_eq!(se.shape_index, 1);
        assert!((se.t - 2.0).abs() < 1e-5);
        let se = scene.find_closest_hit(&r, Some(1)).unwrap();
        assert_eq!(se.shape_index, 0);
        assert!((se.t - 5.0).abs() < 1e-5);
        let up = Ray::new(Point3f::default(), Vector3f::new(0.0, 1.0, 0.0));
        assert!(scene.find_closest_hit(&up, None).is_none());
    }

    #[test]
    fn shadow_segments_ignore_excluded_shapes() {
        let mut scene = Scene::new();
        let blocker = Transform::translate(&Vector3f::new(0.0, 0.0, -3.0)).m;
        scene.add_shape(ShapeType::Sphere, &blocker, grey()).unwrap();
        let p0 = Point3f::default();
        let p1 = Point3f::new(0.0, 0.0, -6.0);
        assert!(!scene.unoccluded(&p0, &p1, &[]));
        assert!(scene.unoccluded(&p0, &p1, &[0]));
        // segment ending before the blocker
        assert!(scene.unoccluded(&p0, &Point3f::new(0.0, 0.0, -1.5), &[]));
    }

    #[test]
    fn power_selection_prefers_bright_lights() {
        let mut scene = Scene::new();
        let left = Transform::translate(&Vector3f::new(-3.0, 0.0, 0.0)).m;
        let right = Transform::translate(&Vector3f::new(3.0, 0.0, 0.0)).m;
        scene
            .add_area_light(ShapeType::Quad, &left, Spectrum::new(1.0))
            .unwrap();
        scene
            .add_area_light(ShapeType::Quad, &right, Spectrum::new(3.0))
            .unwrap();
        let (_, pdf) = scene.choose_light(0.1).unwrap();
        assert!((pdf - 0.5).abs() < 1e-6);
        scene.set_light_selection(LightSelection::Power);
        let (light, pdf) = scene.choose_light(0.1).unwrap();
        assert_eq!(light.shape_index, 0);
        assert!((pdf - 0.25).abs() < 1e-5);
        let (light, pdf) = scene.choose_light(0.9).unwrap();
        assert_eq!(light.shape_index, 1);
        assert!((pdf - 0.75).abs() < 1e-5);
    }
}
