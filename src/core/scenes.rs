//! Built-in scenes.

// crate
use crate::core::camera::Camera;
use crate::core::common::{Float, Spectrum};
use crate::core::error::Result;
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::material::Material;
use crate::core::scene::Scene;
use crate::core::shape::ShapeType;
use crate::core::transform::Transform;

/// Cornell style box: coloured side walls, a glass and a white
/// sphere, lit by a small quad under the ceiling. The camera looks
/// into the open side of the box.
pub fn reference_room(width: usize, height: usize) -> Result<(Scene, Camera)> {
    let mut scene = Scene::new();
    let grey = Material::matte(Spectrum::new(0.8));
    let walls: [(Transform, Material); 5] = [
        // right
        (
            Transform::translate(&Vector3f::new(-2.5, 0.0, -1.5))
                * Transform::rotate_y(-90.0)
                * Transform::scale(2.0, 2.5, 1.0),
            Material::matte(Spectrum::rgb(0.8, 0.0, 0.0)),
        ),
        // left
        (
            Transform::translate(&Vector3f::new(2.5, 0.0, -1.5))
                * Transform::rotate_y(90.0)
                * Transform::scale(2.0, 2.5, 1.0),
            Material::matte(Spectrum::rgb(0.0, 0.8, 0.0)),
        ),
        // ceiling
        (
            Transform::translate(&Vector3f::new(0.0, 2.5, -1.5))
                * Transform::rotate_x(-90.0)
                * Transform::scale(2.501, 2.001, 1.0),
            grey,
        ),
        // floor
        (
            Transform::translate(&Vector3f::new(0.0, -2.5, -1.5))
                * Transform::rotate_x(90.0)
                * Transform::scale(2.501, 2.001, 1.0),
            grey,
        ),
        // back
        (
            Transform::translate(&Vector3f::new(0.0, 0.0, -3.5))
                * Transform::rotate_y(180.0)
                * Transform::scale(2.501, 2.501, 1.0),
            grey,
        ),
    ];
    for (transform, material) in walls.iter() {
        scene.add_shape(ShapeType::Quad, &transform.m, *material)?;
    }
    scene.add_shape(
        ShapeType::Sphere,
        &Transform::translate(&Vector3f::new(1.0, -1.5, -0.5)).m,
        Material::glass(Spectrum::new(1.0), 1.0, 1.5),
    )?;
    scene.add_shape(
        ShapeType::Sphere,
        &Transform::translate(&Vector3f::new(-1.0, -1.5, -2.5)).m,
        Material::matte(Spectrum::new(1.0)),
    )?;
    let light: Transform = Transform::translate(&Vector3f::new(0.0, 2.475, -1.5))
        * Transform::rotate_x(-90.0)
        * Transform::scale(0.5, 0.3, 1.0);
    scene.add_area_light(ShapeType::Quad, &light.m, Spectrum::new(60.0))?;
    let camera = Camera::look_at(
        Point3f::new(0.0, 0.0, 4.5),
        Point3f::new(0.0, 0.0, -1.5),
        Vector3f::new(0.0, 1.0, 0.0),
        60.0,
        width as Float / height.max(1) as Float,
    );
    Ok((scene, camera))
}
