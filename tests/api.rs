use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rs_pathtracer::core::api::PathTracer;
use rs_pathtracer::core::camera::Camera;
use rs_pathtracer::core::common::Spectrum;
use rs_pathtracer::core::error::RenderError;
use rs_pathtracer::core::film::TextureBuffer;
use rs_pathtracer::core::geometry::{Point3f, Vector3f};
use rs_pathtracer::core::material::Material;
use rs_pathtracer::core::shape::ShapeType;
use rs_pathtracer::core::transform::{Matrix4x4, Transform};

fn texture(width: usize, height: usize) -> Arc<Mutex<TextureBuffer>> {
    Arc::new(Mutex::new(TextureBuffer::new(width, height)))
}

#[test]
fn init_only_once() {
    let mut tracer = PathTracer::new();
    assert!(!tracer.is_initialized());
    tracer.init(4, 3).unwrap();
    assert!(tracer.is_initialized());
    match tracer.init(4, 3) {
        Err(RenderError::AlreadyInitialized) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn zero_resolution_is_rejected() {
    let mut tracer = PathTracer::new();
    match tracer.init(0, 3) {
        Err(RenderError::InvalidResolution { width: 0, height: 3 }) => {}
        other => panic!("unexpected {:?}", other),
    }
    // a failed init leaves the session usable
    tracer.init(2, 2).unwrap();
}

#[test]
fn tracing_needs_init() {
    let mut tracer = PathTracer::new();
    tracer.register_2d_texture("t", texture(4, 3)).unwrap();
    match tracer.trace_path("t", 4, 3, 1) {
        Err(RenderError::NotInitialized) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn texture_registration() {
    let mut tracer = PathTracer::new();
    tracer.init(4, 3).unwrap();
    tracer.register_2d_texture("a", texture(4, 3)).unwrap();
    match tracer.register_2d_texture("a", texture(4, 3)) {
        Err(RenderError::TextureAlreadyRegistered(name)) => assert_eq!(name, "a"),
        other => panic!("unexpected {:?}", other),
    }
    match tracer.trace_path("b", 4, 3, 1) {
        Err(RenderError::TextureNotRegistered(name)) => assert_eq!(name, "b"),
        other => panic!("unexpected {:?}", other),
    }
    tracer.unregister_texture("a").unwrap();
    match tracer.unregister_texture("a") {
        Err(RenderError::TextureNotRegistered(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
    // the name is free again
    tracer.register_2d_texture("a", texture(4, 3)).unwrap();
}

#[test]
fn sizes_must_match() {
    let mut tracer = PathTracer::new();
    tracer.init(4, 3).unwrap();
    tracer.register_2d_texture("small", texture(2, 2)).unwrap();
    tracer.register_2d_texture("right", texture(4, 3)).unwrap();
    match tracer.trace_path("right", 8, 6, 1) {
        Err(RenderError::ResolutionMismatch { expected, actual }) => {
            assert_eq!(expected, (4, 3));
            assert_eq!(actual, (8, 6));
        }
        other => panic!("unexpected {:?}", other),
    }
    match tracer.trace_path("small", 4, 3, 1) {
        Err(RenderError::ResolutionMismatch { expected, actual }) => {
            assert_eq!(expected, (2, 2));
            assert_eq!(actual, (4, 3));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn singular_shapes_are_rejected() {
    let mut tracer = PathTracer::new();
    let flat = Transform::scale(1.0, 0.0, 1.0).m;
    match tracer.add_shape(ShapeType::Quad, flat, Material::matte(Spectrum::new(0.5))) {
        Err(RenderError::SingularTransform(0)) => {}
        other => panic!("unexpected {:?}", other),
    }
    match tracer.add_area_light(ShapeType::Sphere, flat, Spectrum::new(1.0)) {
        Err(RenderError::SingularTransform(0)) => {}
        other => panic!("unexpected {:?}", other),
    }
    match tracer.add_area_light_with_material(
        ShapeType::Quad,
        Matrix4x4::identity(),
        Material::matte(Spectrum::new(0.5)),
    ) {
        Err(RenderError::NotEmissive(0)) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert!(tracer.scene().shapes.is_empty());
}

#[test]
fn errors_read_well() {
    let e = RenderError::ResolutionMismatch {
        expected: (640, 480),
        actual: (320, 240),
    };
    assert_eq!(
        e.to_string(),
        "Resolution mismatch: expected (640, 480), got (320, 240)"
    );
    assert_eq!(
        RenderError::TextureNotRegistered(String::from("main")).to_string(),
        "Texture not registered: main"
    );
}

#[test]
fn light_seen_through_the_camera_matrix() {
    // a single big light filling the view
    let (width, height) = (6, 4);
    let mut tracer = PathTracer::new();
    let wall = Transform::translate(&Vector3f::new(0.0, 0.0, -5.0)) * Transform::scale(20.0, 20.0, 1.0);
    let index = tracer
        .add_area_light(ShapeType::Quad, wall.m, Spectrum::new(100.0))
        .unwrap();
    assert_eq!(index, 0);
    let le = tracer.scene().shapes[0].material.emitted();
    let camera = Camera::look_at(
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        45.0,
        width as f32 / height as f32,
    );
    tracer.set_scale_view_inv_eye(camera.eye, camera.scale_view_inv);
    assert_eq!(*tracer.camera(), camera);
    tracer.init(width, height).unwrap();
    let target = texture(width, height);
    tracer.register_2d_texture("screen", target.clone()).unwrap();
    for iteration in 1..=3 {
        tracer.trace_path("screen", width, height, iteration).unwrap();
    }
    let frame = target.lock().unwrap().clone();
    for p in &frame.pixels {
        for k in 0..3 {
            assert!((p[k] - le[k]).abs() < 1e-5 * le[k], "{:?} vs {:?}", p, le);
        }
    }
    let bytes = frame.to_rgb8();
    assert_eq!(bytes.len(), width * height * 3);
}
