//! Session façade used by a display layer (or the command line tool).
//!
//! A **PathTracer** owns the scene, the camera and the accumulation
//! buffer. The caller builds the scene, calls `init` once with the
//! image size, registers one or more render targets by name and then
//! calls `trace_path` once per frame with an increasing iteration
//! number (starting at 1 after every reset).

// std
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
// others
use log::{debug, info};
// crate
use crate::core::camera::Camera;
use crate::core::common::Spectrum;
use crate::core::error::{RenderError, Result};
use crate::core::film::{AccumulationBuffer, RenderTarget};
use crate::core::geometry::Point3f;
use crate::core::integrator::TracerConfig;
use crate::core::material::Material;
use crate::core::scene::Scene;
use crate::core::shape::ShapeType;
use crate::core::transform::Matrix4x4;
use crate::integrators::path::PathIntegrator;
use crate::integrators::{render_iteration, RenderContext};

/// Shared handle to a caller owned target.
pub type SharedTarget = Arc<Mutex<dyn RenderTarget>>;

pub struct PathTracer {
    config: TracerConfig,
    scene: Scene,
    camera: Camera,
    integrator: PathIntegrator,
    buffer: Option<AccumulationBuffer>,
    targets: HashMap<String, SharedTarget>,
}

impl Default for PathTracer {
    fn default() -> Self {
        PathTracer::with_config(TracerConfig::default())
    }
}

impl PathTracer {
    pub fn new() -> Self {
        PathTracer::default()
    }
    pub fn with_config(config: TracerConfig) -> Self {
        let mut scene: Scene = Scene::new();
        scene.set_light_selection(config.light_selection);
        PathTracer {
            config,
            scene,
            camera: Camera::default(),
            integrator: PathIntegrator::new(&config),
            buffer: None,
            targets: HashMap::new(),
        }
    }
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    /// Replace the whole scene, e.g. with one of the built-in scenes.
    pub fn set_scene(&mut self, mut scene: Scene) {
        scene.set_light_selection(self.config.light_selection);
        self.scene = scene;
    }
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }
    /// Allocate the accumulation buffer. Only valid once per session.
    pub fn init(&mut self, width: usize, height: usize) -> Result<()> {
        if self.buffer.is_some() {
            return Err(RenderError::AlreadyInitialized);
        }
        self.buffer = Some(AccumulationBuffer::new(width, height, self.config.blend)?);
        info!(
            "initialized {}x{} ({} blending, {} backend, {} worker(s))",
            width,
            height,
            self.config.blend,
            self.config.backend,
            self.config.worker_count()
        );
        Ok(())
    }
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }
    pub fn add_shape(
        &mut self,
        shape_type: ShapeType,
        object_to_world: Matrix4x4,
        material: Material,
    ) -> Result<usize> {
        self.scene.add_shape(shape_type, &object_to_world, material)
    }
    /// Add an emitter radiating `power` in total.
    pub fn add_area_light(
        &mut self,
        shape_type: ShapeType,
        object_to_world: Matrix4x4,
        power: Spectrum,
    ) -> Result<usize> {
        let index: usize = self.scene.add_area_light(shape_type, &object_to_world, power)?;
        info!("area light #{} ({}, power {:?})", index, shape_type, power.to_rgb());
        Ok(index)
    }
    pub fn add_area_light_with_material(
        &mut self,
        shape_type: ShapeType,
        object_to_world: Matrix4x4,
        material: Material,
    ) -> Result<usize> {
        self.scene
            .add_area_light_with_material(shape_type, &object_to_world, material)
    }
    /// Make `target` available to `trace_path` under `name`.
    pub fn register_2d_texture(&mut self, name: &str, target: SharedTarget) -> Result<()> {
        if self.targets.contains_key(name) {
            return Err(RenderError::TextureAlreadyRegistered(name.to_string()));
        }
        self.targets.insert(name.to_string(), target);
        info!("registered texture {:?}", name);
        Ok(())
    }
    pub fn unregister_texture(&mut self, name: &str) -> Result<()> {
        match self.targets.remove(name) {
            Some(_) => {
                info!("unregistered texture {:?}", name);
                Ok(())
            }
            None => Err(RenderError::TextureNotRegistered(name.to_string())),
        }
    }
    /// Set the camera from an eye point and the matrix taking
    /// `(u, v, -1, 1)` to the view plane.
    pub fn set_scale_view_inv_eye(&mut self, eye: Point3f, scale_view_inv: Matrix4x4) {
        self.camera = Camera::new(eye, scale_view_inv);
    }
    /// Forget all accumulated samples; the next iteration should be 1.
    pub fn reset(&mut self) {
        if let Some(ref mut buffer) = self.buffer {
            buffer.reset();
        }
    }
    /// Trace one path per pixel, blend it into the running estimate
    /// and copy the result into the target registered as `name`.
    pub fn trace_path(&mut self, name: &str, width: usize, height: usize, iteration: u32) -> Result<()> {
        let buffer: &mut AccumulationBuffer = match self.buffer {
            Some(ref mut buffer) => buffer,
            None => return Err(RenderError::NotInitialized),
        };
        let target: SharedTarget = match self.targets.get(name) {
            Some(target) => Arc::clone(target),
            None => return Err(RenderError::TextureNotRegistered(name.to_string())),
        };
        if buffer.size() != (width, height) {
            return Err(RenderError::ResolutionMismatch {
                expected: buffer.size(),
                actual: (width, height),
            });
        }
        let mut guard = target
            .lock()
            .map_err(|_| RenderError::TargetPoisoned(name.to_string()))?;
        if guard.size() != (width, height) {
            return Err(RenderError::ResolutionMismatch {
                expected: guard.size(),
                actual: (width, height),
            });
        }
        let ctx = RenderContext {
            scene: &self.scene,
            camera: &self.camera,
            integrator: &self.integrator,
            width,
            height,
        };
        render_iteration(&ctx, buffer, iteration, &self.config);
        guard.write(&buffer.pixels);
        debug!("iteration {} written to {:?}", iteration, name);
        Ok(())
    }
}
