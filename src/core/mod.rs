//! Basic types, geometry and the rendering machinery shared by shapes,
//! materials, lights and integrators.

pub mod api;
pub mod camera;
pub mod common;
pub mod error;
pub mod film;
pub mod geometry;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod material;
pub mod parallel;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod scenes;
pub mod shape;
pub mod spectrum;
pub mod transform;
