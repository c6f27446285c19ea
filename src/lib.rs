//! # rs_pathtracer
//!
//! Progressive Monte Carlo path tracing of scenes built from two
//! analytic primitives, a unit quad and a unit sphere, each placed by
//! an arbitrary affine transform.
//!
//! A [session][api] owns the scene and an accumulation buffer. Every
//! call to `trace_path` traces one jittered path per pixel and blends
//! it into the running estimate, so the image converges over many
//! iterations. The per-pixel [path tracer][path] uses next event
//! estimation towards the area lights and Russian roulette.
//!
//! [api]: core/api/struct.PathTracer.html
//! [path]: integrators/path/struct.PathIntegrator.html

#[macro_use]
extern crate impl_ops;

pub mod core;
pub mod integrators;
pub mod lights;
pub mod materials;
pub mod shapes;
