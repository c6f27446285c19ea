//! # Materials
//!
//! Each surface class lives in its own module and is wrapped by the
//! **Material** variant in `core::material`.
//!
//! - EmissiveMaterial
//! - GlassMaterial
//! - MatteMaterial

pub mod emissive;
pub mod glass;
pub mod matte;
