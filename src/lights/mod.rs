//! In order for objects in a scene to be visible, there must be a
//! source of illumination so that some light is reflected from them
//! to the camera sensor.
//!
//! - DiffuseAreaLight
//!
//! ## Area Lights
//!
//! Area lights are light sources defined by one or more shapes that
//! emit light from their surface, with some directional distribution
//! of radiant energy at each point on the surface. Here every area
//! light is a diffuse emitter on a quad or sphere, radiating on both
//! sides.

pub mod diffuse;
