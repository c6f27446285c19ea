//! Canonical object space primitives. A **Shape** (see
//! `core::shape`) places one of them in the world.
//!
//! - Quad
//! - Sphere
//!
//! ## Quads
//!
//! The unit quad is the square spanning `[-1, 1]` in x and y on the
//! plane `z = 0`. Its intersection needs no quadric: a single
//! division finds the plane crossing, then the point is tested
//! against the square. Quads are hit from both sides, which lets a
//! quad serve as a two-sided area light.
//!
//! ## Spheres
//!
//! Spheres are a special case of a general type of surfaces called
//! quadrics. The unit sphere has radius one around the origin; an
//! ellipsoid is just a sphere under non-uniform scale.

pub mod quad;
pub mod sphere;
