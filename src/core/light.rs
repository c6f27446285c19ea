//! In order for objects in a scene to be visible, there must be a
//! source of illumination. All lights are area lights: emissive
//! shapes that are both geometry and light source.

// others
use strum_macros::{Display, EnumIter, EnumString};
// crate
use crate::core::geometry::Point3f;
use crate::core::scene::Scene;

/// How the direct light estimator picks one of several lights.
#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum LightSelection {
    /// every light with the same probability
    Uniform,
    /// proportional to emitted power
    Power,
}

impl Default for LightSelection {
    fn default() -> Self {
        LightSelection::Uniform
    }
}

/// Shadow ray between two points that ignores the shapes the segment
/// starts and ends on.
#[derive(Debug, Copy, Clone)]
pub struct VisibilityTester {
    pub p0: Point3f,
    pub p1: Point3f,
    pub exclude: [usize; 2],
}

impl VisibilityTester {
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        scene.unoccluded(&self.p0, &self.p1, &self.exclude)
    }
}
