// std
use std::f32::consts::PI;
// crate
use crate::core::common::{Float, Spectrum};
use crate::core::material::PathChoice;

/// Surface of an area light. Emission is uniform over the surface and
/// over directions, on both sides.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmissiveMaterial {
    pub color: Spectrum,
    /// total emitted power
    pub power: Spectrum,
    /// emitted radiance, `power / (pi * area)`
    pub emitted: Spectrum,
}

impl EmissiveMaterial {
    pub fn new(power: Spectrum, area: Float) -> Self {
        let emitted: Spectrum = if area > 0.0 as Float {
            power / (PI * area)
        } else {
            Spectrum::default()
        };
        EmissiveMaterial {
            color: Spectrum::new(1.0 as Float),
            power,
            emitted,
        }
    }
    /// Fill in the radiance of an emitter that was only given its
    /// power, once the area of its shape is known.
    pub fn with_area(self, area: Float) -> Self {
        if self.emitted.is_black() && !self.power.is_black() && area > 0.0 as Float {
            EmissiveMaterial {
                emitted: self.power / (PI * area),
                ..self
            }
        } else {
            self
        }
    }
    /// Lights don't reflect; the path ends with their radiance and the
    /// integrator decides whether it may be counted.
    pub fn scatter(&self) -> PathChoice {
        PathChoice::terminate(self.emitted)
    }
}
