//! The accumulation buffer holds the progressive estimate for every
//! pixel. Each iteration contributes one sample per pixel which gets
//! blended into the running value; the blended buffer is then copied
//! into whatever **RenderTarget** the caller registered.
//!
//! Pixels are stored row-major with row 0 at the top of the image.

// std
use std::path::Path;
// others
use strum_macros::{Display, EnumIter, EnumString};
// crate
use crate::core::common::{clamp_t, gamma_correct, lerp, Float, Spectrum};
use crate::core::error::{RenderError, Result};

/// How a new sample is folded into a pixel's history.
#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum BlendMode {
    /// equal weight for every iteration since the last reset
    #[strum(serialize = "mean")]
    RunningMean,
    /// recent iterations weigh more, history fades with `decay`
    Exponential { decay: Float },
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::RunningMean
    }
}

impl BlendMode {
    /// Weight of the new sample in iteration `iteration` (1 based).
    pub fn alpha(&self, iteration: u32) -> Float {
        let n: Float = iteration.max(1) as Float;
        match *self {
            BlendMode::RunningMean => 1.0 as Float / n,
            BlendMode::Exponential { decay } => {
                clamp_t((1.0 as Float / n).max(decay), 0.0 as Float, 1.0 as Float)
            }
        }
    }
}

/// Blend `sample` into `running` with weight `alpha`.
pub fn blend(running: Spectrum, sample: Spectrum, alpha: Float) -> Spectrum {
    if alpha >= 1.0 as Float {
        // first iteration after a reset drops any stale history
        return sample;
    }
    lerp(alpha, running, sample)
}

#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    pub width: usize,
    pub height: usize,
    pub blend: BlendMode,
    pub pixels: Vec<Spectrum>,
}

impl AccumulationBuffer {
    pub fn new(width: usize, height: usize, blend: BlendMode) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        Ok(AccumulationBuffer {
            width,
            height,
            blend,
            pixels: vec![Spectrum::default(); width * height],
        })
    }
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    /// Blend one sample into the pixel at `index` and return the new
    /// running value.
    pub fn accumulate(&mut self, index: usize, sample: Spectrum, iteration: u32) -> Spectrum {
        let alpha: Float = self.blend.alpha(iteration);
        let blended: Spectrum = blend(self.pixels[index], sample, alpha);
        self.pixels[index] = blended;
        blended
    }
    pub fn get(&self, x: usize, y: usize) -> Spectrum {
        self.pixels[y * self.width + x]
    }
    pub fn reset(&mut self) {
        for p in self.pixels.iter_mut() {
            *p = Spectrum::default();
        }
    }
}

/// Destination for the blended image, supplied by the display side.
pub trait RenderTarget: Send {
    /// `(width, height)` in pixels
    fn size(&self) -> (usize, usize);
    /// Receive a full frame, row-major, top row first.
    fn write(&mut self, pixels: &[Spectrum]);
}

/// A render target living in main memory.
#[derive(Debug, Clone)]
pub struct TextureBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Spectrum>,
}

impl TextureBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        TextureBuffer {
            width,
            height,
            pixels: vec![Spectrum::default(); width * height],
        }
    }
    pub fn get(&self, x: usize, y: usize) -> Spectrum {
        self.pixels[y * self.width + x]
    }
    /// Gamma corrected 8-bit RGB triples.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut buffer: Vec<u8> = Vec::with_capacity(3 * self.pixels.len());
        for p in &self.pixels {
            for v in p.to_rgb().iter() {
                buffer.push(
                    clamp_t(255.0 as Float * gamma_correct(*v) + 0.5, 0.0, 255.0) as u8,
                );
            }
        }
        buffer
    }
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgb8,
        )?;
        Ok(())
    }
}

impl RenderTarget for TextureBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    fn write(&mut self, pixels: &[Spectrum]) {
        self.pixels.clear();
        self.pixels.extend_from_slice(pixels);
    }
}
