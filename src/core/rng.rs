//! Random Number Generator
//!
//! PCG32 with one independent stream per `(pixel, iteration)` pair,
//! so every pixel of every progressive pass draws its own
//! reproducible sequence regardless of which worker traces it.

use hexf::*;

// crate
use crate::core::common::Float;
use crate::core::geometry::Point2f;

pub const FLOAT_ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1");
pub const PCG32_DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;
pub const PCG32_MULT: u64 = 0x5851_f42d_4c95_7f2d;

#[derive(Debug, Copy, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Rng::new()
    }
}

impl Rng {
    pub fn new() -> Self {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
    /// Stream for one pixel in one iteration.
    pub fn for_pixel(pixel_index: usize, iteration: u32) -> Self {
        let mut rng = Rng::new();
        // the low bits select the pixel, the high bits the iteration
        let seq: u64 = (pixel_index as u64 & 0xffff_ffff) | ((iteration as u64) << 32);
        rng.set_sequence(mix_bits(seq));
        rng
    }
    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0_u64;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = (oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27) as u32;
        let rot: u32 = oldstate.wrapping_shr(59) as u32;
        xorshifted.wrapping_shr(rot) | xorshifted.wrapping_shl(rot.wrapping_neg() & 31)
    }
    /// Uniform sample in `[0, 1)`.
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_uint32() as Float * hexf32!("0x1.0p-32") as Float)
            .min(FLOAT_ONE_MINUS_EPSILON)
    }
    pub fn get_1d(&mut self) -> Float {
        self.uniform_float()
    }
    pub fn get_2d(&mut self) -> Point2f {
        let x: Float = self.uniform_float();
        let y: Float = self.uniform_float();
        Point2f { x, y }
    }
}

/// Scramble neighbouring sequence indices.
fn mix_bits(mut v: u64) -> u64 {
    v ^= v >> 31;
    v = v.wrapping_mul(0x7fb5_d329_728e_a185);
    v ^= v >> 27;
    v = v.wrapping_mul(0x81da_def4_bc2d_d44d);
    v ^= v >> 33;
    v
}
