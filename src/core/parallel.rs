//! Splitting an image into disjoint bands of rows, one per worker.

// std
use std::ops::Range;
// crate
use crate::core::common::{Float, Spectrum};
use crate::core::film::blend;

/// Split `height` rows into `workers` contiguous ranges. The first
/// `height % workers` ranges get one row more than the others; empty
/// ranges (more workers than rows) are dropped.
pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    let workers: usize = workers.max(1);
    let base: usize = height / workers;
    let extra: usize = height % workers;
    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(workers);
    let mut start: usize = 0;
    for w in 0..workers {
        let rows: usize = base + if w < extra { 1 } else { 0 };
        ranges.push(start..start + rows);
        start += rows;
    }
    ranges.retain(|r| !r.is_empty());
    ranges
}

/// One worker's share of an iteration: a band of rows and exclusive
/// access to the matching pixels.
#[derive(Debug)]
pub struct ThreadData<'a> {
    pub pixels: &'a mut [Spectrum],
    pub row_start: usize,
    pub row_end: usize,
    /// pixels per row
    pub col_width: usize,
    /// weight of this iteration's sample
    pub alpha: Float,
    pub is_main_thread: bool,
}

impl<'a> ThreadData<'a> {
    /// Cut `pixels` into one band per range. Ranges have to be
    /// contiguous and start at row 0; the first band belongs to the
    /// calling thread.
    pub fn split(
        pixels: &'a mut [Spectrum],
        col_width: usize,
        ranges: &[Range<usize>],
        alpha: Float,
    ) -> Vec<ThreadData<'a>> {
        let mut rest: &'a mut [Spectrum] = pixels;
        let mut bands: Vec<ThreadData<'a>> = Vec::with_capacity(ranges.len());
        for (i, range) in ranges.iter().enumerate() {
            let len: usize = range.len() * col_width;
            if len > rest.len() {
                break;
            }
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            bands.push(ThreadData {
                pixels: band,
                row_start: range.start,
                row_end: range.end,
                col_width,
                alpha,
                is_main_thread: i == 0,
            });
        }
        bands
    }
    /// Blend the sample `trace(x, y)` into every pixel of the band.
    pub fn render<F>(&mut self, mut trace: F)
    where
        F: FnMut(usize, usize) -> Spectrum,
    {
        for y in self.row_start..self.row_end {
            let row: usize = (y - self.row_start) * self.col_width;
            for x in 0..self.col_width {
                let p: &mut Spectrum = &mut self.pixels[row + x];
                *p = blend(*p, trace(x, y), self.alpha);
            }
        }
    }
}
