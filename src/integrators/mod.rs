//! Integrators compute the radiance arriving at the film along camera
//! rays.
//!
//! - PathIntegrator
//!
//! ## Path Tracing
//!
//! Unidirectional path tracing with next event estimation at every
//! non-specular vertex and Russian roulette once a path's throughput
//! gets small. See [path](path/index.html).
//!
//! ## Progressive rendering
//!
//! [`render_iteration`] traces exactly one path per pixel and blends
//! it into the accumulation buffer. Calling it with increasing
//! iteration numbers refines the image. The work of one iteration is
//! spread over the CPU either in bands of rows (one scoped thread per
//! band) or pixel by pixel through rayon.

// others
use log::debug;
use rayon::prelude::*;
// crate
use crate::core::camera::Camera;
use crate::core::common::{Float, Spectrum};
use crate::core::film::{blend, AccumulationBuffer};
use crate::core::geometry::{Point2f, Ray};
use crate::core::integrator::{Backend, TracerConfig};
use crate::core::parallel::{partition_rows, ThreadData};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::integrators::path::PathIntegrator;

pub mod path;

/// Everything read-only a worker needs to trace a pixel.
#[derive(Debug, Copy, Clone)]
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub integrator: &'a PathIntegrator,
    pub width: usize,
    pub height: usize,
}

impl<'a> RenderContext<'a> {
    /// One jittered path through pixel `(x, y)`. Each pixel and
    /// iteration has its own random stream.
    pub fn trace_pixel(&self, x: usize, y: usize, iteration: u32) -> Spectrum {
        let mut rng: Rng = Rng::for_pixel(y * self.width + x, iteration);
        let jitter: Point2f = rng.get_2d();
        let ray: Ray = self.camera.generate_ray(x, y, self.width, self.height, &jitter);
        self.integrator.li(&ray, self.scene, &mut rng)
    }
}

/// Trace one progressive iteration into `buffer`. Returns once every
/// pixel has been updated.
pub fn render_iteration(
    ctx: &RenderContext,
    buffer: &mut AccumulationBuffer,
    iteration: u32,
    config: &TracerConfig,
) {
    let alpha: Float = buffer.blend.alpha(iteration);
    match config.backend {
        Backend::RowThreads => render_rows(buffer, alpha, config.worker_count(), &|x: usize, y: usize| {
            ctx.trace_pixel(x, y, iteration)
        }),
        Backend::PerPixel => render_pixels(ctx, buffer, iteration, alpha),
    }
}

fn render_rows<F>(buffer: &mut AccumulationBuffer, alpha: Float, num_cores: usize, trace: &F)
where
    F: Fn(usize, usize) -> Spectrum + Sync,
{
    let ranges = partition_rows(buffer.height, num_cores);
    let bands: Vec<ThreadData> = ThreadData::split(&mut buffer.pixels, buffer.width, &ranges, alpha);
    let result = crossbeam::scope(|scope| {
        let (band_tx, band_rx) = crossbeam_channel::bounded(bands.len());
        let mut main_band: Option<ThreadData> = None;
        let mut spawned: usize = 0;
        // spawn worker threads
        for mut band in bands {
            if band.is_main_thread {
                main_band = Some(band);
                continue;
            }
            let band_tx = band_tx.clone();
            spawned += 1;
            scope.spawn(move |_| {
                band.render(|x, y| trace(x, y));
                if band_tx.send((band.row_start, band.row_end)).is_err() {
                    debug!("rows {}..{} finished after shutdown", band.row_start, band.row_end);
                }
            });
        }
        // the calling thread takes the first band itself
        if let Some(mut band) = main_band {
            band.render(|x, y| trace(x, y));
            debug!("rows {}..{} done (main)", band.row_start, band.row_end);
        }
        // a worker that panics before sending closes its sender instead
        drop(band_tx);
        for (row_start, row_end) in band_rx.iter().take(spawned) {
            debug!("rows {}..{} done", row_start, row_end);
        }
    });
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

fn render_pixels(ctx: &RenderContext, buffer: &mut AccumulationBuffer, iteration: u32, alpha: Float) {
    let width: usize = buffer.width;
    buffer
        .pixels
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, p)| {
            let sample: Spectrum = ctx.trace_pixel(i % width, i / width, iteration);
            *p = blend(*p, sample, alpha);
        });
}
