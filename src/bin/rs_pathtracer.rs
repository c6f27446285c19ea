// std
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
// command line options
use clap::Parser;
// others
use log::info;
// rs_pathtracer
use rs_pathtracer::core::api::PathTracer;
use rs_pathtracer::core::common::Float;
use rs_pathtracer::core::error::RenderError;
use rs_pathtracer::core::film::{BlendMode, TextureBuffer};
use rs_pathtracer::core::integrator::{Backend, TracerConfig};
use rs_pathtracer::core::light::LightSelection;
use rs_pathtracer::core::scenes::reference_room;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the reference room progressively and save it as PNG.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// image width in pixels
    #[arg(long = "width", default_value_t = 640)]
    width: usize,
    /// image height in pixels
    #[arg(long = "height", default_value_t = 480)]
    height: usize,
    /// number of progressive iterations (one path per pixel each)
    #[arg(short = 'i', long = "iterations", default_value_t = 64)]
    iterations: u32,
    /// use specified number of threads for rendering
    #[arg(short = 't', long = "nthreads", default_value_t = 0)]
    nthreads: usize,
    /// row-threads or per-pixel
    #[arg(long = "backend", default_value = "row-threads")]
    backend: Backend,
    /// mean or exponential
    #[arg(long = "blend", default_value = "mean")]
    blend: BlendMode,
    /// minimum weight of a new sample for exponential blending
    #[arg(long = "decay", default_value_t = 0.05)]
    decay: Float,
    /// maximum number of bounces
    #[arg(long = "max-depth", default_value_t = 16)]
    max_depth: u32,
    /// uniform or power
    #[arg(long = "light-selection", default_value = "uniform")]
    light_selection: LightSelection,
    /// The path of the image to write
    #[arg(short = 'o', long = "output", default_value = "room.png")]
    output: PathBuf,
}

fn main() -> Result<(), RenderError> {
    env_logger::init();
    // handle command line options
    let args = Cli::parse();
    let num_cores = num_cpus::get();
    println!(
        "rs_pathtracer version {} [Detected {} cores]",
        VERSION, num_cores
    );
    let blend: BlendMode = match args.blend {
        BlendMode::Exponential { .. } => BlendMode::Exponential { decay: args.decay },
        mode => mode,
    };
    let config = TracerConfig {
        max_depth: args.max_depth,
        light_selection: args.light_selection,
        blend,
        backend: args.backend,
        num_threads: args.nthreads,
        ..TracerConfig::default()
    };
    let (scene, camera) = reference_room(args.width, args.height)?;
    let mut tracer = PathTracer::with_config(config);
    tracer.set_scene(scene);
    tracer.set_camera(camera);
    tracer.init(args.width, args.height)?;
    let texture = Arc::new(Mutex::new(TextureBuffer::new(args.width, args.height)));
    tracer.register_2d_texture("room", texture.clone())?;
    for iteration in pbr::PbIter::new(1..=args.iterations) {
        tracer.trace_path("room", args.width, args.height, iteration)?;
    }
    tracer.unregister_texture("room")?;
    let image = texture
        .lock()
        .map_err(|_| RenderError::TargetPoisoned(String::from("room")))?;
    info!("writing {:?}", args.output);
    image.save_png(&args.output)?;
    println!("Writing image {:?}", args.output);
    Ok(())
}
