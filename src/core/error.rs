//! Errors reported to callers of the session API.
//!
//! Only contract violations end up here. Problems along a single path
//! (no hit, degenerate geometry, total internal reflection, roulette)
//! just terminate that path.

use thiserror::Error;

/// Main error type for rendering sessions.
#[derive(Error, Debug)]
pub enum RenderError {
    /// `trace_path` called before `init`
    #[error("Path tracer not initialized: call init() first")]
    NotInitialized,

    /// `init` called twice
    #[error("Path tracer already initialized")]
    AlreadyInitialized,

    /// Zero sized image
    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: usize, height: usize },

    /// Requested size differs from the allocated buffer or target
    #[error("Resolution mismatch: expected {expected:?}, got {actual:?}")]
    ResolutionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A target with this name is already bound
    #[error("Texture already registered: {0}")]
    TextureAlreadyRegistered(String),

    /// No target bound under this name
    #[error("Texture not registered: {0}")]
    TextureNotRegistered(String),

    /// A lock around a target was poisoned by a panicking holder
    #[error("Texture lock poisoned: {0}")]
    TargetPoisoned(String),

    /// Shape transform can't be inverted
    #[error("Singular transform for shape {0}")]
    SingularTransform(usize),

    /// Area lights need an emissive material
    #[error("Shape {0} registered as area light has no emission")]
    NotEmissive(usize),

    /// Writing an image failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering sessions.
pub type Result<T> = std::result::Result<T, RenderError>;
