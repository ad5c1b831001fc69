use std::path::PathBuf;

pub type CompositeResult<T> = Result<T, CompositeError>;

/// Failures of a single compositing cycle. None of them are fatal to the
/// slideshow: the session logs them and keeps the previous composite.
#[derive(thiserror::Error, Debug)]
pub enum CompositeError {
    #[error("drawing surface unavailable for a {width}x{height} frame")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("failed to read image {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode composite: {0}")]
    Encode(#[source] image::ImageError),

    #[error("compositor worker stopped")]
    WorkerStopped,
}
