use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deck file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no image files found in directory: {0}")]
    NoImages(PathBuf),
}

/// Raised while sampling a transition. Never fatal: the orchestrator forces the
/// transition to its terminal pose and commits it.
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("clock step must be finite and non-negative, got {0}")]
    InvalidStep(f32),
    #[error("tween for {target:?} produced a non-finite value")]
    NonFinite { target: crate::timeline::Target },
    #[error("slide {0} is not in the registry")]
    MissingSlide(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("window size must be positive, got {width}x{height}")]
    WindowSize { width: i32, height: i32 },
    #[error("fps must be at least 1")]
    Fps,
    #[error("swipe threshold must be a non-negative number of pixels, got {0}")]
    SwipeThreshold(f32),
    #[error("time scale must be a positive number, got {0}")]
    TimeScale(f32),
}
