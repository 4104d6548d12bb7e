//! Error types for the swiper engine.
//!
//! Navigation that merely cannot move (a boundary, a single page) is not an
//! error; those calls return `false`. Errors are reserved for rejected host
//! input and configuration problems.

use horizon_swiper_core::TimerError;
use thiserror::Error;

/// Errors reported by the swiper engine.
#[derive(Error, Debug)]
pub enum SwiperError {
    /// A page index outside the page set was requested.
    #[error("page index {index} out of range for {count} pages")]
    PageOutOfRange { index: usize, count: usize },

    /// The controller has been disposed.
    #[error("swiper controller has been disposed")]
    Disposed,

    /// The configuration holds values the engine cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A TOML configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// A timer operation failed.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Result type for swiper operations.
pub type Result<T> = std::result::Result<T, SwiperError>;
