//! Swiper configuration.
//!
//! [`SwiperConfig`] is the declarative side of the engine: axis, wrapping,
//! autoplay, timing and gesture tuning. It can be built in code with the
//! `with_*` setters or loaded from TOML:
//!
//! ```
//! use std::time::Duration;
//! use horizon_swiper::SwiperConfig;
//!
//! let config = SwiperConfig::from_toml_str(r#"
//! circular = true
//! autoplay = true
//! interval = 3000
//!
//! [gesture]
//! flick_velocity = 800.0
//! "#).unwrap();
//!
//! assert_eq!(config.interval, Duration::from_millis(3000));
//! assert_eq!(config.duration, Duration::from_millis(200));
//! assert_eq!(config.gesture.flick_velocity, 800.0);
//! ```
//!
//! Durations are written as integer milliseconds.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::autoplay::DEFAULT_INTERVAL_MS;
use crate::error::{Result, SwiperError};
use crate::gesture::{
    DEFAULT_ACTIVATION_OFFSET_HORIZONTAL, DEFAULT_ACTIVATION_OFFSET_VERTICAL,
    DEFAULT_COMMIT_FRACTION, DEFAULT_FLICK_VELOCITY, DEFAULT_VELOCITY_REFERENCE,
};

/// Default transition duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 200;

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Fraction of the viewport extent a drag must cover to commit.
    pub commit_fraction: f32,
    /// Release speed above which any drag commits in its direction.
    pub flick_velocity: f32,
    /// Travel before a horizontal drag takes over.
    pub activation_offset_horizontal: f32,
    /// Travel before a vertical drag takes over.
    pub activation_offset_vertical: f32,
    /// Release speed at which a committed settle is shortest.
    pub velocity_reference: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_fraction: DEFAULT_COMMIT_FRACTION,
            flick_velocity: DEFAULT_FLICK_VELOCITY,
            activation_offset_horizontal: DEFAULT_ACTIVATION_OFFSET_HORIZONTAL,
            activation_offset_vertical: DEFAULT_ACTIVATION_OFFSET_VERTICAL,
            velocity_reference: DEFAULT_VELOCITY_REFERENCE,
        }
    }
}

impl GestureConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("commit_fraction", self.commit_fraction),
            ("flick_velocity", self.flick_velocity),
            ("activation_offset_horizontal", self.activation_offset_horizontal),
            ("activation_offset_vertical", self.activation_offset_vertical),
            ("velocity_reference", self.velocity_reference),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SwiperError::InvalidConfig(format!(
                    "gesture.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.commit_fraction > 1.0 {
            return Err(SwiperError::InvalidConfig(format!(
                "gesture.commit_fraction must not exceed 1.0, got {}",
                self.commit_fraction
            )));
        }
        Ok(())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwiperConfig {
    /// Page along the vertical axis instead of the horizontal one.
    pub vertical: bool,
    /// Wrap around at both ends.
    pub circular: bool,
    /// Page forward automatically.
    pub autoplay: bool,
    /// Autoplay interval.
    #[serde(with = "duration_ms")]
    pub interval: Duration,
    /// Base transition duration.
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    /// Ignore drag input.
    pub disable_touch: bool,
    /// Forward count and current page to the dot indicator.
    pub indicator_dots: bool,
    /// Cross-fade pages in addition to sliding them.
    pub fade_in: bool,
    /// Initial page.
    pub current: usize,
    /// Easing curve for transitions.
    pub easing: Easing,
    /// Drag tuning.
    pub gesture: GestureConfig,
}

impl Default for SwiperConfig {
    fn default() -> Self {
        Self {
            vertical: false,
            circular: false,
            autoplay: false,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            disable_touch: false,
            indicator_dots: false,
            fade_in: false,
            current: 0,
            easing: Easing::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl SwiperConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paging axis using builder pattern.
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Set wrap-around using builder pattern.
    pub fn with_circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Set autoplay using builder pattern.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the autoplay interval using builder pattern.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the base transition duration using builder pattern.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set whether drag input is ignored using builder pattern.
    pub fn with_disable_touch(mut self, disable_touch: bool) -> Self {
        self.disable_touch = disable_touch;
        self
    }

    /// Set indicator notifications using builder pattern.
    pub fn with_indicator_dots(mut self, indicator_dots: bool) -> Self {
        self.indicator_dots = indicator_dots;
        self
    }

    /// Set cross-fading using builder pattern.
    pub fn with_fade_in(mut self, fade_in: bool) -> Self {
        self.fade_in = fade_in;
        self
    }

    /// Set the initial page using builder pattern.
    pub fn with_current(mut self, current: usize) -> Self {
        self.current = current;
        self
    }

    /// Set the easing curve using builder pattern.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set drag tuning using builder pattern.
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(SwiperError::InvalidConfig(
                "duration must be greater than zero".into(),
            ));
        }
        if self.autoplay && self.interval.is_zero() {
            return Err(SwiperError::InvalidConfig(
                "interval must be greater than zero when autoplay is enabled".into(),
            ));
        }
        if let Easing::CubicBezier(x1, y1, x2, y2) = self.easing
            && ![x1, y1, x2, y2].iter().all(|v| v.is_finite())
        {
            return Err(SwiperError::InvalidConfig(
                "cubic-bezier control points must be finite".into(),
            ));
        }
        self.gesture.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: "horizon_swiper::controller", path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
