//! Horizon Swiper: a paged carousel engine.
//!
//! The engine coordinates a single-finger drag, interruptible page
//! transitions, circular index arithmetic, autoplay and an optional dot
//! indicator. It renders nothing itself: the host reports layout, page
//! count and input, drives time with [`SwiperController::tick`], and applies
//! the per-page [`ItemTransform`]s to its own views.
//!
//! - [`index`]: page count, current page and neighbour arithmetic
//! - [`animation`]: easing curves, animated values and the transition animator
//! - [`gesture`]: the drag state machine and its commit thresholds
//! - [`autoplay`]: time-driven forward paging
//! - [`indicator`]: dot-indicator notification
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use parking_lot::Mutex;
//! use horizon_swiper::gesture::DragSample;
//! use horizon_swiper::{DotIndicatorState, SwiperConfig, SwiperController};
//!
//! let dots = Arc::new(Mutex::new(DotIndicatorState::new()));
//! let mut swiper = SwiperController::new(SwiperConfig::default().with_indicator_dots(true))
//!     .unwrap()
//!     .with_indicator(dots.clone());
//!
//! swiper.on_page_change(|page| println!("now on page {page}"));
//! swiper.set_viewport(320.0, 180.0);
//! swiper.set_item_count(4);
//!
//! // A quick flick to the left commits to the next page.
//! swiper.handle_drag(&DragSample::started(1));
//! swiper.handle_drag(&DragSample::moved(1, -40.0, 0.0));
//! swiper.handle_drag(&DragSample::ended(1, -40.0, 0.0, -900.0, 0.0));
//!
//! swiper.tick(Duration::from_millis(16));
//! assert_eq!(swiper.current_index(), 1);
//! assert_eq!(dots.lock().dots(), vec![false, true, false, false]);
//! ```

pub mod animation;
pub mod autoplay;
mod config;
mod controller;
mod error;
pub mod gesture;
pub mod index;
pub mod indicator;

pub use config::{DEFAULT_DURATION_MS, GestureConfig, SwiperConfig};
pub use controller::{ItemTransform, SwiperController, SwiperHandle};
pub use error::{Result, SwiperError};
pub use index::{PageIndexModel, Slot};
pub use indicator::{DotIndicator, DotIndicatorState};
