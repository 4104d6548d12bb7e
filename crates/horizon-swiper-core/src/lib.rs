//! Core systems for Horizon Swiper.
//!
//! This crate provides the foundational services the paging engine is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Timers**: One-shot and repeating timers on a virtual timeline
//! - **Frame Clock**: The single time source advanced by the host's frame callback
//! - **Logging**: `tracing` targets and span names for each subsystem
//!
//! Everything here is single-threaded in spirit: the host drives time forward
//! explicitly, so the same inputs always produce the same outputs.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_swiper_core::Signal;
//!
//! let page_changed = Signal::<usize>::new();
//!
//! let conn_id = page_changed.connect(|page| {
//!     println!("Page changed to: {}", page);
//! });
//!
//! page_changed.emit(2);
//! page_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_swiper_core::{FrameClock, TimerManager};
//!
//! let mut clock = FrameClock::new();
//! let mut timers = TimerManager::new();
//! let id = timers.start_repeating(clock.now(), Duration::from_millis(100));
//!
//! clock.advance(Duration::from_millis(250));
//! assert_eq!(timers.process_expired(clock.now()), vec![id, id]);
//! ```

mod clock;
mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use clock::FrameClock;
pub use error::{Result, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
