#![forbid(unsafe_code)]

//! Runtime support for pagefx behaviors.
//!
//! This crate provides:
//! - [`reactive`]: [`Observable`] values and [`Signal`] streams with RAII
//!   [`Subscription`]s
//! - [`visibility`]: a [`VisibilityObserver`] that reports when elements
//!   enter or leave a margin-adjusted viewport
//! - `telemetry` (feature `subscriber`): one-call tracing setup

pub mod reactive;
#[cfg(feature = "subscriber")]
pub mod telemetry;
pub mod visibility;

pub use reactive::{Observable, Signal, Subscription};
#[cfg(feature = "subscriber")]
pub use telemetry::{TelemetryError, init_tracing};
pub use visibility::{ObserveMode, ObserverOptions, VisibilityEntry, VisibilityObserver};
