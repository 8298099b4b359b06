#![forbid(unsafe_code)]

//! Change notification for page behaviors.
//!
//! - [`Observable`]: a shared, version-tracked value with change
//!   notification via subscriber callbacks.
//! - [`Signal`]: a stateless event stream; every `emit` reaches every live
//!   subscriber.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//!
//! # Architecture
//!
//! Both primitives use `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks and cleaned up
//! lazily during notification; the strong reference lives in the
//! [`Subscription`].
//!
//! # Invariants
//!
//! 1. Version increments exactly once per `Observable::set` that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. Callbacks run with no internal borrow held, so they may read the
//!    observable or subscribe again.

pub mod observable;
pub mod signal;

pub use observable::{Observable, Subscription};
pub use signal::Signal;
