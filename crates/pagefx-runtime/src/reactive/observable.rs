#![forbid(unsafe_code)]

//! Version-tracked shared values.
//!
//! # Usage
//!
//! ```
//! use pagefx_runtime::reactive::Observable;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let open = Observable::new(false);
//! let seen = Rc::new(Cell::new(false));
//! let s = Rc::clone(&seen);
//! let _sub = open.subscribe(move |v| s.set(*v));
//!
//! open.set(true);
//! assert!(seen.get());
//! assert_eq!(open.version(), 1);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

/// Ordered list of weakly-held callbacks.
pub(crate) struct Subscribers<T> {
    callbacks: Vec<Weak<Callback<T>>>,
}

impl<T: 'static> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register `callback`; the returned guard owns the only strong reference.
    pub(crate) fn add(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Rc<Callback<T>> = Rc::new(callback);
        self.callbacks.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Drop dead callbacks and return the live ones in registration order.
    pub(crate) fn live(&mut self) -> Vec<Rc<Callback<T>>> {
        self.callbacks.retain(|weak| weak.strong_count() > 0);
        self.callbacks.iter().filter_map(Weak::upgrade).collect()
    }

    pub(crate) fn count(&self) -> usize {
        self.callbacks
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// RAII guard for a registered callback.
///
/// Dropping it unsubscribes. Keep it alive for as long as the callback
/// should fire.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Subscribers<T>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Clones share the same value, version and subscriber list.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Subscribers::new(),
            })),
        }
    }

    /// Current value (cloned).
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
            inner.subscribers.live()
        };
        let snapshot = self.get();
        for callback in callbacks {
            callback(&snapshot);
        }
        true
    }

    /// Apply `f` to a copy of the value and store the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Register a change callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow_mut().subscribers.add(callback)
    }

    /// Number of changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}
