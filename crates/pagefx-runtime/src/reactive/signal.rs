#![forbid(unsafe_code)]

//! Stateless event streams.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::observable::{Subscribers, Subscription};

/// A broadcast stream of events.
///
/// Unlike [`Observable`](super::Observable) there is no stored value and no
/// equality check: every [`emit`](Signal::emit) reaches every live
/// subscriber. Clones share the subscriber list.
pub struct Signal<T> {
    subscribers: Rc<RefCell<Subscribers<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Subscribers::new())),
        }
    }

    /// Deliver `event` to every live subscriber, in registration order.
    ///
    /// Returns the number of callbacks invoked.
    pub fn emit(&self, event: &T) -> usize {
        let callbacks = self.subscribers.borrow_mut().live();
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribers.borrow_mut().add(callback)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().count()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeated_events_are_all_delivered() {
        let signal = Signal::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _sub = signal.subscribe(move |_: &u8| c.set(c.get() + 1));

        signal.emit(&1);
        signal.emit(&1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn emit_reports_live_callbacks() {
        let signal: Signal<()> = Signal::new();
        let a = signal.subscribe(|_| {});
        let _b = signal.subscribe(|_| {});
        assert_eq!(signal.emit(&()), 2);
        drop(a);
        assert_eq!(signal.emit(&()), 1);
        assert_eq!(signal.subscriber_count(), 1);
    }

    #[test]
    fn subscribing_inside_a_callback_does_not_panic() {
        let signal: Signal<u32> = Signal::new();
        let inner = signal.clone();
        let held = Rc::new(RefCell::new(Vec::new()));
        let h = Rc::clone(&held);
        let _sub = signal.subscribe(move |_| {
            h.borrow_mut().push(inner.subscribe(|_| {}));
        });

        signal.emit(&0);
        assert_eq!(held.borrow().len(), 1);
        assert_eq!(signal.subscriber_count(), 2);
    }
}
