#![forbid(unsafe_code)]

//! Viewport visibility observation.
//!
//! A [`VisibilityObserver`] tracks a set of target elements against the
//! viewport, shrunk or grown by a [`RootMargin`]. Each
//! [`update`](VisibilityObserver::update) recomputes every target's
//! intersection and reports an entry for each target whose
//! `is_intersecting` state changed.
//!
//! # Invariants
//!
//! 1. The first update after [`observe`](VisibilityObserver::observe)
//!    always reports the target (if it has a layout box).
//! 2. Later updates report a target only when `is_intersecting` flips.
//! 3. A target observed with [`ObserveMode::Once`] is unobserved in the same
//!    update that reports it intersecting, so it is reported intersecting at
//!    most once.
//! 4. Targets without a layout box are skipped and keep their last state.
//!
//! # Intersection rule
//!
//! `intersection_ratio` is the visible fraction of the target's area
//! (1.0 for a zero-area target that touches the root). A target is
//! intersecting when it overlaps the root and its ratio reaches
//! `threshold`; with a threshold of 0, edge contact is enough.

use pagefx_core::{Dom, NodeId, Rect, RootMargin};

use crate::reactive::{Signal, Subscription};

/// Whether an observed target stays observed after it becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserveMode {
    /// Keep reporting every change (sticky navigation).
    #[default]
    Persistent,
    /// Stop observing after the first intersecting entry (reveal, lazy-load).
    Once,
}

/// Root margin and ratio threshold for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Fraction of the target that must be visible, in `[0, 1]`.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::ZERO,
            threshold: 0.0,
        }
    }
}

impl ObserverOptions {
    pub fn new(root_margin: RootMargin, threshold: f64) -> Self {
        Self {
            root_margin,
            threshold,
        }
    }

    #[must_use]
    pub fn root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// One change report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    pub bounding_rect: Rect,
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    target: NodeId,
    mode: ObserveMode,
    last: Option<bool>,
}

/// Tracks targets against the viewport and reports visibility changes.
#[derive(Debug)]
pub struct VisibilityObserver {
    options: ObserverOptions,
    targets: Vec<Observed>,
    entries: Signal<VisibilityEntry>,
}

impl VisibilityObserver {
    /// Create an observer. Thresholds outside `[0, 1]` are clamped.
    pub fn new(options: ObserverOptions) -> Self {
        let threshold = if options.threshold.is_nan() {
            0.0
        } else {
            options.threshold.clamp(0.0, 1.0)
        };
        if threshold != options.threshold {
            tracing::warn!(
                requested = options.threshold,
                threshold,
                "visibility threshold clamped"
            );
        }
        Self {
            options: ObserverOptions {
                threshold,
                ..options
            },
            targets: Vec::new(),
            entries: Signal::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Start observing `target`. Observing an already-observed target
    /// replaces its mode and resets it to "never reported".
    pub fn observe(&mut self, target: NodeId, mode: ObserveMode) {
        let fresh = Observed {
            target,
            mode,
            last: None,
        };
        match self.targets.iter_mut().find(|o| o.target == target) {
            Some(existing) => *existing = fresh,
            None => self.targets.push(fresh),
        }
    }

    /// Stop observing `target`. Returns whether it was observed.
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|o| o.target != target);
        self.targets.len() != before
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.targets.iter().any(|o| o.target == target)
    }

    /// Number of observed targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Receive every reported entry as it is produced.
    pub fn subscribe(&self, callback: impl Fn(&VisibilityEntry) + 'static) -> Subscription {
        self.entries.subscribe(callback)
    }

    /// Measure one target against a root rectangle.
    pub fn measure(&self, root: &Rect, target: NodeId, rect: Rect) -> VisibilityEntry {
        let (is_intersecting, intersection_ratio) = match rect.intersection(root) {
            None => (false, 0.0),
            Some(overlap) => {
                let ratio = if rect.is_empty() {
                    1.0
                } else {
                    (overlap.area() / rect.area()).clamp(0.0, 1.0)
                };
                let visible = if self.options.threshold <= 0.0 {
                    true
                } else {
                    ratio >= self.options.threshold
                };
                (visible, ratio)
            }
        };
        VisibilityEntry {
            target,
            is_intersecting,
            intersection_ratio,
            bounding_rect: rect,
        }
    }

    /// Recompute every target against `viewport`.
    ///
    /// `rect_of` supplies each target's viewport-relative box (`None` when
    /// the target is not rendered).
    pub fn update(
        &mut self,
        viewport: Rect,
        rect_of: impl Fn(NodeId) -> Option<Rect>,
    ) -> Vec<VisibilityEntry> {
        let root = viewport.inset_by(&self.options.root_margin);
        let mut reported = Vec::new();

        for idx in 0..self.targets.len() {
            let observed = self.targets[idx];
            let Some(rect) = rect_of(observed.target) else {
                continue;
            };
            let entry = self.measure(&root, observed.target, rect);
            if observed.last == Some(entry.is_intersecting) {
                continue;
            }
            self.targets[idx].last = Some(entry.is_intersecting);
            reported.push(entry);
        }

        self.targets.retain(|o| !(o.mode == ObserveMode::Once && o.last == Some(true)));

        for entry in &reported {
            tracing::trace!(
                target_node = %entry.target,
                intersecting = entry.is_intersecting,
                ratio = entry.intersection_ratio,
                "visibility changed"
            );
            self.entries.emit(entry);
        }
        reported
    }

    /// [`update`](Self::update) using the DOM's viewport and layout boxes.
    pub fn update_from<D: Dom + ?Sized>(&mut self, dom: &D) -> Vec<VisibilityEntry> {
        self.update(dom.viewport(), |node| dom.bounding_rect(node))
    }
}
