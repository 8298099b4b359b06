#![forbid(unsafe_code)]

//! Carousel of slides with indicator dots.
//!
//! [`Slider`] is a pure index state machine over `0..slide_count`. The two
//! side effects of a transition are delegated to injected collaborators:
//!
//! - a [`ViewportPositioner`] shifts each slide horizontally by
//!   `(i - current)` panel widths,
//! - an [`IndicatorRenderer`] owns one indicator per slide and carries the
//!   active marker.
//!
//! [`DomPositioner`] and [`DomIndicators`] implement both against a
//! [`Dom`](pagefx_core::Dom); [`SliderBehavior`] wires buttons, keys and
//! indicator clicks to the state machine.
//!
//! # Invariants
//!
//! 1. `0 <= current_slide() < slide_count()` in every reachable state.
//! 2. After every successful transition exactly one indicator is active,
//!    the one tagged `current_slide()`.
//! 3. A failed transition changes nothing: no index update, no positioning,
//!    no highlighting.
//!
//! # Failure Modes
//!
//! - Constructing with no slides fails with
//!   [`SliderError::InvalidArgument`].
//! - [`Slider::go_to`] with an index `>= slide_count()` fails with
//!   [`SliderError::InvalidArgument`].
//! - If the indicator renderer has lost the indicator for the target index,
//!   the transition fails with [`SliderError::PreconditionFailed`].
//!
//! # Example
//!
//! ```
//! use pagefx_widgets::slider::{IndicatorRenderer, Slider, ViewportPositioner};
//! use pagefx_core::NodeId;
//!
//! #[derive(Default)]
//! struct Offsets(Vec<isize>);
//! impl ViewportPositioner for Offsets {
//!     type Slide = usize;
//!     fn translate(&mut self, slide: &usize, offset: isize) {
//!         self.0[*slide] = offset;
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Dots(Vec<bool>);
//! impl IndicatorRenderer for Dots {
//!     type Indicator = usize;
//!     fn append(&mut self, tag: usize) -> usize {
//!         self.0.push(false);
//!         tag
//!     }
//!     fn find_by_tag(&self, tag: usize) -> Option<usize> {
//!         (tag < self.0.len()).then_some(tag)
//!     }
//!     fn indicators(&self) -> Vec<usize> {
//!         (0..self.0.len()).collect()
//!     }
//!     fn set_active(&mut self, dot: &usize, active: bool) {
//!         self.0[*dot] = active;
//!     }
//!     fn tag_at(&self, _target: NodeId) -> Option<usize> {
//!         None
//!     }
//! }
//!
//! let mut slider = Slider::new(vec![0, 1, 2], Offsets(vec![0; 3]), Dots::default()).unwrap();
//! slider.go_to(1).unwrap();
//! assert_eq!(slider.positioner().0, vec![-1, 0, 1]);
//! slider.prev().unwrap();
//! slider.prev().unwrap();
//! assert_eq!(slider.current_slide(), 2);
//! ```

mod behavior;
mod dom;

pub use behavior::{SliderBehavior, SliderConfig};
pub use dom::{DomIndicators, DomPositioner};

use pagefx_core::{KeyCode, KeyEvent, NodeId, SliderError};

/// Applies the horizontal offset transform to one slide.
pub trait ViewportPositioner {
    type Slide;

    /// Shift `slide` by `offset` panel widths (`offset * 100%`).
    fn translate(&mut self, slide: &Self::Slide, offset: isize);
}

/// Owns the indicator ("dot") elements of a slider.
pub trait IndicatorRenderer {
    type Indicator;

    /// Create and append the indicator for slide `tag`.
    fn append(&mut self, tag: usize) -> Self::Indicator;

    /// The indicator tagged `tag`, if it exists.
    fn find_by_tag(&self, tag: usize) -> Option<Self::Indicator>;

    /// Every indicator, in order.
    fn indicators(&self) -> Vec<Self::Indicator>;

    fn set_active(&mut self, indicator: &Self::Indicator, active: bool);

    /// Tag of the indicator that is exactly `target`, if any.
    ///
    /// Clicks on the container itself or on non-indicator children resolve
    /// to `None`.
    fn tag_at(&self, target: NodeId) -> Option<usize>;
}

/// Key pair that drives a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SliderKeys {
    pub prev: KeyCode,
    pub next: KeyCode,
}

impl Default for SliderKeys {
    fn default() -> Self {
        Self {
            prev: KeyCode::ArrowLeft,
            next: KeyCode::ArrowRight,
        }
    }
}

/// Slide index state machine.
#[derive(Debug)]
pub struct Slider<P: ViewportPositioner, R: IndicatorRenderer> {
    slides: Vec<P::Slide>,
    positioner: P,
    indicators: R,
    keys: SliderKeys,
    current: usize,
}

impl<P: ViewportPositioner, R: IndicatorRenderer> Slider<P, R> {
    /// Build one indicator per slide, then show slide 0.
    pub fn new(
        slides: Vec<P::Slide>,
        positioner: P,
        mut indicators: R,
    ) -> Result<Self, SliderError> {
        if slides.is_empty() {
            return Err(SliderError::InvalidArgument(
                "slider needs at least one slide".into(),
            ));
        }
        for tag in 0..slides.len() {
            indicators.append(tag);
        }
        let mut slider = Self {
            slides,
            positioner,
            indicators,
            keys: SliderKeys::default(),
            current: 0,
        };
        slider.set_current_slide(0)?;
        Ok(slider)
    }

    /// Replace the key pair used by [`handle_key`](Self::handle_key).
    #[must_use]
    pub fn with_keys(mut self, keys: SliderKeys) -> Self {
        self.keys = keys;
        self
    }

    #[inline]
    pub fn current_slide(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn keys(&self) -> SliderKeys {
        self.keys
    }

    pub fn positioner(&self) -> &P {
        &self.positioner
    }

    pub fn indicators(&self) -> &R {
        &self.indicators
    }

    /// Mutable access to the indicator renderer.
    ///
    /// Removing indicators through this makes later transitions to those
    /// slides fail with [`SliderError::PreconditionFailed`].
    pub fn indicators_mut(&mut self) -> &mut R {
        &mut self.indicators
    }

    /// Commit `index`, reposition every slide and move the active marker.
    pub fn set_current_slide(&mut self, index: usize) -> Result<(), SliderError> {
        if index >= self.slides.len() {
            return Err(SliderError::index_out_of_range(index, self.slides.len()));
        }
        let active = self.indicators.find_by_tag(index).ok_or_else(|| {
            SliderError::PreconditionFailed(format!("no indicator tagged {index}"))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.current, to = index, "slide change");

        self.current = index;
        self.reposition();
        for indicator in self.indicators.indicators() {
            self.indicators.set_active(&indicator, false);
        }
        self.indicators.set_active(&active, true);
        Ok(())
    }

    /// Advance by one, wrapping from the last slide to the first.
    pub fn next(&mut self) -> Result<(), SliderError> {
        let index = if self.current + 1 >= self.slides.len() {
            0
        } else {
            self.current + 1
        };
        self.set_current_slide(index)
    }

    /// Go back by one, wrapping from the first slide to the last.
    pub fn prev(&mut self) -> Result<(), SliderError> {
        let index = if self.current == 0 {
            self.slides.len() - 1
        } else {
            self.current - 1
        };
        self.set_current_slide(index)
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), SliderError> {
        self.set_current_slide(index)
    }

    /// Jump to the slide of the indicator at `target`.
    ///
    /// Returns the tag that was activated, or `None` if `target` is not an
    /// indicator.
    pub fn activate_indicator(&mut self, target: NodeId) -> Result<Option<usize>, SliderError> {
        match self.indicators.tag_at(target) {
            Some(tag) => self.go_to(tag).map(|()| Some(tag)),
            None => Ok(None),
        }
    }

    /// Step on the configured prev/next key presses.
    ///
    /// Returns whether the key was one of the pair.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<bool, SliderError> {
        if key.is_press(self.keys.prev) {
            self.prev()?;
            Ok(true)
        } else if key.is_press(self.keys.next) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn reposition(&mut self) {
        let current = self.current as isize;
        for (i, slide) in self.slides.iter().enumerate() {
            self.positioner.translate(slide, i as isize - current);
        }
    }
}
