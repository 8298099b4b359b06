#![forbid(unsafe_code)]

//! Viewport-space rectangles and CSS-style root margins.
//!
//! Coordinates are CSS pixels relative to the viewport origin, matching what
//! `getBoundingClientRect()` reports.

use core::fmt;
use core::str::FromStr;

use crate::error::PageError;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle. Negative extents are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Overlap of two rectangles.
    ///
    /// Returns `None` when they are disjoint. Rectangles that only touch
    /// along an edge intersect with a zero-area result, the same rule the
    /// browser applies for intersection observation.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive margin) or shrink (negative margin) each edge.
    pub fn inset_by(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let right = margin.right.resolve(self.width);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);
        Rect::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// One side of a [`RootMargin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    /// Resolve to pixels against the root extent along the same axis.
    #[inline]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl Default for MarginValue {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for MarginValue {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PageError::InvalidMargin(s.to_owned());
        if let Some(num) = s.strip_suffix("px") {
            num.parse().map(Self::Px).map_err(|_| invalid())
        } else if let Some(num) = s.strip_suffix('%') {
            num.parse().map(Self::Percent).map_err(|_| invalid())
        } else if s == "0" {
            Ok(Self::Px(0.0))
        } else {
            Err(invalid())
        }
    }
}

/// Margin applied to the root (viewport) before intersecting.
///
/// Parsed from CSS shorthand with one to four values, e.g. `"-90px"`,
/// `"200px 0px"`, `"10% 0px 0px 0px"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    /// Zero margin on every side.
    pub const ZERO: Self = Self::uniform_px(0.0);

    /// Same pixel margin on every side.
    pub const fn uniform_px(px: f64) -> Self {
        Self {
            top: MarginValue::Px(px),
            right: MarginValue::Px(px),
            bottom: MarginValue::Px(px),
            left: MarginValue::Px(px),
        }
    }
}

impl FromStr for RootMargin {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<MarginValue>, _>>()?;
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return Err(PageError::InvalidMargin(s.to_owned())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = PageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
