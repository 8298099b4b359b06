#![forbid(unsafe_code)]

//! Error types shared by every pagefx crate.

use thiserror::Error;

/// Recoverable slider failures.
///
/// Neither variant leaves the slider in a changed state: a rejected
/// transition is reported before anything is repositioned or highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliderError {
    /// Empty slide collection at construction, or an out-of-range index.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The indicator set no longer matches the slide set.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
}

impl SliderError {
    /// `InvalidArgument` for an index outside `0..len`.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::InvalidArgument(format!("slide index {index} out of range 0..{len}"))
    }
}

/// Errors from mounting behaviors onto a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// A required element was not found.
    #[error("no element matches `{selector}`")]
    MissingElement { selector: String },
    /// A selector string could not be parsed.
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
    /// A root margin string could not be parsed.
    #[error("invalid root margin `{0}`")]
    InvalidMargin(String),
    /// The slider could not be built or driven.
    #[error(transparent)]
    Slider(#[from] SliderError),
}

impl PageError {
    /// Shorthand for [`PageError::MissingElement`].
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}
