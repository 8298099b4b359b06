#![forbid(unsafe_code)]

//! Compound CSS selectors.
//!
//! Only the subset page behaviors use: an optional tag name, an optional
//! `#id`, any number of `.class` parts, and `[attr]` / `[attr="value"]`
//! tests, all applying to the same element. Combinators (descendant, child)
//! are not supported; behaviors express containment through
//! [`Dom::query_all_within`](crate::dom::Dom::query_all_within) instead.
//!
//! # Examples
//!
//! ```
//! use pagefx_core::Selector;
//!
//! let sel: Selector = "button.operations__tab".parse().unwrap();
//! assert_eq!(sel.tag(), Some("button"));
//! assert_eq!(sel.to_string(), "button.operations__tab");
//!
//! let lazy: Selector = "img[data-src]".parse().unwrap();
//! assert_eq!(lazy.to_string(), "img[data-src]");
//! ```

use core::fmt;
use core::str::FromStr;

use crate::dom::Dom;
use crate::error::PageError;
use crate::node::NodeId;

/// An attribute test inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    /// `None` tests for presence only.
    pub value: Option<String>,
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrMatch>,
}

impl Selector {
    /// Selector matching elements that carry `class`.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::default()
        }
    }

    /// Selector matching elements named `tag`.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Selector matching the element with `id`.
    pub fn id_of(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Add a class requirement.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an `[name="value"]` requirement.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(AttrMatch {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    /// Add an `[name]` presence requirement.
    #[must_use]
    pub fn with_attribute_present(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttrMatch {
            name: name.into(),
            value: None,
        });
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attributes(&self) -> &[AttrMatch] {
        &self.attributes
    }

    /// Whether `node` satisfies every part of the selector.
    pub fn matches<D: Dom + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            match dom.tag_name(node) {
                Some(actual) if actual.eq_ignore_ascii_case(tag) => {}
                _ => return false,
            }
        }
        if let Some(id) = &self.id
            && dom.attribute(node, "id").as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| dom.has_class(node, class)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (dom.attribute(node, &attr.name), &attr.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => &actual == expected,
                (None, _) => false,
            }
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident<'a>(input: &'a str, whole: &str) -> Result<(&'a str, &'a str), PageError> {
    let end = input
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map_or(input.len(), |(i, _)| i);
    if end == 0 {
        return Err(PageError::InvalidSelector(whole.to_owned()));
    }
    Ok(input.split_at(end))
}

impl FromStr for Selector {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let whole = s.trim();
        let invalid = || PageError::InvalidSelector(whole.to_owned());
        if whole.is_empty() {
            return Err(invalid());
        }

        let mut sel = Selector::default();
        let mut rest = whole;

        if rest.starts_with(is_ident_char) {
            let (tag, tail) = take_ident(rest, whole)?;
            sel.tag = Some(tag.to_ascii_lowercase());
            rest = tail;
        }

        while let Some(c) = rest.chars().next() {
            match c {
                '#' => {
                    if sel.id.is_some() {
                        return Err(invalid());
                    }
                    let (id, tail) = take_ident(&rest[1..], whole)?;
                    sel.id = Some(id.to_owned());
                    rest = tail;
                }
                '.' => {
                    let (class, tail) = take_ident(&rest[1..], whole)?;
                    sel.classes.push(class.to_owned());
                    rest = tail;
                }
                '[' => {
                    let close = rest.find(']').ok_or_else(invalid)?;
                    let body = &rest[1..close];
                    let attr = match body.split_once('=') {
                        Some((name, value)) => AttrMatch {
                            name: name.trim().to_owned(),
                            value: Some(value.trim().trim_matches(['"', '\'']).to_owned()),
                        },
                        None => AttrMatch {
                            name: body.trim().to_owned(),
                            value: None,
                        },
                    };
                    if attr.name.is_empty() || !attr.name.chars().all(is_ident_char) {
                        return Err(invalid());
                    }
                    sel.attributes.push(attr);
                    rest = &rest[close + 1..];
                }
                _ => return Err(invalid()),
            }
        }

        Ok(sel)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attr in &self.attributes {
            match &attr.value {
                Some(value) => write!(f, "[{}=\"{}\"]", attr.name, value)?,
                None => write!(f, "[{}]", attr.name)?,
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Selector {
    type Error = PageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}
