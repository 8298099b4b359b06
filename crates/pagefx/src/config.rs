#![forbid(unsafe_code)]

//! Page configuration.
//!
//! [`PageConfig`] gathers every behavior's configuration. Every field has a
//! default matching the stock landing page markup, so an empty TOML document
//! is a valid configuration:
//!
//! ```
//! use pagefx::config::PageConfig;
//!
//! let config = PageConfig::from_toml_str(r#"
//!     strict = true
//!
//!     [slider]
//!     keys = { prev = "ArrowUp", next = "ArrowDown" }
//!
//!     [reveal]
//!     threshold = 0.3
//! "#).unwrap();
//! assert!(config.strict);
//! assert_eq!(config.reveal.threshold, 0.3);
//! assert_eq!(config.modal.hidden_class, "hidden");
//! ```
//!
//! # Failure Modes
//!
//! - Unreadable file: [`ConfigError::Read`].
//! - Malformed TOML, unknown keys, bad selectors or root margins:
//!   [`ConfigError::Parse`].
//! - Values that parse but make no sense (thresholds outside `[0, 1]`,
//!   empty class names or names containing whitespace, identical slider
//!   keys): [`ConfigError::Invalid`].

use std::path::{Path, PathBuf};

use pagefx_widgets::{
    LazyImageConfig, ModalConfig, NavFadeConfig, RevealConfig, ScrollConfig, SliderConfig,
    StickyNavConfig, TabsConfig,
};
use serde::{Deserialize, Serialize};

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse page config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid page config: {0}")]
    Invalid(String),
}

/// Configuration for every behavior on a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Fail mounting when a behavior cannot be mounted instead of skipping
    /// it with a warning.
    pub strict: bool,
    pub modal: ModalConfig,
    pub scroll: ScrollConfig,
    pub tabs: TabsConfig,
    pub nav_fade: NavFadeConfig,
    pub sticky_nav: StickyNavConfig,
    pub reveal: RevealConfig,
    pub lazy_image: LazyImageConfig,
    pub slider: SliderConfig,
}

impl PageConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), strict = config.strict, "page config loaded");
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("reveal.threshold", self.reveal.threshold)?;
        unit_interval("lazy_image.threshold", self.lazy_image.threshold)?;
        unit_interval("nav_fade.faded_opacity", self.nav_fade.faded_opacity)?;

        let names = [
            ("modal.hidden_class", &self.modal.hidden_class),
            ("scroll.nav_link_class", &self.scroll.nav_link_class),
            ("tabs.tab_class", &self.tabs.tab_class),
            ("tabs.content_class", &self.tabs.content_class),
            ("nav_fade.link_class", &self.nav_fade.link_class),
            ("sticky_nav.sticky_class", &self.sticky_nav.sticky_class),
            ("reveal.hidden_class", &self.reveal.hidden_class),
            ("lazy_image.source_attribute", &self.lazy_image.source_attribute),
            ("lazy_image.lazy_class", &self.lazy_image.lazy_class),
            ("slider.dot_class", &self.slider.dot_class),
            ("slider.dot_active_class", &self.slider.dot_active_class),
        ];
        for (field, value) in names {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
            if value.contains(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a single name, got {value:?}"
                )));
            }
        }

        if self.slider.keys.prev == self.slider.keys.next {
            return Err(ConfigError::Invalid(format!(
                "slider.keys.prev and slider.keys.next are both {:?}",
                self.slider.keys.prev
            )));
        }
        Ok(())
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefx_core::{KeyCode, RootMargin, Selector};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_document_is_the_default_page() {
        let config = PageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.slider.keys.prev, KeyCode::ArrowLeft);
        assert_eq!(config.lazy_image.root_margin, RootMargin::uniform_px(200.0));
    }

    #[test]
    fn selectors_and_margins_parse_from_strings() {
        let config = PageConfig::from_toml_str(
            r#"
            [modal]
            modal = "div#dialog.modal"

            [lazy_image]
            root_margin = "100px 0px"
            "#,
        )
        .unwrap();
        assert_eq!(config.modal.modal, "div#dialog.modal".parse::<Selector>().unwrap());
        assert_eq!(config.lazy_image.root_margin, "100px 0px".parse().unwrap());
    }

    #[test]
    fn malformed_selector_is_a_parse_error() {
        let err = PageConfig::from_toml_str("[tabs]\ncontainer = \"div > p\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let err = PageConfig::from_toml_str("sliders = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn nested_unknown_key_is_rejected() {
        let err = PageConfig::from_toml_str("[reveal]\ntreshold = 0.9").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");

        let err = PageConfig::from_toml_str("[slider.keys]\nprevious = \"ArrowUp\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn threshold_out_of_range_is_invalid() {
        let err = PageConfig::from_toml_str("[reveal]\nthreshold = 1.5").unwrap_err();
        assert!(err.to_string().contains("reveal.threshold"), "{err}");
    }

    #[test]
    fn empty_class_is_invalid() {
        let err = PageConfig::from_toml_str("[modal]\nhidden_class = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn class_with_whitespace_is_invalid() {
        let err = PageConfig::from_toml_str("[slider]\ndot_class = \"dots dot\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
        assert!(err.to_string().contains("slider.dot_class"), "{err}");

        let err = PageConfig::from_toml_str("[modal]\nhidden_class = \" \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn identical_slider_keys_are_invalid() {
        let err = PageConfig::from_toml_str(
            "[slider]\nkeys = { prev = \"ArrowRight\", next = \"ArrowRight\" }",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn serialized_config_loads_back() {
        let mut config = PageConfig::default();
        config.strict = true;
        config.nav_fade.faded_opacity = 0.25;
        let text = config.to_toml_string().unwrap();
        assert_eq!(PageConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_reads_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sticky_nav]\nsticky_class = \"pinned\"").unwrap();
        let config = PageConfig::load(file.path()).unwrap();
        assert_eq!(config.sticky_nav.sticky_class, "pinned");

        let missing = PageConfig::load(file.path().with_extension("absent")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
