#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! Behaviors only emit `tracing` events; hosts decide where they go. This
//! module installs a global registry with an [`EnvFilter`] and either a
//! human-readable or (feature `tracing-json`) JSON fmt layer.
//!
//! `RUST_LOG` wins over the filter passed to [`init_tracing`].

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("global tracing subscriber already installed")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber.
///
/// `default_filter` is used when `RUST_LOG` is unset or unparsable, e.g.
/// `"pagefx=info"`. Fails if a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| TelemetryError::Filter {
            directive: default_filter.to_owned(),
            source,
        })?,
    };

    #[cfg(feature = "tracing-json")]
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    #[cfg(not(feature = "tracing-json"))]
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    tracing::debug!(filter = default_filter, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        // Only the first install in this process can succeed.
        let first = init_tracing("pagefx=debug");
        let second = init_tracing("pagefx=debug");
        assert!(first.is_ok() || matches!(first, Err(TelemetryError::Init(_))));
        assert!(matches!(second, Err(TelemetryError::Init(_))));
    }

    #[test]
    fn bad_directive_is_reported() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = init_tracing("pagefx=notalevel").unwrap_err();
        assert!(matches!(err, TelemetryError::Filter { .. }), "{err}");
    }
}
