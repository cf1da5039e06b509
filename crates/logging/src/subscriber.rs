//! crates/logging/src/subscriber.rs
//! Global subscriber installation.
//!
//! ```rust,ignore
//! use logging::{LogConfig, init_tracing};
//!
//! init_tracing(&LogConfig::from_verbosity(2))?;
//! logging::trace_handle!(handle = "0", "handle allocated");
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::LogConfig;

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    /// The configured directives could not be parsed.
    #[error("invalid log filter directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs a formatting subscriber on stderr as the global default.
///
/// `RUST_LOG` takes precedence over [`LogConfig::directives`] when set and
/// valid. Calling this a second time returns
/// [`InitError::AlreadyInitialized`].
pub fn init_tracing(config: &LogConfig) -> Result<(), InitError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), config)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Builds the filter from an environment override or the configuration.
///
/// An unparsable override falls back to the configuration.
pub fn build_filter(env: Option<&str>, config: &LogConfig) -> Result<EnvFilter, InitError> {
    if let Some(filter) = env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(config.directives())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::subsystem::Subsystem;

    #[test]
    fn config_directives_build_a_filter() {
        let config = LogConfig::new().with_subsystem(Subsystem::Handle, LogLevel::Debug);
        let filter = build_filter(None, &config).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("sftp::handle=debug"), "{rendered}");
        assert!(rendered.contains("warn"), "{rendered}");
    }

    #[test]
    fn environment_override_wins() {
        let filter = build_filter(Some("sftp::conn=trace"), &LogConfig::new()).unwrap();
        assert!(filter.to_string().contains("sftp::conn=trace"));
    }

    #[test]
    fn blank_environment_is_ignored() {
        let filter = build_filter(Some("  "), &LogConfig::from_verbosity(1)).unwrap();
        assert!(filter.to_string().contains("info"));
    }

    #[test]
    fn second_install_is_an_error() {
        let config = LogConfig::new().with_ansi(false);
        init_tracing(&config).unwrap();
        assert!(matches!(
            init_tracing(&config),
            Err(InitError::AlreadyInitialized(_))
        ));
        crate::trace_packet!(installed = true, "subscriber installed");
    }
}
