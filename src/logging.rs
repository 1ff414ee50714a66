//! Logger bootstrap for hosts and test runs.
//!
//! The simulation itself only talks to the `log` facade. Hosts that want to
//! see gravity flips, deaths and hazard activity call [`init`] once at start
//! up; `RUST_LOG` overrides the filter chosen here.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset: dependencies at `warn`, this crate
/// at `debug` when `verbose` and `info` otherwise.
///
/// # Examples
/// ```
/// assert_eq!(flipside::logging::default_filter(true), "warn,flipside=debug");
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!(
        "warn,{}={}",
        env!("CARGO_CRATE_NAME"),
        level.as_str().to_ascii_lowercase()
    )
}

/// Installs `env_logger` as the global logger, without timestamps.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // Only fails when a logger is already installed; tests call this freely.
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::quiet(false, "warn,flipside=info")]
    #[case::verbose(true, "warn,flipside=debug")]
    fn filter_scopes_level_to_this_crate(#[case] verbose: bool, #[case] expected: &str) {
        assert_eq!(default_filter(verbose), expected);
    }

    #[test]
    fn init_is_repeatable() {
        init(false);
        init(true);
        log::info!("logger initialised twice");
    }
}
