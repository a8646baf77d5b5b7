//! Environment configuration for the demo binary.

use std::path::PathBuf;

/// Snapshot file location
pub const SNAPSHOT_PATH_VAR: &str = "TODO_SNAPSHOT_PATH";

/// Set to `1` or `true` to print Prometheus metrics on exit
pub const PRINT_METRICS_VAR: &str = "TODO_PRINT_METRICS";

/// Settings read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoConfig {
    /// Where to load and save the list; `None` keeps it in memory only
    pub snapshot_path: Option<PathBuf>,
    /// Install a metrics recorder and print it before exiting
    pub print_metrics: bool,
}

impl DemoConfig {
    /// Read configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (name, value) in vars {
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            match name.as_ref() {
                SNAPSHOT_PATH_VAR => config.snapshot_path = Some(PathBuf::from(value)),
                PRINT_METRICS_VAR => {
                    config.print_metrics = matches!(value.as_str(), "1" | "true" | "TRUE");
                },
                _ => {},
            }
        }

        config
    }
}
