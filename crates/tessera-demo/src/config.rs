//! Demo configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use tessera_widgets::ThemeMode;

/// Default log file; the terminal itself is taken by the UI.
pub const DEFAULT_LOG_FILE: &str = "/tmp/tessera-demo.log";

/// Default tracing filter directives.
pub const DEFAULT_LOG_FILTER: &str = "tessera=debug";

/// Theme selection on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    #[default]
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Where tracing output is written.
    pub log_file: PathBuf,

    /// Tracing filter directives.
    pub log_filter: String,

    /// JSON dataset for the users table; built-in sample when unset.
    pub data_path: Option<PathBuf>,

    /// Palette for fields and table.
    pub theme: ThemeMode,

    /// Start the users table in its loading state.
    pub loading: bool,

    /// Show checkboxes in the users table.
    pub selectable: bool,

    /// Terminal event poll interval; also drives the loading spinner.
    pub tick_rate: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            data_path: None,
            theme: ThemeMode::Light,
            loading: false,
            selectable: true,
            tick_rate: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.log_file, PathBuf::from("/tmp/tessera-demo.log"));
        assert_eq!(config.log_filter, "tessera=debug");
        assert!(config.data_path.is_none());
        assert!(config.selectable);
        assert!(!config.loading);
        assert_eq!(config.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn test_theme_arg_maps_to_mode() {
        assert_eq!(ThemeMode::from(ThemeArg::Dark), ThemeMode::Dark);
        assert_eq!(ThemeMode::from(ThemeArg::default()), ThemeMode::Light);
    }
}
