//! CLI configuration via environment variables
//!
//! Clav reads a handful of optional environment variables at startup.
//! Command-line flags take precedence over anything set here.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default to JSON diagnostic output (CLAV_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (CLAV_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (CLAV_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (CLAV_NO_HISTORY=1)
    pub no_history: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("CLAV_DIAGNOSTICS")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            no_color: env::var_os("CLAV_NO_COLOR").is_some() || env::var_os("NO_COLOR").is_some(),
            history_file: env::var_os("CLAV_HISTORY_FILE").map(PathBuf::from),
            no_history: env::var_os("CLAV_NO_HISTORY").is_some(),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. CLAV_HISTORY_FILE if set
    /// 2. ~/.clav/history if home directory exists
    /// 3. None otherwise
    pub fn history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".clav").join("history"))
    }

    /// Color mode for the diagnostic formatter
    pub fn color_mode(&self) -> clav_runtime::diagnostic::formatter::ColorMode {
        use clav_runtime::diagnostic::formatter::ColorMode;
        if self.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clav_runtime::diagnostic::formatter::ColorMode;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &[
        "CLAV_DIAGNOSTICS",
        "CLAV_NO_COLOR",
        "NO_COLOR",
        "CLAV_HISTORY_FILE",
        "CLAV_NO_HISTORY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = Config::from_env();
        assert!(!config.default_json);
        assert!(!config.no_color);
        assert!(config.history_file.is_none());
        assert!(!config.no_history);
        assert_eq!(config.color_mode(), ColorMode::Auto);
    }

    #[test]
    #[serial]
    fn test_config_json_diagnostics() {
        clear_env();
        env::set_var("CLAV_DIAGNOSTICS", "JSON");
        assert!(Config::from_env().default_json);

        env::set_var("CLAV_DIAGNOSTICS", "human");
        assert!(!Config::from_env().default_json);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_no_color() {
        clear_env();
        env::set_var("CLAV_NO_COLOR", "1");
        let config = Config::from_env();
        assert!(config.no_color);
        assert_eq!(config.color_mode(), ColorMode::Never);
        env::remove_var("CLAV_NO_COLOR");

        // Also test NO_COLOR (standard)
        env::set_var("NO_COLOR", "1");
        assert!(Config::from_env().no_color);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_custom_history() {
        clear_env();
        env::set_var("CLAV_HISTORY_FILE", "/tmp/custom_history");
        let config = Config::from_env();
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/custom_history"))
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_no_history() {
        clear_env();
        env::set_var("CLAV_NO_HISTORY", "1");
        assert!(Config::from_env().no_history);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_default_history_path_is_under_home() {
        clear_env();
        if let Some(path) = Config::from_env().history_path() {
            assert!(path.ends_with(".clav/history"));
        }
    }
}
