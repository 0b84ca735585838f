//! The settings file schema: one struct per TOML table.
//!
//! Every field has a serde default so an older or hand-trimmed file still
//! loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel};

/// Everything stored in the settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// `[paths]`
    #[serde(default)]
    pub paths: PathSettings,

    /// `[logging]`
    #[serde(default)]
    pub logging: LoggingSettings,

    /// `[engine]`
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Where run logs are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for run logs.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    "logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
        }
    }
}

/// Run-log behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level written to run logs.
    #[serde(default)]
    pub level: LogLevel,

    /// Keep Ghostscript output out of the console.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of output lines shown when Ghostscript fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix log lines with the time of day.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Log every Ghostscript argument on its own line.
    #[serde(default)]
    pub show_command_pretty: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
            show_command_pretty: false,
        }
    }
}

impl LoggingSettings {
    /// Build the run-log configuration for these settings.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            compact: self.compact,
            error_tail: self.error_tail as usize,
            show_timestamps: self.show_timestamps,
            show_command_pretty: self.show_command_pretty,
        }
    }
}

/// Engine defaults applied when a pipeline document leaves them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Fallback Ghostscript executable path (empty = none).
    #[serde(default)]
    pub ghostscript: String,
}

impl EngineSettings {
    /// The fallback engine path, if one is configured.
    pub fn ghostscript_path(&self) -> Option<PathBuf> {
        let trimmed = self.ghostscript.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

/// One table of the settings file, for `ConfigManager::update_section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Logging,
    Engine,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Paths,
        ConfigSection::Logging,
        ConfigSection::Engine,
    ];

    /// Section stored under `name`, if any.
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.table_name() == name)
    }

    /// TOML table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Engine => "engine",
        }
    }

    /// Comment written above the section header.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "# Log output location",
            ConfigSection::Logging => "# Run log behaviour",
            ConfigSection::Engine => "# Ghostscript defaults (used when a pipeline document omits them)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("logs_folder"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[paths]\nlogs_folder = \"custom_logs\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.paths.logs_folder, "custom_logs");
        assert!(parsed.logging.compact);
        assert_eq!(parsed.logging.error_tail, 20);
        assert_eq!(parsed.engine.ghostscript_path(), None);
    }

    #[test]
    fn logging_settings_map_to_log_config() {
        let logging = LoggingSettings {
            level: LogLevel::Debug,
            compact: false,
            error_tail: 7,
            show_timestamps: false,
            show_command_pretty: true,
        };
        let config = logging.to_log_config();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.error_tail, 7);
        assert!(config.show_command_pretty);
    }
}
