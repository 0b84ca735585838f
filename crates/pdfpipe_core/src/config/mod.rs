//! Application settings for pdfpipe.
//!
//! These are the tool's own settings (log folder, log behaviour, fallback
//! Ghostscript path), kept in a TOML file with one table per
//! [`ConfigSection`]. Per-run pipeline documents live in
//! [`crate::document`].
//!
//! # Example
//!
//! ```no_run
//! use pdfpipe_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/pdfpipe.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().engine.ghostscript = "/usr/bin/gs".to_string();
//! config.update_section(ConfigSection::Engine).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, EngineSettings, LoggingSettings, PathSettings, Settings};
