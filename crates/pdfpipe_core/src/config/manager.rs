//! Settings file handling: load with defaults, write atomically, and update
//! one table at a time without disturbing the rest of the file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use super::settings::{ConfigSection, Settings};

const FILE_HEADER: &str = "# pdfpipe settings\n# Section comments survive `pdfpipe settings set-engine`.\n\n";

/// Errors raised while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings file could not be edited: {0}")]
    Edit(#[from] toml_edit::TomlError),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings file path and the settings loaded from it.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Manager for `config_path` holding default settings. Nothing is read
    /// until `load` or `load_or_create`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// In-memory settings; persist with `save` or `update_section`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Folder the run logs go to.
    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Read the settings file, which must exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }
        self.settings = toml::from_str(&fs::read_to_string(&self.config_path)?)?;
        Ok(())
    }

    /// Read the settings file, writing a default one if it is missing.
    ///
    /// A file with unknown tables or missing keys is rewritten in full so
    /// it always shows every setting. Returns true if the file was written.
    pub fn load_or_create(&mut self) -> ConfigResult<bool> {
        if !self.config_path.exists() {
            self.settings = Settings::default();
            self.save()?;
            tracing::info!("Created default settings at {}", self.config_path.display());
            return Ok(true);
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;

        let on_disk: DocumentMut = content.parse()?;
        if self.needs_rewrite(&on_disk)? {
            tracing::debug!("Rewriting {} with defaults", self.config_path.display());
            self.save()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// True if `on_disk` has tables we do not know or lacks keys we write.
    fn needs_rewrite(&self, on_disk: &DocumentMut) -> ConfigResult<bool> {
        let unknown_table = on_disk
            .iter()
            .any(|(key, _)| ConfigSection::from_table_name(key).is_none());
        if unknown_table {
            return Ok(true);
        }

        for section in ConfigSection::ALL {
            let Some(table) = on_disk.get(section.table_name()).and_then(Item::as_table) else {
                return Ok(true);
            };
            let expected = self.section_table(section)?;
            if expected.iter().any(|(key, _)| !table.contains_key(key)) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Current value of one section as a TOML table.
    fn section_table(&self, section: ConfigSection) -> ConfigResult<Table> {
        let text = match section {
            ConfigSection::Paths => toml::to_string_pretty(&self.settings.paths)?,
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            ConfigSection::Engine => toml::to_string_pretty(&self.settings.engine)?,
        };
        let doc: DocumentMut = text.parse()?;
        Ok(doc.as_table().clone())
    }

    /// Write every section, with the header comments.
    pub fn save(&self) -> ConfigResult<()> {
        let mut doc = DocumentMut::new();

        for (index, section) in ConfigSection::ALL.into_iter().enumerate() {
            let lead = if index == 0 { FILE_HEADER } else { "\n" };
            let mut table = self.section_table(section)?;
            table
                .decor_mut()
                .set_prefix(format!("{}{}\n", lead, section.comment()));
            table.set_implicit(false);
            doc.insert(section.table_name(), Item::Table(table));
        }

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    /// Rewrite one section from memory, leaving the others as they are on
    /// disk (comments included).
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let mut doc: DocumentMut = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?.parse()?
        } else {
            DocumentMut::new()
        };

        let table = self.section_table(section)?;
        match doc.get_mut(section.table_name()).and_then(Item::as_table_mut) {
            Some(existing) => {
                existing.clear();
                for (key, value) in table.iter() {
                    existing.insert(key, value.clone());
                }
            }
            None => {
                doc.insert(section.table_name(), Item::Table(table));
            }
        }

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    /// Write to `<name>.toml.tmp`, sync, then rename over the real file.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.config_path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.config_path)
    }
}
