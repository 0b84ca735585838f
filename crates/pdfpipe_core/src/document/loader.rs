//! Pipeline document parsing and validation.
//!
//! Flow: text → `serde_json::Value` (via the YAML, TOML or JSON parser) →
//! key-scheme normalization → strict English `RawDocument` → validated
//! [`PipelineConfig`].

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{
    ArchiveStage, CompressStage, CompressionLevel, MergeInputItem, MergeStage, PageRange,
    PipelineConfig, DEFAULT_ARCHIVE_PROFILE,
};

use super::errors::{DocumentError, DocumentResult};
use super::scheme::{detect_scheme, normalize_to_english, Detection, KeyScheme};

/// Serialization format of a pipeline document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> DocumentResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(DocumentError::UnsupportedFormat(ext)),
        }
    }
}

/// A loaded document plus the key scheme it was written in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub config: PipelineConfig,
    pub scheme: KeyScheme,
}

/// Load and validate a pipeline document from disk.
pub fn load_document(path: &Path) -> DocumentResult<LoadedDocument> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    tracing::debug!("Loading pipeline document {} as {:?}", path.display(), format);
    parse_document(&content, format)
}

/// Parse and validate a pipeline document from text.
pub fn parse_document(content: &str, format: DocumentFormat) -> DocumentResult<LoadedDocument> {
    let tree: Value = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Toml => toml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };

    let Value::Object(mut root) = tree else {
        return Err(DocumentError::NotAMapping);
    };

    let scheme = match detect_scheme(&root) {
        Detection::Scheme(scheme) => scheme,
        Detection::Mixed {
            english,
            portuguese,
        } => {
            return Err(DocumentError::MixedKeySchemes {
                english,
                portuguese,
            })
        }
    };

    if scheme == KeyScheme::Portuguese {
        normalize_to_english(&mut root);
    }

    let raw: RawDocument = serde_json::from_value(Value::Object(root))
        .map_err(|e| DocumentError::Schema(e.to_string()))?;

    Ok(LoadedDocument {
        config: raw.into_config()?,
        scheme,
    })
}

// Strict English schema. Unknown keys are errors so a misspelled or
// wrong-language key is reported instead of silently ignored.

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    merge: RawMerge,
    #[serde(default)]
    compress: RawStage,
    #[serde(default)]
    pdfa: RawArchive,
    #[serde(default)]
    settings: RawSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaths {
    ghostscript: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMerge {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    files: Vec<Value>,
    output: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStage {
    #[serde(default)]
    enabled: bool,
    output: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawArchive {
    #[serde(default)]
    enabled: bool,
    output: Option<String>,
    profile: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    compression: Option<CompressionLevel>,
}

impl RawDocument {
    fn into_config(self) -> DocumentResult<PipelineConfig> {
        let inputs = self
            .merge
            .files
            .iter()
            .map(parse_merge_item)
            .collect::<DocumentResult<Vec<_>>>()?;

        Ok(PipelineConfig {
            engine_path: non_empty_path(self.paths.ghostscript),
            merge: MergeStage {
                enabled: self.merge.enabled,
                inputs,
                output: non_empty_path(self.merge.output),
            },
            compress: CompressStage {
                enabled: self.compress.enabled,
                output: non_empty_path(self.compress.output),
            },
            archive: ArchiveStage {
                enabled: self.pdfa.enabled,
                output: non_empty_path(self.pdfa.output),
                profile: self
                    .pdfa
                    .profile
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ARCHIVE_PROFILE.to_string()),
            },
            compression_level: self.settings.compression.unwrap_or_default(),
        })
    }
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Interpret one entry of `merge.files`.
///
/// A string is a whole file; an object with a `file` (or `path`) string is
/// a ranged item, or a whole file when it sets no page bound. Anything else
/// is kept as `Unrecognized` and skipped later.
fn parse_merge_item(value: &Value) -> DocumentResult<MergeInputItem> {
    match value {
        Value::String(path) if !path.trim().is_empty() => {
            Ok(MergeInputItem::Path(PathBuf::from(path)))
        }
        Value::Object(fields) => {
            let path = fields
                .get("file")
                .or_else(|| fields.get("path"))
                .and_then(Value::as_str)
                .filter(|p| !p.trim().is_empty());

            let Some(path) = path else {
                return Ok(MergeInputItem::Unrecognized(value.to_string()));
            };

            let first = page_number(fields, "first_page", path)?;
            let last = page_number(fields, "last_page", path)?;

            if let (Some(first), Some(last)) = (first, last) {
                if first > last {
                    return Err(DocumentError::InvalidPageRange {
                        path: path.to_string(),
                        first: first.get(),
                        last: last.get(),
                    });
                }
            }

            let range = PageRange::new(first, last);
            if range.is_unbounded() {
                return Ok(MergeInputItem::Path(PathBuf::from(path)));
            }
            Ok(MergeInputItem::Ranged {
                path: PathBuf::from(path),
                range,
            })
        }
        other => Ok(MergeInputItem::Unrecognized(other.to_string())),
    }
}

fn page_number(
    fields: &Map<String, Value>,
    field: &str,
    path: &str,
) -> DocumentResult<Option<NonZeroU32>> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(NonZeroU32::new)
        .map(Some)
        .ok_or_else(|| DocumentError::InvalidPage {
            path: path.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}
