//! Pipeline documents: the per-run description of which stages to run.
//!
//! A document can be YAML, TOML or JSON, and may use either English or
//! Portuguese key names. Both spellings load into the same
//! [`PipelineConfig`](crate::models::PipelineConfig).

mod errors;
mod loader;
mod scheme;

pub use errors::{DocumentError, DocumentResult};
pub use loader::{load_document, parse_document, DocumentFormat, LoadedDocument};
pub use scheme::{detect_scheme, normalize_to_english, Detection, KeyScheme};
