//! Key-naming schemes and normalization onto English keys.
//!
//! Pipeline documents exist in two spellings of the same schema: English
//! keys (`merge.enabled`, `merge.files`) and Portuguese keys
//! (`juntar.ativado`, `juntar.arquivos`). Detection looks at every key the
//! schema knows about; a document that uses words from both spellings is
//! rejected instead of being half-read.

use serde_json::{Map, Value};

/// Which spelling a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    English,
    Portuguese,
}

/// Top-level section renames, Portuguese → English.
const SECTION_KEYS: &[(&str, &str)] = &[
    ("caminhos", "paths"),
    ("juntar", "merge"),
    ("compactar", "compress"),
    ("parametros", "settings"),
];

/// Keys inside a stage section.
const STAGE_KEYS: &[(&str, &str)] = &[
    ("ativado", "enabled"),
    ("arquivos", "files"),
    ("saida", "output"),
    ("perfil", "profile"),
];

/// Keys inside a structured merge item.
const ITEM_KEYS: &[(&str, &str)] = &[
    ("arquivo", "file"),
    ("pagina_inicial", "first_page"),
    ("pagina_final", "last_page"),
];

/// Keys inside the global parameters section.
const SETTINGS_KEYS: &[(&str, &str)] = &[("compactacao", "compression")];

const STAGE_SECTIONS: &[&str] = &["merge", "compress", "pdfa"];

fn all_tables() -> impl Iterator<Item = &'static (&'static str, &'static str)> {
    SECTION_KEYS
        .iter()
        .chain(STAGE_KEYS)
        .chain(ITEM_KEYS)
        .chain(SETTINGS_KEYS)
}

fn is_portuguese(key: &str) -> bool {
    all_tables().any(|(pt, _)| *pt == key)
}

fn is_english(key: &str) -> bool {
    all_tables().any(|(_, en)| *en == key)
}

/// Outcome of scheme detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Scheme(KeyScheme),
    /// First English and first Portuguese key seen.
    Mixed { english: String, portuguese: String },
}

/// Detect the key scheme of a parsed document.
///
/// Documents with no scheme-specific key at all count as English.
pub fn detect_scheme(root: &Map<String, Value>) -> Detection {
    let mut english: Option<String> = None;
    let mut portuguese: Option<String> = None;

    visit_keys(root, 0, &mut |key| {
        if english.is_none() && is_english(key) {
            english = Some(key.to_string());
        }
        if portuguese.is_none() && is_portuguese(key) {
            portuguese = Some(key.to_string());
        }
    });

    match (english, portuguese) {
        (Some(english), Some(portuguese)) => Detection::Mixed {
            english,
            portuguese,
        },
        (None, Some(_)) => Detection::Scheme(KeyScheme::Portuguese),
        _ => Detection::Scheme(KeyScheme::English),
    }
}

/// Walk object keys down to merge items (section → stage → files → item).
fn visit_keys(map: &Map<String, Value>, depth: usize, visit: &mut dyn FnMut(&str)) {
    for (key, value) in map {
        visit(key);
        if depth >= 3 {
            continue;
        }
        match value {
            Value::Object(inner) => visit_keys(inner, depth + 1, visit),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(inner) = item {
                        visit_keys(inner, depth + 1, visit);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Rewrite a Portuguese document to English keys in place.
///
/// Unknown keys are left untouched so the strict schema can reject them.
pub fn normalize_to_english(root: &mut Map<String, Value>) {
    rename_keys(root, SECTION_KEYS);

    for section in STAGE_SECTIONS {
        let Some(Value::Object(stage)) = root.get_mut(*section) else {
            continue;
        };
        rename_keys(stage, STAGE_KEYS);

        if let Some(Value::Array(items)) = stage.get_mut("files") {
            for item in items.iter_mut() {
                if let Value::Object(fields) = item {
                    rename_keys(fields, ITEM_KEYS);
                }
            }
        }
    }

    if let Some(Value::Object(settings)) = root.get_mut("settings") {
        rename_keys(settings, SETTINGS_KEYS);
    }
}

fn rename_keys(map: &mut Map<String, Value>, table: &[(&str, &str)]) {
    for (from, to) in table {
        if let Some(value) = map.remove(*from) {
            map.insert((*to).to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn detects_english() {
        let doc = object(json!({"paths": {"ghostscript": "gs"}, "merge": {"enabled": true}}));
        assert_eq!(detect_scheme(&doc), Detection::Scheme(KeyScheme::English));
    }

    #[test]
    fn detects_portuguese_from_nested_keys() {
        let doc = object(json!({"pdfa": {"ativado": true, "saida": "out.pdf"}}));
        assert_eq!(detect_scheme(&doc), Detection::Scheme(KeyScheme::Portuguese));
    }

    #[test]
    fn rejects_mixed_documents() {
        let doc = object(json!({"merge": {"ativado": true}}));
        assert_eq!(
            detect_scheme(&doc),
            Detection::Mixed {
                english: "merge".to_string(),
                portuguese: "ativado".to_string()
            }
        );
    }

    #[test]
    fn normalizes_all_levels() {
        let mut doc = object(json!({
            "caminhos": {"ghostscript": "gs"},
            "juntar": {
                "ativado": true,
                "arquivos": ["a.pdf", {"arquivo": "b.pdf", "pagina_inicial": 2}],
                "saida": "m.pdf"
            },
            "compactar": {"ativado": false, "saida": "c.pdf"},
            "parametros": {"compactacao": "screen"},
            "pdfa": {"ativado": true, "saida": "p.pdf", "perfil": "PDF/A-2b"}
        }));

        normalize_to_english(&mut doc);

        let expected = json!({
            "paths": {"ghostscript": "gs"},
            "merge": {
                "enabled": true,
                "files": ["a.pdf", {"file": "b.pdf", "first_page": 2}],
                "output": "m.pdf"
            },
            "compress": {"enabled": false, "output": "c.pdf"},
            "settings": {"compression": "screen"},
            "pdfa": {"enabled": true, "output": "p.pdf", "profile": "PDF/A-2b"}
        });
        assert_eq!(Value::Object(doc), expected);
    }
}
