//! # Document Store
//!
//! Reads and writes catalog files by logical name. Every mutation goes
//! through [`DocumentStore::transact`], which holds a per-name lock across
//! the whole load → mutate → serialize → write sequence, so two writers of
//! the same catalog in this process can never interleave. Writers of
//! different catalogs do not contend.
//!
//! Writes are a direct overwrite of the target file. A write is skipped
//! entirely when the serialized bytes equal what is already on disk.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use ogw_core::{diff_json, diff_texts, parse_document, to_document_text, ContentDigest, DiffResult};
use parking_lot::Mutex;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Raw file text with its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub digest: ContentDigest,
}

/// Result of a committed transaction.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    /// What the transaction closure returned.
    pub value: T,
    /// Structural changes between the loaded and the saved document.
    pub diff: DiffResult,
    /// Digest of the file content after the transaction.
    pub digest: ContentDigest,
    /// Whether the file was rewritten.
    pub written: bool,
}

/// Result of replacing a file's raw content.
#[derive(Debug, Clone)]
pub struct Replaced {
    pub diff: DiffResult,
    pub written: bool,
    pub digest: ContentDigest,
}

/// File-backed catalog store. Cheap to clone; clones share the lock table.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: Arc<StoreConfig>,
    locks: Arc<HashMap<String, Mutex<()>>>,
}

impl DocumentStore {
    /// One lock per configured name. The table is fixed at construction.
    pub fn new(config: StoreConfig) -> Self {
        let locks = config
            .entries()
            .map(|(name, _)| (name.to_string(), Mutex::new(())))
            .collect();
        Self {
            config: Arc::new(config),
            locks: Arc::new(locks),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path and writer lock of a configured name.
    fn resolve_locked(&self, name: &str) -> Result<(&Path, &Mutex<()>), StoreError> {
        let path = self.config.resolve(name)?;
        let lock = self.locks.get(name).ok_or_else(|| StoreError::UnknownName {
            name: name.to_string(),
        })?;
        Ok((path, lock))
    }

    /// Whether the file configured for `name` exists.
    pub fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.config.resolve(name)?.is_file())
    }

    /// Raw text of the catalog.
    pub fn read(&self, name: &str) -> Result<String, StoreError> {
        let path = self.config.resolve(name)?;
        read_path(name, path)
    }

    /// Raw text of the catalog with its digest.
    pub fn read_snapshot(&self, name: &str) -> Result<Snapshot, StoreError> {
        let text = self.read(name)?;
        let digest = ContentDigest::of(&text);
        Ok(Snapshot { text, digest })
    }

    /// Parsed catalog with the digest of the text it was parsed from.
    pub fn load(&self, name: &str) -> Result<(Value, ContentDigest), StoreError> {
        let snapshot = self.read_snapshot(name)?;
        let doc = parse(name, &snapshot.text)?;
        Ok((doc, snapshot.digest))
    }

    /// Overwrite the catalog with `text`. The file must already exist.
    pub fn write(&self, name: &str, text: &str) -> Result<(), StoreError> {
        let (path, lock) = self.resolve_locked(name)?;
        let _guard = lock.lock();
        if !path.is_file() {
            return Err(missing(name, path));
        }
        write_path(path, text)
    }

    /// Load, mutate and save a catalog under the catalog's lock.
    ///
    /// `expected` is an optional precondition: if the current file digest
    /// differs, nothing runs and [`StoreError::StaleDocument`] is returned.
    /// If `f` fails, nothing is written and its error is returned as is.
    pub fn transact<T, E, F>(
        &self,
        name: &str,
        expected: Option<ContentDigest>,
        f: F,
    ) -> Result<Committed<T>, E>
    where
        F: FnOnce(&mut Value) -> Result<T, E>,
        E: From<StoreError>,
    {
        let (path, lock) = self.resolve_locked(name)?;
        let _guard = lock.lock();

        let before_text = read_path(name, path)?;
        let before_digest = ContentDigest::of(&before_text);
        check_precondition(name, expected, before_digest)?;

        let before = parse(name, &before_text)?;
        let mut doc = before.clone();
        let value = f(&mut doc)?;

        let after_text = to_document_text(&doc).map_err(StoreError::Serialize)?;
        let diff = diff_json(&before, &doc);
        let written = after_text != before_text;
        let digest = if written {
            write_path(path, &after_text)?;
            ContentDigest::of(&after_text)
        } else {
            before_digest
        };

        tracing::info!(
            catalog = name,
            written,
            bytes = after_text.len(),
            added = diff.summary.added,
            changed = diff.summary.changed,
            removed = diff.summary.removed,
            "catalog transaction committed"
        );

        Ok(Committed {
            value,
            diff,
            digest,
            written,
        })
    }

    /// Replace a catalog's raw text with client-supplied content.
    ///
    /// The content must be valid JSON and is written verbatim. With
    /// `preview_only` the diff is computed and nothing is written.
    pub fn replace(
        &self,
        name: &str,
        content: &str,
        preview_only: bool,
    ) -> Result<Replaced, StoreError> {
        let (path, lock) = self.resolve_locked(name)?;
        let _guard = lock.lock();

        let old_text = read_path(name, path)?;
        if let Err(source) = parse_document(content) {
            return Err(StoreError::InvalidContent {
                name: name.to_string(),
                source,
            });
        }
        let diff = diff_texts(&old_text, content).map_err(|source| StoreError::Parse {
            name: name.to_string(),
            source,
        })?;

        if preview_only {
            tracing::debug!(catalog = name, changes = diff.details.len(), "save previewed");
            return Ok(Replaced {
                diff,
                written: false,
                digest: ContentDigest::of(&old_text),
            });
        }

        write_path(path, content)?;
        tracing::info!(catalog = name, bytes = content.len(), "catalog content replaced");
        Ok(Replaced {
            diff,
            written: true,
            digest: ContentDigest::of(content),
        })
    }
}

fn check_precondition(
    name: &str,
    expected: Option<ContentDigest>,
    actual: ContentDigest,
) -> Result<(), StoreError> {
    match expected {
        Some(expected) if expected != actual => {
            tracing::warn!(catalog = name, %expected, %actual, "stale write rejected");
            Err(StoreError::StaleDocument {
                name: name.to_string(),
                expected,
                actual,
            })
        }
        _ => Ok(()),
    }
}

fn missing(name: &str, path: &Path) -> StoreError {
    StoreError::FileMissing {
        name: name.to_string(),
        path: path.to_path_buf(),
    }
}

fn read_path(name: &str, path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => missing(name, path),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn write_path(path: &Path, text: &str) -> Result<(), StoreError> {
    std::fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(name: &str, text: &str) -> Result<Value, StoreError> {
    parse_document(text).map_err(|source| StoreError::Parse {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const NAME: &str = "resilience_baseline_catalog";

    fn store_with(content: &str) -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, content).unwrap();
        let config = StoreConfig::new()
            .with_entry(NAME, &path)
            .with_entry("missing", dir.path().join("absent.json"));
        (dir, DocumentStore::new(config))
    }

    fn path_of(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("catalog.json")
    }

    // ── Reads ────────────────────────────────────────────────────────

    #[test]
    fn read_returns_raw_text() {
        let (_dir, store) = store_with("{\"catalog\":{}}");
        assert_eq!(store.read(NAME).unwrap(), "{\"catalog\":{}}");
        let snap = store.read_snapshot(NAME).unwrap();
        assert_eq!(snap.digest, ContentDigest::of("{\"catalog\":{}}"));
    }

    #[test]
    fn unknown_and_missing_are_distinct() {
        let (_dir, store) = store_with("{}");
        assert!(matches!(store.read("nope"), Err(StoreError::UnknownName { .. })));
        assert!(matches!(store.read("missing"), Err(StoreError::FileMissing { .. })));
        assert!(!store.exists("missing").unwrap());
        assert!(store.exists(NAME).unwrap());
    }

    #[test]
    fn unknown_names_never_extend_the_lock_table() {
        let (_dir, store) = store_with("{}");
        for i in 0..1000 {
            let name = format!("bogus-{i}");
            assert!(matches!(
                store.replace(&name, "{}", true),
                Err(StoreError::UnknownName { .. })
            ));
            assert!(matches!(
                store.transact(&name, None, |_| Ok::<_, StoreError>(())),
                Err(StoreError::UnknownName { .. })
            ));
            assert!(matches!(store.write(&name, "{}"), Err(StoreError::UnknownName { .. })));
        }
        assert_eq!(store.locks.len(), 2);
        assert!(store.locks.contains_key(NAME));
        assert!(store.locks.contains_key("missing"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let (_dir, store) = store_with("{\"catalog\": [");
        assert!(matches!(store.load(NAME), Err(StoreError::Parse { .. })));
    }

    // ── Transactions ─────────────────────────────────────────────────

    #[test]
    fn transact_writes_normalized_document_and_reports_diff() {
        let (dir, store) = store_with(r#"{"catalog":{"groups":[{"id":"g","controls":[{"id":"A","title":"old"}]}]}}"#);
        let committed = store
            .transact(NAME, None, |doc| -> Result<_, StoreError> {
                doc["catalog"]["groups"][0]["controls"][0]["title"] = json!("new");
                Ok(42)
            })
            .unwrap();
        assert_eq!(committed.value, 42);
        assert!(committed.written);
        assert_eq!(committed.diff.summary.changed, 1);
        assert_eq!(
            committed.diff.details[0].path,
            "/catalog/groups/0/controls/0/title"
        );

        let on_disk = fs::read_to_string(path_of(&dir)).unwrap();
        assert!(on_disk.starts_with("{\n  \"catalog\""));
        assert!(on_disk.contains("\"title\": \"new\""));
        assert_eq!(committed.digest, ContentDigest::of(&on_disk));
    }

    #[test]
    fn failed_closure_writes_nothing() {
        let original = "{\"catalog\":{}}";
        let (dir, store) = store_with(original);
        let result: Result<Committed<()>, StoreError> = store.transact(NAME, None, |doc| {
            doc["catalog"]["touched"] = json!(true);
            Err(StoreError::UnknownName { name: "boom".into() })
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(path_of(&dir)).unwrap(), original);
    }

    #[test]
    fn unchanged_bytes_are_not_rewritten() {
        let normalized = to_document_text(&json!({"catalog": {"groups": []}})).unwrap();
        let (_dir, store) = store_with(&normalized);
        let committed = store
            .transact(NAME, None, |_doc| Ok::<_, StoreError>(()))
            .unwrap();
        assert!(!committed.written);
        assert!(committed.diff.is_empty());
        assert_eq!(committed.digest, ContentDigest::of(&normalized));
    }

    #[test]
    fn stale_precondition_is_rejected_before_mutation() {
        let original = "{\"catalog\":{}}";
        let (dir, store) = store_with(original);
        let stale = ContentDigest::of("something else");
        let result = store.transact(NAME, Some(stale), |doc| {
            doc["catalog"]["x"] = json!(1);
            Ok::<_, StoreError>(())
        });
        assert!(matches!(result, Err(StoreError::StaleDocument { .. })));
        assert_eq!(fs::read_to_string(path_of(&dir)).unwrap(), original);

        let fresh = ContentDigest::of(original);
        assert!(store
            .transact(NAME, Some(fresh), |_| Ok::<_, StoreError>(()))
            .is_ok());
    }

    #[test]
    fn concurrent_transactions_do_not_lose_updates() {
        let (dir, store) = store_with("{\"counter\": 0}");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        store
                            .transact(NAME, None, |doc| {
                                let n = doc["counter"].as_i64().unwrap_or(0);
                                doc["counter"] = json!(n + 1);
                                Ok::<_, StoreError>(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let doc: Value = serde_json::from_str(&fs::read_to_string(path_of(&dir)).unwrap()).unwrap();
        assert_eq!(doc["counter"], 80);
    }

    // ── Raw replacement ──────────────────────────────────────────────

    #[test]
    fn replace_preview_does_not_write() {
        let (dir, store) = store_with("{\"a\": 1}");
        let replaced = store.replace(NAME, "{\"a\": 2}", true).unwrap();
        assert!(!replaced.written);
        assert_eq!(replaced.diff.summary.changed, 1);
        assert_eq!(fs::read_to_string(path_of(&dir)).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn replace_writes_content_verbatim() {
        let (dir, store) = store_with("{\"a\": 1}");
        let replaced = store.replace(NAME, "{\"a\":1,\"b\":2}", false).unwrap();
        assert!(replaced.written);
        assert_eq!(replaced.diff.summary.added, 1);
        assert_eq!(fs::read_to_string(path_of(&dir)).unwrap(), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn replace_rejects_invalid_content() {
        let (_dir, store) = store_with("{}");
        assert!(matches!(
            store.replace(NAME, "not json", false),
            Err(StoreError::InvalidContent { .. })
        ));
    }

    #[test]
    fn write_requires_existing_file() {
        let (_dir, store) = store_with("{}");
        assert!(matches!(
            store.write("missing", "{}"),
            Err(StoreError::FileMissing { .. })
        ));
        store.write(NAME, "{\"b\": true}").unwrap();
        assert_eq!(store.read(NAME).unwrap(), "{\"b\": true}");
    }
}
