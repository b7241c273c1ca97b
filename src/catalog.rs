//! The key -> text catalog backing one locale file.
//!
//! The catalog is loaded once before any file is processed, mutated in
//! memory, and written back once at the end of the run. Rewriters never see
//! the catalog itself; they get a [`CatalogSink`] and can only add entries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Insertion capability handed to rewriters.
pub trait CatalogSink {
    fn insert(&mut self, key: String, text: String) -> Result<()>;
}

/// Per-file entry buffer used during the parallel rewrite phase.
///
/// Files are rewritten concurrently, so each file collects into its own
/// buffer; buffers are merged into the catalog sequentially afterwards.
#[derive(Debug, Default)]
pub struct EntryCollector {
    pub entries: Vec<(String, String)>,
}

impl EntryCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogSink for EntryCollector {
    fn insert(&mut self, key: String, text: String) -> Result<()> {
        self.entries.push((key, text));
        Ok(())
    }
}

/// JSON catalog of extracted text, keyed by content hash.
pub struct LocaleCatalog {
    file_path: PathBuf,
    data: Map<String, Value>,
}

impl LocaleCatalog {
    /// Open an existing catalog file or start an empty one.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
            match value {
                Value::Object(map) => map,
                _ => bail!("Root of catalog file must be an object: {}", path.display()),
            }
        } else {
            Map::new()
        };

        Ok(Self {
            file_path: path.to_path_buf(),
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Merge one file's collected entries.
    ///
    /// Entries are insert-if-absent: a key already present with the same
    /// text is left alone. A key already present with different text is an
    /// error, and the catalog is left untouched for the whole batch so a
    /// failed file contributes nothing.
    ///
    /// Returns the number of newly added entries.
    pub fn merge(&mut self, entries: &[(String, String)]) -> Result<usize> {
        for (key, text) in entries {
            if let Some(existing) = self.data.get(key)
                && existing.as_str() != Some(text.as_str())
            {
                bail!(
                    "catalog key '{}' already maps to {}, refusing to overwrite with \"{}\"",
                    key,
                    existing,
                    text
                );
            }
        }

        let mut added = 0;
        for (key, text) in entries {
            if self.checked_insert(key, text)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Save the catalog with pretty formatting.
    ///
    /// Uses 2-space indentation and adds a trailing newline. Entries keep
    /// their insertion order.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(self.data.clone()))
            .context("Failed to serialize catalog")?;

        fs::write(&self.file_path, format!("{}\n", content))
            .with_context(|| format!("Failed to write catalog: {}", self.file_path.display()))?;

        Ok(())
    }

    fn checked_insert(&mut self, key: &str, text: &str) -> Result<bool> {
        match self.data.get(key) {
            None => {
                self.data
                    .insert(key.to_string(), Value::String(text.to_string()));
                Ok(true)
            }
            Some(existing) if existing.as_str() == Some(text) => Ok(false),
            Some(existing) => bail!(
                "catalog key '{}' already maps to {}, refusing to overwrite with \"{}\"",
                key,
                existing,
                text
            ),
        }
    }
}

impl CatalogSink for LocaleCatalog {
    fn insert(&mut self, key: String, text: String) -> Result<()> {
        self.checked_insert(&key, &text).map(|_| ())
    }
}
