//! Whole-file hologram database.
//!
//! The on-disk format is one JSON object mapping hologram name to its flat
//! record. Saves always rewrite the entire file: the document is serialized
//! to a sibling temp file and renamed over the target, so a crash mid-write
//! never truncates the previous state.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use holo_core::{Hologram, Registry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LoadError, StorageResult};
use crate::record::{self, Record};
use crate::resolver::WorldResolver;

/// The parsed top-level document: hologram name -> record.
///
/// Names keep the case they were saved with; lookups ignore case, matching
/// the registry's uniqueness rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(BTreeMap<String, Record>);

impl Document {
    /// Case-insensitive record lookup.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        if let Some(record) = self.0.get(name) {
            return Some(record);
        }
        let needle = name.to_lowercase();
        self.0
            .iter()
            .find(|(key, _)| key.to_lowercase() == needle)
            .map(|(_, record)| record)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: Record) {
        self.0.insert(name.into(), record);
    }

    /// Decode one named hologram out of this document.
    ///
    /// Fails with [`LoadError::HologramNotFound`] when no record carries the
    /// name (ignoring case).
    pub fn decode_hologram(
        &self,
        name: &str,
        worlds: &dyn WorldResolver,
    ) -> Result<Hologram, LoadError> {
        let record = self
            .record(name)
            .ok_or_else(|| LoadError::HologramNotFound(name.to_owned()))?;
        record::decode(record, name, worlds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Record)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One skipped record from a batch load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub name: String,
    pub error: LoadError,
}

/// Outcome of a batch load: everything that decoded, plus what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub registry: Registry,
    pub failures: Vec<LoadFailure>,
}

/// File-backed store for the whole registry.
///
/// The path is injected at construction; the database never looks up global
/// state. All operations are synchronous whole-file passes, intended for the
/// infrequent edit/startup path rather than a steady-state loop.
pub struct HologramDatabase {
    path: PathBuf,
}

impl HologramDatabase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the whole document. A missing file is an empty
    /// database, not an error (first run).
    pub fn load(&self) -> StorageResult<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load every saved hologram into a fresh registry.
    ///
    /// This is the failure-tolerance boundary: a record that fails to decode
    /// is logged with its name, collected into the report, and skipped — one
    /// bad entry never prevents the rest of the saved state from loading.
    /// Only a file-level read/parse failure aborts.
    pub fn load_registry(&self, worlds: &dyn WorldResolver) -> StorageResult<LoadReport> {
        let document = self.load()?;
        let mut report = LoadReport::default();
        for (name, record) in document.iter() {
            let outcome = record::decode(record, name, worlds).and_then(|hologram| {
                report
                    .registry
                    .add(hologram)
                    .map_err(|err| LoadError::InvalidFormat(err.to_string()))
            });
            if let Err(error) = outcome {
                warn!("Skipping saved hologram '{name}': {error}");
                report.failures.push(LoadFailure {
                    name: name.clone(),
                    error,
                });
            }
        }
        debug!(
            "Loaded {} holograms from {} ({} skipped)",
            report.registry.len(),
            self.path.display(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Serialize every registered hologram and atomically replace the file.
    pub fn save(&self, registry: &Registry) -> StorageResult<()> {
        let mut document = Document::default();
        for hologram in registry.list() {
            document.insert(hologram.name(), record::encode(hologram));
        }
        self.write_document(&document)
    }

    /// Best-effort save: failures are logged and swallowed.
    ///
    /// The in-memory registry stays authoritative and usable even when the
    /// on-disk copy could not be updated; a stale file must not take down a
    /// live session.
    pub fn try_save(&self, registry: &Registry) {
        if let Err(err) = self.save(registry) {
            warn!(
                "Failed to save hologram database to {}: {err}",
                self.path.display()
            );
        }
    }

    fn write_document(&self, document: &Document) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename keeps the previous file intact until the new one
        // is fully on disk.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Saved {} holograms to {}",
            document.len(),
            self.path.display()
        );
        Ok(())
    }
}
