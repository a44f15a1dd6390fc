//! In-memory name-to-hologram index.

use std::collections::HashMap;

use crate::error::{HologramError, HologramResult};
use crate::hologram::{Hologram, Location};

/// The in-memory index of all named holograms.
///
/// Names are unique ignoring case. Iteration order is insertion order, not
/// alphabetical. Removal only touches memory; the caller decides when to
/// rewrite the persisted file.
///
/// Mutation is expected to happen from a single logical thread (the game
/// "main" thread in the original runtime); the registry is plain owned data
/// and callers introducing concurrency wrap it in their own lock.
#[derive(Debug, Default)]
pub struct Registry {
    /// Lowercased name -> hologram (the hologram keeps its original-case name).
    by_name: HashMap<String, Hologram>,
    /// Lowercased names in insertion order.
    order: Vec<String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new hologram and register it.
    ///
    /// Fails with [`HologramError::DuplicateName`] if the name is taken (any
    /// case variant) and [`HologramError::EmptyName`] on an empty name; the
    /// registry is unchanged on failure.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        location: Option<Location>,
    ) -> HologramResult<&mut Hologram> {
        let hologram = Hologram::new(name, location)?;
        let key = hologram.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(HologramError::DuplicateName(hologram.name().to_owned()));
        }
        self.order.push(key.clone());
        Ok(self.by_name.entry(key).or_insert(hologram))
    }

    /// Register an existing hologram.
    pub fn add(&mut self, hologram: Hologram) -> HologramResult<()> {
        let key = hologram.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(HologramError::DuplicateName(hologram.name().to_owned()));
        }
        self.order.push(key.clone());
        self.by_name.insert(key, hologram);
        Ok(())
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Hologram> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Case-insensitive lookup for editing.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Hologram> {
        self.by_name.get_mut(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Remove a hologram from memory, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Hologram> {
        let key = name.to_lowercase();
        let hologram = self.by_name.remove(&key)?;
        self.order.retain(|k| k != &key);
        Some(hologram)
    }

    /// Iterate holograms in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Hologram> {
        self.order.iter().filter_map(|key| self.by_name.get(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut registry = Registry::new();
        registry.create("Spawn", None).unwrap();

        assert!(registry.get("spawn").is_some());
        assert!(registry.get("SPAWN").is_some());
        assert_eq!(registry.get("spawn").unwrap().name(), "Spawn");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.create("test", None).unwrap();

        let err = registry.create("TEST", None).unwrap_err();
        assert_eq!(err, HologramError::DuplicateName("TEST".to_owned()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.add(Hologram::new("a", None).unwrap()).unwrap();

        let err = registry.add(Hologram::new("A", None).unwrap()).unwrap_err();
        assert_eq!(err, HologramError::DuplicateName("A".to_owned()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.create(name, None).unwrap();
        }

        let names: Vec<_> = registry.list().map(Hologram::name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_remove() {
        let mut registry = Registry::new();
        registry.create("One", None).unwrap();
        registry.create("two", None).unwrap();

        let removed = registry.remove("ONE").unwrap();
        assert_eq!(removed.name(), "One");
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("one").is_none());

        let names: Vec<_> = registry.list().map(Hologram::name).collect();
        assert_eq!(names, ["two"]);
    }
}
