//! World lookup collaborator.

use std::collections::HashSet;

/// Answers whether a named world currently exists.
///
/// Decoding validates the `world` key through this trait instead of holding
/// world knowledge itself; the embedding runtime supplies the live view.
pub trait WorldResolver {
    fn exists(&self, name: &str) -> bool;
}

impl<T: WorldResolver + ?Sized> WorldResolver for &T {
    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

/// A fixed set of world names, for embedders with a static world list and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct KnownWorlds(HashSet<String>);

impl KnownWorlds {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }
}

impl WorldResolver for KnownWorlds {
    fn exists(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}
