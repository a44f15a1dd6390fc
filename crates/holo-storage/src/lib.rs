//! Persistence for the hologram registry.
//!
//! Each hologram maps to a flat key-value [`Record`]; the whole registry maps
//! to a single JSON document of name -> record, rewritten atomically on every
//! save. Decoding is failure-tolerant: one corrupt record is logged and
//! skipped, never blocking the rest of the saved state.
//!
//! ```text
//! {
//!   "spawn": {
//!     "world": "world",
//!     "x": 0.5, "y": 65.0, "z": 0.5,
//!     "line-0": "Welcome!",
//!     "line-1": "ICON: 264"
//!   }
//! }
//! ```
//!
//! World validation is injected through [`WorldResolver`], so the codec never
//! hardcodes knowledge about which worlds the embedding runtime has loaded.

mod database;
mod error;
mod record;
mod resolver;

pub use database::{Document, HologramDatabase, LoadFailure, LoadReport};
pub use error::{LoadError, StorageError, StorageResult};
pub use record::{Record, decode, encode};
pub use resolver::{KnownWorlds, WorldResolver};
