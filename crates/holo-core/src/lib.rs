//! Core hologram data model.
//!
//! A [`Hologram`] is a named, optionally placed, ordered sequence of display
//! [`Line`]s. The [`Registry`] indexes holograms by case-insensitive name.
//! This crate holds only the in-memory model and its serialized line format;
//! file persistence lives in `holo-storage`, and rendering is a separate
//! subsystem fed by [`RenderSnapshot`] values.
//!
//! # Example
//!
//! ```
//! use holo_core::{Line, Location, Registry};
//!
//! let mut registry = Registry::new();
//! let hologram = registry
//!     .create("spawn", Some(Location::new("world", 0.5, 65.0, 0.5)))
//!     .unwrap();
//! hologram.add_line(Line::text("Welcome!"));
//! hologram.add_line(Line::parse("ICON: 264"));
//! assert_eq!(hologram.line_count(), 2);
//! ```

mod error;
mod hologram;
mod line;
mod registry;

pub use error::{HologramError, HologramResult};
pub use hologram::{Hologram, Location, RenderSnapshot};
pub use line::{InvalidLineError, Line};
pub use registry::Registry;
