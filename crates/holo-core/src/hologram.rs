//! Hologram aggregate: a named, optionally placed, ordered line sequence.

use crate::error::{HologramError, HologramResult};
use crate::line::Line;

/// A position in a named world.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }
}

/// A named hologram.
///
/// The name is immutable after creation and compared case-insensitively by
/// the [`Registry`](crate::Registry); renaming is remove-and-reinsert. The
/// location is optional: an unplaced hologram (or one whose world is not
/// currently loaded) is retained but renders nothing. Lines are kept in
/// display order, top to bottom, and an empty hologram is valid.
///
/// Every mutation leaves the aggregate immediately ready for
/// re-serialization; there is no deferred or batched state.
#[derive(Debug, Clone, PartialEq)]
pub struct Hologram {
    name: String,
    location: Option<Location>,
    lines: Vec<Line>,
}

impl Hologram {
    /// Create an empty hologram. Fails on an empty name.
    ///
    /// Name uniqueness is the [`Registry`](crate::Registry)'s concern, not
    /// this constructor's.
    pub fn new(name: impl Into<String>, location: Option<Location>) -> HologramResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(HologramError::EmptyName);
        }
        Ok(Self {
            name,
            location,
            lines: Vec::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Place or move the hologram.
    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Remove the placement, keeping the hologram and its lines.
    pub fn clear_location(&mut self) {
        self.location = None;
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Append a line at the bottom.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Insert a line at `index`, shifting later lines down.
    ///
    /// `index == line_count()` is legal and appends.
    pub fn insert_line(&mut self, index: usize, line: Line) -> HologramResult<()> {
        if index > self.lines.len() {
            return Err(self.out_of_range(index));
        }
        self.lines.insert(index, line);
        Ok(())
    }

    /// Replace the line at `index`.
    pub fn set_line(&mut self, index: usize, line: Line) -> HologramResult<()> {
        match self.lines.get_mut(index) {
            Some(slot) => {
                *slot = line;
                Ok(())
            }
            None => Err(self.out_of_range(index)),
        }
    }

    /// Remove and return the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> HologramResult<Line> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Reset to an empty line sequence.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    /// Take an owned snapshot for the rendering subsystem.
    ///
    /// The model never hands out a live render handle; the renderer receives
    /// a fresh snapshot whenever lines or placement change.
    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            name: self.name.clone(),
            location: self.location.clone(),
            lines: self.lines.clone(),
        }
    }

    fn out_of_range(&self, index: usize) -> HologramError {
        HologramError::IndexOutOfRange {
            index,
            len: self.lines.len(),
        }
    }
}

/// Everything the render layer needs to spawn or update visible entities.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub name: String,
    pub location: Option<Location>,
    pub lines: Vec<Line>,
}
