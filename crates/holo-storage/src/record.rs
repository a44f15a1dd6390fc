//! Flat key-value codec for a single hologram.
//!
//! Record keys:
//!
//! - `world` plus `x`, `y`, `z` — the placement; all four present iff the
//!   hologram is placed, omitted entirely otherwise.
//! - `line-<i>` for `i = 0..n-1` — the serialized lines, contiguous and
//!   0-indexed. A gap in the indices signals corruption.
//!
//! Unknown keys are ignored on decode for forward compatibility.

use std::collections::BTreeMap;

use holo_core::{Hologram, Line, Location};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LoadError;
use crate::resolver::WorldResolver;

const KEY_WORLD: &str = "world";
const KEY_X: &str = "x";
const KEY_Y: &str = "y";
const KEY_Z: &str = "z";
const LINE_PREFIX: &str = "line-";

/// The flat persisted form of one hologram.
///
/// Backed by a `BTreeMap` so key order is deterministic and repeated saves
/// of unchanged state are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Encode a hologram into its flat record.
///
/// Emits exactly one `line-<i>` entry per line, in display order, and omits
/// the placement keys entirely when the hologram is unplaced.
#[must_use]
pub fn encode(hologram: &Hologram) -> Record {
    let mut record = Record::default();
    if let Some(location) = hologram.location() {
        record.insert(KEY_WORLD, location.world.clone());
        record.insert(KEY_X, location.x);
        record.insert(KEY_Y, location.y);
        record.insert(KEY_Z, location.z);
    }
    for (index, line) in hologram.lines().iter().enumerate() {
        record.insert(format!("{LINE_PREFIX}{index}"), line.serialize());
    }
    record
}

/// Decode a record back into a hologram named `name`.
///
/// The placement world is validated against `worlds`; lines are rebuilt with
/// the total [`Line::parse`], so a malformed line payload degrades to text
/// instead of failing the whole record.
pub fn decode(
    record: &Record,
    name: &str,
    worlds: &dyn WorldResolver,
) -> Result<Hologram, LoadError> {
    let location = decode_location(record, worlds)?;
    let mut hologram =
        Hologram::new(name, location).map_err(|err| LoadError::InvalidFormat(err.to_string()))?;
    for raw in decode_lines(record)? {
        hologram.add_line(Line::parse(raw));
    }
    Ok(hologram)
}

fn decode_location(
    record: &Record,
    worlds: &dyn WorldResolver,
) -> Result<Option<Location>, LoadError> {
    let Some(world_value) = record.get(KEY_WORLD) else {
        // Never placed; stray coordinate keys without a world are ignored
        // like any other unknown key.
        return Ok(None);
    };
    let world = world_value
        .as_str()
        .ok_or_else(|| LoadError::InvalidFormat("world name must be a string".to_owned()))?;
    if !worlds.exists(world) {
        return Err(LoadError::WorldNotFound(world.to_owned()));
    }

    let x = coordinate(record, KEY_X)?;
    let y = coordinate(record, KEY_Y)?;
    let z = coordinate(record, KEY_Z)?;
    Ok(Some(Location::new(world, x, y, z)))
}

fn coordinate(record: &Record, key: &str) -> Result<f64, LoadError> {
    let value = record
        .get(key)
        .ok_or_else(|| LoadError::InvalidFormat(format!("missing coordinate '{key}'")))?;
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| LoadError::InvalidFormat(format!("coordinate '{key}' is not finite"))),
        Value::String(text) => text.trim().parse().map_err(|_| {
            LoadError::InvalidFormat(format!("coordinate '{key}' is not a number: '{text}'"))
        }),
        _ => Err(LoadError::InvalidFormat(format!(
            "coordinate '{key}' is not a number"
        ))),
    }
}

/// Collect the serialized lines in ascending index order, rejecting gaps.
fn decode_lines(record: &Record) -> Result<Vec<&str>, LoadError> {
    let mut indexed = Vec::new();
    for (key, value) in record.iter() {
        let Some(suffix) = key.strip_prefix(LINE_PREFIX) else {
            continue;
        };
        // A non-numeric suffix is an unknown key, not a line.
        let Ok(index) = suffix.parse::<usize>() else {
            continue;
        };
        let text = value
            .as_str()
            .ok_or_else(|| LoadError::InvalidFormat(format!("'{key}' must be a string")))?;
        indexed.push((index, text));
    }

    indexed.sort_unstable_by_key(|(index, _)| *index);
    for (expected, (index, _)) in indexed.iter().enumerate() {
        if *index != expected {
            return Err(LoadError::InvalidFormat(format!(
                "line keys are not contiguous: expected line-{expected}, found line-{index}"
            )));
        }
    }

    Ok(indexed.into_iter().map(|(_, text)| text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::KnownWorlds;
    use serde_json::json;

    fn worlds() -> KnownWorlds {
        KnownWorlds::new(["world"])
    }

    fn placed() -> Hologram {
        let mut hologram =
            Hologram::new("test", Some(Location::new("world", 1.0, 2.0, 3.0))).unwrap();
        hologram.add_line(Line::text("Hello"));
        hologram.add_line(Line::icon("1:0"));
        hologram
    }

    #[test]
    fn test_encode_shape() {
        let record = encode(&placed());

        assert_eq!(record.get("world"), Some(&json!("world")));
        assert_eq!(record.get("x"), Some(&json!(1.0)));
        assert_eq!(record.get("y"), Some(&json!(2.0)));
        assert_eq!(record.get("z"), Some(&json!(3.0)));
        assert_eq!(record.get("line-0"), Some(&json!("Hello")));
        assert_eq!(record.get("line-1"), Some(&json!("ICON: 1:0")));
        assert_eq!(record.iter().count(), 6);
    }

    #[test]
    fn test_unplaced_omits_location_keys() {
        let mut hologram = Hologram::new("test", None).unwrap();
        hologram.add_line(Line::text("floating"));

        let record = encode(&hologram);
        assert_eq!(record.get("world"), None);
        assert_eq!(record.get("x"), None);
        assert_eq!(record.iter().count(), 1);
    }

    #[test]
    fn test_round_trip_placed() {
        let hologram = placed();
        let decoded = decode(&encode(&hologram), "test", &worlds()).unwrap();
        assert_eq!(decoded, hologram);
    }

    #[test]
    fn test_round_trip_unplaced_and_empty() {
        let hologram = Hologram::new("bare", None).unwrap();
        let decoded = decode(&encode(&hologram), "bare", &worlds()).unwrap();
        assert_eq!(decoded, hologram);
    }

    #[test]
    fn test_unknown_world_fails() {
        let record = encode(&placed());
        let err = decode(&record, "test", &KnownWorlds::default()).unwrap_err();
        assert_eq!(err, LoadError::WorldNotFound("world".to_owned()));
    }

    #[test]
    fn test_missing_coordinate_fails() {
        let mut record = Record::default();
        record.insert("world", "world");
        record.insert("x", 1.0);
        record.insert("z", 3.0);

        let err = decode(&record, "test", &worlds()).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidFormat("missing coordinate 'y'".to_owned())
        );
    }

    #[test]
    fn test_bad_coordinate_fails() {
        let mut record = Record::default();
        record.insert("world", "world");
        record.insert("x", "not a number");
        record.insert("y", 2.0);
        record.insert("z", 3.0);

        assert!(matches!(
            decode(&record, "test", &worlds()),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_string_coordinates_accepted() {
        let mut record = Record::default();
        record.insert("world", "world");
        record.insert("x", "1.5");
        record.insert("y", "64");
        record.insert("z", "-3.25");

        let decoded = decode(&record, "test", &worlds()).unwrap();
        let location = decoded.location().unwrap();
        assert_eq!((location.x, location.y, location.z), (1.5, 64.0, -3.25));
    }

    #[test]
    fn test_line_gap_fails() {
        let mut record = Record::default();
        record.insert("line-0", "first");
        record.insert("line-2", "third");

        let err = decode(&record, "test", &worlds()).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidFormat(
                "line keys are not contiguous: expected line-1, found line-2".to_owned()
            )
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut record = Record::default();
        record.insert("line-0", "kept");
        record.insert("line-extra", "ignored");
        record.insert("touch-distance", 4.0);

        let decoded = decode(&record, "test", &worlds()).unwrap();
        assert_eq!(decoded.lines(), &[Line::text("kept")]);
    }

    #[test]
    fn test_line_order_by_index() {
        // BTreeMap iterates "line-10" before "line-2"; decoding must order
        // numerically.
        let mut record = Record::default();
        for index in 0..11 {
            record.insert(format!("line-{index}"), format!("row {index}"));
        }

        let decoded = decode(&record, "test", &worlds()).unwrap();
        let contents: Vec<_> = decoded.lines().iter().map(Line::serialize).collect();
        assert_eq!(contents[2], "row 2");
        assert_eq!(contents[10], "row 10");
    }
}
