//! Display lines and their serialized string form.
//!
//! Every line serializes to a single string. Icon lines carry an `ICON:`
//! discriminator prefix; a string with no recognized prefix is a plain text
//! line. Parsing is total: malformed payloads degrade to usable lines instead
//! of being dropped, so saved data survives format drift in either direction.

// The icon prefix is ASCII, so slicing at its byte length is always a char
// boundary.
#![allow(clippy::string_slice)]

use std::fmt;

use thiserror::Error;

/// Discriminator prefix for icon lines, matched case-insensitively.
const ICON_PREFIX: &str = "ICON:";

/// One displayed row of a hologram.
///
/// Rows produced by image conversion are ordinary [`Line::Text`] values whose
/// content is a string of symbol characters; there is no separate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Plain text. May embed color codes and placeholder tokens that the
    /// render layer resolves; the model treats the content as opaque.
    Text(String),
    /// A floating item icon, described as `"ID"` or `"ID:DATA"`.
    Icon(String),
}

/// A lexically invalid item descriptor, reported by [`Line::icon_checked`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid item descriptor '{0}', expected ID or ID:DATA")]
pub struct InvalidLineError(pub String);

impl Line {
    /// Create a text line.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create an icon line without validating the descriptor.
    pub fn icon(descriptor: impl Into<String>) -> Self {
        Self::Icon(descriptor.into())
    }

    /// Create an icon line, rejecting descriptors that are not `ID` or
    /// `ID:DATA` with decimal digits.
    ///
    /// Editing front-ends call this so a typo is reported to the user instead
    /// of being persisted. [`Line::parse`] itself stays permissive.
    pub fn icon_checked(descriptor: &str) -> Result<Self, InvalidLineError> {
        let descriptor = descriptor.trim();
        if is_valid_descriptor(descriptor) {
            Ok(Self::Icon(descriptor.to_owned()))
        } else {
            Err(InvalidLineError(descriptor.to_owned()))
        }
    }

    /// Parse the serialized form of a line. Total: any input yields a line.
    ///
    /// A raw string starting with `ICON:` (any case) becomes an icon line
    /// with the trimmed payload; everything else is text, kept verbatim.
    /// An icon payload that fails the lexical check is still returned as an
    /// icon line, with a warning so the fallback is not silent.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        // Match the prefix on bytes so multi-byte text cannot trip a char
        // boundary; on a match the prefix is ASCII and slicing past it is safe.
        let prefix_len = ICON_PREFIX.len();
        let head = raw.as_bytes().get(..prefix_len);
        if head.is_some_and(|head| head.eq_ignore_ascii_case(ICON_PREFIX.as_bytes())) {
            let descriptor = raw[prefix_len..].trim();
            if !is_valid_descriptor(descriptor) {
                tracing::warn!(
                    "Icon line has a malformed item descriptor '{descriptor}', keeping it as-is"
                );
            }
            return Self::Icon(descriptor.to_owned());
        }
        Self::Text(raw.to_owned())
    }

    /// Serialize to the single-string persisted form.
    ///
    /// Inverse of [`Line::parse`] for all constructed variants.
    #[must_use]
    pub fn serialize(&self) -> String {
        match self {
            Self::Text(content) => content.clone(),
            Self::Icon(descriptor) => format!("{ICON_PREFIX} {descriptor}"),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Lexical check for `ID` or `ID:DATA` with decimal digits on both sides.
fn is_valid_descriptor(descriptor: &str) -> bool {
    fn all_digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    match descriptor.split_once(':') {
        Some((id, data)) => all_digits(id) && all_digits(data),
        None => all_digits(descriptor),
    }
}
