//! Marker-depth outline text format.
//!
//! # Responsibility
//! - Flatten a priority forest into one line per node.
//! - Rebuild a forest from pasted outline text.
//!
//! # Invariants
//! - A line is `<marker>+ <whitespace>+ <content>`; marker count is depth.
//! - Export is pre-order depth-first and always ends lines with `\n`.
//! - Import never yields a partial forest: any malformed line fails the
//!   whole parse.
//! - Content is not escaped. Trees store content with line breaks folded
//!   into spaces, so anything exported from a tree parses back.

pub mod parse;
pub mod serialize;

pub use parse::parse;
pub use serialize::serialize;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Marker used when no other configuration is given.
pub const DEFAULT_MARKER: char = '-';

/// Outline format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineConfig {
    marker: char,
}

impl OutlineConfig {
    /// Creates a configuration using `marker` as the depth character.
    ///
    /// # Errors
    /// - Returns `OutlineConfigError::WhitespaceMarker` when `marker` is
    ///   whitespace, since whitespace separates markers from content.
    pub fn with_marker(marker: char) -> Result<Self, OutlineConfigError> {
        if marker.is_whitespace() {
            return Err(OutlineConfigError::WhitespaceMarker(marker));
        }
        Ok(Self { marker })
    }

    pub fn marker(&self) -> char {
        self.marker
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
        }
    }
}

/// Errors from building an outline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineConfigError {
    /// Marker character is whitespace.
    WhitespaceMarker(char),
}

impl Display for OutlineConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WhitespaceMarker(marker) => {
                write!(f, "outline marker must not be whitespace: {marker:?}")
            }
        }
    }
}

impl Error for OutlineConfigError {}

/// Errors from parsing outline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Input is empty or whitespace-only.
    Empty,
    /// One or more non-blank lines do not match the line grammar.
    ///
    /// `lines` holds every offending 1-based line number in input order.
    Malformed { lines: Vec<usize> },
}

impl Display for OutlineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "nothing to import: outline text is empty"),
            Self::Malformed { lines } => write_malformed(f, lines),
        }
    }
}

impl Error for OutlineError {}

/// Writes the aggregate "invalid format" message for malformed line numbers.
pub(crate) fn write_malformed(f: &mut Formatter<'_>, lines: &[usize]) -> std::fmt::Result {
    write!(
        f,
        "invalid format: each line must start with one or more markers followed by text (lines "
    )?;
    for (pos, line) in lines.iter().enumerate() {
        if pos > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{line}")?;
    }
    f.write_str(")")
}
