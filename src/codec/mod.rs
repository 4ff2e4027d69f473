//! Player interchange formats
//!
//! Each codec turns a text document into players and back:
//!
//! - [`CsvCodec`]: delimited text with a fixed header
//! - [`JsonCodec`]: an array of objects
//! - [`XmlCodec`]: a `<players>` element with one `<player>` per record
//!
//! # Import policy
//!
//! Imports are all-or-nothing. An empty or unreadable source, a malformed
//! document, or a single malformed row fails the whole import with
//! [`CodecError::Import`]. A well-formed source with no records yields an
//! empty list.
//!
//! # Export policy
//!
//! The document is encoded in memory before anything is written, so an
//! encoding failure leaves the target untouched. A write failure may leave a
//! partial file behind.
//!
//! Codecs hold no state and can be shared across threads.

mod csv;
mod errors;
mod fields;
mod json;
mod storage;
mod xml;

pub use self::csv::{CsvCodec, CSV_HEADER};
pub use errors::{CodecError, CodecResult, EXPORT_ERROR_PREFIX, IMPORT_ERROR_PREFIX};
pub use json::JsonCodec;
pub use storage::{ImportReport, PlayerStorage, Rejected};
pub use xml::XmlCodec;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, error};

use crate::player::Player;

/// Supported interchange formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl Format {
    /// Every supported format
    pub const ALL: [Format; 3] = [Format::Csv, Format::Json, Format::Xml];

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    /// Resolve a format from a file path's extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        Format::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Json => write!(f, "JSON"),
            Format::Xml => write!(f, "XML"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown format '{s}', expected csv, json or xml"))
    }
}

/// Import/export for one file format
pub trait PlayerCodec: Send + Sync {
    /// Format handled by this codec
    fn format(&self) -> Format;

    /// Parse a whole document
    fn decode(&self, text: &str) -> CodecResult<Vec<Player>>;

    /// Render a whole document
    fn encode(&self, players: &[Player]) -> CodecResult<String>;

    /// Read and decode a file
    fn import(&self, path: &Path) -> CodecResult<Vec<Player>> {
        debug!(path = %path.display(), format = %self.format(), "importing players");
        let text = fs::read_to_string(path).map_err(|e| {
            CodecError::import(self.format(), format!("cannot read {}: {e}", path.display()))
        })?;
        self.decode(&text).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "import failed");
        })
    }

    /// Encode and write a file
    fn export(&self, path: &Path, players: &[Player]) -> CodecResult<()> {
        debug!(
            path = %path.display(),
            format = %self.format(),
            count = players.len(),
            "exporting players"
        );
        let text = self.encode(players)?;
        fs::write(path, text).map_err(|e| {
            let err =
                CodecError::export(self.format(), format!("cannot write {}: {e}", path.display()));
            error!(error = %err, "export failed");
            err
        })
    }
}

/// Reject blank input before format-specific parsing
fn ensure_not_empty(format: Format, text: &str) -> CodecResult<()> {
    if text.trim().is_empty() {
        return Err(CodecError::import(format, "source is empty"));
    }
    Ok(())
}
