//! Storage facade over the three codecs
//!
//! Besides plain import/export by format, the facade runs bulk imports into
//! the record service. A bulk import is two-staged:
//!
//! 1. the file is decoded, all-or-nothing;
//! 2. each decoded player is saved through the service. A failed save is
//!    recorded in the report and the batch carries on.

use std::path::Path;

use tracing::{info, warn};

use super::{CodecError, CodecResult, CsvCodec, Format, JsonCodec, PlayerCodec, XmlCodec};
use crate::cache::Cache;
use crate::player::Player;
use crate::repository::PlayerRepository;
use crate::service::{PlayerService, ServiceError};

/// A decoded player the service refused
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub player: Player,
    pub error: ServiceError,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Players as persisted, with their assigned ids
    pub saved: Vec<Player>,
    pub rejected: Vec<Rejected>,
}

impl ImportReport {
    /// Number of decoded players
    pub fn total(&self) -> usize {
        self.saved.len() + self.rejected.len()
    }

    /// True if every decoded player was saved
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// One codec per format
#[derive(Debug, Clone, Default)]
pub struct PlayerStorage {
    csv: CsvCodec,
    json: JsonCodec,
    xml: XmlCodec,
}

impl PlayerStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec for a format
    pub fn codec(&self, format: Format) -> &dyn PlayerCodec {
        match format {
            Format::Csv => &self.csv,
            Format::Json => &self.json,
            Format::Xml => &self.xml,
        }
    }

    /// Format implied by a file extension
    pub fn format_for_path(path: &Path) -> Option<Format> {
        Format::from_path(path)
    }

    /// Import a file in the given format
    pub fn import(&self, format: Format, path: &Path) -> CodecResult<Vec<Player>> {
        self.codec(format).import(path)
    }

    /// Export players to a file in the given format
    pub fn export(&self, format: Format, path: &Path, players: &[Player]) -> CodecResult<()> {
        self.codec(format).export(path, players)
    }

    /// Import a file, inferring the format from its extension
    pub fn import_auto(&self, path: &Path) -> CodecResult<Vec<Player>> {
        let format = Self::format_for_path(path).ok_or_else(|| {
            // Report against CSV, the default interchange format
            CodecError::import(
                Format::Csv,
                format!("cannot infer format of {}", path.display()),
            )
        })?;
        self.import(format, path)
    }

    /// Import a file and save every player through the service
    pub fn import_into<R, C>(
        &self,
        service: &PlayerService<R, C>,
        format: Format,
        path: &Path,
    ) -> CodecResult<ImportReport>
    where
        R: PlayerRepository,
        C: Cache<i64, Player>,
    {
        let players = self.import(format, path)?;
        let mut report = ImportReport::default();

        for player in players {
            match service.save(&player) {
                Ok(saved) => report.saved.push(saved),
                Err(error) => {
                    warn!(name = %player.name, error = %error, "skipping player during import");
                    report.rejected.push(Rejected { player, error });
                }
            }
        }

        info!(
            path = %path.display(),
            saved = report.saved.len(),
            rejected = report.rejected.len(),
            "bulk import finished"
        );
        Ok(report)
    }
}
