//! Structured-text codec
//!
//! A JSON array of player objects using the camelCase field names of
//! [`Player`]. `id`, `createdAt`, `updatedAt`, `dominantHand` and
//! `isDeleted` may be omitted on import.

use tracing::debug;

use super::{ensure_not_empty, CodecError, CodecResult, Format, PlayerCodec};
use crate::player::Player;

/// JSON player codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PlayerCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, text: &str) -> CodecResult<Vec<Player>> {
        ensure_not_empty(Format::Json, text)?;
        let players: Vec<Player> = serde_json::from_str(text)
            .map_err(|e| CodecError::import(Format::Json, e.to_string()))?;
        debug!(count = players.len(), "decoded JSON players");
        Ok(players)
    }

    fn encode(&self, players: &[Player]) -> CodecResult<String> {
        serde_json::to_string_pretty(players)
            .map_err(|e| CodecError::export(Format::Json, e.to_string()))
    }
}
