//! Delimited-text codec
//!
//! Layout:
//!
//! ```text
//! id,name,country,height,weight,points,hand,birth_date
//! 1,Novak Djokovic,Serbia,188,77,12030,DIESTRO,1987-05-22
//! ```
//!
//! The header row is required and must have eight columns; its names are not
//! checked. Handedness uses the CSV codes (`DIESTRO`, `ZURDO`,
//! `AMBIDIESTRO`). Timestamps are not stored, so imported players are stamped
//! with the import time. Blank lines are skipped.
//!
//! Quoting follows RFC 4180. A field is quoted on export when it contains a
//! comma, a double quote, a line break, or leading or trailing whitespace;
//! inner quotes are doubled. On import, unquoted fields are trimmed and quoted
//! fields are taken verbatim, line breaks included.

use tracing::debug;

use super::fields::{parse_birth_date, parse_value};
use super::{ensure_not_empty, CodecError, CodecResult, Format, PlayerCodec};
use crate::player::{self, Handedness, Player, DATE_FORMAT};

/// Header written on export
pub const CSV_HEADER: &str = "id,name,country,height,weight,points,hand,birth_date";

const COLUMNS: usize = 8;

/// CSV player codec
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl PlayerCodec for CsvCodec {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn decode(&self, text: &str) -> CodecResult<Vec<Player>> {
        ensure_not_empty(Format::Csv, text)?;

        let mut records = read_records(text)
            .map_err(|reason| CodecError::import(Format::Csv, reason))?
            .into_iter();

        let header = records
            .next()
            .ok_or_else(|| CodecError::import(Format::Csv, "missing header row"))?;
        if header.fields.len() != COLUMNS {
            return Err(CodecError::import(
                Format::Csv,
                format!("header has {} columns, expected {COLUMNS}", header.fields.len()),
            ));
        }

        let mut players = Vec::new();
        for record in records {
            let player = parse_row(&record.fields).map_err(|reason| {
                CodecError::import(Format::Csv, format!("line {}: {reason}", record.line))
            })?;
            players.push(player);
        }

        debug!(count = players.len(), "decoded CSV players");
        Ok(players)
    }

    fn encode(&self, players: &[Player]) -> CodecResult<String> {
        let mut out = String::with_capacity(64 * (players.len() + 1));
        out.push_str(CSV_HEADER);
        out.push('\n');

        for player in players {
            let row = [
                player.id.to_string(),
                escape(&player.name),
                escape(&player.country),
                player.height.to_string(),
                player.weight.to_string(),
                player.points.to_string(),
                player.dominant_hand.as_csv_code().to_string(),
                player.birth_date.format(DATE_FORMAT).to_string(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }

        Ok(out)
    }
}

fn parse_row(fields: &[String]) -> Result<Player, String> {
    let [id, name, country, height, weight, points, hand, birth_date] = fields else {
        return Err(format!(
            "expected {COLUMNS} columns, found {}",
            fields.len()
        ));
    };

    let stamp = player::now();
    Ok(Player {
        id: parse_value("id", id)?,
        name: name.clone(),
        country: country.clone(),
        weight: parse_value("weight", weight)?,
        height: parse_value("height", height)?,
        dominant_hand: Handedness::from_csv_code(hand),
        points: parse_value("points", points)?,
        birth_date: parse_birth_date(birth_date)?,
        created_at: stamp,
        updated_at: stamp,
        is_deleted: false,
    })
}

/// One parsed row and the line it starts on
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Field being accumulated by `read_records`
#[derive(Default)]
struct FieldBuf {
    text: String,
    quoted: bool,
}

impl FieldBuf {
    fn finish(&mut self) -> String {
        let field = std::mem::take(self);
        if field.quoted {
            field.text
        } else {
            field.text.trim().to_string()
        }
    }

    fn is_blank(&self) -> bool {
        !self.quoted && self.text.trim().is_empty()
    }
}

/// Split a whole document into records.
///
/// Newlines end a record only outside quotes. A record made of a single blank
/// unquoted field is a blank line and is dropped.
fn read_records(text: &str) -> Result<Vec<Record>, String> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = FieldBuf::default();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.text.push('"');
                }
                '"' => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    current.text.push(c);
                }
            }
            continue;
        }

        match c {
            '"' if !current.quoted && current.text.trim().is_empty() => {
                current.text.clear();
                current.quoted = true;
                in_quotes = true;
            }
            ',' => fields.push(current.finish()),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                end_record(&mut records, &mut fields, &mut current, record_line);
                line += 1;
                record_line = line;
            }
            _ => current.text.push(c),
        }
    }

    if in_quotes {
        return Err(format!("line {record_line}: unterminated quoted field"));
    }
    end_record(&mut records, &mut fields, &mut current, record_line);
    Ok(records)
}

fn end_record(
    records: &mut Vec<Record>,
    fields: &mut Vec<String>,
    current: &mut FieldBuf,
    line: usize,
) {
    if fields.is_empty() && current.is_blank() {
        *current = FieldBuf::default();
        return;
    }
    fields.push(current.finish());
    records.push(Record {
        line,
        fields: std::mem::take(fields),
    });
}

fn escape(value: &str) -> String {
    let needs_quotes = value.contains([',', '"', '\n', '\r']) || value.trim() != value;
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "id,nombre,pais,altura,peso,puntos,mano,fecha_nacimiento\n\
        1,Novak Djokovic,Serbia,188,77,12030,DIESTRO,1987-05-22\n\
        2,Daniil Medvedev,Rusia,198,83,10370,DIESTRO,1996-02-11\n\
        3,Rafael Nadal,España,185,85,8270,ZURDO,1986-06-03";

    #[test]
    fn test_decode_sample() {
        let players = CsvCodec.decode(SAMPLE).unwrap();
        assert_eq!(players.len(), 3);

        let rafa = &players[2];
        assert_eq!(rafa.id, 3);
        assert_eq!(rafa.name, "Rafael Nadal");
        assert_eq!(rafa.country, "España");
        assert_eq!(rafa.height, 185.0);
        assert_eq!(rafa.weight, 85);
        assert_eq!(rafa.points, 8270);
        assert_eq!(rafa.dominant_hand, Handedness::LeftHanded);
        assert_eq!(rafa.birth_date, NaiveDate::from_ymd_opt(1986, 6, 3).unwrap());
    }

    #[test]
    fn test_header_only_is_empty_success() {
        assert!(CsvCodec.decode(CSV_HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        for text in ["", "   \n\n"] {
            let err = CsvCodec.decode(text).unwrap_err();
            assert!(matches!(err, CodecError::Import { format: Format::Csv, .. }));
        }
    }

    #[test]
    fn test_short_header_fails() {
        let err = CsvCodec.decode("id,nombre,pais\n1,InvalidData").unwrap_err();
        assert!(err.to_string().contains("header has 3 columns"));
    }

    #[test]
    fn test_bad_row_fails_whole_import() {
        let text = format!("{CSV_HEADER}\n1,A,B,180,70,10,DIESTRO,1990-01-01\n2,C,D,180,70,10,ZURDO,not-a-date");
        let err = CsvCodec.decode(&text).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("birth date"));
    }

    #[test]
    fn test_unknown_hand_code_is_kept() {
        let text = format!("{CSV_HEADER}\n1,A,B,180,70,10,CUALQUIERA,1990-01-01");
        let players = CsvCodec.decode(&text).unwrap();
        assert_eq!(players[0].dominant_hand, Handedness::Unknown);
    }

    #[test]
    fn test_quoted_fields() {
        let records = read_records(r#"1,"Smith, ""Jr""",USA"#).unwrap();
        assert_eq!(records[0].fields, vec!["1", r#"Smith, "Jr""#, "USA"]);
        assert!(read_records(r#"1,"open"#).is_err());
    }

    #[test]
    fn test_quoted_fields_keep_whitespace_and_line_breaks() {
        let records = read_records("a, b ,\" c \"\r\n\n\"x\ny\",z\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[0].fields, vec!["a", "b", " c "]);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[1].fields, vec!["x\ny", "z"]);
    }

    #[test]
    fn test_padded_and_multiline_names_round_trip() {
        let player = |name: &str| {
            Player::new(
                name,
                " Serbia",
                77,
                188.0,
                Handedness::RightHanded,
                1,
                NaiveDate::from_ymd_opt(1987, 5, 22).unwrap(),
            )
            .with_id(1)
        };
        let players = vec![player(" Novak Djokovic "), player(" "), player("Two\nLines")];

        let text = CsvCodec.encode(&players).unwrap();
        let decoded = CsvCodec.decode(&text).unwrap();

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].name, " Novak Djokovic ");
        assert_eq!(decoded[0].country, " Serbia");
        assert_eq!(decoded[1].name, " ");
        assert_eq!(decoded[2].name, "Two\nLines");
    }

    #[test]
    fn test_encode_writes_header_and_codes() {
        let player = Player::new(
            "Novak Djokovic",
            "Serbia",
            77,
            188.0,
            Handedness::RightHanded,
            12030,
            NaiveDate::from_ymd_opt(1987, 5, 22).unwrap(),
        )
        .with_id(1);
        let text = CsvCodec.encode(&[player]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("1,Novak Djokovic,Serbia,188,77,12030,DIESTRO,1987-05-22"));
    }

    #[test]
    fn test_row_after_multiline_field_reports_its_own_line() {
        let text = format!("{CSV_HEADER}\n1,\"A\nB\",C,180,70,10,DIESTRO,1990-01-01\n2,D,E,tall,70,10,ZURDO,1990-01-01");
        let err = CsvCodec.decode(&text).unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }
}
