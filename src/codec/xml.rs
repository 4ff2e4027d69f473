//! Markup codec
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <players>
//!   <player id="1">
//!     <name>Novak Djokovic</name>
//!     <country>Serbia</country>
//!     <weight>77</weight>
//!     <height>188</height>
//!     <dominantHand>RIGHT_HANDED</dominantHand>
//!     <points>12030</points>
//!     <birthDate>1987-05-22</birthDate>
//!     <createdAt>2024-09-23T10:00:00</createdAt>
//!     <updatedAt>2024-09-23T10:00:00</updatedAt>
//!     <isDeleted>false</isDeleted>
//!   </player>
//! </players>
//! ```
//!
//! On import the `id` attribute, `dominantHand`, the timestamps and
//! `isDeleted` are optional. Unknown child elements are skipped together with
//! everything nested inside them. Text inside a field is taken verbatim;
//! whitespace between elements is ignored.

use std::collections::HashMap;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use super::fields::{parse_birth_date, parse_timestamp, parse_value};
use super::{ensure_not_empty, CodecError, CodecResult, Format, PlayerCodec};
use crate::player::{self, Handedness, Player, DATE_FORMAT, UNASSIGNED_ID};

const ROOT_TAG: &str = "players";
const PLAYER_TAG: &str = "player";

const FIELD_TAGS: [&str; 10] = [
    "name",
    "country",
    "weight",
    "height",
    "dominantHand",
    "points",
    "birthDate",
    "createdAt",
    "updatedAt",
    "isDeleted",
];

/// XML player codec
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl PlayerCodec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn decode(&self, text: &str) -> CodecResult<Vec<Player>> {
        ensure_not_empty(Format::Xml, text)?;
        let players =
            parse_document(text).map_err(|reason| CodecError::import(Format::Xml, reason))?;
        debug!(count = players.len(), "decoded XML players");
        Ok(players)
    }

    fn encode(&self, players: &[Player]) -> CodecResult<String> {
        let bytes =
            write_document(players).map_err(|e| CodecError::export(Format::Xml, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CodecError::export(Format::Xml, e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootState {
    Before,
    Open,
    Closed,
}

/// Child elements collected for one `<player>`
struct XmlEntry {
    id: i64,
    fields: HashMap<String, String>,
}

impl XmlEntry {
    fn open(tag: &BytesStart<'_>, name: &str) -> Result<Self, String> {
        if name != PLAYER_TAG {
            return Err(format!("expected <{PLAYER_TAG}>, found <{name}>"));
        }

        let id = match tag.try_get_attribute("id").map_err(|e| e.to_string())? {
            Some(attr) => {
                let raw = attr.unescape_value().map_err(|e| e.to_string())?;
                parse_value("id", &raw)?
            }
            None => UNASSIGNED_ID,
        };

        Ok(Self {
            id,
            fields: HashMap::new(),
        })
    }

    fn set(&mut self, name: &str, value: String) {
        self.fields.insert(name.to_string(), value);
    }

    fn append(&mut self, name: &str, value: &str) {
        self.fields.entry(name.to_string()).or_default().push_str(value);
    }

    fn required(&mut self, name: &str) -> Result<String, String> {
        self.fields
            .remove(name)
            .ok_or_else(|| format!("player {} is missing <{name}>", self.id))
    }

    fn optional(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    fn into_player(mut self) -> Result<Player, String> {
        let stamp = player::now();
        let created_at = match self.optional("createdAt") {
            Some(raw) => parse_timestamp("createdAt", &raw)?,
            None => stamp,
        };
        let updated_at = match self.optional("updatedAt") {
            Some(raw) => parse_timestamp("updatedAt", &raw)?,
            None => stamp,
        };
        let is_deleted = match self.optional("isDeleted") {
            Some(raw) => parse_value("isDeleted", &raw)?,
            None => false,
        };

        Ok(Player {
            id: self.id,
            name: self.required("name")?,
            country: self.required("country")?,
            weight: parse_value("weight", &self.required("weight")?)?,
            height: parse_value("height", &self.required("height")?)?,
            dominant_hand: self
                .optional("dominantHand")
                .map(|raw| Handedness::from_token(&raw))
                .unwrap_or_default(),
            points: parse_value("points", &self.required("points")?)?,
            birth_date: parse_birth_date(&self.required("birthDate")?)?,
            created_at,
            updated_at,
            is_deleted,
        })
    }
}

fn element_name(tag: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(tag.name().as_ref()).into_owned()
}

fn expect_root(name: &str) -> Result<(), String> {
    if name == ROOT_TAG {
        Ok(())
    } else {
        Err(format!("expected <{ROOT_TAG}> root element, found <{name}>"))
    }
}

fn parse_document(text: &str) -> Result<Vec<Player>, String> {
    let mut reader = Reader::from_str(text);

    let mut players = Vec::new();
    let mut root = RootState::Before;
    let mut entry: Option<XmlEntry> = None;
    let mut field: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(tag) => {
                let name = element_name(&tag);
                match root {
                    RootState::Before => {
                        expect_root(&name)?;
                        root = RootState::Open;
                    }
                    RootState::Closed => {
                        return Err(format!("unexpected <{name}> after root element"))
                    }
                    RootState::Open => match entry {
                        None => entry = Some(XmlEntry::open(&tag, &name)?),
                        Some(_) if field.is_none() && !FIELD_TAGS.contains(&name.as_str()) => {
                            reader.read_to_end(tag.name()).map_err(|e| {
                                format!("malformed <{name}> element: {e}")
                            })?;
                        }
                        Some(_) if field.is_none() => field = Some(name),
                        Some(_) => return Err(format!("unexpected <{name}> inside a field")),
                    },
                }
            }
            Event::Empty(tag) => {
                let name = element_name(&tag);
                match root {
                    RootState::Before => {
                        expect_root(&name)?;
                        root = RootState::Closed;
                    }
                    RootState::Closed => {
                        return Err(format!("unexpected <{name}/> after root element"))
                    }
                    RootState::Open => match entry.as_mut() {
                        None => players.push(XmlEntry::open(&tag, &name)?.into_player()?),
                        Some(current) => current.set(&name, String::new()),
                    },
                }
            }
            Event::Text(content) => {
                let value = content
                    .unescape()
                    .map_err(|e| format!("invalid text content: {e}"))?;
                match (field.as_deref(), entry.as_mut()) {
                    (Some(name), Some(current)) => current.append(name, &value),
                    _ if value.trim().is_empty() => {}
                    _ => return Err(format!("unexpected text '{}'", value.trim())),
                }
            }
            Event::CData(content) => {
                let value = String::from_utf8_lossy(&content).into_owned();
                match (field.as_deref(), entry.as_mut()) {
                    (Some(name), Some(current)) => current.append(name, &value),
                    _ => return Err("unexpected CDATA section".to_string()),
                }
            }
            Event::End(_) => {
                if let Some(name) = field.take() {
                    // `<name></name>` produces no text event
                    if let Some(current) = entry.as_mut() {
                        current.fields.entry(name).or_default();
                    }
                } else if let Some(current) = entry.take() {
                    players.push(current.into_player()?);
                } else {
                    root = RootState::Closed;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match root {
        RootState::Before => Err(format!("missing <{ROOT_TAG}> root element")),
        RootState::Open => Err(format!("unclosed <{ROOT_TAG}> root element")),
        RootState::Closed => Ok(players),
    }
}

fn write_document(players: &[Player]) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if players.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(ROOT_TAG)))?;
        return Ok(writer.into_inner());
    }

    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
    for player in players {
        let id = player.id.to_string();
        let mut tag = BytesStart::new(PLAYER_TAG);
        tag.push_attribute(("id", id.as_str()));
        writer.write_event(Event::Start(tag))?;

        write_field(&mut writer, "name", &player.name)?;
        write_field(&mut writer, "country", &player.country)?;
        write_field(&mut writer, "weight", &player.weight.to_string())?;
        write_field(&mut writer, "height", &player.height.to_string())?;
        write_field(&mut writer, "dominantHand", player.dominant_hand.as_token())?;
        write_field(&mut writer, "points", &player.points.to_string())?;
        write_field(
            &mut writer,
            "birthDate",
            &player.birth_date.format(DATE_FORMAT).to_string(),
        )?;
        write_field(&mut writer, "createdAt", &player::format_date_time(&player.created_at))?;
        write_field(&mut writer, "updatedAt", &player::format_date_time(&player.updated_at))?;
        write_field(&mut writer, "isDeleted", &player.is_deleted.to_string())?;

        writer.write_event(Event::End(BytesEnd::new(PLAYER_TAG)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    Ok(writer.into_inner())
}

fn write_field(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<players>
  <player id="1">
    <name>Novak Djokovic</name>
    <country>Serbia</country>
    <weight>77</weight>
    <height>188</height>
    <dominantHand>DIESTRO</dominantHand>
    <points>12030</points>
    <birthDate>1987-05-22</birthDate>
    <createdAt>2024-09-23T10:00:00</createdAt>
    <nickname>Nole</nickname>
  </player>
  <player>
    <name>Jannik &amp; Co</name>
    <country>Italy</country>
    <weight>76</weight>
    <height>191.5</height>
    <points>11830</points>
    <birthDate>2001-08-16</birthDate>
  </player>
</players>"#;

    #[test]
    fn test_decode_sample() {
        let players = XmlCodec.decode(SAMPLE).unwrap();
        assert_eq!(players.len(), 2);

        let novak = &players[0];
        assert_eq!(novak.id, 1);
        assert_eq!(novak.name, "Novak Djokovic");
        assert_eq!(novak.dominant_hand, Handedness::RightHanded);
        assert_eq!(novak.birth_date, NaiveDate::from_ymd_opt(1987, 5, 22).unwrap());
        assert_eq!(
            novak.created_at,
            player::parse_date_time("2024-09-23T10:00:00").unwrap()
        );

        let jannik = &players[1];
        assert_eq!(jannik.id, UNASSIGNED_ID);
        assert_eq!(jannik.name, "Jannik & Co");
        assert_eq!(jannik.height, 191.5);
        assert_eq!(jannik.dominant_hand, Handedness::Unknown);
    }

    #[test]
    fn test_empty_root_is_empty_success() {
        assert!(XmlCodec.decode("<players/>").unwrap().is_empty());
        assert!(XmlCodec.decode("<players></players>").unwrap().is_empty());
    }

    #[test]
    fn test_structural_failures() {
        for text in [
            "",
            "<?xml version=\"1.0\"?>",
            "<roster></roster>",
            "<players><player id=\"1\"><name>A</name>",
            "<players><player><name>A</wrong></player></players>",
            "<players></players><players/>",
            "<players><player id=\"x\"/></players>",
        ] {
            let err = XmlCodec.decode(text).unwrap_err();
            assert_eq!(err.code(), "IMPORT_ERROR", "input: {text}");
        }
    }

    #[test]
    fn test_missing_field_fails() {
        let text = "<players><player id=\"4\"><name>A</name></player></players>";
        let err = XmlCodec.decode(text).unwrap_err();
        assert!(err.to_string().contains("missing <country>"));
    }

    #[test]
    fn test_nested_unknown_element_is_skipped() {
        let text = "<players><player id=\"2\">\
            <meta><coach>X</coach><team><name>Ignored</name></team></meta>\
            <name>Novak</name><country>Serbia</country><weight>77</weight>\
            <height>188</height><points>1</points><birthDate>1987-05-22</birthDate>\
            </player></players>";
        let players = XmlCodec.decode(text).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Novak");
    }

    #[test]
    fn test_field_whitespace_is_preserved() {
        let mut padded = Player::new(
            " Novak Djokovic ",
            " ",
            77,
            188.0,
            Handedness::RightHanded,
            1,
            NaiveDate::from_ymd_opt(1987, 5, 22).unwrap(),
        );
        padded.id = 1;
        let text = XmlCodec.encode(std::slice::from_ref(&padded)).unwrap();
        let decoded = XmlCodec.decode(&text).unwrap();
        assert_eq!(decoded[0].name, " Novak Djokovic ");
        assert_eq!(decoded[0].country, " ");
        assert_eq!(decoded, vec![padded]);
    }

    #[test]
    fn test_encode_empty_list() {
        let text = XmlCodec.encode(&[]).unwrap();
        assert!(text.contains("<players/>"));
        assert!(XmlCodec.decode(&text).unwrap().is_empty());
    }

    #[test]
    fn test_encode_escapes_text() {
        let player = Player::new(
            "A <B> & \"C\"",
            "D",
            70,
            180.0,
            Handedness::Ambidextrous,
            1,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        );
        let text = XmlCodec.encode(std::slice::from_ref(&player)).unwrap();
        assert!(text.contains("&lt;B&gt;"));
        assert_eq!(XmlCodec.decode(&text).unwrap(), vec![player]);
    }
}
