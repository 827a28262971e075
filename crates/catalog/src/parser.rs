//! Parser for snapshot files.
//!
//! A snapshot directory holds four JSON arrays:
//! - brands.json: brand profiles
//! - talent.json: talent profiles
//! - events.json: events with a nested `host`
//! - users.json: viewer accounts
//!
//! Field names are camelCase. The profile kind is not read from the record;
//! it comes from the file the record sits in.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a JSON array of records from `path`
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(CatalogError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a profile file, stamping every record with `kind`
pub fn parse_profiles(path: &Path, kind: PartyKind) -> Result<Vec<Profile>> {
    let mut profiles: Vec<Profile> = read_records(path)?;
    for profile in &mut profiles {
        profile.kind = kind;
    }
    Ok(profiles)
}

/// Parse the events file
pub fn parse_events(path: &Path) -> Result<Vec<Event>> {
    read_records(path)
}

/// Parse the users file
pub fn parse_viewers(path: &Path) -> Result<Vec<Viewer>> {
    read_records(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_profiles_assigns_kind_and_partner_aliases() {
        let file = write_temp(
            r#"[{
                "id": "1",
                "name": "Monster Energy",
                "category": "Beverage",
                "description": "Energy drinks",
                "location": "California",
                "talentPartners": ["French Montana", "Don Toliver"],
                "pastEvents": ["X Games 2024"],
                "visibleTo": ["Sports", "Music"]
            }]"#,
        );

        let profiles = parse_profiles(file.path(), PartyKind::Brand).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].kind, PartyKind::Brand);
        assert_eq!(profiles[0].partners.len(), 2);
        assert_eq!(profiles[0].visible_to, vec!["Sports", "Music"]);
        assert!(profiles[0].image.is_none());
    }

    #[test]
    fn test_parse_events() {
        let file = write_temp(
            r#"[{
                "id": "1",
                "title": "UNO Tournament",
                "date": "2025-05-05T20:00:00Z",
                "location": "New York, NY",
                "description": "High-stakes UNO",
                "host": { "kind": "talent", "id": "1", "name": "Pharrell Williams" },
                "rsvps": ["user1", "user2"],
                "visibleTo": ["Music"],
                "eventType": "Party"
            }]"#,
        );

        let events = parse_events(file.path()).unwrap();
        assert_eq!(events[0].host.kind, PartyKind::Talent);
        assert_eq!(events[0].event_type, EventType::Party);
        assert!(events[0].applications.is_empty());
        assert_eq!(events[0].rsvps.len(), 2);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_events(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::MissingFile { .. })));
    }

    #[test]
    fn test_parse_malformed_json() {
        let file = write_temp(r#"[{"id": "1", "title": }]"#);
        let result = parse_events(file.path());
        assert!(matches!(result, Err(CatalogError::Json { .. })));
    }

    #[test]
    fn test_parse_unknown_event_type_is_an_error() {
        let file = write_temp(
            r#"[{
                "id": "1",
                "title": "x",
                "date": "2025-05-05T20:00:00Z",
                "host": { "kind": "brand", "id": "1", "name": "x" },
                "eventType": "Rave"
            }]"#,
        );
        assert!(parse_events(file.path()).is_err());
    }
}
