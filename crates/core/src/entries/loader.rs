use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::{Entry, EntryError, EntrySet};

/// Header of the artist column in playlist exports.
pub const ARTIST_COLUMN: &str = "Artist Name(s)";
/// Header of the album column in playlist exports.
pub const ALBUM_COLUMN: &str = "Album Name";

/// Load entries from a CSV file on disk.
pub fn load_entries(path: &Path) -> Result<EntrySet, EntryError> {
    let file = File::open(path).map_err(|source| EntryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_entries(file)
}

/// Parse entries from any CSV reader.
///
/// Rows with an empty artist or album are dropped. Columns other than the
/// two required ones are ignored.
pub fn parse_entries<R: Read>(reader: R) -> Result<EntrySet, EntryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let artist_idx = column_index(&headers, ARTIST_COLUMN)?;
    let album_idx = column_index(&headers, ALBUM_COLUMN)?;

    let mut entries = EntrySet::new();
    let mut rows = 0usize;
    let mut dropped = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        rows += 1;

        let artist = record.get(artist_idx).unwrap_or_default();
        let album = record.get(album_idx).unwrap_or_default();
        if artist.is_empty() || album.is_empty() {
            dropped += 1;
            continue;
        }

        entries.insert(Entry::new(artist, album));
    }

    debug!(
        rows,
        dropped,
        unique = entries.len(),
        "Parsed CSV entries"
    );

    Ok(entries)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, EntryError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or(EntryError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_export() {
        let csv = "\
Track Name,Artist Name(s),Album Name,Duration (ms)
One More Time,Daft Punk,Discovery,320357
Aerodynamic,Daft Punk,Discovery,212546
Everything In Its Right Place,Radiohead,Kid A,251000
";
        let entries = parse_entries(csv.as_bytes()).unwrap();
        let collected: Vec<_> = entries.iter().cloned().collect();
        assert_eq!(
            collected,
            vec![
                Entry::new("Daft Punk", "Discovery"),
                Entry::new("Radiohead", "Kid A"),
            ]
        );
    }

    #[test]
    fn test_rows_with_empty_fields_are_dropped() {
        let csv = "\
Artist Name(s),Album Name
Daft Punk,
,Kid A
Radiohead,Kid A
";
        let entries = parse_entries(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let csv = "\
Artist Name(s),Album Name
\"Crosby, Stills, Nash & Young\",\"Déjà Vu\"
";
        let entries = parse_entries(csv.as_bytes()).unwrap();
        let entry = entries.iter().next().unwrap();
        assert_eq!(entry.artist, "Crosby, Stills, Nash & Young");
        assert_eq!(entry.album, "Déjà Vu");
    }

    #[test]
    fn test_missing_album_column() {
        let csv = "Artist Name(s),Track Name\nDaft Punk,One More Time\n";
        let result = parse_entries(csv.as_bytes());
        assert!(matches!(
            result,
            Err(EntryError::MissingColumn(ALBUM_COLUMN))
        ));
    }

    #[test]
    fn test_byte_order_mark_on_first_header() {
        let csv = "\u{feff}Artist Name(s),Album Name\nDaft Punk,Discovery\n";
        let entries = parse_entries(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_load_entries_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Artist Name(s),Album Name").unwrap();
        writeln!(file, "Björk,Homogenic").unwrap();

        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_load_entries_missing_file() {
        let result = load_entries(Path::new("/nonexistent/export.csv"));
        assert!(matches!(result, Err(EntryError::Io { .. })));
    }
}
