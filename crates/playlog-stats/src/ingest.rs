//! Streaming history ingestion from JSON export documents.
//!
//! Each document is a JSON array of objects with `artistName`, `trackName`,
//! `endTime` and `msPlayed`. Documents are concatenated in the order given.
//! Any malformed record fails the whole load.

use crate::event::PlayEvent;
use crate::store::EventStore;
use chrono::NaiveDateTime;
use playlog_common::{PlaylogError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Timestamp layouts accepted for `endTime`.
const END_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// One record exactly as it appears in an export document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayRecord {
    artist_name: Option<String>,
    track_name: Option<String>,
    end_time: Option<String>,
    ms_played: Option<i64>,
}

/// A named JSON document held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Name used in error messages (usually the file name)
    pub name: String,
    /// Raw JSON text
    pub contents: String,
}

impl Document {
    /// Creates a document from a name and its JSON text.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Reads a document from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), contents))
    }
}

/// Parses an `endTime` value in the reporting time zone.
pub fn parse_end_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    END_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parses every record of one document, in order.
#[instrument(skip(document), fields(document = %document.name))]
pub fn parse_document(document: &Document) -> Result<Vec<PlayEvent>> {
    let malformed = |index: usize, message: String| PlaylogError::malformed_record(&document.name, index, message);

    let value: Value = serde_json::from_str(&document.contents)?;
    let Value::Array(records) = value else {
        return Err(PlaylogError::malformed_record(
            &document.name,
            0,
            "document is not a JSON array of records",
        ));
    };

    let mut events = Vec::with_capacity(records.len());
    let mut zero_duration = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let raw: RawPlayRecord =
            serde_json::from_value(record).map_err(|e| malformed(index, e.to_string()))?;
        let event = convert_record(raw).map_err(|message| malformed(index, message))?;

        if event.ms_played() == 0 {
            zero_duration += 1;
        }
        events.push(event);
    }

    if zero_duration > 0 {
        warn!(zero_duration, "Document contains plays with zero duration");
    }
    debug!(records = events.len(), "Parsed document");
    Ok(events)
}

fn convert_record(raw: RawPlayRecord) -> std::result::Result<PlayEvent, String> {
    let artist = raw.artist_name.ok_or("missing field `artistName`")?;
    let track = raw.track_name.ok_or("missing field `trackName`")?;
    let end_time = raw.end_time.ok_or("missing field `endTime`")?;
    let ms_played = raw.ms_played.ok_or("missing field `msPlayed`")?;

    let end_time =
        parse_end_time(&end_time).ok_or_else(|| format!("unparseable `endTime` value `{end_time}`"))?;
    let ms_played =
        u64::try_from(ms_played).map_err(|_| format!("negative `msPlayed` value {ms_played}"))?;

    PlayEvent::new(artist, track, end_time, ms_played).map_err(|e| e.to_string())
}

/// Builds a store from documents, concatenated in the order given.
pub fn load_documents<'a, I>(documents: I) -> Result<EventStore>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut events = Vec::new();
    let mut count = 0usize;

    for document in documents {
        events.extend(parse_document(document)?);
        count += 1;
    }

    info!(documents = count, events = events.len(), "Loaded streaming history");
    Ok(EventStore::new(events))
}

/// Reads and concatenates documents from disk, in the order given.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<EventStore> {
    let documents = paths
        .iter()
        .map(Document::read)
        .collect::<Result<Vec<_>>>()?;
    load_documents(&documents)
}
