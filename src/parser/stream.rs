//! Streaming loader for trace files.
//!
//! Trace files are a single JSON array that can hold hundreds of thousands
//! of events. Elements are decoded one at a time through a serde sequence
//! visitor and folded straight into a [`Summary`], so peak memory stays at
//! one event regardless of file size.

use super::schema::TraceEvent;
use crate::aggregator::Summary;
use crate::utils::config::TRACE_FILE_SUFFIX;
use crate::utils::error::TraceError;
use log::debug;
use serde::de::{Deserializer as _, SeqAccess, Visitor};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use walkdir::WalkDir;

/// Load trace data from a file or a directory of trace files
///
/// **Public** - main entry point for summarization
///
/// # Arguments
/// * `location` - A trace file, or a directory walked recursively for `*.json`
///
/// # Returns
/// A freshly populated summary
///
/// # Errors
/// * `TraceError::Io` - The location or a trace file cannot be read
/// * `TraceError::Walk` - The directory walk failed; the load is aborted
/// * `TraceError::NotAnArray` - A trace file's top-level value is not an array
/// * `TraceError::Decode` - A trace file holds a malformed event
pub fn load(location: impl AsRef<Path>) -> Result<Summary, TraceError> {
    let mut summary = Summary::new();
    load_into(location, &mut summary)?;
    Ok(summary)
}

/// Load trace data into an existing summary
///
/// **Public** - lets callers build independent summaries and merge them
pub fn load_into(location: impl AsRef<Path>, summary: &mut Summary) -> Result<(), TraceError> {
    let location = location.as_ref();
    let metadata = std::fs::metadata(location).map_err(|source| TraceError::Io {
        path: location.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return process_file(location, summary);
    }

    debug!("Walking trace directory: {}", location.display());
    for entry in WalkDir::new(location) {
        let entry = entry?;
        if entry.file_type().is_file() && is_trace_file(entry.file_name()) {
            process_file(entry.path(), summary)?;
        }
    }

    Ok(())
}

fn is_trace_file(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().ends_with(TRACE_FILE_SUFFIX)
}

/// Fold every event of one trace file into `summary`
///
/// **Public** - single-file entry point
pub fn process_file(path: impl AsRef<Path>, summary: &mut Summary) -> Result<(), TraceError> {
    let path = path.as_ref();
    debug!("Processing trace file: {}", path.display());

    let file = File::open(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let before = summary.event_count();
    process_reader(file, path, summary)?;

    debug!(
        "Folded {} events from {}",
        summary.event_count() - before,
        path.display()
    );
    Ok(())
}

/// Fold every event of a trace array read from `reader` into `summary`
///
/// **Public** - decoder over any reader; `label` names the source in errors
///
/// Any content after the closing bracket is rejected as a decode error.
pub fn process_reader<R: Read>(
    reader: R,
    label: &Path,
    summary: &mut Summary,
) -> Result<(), TraceError> {
    let mut reader = BufReader::new(reader);

    let is_array = starts_with_array(&mut reader).map_err(|source| TraceError::Io {
        path: label.to_path_buf(),
        source,
    })?;
    if !is_array {
        return Err(TraceError::NotAnArray {
            path: label.to_path_buf(),
        });
    }

    let decode = |source| TraceError::Decode {
        path: label.to_path_buf(),
        source,
    };

    let mut de = serde_json::Deserializer::from_reader(reader);
    (&mut de)
        .deserialize_seq(EventFolder { summary })
        .map_err(decode)?;
    de.end().map_err(decode)?;

    Ok(())
}

/// Skip leading whitespace and report whether the next byte opens an array.
///
/// **Private** - the bracket itself is left unread for the JSON decoder
fn starts_with_array<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }

        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(offset) => {
                let is_array = buf[offset] == b'[';
                reader.consume(offset);
                return Ok(is_array);
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

/// Sequence visitor that folds each element as soon as it is decoded
///
/// **Private** - nothing from an element outlives its fold
struct EventFolder<'a> {
    summary: &'a mut Summary,
}

impl<'de> Visitor<'de> for EventFolder<'_> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of trace events")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let summary = self.summary;
        while let Some(event) = seq.next_element::<TraceEvent>()? {
            summary.add_event(&event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fold(input: &str) -> Result<Summary, TraceError> {
        let mut summary = Summary::new();
        process_reader(Cursor::new(input), Path::new("test.json"), &mut summary)?;
        Ok(summary)
    }

    #[test]
    fn test_starts_with_array_skips_whitespace() {
        let mut reader = Cursor::new(" \n\t [1]");
        assert!(starts_with_array(&mut reader).unwrap());
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "[1]");
    }

    #[test]
    fn test_starts_with_array_rejects_object() {
        let mut reader = Cursor::new("{\"a\": 1}");
        assert!(!starts_with_array(&mut reader).unwrap());
    }

    #[test]
    fn test_starts_with_array_empty_input() {
        let mut reader = Cursor::new("   ");
        assert!(!starts_with_array(&mut reader).unwrap());
    }

    #[test]
    fn test_fold_simple_array() {
        let summary = fold(r#"[{"name":"bind","dur":0},{"name":"bind","dur":5.5}]"#).unwrap();
        assert_eq!(summary.durations_by_name().get("bind"), Some(&5.5));
        assert_eq!(summary.event_count(), 1);
    }

    #[test]
    fn test_empty_array() {
        let summary = fold("[]").unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_object_is_not_an_array() {
        let err = fold(r#"{"traceEvents": []}"#).unwrap_err();
        assert!(matches!(err, TraceError::NotAnArray { .. }));
        assert!(err.to_string().contains("is not an array"));
    }

    #[test]
    fn test_malformed_element_is_decode_error() {
        let err = fold(r#"[{"name":"bind","dur":1.0}, 7]"#).unwrap_err();
        assert!(matches!(err, TraceError::Decode { .. }));
    }

    #[test]
    fn test_wrong_duration_type_is_decode_error() {
        let err = fold(r#"[{"name":"bind","dur":"slow"}]"#).unwrap_err();
        assert!(matches!(err, TraceError::Decode { .. }));
    }

    #[test]
    fn test_truncated_array_is_decode_error() {
        let err = fold(r#"[{"name":"bind","dur":1.0},"#).unwrap_err();
        assert!(matches!(err, TraceError::Decode { .. }));
    }

    #[test]
    fn test_trailing_content_is_decode_error() {
        let err = fold(r#"[{"name":"bind","dur":1.0}] ["#).unwrap_err();
        assert!(matches!(err, TraceError::Decode { .. }));
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        let summary = fold("[{\"name\":\"bind\",\"dur\":1.0}]\n\n").unwrap();
        assert_eq!(summary.event_count(), 1);
    }

    #[test]
    fn test_is_trace_file() {
        assert!(is_trace_file(std::ffi::OsStr::new("trace.1.json")));
        assert!(!is_trace_file(std::ffi::OsStr::new("types.1.json.gz")));
        assert!(!is_trace_file(std::ffi::OsStr::new("tsserver.log")));
    }
}
