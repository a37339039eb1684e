//! Input schema for compiler trace events.
//!
//! Only the fields the aggregator reads are modeled. Everything else in
//! an event object is skipped by serde without being materialized.
//!
//! Both types decode from JSON objects only. A later duplicate key
//! overwrites the earlier value.

use crate::utils::config::{FILE_ATTRIBUTION_KEYS, UNKNOWN_EVENT_NAME};
use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// A single element of a trace array
#[derive(Debug, Clone, Default)]
pub struct TraceEvent {
    /// Operation being measured (`name`)
    pub name: Option<String>,

    /// Duration in milliseconds (`dur`); absent means zero
    pub duration: Option<f64>,

    /// Optional file attribution fields (`args`)
    pub attributes: Option<FileAttributes>,
}

impl TraceEvent {
    /// Event name, falling back to `"unknown"` when absent or empty
    pub fn event_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_EVENT_NAME,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Lower-cased file this event is attributed to, if any
    pub fn attributed_file(&self) -> Option<String> {
        self.attributes.as_ref()?.attributed_file()
    }
}

impl<'de> Deserialize<'de> for TraceEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TraceEventVisitor)
    }
}

struct TraceEventVisitor;

impl<'de> Visitor<'de> for TraceEventVisitor {
    type Value = TraceEvent;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a trace event object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut event = TraceEvent::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => event.name = map.next_value()?,
                "dur" => event.duration = map.next_value()?,
                "args" => event.attributes = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(event)
    }
}

/// The attribute keys that can carry a file path.
///
/// Values are kept as raw JSON because the trace format does not promise
/// they are strings; non-string values are skipped during attribution.
#[derive(Debug, Clone, Default)]
pub struct FileAttributes {
    pub path: Option<Value>,
    pub file_name: Option<Value>,
    pub containing_file_name: Option<Value>,
    pub config_file_path: Option<Value>,
}

impl FileAttributes {
    /// Look up an attribute by its trace key
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            "path" => self.path.as_ref(),
            "fileName" => self.file_name.as_ref(),
            "containingFileName" => self.containing_file_name.as_ref(),
            "configFilePath" => self.config_file_path.as_ref(),
            _ => None,
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Option<Value>> {
        match key {
            "path" => Some(&mut self.path),
            "fileName" => Some(&mut self.file_name),
            "containingFileName" => Some(&mut self.containing_file_name),
            "configFilePath" => Some(&mut self.config_file_path),
            _ => None,
        }
    }

    /// Resolve the attributed file.
    ///
    /// **Public** - used by the aggregator fold step
    ///
    /// The first key (in priority order) holding a string wins, even if a
    /// lower-priority key holds a different path. An empty winning string
    /// means no attribution.
    pub fn attributed_file(&self) -> Option<String> {
        FILE_ATTRIBUTION_KEYS
            .iter()
            .find_map(|key| self.get(key).and_then(Value::as_str))
            .filter(|file| !file.is_empty())
            .map(str::to_lowercase)
    }
}

impl<'de> Deserialize<'de> for FileAttributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FileAttributesVisitor)
    }
}

struct FileAttributesVisitor;

impl<'de> Visitor<'de> for FileAttributesVisitor {
    type Value = FileAttributes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of event arguments")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut attributes = FileAttributes::default();
        while let Some(key) = map.next_key::<String>()? {
            match attributes.slot(&key) {
                Some(slot) => *slot = map.next_value()?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> TraceEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default() {
        let e = event(json!({}));
        assert_eq!(e.event_name(), "unknown");
        assert_eq!(e.duration(), 0.0);
        assert!(e.attributed_file().is_none());
    }

    #[test]
    fn test_null_fields_default() {
        let e = event(json!({"name": null, "dur": null, "args": null}));
        assert_eq!(e.event_name(), "unknown");
        assert_eq!(e.duration(), 0.0);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let e = event(json!({"name": "checkSourceFile", "dur": 3.0, "ph": "X", "ts": 12, "pid": 1}));
        assert_eq!(e.event_name(), "checkSourceFile");
        assert_eq!(e.duration(), 3.0);
    }

    #[test]
    fn test_attribution_skips_non_string_values() {
        let e = event(json!({
            "dur": 1.0,
            "args": {"path": 42, "fileName": null, "containingFileName": "/src/Main.ts"}
        }));
        assert_eq!(e.attributed_file().as_deref(), Some("/src/main.ts"));
    }

    #[test]
    fn test_attribution_config_file_path() {
        let e = event(json!({"dur": 1.0, "args": {"configFilePath": "/repo/TSCONFIG.json"}}));
        assert_eq!(e.attributed_file().as_deref(), Some("/repo/tsconfig.json"));
    }

    #[test]
    fn test_empty_winning_string_is_no_attribution() {
        let e = event(json!({"dur": 1.0, "args": {"path": "", "fileName": "b.ts"}}));
        assert!(e.attributed_file().is_none());
    }

    #[test]
    fn test_get_unknown_key() {
        let attrs = FileAttributes::default();
        assert!(attrs.get("kind").is_none());
    }

    #[test]
    fn test_array_event_rejected() {
        assert!(serde_json::from_value::<TraceEvent>(json!(["bind", 5.0])).is_err());
    }

    #[test]
    fn test_array_args_rejected() {
        let result = serde_json::from_value::<TraceEvent>(json!({"dur": 1.0, "args": ["Foo.ts"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let e: TraceEvent =
            serde_json::from_str(r#"{"name":"a","name":"b","dur":1,"dur":2.5,"args":{"path":"x.ts","path":"Y.ts"}}"#)
                .unwrap();
        assert_eq!(e.event_name(), "b");
        assert_eq!(e.duration(), 2.5);
        assert_eq!(e.attributed_file().as_deref(), Some("y.ts"));
    }

    #[test]
    fn test_null_attribute_clears_earlier_value() {
        let e: TraceEvent = serde_json::from_str(r#"{"dur":1,"args":{"path":"x.ts","path":null,"fileName":"f.ts"}}"#).unwrap();
        assert_eq!(e.attributed_file().as_deref(), Some("f.ts"));
    }
}
