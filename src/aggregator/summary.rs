//! Aggregation state for one summarization run.
//!
//! Durations are accumulated by event name and, when an event carries a
//! file attribute, by lower-cased file path. Summaries built from disjoint
//! parts of a trace corpus can be merged by key-wise addition.

use crate::parser::schema::TraceEvent;
use std::collections::HashMap;

/// Cumulative durations for one trace corpus
///
/// **Public** - produced by the loader, consumed by the report writer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    durations_by_name: HashMap<String, f64>,
    durations_by_file: HashMap<String, f64>,
    event_count: u64,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the summary
    ///
    /// **Public** - the only way durations enter a summary
    ///
    /// Events with a non-positive duration are dropped. Every kept event
    /// counts toward its name bucket and toward at most one file bucket.
    pub fn add_event(&mut self, event: &TraceEvent) {
        let duration = event.duration();
        if duration.is_nan() || duration <= 0.0 {
            return;
        }

        *self
            .durations_by_name
            .entry(event.event_name().to_string())
            .or_insert(0.0) += duration;

        if let Some(file) = event.attributed_file() {
            *self.durations_by_file.entry(file).or_insert(0.0) += duration;
        }

        self.event_count += 1;
    }

    /// Add another summary's totals into this one
    ///
    /// **Public** - combines summaries built independently (e.g. per file)
    pub fn merge(&mut self, other: Summary) {
        for (name, total) in other.durations_by_name {
            *self.durations_by_name.entry(name).or_insert(0.0) += total;
        }
        for (file, total) in other.durations_by_file {
            *self.durations_by_file.entry(file).or_insert(0.0) += total;
        }
        self.event_count += other.event_count;
    }

    /// True when no event with a positive duration was folded
    pub fn is_empty(&self) -> bool {
        self.durations_by_name.is_empty()
    }

    pub fn durations_by_name(&self) -> &HashMap<String, f64> {
        &self.durations_by_name
    }

    pub fn durations_by_file(&self) -> &HashMap<String, f64> {
        &self.durations_by_file
    }

    /// Number of events that contributed to the summary
    pub fn event_count(&self) -> u64 {
        self.event_count
    }
}
