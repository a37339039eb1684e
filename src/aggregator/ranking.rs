//! Rank aggregated durations for reporting.
//!
//! The hottest keys are the primary targets for investigation.

use log::debug;
use std::collections::HashMap;

/// One ranked `(key, total)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// Event name or file path
    pub key: String,

    /// Cumulative duration in milliseconds
    pub total: f64,
}

/// Rank entries by total duration
///
/// **Public** - main entry point for ranking
///
/// # Arguments
/// * `totals` - Cumulative durations keyed by name or file
/// * `limit` - Maximum number of entries to return
///
/// # Returns
/// At most `limit` entries, sorted by total (descending). Equal totals are
/// ordered by key so the output does not depend on map iteration order.
pub fn rank_entries(totals: &HashMap<String, f64>, limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = totals
        .iter()
        .map(|(key, total)| RankedEntry {
            key: key.clone(),
            total: *total,
        })
        .collect();

    entries.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
    entries.truncate(limit);

    debug!("Ranked top {} of {} keys", entries.len(), totals.len());

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_entries(&totals(&[("bind", 2.0), ("check", 9.0), ("emit", 5.0)]), 20);

        let keys: Vec<&str> = ranked.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["check", "emit", "bind"]);
        assert_eq!(ranked[0].total, 9.0);
    }

    #[test]
    fn test_rank_truncates() {
        let data: HashMap<String, f64> = (1..=30).map(|i| (format!("event{i}"), i as f64)).collect();
        let ranked = rank_entries(&data, 20);

        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].key, "event30");
        assert_eq!(ranked[19].key, "event11");
    }

    #[test]
    fn test_rank_ties_ordered_by_key() {
        let ranked = rank_entries(&totals(&[("b", 1.0), ("c", 1.0), ("a", 1.0)]), 20);
        let keys: Vec<&str> = ranked.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_entries(&HashMap::new(), 20).is_empty());
    }
}
