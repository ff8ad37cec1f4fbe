// Alert evaluation
//
// Builds the list of host names currently in alarm. A host alarms when its
// CPU or memory usage reaches the configured threshold, or when the source
// itself reported it (fleet files may carry their own alert list).

use super::HostStatusRecord;
use crate::app::AlertConfig;
use std::collections::HashSet;

/// Check a single record against the thresholds
pub fn is_alerting(record: &HostStatusRecord, config: &AlertConfig) -> bool {
    record.cpu >= config.cpu_threshold || record.memory >= config.memory_threshold
}

/// Compute the alert host list
///
/// Source-reported names come first, in source order, followed by hosts that
/// crossed a threshold, in record order. Each name appears once.
pub fn evaluate_alerts(
    records: &[HostStatusRecord],
    reported: &[String],
    config: &AlertConfig,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut alerts = Vec::new();

    let from_thresholds = records
        .iter()
        .filter(|r| is_alerting(r, config))
        .map(|r| &r.name);

    for name in reported.iter().chain(from_thresholds) {
        if seen.insert(name.as_str()) {
            alerts.push(name.clone());
        }
    }

    alerts
}
