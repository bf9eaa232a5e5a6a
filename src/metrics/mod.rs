use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters a canvas accumulates over its lifetime.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    gestures: u64,
    moves: u64,
    compactions: u64,
    drops: u64,
    removals: u64,
    displaced: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag or resize gesture finished.
    pub fn record_gesture(&mut self) {
        self.gestures = self.gestures.saturating_add(1);
    }

    pub fn record_move(&mut self, displaced: usize) {
        self.moves = self.moves.saturating_add(1);
        self.displaced = self.displaced.saturating_add(displaced as u64);
    }

    pub fn record_compaction(&mut self) {
        self.compactions = self.compactions.saturating_add(1);
    }

    pub fn record_drop(&mut self) {
        self.drops = self.drops.saturating_add(1);
    }

    pub fn record_removal(&mut self) {
        self.removals = self.removals.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            gestures: self.gestures,
            moves: self.moves,
            compactions: self.compactions,
            drops: self.drops,
            removals: self.removals,
            displaced: self.displaced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricSnapshot {
    pub gestures: u64,
    pub moves: u64,
    pub compactions: u64,
    pub drops: u64,
    pub removals: u64,
    pub displaced: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("gestures".to_string(), json!(self.gestures));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("compactions".to_string(), json!(self.compactions));
        map.insert("drops".to_string(), json!(self.drops));
        map.insert("removals".to_string(), json!(self.removals));
        map.insert("displaced".to_string(), json!(self.displaced));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_gesture();
        metrics.record_move(3);
        metrics.record_move(0);
        metrics.record_compaction();
        metrics.record_drop();
        metrics.record_removal();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.gestures, 1);
        assert_eq!(snapshot.moves, 2);
        assert_eq!(snapshot.displaced, 3);
        assert_eq!(snapshot.compactions, 1);
        assert_eq!(snapshot.drops, 1);
        assert_eq!(snapshot.removals, 1);
    }

    #[test]
    fn snapshot_event_carries_every_counter() {
        let event = MetricSnapshot::default().to_log_event("layout::canvas.metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.fields.len(), 6);
        assert_eq!(event.fields["moves"], json!(0));
    }
}
