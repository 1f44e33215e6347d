//! Remote quota tracking
//!
//! The Scopus API has weekly key limits. Every successful fetch reports
//! the remaining budget and the reset time; the tracker keeps only the most
//! recent observation.

use chrono::{DateTime, Duration, Utc};
use citenetx_common::model::QuotaSnapshot;

/// Last observed quota state, overwritten on every successful fetch
#[derive(Debug, Clone, Default)]
pub struct QuotaTracker {
    remaining: Option<u64>,
    reset_at: Option<DateTime<Utc>>,
}

impl QuotaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite with the snapshot from a successful fetch, unknowns
    /// included (last write wins, no history)
    pub fn observe(&mut self, snapshot: &QuotaSnapshot) {
        self.remaining = snapshot.remaining;
        self.reset_at = snapshot.reset_at;
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.reset_at
    }

    /// Human-readable (remaining-quota, reset-time) lines; unknown fields
    /// render sentinel strings instead of failing
    pub fn summarize(&self) -> (String, String) {
        let quota_line = match self.remaining {
            Some(remaining) => format!("remaining pulls this key: {remaining}."),
            None => "Pulls Remaining Unknown".to_string(),
        };

        let reset_line = match self.reset_at {
            Some(reset_at) => {
                let until = reset_at - Utc::now();
                format!("key resets on {} ({})", reset_at.to_rfc3339(), format_span(until))
            }
            None => "Reset Time Unknown".to_string(),
        };

        (quota_line, reset_line)
    }
}

fn format_span(span: Duration) -> String {
    let minutes = span.num_minutes();
    if minutes <= 0 {
        return "0m".to_string();
    }
    let days = minutes / (60 * 24);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_render_sentinels() {
        let tracker = QuotaTracker::new();
        let (quota_line, reset_line) = tracker.summarize();
        assert_eq!(quota_line, "Pulls Remaining Unknown");
        assert_eq!(reset_line, "Reset Time Unknown");
    }

    #[test]
    fn test_known_fields_render_values() {
        let mut tracker = QuotaTracker::new();
        tracker.observe(&QuotaSnapshot {
            remaining: Some(4321),
            reset_at: Some(Utc::now() + Duration::hours(30)),
        });

        let (quota_line, reset_line) = tracker.summarize();
        assert_eq!(quota_line, "remaining pulls this key: 4321.");
        assert!(reset_line.starts_with("key resets on "));
        assert!(reset_line.contains("1d 5h"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut tracker = QuotaTracker::new();
        tracker.observe(&QuotaSnapshot { remaining: Some(100), reset_at: None });
        tracker.observe(&QuotaSnapshot { remaining: Some(99), reset_at: None });
        assert_eq!(tracker.remaining(), Some(99));

        // a fetch that reports nothing overwrites too
        tracker.observe(&QuotaSnapshot::default());
        assert_eq!(tracker.remaining(), None);
    }

    #[test]
    fn test_span_formatting() {
        assert_eq!(format_span(Duration::minutes(-5)), "0m");
        assert_eq!(format_span(Duration::minutes(59)), "59m");
        assert_eq!(format_span(Duration::minutes(61)), "1h 1m");
    }
}
