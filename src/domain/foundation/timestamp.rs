//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Formats as `YYYY-MM-DD HH:MM`, the way the dashboard lists sessions.
    pub fn display_minutes(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn is_after_compares_instants() {
        let earlier = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        let later = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());

        assert!(later.is_after(&earlier));
        assert!(!earlier.is_after(&later));
    }

    #[test]
    fn display_minutes_drops_seconds() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 59).unwrap());
        assert_eq!(ts.display_minutes(), "2024-03-05 14:07");
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-05T14:07:00Z\"");
    }
}
