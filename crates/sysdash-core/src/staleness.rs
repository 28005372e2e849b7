// ── Staleness tracking ──
//
// Age is derived at render time from the last genuine update; nothing
// here runs on its own timer.

use chrono::{DateTime, Utc};

/// Label shown when no update has ever succeeded.
pub const NEVER: &str = "Never";

/// Wall-clock time of the last successful (non-fallback) update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staleness {
    last: Option<DateTime<Utc>>,
}

impl Staleness {
    pub fn new(last: Option<DateTime<Utc>>) -> Self {
        Self { last }
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last
    }

    /// Whole seconds since the last update, clamped to zero on clock skew.
    pub fn seconds_ago(&self, now: DateTime<Utc>) -> Option<u64> {
        let last = self.last?;
        let secs = (now - last).num_seconds();
        Some(u64::try_from(secs).unwrap_or(0))
    }

    /// `"{n}s ago"`, or [`NEVER`].
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        match self.seconds_ago(now) {
            Some(secs) => format!("{secs}s ago"),
            None => NEVER.to_owned(),
        }
    }

    /// Local wall-clock time of the last update, or [`NEVER`].
    pub fn time_label(&self) -> String {
        match self.last {
            Some(at) => at
                .with_timezone(&chrono::Local)
                .format("%-I:%M:%S %p")
                .to_string(),
            None => NEVER.to_owned(),
        }
    }
}
