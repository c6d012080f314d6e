use std::fmt;

use chrono::{DateTime, Utc};
use evently_core::Event;

/// Display label computed from the clock; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cancellation wins over the time range; both range ends are inclusive.
pub fn derive_status(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_active: bool,
    now: DateTime<Utc>,
) -> EventStatus {
    if !is_active {
        EventStatus::Cancelled
    } else if start <= now && now <= end {
        EventStatus::Ongoing
    } else if end < now {
        EventStatus::Completed
    } else {
        EventStatus::Upcoming
    }
}

pub fn status_of(event: &Event, now: DateTime<Utc>) -> EventStatus {
    derive_status(event.start_date, event.end_date, event.is_active, now)
}
