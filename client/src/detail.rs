use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use evently_core::Event;

use crate::format::{format_date_range, format_long_date, group_thousands};
use crate::status::{status_of, EventStatus};

/// Flat ticket price used for the revenue estimate.
pub const ESTIMATED_TICKET_PRICE: u64 = 45;
/// Share of tickets assumed to belong to distinct attendees.
pub const UNIQUE_ATTENDEE_RATIO: f64 = 0.7;
pub const DEFAULT_TAGS: [&str; 4] = ["VIP", "Sports", "Frequent Buyer", "Promo Code"];

/// Everything the detail page shows that is not a raw column.
///
/// There is no ticket sales tracking, so capacity stands in for tickets sold.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub status: EventStatus,
    pub date_range: String,
    pub start_long: String,
    pub capacity: String,
    pub tickets_sold: u64,
    pub estimated_revenue: u64,
    pub unique_attendees: u64,
    pub tags: Vec<String>,
}

impl EventDetail {
    pub fn new<Tz>(event: &Event, now: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let start = event.start_date.with_timezone(tz);
        let end = event.end_date.with_timezone(tz);
        let tickets_sold = event
            .max_attendees
            .map(|n| u64::try_from(n).unwrap_or(0))
            .unwrap_or(0);

        let tags = std::iter::once(event.category.as_str())
            .filter(|c| !c.is_empty())
            .chain(DEFAULT_TAGS)
            .map(str::to_string)
            .collect();

        Self {
            status: status_of(event, now),
            date_range: format_date_range(&start, &end),
            start_long: format_long_date(&start),
            capacity: match tickets_sold {
                0 => "Not set".to_string(),
                n => group_thousands(n),
            },
            tickets_sold,
            estimated_revenue: tickets_sold * ESTIMATED_TICKET_PRICE,
            unique_attendees: (tickets_sold as f64 * UNIQUE_ATTENDEE_RATIO).round() as u64,
            tags,
        }
    }
}
