//! Dashboard list: summary counts, search and pagination over the full list.

use chrono::{DateTime, Utc};
use evently_core::Event;

pub const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl DashboardStats {
    pub fn compute(events: &[Event], now: DateTime<Utc>) -> Self {
        let mut stats = DashboardStats {
            total: events.len(),
            ..Default::default()
        };
        for event in events {
            if !event.is_active {
                stats.cancelled += 1;
            } else if event.start_date > now {
                stats.upcoming += 1;
            } else if event.end_date >= now {
                stats.ongoing += 1;
            } else {
                stats.completed += 1;
            }
        }
        stats
    }
}

/// Case-insensitive substring match on title, location or category.
/// A blank term matches everything; otherwise surrounding spaces are part of
/// the term.
pub fn matches_search(event: &Event, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [&event.title, &event.location, &event.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter_events<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| matches_search(e, term)).collect()
}

/// At least one page, even when empty.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Items on the 1-based `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// State behind the dashboard table.
#[derive(Debug, Clone)]
pub struct ListView {
    events: Vec<Event>,
    search: String,
    page: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            events: Vec::new(),
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replaces the list. A change in length sends the view back to page 1.
    pub fn set_events(&mut self, events: Vec<Event>) {
        if events.len() != self.events.len() {
            self.page = 1;
        }
        self.events = events;
    }

    /// Changing the term sends the view back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.page = 1;
        }
        self.search = term;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filtered(&self) -> Vec<&Event> {
        filter_events(&self.events, &self.search)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn visible(&self) -> Vec<&Event> {
        paginate(&self.filtered(), self.page, self.page_size).to_vec()
    }

    /// Counts cover the whole list, not just the search hits.
    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.events, now)
    }
}
