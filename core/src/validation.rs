//! Field rules shared by the API and the client-side form.
//!
//! Every check reports against the camelCase wire name of the field so that
//! messages can be rendered next to the matching input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::event::{CreateEventInput, EventId, EventPatch, NewEvent, UpdateEventInput};

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const LOCATION_MIN_LEN: usize = 3;
pub const LOCATION_MAX_LEN: usize = 255;
pub const CATEGORY_MAX_LEN: usize = 100;
pub const IMAGE_URL_MAX_LEN: usize = 500;

pub const END_BEFORE_START: &str = "End date must be after start date";
pub const INVALID_EVENT_ID: &str = "Invalid event ID";

/// A single rule violation, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed with {} issue(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(path, message)])
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message reported for `path`, if any.
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_title(errors: &mut ValidationErrors, title: &str) {
    let len = char_len(title);
    if len < TITLE_MIN_LEN {
        errors.push("title", "Title must be at least 3 characters");
    } else if len > TITLE_MAX_LEN {
        errors.push("title", "Title must be at most 255 characters");
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    if char_len(description) < DESCRIPTION_MIN_LEN {
        errors.push("description", "Description must be at least 10 characters");
    }
}

fn check_location(errors: &mut ValidationErrors, location: &str) {
    let len = char_len(location);
    if len < LOCATION_MIN_LEN {
        errors.push("location", "Location must be at least 3 characters");
    } else if len > LOCATION_MAX_LEN {
        errors.push("location", "Location must be at most 255 characters");
    }
}

fn check_category(errors: &mut ValidationErrors, category: &str) {
    if category.is_empty() {
        errors.push("category", "Category is required");
    } else if char_len(category) > CATEGORY_MAX_LEN {
        errors.push("category", "Category must be at most 100 characters");
    }
}

fn check_max_attendees(errors: &mut ValidationErrors, value: i64) -> Option<i32> {
    if value < 1 {
        errors.push("maxAttendees", "Max attendees must be a positive integer");
        return None;
    }
    match i32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push("maxAttendees", "Max attendees is too large");
            None
        }
    }
}

fn check_image_url(errors: &mut ValidationErrors, value: &str) {
    if Url::parse(value).is_err() {
        errors.push("imageUrl", "Invalid image URL");
    } else if char_len(value) > IMAGE_URL_MAX_LEN {
        errors.push("imageUrl", "Image URL must be at most 500 characters");
    }
}

/// Parses an ISO-8601 / RFC 3339 datetime carrying an offset.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn check_timestamp(
    errors: &mut ValidationErrors,
    path: &str,
    message: &str,
    value: &str,
) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        errors.push(path, message);
    }
    parsed
}

/// `end` must be strictly after `start`.
pub fn check_schedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationErrors> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationErrors::single("endDate", END_BEFORE_START))
    }
}

/// Validates a creation body and resolves defaults.
pub fn validate_create(input: &CreateEventInput) -> Result<NewEvent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_title(&mut errors, &input.title);
    check_description(&mut errors, &input.description);
    check_location(&mut errors, &input.location);
    let start = check_timestamp(
        &mut errors,
        "startDate",
        "Invalid start date format",
        &input.start_date,
    );
    let end = check_timestamp(
        &mut errors,
        "endDate",
        "Invalid end date format",
        &input.end_date,
    );
    check_category(&mut errors, &input.category);
    let max_attendees = input
        .max_attendees
        .and_then(|v| check_max_attendees(&mut errors, v));
    if let Some(url) = input.image_url.as_deref() {
        check_image_url(&mut errors, url);
    }

    if let (Some(start), Some(end)) = (start, end) {
        if let Err(schedule) = check_schedule(start, end) {
            errors.0.extend(schedule.0);
        }
    }

    match (start, end) {
        (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(NewEvent {
            title: input.title.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            start_date,
            end_date,
            category: input.category.clone(),
            max_attendees,
            image_url: input.image_url.clone(),
            is_active: input.is_active.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}

/// Validates the fields present in an update body.
///
/// When both dates are sent they are checked against each other here. When
/// only one is sent the caller must check it against the stored row.
pub fn validate_update(input: &UpdateEventInput) -> Result<EventPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut patch = EventPatch::default();

    if let Some(title) = &input.title {
        check_title(&mut errors, title);
        patch.title = Some(title.clone());
    }
    if let Some(description) = &input.description {
        check_description(&mut errors, description);
        patch.description = Some(description.clone());
    }
    if let Some(location) = &input.location {
        check_location(&mut errors, location);
        patch.location = Some(location.clone());
    }
    if let Some(start) = &input.start_date {
        patch.start_date = check_timestamp(
            &mut errors,
            "startDate",
            "Invalid start date format",
            start,
        );
    }
    if let Some(end) = &input.end_date {
        patch.end_date =
            check_timestamp(&mut errors, "endDate", "Invalid end date format", end);
    }
    if let Some(category) = &input.category {
        check_category(&mut errors, category);
        patch.category = Some(category.clone());
    }
    if let Some(max_attendees) = input.max_attendees {
        patch.max_attendees = Some(max_attendees.and_then(|v| check_max_attendees(&mut errors, v)));
    }
    if let Some(image_url) = &input.image_url {
        if let Some(url) = image_url.as_deref() {
            check_image_url(&mut errors, url);
        }
        patch.image_url = Some(image_url.clone());
    }
    patch.is_active = input.is_active;

    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        if let Err(schedule) = check_schedule(start, end) {
            errors.0.extend(schedule.0);
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Parses a path segment as an event id. Only plain decimal digits are accepted.
pub fn parse_event_id(raw: &str) -> Result<EventId, ValidationErrors> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationErrors::single("id", INVALID_EVENT_ID));
    }
    raw.parse::<EventId>()
        .map_err(|_| ValidationErrors::single("id", INVALID_EVENT_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateEventInput {
        CreateEventInput {
            title: "RustConf Afterparty".into(),
            description: "Drinks and talks after the conference".into(),
            location: "Portland".into(),
            start_date: "2025-09-10T18:00:00Z".into(),
            end_date: "2025-09-10T23:00:00Z".into(),
            category: "Tech".into(),
            max_attendees: Some(120),
            image_url: Some("https://example.com/banner.png".into()),
            is_active: None,
        }
    }

    #[test]
    fn accepts_valid_input_and_defaults_active() {
        let event = validate_create(&valid_input()).unwrap();
        assert!(event.is_active);
        assert_eq!(event.max_attendees, Some(120));
        assert!(event.end_date > event.start_date);
    }

    #[test]
    fn end_not_after_start_is_reported_on_end_date() {
        let mut input = valid_input();
        input.end_date = input.start_date.clone();
        let errors = validate_create(&input).unwrap_err();
        assert_eq!(errors.message_for("endDate"), Some(END_BEFORE_START));

        input.end_date = "2025-09-10T17:00:00Z".into();
        let errors = validate_create(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("endDate"), Some(END_BEFORE_START));
    }

    #[test]
    fn offsets_are_normalized_before_comparing() {
        let mut input = valid_input();
        // 19:00+02:00 is 17:00Z, which is before 18:00Z.
        input.end_date = "2025-09-10T19:00:00+02:00".into();
        let errors = validate_create(&input).unwrap_err();
        assert_eq!(errors.message_for("endDate"), Some(END_BEFORE_START));
    }

    #[test]
    fn reports_every_broken_field() {
        let input = CreateEventInput {
            title: "ab".into(),
            description: "short".into(),
            location: "".into(),
            start_date: "tomorrow".into(),
            end_date: "2025-01-01".into(),
            category: "".into(),
            max_attendees: Some(0),
            image_url: Some("not a url".into()),
            is_active: Some(false),
        };
        let errors = validate_create(&input).unwrap_err();
        for path in [
            "title",
            "description",
            "location",
            "startDate",
            "endDate",
            "category",
            "maxAttendees",
            "imageUrl",
        ] {
            assert!(errors.message_for(path).is_some(), "missing error for {path}");
        }
    }

    #[test]
    fn title_length_counts_characters() {
        let mut input = valid_input();
        input.title = "äöü".into();
        assert!(validate_create(&input).is_ok());

        input.title = "x".repeat(256);
        let errors = validate_create(&input).unwrap_err();
        assert_eq!(
            errors.message_for("title"),
            Some("Title must be at most 255 characters")
        );
    }

    #[test]
    fn max_attendees_beyond_column_range_is_rejected() {
        let mut input = valid_input();
        input.max_attendees = Some(i64::from(i32::MAX) + 1);
        let errors = validate_create(&input).unwrap_err();
        assert!(errors.message_for("maxAttendees").is_some());
    }

    #[test]
    fn update_checks_only_present_fields() {
        let patch = validate_update(&UpdateEventInput {
            title: Some("New title".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.description.is_none());
        assert!(!patch.touches_schedule());

        let errors = validate_update(&UpdateEventInput {
            description: Some("tiny".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(errors.message_for("description").is_some());
    }

    #[test]
    fn update_with_both_dates_checks_order() {
        let errors = validate_update(&UpdateEventInput {
            start_date: Some("2025-05-02T10:00:00Z".into()),
            end_date: Some("2025-05-01T10:00:00Z".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(errors.message_for("endDate"), Some(END_BEFORE_START));
    }

    #[test]
    fn update_allows_clearing_nullable_fields() {
        let patch = validate_update(&UpdateEventInput {
            max_attendees: Some(None),
            image_url: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.max_attendees, Some(None));
        assert_eq!(patch.image_url, Some(None));
    }

    #[test]
    fn event_ids_must_be_plain_digits() {
        assert_eq!(parse_event_id("42").unwrap(), 42);
        for bad in ["", "-1", "4a", "1.5", " 3", "99999999999999999999"] {
            let errors = parse_event_id(bad).unwrap_err();
            assert_eq!(errors.message_for("id"), Some(INVALID_EVENT_ID));
        }
    }
}
