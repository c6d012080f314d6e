//! Create/edit form state with the same rules the API enforces, checked
//! before anything is sent.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use evently_core::validation::{
    CATEGORY_MAX_LEN, DESCRIPTION_MIN_LEN, END_BEFORE_START, IMAGE_URL_MAX_LEN, LOCATION_MAX_LEN,
    LOCATION_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN,
};
use evently_core::{CreateEventInput, Event, EventId, FieldError, UpdateEventInput};
use url::Url;

use crate::format::{format_date_time_local, parse_date_time_local, to_iso_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Location,
    StartDate,
    EndDate,
    Category,
    MaxAttendees,
    ImageUrl,
    IsActive,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Title,
        FormField::Description,
        FormField::Location,
        FormField::StartDate,
        FormField::EndDate,
        FormField::Category,
        FormField::MaxAttendees,
        FormField::ImageUrl,
        FormField::IsActive,
    ];

    /// Name of the field in API payloads and error paths.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Location => "location",
            FormField::StartDate => "startDate",
            FormField::EndDate => "endDate",
            FormField::Category => "category",
            FormField::MaxAttendees => "maxAttendees",
            FormField::ImageUrl => "imageUrl",
            FormField::IsActive => "isActive",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

pub type FormErrors = BTreeMap<FormField, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EventId),
}

/// Raw input values as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub location: String,
    /// `datetime-local` value, see [`crate::format::format_date_time_local`].
    pub start_date: String,
    pub end_date: String,
    pub category: String,
    pub max_attendees: String,
    pub image_url: String,
    pub is_active: bool,
    errors: FormErrors,
    baseline: Option<Baseline>,
}

/// The stored event an edit form was prefilled from. `datetime-local` drops
/// seconds, so untouched dates resolve to the stored instants.
#[derive(Debug, Clone, PartialEq)]
struct Baseline {
    event: Event,
    start_date: String,
    end_date: String,
}

impl EventForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            category: String::new(),
            max_attendees: String::new(),
            image_url: String::new(),
            is_active: true,
            errors: FormErrors::new(),
            baseline: None,
        }
    }

    /// Prefilled from a stored event, dates shown in `tz`.
    pub fn edit<Tz>(event: &Event, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let start_date = format_date_time_local(&event.start_date, tz);
        let end_date = format_date_time_local(&event.end_date, tz);
        Self {
            mode: FormMode::Edit(event.id),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_date: start_date.clone(),
            end_date: end_date.clone(),
            category: event.category.clone(),
            max_attendees: event
                .max_attendees
                .map(|n| n.to_string())
                .unwrap_or_default(),
            image_url: event.image_url.clone().unwrap_or_default(),
            is_active: event.is_active,
            errors: FormErrors::new(),
            baseline: Some(Baseline {
                event: event.clone(),
                start_date,
                end_date,
            }),
        }
    }

    /// Whether the input differs from what the form was prefilled with.
    /// Always true for a blank create form.
    pub fn is_changed(&self, field: FormField) -> bool {
        let Some(base) = &self.baseline else {
            return true;
        };
        let stored = &base.event;
        match field {
            FormField::Title => self.title != stored.title,
            FormField::Description => self.description != stored.description,
            FormField::Location => self.location != stored.location,
            FormField::StartDate => self.start_date != base.start_date,
            FormField::EndDate => self.end_date != base.end_date,
            FormField::Category => self.category != stored.category,
            FormField::MaxAttendees => {
                self.max_attendees
                    != stored
                        .max_attendees
                        .map(|n| n.to_string())
                        .unwrap_or_default()
            }
            FormField::ImageUrl => self.image_url != stored.image_url.as_deref().unwrap_or(""),
            FormField::IsActive => self.is_active != stored.is_active,
        }
    }

    fn start_instant<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        match &self.baseline {
            Some(base) if self.start_date == base.start_date => Some(base.event.start_date),
            _ => parse_date_time_local(&self.start_date, tz),
        }
    }

    fn end_instant<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        match &self.baseline {
            Some(base) if self.end_date == base.end_date => Some(base.event.end_date),
            _ => parse_date_time_local(&self.end_date, tz),
        }
    }

    /// Updates one input and clears its pending error.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Location => self.location = value,
            FormField::StartDate => self.start_date = value,
            FormField::EndDate => self.end_date = value,
            FormField::Category => self.category = value,
            FormField::MaxAttendees => self.max_attendees = value,
            FormField::ImageUrl => self.image_url = value,
            FormField::IsActive => {
                self.is_active = matches!(value.trim(), "true" | "on" | "1" | "yes")
            }
        }
        self.errors.remove(&field);
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.errors.remove(&FormField::IsActive);
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Shows field errors returned by the server next to the matching inputs.
    pub fn apply_server_errors(&mut self, details: &[FieldError]) {
        for detail in details {
            if let Some(field) = FormField::from_wire_name(&detail.path) {
                self.errors
                    .entry(field)
                    .or_insert_with(|| detail.message.clone());
            }
        }
    }

    /// Runs every rule, replacing the stored errors. Returns whether the form is valid.
    pub fn validate<Tz: TimeZone>(&mut self, tz: &Tz) -> bool {
        self.errors = self.check(tz);
        self.errors.is_empty()
    }

    fn check<Tz: TimeZone>(&self, tz: &Tz) -> FormErrors {
        let mut errors = FormErrors::new();

        check_text(
            &mut errors,
            FormField::Title,
            &self.title,
            "Title",
            TITLE_MIN_LEN,
            Some(TITLE_MAX_LEN),
        );
        check_text(
            &mut errors,
            FormField::Description,
            &self.description,
            "Description",
            DESCRIPTION_MIN_LEN,
            None,
        );
        check_text(
            &mut errors,
            FormField::Location,
            &self.location,
            "Location",
            LOCATION_MIN_LEN,
            Some(LOCATION_MAX_LEN),
        );
        check_text(
            &mut errors,
            FormField::Category,
            &self.category,
            "Category",
            1,
            Some(CATEGORY_MAX_LEN),
        );

        let start = check_date(&mut errors, FormField::StartDate, &self.start_date, "Start", tz)
            .and_then(|_| self.start_instant(tz));
        let end = check_date(&mut errors, FormField::EndDate, &self.end_date, "End", tz)
            .and_then(|_| self.end_instant(tz));

        if let Err(message) = parse_max_attendees(&self.max_attendees) {
            errors.insert(FormField::MaxAttendees, message.to_string());
        }

        let image_url = self.image_url.trim();
        if !image_url.is_empty() {
            if Url::parse(image_url).is_err() {
                errors.insert(FormField::ImageUrl, "Please enter a valid URL".to_string());
            } else if image_url.chars().count() > IMAGE_URL_MAX_LEN {
                errors.insert(
                    FormField::ImageUrl,
                    "Image URL must be at most 500 characters".to_string(),
                );
            }
        }

        // Stored values are not re-judged; the schedule still is.
        errors.retain(|field, _| self.is_changed(*field));
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.insert(FormField::EndDate, END_BEFORE_START.to_string());
            }
        }

        errors
    }

    /// Validates and builds the creation payload. Text is trimmed.
    pub fn to_create_input<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<CreateEventInput, FormErrors> {
        if !self.validate(tz) {
            return Err(self.errors.clone());
        }
        // Both dates resolved during validation.
        let start = self.start_instant(tz).ok_or_else(|| self.errors.clone())?;
        let end = self.end_instant(tz).ok_or_else(|| self.errors.clone())?;
        let image_url = self.image_url.trim();

        Ok(CreateEventInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            start_date: to_iso_string(&start),
            end_date: to_iso_string(&end),
            category: self.category.trim().to_string(),
            max_attendees: parse_max_attendees(&self.max_attendees).ok().flatten(),
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            is_active: Some(self.is_active),
        })
    }

    /// Partial update carrying only the inputs that differ from the prefilled
    /// event. Clearing capacity or image URL sends an explicit `null`.
    pub fn to_update_input<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<UpdateEventInput, FormErrors> {
        let input = self.to_create_input(tz)?;
        let changed = |field| self.is_changed(field);
        Ok(UpdateEventInput {
            title: changed(FormField::Title).then_some(input.title),
            description: changed(FormField::Description).then_some(input.description),
            location: changed(FormField::Location).then_some(input.location),
            start_date: changed(FormField::StartDate).then_some(input.start_date),
            end_date: changed(FormField::EndDate).then_some(input.end_date),
            category: changed(FormField::Category).then_some(input.category),
            max_attendees: changed(FormField::MaxAttendees).then_some(input.max_attendees),
            image_url: changed(FormField::ImageUrl).then_some(input.image_url),
            is_active: changed(FormField::IsActive).then_some(self.is_active),
        })
    }
}

fn check_text(
    errors: &mut FormErrors,
    field: FormField,
    value: &str,
    label: &str,
    min: usize,
    max: Option<usize>,
) {
    let value = value.trim();
    let len = value.chars().count();
    if value.is_empty() {
        errors.insert(field, format!("{label} is required"));
    } else if len < min {
        errors.insert(field, format!("{label} must be at least {min} characters"));
    } else if let Some(max) = max.filter(|max| len > *max) {
        errors.insert(field, format!("{label} must be at most {max} characters"));
    }
}

fn check_date<Tz: TimeZone>(
    errors: &mut FormErrors,
    field: FormField,
    value: &str,
    label: &str,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} date is required"));
        return None;
    }
    let parsed = parse_date_time_local(value, tz);
    if parsed.is_none() {
        errors.insert(field, format!("Invalid {} date", label.to_lowercase()));
    }
    parsed
}

/// Blank means "no limit".
fn parse_max_attendees(value: &str) -> Result<Option<i64>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let n: i64 = value
        .parse()
        .map_err(|_| "Max attendees must be a whole number")?;
    if n < 1 {
        Err("Max attendees must be at least 1")
    } else if n > i64::from(i32::MAX) {
        Err("Max attendees is too large")
    } else {
        Ok(Some(n))
    }
}
