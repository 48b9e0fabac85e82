//! Calendar event scheduling for designers

use chrono::{NaiveDate, NaiveTime, SecondsFormat, Utc};
use rand::Rng;

use super::types::DesignerEvent;
use crate::forms::{ValidationError, ValidationErrors};

/// Generate a local id for an event that has not been stored yet
pub fn generate_event_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("event_{}_{}", millis, suffix)
}

/// Pin a calendar date to 12:00 UTC so that no timezone shift moves it to a
/// neighbouring day on the way back.
pub fn normalize_date(date: NaiveDate) -> String {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    date.and_time(noon)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Form backing event creation and modification
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    /// Id of the event being modified, `None` when adding
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}

impl EventForm {
    /// Prefill the form from a stored event
    pub fn from_event(event: &DesignerEvent) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: parse_date(&event.start_date),
            end_date: parse_date(&event.end_date),
            color: event.color.clone(),
        }
    }

    pub fn is_modification(&self) -> bool {
        self.id.is_some()
    }

    /// Validate and build the event payload
    pub fn validate(&self) -> Result<DesignerEvent, ValidationErrors> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(ValidationError::Required("title"));
        }
        if self.start_date.is_none() {
            errors.push(ValidationError::Required("start date"));
        }
        if self.end_date.is_none() {
            errors.push(ValidationError::Required("end date"));
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if errors.is_empty() => {
                if end < start {
                    return Err(ValidationError::InvalidDateRange.into());
                }
                Ok(DesignerEvent {
                    id: self.id.clone().unwrap_or_else(generate_event_id),
                    title: self.title.trim().to_string(),
                    description: self.description.trim().to_string(),
                    start_date: normalize_date(start),
                    end_date: normalize_date(end),
                    color: self.color.clone(),
                })
            }
            _ => Err(errors.into()),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Events covering `day`
pub fn events_on(events: &[DesignerEvent], day: NaiveDate) -> Vec<&DesignerEvent> {
    events
        .iter()
        .filter(|event| {
            match (parse_date(&event.start_date), parse_date(&event.end_date)) {
                (Some(start), Some(end)) => start <= day && day <= end,
                (Some(start), None) => start == day,
                _ => false,
            }
        })
        .collect()
}
