//! Personal events calendar. Client-local only; nothing here touches the backend.

use chrono::{NaiveDate, NaiveDateTime};

use crate::validate::ValidationError;

/// Formats produced by an `<input type="datetime-local">`.
const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Raw add-event form input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl EventDraft {
    pub fn new(title: &str, start: &str, end: &str) -> Self {
        Self {
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Validate and convert. Start equal to end is allowed.
    pub fn parse(&self) -> Result<CalendarEvent, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() || self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(ValidationError::IncompleteEvent);
        }
        let start = parse_input(&self.start)?;
        let end = parse_input(&self.end)?;
        if start > end {
            return Err(ValidationError::StartAfterEnd);
        }
        Ok(CalendarEvent {
            title: title.to_string(),
            start,
            end,
        })
    }
}

fn parse_input(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or(ValidationError::InvalidDate)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append the event if the draft is valid; leaves the calendar untouched otherwise.
    pub fn add(&mut self, draft: &EventDraft) -> Result<&CalendarEvent, ValidationError> {
        let event = draft.parse()?;
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Events sorted by start, grouped by the day they start on.
    pub fn agenda(&self) -> Vec<(NaiveDate, Vec<CalendarEvent>)> {
        let mut sorted = self.events.clone();
        sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));

        let mut days: Vec<(NaiveDate, Vec<CalendarEvent>)> = Vec::new();
        for event in sorted {
            let day = event.start.date();
            match days.last_mut() {
                Some((last, events)) if *last == day => events.push(event),
                _ => days.push((day, vec![event])),
            }
        }
        days
    }
}
