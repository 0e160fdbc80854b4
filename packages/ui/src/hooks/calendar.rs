use dioxus::prelude::*;
use store::{Calendar, EventDraft};

/// Client-local events; dropped when the screen unmounts.
#[derive(Clone, Copy, PartialEq)]
pub struct CalendarHandle {
    pub calendar: Signal<Calendar>,
    /// Validation message of the last rejected add.
    pub error: Signal<Option<String>>,
}

pub fn use_calendar() -> CalendarHandle {
    CalendarHandle {
        calendar: use_signal(Calendar::new),
        error: use_signal(|| None),
    }
}

impl CalendarHandle {
    /// Add the event if valid. Returns whether it was added.
    pub fn add(&self, draft: EventDraft) -> bool {
        let mut calendar = self.calendar;
        let mut error = self.error;
        let result = calendar.write().add(&draft).map(|_| ());
        match result {
            Ok(()) => {
                error.set(None);
                true
            }
            Err(e) => {
                error.set(Some(e.to_string()));
                false
            }
        }
    }
}
