use dioxus::prelude::*;
use chrono::NaiveDate;
use store::{CalendarEvent, EventDraft};

use super::{Button, ButtonVariant, ErrorBanner, Input, Label};

/// Title plus start/end pickers. Fields are cleared once `on_submit`
/// reports the event was accepted.
#[component]
pub fn EventForm(error: Option<String>, on_submit: Callback<EventDraft, bool>) -> Element {
    let mut title = use_signal(String::new);
    let mut start = use_signal(String::new);
    let mut end = use_signal(String::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = EventDraft::new(&title(), &start(), &end());
        if on_submit.call(draft) {
            title.set(String::new());
            start.set(String::new());
            end.set(String::new());
        }
    };

    rsx! {
        form {
            class: "event-form",
            onsubmit: submit,
            ErrorBanner { message: error }
            div {
                class: "field",
                Label { html_for: "event-title", "Title" }
                Input {
                    id: "event-title",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
            }
            div {
                class: "field",
                Label { html_for: "event-start", "Start" }
                Input {
                    id: "event-start",
                    r#type: "datetime-local",
                    value: start(),
                    oninput: move |evt: FormEvent| start.set(evt.value()),
                }
            }
            div {
                class: "field",
                Label { html_for: "event-end", "End" }
                Input {
                    id: "event-end",
                    r#type: "datetime-local",
                    value: end(),
                    oninput: move |evt: FormEvent| end.set(evt.value()),
                }
            }
            Button { variant: ButtonVariant::Primary, r#type: "submit", "Add event" }
        }
    }
}

/// Events grouped by day, earliest first.
#[component]
pub fn EventAgenda(days: Vec<(NaiveDate, Vec<CalendarEvent>)>) -> Element {
    if days.is_empty() {
        return rsx! {
            p { class: "empty-state", "No events yet." }
        };
    }

    rsx! {
        div {
            class: "agenda",
            for (day, events) in days {
                AgendaDay { key: "{day}", day, events }
            }
        }
    }
}

#[component]
fn AgendaDay(day: NaiveDate, events: Vec<CalendarEvent>) -> Element {
    let heading = day.format("%A, %B %-d, %Y").to_string();
    let rows: Vec<(String, String)> = events
        .iter()
        .map(|e| (time_range(e), e.title.clone()))
        .collect();

    rsx! {
        section {
            class: "agenda-day",
            h3 { "{heading}" }
            ul {
                for (i, (time, title)) in rows.into_iter().enumerate() {
                    li {
                        key: "{i}",
                        class: "agenda-event",
                        span { class: "agenda-time", "{time}" }
                        span { class: "agenda-title", "{title}" }
                    }
                }
            }
        }
    }
}

/// "09:00 - 10:30", with the end date spelled out when it falls on a later day.
fn time_range(event: &CalendarEvent) -> String {
    let start = event.start.format("%H:%M");
    if event.end.date() == event.start.date() {
        format!("{start} - {}", event.end.format("%H:%M"))
    } else {
        format!("{start} - {}", event.end.format("%b %-d %H:%M"))
    }
}
