use dioxus::prelude::*;
use store::EventDraft;
use ui::components::{EventAgenda, EventForm};
use ui::hooks::use_calendar;

use super::RequireSession;

#[component]
pub fn CalendarPage() -> Element {
    rsx! {
        RequireSession { CalendarBoard {} }
    }
}

/// Events live only as long as this page is open.
#[component]
fn CalendarBoard() -> Element {
    let calendar = use_calendar();
    let days = calendar.calendar.read().agenda();

    rsx! {
        h1 { "My calendar" }
        div {
            class: "calendar-layout",
            EventForm {
                error: (calendar.error)(),
                on_submit: move |draft: EventDraft| calendar.add(draft),
            }
            EventAgenda { days }
        }
    }
}
