use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaMagnifyingGlass;
use dioxus_free_icons::Icon;
use store::{ClubFilter, SortKey};

use super::TagChips;

/// Search box, tag chips and the categorical selects of the directory.
#[component]
pub fn FilterBar(
    search: String,
    filter: ClubFilter,
    tags: Vec<String>,
    #[props(default)] formats: Vec<String>,
    #[props(default)] hosts: Vec<String>,
    on_search: EventHandler<String>,
    on_tag: EventHandler<String>,
    on_format: EventHandler<String>,
    on_host: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "filter-bar",
            label {
                class: "search-box",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                input {
                    r#type: "search",
                    placeholder: "Search clubs",
                    value: "{search}",
                    oninput: move |evt| on_search.call(evt.value()),
                }
            }
            if !formats.is_empty() {
                select {
                    class: "select",
                    value: "{filter.format}",
                    onchange: move |evt| on_format.call(evt.value()),
                    option { value: "", "Any format" }
                    for format in formats {
                        option { key: "{format}", value: "{format}", "{format}" }
                    }
                }
            }
            if !hosts.is_empty() {
                select {
                    class: "select",
                    value: "{filter.host}",
                    onchange: move |evt| on_host.call(evt.value()),
                    option { value: "", "Any host" }
                    for host in hosts {
                        option { key: "{host}", value: "{host}", "{host}" }
                    }
                }
            }
        }
        TagChips { tags, selected: filter.tag.clone(), on_select: on_tag }
    }
}

#[component]
pub fn SortToggle(value: SortKey, on_change: EventHandler<SortKey>) -> Element {
    rsx! {
        div {
            class: "sort-toggle",
            span { "Sort by" }
            for key in SortKey::all() {
                button {
                    key: "{key.label()}",
                    r#type: "button",
                    class: if key == value { "sort-option active" } else { "sort-option" },
                    onclick: move |_| on_change.call(key),
                    "{key.label()}"
                }
            }
        }
    }
}
