use dioxus::prelude::*;

/// Top navigation bar. `children` are the links; `actions` sits on the right.
#[component]
pub fn Navbar(#[props(default = VNode::empty())] actions: Element, children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            span { class: "navbar-brand", "ClubHub" }
            div { class: "navbar-links", {children} }
            div { class: "navbar-actions", {actions} }
        }
    }
}
