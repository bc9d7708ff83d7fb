use dioxus::prelude::*;

use crate::UI_CSS;

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        nav {
            class: "navbar",
            {children}
        }
    }
}
