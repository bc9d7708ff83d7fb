use dioxus::prelude::*;
use tracing::Level;

use store::ClientConfig;
use ui::{make_store, Navbar, NoticeBanner, Notices};
use views::{Polls, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Polls {},
    #[route("/users")]
    Users {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../polls.toml");

fn main() {
    init_logging();
    dioxus::launch(App);
}

/// Install the tracing subscriber at INFO. Later calls leave the first one in place.
fn init_logging() {
    // Err only means a subscriber is already installed
    let _ = dioxus::logger::init(Level::INFO);
}

/// The embedded configuration, or the defaults if it doesn't parse.
fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid {}, using defaults: {e}", ClientConfig::filename());
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_context_provider(load_config);
    let store_config = config.api.clone();
    use_context_provider(move || make_store(&store_config));
    use_context_provider(|| Signal::new(Notices::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        NoticeBanner { duration: config.ui.notice_duration() }
        Router::<Route> {}
    }
}

/// Shared navbar with links to both lists.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Polls {}, "Polls" }
            Link { to: Route::Users {}, "Users" }
        }

        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_logging_init_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized");
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = ClientConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config, load_config());
        assert_eq!(config.ui.fade_ms, 300);
        assert!(config.ui.guard_submissions);
    }
}
