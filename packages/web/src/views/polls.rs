use api::HttpStore;
use dioxus::prelude::*;
use store::ClientConfig;
use ui::{
    add_option, delete_poll, refresh_polls, submit_poll, toggle_option, use_notices, PollDraft,
    PollForm, PollList, PollsView,
};

#[component]
pub fn Polls() -> Element {
    let config = use_context::<ClientConfig>();
    let store = use_context::<HttpStore>();
    let notices = use_notices();
    let view = use_signal(PollsView::default);
    let draft = use_signal(|| PollDraft::new(config.ui.min_options));

    // Load polls on mount
    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                refresh_polls(&store, &view, &notices).await;
            }
        }
    });

    let max_options = config.ui.max_options;
    let on_add = move |_: ()| {
        add_option(&draft, &notices, max_options);
    };

    let on_submit = {
        let store = store.clone();
        let config = config.clone();
        move |_: ()| {
            let store = store.clone();
            let config = config.clone();
            spawn(async move {
                submit_poll(&store, &draft, &view, &notices, &config).await;
            });
        }
    };

    let on_delete = {
        let store = store.clone();
        let fade = config.ui.fade_delay();
        move |id: String| {
            let store = store.clone();
            spawn(async move {
                delete_poll(&store, &view, &notices, &id, fade).await;
            });
        }
    };

    let on_toggle = move |(poll_id, option_id): (String, String)| {
        let store = store.clone();
        spawn(async move {
            toggle_option(&store, &view, &notices, &poll_id, &option_id).await;
        });
    };

    rsx! {
        section {
            h1 { "Create a poll" }
            PollForm { draft, on_add, on_submit }
        }
        section {
            h2 { "Polls" }
            PollList { view, on_delete, on_toggle }
        }
    }
}
