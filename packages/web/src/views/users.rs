use api::HttpStore;
use dioxus::prelude::*;
use store::ClientConfig;
use ui::{delete_user, refresh_users, submit_user, use_notices, UserDraft, UserForm, UserList, UsersView};

#[component]
pub fn Users() -> Element {
    let config = use_context::<ClientConfig>();
    let store = use_context::<HttpStore>();
    let notices = use_notices();
    let view = use_signal(UsersView::default);
    let draft = use_signal(UserDraft::default);

    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                refresh_users(&store, &view, &notices).await;
            }
        }
    });

    let on_submit = {
        let store = store.clone();
        let config = config.clone();
        move |_: ()| {
            let store = store.clone();
            let config = config.clone();
            spawn(async move {
                submit_user(&store, &draft, &view, &notices, &config).await;
            });
        }
    };

    let fade = config.ui.fade_delay();
    let on_delete = move |id: String| {
        let store = store.clone();
        spawn(async move {
            delete_user(&store, &view, &notices, &id, fade).await;
        });
    };

    rsx! {
        section {
            h1 { "Create a user" }
            UserForm { draft, on_submit }
        }
        section {
            h2 { "Users" }
            UserList { view, on_delete }
        }
    }
}
