use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use emailcraft::AppRoute;
use leptos::prelude::*;

/// 顶部导航栏
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let link_class = move |target: AppRoute| {
        if router.current_route().get() == target {
            "btn btn-ghost btn-active"
        } else {
            "btn btn-ghost"
        }
    };

    let on_logout = move |_| {
        logout(auth);
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">"EmailCraft"</Link>
            </div>
            <div class="flex-none gap-2">
                <a
                    href=AppRoute::Home.to_path()
                    class=move || link_class(AppRoute::Home)
                    on:click=move |ev| {
                        ev.prevent_default();
                        router.navigate(AppRoute::Home);
                    }
                >
                    "Compose"
                </a>
                <a
                    href=AppRoute::History.to_path()
                    class=move || link_class(AppRoute::History)
                    on:click=move |ev| {
                        ev.prevent_default();
                        router.navigate(AppRoute::History);
                    }
                >
                    "History"
                </a>
                <button on:click=on_logout class="btn btn-outline btn-error">
                    "Log out"
                </button>
            </div>
        </div>
    }
}
