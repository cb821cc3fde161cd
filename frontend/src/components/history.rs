use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::nav::NavBar;
use emailcraft::ApiError;
use emailcraft_shared::EmailHistoryEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 历史记录面板
///
/// `refresh` 每变化一次重新拉取；`compact` 用于主页侧栏，只显示摘要。
#[component]
pub fn HistoryPanel(
    #[prop(into)] refresh: Signal<u32>,
    #[prop(optional)] compact: bool,
) -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());

    let (entries, set_entries) = signal(Vec::<EmailHistoryEntry>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        refresh.track();
        // 已注销时不发出请求，路由服务负责把用户带走
        let Some(token) = auth.token() else {
            return;
        };

        set_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            let result = api.fetch_history(&token).await;
            auth.observe(&result);
            match result {
                Ok(data) => {
                    set_entries.set(data);
                    set_error_msg.set(None);
                }
                // 401 时会话已清除，页面即将离开，不再显示错误
                Err(ApiError::Unauthorized { .. }) => {}
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body gap-3">
                <h2 class="card-title">"History"</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center p-6">
                            <span class="loading loading-spinner loading-md text-primary"></span>
                        </div>
                    }
                >
                    <Show
                        when=move || entries.with(|e| !e.is_empty())
                        fallback=|| view! { <p class="text-base-content/60 text-sm">"No emails yet."</p> }
                    >
                        <ul class="space-y-3">
                            <For
                                each=move || entries.get()
                                key=|entry| entry.id
                                children=move |entry| view! { <HistoryItem entry=entry compact=compact /> }
                            />
                        </ul>
                    </Show>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn HistoryItem(entry: EmailHistoryEntry, compact: bool) -> impl IntoView {
    let when = entry.timestamp.display();

    view! {
        <li class="border border-base-200 rounded-box p-3">
            <div class="flex items-baseline gap-2">
                <span class="font-medium flex-1 truncate">{entry.prompt}</span>
                <span class="text-xs text-base-content/60 whitespace-nowrap">{when}</span>
            </div>
            {if compact {
                view! {
                    <p class="text-sm text-base-content/70 line-clamp-2 mt-1">{entry.generated_email}</p>
                }
                .into_any()
            } else {
                view! {
                    <pre class="text-sm whitespace-pre-wrap font-sans mt-2">{entry.generated_email}</pre>
                }
                .into_any()
            }}
        </li>
    }
}

/// 历史记录页面
#[component]
pub fn HistoryPage() -> impl IntoView {
    let refresh = RwSignal::new(0u32);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-4xl mx-auto space-y-8">
                <NavBar />
                <div class="flex justify-end">
                    <button class="btn btn-sm btn-outline" on:click=move |_| refresh.update(|n| *n += 1)>
                        "Refresh"
                    </button>
                </div>
                <HistoryPanel refresh=refresh />
            </div>
        </div>
    }
}
