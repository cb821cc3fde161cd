mod form_state;

use crate::api::use_api;
use crate::auth::use_auth;
use emailcraft_shared::{GeneratedDraft, Tone};
use form_state::ComposeForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 邮件撰写面板
///
/// 生成成功后通过 `on_generated` 通知父组件刷新历史记录。
#[component]
pub fn ComposePanel(#[prop(into)] on_generated: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());

    let form = ComposeForm::new();
    let draft = RwSignal::new(Option::<GeneratedDraft>::None);
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        // 校验失败时不发出请求
        let req = match form.to_request() {
            Ok(req) => req,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_loading.set(true);
        set_error_msg.set(None);

        let api = api.get_value();
        spawn_local(async move {
            let token = auth.token();
            let result = api
                .generate_content(&req.subject, Some(req.tone), token.as_deref())
                .await;
            auth.observe(&result);
            match result {
                Ok(generated) => {
                    draft.set(Some(generated));
                    on_generated.run(());
                }
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };

    let on_reset = move |_| {
        form.reset();
        draft.set(None);
        set_error_msg.set(None);
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body gap-4" on:submit=on_submit>
                <h2 class="card-title">"Compose"</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label" for="subject">
                        <span class="label-text">"What should the email be about?"</span>
                    </label>
                    <textarea
                        id="subject"
                        rows="3"
                        class="textarea textarea-bordered"
                        placeholder="Ask my landlord to fix the heating before Friday"
                        on:input=move |ev| form.subject.set(event_target_value(&ev))
                        prop:value=move || form.subject.get()
                    ></textarea>
                </div>

                <div class="form-control">
                    <label class="label" for="tone">
                        <span class="label-text">"Tone"</span>
                    </label>
                    <select
                        id="tone"
                        class="select select-bordered"
                        on:change=move |ev| form.select_tone(&event_target_value(&ev))
                        prop:value=move || form.tone.get().map(|t| t.as_str()).unwrap_or_default()
                    >
                        <option value="">"Select a tone"</option>
                        {Tone::ALL
                            .iter()
                            .map(|tone| view! { <option value=tone.as_str()>{tone.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="card-actions justify-end">
                    <button type="button" class="btn btn-ghost" on:click=on_reset>
                        "Reset"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() {
                            view! { <span class="loading loading-spinner"></span> "Generating..." }.into_any()
                        } else {
                            "Generate".into_any()
                        }}
                    </button>
                </div>
            </form>

            <Show when=move || draft.with(Option::is_some)>
                <DraftView draft=draft />
            </Show>
        </div>
    }
}

/// 生成结果，可编辑正文并通过邮件客户端发送
#[component]
fn DraftView(draft: RwSignal<Option<GeneratedDraft>>) -> impl IntoView {
    let mailto = move || draft.with(|d| d.as_ref().map(GeneratedDraft::mailto_uri).unwrap_or_default());

    view! {
        <div class="card-body border-t border-base-200 gap-3">
            <div class="flex items-center gap-2">
                <h3 class="font-semibold flex-1">
                    {move || draft.with(|d| d.as_ref().map(|d| d.subject.clone()).unwrap_or_default())}
                </h3>
                <span class="badge badge-outline">
                    {move || draft.with(|d| d.as_ref().map(|d| d.tone.as_str()).unwrap_or_default())}
                </span>
            </div>
            <textarea
                class="textarea textarea-bordered min-h-64 font-mono text-sm"
                on:input=move |ev| {
                    let body = event_target_value(&ev);
                    draft.update(|d| {
                        if let Some(d) = d {
                            d.edit_body(body);
                        }
                    });
                }
                prop:value=move || draft.with(|d| d.as_ref().map(|d| d.body.clone()).unwrap_or_default())
            ></textarea>
            <div class="card-actions justify-end">
                <a class="btn btn-secondary" href=mailto>
                    "Open in mail client"
                </a>
            </div>
        </div>
    }
}
