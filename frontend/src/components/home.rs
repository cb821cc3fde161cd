use crate::components::compose::ComposePanel;
use crate::components::history::HistoryPanel;
use crate::components::nav::NavBar;
use leptos::prelude::*;

/// 主页：撰写面板加历史侧栏
#[component]
pub fn HomePage() -> impl IntoView {
    // 每次生成成功后递增，触发侧栏重新拉取
    let refresh = RwSignal::new(0u32);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar />
                <div class="grid gap-8 lg:grid-cols-3">
                    <div class="lg:col-span-2">
                        <ComposePanel on_generated=move |_| refresh.update(|n| *n += 1) />
                    </div>
                    <aside>
                        <HistoryPanel refresh=refresh compact=true />
                    </aside>
                </div>
            </div>
        </div>
    }
}
