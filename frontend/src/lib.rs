//! EmailCraft 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `emailcraft::route`: 路由定义与守卫（核心层纯函数）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod compose;
    pub mod history;
    pub mod home;
    pub mod login;
    pub mod nav;
    pub mod signup;
}

use crate::api::create_api;
use crate::auth::AuthContext;
use crate::components::history::HistoryPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::signup::SignupPage;

use emailcraft::AppRoute;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    mod env;
    mod http;
    pub mod logger;
    pub mod router;
    mod storage;

    pub use env::BuildEnv;
    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::History => view! { <HistoryPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back to EmailCraft"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 API 客户端
    let api = create_api();

    // 2. 从 LocalStorage 同步恢复会话，首帧渲染前完成
    let auth_ctx = AuthContext::restore(&api.config().token_key);
    provide_context(api);
    provide_context(auth_ctx);

    // 3. 获取会话状态信号，用于注入路由服务（解耦！）
    let session_state = auth_ctx.session_state_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session_state=session_state>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
