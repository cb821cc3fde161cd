//! 认证模块
//!
//! 把核心层的 `Session` 状态机放进 Leptos 信号，与路由系统解耦。
//! 路由服务通过注入的会话状态信号来执行守卫。

use crate::api::Api;
use crate::web::LocalStorage;
use emailcraft::{ApiError, Session, SessionEvent, SessionState, SessionStore};
use leptos::prelude::*;

/// 认证状态
#[derive(Clone, Debug)]
pub struct AuthState {
    pub session: Session<LocalStorage>,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 从 LocalStorage 同步恢复会话，创建认证上下文
    pub fn restore(token_key: &str) -> Self {
        let session = Session::restore(SessionStore::new(LocalStorage, token_key));
        let (state, set_state) = signal(AuthState { session });
        Self { state, set_state }
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn session_state_signal(&self) -> Signal<SessionState> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.state()))
    }

    /// 当前令牌（不追踪）
    pub fn token(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.session.token().map(str::to_string))
    }

    /// 观察受保护调用的结果，401 时清除会话
    ///
    /// 导航由路由服务的会话状态监听自动处理。
    pub fn observe<T>(&self, result: &Result<T, ApiError>) {
        if result.as_ref().is_err_and(ApiError::is_unauthorized) {
            self.set_state.update(|s| {
                s.session.observe(result);
            });
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录并持久化令牌
///
/// 令牌先写入存储再迁移状态，随后路由服务把用户带离登录页。
pub async fn login(ctx: AuthContext, api: Api, identifier: String, password: String) -> Result<(), ApiError> {
    let token = api.authenticate(&identifier, &password).await?;
    ctx.set_state.update(|s| {
        s.session.apply(SessionEvent::SignedIn { token });
    });
    Ok(())
}

/// 注销并清除状态
pub fn logout(ctx: AuthContext) {
    ctx.set_state.update(|s| {
        s.session.apply(SessionEvent::SignedOut);
    });
    // 注意：不需要手动导航，路由服务会监听认证状态变化并自动重定向
}
