//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性，以及导航守卫。

use crate::session::SessionState;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 注册页面
    Signup,
    /// 邮件生成 + 历史侧栏 (需要认证)
    Home,
    /// 完整历史列表 (需要认证)
    History,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/signup" | "/register" => Self::Signup,
            "/home" => Self::Home,
            "/history" => Self::History,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Home => "/home",
            Self::History => "/history",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home | Self::History)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 导航守卫 (Navigation Guard)
// =========================================================

/// 守卫决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// 渲染请求的视图
    Render(AppRoute),
    /// 重定向到另一个视图
    Redirect(AppRoute),
}

impl Navigation {
    /// 最终落地的路由
    pub fn target(&self) -> AppRoute {
        match self {
            Self::Render(route) | Self::Redirect(route) => *route,
        }
    }
}

/// 纯函数：(会话状态, 请求路由) -> 决策
pub fn guard(state: SessionState, requested: AppRoute) -> Navigation {
    match state {
        SessionState::Anonymous if requested.requires_auth() => {
            Navigation::Redirect(AppRoute::auth_failure_redirect())
        }
        SessionState::Authenticated if requested.should_redirect_when_authenticated() => {
            Navigation::Redirect(AppRoute::auth_success_redirect())
        }
        _ => Navigation::Render(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 5] = [
        AppRoute::Login,
        AppRoute::Signup,
        AppRoute::Home,
        AppRoute::History,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_from_path() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path(""), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Signup);
        assert_eq!(AppRoute::from_path("/home/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/history?page=2"), AppRoute::History);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
    }

    #[test]
    fn test_to_path_roundtrips() {
        for route in ALL {
            if route != AppRoute::NotFound {
                assert_eq!(AppRoute::from_path(route.to_path()), route);
            }
        }
    }

    #[test]
    fn test_anonymous_redirected_from_protected_views() {
        for route in ALL.into_iter().filter(AppRoute::requires_auth) {
            assert_eq!(
                guard(SessionState::Anonymous, route),
                Navigation::Redirect(AppRoute::Login)
            );
        }
    }

    #[test]
    fn test_authenticated_redirected_from_auth_views() {
        for route in [AppRoute::Login, AppRoute::Signup] {
            let decision = guard(SessionState::Authenticated, route);
            assert_eq!(decision, Navigation::Redirect(AppRoute::Home));
            assert_ne!(decision.target(), route);
        }
    }

    #[test]
    fn test_render_when_allowed() {
        assert_eq!(
            guard(SessionState::Anonymous, AppRoute::Signup),
            Navigation::Render(AppRoute::Signup)
        );
        assert_eq!(
            guard(SessionState::Authenticated, AppRoute::History),
            Navigation::Render(AppRoute::History)
        );
        for state in [SessionState::Anonymous, SessionState::Authenticated] {
            assert_eq!(
                guard(state, AppRoute::NotFound),
                Navigation::Render(AppRoute::NotFound)
            );
        }
    }

    #[test]
    fn test_guard_never_redirects_to_a_blocked_view() {
        for state in [SessionState::Anonymous, SessionState::Authenticated] {
            for route in ALL {
                let target = guard(state, route).target();
                assert_eq!(guard(state, target), Navigation::Render(target));
            }
        }
    }
}
