//! 会话状态机
//!
//! 两个状态：`Anonymous` 与 `Authenticated`，进程生命周期内常驻，没有终止状态。
//! 初始状态在启动时从 `SessionStore` 同步推导。

use crate::error::ApiError;
use crate::storage::{KeyValueStorage, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// 驱动状态迁移的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// 登录成功，携带新令牌
    SignedIn { token: String },
    /// 用户主动注销
    SignedOut,
    /// 任意受保护调用返回 401
    Unauthorized,
}

/// 一次迁移的前后状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SessionState,
    pub to: SessionState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// 会话
///
/// 内存中的令牌是状态的唯一来源，存储只负责跨刷新持久化。
/// 存储写入失败时仍然完成内存迁移，当前标签页内保持可用。
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: SessionStore<S>,
    token: Option<String>,
}

impl<S: KeyValueStorage> Session<S> {
    /// 从存储恢复会话
    pub fn restore(store: SessionStore<S>) -> Self {
        let token = store.get();
        let session = Self { store, token };
        log::debug!("[Session] restored as {:?}", session.state());
        session
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        let from = self.state();

        match event {
            SessionEvent::SignedIn { token } => {
                // 先持久化，再迁移
                if let Err(e) = self.store.set(&token) {
                    log::warn!("[Session] token not persisted: {}", e);
                }
                self.token = Some(token);
            }
            SessionEvent::SignedOut | SessionEvent::Unauthorized => {
                if let Err(e) = self.store.clear() {
                    log::warn!("[Session] token not cleared from storage: {}", e);
                }
                self.token = None;
            }
        }

        let transition = Transition {
            from,
            to: self.state(),
        };
        if transition.changed() {
            log::info!("[Session] {:?} -> {:?}", transition.from, transition.to);
        }
        transition
    }

    /// 观察一次 API 调用结果，401 时使会话失效
    pub fn observe<T>(&mut self, result: &Result<T, ApiError>) -> Option<Transition> {
        match result {
            Err(e) if e.is_unauthorized() => Some(self.apply(SessionEvent::Unauthorized)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session_with(token: Option<&str>) -> (MemoryStorage, Session<MemoryStorage>) {
        let storage = MemoryStorage::new();
        if let Some(t) = token {
            storage.set("accessToken", t).unwrap();
        }
        let session = Session::restore(SessionStore::new(storage.clone(), "accessToken"));
        (storage, session)
    }

    #[test]
    fn test_initial_state_derived_from_store() {
        let (_, anon) = session_with(None);
        assert_eq!(anon.state(), SessionState::Anonymous);

        let (_, authed) = session_with(Some("abc"));
        assert_eq!(authed.state(), SessionState::Authenticated);
        assert_eq!(authed.token(), Some("abc"));
    }

    #[test]
    fn test_sign_in_persists_and_transitions() {
        let (storage, mut session) = session_with(None);
        let t = session.apply(SessionEvent::SignedIn {
            token: "abc".into(),
        });

        assert_eq!(
            t,
            Transition {
                from: SessionState::Anonymous,
                to: SessionState::Authenticated
            }
        );
        assert_eq!(storage.get("accessToken").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_sign_in_again_replaces_token() {
        let (storage, mut session) = session_with(Some("old"));
        let t = session.apply(SessionEvent::SignedIn {
            token: "new".into(),
        });

        assert!(!t.changed());
        assert_eq!(session.token(), Some("new"));
        assert_eq!(storage.get("accessToken").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_sign_out_and_unauthorized_clear() {
        for event in [SessionEvent::SignedOut, SessionEvent::Unauthorized] {
            let (storage, mut session) = session_with(Some("abc"));
            let t = session.apply(event);

            assert_eq!(t.to, SessionState::Anonymous);
            assert_eq!(storage.get("accessToken").unwrap(), None);
        }
    }

    #[test]
    fn test_sign_out_when_anonymous_is_noop() {
        for event in [SessionEvent::SignedOut, SessionEvent::Unauthorized] {
            let (storage, mut session) = session_with(None);
            // 内存中匿名，但存储里残留了空令牌
            storage.set("accessToken", "").unwrap();

            let t = session.apply(event);

            assert!(!t.changed());
            assert_eq!(session.state(), SessionState::Anonymous);
            assert_eq!(storage.get("accessToken").unwrap(), None);
        }
    }

    #[test]
    fn test_observe_only_reacts_to_401() {
        let (_, mut session) = session_with(Some("abc"));

        let server: Result<(), ApiError> = Err(ApiError::server(500, "boom"));
        assert_eq!(session.observe(&server), None);
        assert_eq!(session.state(), SessionState::Authenticated);

        let expired: Result<(), ApiError> = Err(ApiError::unauthorized("expired"));
        let t = session.observe(&expired).unwrap();
        assert_eq!(t.from, SessionState::Authenticated);
        assert_eq!(t.to, SessionState::Anonymous);
    }

    #[test]
    fn test_unavailable_storage_still_signs_in_for_tab() {
        let store = SessionStore::new(MemoryStorage::unavailable(), "accessToken");
        let mut session = Session::restore(store);
        assert_eq!(session.state(), SessionState::Anonymous);

        session.apply(SessionEvent::SignedIn {
            token: "abc".into(),
        });
        assert_eq!(session.state(), SessionState::Authenticated);
    }
}
