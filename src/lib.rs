//! EmailCraft 客户端核心
//!
//! 与 DOM 无关的纯 Rust 层，前端只负责把它接到浏览器 API 上：
//! - `request`: HTTP 抽象（浏览器用 fetch 实现，测试用 Mock）
//! - `api`: 四个后端操作及响应归一化
//! - `storage`: 令牌存储
//! - `session`: 会话状态机
//! - `route`: 路由定义与导航守卫
//! - `config`: 运行时配置

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;

pub use api::{EmailCraftApi, RegisterOutcome};
pub use config::{ApiConfig, EnvAdapter, LoginEncoding};
pub use error::{ApiError, ApiResult, StorageError};
pub use request::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use route::{AppRoute, Navigation, guard};
pub use session::{Session, SessionEvent, SessionState, Transition};
pub use storage::{KeyValueStorage, MemoryStorage, SessionStore};
