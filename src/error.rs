use crate::request::TransportError;

// =========================================================
// 面向用户的提示文案
// =========================================================

pub const RETRY_MESSAGE: &str = "An error occurred. Please try again.";
pub const GENERATE_FALLBACK_MESSAGE: &str = "An error occurred. Please try again.";
pub const HISTORY_FALLBACK_MESSAGE: &str = "Failed to load email history.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please check your details.";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! Please log in.";

// =========================================================
// API 错误
// =========================================================

/// API 调用错误
///
/// `Display` 即为展示给用户的文本，调用方无需再做映射。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 缺少必填字段（客户端校验），或后端以 4xx 拒绝了输入
    #[error("{0}")]
    Validation(String),
    /// 401：凭据无效或会话过期
    #[error("{message}")]
    Unauthorized { message: String },
    /// 非 2xx 且非 401，或响应体不符合约定
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 请求未能完成
    #[error("An error occurred. Please try again.")]
    Network(#[source] TransportError),
}

impl ApiError {
    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    // --- Accessors ---

    /// 是否应使当前会话失效
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// 对应的 HTTP 状态码（客户端错误与网络错误没有状态码）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Server { status, .. } => Some(*status),
            Self::Validation(_) | Self::Network(_) => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        Self::Network(e)
    }
}

// =========================================================
// 存储错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// 存储不可用（隐私模式、被禁用、非浏览器环境）
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// 写入失败（配额耗尽等）
    #[error("storage write failed: {0}")]
    Write(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_facing() {
        let net = ApiError::from(TransportError("dns".into()));
        assert_eq!(net.to_string(), RETRY_MESSAGE);
        assert_eq!(net.status_code(), None);

        let server = ApiError::server(502, HISTORY_FALLBACK_MESSAGE);
        assert_eq!(server.to_string(), HISTORY_FALLBACK_MESSAGE);
        assert_eq!(server.status_code(), Some(502));
    }

    #[test]
    fn test_only_unauthorized_invalidates_session() {
        assert!(ApiError::unauthorized(SESSION_EXPIRED_MESSAGE).is_unauthorized());
        assert!(!ApiError::server(500, "x").is_unauthorized());
        assert!(!ApiError::validation("x").is_unauthorized());
    }
}
