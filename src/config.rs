use emailcraft_shared::protocol::{ApiRequest, RegisterRequest};
use std::str::FromStr;

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果构建环境中没有定义对应变量，则使用这些值
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";

pub const VAR_API_URL: &str = "EMAILCRAFT_API_URL";
pub const VAR_REGISTER_PATH: &str = "EMAILCRAFT_REGISTER_PATH";
pub const VAR_LOGIN_ENCODING: &str = "EMAILCRAFT_LOGIN_ENCODING";
pub const VAR_TOKEN_KEY: &str = "EMAILCRAFT_TOKEN_KEY";

/// 抽象环境变量接口
pub trait EnvAdapter {
    fn var(&self, name: &str) -> Option<String>;
}

/// 登录请求体的编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginEncoding {
    #[default]
    Json,
    /// OAuth2 password form
    Form,
}

impl FromStr for LoginEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "form" | "urlencoded" => Ok(Self::Form),
            other => Err(format!("unknown login encoding: {}", other)),
        }
    }
}

/// API 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// 后端根地址，不带结尾斜杠
    pub base_url: String,
    pub register_path: String,
    pub login_encoding: LoginEncoding,
    /// 令牌在本地存储中的键名
    pub token_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            register_path: RegisterRequest::PATH.to_string(),
            login_encoding: LoginEncoding::default(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl ApiConfig {
    /// 从环境读取配置，读不到或不合法就用默认值
    pub fn from_env<E: EnvAdapter>(env: &E) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| env.var(name).filter(|v| !v.trim().is_empty());

        let base_url = non_empty(VAR_API_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let register_path = non_empty(VAR_REGISTER_PATH)
            .map(|path| normalize_path(path.trim()))
            .unwrap_or(defaults.register_path);

        let login_encoding = match non_empty(VAR_LOGIN_ENCODING).map(|v| v.parse()) {
            Some(Ok(encoding)) => encoding,
            Some(Err(e)) => {
                log::warn!("[Config] {}, falling back to json", e);
                defaults.login_encoding
            }
            None => defaults.login_encoding,
        };

        let token_key = non_empty(VAR_TOKEN_KEY).unwrap_or(defaults.token_key);

        Self {
            base_url,
            register_path,
            login_encoding,
            token_key,
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================
