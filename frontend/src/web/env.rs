//! 构建期环境变量
//!
//! 浏览器里没有进程环境变量，配置在 `trunk build` 时通过 `option_env!` 固化进产物。

use emailcraft::EnvAdapter;
use emailcraft::config::{VAR_API_URL, VAR_LOGIN_ENCODING, VAR_REGISTER_PATH, VAR_TOKEN_KEY};
use log::LevelFilter;

pub const VAR_LOG: &str = "EMAILCRAFT_LOG";

/// 编译时捕获的环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            VAR_API_URL => option_env!("EMAILCRAFT_API_URL"),
            VAR_REGISTER_PATH => option_env!("EMAILCRAFT_REGISTER_PATH"),
            VAR_LOGIN_ENCODING => option_env!("EMAILCRAFT_LOGIN_ENCODING"),
            VAR_TOKEN_KEY => option_env!("EMAILCRAFT_TOKEN_KEY"),
            VAR_LOG => option_env!("EMAILCRAFT_LOG"),
            _ => None,
        };
        value.map(str::to_string)
    }
}

impl BuildEnv {
    /// 日志级别，默认 info
    pub fn log_level(&self) -> LevelFilter {
        self.var(VAR_LOG)
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }
}
