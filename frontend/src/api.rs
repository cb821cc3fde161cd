use crate::web::{BuildEnv, FetchClient};
use emailcraft::{ApiConfig, EmailCraftApi};
use leptos::prelude::*;

/// 浏览器环境下的 API 客户端
pub type Api = EmailCraftApi<FetchClient>;

/// 按构建期配置创建客户端
pub fn create_api() -> Api {
    let config = ApiConfig::from_env(&BuildEnv);
    log::info!("[Api] backend {}", config.base_url);
    EmailCraftApi::new(config, FetchClient)
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}
