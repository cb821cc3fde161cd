//! EmailCraft API 客户端
//!
//! 四个操作，全部单次尝试、不自动重试：
//! - `register`: 非幂等，绝不能自动重试
//! - `authenticate`: 成功后由调用方通过 `Session` 持久化令牌
//! - `generate_content`: 幂等，调用方可放心重试
//! - `fetch_history`: 按时间倒序返回

use crate::config::{ApiConfig, LoginEncoding};
use crate::error::{
    ApiError, ApiResult, GENERATE_FALLBACK_MESSAGE, HISTORY_FALLBACK_MESSAGE,
    LOGIN_FAILED_MESSAGE, RETRY_MESSAGE, SESSION_EXPIRED_MESSAGE, SIGNUP_FAILED_MESSAGE,
    SIGNUP_SUCCESS_MESSAGE,
};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use emailcraft_shared::protocol::{
    ApiRequest, AuthScheme, EmailHistoryRequest, GenerateEmailRequest, GenerateEmailResponse,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use emailcraft_shared::{EmailHistoryEntry, GeneratedDraft, MAX_SUBJECT_LEN, Tone};


const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
const MISSING_SUBJECT_MESSAGE: &str = "Please enter an email subject";
const MISSING_TONE_MESSAGE: &str = "Please select a tone";

/// 注册结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct EmailCraftApi<C> {
    config: ApiConfig,
    client: C,
}

impl<C: HttpClient> EmailCraftApi<C> {
    pub fn new(config: ApiConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// 按端点元数据构建请求，需要 bearer 且令牌存在时附加认证头
    fn build<R: ApiRequest>(&self, path: &str, token: Option<&str>) -> HttpRequest {
        let req = HttpRequest::new(&self.config.url(path), R::METHOD);
        match (R::AUTH, token) {
            (AuthScheme::Bearer, Some(token)) => req.with_bearer(token),
            _ => req,
        }
    }

    async fn dispatch(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        log::debug!("[Api] {:?} {}", req.method, req.url);
        let url = req.url.clone();
        let resp = self.client.send(req).await.map_err(|e| {
            log::warn!("[Api] {} unreachable: {}", url, e);
            ApiError::from(e)
        })?;
        log::debug!("[Api] {} -> {}", url, resp.status);
        Ok(resp)
    }

    /// 注册新用户
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<RegisterOutcome> {
        if [name, email, password].iter().any(|v| v.trim().is_empty()) {
            return Err(ApiError::validation(MISSING_FIELDS_MESSAGE));
        }

        let body = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let req = self
            .build::<RegisterRequest>(&self.config.register_path, None)
            .with_json(&body)
            .map_err(|e| ApiError::validation(e.to_string()))?;
        let resp = self.dispatch(req).await?;

        if resp.ok() {
            let parsed: RegisterResponse = resp.json().unwrap_or_default();
            return Ok(RegisterOutcome {
                message: parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| SIGNUP_SUCCESS_MESSAGE.to_string()),
                success: parsed.success.unwrap_or(true),
            });
        }

        log::warn!("[Api] register rejected with {}", resp.status);
        Err(match resp.status {
            400..=499 => ApiError::validation(
                detail_message(&resp).unwrap_or_else(|| SIGNUP_FAILED_MESSAGE.to_string()),
            ),
            status => ApiError::server(status, RETRY_MESSAGE),
        })
    }

    /// 用凭据换取 bearer token
    pub async fn authenticate(&self, identifier: &str, password: &str) -> ApiResult<String> {
        if identifier.trim().is_empty() || password.is_empty() {
            return Err(ApiError::validation(MISSING_FIELDS_MESSAGE));
        }

        let body = LoginRequest {
            username: identifier.trim().to_string(),
            password: password.to_string(),
        };
        let req = self.build::<LoginRequest>(LoginRequest::PATH, None);
        let req = match self.config.login_encoding {
            LoginEncoding::Json => req
                .with_json(&body)
                .map_err(|e| ApiError::validation(e.to_string()))?,
            LoginEncoding::Form => req.with_form(&[
                ("username", body.username.as_str()),
                ("password", body.password.as_str()),
            ]),
        };
        let resp = self.dispatch(req).await?;

        match resp.status {
            200..=299 => {
                let parsed: LoginResponse = resp
                    .json()
                    .map_err(|_| ApiError::server(resp.status, RETRY_MESSAGE))?;
                match parsed.access_token.filter(|t| !t.is_empty()) {
                    Some(token) => Ok(token),
                    None => Err(ApiError::unauthorized(
                        parsed
                            .message
                            .filter(|m| !m.trim().is_empty())
                            .or_else(|| detail_message(&resp))
                            .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
                    )),
                }
            }
            400..=499 => {
                log::warn!("[Api] login rejected with {}", resp.status);
                Err(ApiError::unauthorized(
                    detail_message(&resp).unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
                ))
            }
            status => Err(ApiError::server(status, RETRY_MESSAGE)),
        }
    }

    /// 生成邮件草稿
    ///
    /// 主题为空或未选择语气时直接返回 `Validation`，不发出网络请求。
    /// 任何非 2xx 响应都收敛为固定的回退文案，不透传原始错误。
    pub async fn generate_content(
        &self,
        subject: &str,
        tone: Option<Tone>,
        token: Option<&str>,
    ) -> ApiResult<GeneratedDraft> {
        let body = validate_generation(subject, tone)?;
        let req = self
            .build::<GenerateEmailRequest>(GenerateEmailRequest::PATH, token)
            .with_json(&body)
            .map_err(|e| ApiError::validation(e.to_string()))?;
        let resp = self.dispatch(req).await?;

        match resp.status {
            200..=299 => {
                let parsed: GenerateEmailResponse = resp.json().unwrap_or_default();
                match parsed.email_body.filter(|b| !b.trim().is_empty()) {
                    Some(email_body) => Ok(GeneratedDraft::new(body.subject, body.tone, email_body)),
                    None => {
                        log::warn!("[Api] generate-email returned no body");
                        Err(ApiError::server(resp.status, GENERATE_FALLBACK_MESSAGE))
                    }
                }
            }
            401 => Err(ApiError::unauthorized(SESSION_EXPIRED_MESSAGE)),
            status => {
                log::warn!(
                    "[Api] generate-email failed with {}: {}",
                    status,
                    detail_message(&resp).unwrap_or_default()
                );
                Err(ApiError::server(status, GENERATE_FALLBACK_MESSAGE))
            }
        }
    }

    /// 获取历史记录，按时间倒序（最新在前）
    pub async fn fetch_history(&self, token: &str) -> ApiResult<Vec<EmailHistoryEntry>> {
        if token.is_empty() {
            return Err(ApiError::unauthorized(SESSION_EXPIRED_MESSAGE));
        }

        let req = self.build::<EmailHistoryRequest>(EmailHistoryRequest::PATH, Some(token));
        let resp = self.dispatch(req).await?;

        match resp.status {
            200..=299 => {
                let mut entries: <EmailHistoryRequest as ApiRequest>::Response =
                    resp.json().map_err(|e| {
                        log::warn!("[Api] malformed history payload: {}", e);
                        ApiError::server(resp.status, HISTORY_FALLBACK_MESSAGE)
                    })?;
                entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                Ok(entries)
            }
            401 => Err(ApiError::unauthorized(SESSION_EXPIRED_MESSAGE)),
            status => {
                log::warn!("[Api] email-history failed with {}", status);
                Err(ApiError::server(status, HISTORY_FALLBACK_MESSAGE))
            }
        }
    }
}

/// 客户端校验：主题非空且不超过后端限制，语气必须已选择
pub fn validate_generation(subject: &str, tone: Option<Tone>) -> ApiResult<GenerateEmailRequest> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(ApiError::validation(MISSING_SUBJECT_MESSAGE));
    }
    if subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(ApiError::validation(format!(
            "Subject text is too long. Please keep it under {} characters.",
            MAX_SUBJECT_LEN
        )));
    }
    let tone = tone.ok_or_else(|| ApiError::validation(MISSING_TONE_MESSAGE))?;

    Ok(GenerateEmailRequest {
        subject: subject.to_string(),
        tone,
    })
}

/// 提取后端错误详情：`{"detail": "..."}` 或 `{"message": "..."}`
///
/// 非字符串的 `detail`（如字段校验列表）被忽略。
fn detail_message(resp: &HttpResponse) -> Option<String> {
    let value: serde_json::Value = resp.json().ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
