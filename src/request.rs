use emailcraft_shared::protocol::HttpMethod;
use emailcraft_shared::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 传输层错误：请求未能完成（断网、CORS 拒绝、DNS 失败等）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token))
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON))
    }

    /// 以 `application/x-www-form-urlencoded` 编码请求体
    pub fn with_form(mut self, pairs: &[(&str, &str)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.body = Some(body);
        self.with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_FORM)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 状态码是否为 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器 fetch 返回的 Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)，None 表示模拟网络失败
    responses: RefCell<HashMap<String, Option<(u16, String)>>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_raw_response(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_unreachable(&self, url: &str) {
        self.responses.borrow_mut().insert(url.to_string(), None);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        match self.responses.borrow().get(&url) {
            Some(Some((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(None) => Err(TransportError("Failed to fetch".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_is_urlencoded() {
        let req = HttpRequest::new("http://x/login", HttpMethod::Post)
            .with_form(&[("username", "a b@c.d"), ("password", "p&w")]);

        assert_eq!(req.body.as_deref(), Some("username=a+b%40c.d&password=p%26w"));
        assert_eq!(
            req.headers.get(HEADER_CONTENT_TYPE).map(String::as_str),
            Some(CONTENT_TYPE_FORM)
        );
    }

    #[test]
    fn test_bearer_header() {
        let req = HttpRequest::new("http://x", HttpMethod::Get).with_bearer("abc");
        assert_eq!(
            req.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
            Some("Bearer abc")
        );
    }

    #[test]
    fn test_response_ok_range() {
        let mk = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(mk(200).ok());
        assert!(mk(201).ok());
        assert!(!mk(199).ok());
        assert!(!mk(301).ok());
        assert!(!mk(401).ok());
    }
}
