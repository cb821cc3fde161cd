use crate::{EmailHistoryEntry, Tone};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// How an endpoint expects to be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Public endpoint, no credentials attached.
    None,
    /// `Authorization: Bearer <token>`
    Bearer,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Credentials the endpoint requires.
    const AUTH: AuthScheme;
}

// =========================================================
// Request Definitions
// =========================================================

/// Create an account.
///
/// The path can be overridden at runtime (`/signup` on older deployments).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Every field is optional: older backends only return `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = "/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::None;
}

/// Exchange credentials for a bearer token.
///
/// Sent either as JSON or as an OAuth2 password form, depending on configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
    /// Present on failed logins that still answer 2xx.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::None;
}

/// Generate an email draft from a subject and a tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateEmailRequest {
    pub subject: String,
    pub tone: Tone,
}

/// The backend also echoes `subject` and `tone`; the request already carries both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateEmailResponse {
    #[serde(default, alias = "emailBody", alias = "generatedEmail")]
    pub email_body: Option<String>,
}

impl ApiRequest for GenerateEmailRequest {
    type Response = GenerateEmailResponse;
    const PATH: &'static str = "/generate-email";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}

/// List previously generated emails of the current user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmailHistoryRequest;

impl ApiRequest for EmailHistoryRequest {
    type Response = Vec<EmailHistoryEntry>;
    const PATH: &'static str = "/email-history";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}
