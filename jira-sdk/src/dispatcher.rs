// ABOUTME: Authenticated HTTP dispatch against REST v2, REST v3 and the Agile API
// ABOUTME: Classifies failures and falls back once to the other API version in auto mode

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use crate::constants::{self, fallback, paths};
use crate::credentials::CredentialSet;
use crate::error::{JiraError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    V3,
}

impl ApiVersion {
    pub fn number(self) -> u8 {
        match self {
            ApiVersion::V2 => 2,
            ApiVersion::V3 => 3,
        }
    }

    pub fn base_path(self) -> &'static str {
        match self {
            ApiVersion::V2 => paths::REST_V2,
            ApiVersion::V3 => paths::REST_V3,
        }
    }

    pub fn other(self) -> Self {
        match self {
            ApiVersion::V2 => ApiVersion::V3,
            ApiVersion::V3 => ApiVersion::V2,
        }
    }

    fn from_number(number: u8) -> Self {
        if number == 2 {
            ApiVersion::V2
        } else {
            ApiVersion::V3
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// How the dispatcher picks a REST API version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersionMode {
    V2,
    V3,
    #[default]
    Auto,
}

impl FromStr for ApiVersionMode {
    type Err = JiraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "2" | "v2" => Ok(ApiVersionMode::V2),
            "3" | "v3" => Ok(ApiVersionMode::V3),
            "auto" => Ok(ApiVersionMode::Auto),
            other => Err(JiraError::InvalidInput {
                message: format!("Unknown API version '{}'. Use 2, 3 or auto", other),
            }),
        }
    }
}

impl fmt::Display for ApiVersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersionMode::V2 => write!(f, "2"),
            ApiVersionMode::V3 => write!(f, "3"),
            ApiVersionMode::Auto => write!(f, "auto"),
        }
    }
}

/// A concrete request relative to a base path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone)]
pub enum Auth {
    Bearer(SecretString),
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Auth {
    pub fn from_credentials(credentials: &CredentialSet) -> Self {
        if credentials.is_bearer() {
            Auth::Bearer(credentials.token().clone())
        } else {
            Auth::Basic {
                username: credentials.username().to_string(),
                password: credentials.token().clone(),
            }
        }
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Bearer(token) => request.bearer_auth(token.expose_secret()),
            Auth::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }
}

/// A failure as the transport saw it, before classification
#[derive(Debug, Clone, PartialEq)]
pub enum RawFailure {
    /// The server answered with a non-success status
    Status { status: u16, body: String },
    /// No response was received (connect, DNS, TLS, timeout)
    Transport { message: String },
    /// A success response whose body could not be decoded
    Decode { message: String },
}

impl RawFailure {
    fn from_reqwest(err: reqwest::Error) -> Self {
        // The URL would leak path fragments into fallback matching
        let err = err.without_url();
        if err.is_decode() {
            RawFailure::Decode {
                message: err.to_string(),
            }
        } else {
            RawFailure::Transport {
                message: err.to_string(),
            }
        }
    }

    /// Messages the service put in `errorMessages` and `errors`
    pub fn error_messages(&self) -> Vec<String> {
        let RawFailure::Status { body, .. } = self else {
            return Vec::new();
        };
        let Ok(payload) = serde_json::from_str::<Value>(body) else {
            return Vec::new();
        };

        let mut messages: Vec<String> = payload
            .get("errorMessages")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = payload.get("errors").and_then(Value::as_object) {
            messages.extend(errors.values().filter_map(Value::as_str).map(str::to_string));
        }

        messages
    }

    fn text(&self) -> String {
        match self {
            RawFailure::Status { body, .. } => body.to_lowercase(),
            RawFailure::Transport { message } | RawFailure::Decode { message } => {
                message.to_lowercase()
            }
        }
    }

    /// Whether the failure means this API version endpoint is unavailable
    pub fn is_fallback_eligible(&self) -> bool {
        if let RawFailure::Status { status, .. } = self {
            if matches!(status, 404 | 410) {
                return true;
            }
        }

        let text = self.text();
        fallback::REMOVED_SIGNATURES
            .iter()
            .any(|signature| text.contains(signature))
            || text.contains(fallback::DEPRECATED_SEARCH_SIGNATURE)
            || (text.contains("search") && text.contains("deprecated"))
    }
}

/// Map a raw failure onto the error taxonomy
pub fn classify(failure: &RawFailure) -> JiraError {
    match failure {
        RawFailure::Status { status, .. } => match status {
            401 => JiraError::AuthenticationFailed,
            403 => JiraError::AccessDenied,
            404 | 410 => JiraError::NotFound,
            _ => {
                let messages = failure.error_messages();
                let message = if messages.is_empty() {
                    "API request failed".to_string()
                } else {
                    messages.join(", ")
                };
                JiraError::RemoteApi {
                    status: *status,
                    message,
                }
            }
        },
        RawFailure::Transport { message } => JiraError::Network {
            message: message.clone(),
        },
        RawFailure::Decode { message } => JiraError::InvalidResponse {
            message: message.clone(),
        },
    }
}

pub struct Dispatcher {
    http: reqwest::Client,
    server: String,
    auth: Auth,
    mode: ApiVersionMode,
    preferred: AtomicU8,
}

impl Dispatcher {
    pub fn new(
        credentials: &CredentialSet,
        mode: ApiVersionMode,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| JiraError::InvalidInput {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        let preferred = match mode {
            ApiVersionMode::V2 => ApiVersion::V2,
            ApiVersionMode::V3 | ApiVersionMode::Auto => ApiVersion::V3,
        };

        Ok(Self {
            http,
            server: credentials.server().to_string(),
            auth: Auth::from_credentials(credentials),
            mode,
            preferred: AtomicU8::new(preferred.number()),
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn mode(&self) -> ApiVersionMode {
        self.mode
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn preferred_version(&self) -> ApiVersion {
        ApiVersion::from_number(self.preferred.load(Ordering::Relaxed))
    }

    /// Call a versioned REST endpoint. `route` builds the request for a
    /// given version so paths and parameters may differ between versions.
    pub async fn request<F>(&self, method: Method, route: F) -> Result<Value>
    where
        F: Fn(ApiVersion) -> RequestSpec,
    {
        let version = self.preferred_version();
        let first = self
            .send(&method, version.base_path(), &route(version))
            .await;

        let failure = match first {
            Ok(body) => return Ok(body),
            Err(failure) => failure,
        };

        if self.mode != ApiVersionMode::Auto || !failure.is_fallback_eligible() {
            return Err(classify(&failure));
        }

        let alternate = version.other();
        log::info!(
            "REST {} endpoint unavailable, retrying with {}",
            version,
            alternate
        );

        match self
            .send(&method, alternate.base_path(), &route(alternate))
            .await
        {
            Ok(body) => {
                self.preferred.store(alternate.number(), Ordering::Relaxed);
                Ok(body)
            }
            Err(second) => Err(classify(&second)),
        }
    }

    /// Call the Agile API. There is no version fallback here.
    pub async fn agile(&self, method: Method, spec: RequestSpec) -> Result<Value> {
        self.send(&method, paths::AGILE, &spec)
            .await
            .map_err(|failure| classify(&failure))
    }

    fn url(&self, base: &str, path: &str) -> String {
        format!("{}{}{}", self.server, base, path)
    }

    async fn send(
        &self,
        method: &Method,
        base: &str,
        spec: &RequestSpec,
    ) -> std::result::Result<Value, RawFailure> {
        let url = self.url(base, &spec.path);
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }
        request = self.auth.apply(request);

        let response = request.send().await.map_err(RawFailure::from_reqwest)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(RawFailure::from_reqwest)?;

        if !status.is_success() {
            log::debug!("{} {} failed with {}", method, url, status);
            return Err(RawFailure::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| RawFailure::Decode {
            message: e.to_string(),
        })
    }
}
