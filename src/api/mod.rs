// API Layer - 백엔드 리소스 API 클라이언트
mod auth;
mod envelope;
mod error;
mod resource;


pub use auth::{Acknowledgement, AuthClient, LoginResponse, RegisterData};
pub use envelope::{Deleted, Envelope, Page, UNKNOWN_ERROR};
pub use error::ApiError;
pub use resource::{Creatable, Editable, Resource, ResourceClient};

use crate::models::{Device, FileRecord, LogEntry, Partition, User};
use crate::utils::error::Result;
use reqwest::{IntoUrl, Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

/// 기본 백엔드 주소
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// 백엔드 HTTP 클라이언트
///
/// 요청마다 세션의 access 토큰을 Bearer 헤더로 붙인다. 타임아웃은 두지 않고
/// 전송 계층 기본값을 따른다.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fingerscanner-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// access 토큰 설정/해제
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token.filter(|t| !t.trim().is_empty());
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn devices(&self) -> ResourceClient<'_, Device> {
        ResourceClient::new(self)
    }

    pub fn users(&self) -> ResourceClient<'_, User> {
        ResourceClient::new(self)
    }

    pub fn partitions(&self) -> ResourceClient<'_, Partition> {
        ResourceClient::new(self)
    }

    pub fn files(&self) -> ResourceClient<'_, FileRecord> {
        ResourceClient::new(self)
    }

    /// 시스템 로그 (관리자 전용)
    pub fn logs(&self) -> ResourceClient<'_, LogEntry> {
        ResourceClient::new(self)
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_with_token(method, path, self.access_token.as_deref())
    }

    pub(crate) fn request_with_token(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> RequestBuilder {
        self.build(method, format!("{}{}", self.base_url, path), token)
    }

    pub(crate) fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.build(method, url, self.access_token.as_deref())
    }

    /// 컬렉션 경로 뒤에 식별자를 세그먼트 하나로 붙인 URL
    ///
    /// `/`, `?`, `#` 등은 퍼센트 인코딩되어 다른 경로나 쿼리로 새지 않는다.
    pub(crate) fn record_url(&self, path: &str, id: &str) -> std::result::Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|err| ApiError::InvalidRequest(format!("Invalid URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("Invalid URL: {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn build<U: IntoUrl>(&self, method: Method, url: U, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 요청 1회 전송 후 JSON 본문 반환 (빈 본문은 `Null`)
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
    ) -> std::result::Result<Value, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response");

        let body = response.bytes().await.map_err(ApiError::from_transport)?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
