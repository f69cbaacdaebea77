use super::envelope::Envelope;
use super::error::ApiError;
use super::resource::settle;
use super::ApiClient;
use crate::models::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Serialize)]
struct LoginCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct FingerprintLogin<'a> {
    fingerprint: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPassword<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct FingerprintUpdate<'a> {
    fingerprint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint_picture: Option<&'a str>,
}

/// 로그인 응답
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// 회원가입 요청
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// 메시지만 담은 응답 (`{"message": "..."}`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

/// `/api/auth` 클라이언트
///
/// 토큰 저장은 호출한 쪽(Session)이 맡는다. 만료된 토큰으로 실패한 요청을
/// 자동으로 재시도하지 않으며, 갱신은 `refresh_token` 호출로만 한다.
pub struct AuthClient<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 이메일/비밀번호 로그인
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Envelope<LoginResponse> {
        let body = LoginCredentials { email, password };
        let result: Result<LoginResponse, ApiError> =
            self.post_json("/api/auth/login", &body).await;
        if let Ok(response) = &result {
            info!(username = %response.user.username, "login succeeded");
        }
        settle("login", result)
    }

    /// 지문 데이터 로그인
    #[instrument(skip_all)]
    pub async fn login_with_fingerprint(&self, fingerprint: &str) -> Envelope<LoginResponse> {
        let body = FingerprintLogin { fingerprint };
        settle(
            "login_with_fingerprint",
            self.post_json("/api/auth/login", &body).await,
        )
    }

    /// 서버 측 로그아웃 (로컬 세션 정리는 호출한 쪽 책임)
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Envelope<Acknowledgement> {
        let builder = self.api.request(Method::POST, "/api/auth/logout");
        let result = match self.api.send(builder).await {
            Ok(payload) if payload.is_null() => Ok(Acknowledgement::default()),
            Ok(payload) => serde_json::from_value(payload).map_err(ApiError::from),
            Err(err) => Err(err),
        };
        settle("logout", result)
    }

    /// refresh 토큰으로 새 access 토큰 발급
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, refresh_token: &str) -> Envelope<String> {
        let builder = self
            .api
            .request_with_token(Method::POST, "/api/auth/refresh", Some(refresh_token))
            .json(&serde_json::json!({}));
        let result = match self.api.send(builder).await {
            Ok(payload) => serde_json::from_value::<RefreshResponse>(payload)
                .map(|r| r.access_token)
                .map_err(ApiError::from),
            Err(err) => Err(err),
        };
        settle("refresh_token", result)
    }

    #[instrument(skip_all, fields(username = %data.username))]
    pub async fn register(&self, data: &RegisterData) -> Envelope<Acknowledgement> {
        settle(
            "register",
            self.post_json("/api/auth/register", data).await,
        )
    }

    #[instrument(skip(self))]
    pub async fn reset_password_request(&self, email: &str) -> Envelope<Acknowledgement> {
        let body = ResetPasswordRequest { email };
        settle(
            "reset_password_request",
            self.post_json("/api/auth/reset-password-request", &body)
                .await,
        )
    }

    /// 메일로 받은 토큰으로 새 비밀번호 설정 (강도 검증은 백엔드가 한다)
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Envelope<Acknowledgement> {
        let body = ResetPassword {
            token,
            new_password,
        };
        settle(
            "reset_password",
            self.post_json("/api/auth/reset-password", &body).await,
        )
    }

    /// 로그인한 사용자의 지문 등록 (base64 이미지, data URL 접두사 허용)
    #[instrument(skip_all)]
    pub async fn update_fingerprint(
        &self,
        fingerprint: &str,
        picture: Option<&str>,
    ) -> Envelope<Acknowledgement> {
        let body = FingerprintUpdate {
            fingerprint,
            fingerprint_picture: picture,
        };
        settle(
            "update_fingerprint",
            self.post_json("/api/auth/update-fingerprint", &body).await,
        )
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let builder = self.api.request(Method::POST, path).json(body);
        let payload = self.api.send(builder).await?;
        Ok(serde_json::from_value(payload)?)
    }
}
