use crate::api::LoginResponse;
use crate::models::{User, UserRole};
use crate::system::PreferenceStore;
use tracing::info;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

/// 로그인 세션 (토큰 + 현재 사용자)
///
/// 환경설정 저장소의 `access_token`, `refresh_token`, `user` 키에 보관된다.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Session {
    /// 저장된 세션 복원 (access 토큰과 사용자가 모두 있어야 유효)
    pub fn load(prefs: &PreferenceStore) -> Option<Self> {
        let access_token = prefs
            .get::<Option<String>>(ACCESS_TOKEN_KEY, None)
            .filter(|t| !t.trim().is_empty())?;
        let user = prefs.get::<Option<User>>(USER_KEY, None)?;
        Some(Self {
            access_token,
            refresh_token: prefs.get(REFRESH_TOKEN_KEY, None),
            user,
        })
    }

    /// 로그인 응답을 세션으로 저장
    pub fn store(prefs: &mut PreferenceStore, login: LoginResponse) -> Self {
        prefs.set(ACCESS_TOKEN_KEY, &login.access_token);
        match &login.refresh_token {
            Some(token) => prefs.set(REFRESH_TOKEN_KEY, token),
            None => prefs.remove(REFRESH_TOKEN_KEY),
        }
        prefs.set(USER_KEY, &login.user);
        info!(username = %login.user.username, role = login.user.role.as_str(), "session stored");

        Self {
            access_token: login.access_token,
            refresh_token: login.refresh_token,
            user: login.user,
        }
    }

    /// 갱신된 access 토큰 반영
    pub fn replace_access_token(&mut self, prefs: &mut PreferenceStore, token: String) {
        prefs.set(ACCESS_TOKEN_KEY, &token);
        self.access_token = token;
    }

    pub fn clear(prefs: &mut PreferenceStore) {
        prefs.remove(ACCESS_TOKEN_KEY);
        prefs.remove(REFRESH_TOKEN_KEY);
        prefs.remove(USER_KEY);
        info!("session cleared");
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }
}
