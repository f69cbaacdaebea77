use super::{pick_id, Record, RecordStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 사용자 역할
///
/// 백엔드는 역할 문자열을 검증하지 않고 저장하므로 모르는 값은 `Unknown`으로 받는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Client => "client",
            UserRole::Unknown => "unknown",
        }
    }
}

/// 사용자 레코드
///
/// 목록/조회 응답은 `_id`와 `user_id`를 모두 담고, 로그인 응답은 `user_id`만 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub account_status: Option<RecordStatus>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl Record for User {
    fn record_id(&self) -> &str {
        pick_id(&self.id, self.user_id.as_deref())
    }

    fn status(&self) -> Option<RecordStatus> {
        self.account_status
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserUpdate {
    pub fn account_status(status: RecordStatus) -> Self {
        Self {
            account_status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

/// 관리자 대시보드 통계 (`GET /api/users/dashboard/stats`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub stats: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub recent_activity: BTreeMap<String, serde_json::Value>,
}

impl DashboardStats {
    /// 화면 표시용 (이름, 값) 목록
    pub fn rows(&self) -> Vec<(String, String)> {
        self.stats
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }

    /// 최근 활동 항목 수 (카테고리별)
    pub fn recent_counts(&self) -> Vec<(String, usize)> {
        self.recent_activity
            .iter()
            .map(|(name, value)| (name.clone(), value.as_array().map_or(0, Vec::len)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_user_uses_user_id() {
        let user: User = serde_json::from_value(serde_json::json!({
            "user_id": "u-1",
            "username": "alice",
            "email": "alice@example.com",
            "role": "admin",
            "account_status": "active",
            "fingerprint_hashes": []
        }))
        .unwrap();

        assert_eq!(user.record_id(), "u-1");
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn test_unrecognized_role_is_unknown() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u-2",
            "username": "op",
            "role": "operator"
        }))
        .unwrap();

        assert_eq!(user.role, UserRole::Unknown);
        assert_eq!(user.role.as_str(), "unknown");
    }

    #[test]
    fn test_dashboard_stats_rows() {
        let stats: DashboardStats = serde_json::from_value(serde_json::json!({
            "stats": { "devices": 3, "users": 12 },
            "recent_activity": { "users": [{}, {}], "files": [] }
        }))
        .unwrap();

        assert_eq!(
            stats.rows(),
            vec![
                ("devices".to_string(), "3".to_string()),
                ("users".to_string(), "12".to_string())
            ]
        );
        assert_eq!(
            stats.recent_counts(),
            vec![("files".to_string(), 0), ("users".to_string(), 2)]
        );
    }
}
