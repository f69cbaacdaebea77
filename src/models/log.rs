use super::Record;
use serde::{Deserialize, Serialize};

/// 시스템 로그 항목 (`GET /api/logs/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub log_type: String,
    #[serde(default)]
    pub message: String,
    /// 로그 수준 (`info`, `warning`, `error`, `critical`)
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl Record for LogEntry {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl LogEntry {
    pub fn is_error(&self) -> bool {
        matches!(self.status.as_str(), "error" | "critical")
    }
}

/// 로그 목록 필터 (날짜는 ISO 8601 문자열 그대로 전달)
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// 그룹별 건수 (`{"_id": <값>, "count": n}`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogCount {
    #[serde(rename = "_id", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub count: u64,
}

/// 로그 통계 (`GET /api/logs/stats`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogStats {
    #[serde(default)]
    pub log_types: Vec<LogCount>,
    #[serde(default)]
    pub statuses: Vec<LogCount>,
    #[serde(default)]
    pub recent_errors: Vec<LogEntry>,
    #[serde(default)]
    pub total_logs: u64,
}

impl LogStats {
    /// 상태별 건수 요약 (`error 3 · info 12`)
    pub fn status_summary(&self) -> String {
        self.statuses
            .iter()
            .map(|c| format!("{} {}", c.key.as_deref().unwrap_or("-"), c.count))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// 오래된 로그 삭제 응답
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogsCleared {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_count: u64,
}
