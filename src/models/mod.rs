// Data Models - 백엔드 리소스 레코드
pub mod device;
pub mod file;
pub mod log;
pub mod partition;
pub mod user;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use device::{Device, DeviceCreate, DeviceFilter, DeviceUpdate};
pub use file::{FileFilter, FileRecord, FileUpdate};
pub use log::{LogCount, LogEntry, LogFilter, LogStats, LogsCleared};
pub use partition::{Partition, PartitionCreate, PartitionFilter, PartitionUpdate};
pub use user::{DashboardStats, User, UserCreate, UserFilter, UserRole, UserUpdate};

/// 백엔드 레코드 공통 인터페이스
///
/// 식별자 외의 필드는 백엔드가 검증하므로 여기서는 해석하지 않는다.
pub trait Record: DeserializeOwned + Clone + fmt::Debug {
    /// 요청 경로에 쓰는 식별자 (`_id`, 없으면 도메인 id)
    fn record_id(&self) -> &str;

    /// 활성/비활성 상태가 있는 레코드면 반환
    fn status(&self) -> Option<RecordStatus> {
        None
    }
}

/// 레코드 활성 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl RecordStatus {
    /// 상태 토글 (알 수 없는 상태는 활성으로)
    pub fn toggled(self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive | RecordStatus::Unknown => RecordStatus::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
            RecordStatus::Unknown => "unknown",
        }
    }
}

/// `_id`가 비어 있으면 도메인 id로 대체
pub(crate) fn pick_id<'a>(primary: &'a str, secondary: Option<&'a str>) -> &'a str {
    if primary.is_empty() {
        secondary.unwrap_or("")
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle() {
        assert_eq!(RecordStatus::Active.toggled(), RecordStatus::Inactive);
        assert_eq!(RecordStatus::Inactive.toggled(), RecordStatus::Active);
        assert_eq!(RecordStatus::Unknown.toggled(), RecordStatus::Active);
    }

    #[test]
    fn test_status_unknown_value() {
        let status: RecordStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(status, RecordStatus::Unknown);
    }

    #[test]
    fn test_pick_id() {
        assert_eq!(pick_id("abc", Some("dev-1")), "abc");
        assert_eq!(pick_id("", Some("dev-1")), "dev-1");
        assert_eq!(pick_id("", None), "");
    }
}
