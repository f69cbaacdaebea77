use super::{pick_id, Record, RecordStatus};
use serde::{Deserialize, Serialize};

/// 장치 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub device_description: Option<String>,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub added_date: Option<String>,
}

impl Record for Device {
    fn record_id(&self) -> &str {
        pick_id(&self.id, self.device_id.as_deref())
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }
}

/// 장치 생성 요청
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceCreate {
    pub device_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_description: Option<String>,
    pub device_type: String,
    pub capacity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

/// 장치 부분 수정 요청 (지정한 필드만 전송)
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl DeviceUpdate {
    pub fn status(status: RecordStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// 장치 목록 필터
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}
