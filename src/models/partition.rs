use super::{pick_id, Record, RecordStatus};
use serde::{Deserialize, Serialize};

/// 파티션 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub partition_id: Option<String>,
    #[serde(default)]
    pub partition_name: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl Record for Partition {
    fn record_id(&self) -> &str {
        pick_id(&self.id, self.partition_id.as_deref())
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PartitionCreate {
    pub partition_name: String,
    pub device_id: String,
    pub format: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PartitionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl PartitionUpdate {
    pub fn status(status: RecordStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PartitionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}
