use super::{pick_id, Record};
use serde::{Deserialize, Serialize};

/// 파일 레코드 (업로드는 이 클라이언트에서 다루지 않는다)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub partition_id: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

impl Record for FileRecord {
    fn record_id(&self) -> &str {
        pick_id(&self.id, self.file_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_id: Option<String>,
}
