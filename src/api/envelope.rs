//! 모든 리소스 호출이 돌려주는 결과 봉투.
//!
//! 호출 경계 밖으로 에러를 던지지 않는다. 성공이면 데이터, 실패면
//! 사람이 읽을 수 있는 메시지 하나를 담는다.

use super::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// 메시지가 비어 있는 실패에 쓰는 기본 문구
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// 성공/실패 태그가 붙은 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure { message: String },
}

impl<T> Envelope<T> {
    /// 실패 봉투 생성 (빈 메시지는 "Unknown error"로 대체)
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };
        Envelope::Failure { message }
    }

    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Envelope::Success(data),
            Err(err) => Envelope::failure(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success(data) => Envelope::Success(f(data)),
            Envelope::Failure { message } => Envelope::Failure { message },
        }
    }
}

impl<T> Envelope<Page<T>> {
    /// 목록 항목 (실패 시 빈 슬라이스; `error()`로 실패 여부를 먼저 확인할 것)
    pub fn items(&self) -> &[T] {
        match self {
            Envelope::Success(page) => &page.items,
            Envelope::Failure { .. } => &[],
        }
    }
}

impl Envelope<Deleted> {
    /// 삭제 성공 플래그
    pub fn success(&self) -> bool {
        self.is_success()
    }
}

/// 목록 응답 (백엔드 페이로드를 그대로 옮긴 것)
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

#[derive(Deserialize)]
struct PageMeta {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    per_page: Option<u32>,
    #[serde(default)]
    pages: Option<u32>,
}

impl<T: DeserializeOwned> Page<T> {
    /// `{ <collection_key>: [...], total, page, per_page, pages }` 형태 해석
    ///
    /// 메타 필드가 빠졌으면 요청 값과 항목 수로 채운다.
    pub(crate) fn from_payload(
        mut payload: Value,
        collection_key: &'static str,
        requested_page: u32,
        requested_per_page: u32,
    ) -> Result<Self, ApiError> {
        let items_value = payload
            .get_mut(collection_key)
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or(ApiError::MissingField(collection_key))?;
        let items: Vec<T> = serde_json::from_value(items_value)?;
        let meta: PageMeta = serde_json::from_value(payload)?;

        let per_page = meta.per_page.unwrap_or(requested_per_page).max(1);
        let total = meta.total.unwrap_or(items.len() as u64);
        let pages = meta
            .pages
            .unwrap_or_else(|| total.div_ceil(per_page as u64) as u32);

        Ok(Self {
            items,
            total,
            page: meta.page.unwrap_or(requested_page),
            per_page,
            pages,
        })
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// 삭제 응답
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Device;
    use serde_json::json;

    #[test]
    fn test_failure_never_has_empty_message() {
        let envelope: Envelope<()> = Envelope::failure("   ");
        assert_eq!(envelope.error(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_failed_page_is_empty_with_error() {
        let envelope: Envelope<Page<Device>> = Envelope::failure("boom");
        assert!(envelope.items().is_empty());
        assert_eq!(envelope.error(), Some("boom"));
    }

    #[test]
    fn test_page_from_payload_with_meta() {
        let payload = json!({
            "devices": [{ "_id": "a", "device_name": "A", "device_type": "usb" }],
            "total": 11,
            "page": 2,
            "per_page": 10,
            "pages": 2
        });
        let page: Page<Device> = Page::from_payload(payload, "devices", 1, 10).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 11);
        assert_eq!(page.page, 2);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_page_from_payload_without_meta() {
        let payload = json!({ "devices": [] });
        let page: Page<Device> = Page::from_payload(payload, "devices", 3, 5).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 5);
        assert_eq!(page.pages, 0);
    }

    #[test]
    fn test_page_missing_collection_key() {
        let result: Result<Page<Device>, _> =
            Page::from_payload(json!({ "total": 0 }), "devices", 1, 10);
        assert!(matches!(result, Err(ApiError::MissingField("devices"))));
    }

    #[test]
    fn test_map_keeps_failure_message() {
        let envelope: Envelope<u32> = Envelope::failure("nope");
        assert_eq!(envelope.map(|n| n + 1).error(), Some("nope"));
    }
}
