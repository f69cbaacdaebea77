//! # Resource Client
//!
//! 백엔드 리소스(장치, 사용자, 파티션, 파일, 시스템 로그)마다 같은 모양의 호출을
//! 제공한다. 각 호출은 정확히 한 번 요청을 보내고, 재시도/캐시/타임아웃 없이 결과를
//! [`Envelope`]로 돌려준다.

use super::envelope::{Deleted, Envelope, Page};
use super::error::ApiError;
use super::ApiClient;
use crate::models::{
    DashboardStats, Device, DeviceCreate, DeviceFilter, DeviceUpdate, FileFilter, FileRecord,
    FileUpdate, LogEntry, LogFilter, LogStats, LogsCleared, Partition, PartitionCreate,
    PartitionFilter, PartitionUpdate, Record, User, UserCreate, UserFilter, UserUpdate,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// 목록 조회가 가능한 백엔드 리소스
pub trait Resource: Record {
    /// 컬렉션 경로 (예: `/api/devices`)
    const PATH: &'static str;
    /// 목록 응답에서 항목 배열 키
    const COLLECTION_KEY: &'static str;

    type Filter: Serialize + Default + fmt::Debug;
}

/// 식별자로 조회/수정/삭제할 수 있는 리소스
pub trait Editable: Resource {
    /// 단건 응답에서 레코드 키
    const RECORD_KEY: &'static str;

    type Update: Serialize + fmt::Debug;
}

/// 생성(POST)을 지원하는 리소스
pub trait Creatable: Editable {
    type Create: Serialize + fmt::Debug;
}

impl Resource for Device {
    const PATH: &'static str = "/api/devices";
    const COLLECTION_KEY: &'static str = "devices";
    type Filter = DeviceFilter;
}

impl Editable for Device {
    const RECORD_KEY: &'static str = "device";
    type Update = DeviceUpdate;
}

impl Creatable for Device {
    type Create = DeviceCreate;
}

impl Resource for User {
    const PATH: &'static str = "/api/users";
    const COLLECTION_KEY: &'static str = "users";
    type Filter = UserFilter;
}

impl Editable for User {
    const RECORD_KEY: &'static str = "user";
    type Update = UserUpdate;
}

impl Creatable for User {
    type Create = UserCreate;
}

impl Resource for Partition {
    const PATH: &'static str = "/api/partitions";
    const COLLECTION_KEY: &'static str = "partitions";
    type Filter = PartitionFilter;
}

impl Editable for Partition {
    const RECORD_KEY: &'static str = "partition";
    type Update = PartitionUpdate;
}

impl Creatable for Partition {
    type Create = PartitionCreate;
}

impl Resource for FileRecord {
    const PATH: &'static str = "/api/files";
    const COLLECTION_KEY: &'static str = "files";
    type Filter = FileFilter;
}

impl Editable for FileRecord {
    const RECORD_KEY: &'static str = "file";
    type Update = FileUpdate;
}

/// 시스템 로그는 목록만 있다 (단건 조회/수정/삭제 라우트 없음)
impl Resource for LogEntry {
    const PATH: &'static str = "/api/logs/";
    const COLLECTION_KEY: &'static str = "logs";
    type Filter = LogFilter;
}

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    per_page: u32,
}

/// 리소스 하나에 대한 CRUD 클라이언트
pub struct ResourceClient<'a, R: Resource> {
    api: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    /// 목록 조회 (page, per_page는 1 미만이면 1로 보정)
    #[instrument(skip(self, filter), fields(resource = R::PATH))]
    pub async fn list(&self, page: u32, per_page: u32, filter: &R::Filter) -> Envelope<Page<R>> {
        debug!(?filter, "list");
        settle("list", self.try_list(page.max(1), per_page.max(1), filter).await)
    }

    async fn try_list(
        &self,
        page: u32,
        per_page: u32,
        filter: &R::Filter,
    ) -> Result<Page<R>, ApiError> {
        let builder = self
            .api
            .request(Method::GET, R::PATH)
            .query(&PageQuery { page, per_page })
            .query(filter);
        let payload = self.api.send(builder).await?;
        Page::from_payload(payload, R::COLLECTION_KEY, page, per_page)
    }
}

impl<R: Editable> ResourceClient<'_, R> {
    /// 단건 조회
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get(&self, id: &str) -> Envelope<R> {
        settle("get", self.try_get(id).await)
    }

    async fn try_get(&self, id: &str) -> Result<R, ApiError> {
        let url = self.api.record_url(R::PATH, checked_id(id)?)?;
        let payload = self.api.send(self.api.request_url(Method::GET, url)).await?;
        extract_record(payload, R::RECORD_KEY)
    }

    /// 부분 수정 (지정한 필드만 전송)
    #[instrument(skip(self, changes), fields(resource = R::PATH))]
    pub async fn update(&self, id: &str, changes: &R::Update) -> Envelope<R> {
        debug!(?changes, "update");
        settle("update", self.try_update(id, changes).await)
    }

    async fn try_update(&self, id: &str, changes: &R::Update) -> Result<R, ApiError> {
        let url = self.api.record_url(R::PATH, checked_id(id)?)?;
        let builder = self.api.request_url(Method::PUT, url).json(changes);
        let payload = self.api.send(builder).await?;
        extract_record(payload, R::RECORD_KEY)
    }

    /// 삭제
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: &str) -> Envelope<Deleted> {
        settle("delete", self.try_delete(id).await)
    }

    async fn try_delete(&self, id: &str) -> Result<Deleted, ApiError> {
        let url = self.api.record_url(R::PATH, checked_id(id)?)?;
        let payload = self
            .api
            .send(self.api.request_url(Method::DELETE, url))
            .await?;
        if payload.is_null() {
            return Ok(Deleted::default());
        }
        Ok(serde_json::from_value(payload)?)
    }
}

impl<R: Creatable> ResourceClient<'_, R> {
    /// 생성 (클라이언트 측 검증 없음)
    #[instrument(skip(self, payload), fields(resource = R::PATH))]
    pub async fn create(&self, payload: &R::Create) -> Envelope<R> {
        debug!(?payload, "create");
        settle("create", self.try_create(payload).await)
    }

    async fn try_create(&self, payload: &R::Create) -> Result<R, ApiError> {
        let builder = self.api.request(Method::POST, R::PATH).json(payload);
        let body = self.api.send(builder).await?;
        extract_record(body, R::RECORD_KEY)
    }
}

impl ResourceClient<'_, User> {
    /// 관리자 대시보드 통계
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Envelope<DashboardStats> {
        let path = format!("{}/dashboard/stats", User::PATH);
        let result = match self.api.send(self.api.request(Method::GET, &path)).await {
            Ok(payload) => serde_json::from_value(payload).map_err(ApiError::from),
            Err(err) => Err(err),
        };
        settle("dashboard_stats", result)
    }
}

#[derive(Serialize)]
struct ClearLogsRequest {
    days_to_keep: u32,
}

impl ResourceClient<'_, LogEntry> {
    /// 로그 유형/상태별 집계와 최근 오류
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Envelope<LogStats> {
        let builder = self.api.request(Method::GET, "/api/logs/stats");
        let result = match self.api.send(builder).await {
            Ok(payload) => serde_json::from_value(payload).map_err(ApiError::from),
            Err(err) => Err(err),
        };
        settle("log_stats", result)
    }

    /// `days_to_keep`일보다 오래된 로그 삭제 (값 검증은 백엔드가 한다)
    #[instrument(skip(self))]
    pub async fn clear(&self, days_to_keep: u32) -> Envelope<LogsCleared> {
        let builder = self
            .api
            .request(Method::POST, "/api/logs/clear")
            .json(&ClearLogsRequest { days_to_keep });
        let result = match self.api.send(builder).await {
            Ok(payload) => serde_json::from_value(payload).map_err(ApiError::from),
            Err(err) => Err(err),
        };
        settle("clear_logs", result)
    }
}

/// 내부 결과를 봉투로 변환 (실패는 로그만 남기고 삼킨다)
pub(crate) fn settle<T>(operation: &'static str, result: Result<T, ApiError>) -> Envelope<T> {
    if let Err(err) = &result {
        warn!(operation, status = err.status_code(), error = %err, "request failed");
    }
    Envelope::from_result(result)
}

/// 경로 세그먼트로 쓸 수 있는 식별자인지 확인
fn checked_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Resource identifier must not be empty".to_string(),
        ));
    }
    // `.`/`..`는 인코딩해도 경로 이동으로 해석된다
    if id == "." || id == ".." {
        return Err(ApiError::InvalidRequest(
            "Invalid resource identifier".to_string(),
        ));
    }
    Ok(id)
}

/// `{ <record_key>: {...} }` 에서 레코드 추출 (키 없이 레코드만 온 경우도 허용)
pub(crate) fn extract_record<T: DeserializeOwned>(
    mut payload: Value,
    record_key: &'static str,
) -> Result<T, ApiError> {
    match payload.get_mut(record_key).map(Value::take) {
        Some(Value::Null) => Err(ApiError::MissingField(record_key)),
        Some(record) => Ok(serde_json::from_value(record)?),
        None if payload.get("_id").is_some() => Ok(serde_json::from_value(payload)?),
        None => Err(ApiError::MissingField(record_key)),
    }
}
