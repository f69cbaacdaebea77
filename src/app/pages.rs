//! 리소스 목록 화면 상태
//!
//! 화면마다 현재 페이지, 선택 행, 마지막 조회 결과를 들고 있다.
//! 조회 결과는 봉투 그대로가 아니라 `LoadState`로 옮겨 둔다.

use crate::api::{Editable, Envelope, Page, Resource, ResourceClient};
use crate::models::{
    DashboardStats, Device, DeviceUpdate, FileRecord, LogEntry, LogStats, Partition,
    PartitionUpdate, RecordStatus, User, UserUpdate,
};
use crate::ui::{I18n, TableRow, TableView};

/// 비동기 조회 상태
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// 아직 요청하지 않음
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<Envelope<T>> for LoadState<T> {
    fn from(envelope: Envelope<T>) -> Self {
        match envelope {
            Envelope::Success(data) => LoadState::Loaded(data),
            Envelope::Failure { message } => LoadState::Failed(message),
        }
    }
}

/// 상태 토글을 지원하는 리소스
pub trait StatusToggle: Editable {
    fn status_update(status: RecordStatus) -> Self::Update;
}

impl StatusToggle for Device {
    fn status_update(status: RecordStatus) -> DeviceUpdate {
        DeviceUpdate::status(status)
    }
}

impl StatusToggle for Partition {
    fn status_update(status: RecordStatus) -> PartitionUpdate {
        PartitionUpdate::status(status)
    }
}

impl StatusToggle for User {
    fn status_update(status: RecordStatus) -> UserUpdate {
        UserUpdate::account_status(status)
    }
}

/// 목록 화면 하나의 상태
#[derive(Debug, Clone)]
pub struct ResourcePage<R> {
    page: u32,
    per_page: u32,
    selected: usize,
    state: LoadState<Page<R>>,
}

impl<R: Resource + TableRow> ResourcePage<R> {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            selected: 0,
            state: LoadState::Idle,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn state(&self) -> &LoadState<Page<R>> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, LoadState::Idle)
    }

    pub fn mark_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// 현재 페이지 조회
    ///
    /// 마지막 페이지가 사라졌으면 (예: 마지막 행 삭제) 새 마지막 페이지를 한 번 더 조회한다.
    pub async fn load(&mut self, client: ResourceClient<'_, R>) {
        self.state = LoadState::Loading;
        let filter = R::Filter::default();
        let envelope = client.list(self.page, self.per_page, &filter).await;
        if self.apply(envelope) {
            let envelope = client.list(self.page, self.per_page, &filter).await;
            self.apply(envelope);
        }
    }

    /// 조회 결과 반영 (선택 행은 새 항목 수에 맞춘다)
    ///
    /// 빈 페이지가 전체 페이지 수를 넘었으면 마지막 페이지로 물러서고 `true`를 돌려준다.
    /// 이때 상태는 `Loading`으로 남고 호출한 쪽이 다시 조회해야 한다.
    pub fn apply(&mut self, envelope: Envelope<Page<R>>) -> bool {
        self.state = envelope.into();
        let LoadState::Loaded(page) = &self.state else {
            return false;
        };
        if page.items.is_empty() && page.pages >= 1 && page.page > page.pages {
            self.page = page.pages;
            self.selected = 0;
            self.state = LoadState::Loading;
            return true;
        }
        self.page = page.page.max(1);
        self.selected = self.selected.min(page.items.len().saturating_sub(1));
        false
    }

    /// 테이블 위젯에 넘길 상태 (Idle도 로딩으로 보여준다)
    pub fn view(&self) -> TableView<'_, R> {
        match &self.state {
            LoadState::Idle | LoadState::Loading => TableView::Loading,
            LoadState::Failed(message) => TableView::Failed(message),
            LoadState::Loaded(page) => TableView::Rows(&page.items),
        }
    }

    pub fn items(&self) -> &[R] {
        self.state.loaded().map_or(&[], |page| page.items.as_slice())
    }

    pub fn selected_record(&self) -> Option<&R> {
        self.items().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.items().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items().len().saturating_sub(1);
    }

    /// 다음 페이지로 (이동했으면 true, 다시 조회해야 함)
    pub fn next_page(&mut self) -> bool {
        match self.state.loaded() {
            Some(page) if page.has_next() => {
                self.page += 1;
                self.selected = 0;
                true
            }
            _ => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
            true
        } else {
            false
        }
    }

    /// 상태바용 페이지 문구
    pub fn page_info(&self, i18n: I18n) -> String {
        match self.state.loaded() {
            Some(page) => i18n.fmt(
                "table.page",
                &[
                    ("page", page.page.to_string()),
                    ("pages", page.pages.max(1).to_string()),
                    ("total", page.total.to_string()),
                ],
            ),
            None => String::new(),
        }
    }
}

/// 화면별 상태 모음
#[derive(Debug, Clone)]
pub struct Pages {
    pub devices: ResourcePage<Device>,
    pub users: ResourcePage<User>,
    pub partitions: ResourcePage<Partition>,
    pub files: ResourcePage<FileRecord>,
    pub logs: ResourcePage<LogEntry>,
    pub stats: LoadState<DashboardStats>,
    pub log_stats: LoadState<LogStats>,
}

impl Pages {
    pub fn new(per_page: u32) -> Self {
        Self {
            devices: ResourcePage::new(per_page),
            users: ResourcePage::new(per_page),
            partitions: ResourcePage::new(per_page),
            files: ResourcePage::new(per_page),
            logs: ResourcePage::new(per_page),
            stats: LoadState::Idle,
            log_stats: LoadState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Language;

    fn device(name: &str) -> Device {
        serde_json::from_value(serde_json::json!({
            "_id": name,
            "device_name": name,
            "device_type": "usb",
            "status": "active"
        }))
        .unwrap()
    }

    fn loaded(names: &[&str], page: u32, pages: u32) -> Envelope<Page<Device>> {
        Envelope::Success(Page {
            items: names.iter().map(|n| device(n)).collect(),
            total: 12,
            page,
            per_page: 5,
            pages,
        })
    }

    #[test]
    fn test_idle_and_loading_render_as_skeleton() {
        let mut page: ResourcePage<Device> = ResourcePage::new(5);
        assert!(matches!(page.view(), TableView::Loading));
        page.mark_loading();
        assert!(matches!(page.view(), TableView::Loading));
    }

    #[test]
    fn test_failure_is_not_empty_state() {
        let mut page: ResourcePage<Device> = ResourcePage::new(5);
        page.apply(Envelope::failure("Database unavailable"));

        assert!(matches!(page.view(), TableView::Failed("Database unavailable")));
        assert!(page.items().is_empty());
        assert!(page.selected_record().is_none());
    }

    #[test]
    fn test_empty_success_renders_rows() {
        let mut page: ResourcePage<Device> = ResourcePage::new(5);
        page.apply(loaded(&[], 1, 0));
        assert!(matches!(page.view(), TableView::Rows(rows) if rows.is_empty()));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut page = ResourcePage::new(5);
        page.apply(loaded(&["a", "b", "c"], 1, 3));

        page.move_selection(10);
        assert_eq!(page.selected(), 2);
        page.move_selection(-10);
        assert_eq!(page.selected(), 0);

        page.select_last();
        assert_eq!(page.selected_record().map(|d| d.device_name.as_str()), Some("c"));

        // 항목이 줄면 선택도 따라 줄어든다
        page.apply(loaded(&["a"], 1, 3));
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn test_paging_respects_bounds() {
        let mut page = ResourcePage::new(5);
        assert!(!page.prev_page());
        assert!(!page.next_page());

        page.apply(loaded(&["a"], 1, 3));
        assert!(page.next_page());
        assert_eq!(page.page(), 2);
        assert!(page.prev_page());
        assert_eq!(page.page(), 1);

        page.apply(loaded(&["a"], 3, 3));
        assert!(!page.next_page());
    }

    #[test]
    fn test_page_past_the_end_steps_back() {
        let mut page = ResourcePage::new(5);
        page.apply(loaded(&["k"], 3, 3));
        assert_eq!(page.page(), 3);

        // 마지막 페이지의 유일한 행이 지워져 페이지 수가 2로 줄었다
        assert!(page.apply(loaded(&[], 3, 2)));
        assert_eq!(page.page(), 2);
        assert!(matches!(page.view(), TableView::Loading));

        assert!(!page.apply(loaded(&["f"], 2, 2)));
        assert_eq!(page.page(), 2);
    }

    #[test]
    fn test_empty_collection_stays_on_first_page() {
        let mut page: ResourcePage<Device> = ResourcePage::new(5);
        assert!(!page.apply(loaded(&[], 1, 0)));
        assert_eq!(page.page(), 1);
        assert!(matches!(page.view(), TableView::Rows(rows) if rows.is_empty()));
    }

    #[test]
    fn test_page_info() {
        let mut page = ResourcePage::new(5);
        assert_eq!(page.page_info(I18n::new(Language::English)), "");
        page.apply(loaded(&["a"], 2, 3));
        assert_eq!(
            page.page_info(I18n::new(Language::English)),
            "Page 2/3 · 12 total"
        );
    }

    #[test]
    fn test_status_updates() {
        let body = serde_json::to_value(User::status_update(RecordStatus::Inactive)).unwrap();
        assert_eq!(body, serde_json::json!({ "account_status": "inactive" }));
        let body = serde_json::to_value(Partition::status_update(RecordStatus::Active)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "active" }));
    }
}
