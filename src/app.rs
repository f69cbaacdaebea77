use crate::api::ApiClient;
use crate::core::{AuthGate, GuardedArea, Route, Session};
use crate::system::Config;
use crate::ui::{DialogKind, LayoutManager, LayoutMode, MessageLevel, UiContext};
use crate::utils::error::Result;
use std::time::Instant;
use tracing::info;

mod login;
mod navigation;
mod pages;
mod records;
mod text_edit;

pub use login::LoginState;
pub use pages::{LoadState, Pages, ResourcePage, StatusToggle};
pub use text_edit::TextField;

/// 토스트 표시 시간 (초)
const TOAST_SECONDS: u64 = 3;

/// 화면을 그리기 전에 미뤄 둔 비동기 작업
///
/// 키 처리에서 바로 기다리지 않고 한 프레임(로딩 표시)을 그린 뒤 실행한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// 마운트된 인증 게이트의 세션 확인
    ResolveSession,
    Login,
    PasswordReset,
    /// 현재 경로의 데이터 조회
    LoadRoute,
}

/// 확인 다이얼로그가 답을 기다리는 작업
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirm {
    Delete {
        route: Route,
        id: String,
        name: String,
    },
    /// 보존 기간보다 오래된 로그 삭제
    ClearLogs { days_to_keep: u32 },
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    pub config: Config,
    /// 백엔드 클라이언트 (세션 토큰 포함)
    pub api: ApiClient,
    /// 환경설정/언어/테마
    pub ctx: UiContext,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    pub session: Option<Session>,
    pub gate: AuthGate,
    /// 현재 영역 경로 목록에서의 위치
    pub route_index: usize,
    pub pages: Pages,
    pub login: LoginState,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    pub pending_confirm: Option<PendingConfirm>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    /// 대기 키 입력 시각
    pub pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, MessageLevel, Instant)>,
    task: Option<Task>,
}

impl App {
    pub fn new(config: Config, ctx: UiContext) -> Result<Self> {
        let mut api = ApiClient::new(&config.api_base_url)?;
        let session = Session::load(&ctx.prefs);
        api.set_access_token(session.as_ref().map(|s| s.access_token.clone()));

        let area = session
            .as_ref()
            .map_or(GuardedArea::Admin, |s| GuardedArea::for_role(s.role()));
        info!(api = %api.base_url(), ?area, restored = session.is_some(), "app started");

        Ok(Self::assemble(config, api, ctx, session, area))
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base_url: &str) -> Self {
        let config = Config {
            api_base_url: base_url.to_string(),
            page_size: 5,
            ..Config::default()
        };
        let api = ApiClient::new(base_url).unwrap();
        Self::assemble(config, api, UiContext::for_test(), None, GuardedArea::Admin)
    }

    fn assemble(
        config: Config,
        api: ApiClient,
        ctx: UiContext,
        session: Option<Session>,
        area: GuardedArea,
    ) -> Self {
        let layout = LayoutManager::new(ctx.sidebar_collapsed(area));
        let pages = Pages::new(config.page_size);
        Self {
            should_quit: false,
            config,
            api,
            ctx,
            layout,
            session,
            gate: AuthGate::mount(area),
            route_index: 0,
            pages,
            login: LoginState::default(),
            dialog: None,
            pending_confirm: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            task: Some(Task::ResolveSession),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn area(&self) -> GuardedArea {
        self.gate.area()
    }

    pub fn routes(&self) -> &'static [Route] {
        Route::for_area(self.area())
    }

    pub fn current_route(&self) -> Route {
        self.routes()
            .get(self.route_index)
            .copied()
            .unwrap_or_else(|| Route::home(self.area()))
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    // === 미뤄 둔 작업 ===

    pub fn schedule(&mut self, task: Task) {
        self.task = Some(task);
    }

    pub fn pending_task(&self) -> Option<Task> {
        self.task
    }

    /// 미뤄 둔 작업 실행 (없으면 아무것도 안 함)
    pub async fn run_pending_task(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        match task {
            Task::ResolveSession => self.resolve_session(),
            Task::Login => self.login().await,
            Task::PasswordReset => self.request_password_reset().await,
            Task::LoadRoute => self.load_current_route().await,
        }
    }

    // === 토스트 ===

    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), MessageLevel::Info, Instant::now()));
    }

    pub fn set_error_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), MessageLevel::Error, Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, _, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= TOAST_SECONDS {
                self.toast_message = None;
            }
        }
    }

    pub fn toast_display(&self) -> Option<(&str, MessageLevel)> {
        self.toast_message
            .as_ref()
            .map(|(message, level, _)| (message.as_str(), *level))
    }
}

#[cfg(test)]
mod tests;
