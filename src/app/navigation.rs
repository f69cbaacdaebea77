use super::{App, LoadState};
use crate::core::actions::{find_action, find_sequence_action, is_sequence_prefix, Action};
use crate::core::Route;
use crate::ui::ThemeMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;

/// 대기 키 만료 시간 (ms)
const PENDING_KEY_TIMEOUT_MS: u128 = 800;

impl App {
    /// 액션 실행 (단일 진실 원천)
    pub async fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::GoToTop => self.select_edge(true),
            Action::GoToBottom => self.select_edge(false),
            Action::NextPage => self.change_page(true),
            Action::PrevPage => self.change_page(false),
            Action::NextRoute => self.cycle_route(1),
            Action::PrevRoute => self.cycle_route(-1),
            Action::Refresh => self.reload(),
            Action::DeleteSelected => self.request_delete(),
            Action::ClearLogs => self.request_clear_logs(),
            Action::ToggleStatus => self.toggle_selected_status().await,
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::CycleLanguage => self.cycle_language(),
            Action::RefreshSession => self.refresh_session().await,
            Action::Logout => self.logout().await,
        }
    }

    /// 일반 모드 키 처리 (액션 레지스트리 기반)
    pub async fn handle_normal_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        // 1) pending 키 시퀀스 처리
        if let Some(pending) = self.pending_key {
            self.clear_pending_key();
            if let KeyCode::Char(c) = code {
                if let Some(action) = find_sequence_action(pending, c) {
                    self.execute_action(action).await;
                    return;
                }
            }
        }

        // 2) 시퀀스 시작 키면 대기
        if let KeyCode::Char(c) = code {
            if modifiers == KeyModifiers::NONE && is_sequence_prefix(c) {
                self.set_pending_key(c);
                return;
            }
        }

        // 3) 숫자 키로 경로 바로 선택
        if let (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) = (modifiers, code) {
            let index = (c as u8 - b'1') as usize;
            self.select_route(index);
            return;
        }

        // 4) 테이블 조회 → 액션 실행
        if let Some(action) = find_action(modifiers, code) {
            self.execute_action(action).await;
        }
    }

    // === 경로 ===

    /// 경로 선택 (범위 밖이면 무시, 바뀌었으면 조회 예약)
    pub fn select_route(&mut self, index: usize) {
        if index >= self.routes().len() || index == self.route_index {
            return;
        }
        self.route_index = index;
        if self.route_needs_load(self.current_route()) {
            self.reload();
        }
    }

    fn cycle_route(&mut self, delta: isize) {
        let len = self.routes().len() as isize;
        let next = (self.route_index as isize + delta).rem_euclid(len);
        self.select_route(next as usize);
    }

    /// 아직 조회한 적 없는 화면인지
    fn route_needs_load(&self, route: Route) -> bool {
        match route {
            Route::Dashboard => matches!(self.pages.stats, LoadState::Idle),
            Route::Users => self.pages.users.is_idle(),
            Route::Devices => self.pages.devices.is_idle(),
            Route::Partitions => self.pages.partitions.is_idle(),
            Route::Files => self.pages.files.is_idle(),
            Route::Logs => self.pages.logs.is_idle(),
            Route::Overview | Route::Settings => false,
        }
    }

    // === 선택/페이지 ===

    fn move_selection(&mut self, delta: isize) {
        match self.current_route() {
            Route::Users => self.pages.users.move_selection(delta),
            Route::Devices => self.pages.devices.move_selection(delta),
            Route::Partitions => self.pages.partitions.move_selection(delta),
            Route::Files => self.pages.files.move_selection(delta),
            Route::Logs => self.pages.logs.move_selection(delta),
            _ => {}
        }
    }

    fn select_edge(&mut self, top: bool) {
        macro_rules! edge {
            ($page:expr) => {
                if top {
                    $page.select_first()
                } else {
                    $page.select_last()
                }
            };
        }
        match self.current_route() {
            Route::Users => edge!(self.pages.users),
            Route::Devices => edge!(self.pages.devices),
            Route::Partitions => edge!(self.pages.partitions),
            Route::Files => edge!(self.pages.files),
            Route::Logs => edge!(self.pages.logs),
            _ => {}
        }
    }

    fn change_page(&mut self, forward: bool) {
        macro_rules! turn {
            ($page:expr) => {
                if forward {
                    $page.next_page()
                } else {
                    $page.prev_page()
                }
            };
        }
        let moved = match self.current_route() {
            Route::Users => turn!(self.pages.users),
            Route::Devices => turn!(self.pages.devices),
            Route::Partitions => turn!(self.pages.partitions),
            Route::Files => turn!(self.pages.files),
            Route::Logs => turn!(self.pages.logs),
            _ => false,
        };
        if moved {
            self.reload();
        }
    }

    // === 셸 ===

    /// 사이드바 접기/펼치기 (영역별로 저장)
    pub fn toggle_sidebar(&mut self) {
        let area = self.area();
        let collapsed = !self.layout.sidebar_collapsed();
        self.layout.set_sidebar_collapsed(collapsed);
        self.ctx.set_sidebar_collapsed(area, collapsed);
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.ctx.toggle_theme();
        let label = match mode {
            ThemeMode::Dark => self.ctx.tr("header.theme_dark"),
            ThemeMode::Light => self.ctx.tr("header.theme_light"),
        };
        let message = self.ctx.fmt("toast.theme", &[("value", label.to_string())]);
        self.set_toast(&message);
    }

    /// 다음 지원 언어로 전환
    pub fn cycle_language(&mut self) {
        let next = self.ctx.language().next();
        self.ctx.set_language(next);
        let message = self
            .ctx
            .fmt("toast.language", &[("value", next.display_name().to_string())]);
        self.set_toast(&message);
    }

    // === pending_key 시스템 ===

    /// 대기 키 설정
    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    /// 대기 키 초기화
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    /// 대기 키 만료 여부
    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .is_some_and(|t| t.elapsed().as_millis() > PENDING_KEY_TIMEOUT_MS)
    }

    /// 대기 키 표시 문자열 (상태바용)
    pub fn pending_key_display(&self) -> Option<String> {
        self.pending_key.map(|k| format!("{}_", k))
    }
}
