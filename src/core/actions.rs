//! 액션 시스템
//!
//! 키 바인딩과 커맨드바 항목이 모두 이 레지스트리를 참조한다.

use super::route::Route;
use crate::ui::{CommandItem, I18n};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 대시보드 화면에서 가능한 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    NextPage,
    PrevPage,
    NextRoute,
    PrevRoute,
    // Records
    Refresh,
    DeleteSelected,
    ToggleStatus,
    ClearLogs,
    // Shell
    ToggleSidebar,
    ToggleTheme,
    CycleLanguage,
    RefreshSession,
    Logout,
    Quit,
}

/// 액션이 의미 있는 화면
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionScope {
    /// 어디서나
    Global,
    /// 페이지 단위 목록 화면
    ListPage,
    /// 삭제 가능한 레코드 목록
    RecordPage,
    /// 상태 토글이 가능한 목록 (장치/사용자/파티션)
    StatusPage,
    /// 시스템 로그 화면
    LogsPage,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    /// 커맨드바 레이블 번역 키
    pub label_key: &'static str,
    pub scope: ActionScope,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

const fn def(
    action: Action,
    id: &'static str,
    label_key: &'static str,
    scope: ActionScope,
    command_bar: Option<CommandBarEntry>,
) -> ActionDef {
    ActionDef {
        action,
        id,
        label_key,
        scope,
        command_bar,
    }
}

const fn bar(key: &'static str, priority: u8) -> Option<CommandBarEntry> {
    Some(CommandBarEntry { key, priority })
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    def(Action::MoveUp, "move_up", "cmd.move", ActionScope::ListPage, bar("j/k", 10)),
    def(Action::MoveDown, "move_down", "cmd.move", ActionScope::ListPage, None),
    def(Action::GoToTop, "go_top", "cmd.move", ActionScope::ListPage, None),
    def(Action::GoToBottom, "go_bottom", "cmd.move", ActionScope::ListPage, None),
    def(Action::NextPage, "next_page", "cmd.page", ActionScope::ListPage, bar("[/]", 20)),
    def(Action::PrevPage, "prev_page", "cmd.page", ActionScope::ListPage, None),
    def(Action::NextRoute, "next_route", "cmd.move", ActionScope::Global, None),
    def(Action::PrevRoute, "prev_route", "cmd.move", ActionScope::Global, None),
    def(Action::Refresh, "refresh", "cmd.refresh", ActionScope::Global, bar("r", 30)),
    def(Action::DeleteSelected, "delete", "cmd.delete", ActionScope::RecordPage, bar("d", 40)),
    def(Action::ToggleStatus, "toggle_status", "cmd.toggle", ActionScope::StatusPage, bar("s", 45)),
    def(Action::ClearLogs, "clear_logs", "cmd.clear_logs", ActionScope::LogsPage, bar("x", 50)),
    def(Action::ToggleSidebar, "toggle_sidebar", "cmd.sidebar", ActionScope::Global, bar("b", 60)),
    def(Action::ToggleTheme, "toggle_theme", "cmd.theme", ActionScope::Global, bar("t", 70)),
    def(Action::CycleLanguage, "cycle_language", "cmd.language", ActionScope::Global, bar("L", 75)),
    def(Action::RefreshSession, "refresh_session", "toast.session_refreshed", ActionScope::Global, None),
    def(Action::Logout, "logout", "cmd.logout", ActionScope::Global, bar("o", 80)),
    def(Action::Quit, "quit", "cmd.quit", ActionScope::Global, bar("q", 90)),
];

fn build_key_bindings() -> Vec<KeyBinding> {
    let bind = |code, modifiers, action| KeyBinding {
        code,
        modifiers,
        action,
    };
    let plain = Some(KeyModifiers::NONE);
    vec![
        // 종료
        bind(KeyCode::Char('q'), plain, Action::Quit),
        bind(KeyCode::Char('c'), Some(KeyModifiers::CONTROL), Action::Quit),
        // 이동
        bind(KeyCode::Char('k'), plain, Action::MoveUp),
        bind(KeyCode::Up, None, Action::MoveUp),
        bind(KeyCode::Char('j'), plain, Action::MoveDown),
        bind(KeyCode::Down, None, Action::MoveDown),
        bind(KeyCode::Home, None, Action::GoToTop),
        bind(KeyCode::Char('G'), None, Action::GoToBottom),
        bind(KeyCode::End, None, Action::GoToBottom),
        bind(KeyCode::Char(']'), plain, Action::NextPage),
        bind(KeyCode::PageDown, None, Action::NextPage),
        bind(KeyCode::Char('['), plain, Action::PrevPage),
        bind(KeyCode::PageUp, None, Action::PrevPage),
        bind(KeyCode::Tab, None, Action::NextRoute),
        bind(KeyCode::BackTab, None, Action::PrevRoute),
        // 레코드
        bind(KeyCode::Char('r'), plain, Action::Refresh),
        bind(KeyCode::F(5), None, Action::Refresh),
        bind(KeyCode::Char('d'), plain, Action::DeleteSelected),
        bind(KeyCode::Delete, None, Action::DeleteSelected),
        bind(KeyCode::Char('s'), plain, Action::ToggleStatus),
        bind(KeyCode::Char('x'), plain, Action::ClearLogs),
        // 셸
        bind(KeyCode::Char('b'), plain, Action::ToggleSidebar),
        bind(KeyCode::Char('t'), plain, Action::ToggleTheme),
        bind(KeyCode::Char('L'), None, Action::CycleLanguage),
        bind(KeyCode::Char('r'), Some(KeyModifiers::CONTROL), Action::RefreshSession),
        bind(KeyCode::Char('o'), plain, Action::Logout),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true,
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

static SEQUENCE_BINDINGS: &[SequenceBinding] = &[SequenceBinding {
    prefix: 'g',
    key: 'g',
    action: Action::GoToTop,
}];

pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    SEQUENCE_BINDINGS
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    SEQUENCE_BINDINGS.iter().any(|binding| binding.prefix == c)
}

impl Action {
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }

    pub fn def(self) -> Option<&'static ActionDef> {
        ACTION_DEFS.iter().find(|d| d.action == self)
    }
}

/// 커맨드바용 항목 생성 (priority 순, 현재 화면에서 못 쓰는 항목은 비활성)
///
/// `route`가 없으면 (인증 전) 전역 액션만 활성이다.
pub fn generate_command_bar_items(i18n: I18n, route: Option<Route>) -> Vec<CommandItem> {
    let mut entries: Vec<(&CommandBarEntry, &ActionDef)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (cb, def)))
        .collect();
    entries.sort_by_key(|(cb, _)| cb.priority);

    entries
        .into_iter()
        .map(|(cb, def)| {
            let enabled = match route {
                Some(route) => route.supports(def.scope),
                None => def.scope == ActionScope::Global,
            };
            CommandItem::new(cb.key, i18n.tr(def.label_key)).enabled(enabled)
        })
        .collect()
}
