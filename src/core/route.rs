use super::actions::ActionScope;
use super::auth_gate::GuardedArea;

/// 사이드바 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Users,
    Devices,
    Partitions,
    Logs,
    Overview,
    Files,
    Settings,
}

static ADMIN_ROUTES: [Route; 6] = [
    Route::Dashboard,
    Route::Users,
    Route::Devices,
    Route::Partitions,
    Route::Logs,
    Route::Settings,
];

static CLIENT_ROUTES: [Route; 3] = [Route::Overview, Route::Files, Route::Settings];

impl Route {
    pub fn for_area(area: GuardedArea) -> &'static [Route] {
        match area {
            GuardedArea::Admin => &ADMIN_ROUTES,
            GuardedArea::Client => &CLIENT_ROUTES,
        }
    }

    /// 영역의 첫 화면
    pub fn home(area: GuardedArea) -> Self {
        Self::for_area(area)[0]
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Route::Dashboard => "nav.dashboard",
            Route::Users => "nav.users",
            Route::Devices => "nav.devices",
            Route::Partitions => "nav.partitions",
            Route::Logs => "nav.logs",
            Route::Overview => "nav.overview",
            Route::Files => "nav.files",
            Route::Settings => "nav.settings",
        }
    }

    /// 접힌 사이드바에 표시할 한 글자
    pub fn icon(self) -> &'static str {
        match self {
            Route::Dashboard => "◉",
            Route::Users => "☺",
            Route::Devices => "▤",
            Route::Partitions => "◫",
            Route::Logs => "☰",
            Route::Overview => "◎",
            Route::Files => "≡",
            Route::Settings => "⚙",
        }
    }

    /// 이 화면에서 해당 범위의 액션을 쓸 수 있는지
    pub fn supports(self, scope: ActionScope) -> bool {
        match scope {
            ActionScope::Global => true,
            ActionScope::ListPage => matches!(
                self,
                Route::Users | Route::Devices | Route::Partitions | Route::Files | Route::Logs
            ),
            ActionScope::RecordPage => matches!(
                self,
                Route::Users | Route::Devices | Route::Partitions | Route::Files
            ),
            ActionScope::StatusPage => {
                matches!(self, Route::Users | Route::Devices | Route::Partitions)
            }
            ActionScope::LogsPage => self == Route::Logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_routes() {
        assert_eq!(Route::home(GuardedArea::Admin), Route::Dashboard);
        assert_eq!(Route::home(GuardedArea::Client), Route::Overview);
        assert!(!Route::for_area(GuardedArea::Client).contains(&Route::Users));
        assert!(Route::for_area(GuardedArea::Admin).contains(&Route::Settings));
        assert!(!Route::for_area(GuardedArea::Client).contains(&Route::Logs));
    }

    #[test]
    fn test_action_scopes() {
        assert!(Route::Devices.supports(ActionScope::RecordPage));
        assert!(!Route::Dashboard.supports(ActionScope::ListPage));
        assert!(Route::Logs.supports(ActionScope::ListPage));
        assert!(!Route::Logs.supports(ActionScope::RecordPage));
        assert!(!Route::Files.supports(ActionScope::StatusPage));
        assert!(Route::Logs.supports(ActionScope::LogsPage));
    }
}
