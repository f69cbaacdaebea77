use super::i18n::{I18n, Language};
use super::theme::{Theme, ThemeController, ThemeMode};
use crate::core::auth_gate::GuardedArea;
use crate::system::PreferenceStore;
use std::path::PathBuf;

/// 화면 전체가 공유하는 상태
///
/// 환경설정 저장소, 언어, 테마를 한곳에 묶어 시작 시 한 번 만들고
/// 렌더링/키 처리에 명시적으로 넘긴다.
#[derive(Debug)]
pub struct UiContext {
    pub prefs: PreferenceStore,
    pub i18n: I18n,
    pub theme: ThemeController,
}

impl UiContext {
    pub fn new(mut prefs: PreferenceStore, themes_dir: Option<PathBuf>) -> Self {
        let i18n = I18n::from_prefs(&prefs);
        let theme = ThemeController::init(&mut prefs, themes_dir);
        Self { prefs, i18n, theme }
    }

    #[cfg(test)]
    pub(crate) fn for_test() -> Self {
        let mut prefs = PreferenceStore::in_memory();
        let theme = ThemeController::init_with(&mut prefs, None, None);
        Self {
            prefs,
            i18n: I18n::default(),
            theme,
        }
    }

    pub fn palette(&self) -> &Theme {
        self.theme.current()
    }

    pub fn tr<'k>(&self, key: &'k str) -> &'k str {
        self.i18n.tr(key)
    }

    pub fn fmt(&self, key: &str, args: &[(&str, String)]) -> String {
        self.i18n.fmt(key, args)
    }

    pub fn language(&self) -> Language {
        self.i18n.language()
    }

    pub fn set_language(&mut self, language: Language) {
        self.i18n.set_language(language, &mut self.prefs);
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle(&mut self.prefs)
    }

    pub fn sidebar_collapsed(&self, area: GuardedArea) -> bool {
        self.prefs.get(area.sidebar_pref_key(), false)
    }

    pub fn set_sidebar_collapsed(&mut self, area: GuardedArea, collapsed: bool) {
        self.prefs.set(area.sidebar_pref_key(), &collapsed);
    }
}
