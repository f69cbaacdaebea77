//! 다국어 문자열 해석
//!
//! 번역 테이블은 언어 → 키 → 문자열의 2단계 맵이다.
//! 해석 순서: 선택 언어 → 기본 언어(영어) → 키 그대로.

use crate::system::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const LANGUAGE_PREF_KEY: &str = "language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::French];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// 지원 언어 코드만 허용
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Français",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::English => Language::French,
            Language::French => Language::English,
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

const ENGLISH: &[(&str, &str)] = &[
    ("app.title", "FingerScanner"),
    ("app.admin_area", "Admin"),
    ("app.client_area", "Client"),
    ("nav.dashboard", "Dashboard"),
    ("nav.users", "Users"),
    ("nav.devices", "Devices"),
    ("nav.partitions", "Partitions"),
    ("nav.logs", "Logs"),
    ("nav.overview", "Overview"),
    ("nav.files", "Files"),
    ("nav.settings", "Settings"),
    ("header.language", "Language"),
    ("header.theme_dark", "Dark"),
    ("header.theme_light", "Light"),
    ("header.signed_in_as", "Signed in as {name}"),
    ("auth.checking", "Checking session..."),
    ("auth.title", "Sign in"),
    ("auth.email", "Email"),
    ("auth.password", "Password"),
    ("auth.submit", "Login"),
    ("auth.hint", "Tab: field  Enter: sign in  Ctrl+P: reset password  Esc: quit"),
    ("auth.reset_sent", "Password reset requested for {email}"),
    ("auth.email_required", "Enter your email first"),
    ("auth.signing_in", "Signing in..."),
    ("auth.required_fields", "Email and password are required"),
    ("auth.welcome", "Welcome back, {name}"),
    ("auth.logged_out", "Logged out"),
    ("table.loading", "Loading..."),
    ("table.empty", "No records found"),
    ("table.error_title", "Failed to load data"),
    ("table.retry_hint", "Press r to retry"),
    ("table.page", "Page {page}/{pages} · {total} total"),
    ("col.name", "Name"),
    ("col.type", "Type"),
    ("col.capacity", "Capacity"),
    ("col.status", "Status"),
    ("col.added", "Added"),
    ("col.username", "Username"),
    ("col.email", "Email"),
    ("col.role", "Role"),
    ("col.last_login", "Last login"),
    ("col.device", "Device"),
    ("col.format", "Format"),
    ("col.size", "Size"),
    ("col.partition", "Partition"),
    ("col.uploaded", "Uploaded"),
    ("col.time", "Time"),
    ("col.level", "Level"),
    ("col.message", "Message"),
    ("col.user", "User"),
    ("status.active", "active"),
    ("status.inactive", "inactive"),
    ("status.unknown", "unknown"),
    ("dashboard.stats", "Statistics"),
    ("dashboard.recent", "Recent activity"),
    ("logs.stats", "Log summary"),
    ("logs.summary", "{total} entries · {statuses}"),
    ("overview.profile", "Profile"),
    ("overview.role", "Role: {role}"),
    ("overview.email", "Email: {email}"),
    ("settings.title", "Preferences"),
    ("settings.language", "Language: {value}"),
    ("settings.theme", "Theme: {value}"),
    ("settings.sidebar", "Sidebar: {value}"),
    ("settings.server", "Server: {value}"),
    ("settings.collapsed", "collapsed"),
    ("settings.expanded", "expanded"),
    ("confirm.delete_title", "Delete"),
    ("confirm.delete_body", "Delete {name}? This cannot be undone."),
    ("confirm.yes", "Delete"),
    ("confirm.no", "Cancel"),
    ("confirm.clear_logs_title", "Clear logs"),
    ("confirm.clear_logs_body", "Delete logs older than {days} days?"),
    ("confirm.clear", "Clear"),
    ("dialog.delete_failed", "Delete failed"),
    ("dialog.clear_failed", "Clearing logs failed"),
    ("toast.deleted", "Deleted {name}"),
    ("toast.logs_cleared", "Removed {count} old log entries"),
    ("toast.status_changed", "{name} is now {status}"),
    ("toast.theme", "Theme: {value}"),
    ("toast.language", "Language: {value}"),
    ("toast.no_selection", "Nothing selected"),
    ("toast.no_status", "This record has no status"),
    ("toast.session_refreshed", "Session refreshed"),
    ("toast.no_refresh_token", "No refresh token stored; sign in again"),
    ("cmd.move", "Move"),
    ("cmd.page", "Page"),
    ("cmd.refresh", "Refresh"),
    ("cmd.delete", "Delete"),
    ("cmd.clear_logs", "Clear old"),
    ("cmd.toggle", "Status"),
    ("cmd.sidebar", "Sidebar"),
    ("cmd.theme", "Theme"),
    ("cmd.language", "Lang"),
    ("cmd.logout", "Logout"),
    ("cmd.quit", "Quit"),
    ("warn.title", "Terminal Too Small"),
    ("warn.current", "Current:"),
    ("warn.required", "Required:"),
    ("warn.hint", "Please resize your terminal"),
];

// 일부 키는 의도적으로 비어 있다 (영어로 대체 표시)
const FRENCH: &[(&str, &str)] = &[
    ("app.admin_area", "Administration"),
    ("app.client_area", "Client"),
    ("nav.dashboard", "Tableau de bord"),
    ("nav.users", "Utilisateurs"),
    ("nav.devices", "Appareils"),
    ("nav.partitions", "Partitions"),
    ("nav.logs", "Journaux"),
    ("nav.overview", "Aperçu"),
    ("nav.files", "Fichiers"),
    ("nav.settings", "Paramètres"),
    ("header.language", "Langue"),
    ("header.theme_dark", "Sombre"),
    ("header.theme_light", "Clair"),
    ("header.signed_in_as", "Connecté en tant que {name}"),
    ("auth.checking", "Vérification de la session..."),
    ("auth.title", "Connexion"),
    ("auth.email", "E-mail"),
    ("auth.password", "Mot de passe"),
    ("auth.submit", "Se connecter"),
    ("auth.signing_in", "Connexion en cours..."),
    ("auth.required_fields", "L'e-mail et le mot de passe sont obligatoires"),
    ("auth.welcome", "Bon retour, {name}"),
    ("auth.logged_out", "Déconnecté"),
    ("table.loading", "Chargement..."),
    ("table.empty", "Aucun enregistrement"),
    ("table.error_title", "Échec du chargement des données"),
    ("table.retry_hint", "Appuyez sur r pour réessayer"),
    ("table.page", "Page {page}/{pages} · {total} au total"),
    ("col.name", "Nom"),
    ("col.capacity", "Capacité"),
    ("col.status", "Statut"),
    ("col.added", "Ajouté"),
    ("col.username", "Nom d'utilisateur"),
    ("col.email", "E-mail"),
    ("col.role", "Rôle"),
    ("col.last_login", "Dernière connexion"),
    ("col.device", "Appareil"),
    ("col.size", "Taille"),
    ("col.uploaded", "Téléversé"),
    ("col.time", "Heure"),
    ("col.level", "Niveau"),
    ("col.user", "Utilisateur"),
    ("status.active", "actif"),
    ("status.inactive", "inactif"),
    ("dashboard.stats", "Statistiques"),
    ("dashboard.recent", "Activité récente"),
    ("logs.summary", "{total} entrées · {statuses}"),
    ("overview.profile", "Profil"),
    ("overview.role", "Rôle : {role}"),
    ("overview.email", "E-mail : {email}"),
    ("settings.title", "Préférences"),
    ("settings.language", "Langue : {value}"),
    ("settings.theme", "Thème : {value}"),
    ("settings.sidebar", "Barre latérale : {value}"),
    ("settings.server", "Serveur : {value}"),
    ("settings.collapsed", "réduite"),
    ("settings.expanded", "étendue"),
    ("confirm.delete_title", "Supprimer"),
    ("confirm.delete_body", "Supprimer {name} ? Cette action est irréversible."),
    ("confirm.yes", "Supprimer"),
    ("confirm.no", "Annuler"),
    ("confirm.clear_logs_title", "Vider les journaux"),
    ("confirm.clear_logs_body", "Supprimer les journaux de plus de {days} jours ?"),
    ("confirm.clear", "Vider"),
    ("dialog.delete_failed", "Échec de la suppression"),
    ("toast.deleted", "{name} supprimé"),
    ("toast.logs_cleared", "{count} anciennes entrées supprimées"),
    ("toast.status_changed", "{name} est maintenant {status}"),
    ("toast.theme", "Thème : {value}"),
    ("toast.language", "Langue : {value}"),
    ("toast.no_selection", "Aucune sélection"),
    ("cmd.move", "Déplacer"),
    ("cmd.refresh", "Actualiser"),
    ("cmd.delete", "Supprimer"),
    ("cmd.toggle", "Statut"),
    ("cmd.theme", "Thème"),
    ("cmd.language", "Langue"),
    ("cmd.logout", "Quitter session"),
    ("cmd.quit", "Quitter"),
    ("warn.title", "Terminal trop petit"),
    ("warn.current", "Actuel :"),
    ("warn.required", "Requis :"),
    ("warn.hint", "Veuillez agrandir votre terminal"),
];

static TRANSLATIONS: LazyLock<HashMap<Language, Table>> = LazyLock::new(|| {
    HashMap::from([
        (Language::English, ENGLISH.iter().copied().collect()),
        (Language::French, FRENCH.iter().copied().collect()),
    ])
});

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .get(&language)
        .and_then(|table| table.get(key))
        .copied()
        .filter(|text| !text.is_empty())
}

/// (언어, 키) → 표시 문자열. 실패하지 않는다.
pub fn resolve(language: Language, key: &str) -> &str {
    lookup(language, key)
        .or_else(|| lookup(Language::default(), key))
        .unwrap_or(key)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// 저장된 언어로 초기화 (없거나 지원하지 않는 값이면 영어)
    pub fn from_prefs(prefs: &PreferenceStore) -> Self {
        Self::new(prefs.get(LANGUAGE_PREF_KEY, Language::default()))
    }

    pub fn language(self) -> Language {
        self.language
    }

    /// 언어 변경 후 저장 (이후 해석에 즉시 반영)
    pub fn set_language(&mut self, language: Language, prefs: &mut PreferenceStore) {
        self.language = language;
        prefs.set(LANGUAGE_PREF_KEY, &language);
    }

    pub fn tr(self, key: &str) -> &str {
        resolve(self.language, key)
    }

    /// `{name}` 자리표시자 치환
    pub fn fmt(self, key: &str, args: &[(&str, String)]) -> String {
        let mut out = self.tr(key).to_string();
        for (name, value) in args {
            let needle = format!("{{{}}}", name);
            out = out.replace(&needle, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_language_wins() {
        assert_eq!(resolve(Language::French, "nav.devices"), "Appareils");
        assert_eq!(resolve(Language::English, "nav.devices"), "Devices");
    }

    #[test]
    fn test_missing_french_key_falls_back_to_english() {
        assert!(!FRENCH.iter().any(|(k, _)| *k == "col.type"));
        assert_eq!(resolve(Language::French, "col.type"), "Type");
    }

    #[test]
    fn test_unknown_key_is_returned_verbatim() {
        assert_eq!(resolve(Language::French, "no.such.key"), "no.such.key");
        assert_eq!(resolve(Language::English, ""), "");
    }

    #[test]
    fn test_every_french_key_exists_in_english() {
        for (key, _) in FRENCH {
            assert!(
                ENGLISH.iter().any(|(k, _)| k == key),
                "missing english entry for {}",
                key
            );
        }
    }

    #[test]
    fn test_from_code_closed_set() {
        assert_eq!(Language::from_code("fr"), Some(Language::French));
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("ko"), None);
    }

    #[test]
    fn test_set_language_persists() {
        let mut prefs = PreferenceStore::in_memory();
        let mut i18n = I18n::from_prefs(&prefs);
        assert_eq!(i18n.language(), Language::English);

        i18n.set_language(Language::French, &mut prefs);

        assert_eq!(i18n.tr("nav.files"), "Fichiers");
        assert_eq!(I18n::from_prefs(&prefs).language(), Language::French);
    }

    #[test]
    fn test_unsupported_stored_language_defaults() {
        let mut prefs = PreferenceStore::in_memory();
        prefs.set(LANGUAGE_PREF_KEY, "de");
        assert_eq!(I18n::from_prefs(&prefs).language(), Language::English);
    }

    #[test]
    fn test_fmt_placeholders() {
        let i18n = I18n::new(Language::English);
        assert_eq!(
            i18n.fmt("toast.deleted", &[("name", "Scanner A".to_string())]),
            "Deleted Scanner A"
        );
        // 자리표시자 없는 미지정 키
        assert_eq!(i18n.fmt("raw {name}", &[("name", "x".to_string())]), "raw x");
    }
}
