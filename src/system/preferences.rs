//! # Preference Store
//!
//! 테마, 언어, 사이드바 접힘, 세션 토큰처럼 세션을 넘어 유지되는 키/값 저장소.
//! 값은 JSON 문자열로 직렬화되어 `[entries]` 테이블에 들어간다.
//!
//! 저장소를 읽지 못하거나 쓰지 못해도 호출자는 실패를 보지 않는다.
//! 쓰기 실패는 로그만 남기고 메모리 값이 세션 끝까지 유효하다.
//! 읽지 못한 파일은 첫 저장 전에 `.bak`으로 옮긴다. 옮기지 못하면 저장하지 않는다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 영속 계층 추상화
pub trait PreferenceBackend {
    fn load(&self) -> io::Result<BTreeMap<String, String>>;
    fn save(&self, entries: &BTreeMap<String, String>) -> io::Result<()>;

    /// 읽지 못한 저장본을 덮어쓰기 전에 치워 둔다
    fn set_aside(&self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedPreferences {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// `preferences.toml` 파일 백엔드
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    const FORMAT_VERSION: u32 = 1;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "preferences.toml".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.sibling(".bak")
    }
}

impl PreferenceBackend for TomlFileBackend {
    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err),
        };
        let parsed: PersistedPreferences = toml::from_str(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if parsed.version != Self::FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported preferences version {}", parsed.version),
            ));
        }
        Ok(parsed.entries)
    }

    /// 임시 파일에 쓴 뒤 rename (중간 상태의 파일이 남지 않는다)
    fn save(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = PersistedPreferences {
            version: Self::FORMAT_VERSION,
            entries: entries.clone(),
        };
        let data = toml::to_string_pretty(&payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let temp = self.sibling(".tmp");
        fs::write(&temp, data)?;
        fs::rename(&temp, &self.path)
    }

    /// `<file>.bak`으로 이동 (이전 백업은 덮어쓴다)
    fn set_aside(&self) -> io::Result<()> {
        match fs::rename(&self.path, self.backup_path()) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}

/// 메모리 전용 백엔드 (저장 위치를 정할 수 없을 때)
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

impl PreferenceBackend for MemoryBackend {
    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        Ok(BTreeMap::new())
    }

    fn save(&self, _entries: &BTreeMap<String, String>) -> io::Result<()> {
        Ok(())
    }
}

/// 세션 범위 환경설정 저장소
pub struct PreferenceStore {
    backend: Box<dyn PreferenceBackend>,
    entries: BTreeMap<String, String>,
    /// 시작할 때 읽지 못한 저장본이 아직 그 자리에 있음
    unreadable: bool,
}

impl PreferenceStore {
    /// 백엔드에서 한 번 읽어 초기화 (읽기 실패 시 빈 상태)
    pub fn new(backend: Box<dyn PreferenceBackend>) -> Self {
        let (entries, unreadable) = match backend.load() {
            Ok(entries) => (entries, false),
            Err(err) => {
                warn!(error = %err, "failed to load preferences, starting empty");
                (BTreeMap::new(), true)
            }
        };
        debug!(count = entries.len(), "preferences loaded");
        Self {
            backend,
            entries,
            unreadable,
        }
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(TomlFileBackend::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend))
    }

    /// 저장된 값 (없거나 해석 불가면 `default`)
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.entries.get(key) else {
            return default;
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(key, error = %err, "unparseable preference, using default");
                default
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 값 저장 (메모리 즉시 반영, 영속 실패는 로그만)
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "failed to serialize preference");
                return;
            }
        };
        self.entries.insert(key.to_string(), raw);
        self.persist(key);
    }

    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist(key);
        }
    }

    fn persist(&mut self, key: &str) {
        if self.unreadable {
            if let Err(err) = self.backend.set_aside() {
                warn!(key, error = %err, "unreadable preferences left in place, not saving");
                return;
            }
            warn!("unreadable preferences moved aside");
            self.unreadable = false;
        }
        if let Err(err) = self.backend.save(&self.entries) {
            warn!(key, error = %err, "failed to persist preferences");
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// 저장 시 항상 실패하는 백엔드 (저장소 장애 모사)
    struct BrokenBackend {
        save_calls: Rc<Cell<usize>>,
    }

    impl PreferenceBackend for BrokenBackend {
        fn load(&self) -> io::Result<BTreeMap<String, String>> {
            Ok(BTreeMap::new())
        }

        fn save(&self, _entries: &BTreeMap<String, String>) -> io::Result<()> {
            self.save_calls.set(self.save_calls.get() + 1);
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    /// 읽을 수도 치울 수도 없는 저장본
    struct StuckBackend {
        save_calls: Rc<Cell<usize>>,
    }

    impl PreferenceBackend for StuckBackend {
        fn load(&self) -> io::Result<BTreeMap<String, String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn save(&self, _entries: &BTreeMap<String, String>) -> io::Result<()> {
            self.save_calls.set(self.save_calls.get() + 1);
            Ok(())
        }

        fn set_aside(&self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_missing_key_returns_default() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.get("theme", "dark".to_string()), "dark");
        assert!(!store.get("dashboard-sidebar-collapsed", false));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = PreferenceStore::with_file(&path);
        store.set("theme", "light");
        store.set("dashboard-sidebar-collapsed", &true);
        assert_eq!(store.get("theme", String::new()), "light");

        let reopened = PreferenceStore::with_file(&path);
        assert_eq!(reopened.get("theme", String::new()), "light");
        assert!(reopened.get("dashboard-sidebar-collapsed", false));
        assert!(!path.with_file_name("preferences.toml.tmp").exists());
    }

    #[test]
    fn test_outage_keeps_in_memory_value() {
        let save_calls = Rc::new(Cell::new(0));
        let mut store = PreferenceStore::new(Box::new(BrokenBackend {
            save_calls: save_calls.clone(),
        }));

        store.set("language", "fr");

        assert_eq!(save_calls.get(), 1);
        assert_eq!(store.get("language", "en".to_string()), "fr");
    }

    #[test]
    fn test_unparseable_value_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(
            &path,
            "version = 1\n\n[entries]\ntheme = \"not json\"\n",
        )
        .unwrap();

        let store = PreferenceStore::with_file(&path);
        assert!(store.contains("theme"));
        assert_eq!(store.get("theme", "dark".to_string()), "dark");
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let store = PreferenceStore::with_file(&path);
        assert!(!store.contains("theme"));
    }

    #[test]
    fn test_corrupt_file_is_kept_as_backup_before_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let mut store = PreferenceStore::with_file(&path);
        store.set("theme", "light");
        store.set("language", "fr");

        let backup = TomlFileBackend::new(&path).backup_path();
        assert_eq!(fs::read_to_string(backup).unwrap(), "this is [not toml");
        let reopened = PreferenceStore::with_file(&path);
        assert_eq!(reopened.get("theme", String::new()), "light");
        assert_eq!(reopened.get("language", String::new()), "fr");
    }

    #[test]
    fn test_unreadable_store_that_cannot_be_moved_is_never_overwritten() {
        let save_calls = Rc::new(Cell::new(0));
        let mut store = PreferenceStore::new(Box::new(StuckBackend {
            save_calls: save_calls.clone(),
        }));

        store.set("theme", "light");
        store.remove("theme");
        store.set("language", "fr");

        assert_eq!(save_calls.get(), 0);
        assert_eq!(store.get("language", "en".to_string()), "fr");
    }

    #[test]
    fn test_remove_forgets_key_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut store = PreferenceStore::with_file(&path);
        store.set("access_token", "abc");
        store.remove("access_token");

        let reopened = PreferenceStore::with_file(&path);
        assert_eq!(reopened.get::<Option<String>>("access_token", None), None);
    }

    #[test]
    fn test_version_mismatch_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "version = 99\n\n[entries]\ntheme = '\"light\"'\n").unwrap();

        let store = PreferenceStore::with_file(&path);
        assert_eq!(store.get("theme", "dark".to_string()), "dark");
    }
}
