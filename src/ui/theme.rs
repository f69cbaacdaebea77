use crate::system::PreferenceStore;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const THEME_PREF_KEY: &str = "theme";

/// 색상 팔레트
///
/// 대시보드 전체 색상. TOML 파일로 덮어쓸 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,
    pub fg_muted: ColorDef,

    // 셸
    pub header_bg: ColorDef,
    pub header_fg: ColorDef,
    pub sidebar_bg: ColorDef,
    pub sidebar_fg: ColorDef,
    pub sidebar_active_bg: ColorDef,
    pub sidebar_active_fg: ColorDef,
    pub border: ColorDef,

    // 테이블
    pub table_header_fg: ColorDef,
    pub row_selected_bg: ColorDef,
    pub row_selected_fg: ColorDef,
    pub skeleton: ColorDef,

    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(hex) if hex.starts_with('#') => parse_hex_color(hex),
            ColorDef::Hex(name) | ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 팔레트 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#0f172a".into(),
            fg_primary: "#e2e8f0".into(),
            fg_muted: "#94a3b8".into(),

            header_bg: "#1e293b".into(),
            header_fg: "#f8fafc".into(),
            sidebar_bg: "#111827".into(),
            sidebar_fg: "#cbd5e1".into(),
            sidebar_active_bg: "#2563eb".into(),
            sidebar_active_fg: "#ffffff".into(),
            border: "#334155".into(),

            table_header_fg: "#93c5fd".into(),
            row_selected_bg: "#1d4ed8".into(),
            row_selected_fg: "#ffffff".into(),
            skeleton: "#334155".into(),

            status_bar_bg: "#2563eb".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#1e293b".into(),
            command_bar_fg: "#cbd5e1".into(),

            accent: "#3b82f6".into(),
            warning: "#f59e0b".into(),
            error: "#f87171".into(),
            success: "#34d399".into(),
        }
    }

    /// Light 팔레트
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#0f172a".into(),
            fg_muted: "#64748b".into(),

            header_bg: "#f1f5f9".into(),
            header_fg: "#0f172a".into(),
            sidebar_bg: "#f8fafc".into(),
            sidebar_fg: "#334155".into(),
            sidebar_active_bg: "#2563eb".into(),
            sidebar_active_fg: "#ffffff".into(),
            border: "#cbd5e1".into(),

            table_header_fg: "#1d4ed8".into(),
            row_selected_bg: "#dbeafe".into(),
            row_selected_fg: "#0f172a".into(),
            skeleton: "#e2e8f0".into(),

            status_bar_bg: "#2563eb".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f1f5f9".into(),
            command_bar_fg: "#334155".into(),

            accent: "#2563eb".into(),
            warning: "#d97706".into(),
            error: "#dc2626".into(),
            success: "#059669".into(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// TOML 파일에서 팔레트 로드
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// `COLORFGBG` ("전경;배경") 값으로 밝은 배경 여부 판단
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match background {
            7 | 9..=15 => Some(ThemeMode::Light),
            _ => Some(ThemeMode::Dark),
        }
    }
}

/// 라이트/다크 전환과 저장
///
/// 저장된 `theme` 값이 없으면 터미널 배경에서 추정해 바로 저장한다.
#[derive(Debug, Clone)]
pub struct ThemeController {
    mode: ThemeMode,
    palette: Theme,
    themes_dir: Option<PathBuf>,
}

impl ThemeController {
    pub fn init(prefs: &mut PreferenceStore, themes_dir: Option<PathBuf>) -> Self {
        Self::init_with(prefs, themes_dir, env::var("COLORFGBG").ok())
    }

    pub fn init_with(
        prefs: &mut PreferenceStore,
        themes_dir: Option<PathBuf>,
        colorfgbg: Option<String>,
    ) -> Self {
        let stored: Option<ThemeMode> = prefs.get(THEME_PREF_KEY, None);
        let mode = match stored {
            Some(mode) => mode,
            None => {
                let detected = colorfgbg
                    .as_deref()
                    .and_then(ThemeMode::from_colorfgbg)
                    .unwrap_or(ThemeMode::Dark);
                debug!(mode = detected.name(), "theme detected from terminal");
                prefs.set(THEME_PREF_KEY, &detected);
                detected
            }
        };

        let mut controller = Self {
            mode,
            palette: Theme::for_mode(mode),
            themes_dir,
        };
        controller.apply(mode);
        controller
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn current(&self) -> &Theme {
        &self.palette
    }

    /// 모드 반전 + 팔레트 교체 + 저장
    pub fn toggle(&mut self, prefs: &mut PreferenceStore) -> ThemeMode {
        let next = self.mode.toggled();
        self.apply(next);
        prefs.set(THEME_PREF_KEY, &next);
        info!(mode = next.name(), "theme changed");
        next
    }

    /// `<themes_dir>/<mode>.toml`이 있으면 기본 팔레트 대신 사용
    fn apply(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.palette = self
            .themes_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.toml", mode.name())))
            .filter(|path| path.exists())
            .and_then(|path| match Theme::from_file(&path) {
                Ok(theme) => Some(theme),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "invalid theme file");
                    None
                }
            })
            .unwrap_or_else(|| Theme::for_mode(mode));
    }
}
