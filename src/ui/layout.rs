// Layout system - 대시보드 셸 레이아웃
//
// 헤더 | (사이드바 | 메인) | 상태바 | 커맨드바
// 사이드바 폭은 접힘 여부에 따라 7 / 24 컬럼.
// 최소 크기보다 작으면 경고 화면.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 15;
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Shell,
    /// 터미널이 너무 작음
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    pub header: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// TooSmall 모드에서 사용
    pub warning: Rect,
}

#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    sidebar_collapsed: bool,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LayoutManager {
    pub fn new(sidebar_collapsed: bool) -> Self {
        Self {
            mode: LayoutMode::Shell,
            sidebar_collapsed,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::Shell
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::Shell => self.calculate_shell_areas(area),
        };
    }

    /// 로그인 화면처럼 사이드바 없이 전체 폭을 쓰는 경우
    pub fn update_without_sidebar(&mut self, area: Rect) {
        self.update(area);
        if self.mode == LayoutMode::Shell {
            let sidebar = self.areas.sidebar;
            self.areas.main = Rect {
                x: sidebar.x,
                width: sidebar.width + self.areas.main.width,
                ..self.areas.main
            };
            self.areas.sidebar = Rect::default();
        }
    }

    fn calculate_shell_areas(&self, area: Rect) -> LayoutAreas {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // 헤더
                Constraint::Min(3),    // 본문
                Constraint::Length(1), // 상태바
                Constraint::Length(1), // 커맨드바
            ])
            .split(area);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.sidebar_width()), Constraint::Min(1)])
            .split(vertical_chunks[1]);

        LayoutAreas {
            header: vertical_chunks[0],
            sidebar: body_chunks[0],
            main: body_chunks[1],
            status_bar: vertical_chunks[2],
            command_bar: vertical_chunks[3],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn is_too_small(&self) -> bool {
        self.mode == LayoutMode::TooSmall
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    pub fn sidebar_width(&self) -> u16 {
        if self.sidebar_collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_EXPANDED_WIDTH
        }
    }
}
