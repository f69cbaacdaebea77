// Skeleton component - 로딩 중 자리표시 막대

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// 행마다 폭이 다른 막대 (반복)
const BAR_RATIOS: [u16; 4] = [90, 70, 80, 55];

pub struct Skeleton {
    rows: u16,
    color: Color,
    bg_color: Color,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            rows: 5,
            color: Color::DarkGray,
            bg_color: Color::Reset,
        }
    }
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.color = theme.skeleton.to_color();
        self.bg_color = theme.bg_primary.to_color();
        self
    }
}

impl Widget for Skeleton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let inner_width = area.width.saturating_sub(2);
        for row in 0..self.rows {
            let y = area.y + 1 + row * 2;
            if y >= area.y + area.height {
                break;
            }
            let ratio = BAR_RATIOS[row as usize % BAR_RATIOS.len()];
            let width = (inner_width as u32 * ratio as u32 / 100) as u16;
            buf.set_string(
                area.x + 1,
                y,
                "░".repeat(width as usize),
                Style::default().fg(self.color).bg(self.bg_color),
            );
        }
    }
}
