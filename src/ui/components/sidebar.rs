// Sidebar component - 좌측 경로 목록
//
// 펼침: 아이콘 + 이름, 접힘: 아이콘만

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarItem {
    pub icon: &'static str,
    pub label: String,
}

impl SidebarItem {
    pub fn new(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
        }
    }
}

pub struct Sidebar<'a> {
    items: &'a [SidebarItem],
    active: usize,
    collapsed: bool,
    bg_color: Color,
    fg_color: Color,
    active_bg: Color,
    active_fg: Color,
    border_color: Color,
}

impl<'a> Sidebar<'a> {
    pub fn new(items: &'a [SidebarItem]) -> Self {
        Self {
            items,
            active: 0,
            collapsed: false,
            bg_color: Color::Rgb(17, 24, 39),
            fg_color: Color::Gray,
            active_bg: Color::Rgb(37, 99, 235),
            active_fg: Color::White,
            border_color: Color::DarkGray,
        }
    }

    pub fn active(mut self, index: usize) -> Self {
        self.active = index;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.sidebar_bg.to_color();
        self.fg_color = theme.sidebar_fg.to_color();
        self.active_bg = theme.sidebar_active_bg.to_color();
        self.active_fg = theme.sidebar_active_fg.to_color();
        self.border_color = theme.border.to_color();
        self
    }

    fn item_text(&self, item: &SidebarItem, width: usize) -> String {
        let text = if self.collapsed {
            format!(" {}", item.icon)
        } else {
            format!(" {} {}", item.icon, item.label)
        };
        let truncated = crate::utils::formatter::truncate_cell(&text, width);
        let pad = width.saturating_sub(truncated.width());
        format!("{}{}", truncated, " ".repeat(pad))
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, item) in self.items.iter().enumerate() {
            let y = inner.y + (i as u16) * 2 + 1;
            if y >= inner.y + inner.height {
                break;
            }
            let style = if i == self.active {
                Style::default()
                    .bg(self.active_bg)
                    .fg(self.active_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(self.bg_color).fg(self.fg_color)
            };
            let text = self.item_text(item, inner.width as usize);
            buf.set_string(inner.x, y, text, style);
        }
    }
}
