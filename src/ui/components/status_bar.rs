// Status bar component - 상태바 컴포넌트
//
// 왼쪽: 토스트/오류 메시지, 오른쪽: 페이지 정보

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageLevel {
    #[default]
    Info,
    Error,
}

pub struct StatusBar<'a> {
    message: Option<(&'a str, MessageLevel)>,
    page_info: &'a str,
    bg_color: Color,
    fg_color: Color,
    error_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            message: None,
            page_info: "",
            bg_color: Color::Rgb(37, 99, 235),
            fg_color: Color::White,
            error_color: Color::Rgb(248, 113, 113),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Option<(&'a str, MessageLevel)>) -> Self {
        self.message = message;
        self
    }

    /// 페이지 정보 설정
    pub fn page_info(mut self, info: &'a str) -> Self {
        self.page_info = info;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.error_color = theme.error.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let right_info = if self.page_info.is_empty() {
            String::new()
        } else {
            format!("{} ", self.page_info)
        };
        let available = (area.width as usize).saturating_sub(right_info.width() + 1);

        let (left_text, left_style) = match self.message {
            Some((text, MessageLevel::Error)) => (
                format!(" ✗ {}", text),
                Style::default()
                    .fg(self.error_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Some((text, MessageLevel::Info)) => {
                (format!(" {}", text), Style::default().fg(self.fg_color))
            }
            None => (String::new(), Style::default()),
        };
        let left_text = crate::utils::formatter::truncate_cell(&left_text, available);
        let padding = (area.width as usize).saturating_sub(left_text.width() + right_info.width());

        let line = Line::from(vec![
            Span::styled(left_text, left_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(right_info, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
