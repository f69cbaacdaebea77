// Header component - 상단 헤더
//
// 앱 이름, 영역, 현재 사용자 / 언어, 테마 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct Header<'a> {
    app_name: &'a str,
    area_label: &'a str,
    user_label: &'a str,
    language_code: &'a str,
    theme_label: &'a str,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    muted_color: Color,
}

impl<'a> Default for Header<'a> {
    fn default() -> Self {
        Self {
            app_name: "FingerScanner",
            area_label: "",
            user_label: "",
            language_code: "en",
            theme_label: "",
            bg_color: Color::Rgb(30, 41, 59),
            fg_color: Color::White,
            accent_color: Color::Rgb(59, 130, 246),
            muted_color: Color::Gray,
        }
    }
}

impl<'a> Header<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_name(mut self, name: &'a str) -> Self {
        self.app_name = name;
        self
    }

    pub fn area_label(mut self, label: &'a str) -> Self {
        self.area_label = label;
        self
    }

    /// 로그인 사용자 표시 문자열
    pub fn user_label(mut self, label: &'a str) -> Self {
        self.user_label = label;
        self
    }

    pub fn language_code(mut self, code: &'a str) -> Self {
        self.language_code = code;
        self
    }

    pub fn theme_label(mut self, label: &'a str) -> Self {
        self.theme_label = label;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.header_bg.to_color();
        self.fg_color = theme.header_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self.muted_color = theme.fg_muted.to_color();
        self
    }

    fn right_text(&self) -> String {
        let mut parts = Vec::new();
        if !self.user_label.is_empty() {
            parts.push(self.user_label.to_string());
        }
        parts.push(format!("[{}]", self.language_code.to_uppercase()));
        if !self.theme_label.is_empty() {
            parts.push(format!("[{}]", self.theme_label));
        }
        format!("{} ", parts.join(" "))
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left_name = format!(" {} ", self.app_name);
        let left_area = if self.area_label.is_empty() {
            String::new()
        } else {
            format!("· {} ", self.area_label)
        };
        let right = self.right_text();

        let used = left_name.width() + left_area.width() + right.width();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                left_name,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(left_area, Style::default().fg(self.muted_color)),
            Span::raw(" ".repeat(padding)),
            Span::styled(right, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
