//! 다이얼로그 위젯
//!
//! 삭제 확인(예/아니오)과 단순 메시지 표시.

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    /// 확인 다이얼로그
    Confirm {
        title: String,
        message: String,
        confirm_label: String,
        cancel_label: String,
        selected_button: usize, // 0: 확인, 1: 취소
    },
    Message { title: String, message: String },
}

impl DialogKind {
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
        cancel_label: impl Into<String>,
    ) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
            cancel_label: cancel_label.into(),
            // 파괴적 동작이라 취소가 기본
            selected_button: 1,
        }
    }

    pub fn toggle_button(&mut self) {
        if let DialogKind::Confirm {
            selected_button, ..
        } = self
        {
            *selected_button = 1 - (*selected_button).min(1);
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            DialogKind::Confirm {
                selected_button: 0,
                ..
            }
        )
    }
}

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(30, 41, 59),
            fg_color: Color::Rgb(226, 232, 240),
            border_color: Color::Rgb(59, 130, 246),
            title_color: Color::Rgb(59, 130, 246),
            button_bg: Color::Rgb(51, 65, 85),
            button_fg: Color::Rgb(226, 232, 240),
            button_selected_bg: Color::Rgb(220, 38, 38),
            button_selected_fg: Color::White,
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.header_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.border.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.row_selected_bg.to_color();
        self.button_selected_fg = theme.row_selected_fg.to_color();
        self
    }

    /// 화면 중앙 영역
    fn calculate_area(&self, screen: Rect) -> Rect {
        let width = 50u16.min(screen.width.saturating_sub(4)).max(30);
        let message_lines = match self.kind {
            DialogKind::Confirm { message, .. } | DialogKind::Message { message, .. } => {
                let inner = width.saturating_sub(DIALOG_H_PADDING * 2 + 2).max(1) as usize;
                message.width().div_ceil(inner).max(1) as u16
            }
        };
        let height = (message_lines + 6).min(screen.height.saturating_sub(2));
        let width = width.min(screen.width);

        Rect {
            x: screen.x + screen.width.saturating_sub(width) / 2,
            y: screen.y + screen.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// 버튼 렌더링 (그린 폭 반환)
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, selected: bool) -> u16 {
        let (bg, fg) = if selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };
        let padded = format!(" {} ", label);
        let width = padded.width() as u16;
        buf.set_string(x, y, &padded, Style::default().fg(fg).bg(bg));
        width
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        Clear.render(dialog_area, buf);

        let (title, message) = match self.kind {
            DialogKind::Confirm { title, message, .. } | DialogKind::Message { title, message } => {
                (title, message)
            }
        };

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color));
        block.render(dialog_area, buf);

        let inner = Rect {
            x: dialog_area.x + DIALOG_H_PADDING,
            y: dialog_area.y + DIALOG_V_PADDING,
            width: dialog_area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: dialog_area.height.saturating_sub(DIALOG_V_PADDING * 2),
        };
        Paragraph::new(message.as_str())
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    height: inner.height.saturating_sub(2),
                    ..inner
                },
                buf,
            );

        if let DialogKind::Confirm {
            confirm_label,
            cancel_label,
            selected_button,
            ..
        } = self.kind
        {
            let button_y = dialog_area.y + dialog_area.height.saturating_sub(2);
            let buttons_width =
                (format!(" {} ", confirm_label).width() + 2 + format!(" {} ", cancel_label).width())
                    as u16;
            let button_x = dialog_area.x + dialog_area.width.saturating_sub(buttons_width) / 2;

            let ok_width =
                self.render_button(buf, button_x, button_y, confirm_label, *selected_button == 0);
            self.render_button(
                buf,
                button_x + ok_width + 2,
                button_y,
                cancel_label,
                *selected_button == 1,
            );
        }
    }
}
