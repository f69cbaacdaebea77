// Login form component - 로그인 화면
//
// 이메일/비밀번호 입력과 오류 메시지. 비밀번호는 마스킹.

use crate::ui::{I18n, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 13;
const LABEL_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

pub struct LoginForm<'a> {
    email: &'a str,
    password_len: usize,
    focus: LoginField,
    error: Option<&'a str>,
    busy: bool,
    i18n: I18n,
    bg_color: Color,
    fg_color: Color,
    muted_color: Color,
    accent_color: Color,
    input_bg: Color,
    error_color: Color,
}

impl<'a> LoginForm<'a> {
    pub fn new(email: &'a str, password_len: usize) -> Self {
        Self {
            email,
            password_len,
            focus: LoginField::Email,
            error: None,
            busy: false,
            i18n: I18n::default(),
            bg_color: Color::Rgb(15, 23, 42),
            fg_color: Color::White,
            muted_color: Color::Gray,
            accent_color: Color::Rgb(59, 130, 246),
            input_bg: Color::Rgb(30, 41, 59),
            error_color: Color::Red,
        }
    }

    pub fn focus(mut self, field: LoginField) -> Self {
        self.focus = field;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// 로그인 요청 진행 중
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.muted_color = theme.fg_muted.to_color();
        self.accent_color = theme.accent.to_color();
        self.input_bg = theme.header_bg.to_color();
        self.error_color = theme.error.to_color();
        self
    }

    /// 화면 중앙 폼 영역
    pub fn form_area(screen: Rect) -> Rect {
        let width = FORM_WIDTH.min(screen.width);
        let height = FORM_HEIGHT.min(screen.height);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }

    fn render_field(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, field: LoginField) {
        let (label_key, text) = match field {
            LoginField::Email => ("auth.email", self.email.to_string()),
            LoginField::Password => ("auth.password", "•".repeat(self.password_len)),
        };
        let focused = self.focus == field;

        let label_style = if focused {
            Style::default()
                .fg(self.accent_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted_color)
        };
        buf.set_string(x, y, self.i18n.tr(label_key), label_style);

        let input_x = x + LABEL_WIDTH;
        let input_width = width.saturating_sub(LABEL_WIDTH) as usize;
        // 입력이 길면 끝부분을 보여준다
        let mut shown = text.as_str();
        while shown.width() + 1 > input_width && !shown.is_empty() {
            let mut chars = shown.chars();
            chars.next();
            shown = chars.as_str();
        }
        let cursor = if focused && !self.busy { "▏" } else { "" };
        let content = format!("{}{}", shown, cursor);
        let pad = input_width.saturating_sub(content.width());
        buf.set_string(
            input_x,
            y,
            format!("{}{}", content, " ".repeat(pad)),
            Style::default().bg(self.input_bg).fg(self.fg_color),
        );
    }
}

impl Widget for LoginForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let form = Self::form_area(area);
        Clear.render(form, buf);

        let block = Block::default()
            .title(format!(" {} ", self.i18n.tr("auth.title")))
            .title_alignment(Alignment::Center)
            .title_style(
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent_color))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(form);
        block.render(form, buf);

        let x = inner.x + 2;
        let width = inner.width.saturating_sub(4);
        self.render_field(buf, x, inner.y + 1, width, LoginField::Email);
        self.render_field(buf, x, inner.y + 3, width, LoginField::Password);

        let status_y = inner.y + 5;
        if self.busy {
            buf.set_string(
                x,
                status_y,
                self.i18n.tr("auth.signing_in"),
                Style::default().fg(self.muted_color),
            );
        } else if let Some(error) = self.error {
            let area = Rect::new(x, status_y, width, 2);
            Paragraph::new(error)
                .style(Style::default().fg(self.error_color))
                .wrap(ratatui::widgets::Wrap { trim: true })
                .render(area, buf);
        }

        let hint_y = inner.y + inner.height.saturating_sub(1);
        Paragraph::new(self.i18n.tr("auth.hint"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.muted_color))
            .render(Rect::new(inner.x, hint_y, inner.width, 1), buf);
    }
}
