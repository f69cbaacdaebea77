// Resource table component - 리소스 목록 테이블
//
// 로딩 중이면 스켈레톤, 실패면 오류 패널, 성공했는데 비었으면 빈 상태 문구,
// 그 외에는 행 목록.

use super::skeleton::Skeleton;
use crate::models::{Device, FileRecord, LogEntry, Partition, Record, RecordStatus, User};
use crate::ui::{I18n, Theme};
use crate::utils::formatter::{format_file_size, format_timestamp, truncate_cell};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, Widget, Wrap},
};

/// 테이블 컬럼 (헤더 번역 키 + 폭)
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub width: Constraint,
}

const fn col(key: &'static str, width: Constraint) -> Column {
    Column { key, width }
}

/// 테이블 한 행으로 표시 가능한 레코드
pub trait TableRow: Record {
    fn columns() -> &'static [Column];
    fn cells(&self, i18n: I18n) -> Vec<String>;
    /// 확인/토스트 메시지용 이름
    fn display_name(&self) -> String;
}

fn status_cell(status: Option<RecordStatus>, i18n: I18n) -> String {
    match status {
        Some(RecordStatus::Active) => i18n.tr("status.active").to_string(),
        Some(RecordStatus::Inactive) => i18n.tr("status.inactive").to_string(),
        Some(RecordStatus::Unknown) => i18n.tr("status.unknown").to_string(),
        None => "-".to_string(),
    }
}

fn opt_cell(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

fn date_cell(value: Option<&str>) -> String {
    value.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}

impl TableRow for Device {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            col("col.name", Constraint::Fill(3)),
            col("col.type", Constraint::Fill(2)),
            col("col.capacity", Constraint::Length(10)),
            col("col.status", Constraint::Length(10)),
            col("col.added", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self, i18n: I18n) -> Vec<String> {
        vec![
            self.device_name.clone(),
            self.device_type.clone(),
            opt_cell(self.capacity.as_deref()),
            status_cell(self.status, i18n),
            date_cell(self.added_date.as_deref()),
        ]
    }

    fn display_name(&self) -> String {
        self.device_name.clone()
    }
}

impl TableRow for User {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            col("col.username", Constraint::Fill(2)),
            col("col.email", Constraint::Fill(3)),
            col("col.role", Constraint::Length(8)),
            col("col.status", Constraint::Length(10)),
            col("col.last_login", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self, i18n: I18n) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.role.as_str().to_string(),
            status_cell(self.account_status, i18n),
            date_cell(self.last_login.as_deref()),
        ]
    }

    fn display_name(&self) -> String {
        self.username.clone()
    }
}

impl TableRow for Partition {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            col("col.name", Constraint::Fill(3)),
            col("col.device", Constraint::Fill(2)),
            col("col.format", Constraint::Length(8)),
            col("col.size", Constraint::Length(10)),
            col("col.status", Constraint::Length(10)),
        ];
        COLUMNS
    }

    fn cells(&self, i18n: I18n) -> Vec<String> {
        vec![
            self.partition_name.clone(),
            opt_cell(self.device_id.as_deref()),
            opt_cell(self.format.as_deref()),
            opt_cell(self.size.as_deref()),
            status_cell(self.status, i18n),
        ]
    }

    fn display_name(&self) -> String {
        self.partition_name.clone()
    }
}

impl TableRow for FileRecord {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            col("col.name", Constraint::Fill(3)),
            col("col.type", Constraint::Length(10)),
            col("col.size", Constraint::Length(10)),
            col("col.partition", Constraint::Fill(2)),
            col("col.uploaded", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self, _i18n: I18n) -> Vec<String> {
        vec![
            self.file_name.clone(),
            opt_cell(self.file_type.as_deref()),
            self.file_size
                .map(format_file_size)
                .unwrap_or_else(|| "-".to_string()),
            opt_cell(self.partition_id.as_deref()),
            date_cell(self.upload_date.as_deref()),
        ]
    }

    fn display_name(&self) -> String {
        self.file_name.clone()
    }
}

impl TableRow for LogEntry {
    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            col("col.time", Constraint::Length(17)),
            col("col.type", Constraint::Length(10)),
            col("col.level", Constraint::Length(9)),
            col("col.message", Constraint::Fill(4)),
            col("col.user", Constraint::Fill(1)),
        ];
        COLUMNS
    }

    fn cells(&self, _i18n: I18n) -> Vec<String> {
        vec![
            date_cell(self.timestamp.as_deref()),
            opt_cell(Some(&self.log_type)),
            opt_cell(Some(&self.status)),
            self.message.clone(),
            opt_cell(self.user_id.as_deref()),
        ]
    }

    fn display_name(&self) -> String {
        self.message.clone()
    }
}

/// 테이블이 그릴 상태
#[derive(Debug)]
pub enum TableView<'a, R> {
    Loading,
    Failed(&'a str),
    Rows(&'a [R]),
}

impl<R> Clone for TableView<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for TableView<'_, R> {}

pub struct ResourceTable<'a, R: TableRow> {
    title: &'a str,
    view: TableView<'a, R>,
    selected: usize,
    i18n: I18n,
    theme: Theme,
}

impl<'a, R: TableRow> ResourceTable<'a, R> {
    pub fn new(view: TableView<'a, R>) -> Self {
        Self {
            title: "",
            view,
            selected: 0,
            i18n: I18n::default(),
            theme: Theme::dark(),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    fn color(&self, f: impl Fn(&Theme) -> &crate::ui::ColorDef) -> Color {
        f(&self.theme).to_color()
    }

    fn render_message(&self, inner: Rect, buf: &mut Buffer, lines: Vec<Line<'_>>) {
        let height = lines.len() as u16;
        let y = inner.y + inner.height.saturating_sub(height) / 2;
        let area = Rect {
            y,
            height: height.min(inner.height),
            ..inner
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_rows(&self, rows: &[R], inner: Rect, buf: &mut Buffer) {
        let columns = R::columns();
        let header_style = Style::default()
            .fg(self.color(|t| &t.table_header_fg))
            .add_modifier(Modifier::BOLD);
        let header = Row::new(
            columns
                .iter()
                .map(|c| self.i18n.tr(c.key).to_string())
                .collect::<Vec<_>>(),
        )
        .style(header_style);

        // 헤더 1줄 제외한 가시 행 수
        let visible = inner.height.saturating_sub(1).max(1) as usize;
        let offset = self.selected.saturating_sub(visible - 1);
        let cell_width = (inner.width as usize / columns.len().max(1)).max(4) * 2;

        let body = rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, record)| {
                let cells = record
                    .cells(self.i18n)
                    .into_iter()
                    .map(|c| truncate_cell(&c, cell_width))
                    .collect::<Vec<_>>();
                let style = if i == self.selected {
                    Style::default()
                        .bg(self.color(|t| &t.row_selected_bg))
                        .fg(self.color(|t| &t.row_selected_fg))
                } else {
                    Style::default().fg(self.color(|t| &t.fg_primary))
                };
                Row::new(cells).style(style)
            });

        Table::new(body, columns.iter().map(|c| c.width))
            .header(header)
            .column_spacing(1)
            .render(inner, buf);
    }
}

impl<R: TableRow> Widget for ResourceTable<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = self.color(|t| &t.bg_primary);
        buf.set_style(area, Style::default().bg(bg));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.color(|t| &t.accent))
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.color(|t| &t.border)));
        let inner = block.inner(area);
        block.render(area, buf);

        match self.view {
            TableView::Loading => {
                Skeleton::new()
                    .rows(inner.height / 2)
                    .theme(&self.theme)
                    .render(inner, buf);
            }
            TableView::Failed(message) => {
                let error = self.color(|t| &t.error);
                let lines = vec![
                    Line::styled(
                        self.i18n.tr("table.error_title"),
                        Style::default().fg(error).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(message, Style::default().fg(error)),
                    Line::from(""),
                    Line::styled(
                        self.i18n.tr("table.retry_hint"),
                        Style::default().fg(self.color(|t| &t.fg_muted)),
                    ),
                ];
                self.render_message(inner, buf, lines);
            }
            TableView::Rows([]) => {
                let lines = vec![Line::styled(
                    self.i18n.tr("table.empty"),
                    Style::default().fg(self.color(|t| &t.fg_muted)),
                )];
                self.render_message(inner, buf, lines);
            }
            TableView::Rows(rows) => self.render_rows(rows, inner, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn devices() -> Vec<Device> {
        serde_json::from_value(json!([
            { "_id": "1", "device_name": "Scanner A", "device_type": "usb", "status": "active" },
            { "_id": "2", "device_name": "Scanner B", "device_type": "sd", "status": "inactive" }
        ]))
        .unwrap()
    }

    fn render(view: TableView<'_, Device>) -> String {
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        ResourceTable::new(view).title("Devices").render(area, &mut buf);
        screen_text(&buf)
    }

    #[test]
    fn test_log_rows_show_level_and_message() {
        let logs: Vec<LogEntry> = serde_json::from_value(json!([
            { "_id": "l1", "log_type": "auth", "message": "Login failed", "status": "error" }
        ]))
        .unwrap();
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        ResourceTable::new(TableView::Rows(&logs))
            .title("Logs")
            .render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains("Level"));
        assert!(text.contains("Login failed"));
        assert!(text.contains("error"));
    }

    #[test]
    fn test_rows_render_with_header() {
        let devices = devices();
        let text = render(TableView::Rows(&devices));
        assert!(text.contains("Name"));
        assert!(text.contains("Scanner A"));
        assert!(text.contains("inactive"));
    }

    #[test]
    fn test_failed_shows_error_not_empty_state() {
        let text = render(TableView::Failed("Database unavailable"));
        assert!(text.contains("Failed to load data"));
        assert!(text.contains("Database unavailable"));
        assert!(!text.contains("No records found"));
    }

    #[test]
    fn test_empty_success_shows_empty_state() {
        let text = render(TableView::Rows(&[]));
        assert!(text.contains("No records found"));
    }

    #[test]
    fn test_loading_shows_skeleton() {
        let text = render(TableView::Loading);
        assert!(text.contains('░'));
        assert!(!text.contains("Name"));
    }

    #[test]
    fn test_file_cells_format_size() {
        let file: FileRecord =
            serde_json::from_value(json!({ "_id": "f", "file_name": "a.bin", "file_size": 2048 }))
                .unwrap();
        let cells = file.cells(I18n::default());
        assert_eq!(cells[0], "a.bin");
        assert_eq!(cells[2], format_file_size(2048));
        assert_eq!(cells[1], "-");
    }
}
