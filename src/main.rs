mod api;
mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use crate::api::Resource;
use crate::core::actions::generate_command_bar_items;
use crate::core::{GuardedArea, Route};
use app::{App, LoadState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use system::{config::app_dir, setup_tracing, Config, PreferenceStore};
use ui::{
    CommandBar, Dialog, Header, LayoutMode, LoginForm, ResourceTable, Sidebar, SidebarItem,
    Skeleton, StatusBar, TableRow, ThemeMode, UiContext, WarningScreen,
};
use utils::error::Result;
use utils::formatter::format_number_with_commas;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    if let Some(log_path) = config.log_path() {
        setup_tracing(&log_path)?;
    }

    let prefs = match config.preferences_path() {
        Some(path) => PreferenceStore::with_file(path),
        None => PreferenceStore::in_memory(),
    };
    let ctx = UiContext::new(prefs, app_dir().map(|dir| dir.join("themes")));

    // Create app
    let mut app = App::new(config, ctx)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminated with error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 로딩/확인 화면을 한 번 그린 뒤 미뤄 둔 요청 실행
        if app.pending_task().is_some() {
            app.run_pending_task().await;
            continue;
        }

        let poll_timeout = if app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    handle_key(app, key.modifiers, key.code).await;
                }
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }
        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

async fn handle_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if app.layout.is_too_small() {
        if matches!(code, KeyCode::Char('q') | KeyCode::Esc)
            || (modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c'))
        {
            app.quit();
        }
        return;
    }

    if app.is_dialog_active() {
        app.handle_dialog_key(code).await;
    } else if app.gate.allows_children() {
        app.handle_normal_key(modifiers, code).await;
    } else if app.gate.needs_login() {
        app.handle_login_key(modifiers, code);
    } else if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        app.quit();
    }
}

fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    if app.gate.allows_children() {
        app.layout.update(size);
    } else {
        app.layout.update_without_sidebar(size);
    }

    if app.layout_mode() == LayoutMode::TooSmall {
        let (width, height) = app.layout.terminal_size();
        let warning = WarningScreen::new()
            .current_size(width, height)
            .i18n(app.ctx.i18n)
            .theme(app.ctx.palette());
        f.render_widget(warning, size);
        return;
    }

    render_header(f, app);

    let areas = app.layout.areas().clone();
    if app.gate.allows_children() {
        render_sidebar(f, app, areas.sidebar);
        render_route(f, app, areas.main);
    } else if app.gate.needs_login() {
        let form = LoginForm::new(app.login.email.value(), app.login.password.value().chars().count())
            .focus(app.login.focus)
            .error(app.login.error.as_deref())
            .busy(app.login.busy)
            .i18n(app.ctx.i18n)
            .theme(app.ctx.palette());
        f.render_widget(form, areas.main);
    } else {
        render_checking(f, app, areas.main);
    }

    render_status_bar(f, app, areas.status_bar);
    render_command_bar(f, app, areas.command_bar);

    if let Some(dialog) = &app.dialog {
        f.render_widget(Dialog::new(dialog).theme(app.ctx.palette()), size);
    }
}

fn render_header(f: &mut Frame, app: &App) {
    let area_label = match app.area() {
        GuardedArea::Admin => app.ctx.tr("app.admin_area"),
        GuardedArea::Client => app.ctx.tr("app.client_area"),
    };
    let user_label = app
        .gate
        .user()
        .map(|user| app.ctx.fmt("header.signed_in_as", &[("name", user.username.clone())]))
        .unwrap_or_default();
    let theme_label = match app.ctx.theme.mode() {
        ThemeMode::Dark => app.ctx.tr("header.theme_dark"),
        ThemeMode::Light => app.ctx.tr("header.theme_light"),
    };

    let header = Header::new()
        .app_name(app.ctx.tr("app.title"))
        .area_label(if app.gate.allows_children() { area_label } else { "" })
        .user_label(&user_label)
        .language_code(app.ctx.language().code())
        .theme_label(theme_label)
        .theme(app.ctx.palette());
    f.render_widget(header, app.layout.areas().header);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<SidebarItem> = app
        .routes()
        .iter()
        .map(|route| SidebarItem::new(route.icon(), app.ctx.tr(route.label_key())))
        .collect();
    let sidebar = Sidebar::new(&items)
        .active(app.route_index)
        .collapsed(app.layout.sidebar_collapsed())
        .theme(app.ctx.palette());
    f.render_widget(sidebar, area);
}

fn render_checking(f: &mut Frame, app: &App, area: Rect) {
    let y = area.y + area.height / 2;
    let line = Rect::new(area.x, y, area.width, 1);
    let text = Paragraph::new(app.ctx.tr("auth.checking"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.ctx.palette().fg_muted.to_color()));
    f.render_widget(text, line);
}

fn render_table<R: Resource + TableRow>(
    f: &mut Frame,
    app: &App,
    page: &app::ResourcePage<R>,
    area: Rect,
) {
    let table = ResourceTable::new(page.view())
        .title(app.ctx.tr(app.current_route().label_key()))
        .selected(page.selected())
        .i18n(app.ctx.i18n)
        .theme(app.ctx.palette());
    f.render_widget(table, area);
}

fn render_route(f: &mut Frame, app: &App, area: Rect) {
    match app.current_route() {
        Route::Dashboard => render_dashboard(f, app, area),
        Route::Users => render_table(f, app, &app.pages.users, area),
        Route::Devices => render_table(f, app, &app.pages.devices, area),
        Route::Partitions => render_table(f, app, &app.pages.partitions, area),
        Route::Files => render_table(f, app, &app.pages.files, area),
        Route::Logs => render_logs(f, app, area),
        Route::Overview => render_overview(f, app, area),
        Route::Settings => render_settings(f, app, area),
    }
}

fn panel<'a>(app: &App, title: &'a str) -> Block<'a> {
    let theme = app.ctx.palette();
    Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(theme.accent.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border.to_color()))
        .style(
            Style::default()
                .bg(theme.bg_primary.to_color())
                .fg(theme.fg_primary.to_color()),
        )
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.ctx.palette();
    let [stats_area, recent_area] =
        Layout::vertical([Constraint::Fill(2), Constraint::Fill(1)]).areas(area);

    let stats_block = panel(app, app.ctx.tr("dashboard.stats"));
    let recent_block = panel(app, app.ctx.tr("dashboard.recent"));
    let stats_inner = stats_block.inner(stats_area);
    let recent_inner = recent_block.inner(recent_area);
    f.render_widget(stats_block, stats_area);
    f.render_widget(recent_block, recent_area);

    match &app.pages.stats {
        LoadState::Idle | LoadState::Loading => {
            f.render_widget(
                Skeleton::new().rows(stats_inner.height).theme(theme),
                stats_inner,
            );
        }
        LoadState::Failed(message) => {
            let lines = vec![
                Line::from(Span::styled(
                    app.ctx.tr("table.error_title"),
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(message.as_str()),
                Line::from(Span::styled(
                    app.ctx.tr("table.retry_hint"),
                    Style::default().fg(theme.fg_muted.to_color()),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                stats_inner,
            );
        }
        LoadState::Loaded(stats) => {
            let key_style = Style::default().fg(theme.table_header_fg.to_color());
            let rows: Vec<Row> = stats
                .rows()
                .into_iter()
                .map(|(name, value)| Row::new(vec![Span::styled(name, key_style), Span::raw(value)]))
                .collect();
            if rows.is_empty() {
                f.render_widget(
                    Paragraph::new(app.ctx.tr("table.empty")).alignment(Alignment::Center),
                    stats_inner,
                );
            } else {
                let table = Table::new(rows, [Constraint::Fill(2), Constraint::Fill(1)]);
                f.render_widget(table, stats_inner);
            }

            let recent: Vec<Line> = stats
                .recent_counts()
                .into_iter()
                .map(|(name, count)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", name), key_style),
                        Span::raw(format_number_with_commas(count as u64)),
                    ])
                })
                .collect();
            f.render_widget(Paragraph::new(recent), recent_inner);
        }
    }
}

/// 로그 통계 한 줄 요약 + 로그 목록
fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.ctx.palette();
    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let line = match &app.pages.log_stats {
        LoadState::Idle | LoadState::Loading => Line::from(Span::styled(
            app.ctx.tr("table.loading"),
            Style::default().fg(theme.fg_muted.to_color()),
        )),
        LoadState::Failed(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error.to_color()),
        )),
        LoadState::Loaded(stats) => Line::from(app.ctx.fmt(
            "logs.summary",
            &[
                ("total", format_number_with_commas(stats.total_logs)),
                ("statuses", stats.status_summary()),
            ],
        )),
    };
    let block = panel(app, app.ctx.tr("logs.stats"));
    f.render_widget(Paragraph::new(line).block(block), summary_area);
    render_table(f, app, &app.pages.logs, table_area);
}

fn render_overview(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(app, app.ctx.tr("overview.profile"));
    let lines = match app.gate.user() {
        Some(user) => vec![
            Line::from(Span::styled(
                user.username.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(app.ctx.fmt("overview.email", &[("email", user.email.clone())])),
            Line::from(app.ctx.fmt("overview.role", &[("role", user.role.as_str().to_string())])),
        ],
        None => Vec::new(),
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(app, app.ctx.tr("settings.title"));
    let theme_value = match app.ctx.theme.mode() {
        ThemeMode::Dark => app.ctx.tr("header.theme_dark"),
        ThemeMode::Light => app.ctx.tr("header.theme_light"),
    };
    let sidebar_value = if app.layout.sidebar_collapsed() {
        app.ctx.tr("settings.collapsed")
    } else {
        app.ctx.tr("settings.expanded")
    };
    let lines = vec![
        Line::from(app.ctx.fmt(
            "settings.language",
            &[("value", app.ctx.language().display_name().to_string())],
        )),
        Line::from(app.ctx.fmt("settings.theme", &[("value", theme_value.to_string())])),
        Line::from(app.ctx.fmt("settings.sidebar", &[("value", sidebar_value.to_string())])),
        Line::from(app.ctx.fmt("settings.server", &[("value", app.api.base_url().to_string())])),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let i18n = app.ctx.i18n;
    let mut page_info = match app.current_route() {
        _ if !app.gate.allows_children() => String::new(),
        Route::Users => app.pages.users.page_info(i18n),
        Route::Devices => app.pages.devices.page_info(i18n),
        Route::Partitions => app.pages.partitions.page_info(i18n),
        Route::Files => app.pages.files.page_info(i18n),
        Route::Logs => app.pages.logs.page_info(i18n),
        _ => String::new(),
    };
    if let Some(pending) = app.pending_key_display() {
        page_info = format!("{}  {}", pending, page_info);
    }

    let status = StatusBar::new()
        .message(app.toast_display())
        .page_info(&page_info)
        .theme(app.ctx.palette());
    f.render_widget(status, area);
}

fn render_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let commands = if app.gate.allows_children() {
        generate_command_bar_items(app.ctx.i18n, Some(app.current_route()))
    } else {
        Vec::new()
    };
    let bar = CommandBar::new().commands(commands).theme(app.ctx.palette());
    f.render_widget(bar, area);
}
