use super::*;
use crate::core::actions::Action;
use crate::ui::{LoginField, TableView, ThemeMode};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// 임의 포트에 서버를 띄우고 base URL 반환
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 리스닝하지 않는 주소 (연결 거부)
async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn user_json(role: &str) -> Value {
    json!({
        "user_id": "u-1",
        "username": "alice",
        "email": "alice@example.com",
        "role": role,
        "account_status": "active"
    })
}

fn session(role: &str) -> Session {
    Session {
        access_token: "token-1".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        user: serde_json::from_value(user_json(role)).unwrap(),
    }
}

fn device_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "device_name": name,
        "device_type": "usb",
        "capacity": "32GB",
        "status": "active"
    })
}

/// 2페이지(5 + 2건) 장치 목록
fn device_list_router() -> Router {
    Router::new().route(
        "/api/devices",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            let page: u32 = query
                .get("page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let items: Vec<Value> = if page == 1 {
                ["a", "b", "c", "d", "e"]
                    .iter()
                    .map(|id| device_json(id, &format!("Scanner {}", id.to_uppercase())))
                    .collect()
            } else {
                vec![device_json("f", "Scanner F"), device_json("g", "Scanner G")]
            };
            Json(json!({ "devices": items, "total": 7, "page": page, "per_page": 5, "pages": 2 }))
        }),
    )
}

fn signed_in(base_url: &str, role: &str) -> App {
    let mut app = App::new_for_test(base_url);
    app.start_session(session(role));
    app
}

/// 장치 화면으로 이동 후 첫 페이지 조회
async fn open_devices(app: &mut App) {
    app.select_route(2);
    assert_eq!(app.current_route(), Route::Devices);
    assert_eq!(app.pending_task(), Some(Task::LoadRoute));
    app.run_pending_task().await;
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_login_key(KeyModifiers::NONE, KeyCode::Char(c));
    }
}

// === 인증 게이트 ===

#[tokio::test]
async fn test_without_session_gate_goes_to_login() {
    let mut app = App::new_for_test(&closed_base_url().await);
    assert!(app.gate.is_checking());
    assert!(!app.gate.allows_children());
    assert_eq!(app.pending_task(), Some(Task::ResolveSession));

    app.run_pending_task().await;

    assert!(app.gate.needs_login());
    assert!(!app.gate.allows_children());
    // 보호된 화면 조회는 예약되지 않는다
    assert_eq!(app.pending_task(), None);
}

#[tokio::test]
async fn test_restored_admin_session_loads_dashboard() {
    let seen_auth: Arc<Mutex<Option<String>>> = Arc::default();
    let recorder = seen_auth.clone();
    let base_url = spawn(Router::new().route(
        "/api/users/dashboard/stats",
        get(move |headers: HeaderMap| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({
                    "stats": { "total_users": 3, "active_devices": 2 },
                    "recent_activity": { "users": [{}, {}], "devices": [] }
                }))
            }
        }),
    ))
    .await;

    let mut ctx = UiContext::for_test();
    ctx.prefs.set("access_token", "token-1");
    ctx.prefs.set("user", &user_json("admin"));
    let config = Config {
        api_base_url: base_url,
        ..Config::default()
    };
    let mut app = App::new(config, ctx).unwrap();
    assert!(app.gate.is_checking());

    app.run_pending_task().await;
    assert!(app.gate.allows_children());
    assert_eq!(app.current_route(), Route::Dashboard);
    assert!(app.pages.stats.is_loading());

    app.run_pending_task().await;
    let stats = app.pages.stats.loaded().unwrap();
    assert_eq!(stats.rows().len(), 2);
    assert_eq!(seen_auth.lock().unwrap().as_deref(), Some("Bearer token-1"));

    // 결정된 게이트는 다시 Checking으로 돌아가지 않는다
    app.resolve_session();
    assert!(app.gate.allows_children());
}

#[tokio::test]
async fn test_client_session_enters_client_area() {
    let mut app = signed_in(&closed_base_url().await, "client");

    assert_eq!(app.area(), GuardedArea::Client);
    assert_eq!(app.current_route(), Route::Overview);
    // 시작할 때 예약된 세션 확인은 다시 마운트하면서 사라진다
    // 프로필 화면은 조회가 필요 없다
    assert_eq!(app.pending_task(), None);

    app.select_route(1);
    assert_eq!(app.current_route(), Route::Files);
    assert_eq!(app.pending_task(), Some(Task::LoadRoute));
}

// === 로그인 ===

#[tokio::test]
async fn test_login_requires_both_fields() {
    let mut app = App::new_for_test(&closed_base_url().await);
    app.run_pending_task().await;

    app.handle_login_key(KeyModifiers::NONE, KeyCode::Enter);
    assert_eq!(
        app.login.error.as_deref(),
        Some("Email and password are required")
    );
    assert_eq!(app.pending_task(), None);
}

#[tokio::test]
async fn test_login_failure_keeps_email_and_shows_backend_message() {
    let base_url = spawn(Router::new().route(
        "/api/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid email or password" })),
            )
        }),
    ))
    .await;
    let mut app = App::new_for_test(&base_url);
    app.run_pending_task().await;

    type_text(&mut app, "alice@example.com");
    app.handle_login_key(KeyModifiers::NONE, KeyCode::Tab);
    assert_eq!(app.login.focus, LoginField::Password);
    type_text(&mut app, "wrong");
    app.handle_login_key(KeyModifiers::NONE, KeyCode::Enter);
    assert!(app.login.busy);

    app.run_pending_task().await;

    assert!(!app.login.busy);
    assert_eq!(app.login.error.as_deref(), Some("Invalid email or password"));
    assert_eq!(app.login.email.value(), "alice@example.com");
    assert_eq!(app.login.password.value(), "");
    assert!(app.session.is_none());
    assert!(app.gate.needs_login());
}

#[tokio::test]
async fn test_login_success_stores_session_and_enters_area() {
    let base_url = spawn(Router::new().route(
        "/api/auth/login",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["email"], "alice@example.com");
            Json(json!({
                "access_token": "token-9",
                "refresh_token": "refresh-9",
                "user": user_json("client")
            }))
        }),
    ))
    .await;
    let mut app = App::new_for_test(&base_url);
    app.run_pending_task().await;

    type_text(&mut app, "  alice@example.com");
    app.handle_login_key(KeyModifiers::NONE, KeyCode::Tab);
    type_text(&mut app, "secret");
    app.handle_login_key(KeyModifiers::NONE, KeyCode::Enter);
    app.run_pending_task().await;

    assert!(app.gate.allows_children());
    assert_eq!(app.area(), GuardedArea::Client);
    assert!(app.api.has_access_token());
    assert_eq!(
        app.ctx.prefs.get::<Option<String>>("access_token", None).as_deref(),
        Some("token-9")
    );
    assert_eq!(app.login.email.value(), "");
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some("Welcome back, alice")
    );
}

#[tokio::test]
async fn test_password_reset_needs_email() {
    let mut app = App::new_for_test(&closed_base_url().await);
    app.run_pending_task().await;

    app.handle_login_key(KeyModifiers::CONTROL, KeyCode::Char('p'));
    assert_eq!(app.login.error.as_deref(), Some("Enter your email first"));
    assert_eq!(app.pending_task(), None);
}

#[tokio::test]
async fn test_password_reset_request() {
    let base_url = spawn(Router::new().route(
        "/api/auth/reset-password-request",
        post(|| async { Json(json!({ "message": "sent" })) }),
    ))
    .await;
    let mut app = App::new_for_test(&base_url);
    app.run_pending_task().await;

    type_text(&mut app, "alice@example.com");
    app.handle_login_key(KeyModifiers::CONTROL, KeyCode::Char('p'));
    assert_eq!(app.pending_task(), Some(Task::PasswordReset));
    app.run_pending_task().await;

    assert!(!app.login.busy);
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some("Password reset requested for alice@example.com")
    );
}

// === 로그아웃/토큰 갱신 ===

#[tokio::test]
async fn test_logout_clears_session_even_when_server_unreachable() {
    let mut app = signed_in(&closed_base_url().await, "admin");
    Session::store(
        &mut app.ctx.prefs,
        serde_json::from_value(json!({
            "access_token": "token-1",
            "user": user_json("admin")
        }))
        .unwrap(),
    );

    app.execute_action(Action::Logout).await;

    assert!(app.session.is_none());
    assert!(!app.api.has_access_token());
    assert!(!app.ctx.prefs.contains("access_token"));
    assert!(!app.ctx.prefs.contains("user"));
    assert!(app.gate.needs_login());
    assert_eq!(app.toast_display().map(|(m, _)| m), Some("Logged out"));
}

#[tokio::test]
async fn test_refresh_session_replaces_access_token() {
    let base_url = spawn(Router::new().route(
        "/api/auth/refresh",
        post(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert_eq!(auth, "Bearer refresh-1");
            Json(json!({ "access_token": "token-2" }))
        }),
    ))
    .await;
    let mut app = signed_in(&base_url, "admin");

    app.execute_action(Action::RefreshSession).await;

    assert_eq!(
        app.session.as_ref().map(|s| s.access_token.as_str()),
        Some("token-2")
    );
    assert_eq!(
        app.ctx.prefs.get::<Option<String>>("access_token", None).as_deref(),
        Some("token-2")
    );
    assert_eq!(app.toast_display().map(|(m, _)| m), Some("Session refreshed"));
}

// === 목록 화면 ===

#[tokio::test]
async fn test_device_page_loads_and_pages() {
    let base_url = spawn(device_list_router()).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    assert_eq!(app.pages.devices.items().len(), 5);
    assert_eq!(
        app.pages.devices.page_info(app.ctx.i18n),
        "Page 1/2 · 7 total"
    );

    app.execute_action(Action::MoveDown).await;
    app.execute_action(Action::MoveDown).await;
    assert_eq!(app.pages.devices.selected(), 2);

    app.execute_action(Action::NextPage).await;
    assert!(app.pages.devices.state().is_loading());
    app.run_pending_task().await;
    assert_eq!(app.pages.devices.page(), 2);
    assert_eq!(app.pages.devices.items().len(), 2);
    assert_eq!(app.pages.devices.selected(), 0);

    // 마지막 페이지에서는 더 넘어가지 않는다
    app.execute_action(Action::NextPage).await;
    assert_eq!(app.pending_task(), None);
}

#[tokio::test]
async fn test_failed_list_shows_error_not_empty_state() {
    let base_url = spawn(Router::new().route(
        "/api/devices",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database unavailable" })),
            )
        }),
    ))
    .await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    assert!(matches!(
        app.pages.devices.view(),
        TableView::Failed("Database unavailable")
    ));

    // 선택할 레코드가 없으면 삭제 확인도 없다
    app.execute_action(Action::DeleteSelected).await;
    assert!(app.dialog.is_none());
    assert_eq!(app.toast_display().map(|(m, _)| m), Some("Nothing selected"));
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let deleted: Arc<Mutex<Vec<String>>> = Arc::default();
    let recorder = deleted.clone();
    let router = device_list_router().route(
        "/api/devices/:id",
        axum::routing::delete(move |Path(id): Path<String>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(id);
                Json(json!({ "message": "Device deleted successfully" }))
            }
        }),
    );
    let base_url = spawn(router).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    // 기본 선택은 취소
    app.execute_action(Action::DeleteSelected).await;
    assert!(app.is_dialog_active());
    app.handle_dialog_key(KeyCode::Enter).await;
    assert!(!app.is_dialog_active());
    assert!(app.pending_confirm.is_none());
    assert!(deleted.lock().unwrap().is_empty());

    // 버튼을 옮겨서 확인
    app.execute_action(Action::DeleteSelected).await;
    app.handle_dialog_key(KeyCode::Left).await;
    app.handle_dialog_key(KeyCode::Enter).await;

    assert_eq!(deleted.lock().unwrap().as_slice(), ["a".to_string()]);
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some("Deleted Scanner A")
    );
    assert_eq!(app.pending_task(), Some(Task::LoadRoute));
}

#[tokio::test]
async fn test_delete_failure_opens_message_dialog() {
    let router = device_list_router().route(
        "/api/devices/:id",
        axum::routing::delete(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Device not found" })),
            )
        }),
    );
    let base_url = spawn(router).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    app.execute_action(Action::DeleteSelected).await;
    app.handle_dialog_key(KeyCode::Char('y')).await;

    match &app.dialog {
        Some(DialogKind::Message { title, message }) => {
            assert_eq!(title, "Delete failed");
            assert_eq!(message, "Device not found");
        }
        other => panic!("unexpected dialog: {:?}", other),
    }
    app.handle_dialog_key(KeyCode::Esc).await;
    assert!(app.dialog.is_none());
}

#[tokio::test]
async fn test_deleting_last_row_on_last_page_steps_back() {
    let deleted = Arc::new(Mutex::new(false));
    let listed = deleted.clone();
    let remover = deleted.clone();
    let router = Router::new()
        .route(
            "/api/devices",
            get(move |Query(query): Query<HashMap<String, String>>| {
                let deleted = *listed.lock().unwrap();
                async move {
                    let page: u32 = query
                        .get("page")
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(1);
                    let pages = if deleted { 1 } else { 2 };
                    let items: Vec<Value> = match page {
                        1 => ["a", "b", "c", "d", "e"]
                            .iter()
                            .map(|id| device_json(id, &format!("Scanner {}", id.to_uppercase())))
                            .collect(),
                        _ if deleted => Vec::new(),
                        _ => vec![device_json("f", "Scanner F")],
                    };
                    let total = if deleted { 5 } else { 6 };
                    Json(json!({
                        "devices": items, "total": total, "page": page, "per_page": 5, "pages": pages
                    }))
                }
            }),
        )
        .route(
            "/api/devices/:id",
            axum::routing::delete(move || {
                *remover.lock().unwrap() = true;
                async { Json(json!({ "message": "Device deleted successfully" })) }
            }),
        );
    let base_url = spawn(router).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    app.execute_action(Action::NextPage).await;
    app.run_pending_task().await;
    assert_eq!(app.pages.devices.page(), 2);
    assert_eq!(app.pages.devices.items().len(), 1);

    app.execute_action(Action::DeleteSelected).await;
    app.handle_dialog_key(KeyCode::Char('y')).await;
    app.run_pending_task().await;

    // 빈 2페이지 대신 새 마지막 페이지
    assert_eq!(app.pages.devices.page(), 1);
    assert_eq!(app.pages.devices.items().len(), 5);
    assert_eq!(app.pages.devices.page_info(app.ctx.i18n), "Page 1/1 · 5 total");
}

#[tokio::test]
async fn test_toggle_status_sends_only_status() {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::default();
    let recorder = bodies.clone();
    let router = device_list_router().route(
        "/api/devices/:id",
        put(move |Path(id): Path<String>, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(json!({ "device": device_json(&id, "Scanner A") }))
            }
        }),
    );
    let base_url = spawn(router).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    app.execute_action(Action::ToggleStatus).await;

    assert_eq!(
        bodies.lock().unwrap().as_slice(),
        [json!({ "status": "inactive" })]
    );
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some("Scanner A is now inactive")
    );
    assert_eq!(app.pending_task(), Some(Task::LoadRoute));
}

// === 로그 ===

fn log_router(cleared: Arc<Mutex<Option<Value>>>) -> Router {
    Router::new()
        .route(
            "/api/logs/",
            get(|| async {
                Json(json!({
                    "logs": [
                        { "_id": "l1", "log_type": "auth", "message": "Login failed", "status": "error" },
                        { "_id": "l2", "log_type": "device", "message": "Device added", "status": "info" }
                    ],
                    "total": 2, "page": 1, "per_page": 5, "pages": 1
                }))
            }),
        )
        .route(
            "/api/logs/stats",
            get(|| async {
                Json(json!({
                    "log_types": [{ "_id": "auth", "count": 1 }, { "_id": "device", "count": 1 }],
                    "statuses": [{ "_id": "error", "count": 1 }, { "_id": "info", "count": 1 }],
                    "recent_errors": [],
                    "total_logs": 2
                }))
            }),
        )
        .route(
            "/api/logs/clear",
            post(move |Json(body): Json<Value>| {
                *cleared.lock().unwrap() = Some(body);
                async { Json(json!({ "message": "Logs cleared", "deleted_count": 4 })) }
            }),
        )
}

#[tokio::test]
async fn test_logs_route_loads_entries_and_stats() {
    let base_url = spawn(log_router(Arc::default())).await;
    let mut app = signed_in(&base_url, "admin");

    app.select_route(4);
    assert_eq!(app.current_route(), Route::Logs);
    assert!(app.pages.log_stats.is_loading());
    app.run_pending_task().await;

    let messages: Vec<&str> = app
        .pages
        .logs
        .items()
        .iter()
        .map(|log| log.message.as_str())
        .collect();
    assert_eq!(messages, ["Login failed", "Device added"]);
    let stats = app.pages.log_stats.loaded().unwrap();
    assert_eq!(stats.total_logs, 2);
    assert_eq!(stats.status_summary(), "error 1 · info 1");
}

#[tokio::test]
async fn test_clear_logs_confirms_then_posts_retention() {
    let cleared: Arc<Mutex<Option<Value>>> = Arc::default();
    let base_url = spawn(log_router(cleared.clone())).await;
    let mut app = signed_in(&base_url, "admin");
    app.config.log_retention_days = 14;

    // 로그 화면 밖에서는 아무 일도 없다
    app.execute_action(Action::ClearLogs).await;
    assert!(app.dialog.is_none());

    app.select_route(4);
    app.run_pending_task().await;

    app.execute_action(Action::ClearLogs).await;
    assert!(app.is_dialog_active());
    app.handle_dialog_key(KeyCode::Esc).await;
    assert!(app.pending_confirm.is_none());
    assert!(cleared.lock().unwrap().is_none());

    app.execute_action(Action::ClearLogs).await;
    assert_eq!(
        app.pending_confirm,
        Some(PendingConfirm::ClearLogs { days_to_keep: 14 })
    );
    app.handle_dialog_key(KeyCode::Char('y')).await;

    assert_eq!(
        cleared.lock().unwrap().clone(),
        Some(json!({ "days_to_keep": 14 }))
    );
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some("Removed 4 old log entries")
    );
    assert_eq!(app.pending_task(), Some(Task::LoadRoute));
}

#[tokio::test]
async fn test_clear_logs_failure_opens_message_dialog() {
    let base_url = spawn(Router::new().route(
        "/api/logs/clear",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Admin access required" })),
            )
        }),
    ))
    .await;
    let mut app = signed_in(&base_url, "admin");
    app.select_route(4);

    app.execute_action(Action::ClearLogs).await;
    app.handle_dialog_key(KeyCode::Char('y')).await;

    match &app.dialog {
        Some(DialogKind::Message { title, message }) => {
            assert_eq!(title, "Clearing logs failed");
            assert_eq!(message, "Admin access required");
        }
        other => panic!("unexpected dialog: {:?}", other),
    }
}

// === 셸 ===

#[tokio::test]
async fn test_route_keys() {
    let mut app = signed_in(&closed_base_url().await, "admin");

    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Char('4')).await;
    assert_eq!(app.current_route(), Route::Partitions);

    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Tab).await;
    assert_eq!(app.current_route(), Route::Logs);
    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Tab).await;
    assert_eq!(app.current_route(), Route::Settings);
    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Tab).await;
    assert_eq!(app.current_route(), Route::Dashboard);
    app.handle_normal_key(KeyModifiers::SHIFT, KeyCode::BackTab).await;
    assert_eq!(app.current_route(), Route::Settings);

    // 영역 밖 번호는 무시
    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Char('9')).await;
    assert_eq!(app.current_route(), Route::Settings);
}

#[tokio::test]
async fn test_gg_sequence_goes_to_top() {
    let base_url = spawn(device_list_router()).await;
    let mut app = signed_in(&base_url, "admin");
    open_devices(&mut app).await;

    app.handle_normal_key(KeyModifiers::SHIFT, KeyCode::Char('G')).await;
    assert_eq!(app.pages.devices.selected(), 4);

    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Char('g')).await;
    assert_eq!(app.pending_key_display().as_deref(), Some("g_"));
    app.handle_normal_key(KeyModifiers::NONE, KeyCode::Char('g')).await;
    assert_eq!(app.pages.devices.selected(), 0);
    assert!(app.pending_key.is_none());
}

#[tokio::test]
async fn test_sidebar_state_is_persisted_per_area() {
    let mut app = signed_in(&closed_base_url().await, "admin");
    assert!(!app.layout.sidebar_collapsed());

    app.execute_action(Action::ToggleSidebar).await;

    assert!(app.layout.sidebar_collapsed());
    assert!(app.ctx.prefs.get("dashboard-sidebar-collapsed", false));
    assert!(!app.ctx.prefs.contains("client-sidebar-collapsed"));

    // 같은 영역에 다시 들어가면 저장된 상태로 시작
    app.start_session(session("admin"));
    assert!(app.layout.sidebar_collapsed());
    app.start_session(session("client"));
    assert!(!app.layout.sidebar_collapsed());
}

#[tokio::test]
async fn test_theme_and_language_toggles_persist() {
    let mut app = signed_in(&closed_base_url().await, "admin");

    app.execute_action(Action::ToggleTheme).await;
    assert_eq!(app.ctx.theme.mode(), ThemeMode::Light);
    assert_eq!(
        app.ctx.prefs.get("theme", ThemeMode::Dark),
        ThemeMode::Light
    );
    assert_eq!(app.toast_display().map(|(m, _)| m), Some("Theme: Light"));

    app.execute_action(Action::CycleLanguage).await;
    assert_eq!(app.ctx.tr("nav.devices"), "Appareils");
    assert_eq!(
        app.ctx.prefs.get::<Option<String>>("language", None).as_deref(),
        Some("fr")
    );
    assert_eq!(app.toast_display().map(|(m, _)| m), Some("Langue : Français"));
}

#[tokio::test]
async fn test_quit_action() {
    let mut app = App::new_for_test(&closed_base_url().await);
    assert!(!app.should_quit());
    app.execute_action(Action::Quit).await;
    assert!(app.should_quit());
}
