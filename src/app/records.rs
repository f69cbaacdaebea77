//! 레코드 조회/삭제/상태 변경

use super::{App, LoadState, PendingConfirm, ResourcePage, StatusToggle, Task};
use crate::api::{Envelope, Resource, ResourceClient};
use crate::core::Route;
use crate::models::{Record, RecordStatus};
use crate::ui::{DialogKind, TableRow};
use crossterm::event::KeyCode;
use tracing::{info, warn};

/// 상태 토글 결과
enum StatusOutcome {
    NoSelection,
    NoStatus,
    Changed { name: String, status: RecordStatus },
    Failed(String),
}

/// 선택된 레코드의 (id, 표시 이름)
fn selected_target<R: Resource + TableRow>(page: &ResourcePage<R>) -> Option<(String, String)> {
    page.selected_record()
        .map(|record| (record.record_id().to_string(), record.display_name()))
}

async fn toggle_status<R: StatusToggle + TableRow>(
    client: ResourceClient<'_, R>,
    page: &ResourcePage<R>,
) -> StatusOutcome {
    let Some(record) = page.selected_record() else {
        return StatusOutcome::NoSelection;
    };
    let Some(current) = record.status() else {
        return StatusOutcome::NoStatus;
    };
    let status = current.toggled();
    match client
        .update(record.record_id(), &R::status_update(status))
        .await
    {
        Envelope::Success(_) => StatusOutcome::Changed {
            name: record.display_name(),
            status,
        },
        Envelope::Failure { message } => StatusOutcome::Failed(message),
    }
}

impl App {
    /// 현재 화면을 로딩 상태로 바꾸고 조회 예약
    pub fn reload(&mut self) {
        match self.current_route() {
            Route::Dashboard => self.pages.stats = LoadState::Loading,
            Route::Users => self.pages.users.mark_loading(),
            Route::Devices => self.pages.devices.mark_loading(),
            Route::Partitions => self.pages.partitions.mark_loading(),
            Route::Files => self.pages.files.mark_loading(),
            Route::Logs => {
                self.pages.logs.mark_loading();
                self.pages.log_stats = LoadState::Loading;
            }
            Route::Overview | Route::Settings => return,
        }
        self.schedule(Task::LoadRoute);
    }

    /// 현재 화면 데이터 조회 (인증 전이면 아무것도 안 함)
    pub async fn load_current_route(&mut self) {
        if !self.gate.allows_children() {
            return;
        }
        match self.current_route() {
            Route::Dashboard => {
                self.pages.stats = LoadState::Loading;
                self.pages.stats = self.api.users().dashboard_stats().await.into();
            }
            Route::Users => self.pages.users.load(self.api.users()).await,
            Route::Devices => self.pages.devices.load(self.api.devices()).await,
            Route::Partitions => self.pages.partitions.load(self.api.partitions()).await,
            Route::Files => self.pages.files.load(self.api.files()).await,
            Route::Logs => {
                self.pages.logs.load(self.api.logs()).await;
                self.pages.log_stats = self.api.logs().stats().await.into();
            }
            Route::Overview | Route::Settings => {}
        }
    }

    // === 삭제 ===

    /// 선택 레코드 삭제 확인 다이얼로그 표시
    pub fn request_delete(&mut self) {
        let route = self.current_route();
        let target = match route {
            Route::Users => selected_target(&self.pages.users),
            Route::Devices => selected_target(&self.pages.devices),
            Route::Partitions => selected_target(&self.pages.partitions),
            Route::Files => selected_target(&self.pages.files),
            _ => return,
        };
        let Some((id, name)) = target else {
            self.set_error_toast(self.ctx.tr("toast.no_selection"));
            return;
        };

        self.dialog = Some(DialogKind::confirm(
            self.ctx.tr("confirm.delete_title"),
            self.ctx.fmt("confirm.delete_body", &[("name", name.clone())]),
            self.ctx.tr("confirm.yes"),
            self.ctx.tr("confirm.no"),
        ));
        self.pending_confirm = Some(PendingConfirm::Delete { route, id, name });
    }

    /// 확인된 작업 실행
    pub async fn confirm_pending(&mut self) {
        match self.pending_confirm.take() {
            Some(PendingConfirm::Delete { route, id, name }) => {
                self.delete_record(route, id, name).await
            }
            Some(PendingConfirm::ClearLogs { days_to_keep }) => {
                self.clear_logs(days_to_keep).await
            }
            None => {}
        }
    }

    async fn delete_record(&mut self, route: Route, id: String, name: String) {
        let envelope = match route {
            Route::Users => self.api.users().delete(&id).await,
            Route::Devices => self.api.devices().delete(&id).await,
            Route::Partitions => self.api.partitions().delete(&id).await,
            Route::Files => self.api.files().delete(&id).await,
            _ => return,
        };

        match envelope {
            Envelope::Success(_) => {
                info!(?route, %id, "record deleted");
                let message = self.ctx.fmt("toast.deleted", &[("name", name)]);
                self.set_toast(&message);
                if route == self.current_route() {
                    self.reload();
                }
            }
            Envelope::Failure { message } => {
                warn!(?route, %id, error = %message, "delete failed");
                self.show_failure("dialog.delete_failed", message);
            }
        }
    }

    // === 로그 정리 ===

    /// 보존 기간을 넘긴 로그 삭제 확인 다이얼로그 표시
    pub fn request_clear_logs(&mut self) {
        if self.current_route() != Route::Logs {
            return;
        }
        let days_to_keep = self.config.log_retention_days;
        self.dialog = Some(DialogKind::confirm(
            self.ctx.tr("confirm.clear_logs_title"),
            self.ctx
                .fmt("confirm.clear_logs_body", &[("days", days_to_keep.to_string())]),
            self.ctx.tr("confirm.clear"),
            self.ctx.tr("confirm.no"),
        ));
        self.pending_confirm = Some(PendingConfirm::ClearLogs { days_to_keep });
    }

    async fn clear_logs(&mut self, days_to_keep: u32) {
        match self.api.logs().clear(days_to_keep).await {
            Envelope::Success(cleared) => {
                info!(days_to_keep, deleted = cleared.deleted_count, "logs cleared");
                let message = self
                    .ctx
                    .fmt("toast.logs_cleared", &[("count", cleared.deleted_count.to_string())]);
                self.set_toast(&message);
                if self.current_route() == Route::Logs {
                    self.reload();
                }
            }
            Envelope::Failure { message } => {
                warn!(days_to_keep, error = %message, "clearing logs failed");
                self.show_failure("dialog.clear_failed", message);
            }
        }
    }

    fn show_failure(&mut self, title_key: &str, message: String) {
        self.dialog = Some(DialogKind::Message {
            title: self.ctx.tr(title_key).to_string(),
            message,
        });
    }

    /// 다이얼로그 키 처리
    pub async fn handle_dialog_key(&mut self, code: KeyCode) {
        let is_confirm = match &self.dialog {
            Some(dialog) => matches!(dialog, DialogKind::Confirm { .. }),
            None => return,
        };
        match (is_confirm, code) {
            (true, KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h' | 'l')) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.toggle_button();
                }
            }
            (true, KeyCode::Char('y')) => {
                self.dialog = None;
                self.confirm_pending().await;
            }
            (true, KeyCode::Enter) => {
                let confirmed = self.dialog.take().is_some_and(|d| d.is_confirmed());
                if confirmed {
                    self.confirm_pending().await;
                } else {
                    self.pending_confirm = None;
                }
            }
            (true, KeyCode::Esc | KeyCode::Char('n' | 'q')) => {
                self.dialog = None;
                self.pending_confirm = None;
            }
            (false, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) => {
                self.dialog = None;
            }
            _ => {}
        }
    }

    // === 상태 토글 ===

    /// 선택 레코드의 활성/비활성 전환 (부분 수정으로 상태만 전송)
    pub async fn toggle_selected_status(&mut self) {
        let outcome = match self.current_route() {
            Route::Users => toggle_status(self.api.users(), &self.pages.users).await,
            Route::Devices => toggle_status(self.api.devices(), &self.pages.devices).await,
            Route::Partitions => {
                toggle_status(self.api.partitions(), &self.pages.partitions).await
            }
            _ => StatusOutcome::NoStatus,
        };

        match outcome {
            StatusOutcome::NoSelection => self.set_error_toast(self.ctx.tr("toast.no_selection")),
            StatusOutcome::NoStatus => self.set_error_toast(self.ctx.tr("toast.no_status")),
            StatusOutcome::Changed { name, status } => {
                let key = format!("status.{}", status.as_str());
                let label = self.ctx.tr(&key).to_string();
                let message = self
                    .ctx
                    .fmt("toast.status_changed", &[("name", name), ("status", label)]);
                self.set_toast(&message);
                self.reload();
            }
            StatusOutcome::Failed(message) => self.set_error_toast(&message),
        }
    }
}
