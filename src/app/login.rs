//! 로그인/로그아웃과 세션 확인

use super::{App, Pages, Task, TextField};
use crate::api::Envelope;
use crate::core::{AuthGate, GuardedArea, Session};
use crate::ui::LoginField;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{info, warn};

/// 로그인 화면 입력 상태
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginField,
    pub error: Option<String>,
    /// 요청 진행 중
    pub busy: bool,
}

impl LoginState {
    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// 비밀번호만 지우고 이메일은 남긴다
    fn reset_password(&mut self) {
        self.password.clear();
        self.busy = false;
    }
}

impl App {
    /// 로그인 화면 키 처리
    pub fn handle_login_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        if self.login.busy {
            return;
        }
        match (modifiers, code) {
            (_, KeyCode::Esc) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                self.login.focused_field().delete_prev_word()
            }
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => self.request_password_reset_prompt(),
            (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down) => {
                self.login.focus = self.login.focus.next();
            }
            (_, KeyCode::Enter) => self.submit_login(),
            (_, KeyCode::Backspace) => self.login.focused_field().backspace(),
            (_, KeyCode::Delete) => self.login.focused_field().delete(),
            (_, KeyCode::Left) => self.login.focused_field().left(),
            (_, KeyCode::Right) => self.login.focused_field().right(),
            (_, KeyCode::Home) => self.login.focused_field().home(),
            (_, KeyCode::End) => self.login.focused_field().end(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.login.focused_field().insert_char(c)
            }
            _ => {}
        }
    }

    /// 입력 검증 후 로그인 요청 예약
    pub fn submit_login(&mut self) {
        if self.login.email.value().trim().is_empty() || self.login.password.value().is_empty() {
            self.login.error = Some(self.ctx.tr("auth.required_fields").to_string());
            return;
        }
        self.login.error = None;
        self.login.busy = true;
        self.schedule(Task::Login);
    }

    /// 이메일/비밀번호 로그인
    pub async fn login(&mut self) {
        let email = self.login.email.value().trim().to_string();
        let envelope = self
            .api
            .auth()
            .login(&email, self.login.password.value())
            .await;

        match envelope {
            Envelope::Success(response) => {
                let session = Session::store(&mut self.ctx.prefs, response);
                self.login = LoginState::default();
                self.start_session(session);
            }
            Envelope::Failure { message } => {
                self.login.reset_password();
                self.login.error = Some(message);
            }
        }
    }

    /// 세션으로 영역 진입 (게이트를 새로 마운트)
    pub(super) fn start_session(&mut self, session: Session) {
        let area = GuardedArea::for_role(session.role());
        self.api.set_access_token(Some(session.access_token.clone()));
        let name = session.user.username.clone();
        self.session = Some(session);
        self.remount(area);
        self.resolve_session();
        self.set_toast(&self.ctx.fmt("auth.welcome", &[("name", name)]));
    }

    /// 마운트된 게이트의 세션 확인
    pub fn resolve_session(&mut self) {
        let allowed = self.gate.resolve(self.session.as_ref()).clone();
        if self.gate.allows_children() {
            info!(area = ?self.gate.area(), "area entered");
            self.reload();
        } else {
            info!(state = ?allowed, "login required");
        }
    }

    /// 영역 다시 마운트 (Checking부터 시작)
    fn remount(&mut self, area: GuardedArea) {
        // 이전 마운트에서 예약된 작업은 새 게이트와 무관하다
        self.task = None;
        self.gate = AuthGate::mount(area);
        self.route_index = 0;
        self.pages = Pages::new(self.config.page_size);
        self.layout
            .set_sidebar_collapsed(self.ctx.sidebar_collapsed(area));
    }

    /// 로그아웃 (서버 실패와 관계없이 로컬 세션은 지운다)
    pub async fn logout(&mut self) {
        let envelope = self.api.auth().logout().await;
        if let Some(message) = envelope.error() {
            warn!(error = message, "logout request failed");
        }

        Session::clear(&mut self.ctx.prefs);
        self.session = None;
        self.api.set_access_token(None);
        self.login = LoginState::default();
        self.dialog = None;
        self.pending_confirm = None;

        let area = self.area();
        self.remount(area);
        self.resolve_session();
        self.set_toast(self.ctx.tr("auth.logged_out"));
    }

    /// refresh 토큰으로 access 토큰 갱신
    pub async fn refresh_session(&mut self) {
        let Some(refresh) = self
            .session
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
        else {
            self.set_error_toast(self.ctx.tr("toast.no_refresh_token"));
            return;
        };

        let envelope = self.api.auth().refresh_token(&refresh).await;
        match envelope {
            Envelope::Success(token) => {
                if let Some(session) = self.session.as_mut() {
                    session.replace_access_token(&mut self.ctx.prefs, token.clone());
                }
                self.api.set_access_token(Some(token));
                self.set_toast(self.ctx.tr("toast.session_refreshed"));
            }
            Envelope::Failure { message } => self.set_error_toast(&message),
        }
    }

    fn request_password_reset_prompt(&mut self) {
        if self.login.email.value().trim().is_empty() {
            self.login.focus = LoginField::Email;
            self.login.error = Some(self.ctx.tr("auth.email_required").to_string());
            return;
        }
        self.login.error = None;
        self.login.busy = true;
        self.schedule(Task::PasswordReset);
    }

    /// 비밀번호 재설정 메일 요청
    pub async fn request_password_reset(&mut self) {
        let email = self.login.email.value().trim().to_string();
        let envelope = self.api.auth().reset_password_request(&email).await;
        self.login.busy = false;
        match envelope.error() {
            None => self.set_toast(&self.ctx.fmt("auth.reset_sent", &[("email", email)])),
            Some(message) => self.login.error = Some(message.to_string()),
        }
    }
}
