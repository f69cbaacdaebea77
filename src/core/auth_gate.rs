//! 인증 게이트
//!
//! 보호 영역이 마운트되면 `Checking`에서 시작해 세션 확인 후
//! `Authenticated` 또는 `Unauthenticated`로 한 번만 전이한다.
//! 종료 상태에서 다시 `Checking`으로 돌아가지 않으며, 새로 마운트해야 한다.

use super::session::Session;
use crate::models::{User, UserRole};

/// 보호 영역
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedArea {
    /// 관리자 대시보드 (admin 역할만)
    Admin,
    /// 클라이언트 영역 (로그인한 모든 사용자)
    Client,
}

impl GuardedArea {
    pub fn admits(self, role: UserRole) -> bool {
        match self {
            GuardedArea::Admin => role == UserRole::Admin,
            GuardedArea::Client => true,
        }
    }

    /// 역할에 맞는 기본 영역 (모르는 역할은 클라이언트 영역)
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin => GuardedArea::Admin,
            UserRole::Client | UserRole::Unknown => GuardedArea::Client,
        }
    }

    /// 사이드바 접힘 상태 저장 키
    pub fn sidebar_pref_key(self) -> &'static str {
        match self {
            GuardedArea::Admin => "dashboard-sidebar-collapsed",
            GuardedArea::Client => "client-sidebar-collapsed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Checking,
    Authenticated(User),
    Unauthenticated,
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    area: GuardedArea,
    state: AuthState,
}

impl AuthGate {
    pub fn mount(area: GuardedArea) -> Self {
        Self {
            area,
            state: AuthState::Checking,
        }
    }

    /// 세션 확인 (이미 결정된 상태면 그대로)
    pub fn resolve(&mut self, session: Option<&Session>) -> &AuthState {
        if self.state == AuthState::Checking {
            self.state = match session {
                Some(session) if self.area.admits(session.role()) => {
                    AuthState::Authenticated(session.user.clone())
                }
                _ => AuthState::Unauthenticated,
            };
        }
        &self.state
    }

    pub fn area(&self) -> GuardedArea {
        self.area
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_checking(&self) -> bool {
        self.state == AuthState::Checking
    }

    /// 보호된 하위 화면을 그려도 되는지
    pub fn allows_children(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    /// 로그인 화면으로 보내야 하는지
    pub fn needs_login(&self) -> bool {
        self.state == AuthState::Unauthenticated
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
