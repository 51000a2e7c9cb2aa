//! Application state management.
//!
//! This module contains the `App` struct that owns the configuration, the
//! admin credential, and the login session, and exposes the operations the
//! front end drives. The session is an explicit value owned here and
//! mutated through `&mut`; nothing is process-global.

use tracing::debug;

use crate::auth::{AdminCredential, Session};
use crate::config::Config;
use crate::utils::format_duration;

/// Top-level application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    LoginScreen,
    Dashboard,
    Quitting,
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    credential: AdminCredential,
    session: Session,
}

impl App {
    pub fn new(config: Config) -> Self {
        let credential = AdminCredential::from_config(&config);
        let session = Session::new(config.session_timeout);
        Self {
            config,
            state: AppState::LoginScreen,
            credential,
            session,
        }
    }

    /// Attempt a login; on success the session starts and the dashboard
    /// opens. Returns false on any failure, without distinguishing why.
    pub fn try_login(&mut self, username: &str, password: &str) -> bool {
        if !self.credential.authenticate(username, password) {
            return false;
        }

        self.session.login(username);
        self.state = AppState::Dashboard;
        true
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.state = AppState::LoginScreen;
    }

    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Re-check the session, dropping back to the login screen if it has
    /// expired out from under the dashboard.
    pub fn check_session(&mut self) -> bool {
        let live = self.session.is_authenticated();
        if !live && self.state == AppState::Dashboard {
            debug!("Dashboard session no longer valid, returning to login");
            self.state = AppState::LoginScreen;
        }
        live
    }

    pub fn session(&mut self) -> &mut Session {
        &mut self.session
    }

    /// One-line summary for the dashboard prompt, e.g. `admin (59m left)`
    pub fn status_line(&mut self) -> Option<String> {
        let info = self.session.session_info()?;
        Some(format!(
            "{} ({} left)",
            info.username,
            format_duration(info.time_left)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;

    fn test_app(password: &str) -> App {
        let config = Config {
            app_name: "Test App".to_string(),
            debug: false,
            secret_key: "unit-test-secret".to_string(),
            session_timeout: 3600,
            admin_user: "admin".to_string(),
            admin_password_hash: hash_password(password).unwrap(),
            log_level: "info".to_string(),
            log_file: "test.log".to_string(),
        };
        App::new(config)
    }

    #[test]
    fn test_try_login_success() {
        let mut app = test_app("admin123");

        assert!(app.try_login("admin", "admin123"));
        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.check_session());
        assert_eq!(app.session().current_user(), Some("admin"));
    }

    #[test]
    fn test_try_login_failure_stays_on_login_screen() {
        let mut app = test_app("admin123");

        assert!(!app.try_login("admin", "wrongpass"));
        assert!(!app.try_login("someone", "admin123"));
        assert_eq!(app.state, AppState::LoginScreen);
        assert!(!app.check_session());
    }

    #[test]
    fn test_logout_returns_to_login_screen() {
        let mut app = test_app("admin123");
        app.try_login("admin", "admin123");
        app.logout();

        assert_eq!(app.state, AppState::LoginScreen);
        assert!(app.session().session_info().is_none());
    }

    #[test]
    fn test_expired_session_drops_to_login_screen() {
        let mut app = test_app("admin123");
        app.try_login("admin", "admin123");

        let data = app.session().data.as_mut().unwrap();
        data.login_time -= chrono::Duration::seconds(4000);

        assert!(!app.check_session());
        assert_eq!(app.state, AppState::LoginScreen);
    }

    #[test]
    fn test_status_line() {
        let mut app = test_app("admin123");
        assert!(app.status_line().is_none());

        app.try_login("admin", "admin123");
        let status = app.status_line().unwrap();
        assert!(status.starts_with("admin ("));
        assert!(status.ends_with(" left)"));
    }
}
