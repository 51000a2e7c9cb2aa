use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

/// State recorded at login time
#[derive(Debug, Clone)]
pub struct SessionData {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

/// Snapshot returned by [`Session::session_info`] for display
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub username: String,
    pub login_time: DateTime<Utc>,
    /// Seconds since login
    pub session_duration: i64,
    /// Seconds until the timeout ends this session, floored at zero
    pub time_left: i64,
}

/// In-memory login session with timeout-based expiry.
///
/// `data` is `Some` exactly while a login is active, so an authenticated
/// session always carries both a username and a login timestamp. Expiry is
/// checked lazily on each query; there is no background sweep, and an
/// expired session occupies memory until the next query clears it.
pub struct Session {
    timeout: Duration,
    pub data: Option<SessionData>,
}

impl Session {
    /// Create a logged-out session with the given timeout in seconds
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::seconds(timeout_secs as i64),
            data: None,
        }
    }

    /// Establish a session for `username`, recording the current time.
    /// Logging in over a live session restarts its clock.
    pub fn login(&mut self, username: &str) {
        self.data = Some(SessionData {
            username: username.to_string(),
            login_time: Utc::now(),
        });
        info!("User {} logged in", username);
    }

    /// Clear the session. Safe to call when already logged out.
    pub fn logout(&mut self) {
        if let Some(data) = self.data.take() {
            info!("User {} logged out", data.username);
        }
    }

    /// Whether the session is live, expiring it first if the timeout has
    /// elapsed since login.
    pub fn is_authenticated(&mut self) -> bool {
        let expired = match &self.data {
            Some(data) => Utc::now() - data.login_time > self.timeout,
            None => return false,
        };

        if expired {
            info!("Session timed out");
            self.logout();
            return false;
        }
        true
    }

    /// Username of the logged-in user, if the session is still live
    pub fn current_user(&mut self) -> Option<&str> {
        if self.is_authenticated() {
            self.data.as_ref().map(|d| d.username.as_str())
        } else {
            None
        }
    }

    /// Session details for display, or `None` when logged out or expired
    pub fn session_info(&mut self) -> Option<SessionInfo> {
        if !self.is_authenticated() {
            return None;
        }

        let data = self.data.as_ref()?;
        // Clamp against clock skew; login_time must not exceed now
        let session_duration = (Utc::now() - data.login_time).num_seconds().max(0);
        let time_left = (self.timeout.num_seconds() - session_duration).max(0);

        Some(SessionInfo {
            username: data.username.clone(),
            login_time: data.login_time,
            session_duration,
            time_left,
        })
    }
}
