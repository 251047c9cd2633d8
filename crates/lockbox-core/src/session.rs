//! Authentication session state machine.
//!
//! A session is process-scoped and never persisted. It is in exactly one of
//! three states: anonymous, locked, or authenticated. Three failed login
//! attempts lock the session for sixty seconds; while locked, every login
//! attempt is rejected before any credential check runs, and entering the
//! locked state drops any authenticated identity. A lapsed lockout behaves
//! like a fresh anonymous session.
//!
//! Every time-sensitive method has an `*_at(now)` form so tests can simulate
//! the clock; the plain forms use `Utc::now()`.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, VaultError};

/// Failed login attempts tolerated before the session locks.
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// Length of the lockout window in seconds.
pub const LOCKOUT_SECONDS: i64 = 60;

/// Point-in-time view of a session, safe to hand to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No identity; login attempts are accepted
    Anonymous,

    /// Login attempts are rejected until the window lapses
    Locked {
        /// Whole seconds left in the window, truncated.
        remaining_seconds: u64,
    },

    /// Data operations run as this user
    Authenticated {
        /// The logged-in username.
        username: String,
    },
}

/// Per-session authentication state.
///
/// Create one per logical user session and pass it into each gated vault
/// operation. Sessions are never shared between identities and never
/// persisted; ending the process ends the session.
#[derive(Debug, Default)]
pub struct Session {
    authenticated_user: Option<String>,
    failed_attempts: u32,
    lockout_until: Option<DateTime<Utc>>,
}

impl Session {
    /// Fresh anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current state against the wall clock.
    pub fn status(&self) -> SessionStatus {
        self.status_at(Utc::now())
    }

    /// Snapshot the state as of `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if let Some(until) = self.lockout_until {
            if now < until {
                return SessionStatus::Locked {
                    remaining_seconds: remaining_whole_seconds(until, now),
                };
            }
        }
        match &self.authenticated_user {
            Some(username) => SessionStatus::Authenticated {
                username: username.clone(),
            },
            None => SessionStatus::Anonymous,
        }
    }

    /// The logged-in username, if any.
    pub fn authenticated_user(&self) -> Option<&str> {
        self.authenticated_user.as_deref()
    }

    /// Drop the authenticated identity, if any.
    ///
    /// The failed-attempt counter survives a logout; logging out is not a
    /// way to dodge an impending lockout.
    pub fn logout(&mut self) {
        self.authenticated_user = None;
    }

    /// Gate a login attempt: reject while locked, clear a lapsed lockout.
    ///
    /// Runs before any credential check so a locked session never reaches
    /// the store at all.
    pub(crate) fn ensure_can_attempt(&mut self, now: DateTime<Utc>) -> Result<()> {
        if let Some(until) = self.lockout_until {
            if now < until {
                return Err(VaultError::LockedOut {
                    remaining_seconds: remaining_whole_seconds(until, now),
                });
            }
            self.lockout_until = None;
        }
        Ok(())
    }

    /// Record a successful credential match.
    pub(crate) fn record_success(&mut self, username: &str) {
        self.authenticated_user = Some(username.to_string());
        self.failed_attempts = 0;
    }

    /// Record a failed credential check; hitting the threshold locks the
    /// session and resets the counter.
    pub(crate) fn record_failure(&mut self, now: DateTime<Utc>) {
        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_FAILED_ATTEMPTS {
            self.lockout_until = Some(now + Duration::seconds(LOCKOUT_SECONDS));
            self.failed_attempts = 0;
            // A locked session keeps no identity.
            self.authenticated_user = None;
        }
    }

    /// The identity data operations must run under.
    pub(crate) fn require_authenticated(&self) -> Result<&str> {
        self.authenticated_user
            .as_deref()
            .ok_or(VaultError::Unauthenticated)
    }
}

fn remaining_whole_seconds(until: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (until - now).num_seconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn seconds(n: i64) -> Duration {
        Duration::seconds(n)
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert_eq!(session.status_at(now()), SessionStatus::Anonymous);
        assert!(session.authenticated_user().is_none());
    }

    #[test]
    fn test_success_authenticates() {
        let mut session = Session::new();
        session.record_success("alice");
        assert_eq!(
            session.status_at(now()),
            SessionStatus::Authenticated {
                username: "alice".to_string()
            }
        );
        assert_eq!(session.require_authenticated().unwrap(), "alice");
    }

    #[test]
    fn test_two_failures_stay_anonymous() {
        let mut session = Session::new();
        session.record_failure(now());
        session.record_failure(now());
        assert_eq!(session.status_at(now()), SessionStatus::Anonymous);
        assert!(session.ensure_can_attempt(now()).is_ok());
    }

    #[test]
    fn test_third_failure_locks_for_sixty_seconds() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record_failure(now());
        }
        assert_eq!(
            session.status_at(now()),
            SessionStatus::Locked {
                remaining_seconds: 60
            }
        );
    }

    #[test]
    fn test_locked_session_rejects_attempts_with_remaining_seconds() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record_failure(now());
        }

        let result = session.ensure_can_attempt(now() + seconds(15));
        match result {
            Err(VaultError::LockedOut { remaining_seconds }) => {
                assert_eq!(remaining_seconds, 45);
            }
            other => panic!("expected LockedOut, got {:?}", other),
        }
    }

    #[test]
    fn test_remaining_seconds_truncate() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record_failure(now());
        }

        let status = session.status_at(now() + Duration::milliseconds(500));
        assert_eq!(
            status,
            SessionStatus::Locked {
                remaining_seconds: 59
            }
        );
    }

    #[test]
    fn test_lockout_lapses_into_anonymous() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record_failure(now());
        }

        let after = now() + seconds(LOCKOUT_SECONDS);
        assert_eq!(session.status_at(after), SessionStatus::Anonymous);
        assert!(session.ensure_can_attempt(after).is_ok());
    }

    #[test]
    fn test_lockout_resets_the_counter() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record_failure(now());
        }
        let after = now() + seconds(LOCKOUT_SECONDS + 1);
        session.ensure_can_attempt(after).unwrap();

        // A fresh threshold applies after the window lapses.
        session.record_failure(after);
        session.record_failure(after);
        assert_eq!(session.status_at(after), SessionStatus::Anonymous);
    }

    #[test]
    fn test_success_resets_the_counter() {
        let mut session = Session::new();
        session.record_failure(now());
        session.record_failure(now());
        session.record_success("alice");

        session.record_failure(now());
        session.record_failure(now());
        assert!(!matches!(
            session.status_at(now()),
            SessionStatus::Locked { .. }
        ));

        session.record_failure(now());
        assert!(matches!(
            session.status_at(now()),
            SessionStatus::Locked { .. }
        ));
    }

    #[test]
    fn test_locking_drops_identity() {
        let mut session = Session::new();
        session.record_success("alice");
        for _ in 0..3 {
            session.record_failure(now());
        }

        assert!(session.authenticated_user().is_none());
        assert!(matches!(
            session.require_authenticated(),
            Err(VaultError::Unauthenticated)
        ));
    }

    #[test]
    fn test_logout_keeps_the_counter() {
        let mut session = Session::new();
        session.record_success("alice");
        session.record_failure(now());
        session.record_failure(now());
        session.logout();

        // One more failure hits the threshold carried across the logout.
        session.record_failure(now());
        assert!(matches!(
            session.status_at(now()),
            SessionStatus::Locked { .. }
        ));
    }
}
