/*
[INPUT]:  Token responses from login/refresh and restored snapshots
[OUTPUT]: Current bearer token, expiry status and connection flag
[POS]:    Auth layer - session state holder, no network or crypto
[UPDATE]: When session fields or the connected invariant change
*/

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::types::TokenAttributes;

use super::snapshot::SessionSnapshot;

/// Token material and connection flags for one client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub access_expires_at: Option<DateTime<Utc>>,
    pub refresh_expires_at: Option<DateTime<Utc>>,
    pub two_factor_confirmed: bool,
    pub connected: bool,
}

/// Coarse lifecycle position of a session at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token material, or the last attempt failed
    Unauthenticated,
    /// Access token valid
    Authenticated,
    /// Access token expired, refresh token still valid
    RefreshDue,
    /// Refresh token expired, a full login is required
    Expired,
}

impl SessionState {
    /// Connected with an access token that has not expired at `now`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.connected
            && self.access_token.is_some()
            && self.access_expires_at.is_some_and(|exp| now <= exp)
    }

    /// Refresh token present and not expired at `now`
    pub fn can_refresh(&self, now: DateTime<Utc>) -> bool {
        self.refresh_token.is_some() && self.refresh_expires_at.is_some_and(|exp| now <= exp)
    }

    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.is_usable(now) {
            SessionStatus::Authenticated
        } else if self.can_refresh(now) {
            SessionStatus::RefreshDue
        } else if self.refresh_token.is_some() {
            SessionStatus::Expired
        } else {
            SessionStatus::Unauthenticated
        }
    }
}

/// Thread-safe session state shared by the lifecycle manager
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Create an empty, disconnected session
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn state(&self) -> SessionState {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.read().connected
    }

    /// Replace all token fields from a login/refresh response.
    ///
    /// `connected` is only set when both expiries lie after `now`; otherwise
    /// the session is cleared and `false` is returned.
    pub fn establish(&self, tokens: &TokenAttributes, now: DateTime<Utc>) -> bool {
        let mut guard = self.write();
        if tokens.access_expired_at <= now || tokens.refresh_expired_at <= now {
            *guard = SessionState::default();
            return false;
        }

        *guard = SessionState {
            access_token: Some(tokens.access.clone()),
            refresh_token: Some(tokens.refresh.clone()),
            access_expires_at: Some(tokens.access_expired_at),
            refresh_expires_at: Some(tokens.refresh_expired_at),
            two_factor_confirmed: tokens.is_2fa_confirmed,
            connected: true,
        };
        true
    }

    /// Mark the session disconnected but keep the tokens for a refresh attempt
    pub fn invalidate(&self) {
        self.write().connected = false;
    }

    /// Drop every token and flag
    pub fn clear(&self) {
        *self.write() = SessionState::default();
    }

    /// Export the token material, if any
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let guard = self.read();
        Some(SessionSnapshot {
            access: guard.access_token.clone()?,
            refresh: guard.refresh_token.clone()?,
            access_expired_at: guard.access_expires_at?,
            refresh_expired_at: guard.refresh_expires_at?,
            is_2fa_confirmed: guard.two_factor_confirmed,
        })
    }

    /// Import token material; connected only if both expiries are after `now`
    pub fn restore(&self, snapshot: &SessionSnapshot, now: DateTime<Utc>) -> bool {
        let connected = snapshot.access_expired_at > now && snapshot.refresh_expired_at > now;
        *self.write() = SessionState {
            access_token: Some(snapshot.access.clone()),
            refresh_token: Some(snapshot.refresh.clone()),
            access_expires_at: Some(snapshot.access_expired_at),
            refresh_expires_at: Some(snapshot.refresh_expired_at),
            two_factor_confirmed: snapshot.is_2fa_confirmed,
            connected,
        };
        connected
    }
}
