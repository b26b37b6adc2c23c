/*
[INPUT]:  Stored credentials, HTTP transport and session state
[OUTPUT]: A usable bearer token, or a typed auth error
[POS]:    Auth layer - orchestrates connect, refresh and preflight checks
[UPDATE]: When auth endpoints, signature rules or flow steps change
*/

use std::future::Future;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::http::{B2BinPayError, HttpTransport, Result};
use crate::types::{
    AUTH_TOKEN_TYPE, LoginAttributes, LoginRequest, RefreshAttributes, RefreshRequest,
    TokenAttributes, TokenResponse,
};

use super::credentials::Credentials;
use super::session::{SessionState, SessionStatus, SessionStore};
use super::signature::verify_signature;
use super::snapshot::SessionSnapshot;

pub const TOKEN_ENDPOINT: &str = "/token/";
pub const REFRESH_ENDPOINT: &str = "/token/refresh/";

/// Outcome of the most recent connect/refresh attempt
#[derive(Debug, Default)]
struct AttemptLog {
    last_failure: Option<String>,
}

/// Owns the session of one client and keeps it authenticated.
///
/// Connect and refresh attempts made on behalf of concurrent callers are
/// single-flight: a caller that finds an attempt in progress waits for it and
/// adopts its outcome instead of sending a second token request.
#[derive(Debug)]
pub struct SessionManager {
    transport: HttpTransport,
    credentials: OnceLock<Credentials>,
    session: SessionStore,
    gate: Mutex<AttemptLog>,
    generation: AtomicU64,
}

impl SessionManager {
    pub fn new(transport: HttpTransport, credentials: Option<Credentials>) -> Self {
        let stored = OnceLock::new();
        if let Some(credentials) = credentials {
            let _ = stored.set(credentials);
        }

        Self {
            transport,
            credentials: stored,
            session: SessionStore::new(),
            gate: Mutex::new(AttemptLog::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Copy of the current session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn status(&self) -> SessionStatus {
        self.session.state().status(Utc::now())
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Bearer token for the next outbound request
    pub fn access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.get().is_some()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.snapshot()
    }

    /// Resume from a snapshot. Returns whether the session is immediately usable.
    pub fn restore(&self, snapshot: &SessionSnapshot) -> bool {
        let connected = self.session.restore(snapshot, Utc::now());
        debug!(connected, "session restored from snapshot");
        connected
    }

    /// Mark the session disconnected so the next preflight re-authenticates
    pub fn invalidate(&self) {
        self.session.invalidate();
    }

    /// Log in with an explicit key/secret pair.
    ///
    /// Returns `Ok(false)` when the gateway answered but the response signature
    /// did not verify; transport and HTTP failures are returned as errors. The
    /// first pair that logs in successfully is kept for later re-authentication
    /// when the client was built without credentials.
    pub async fn connect(&self, key: &str, secret: &str) -> Result<bool> {
        let credentials = Credentials::new(key, secret)?;

        let mut log = self.gate.lock().await;
        let outcome = self.login(&credentials).await;
        let failure = match &outcome {
            Ok(true) => None,
            Ok(false) => Some(B2BinPayError::SignatureMismatch.to_string()),
            Err(err) => Some(err.to_string()),
        };
        self.finish_attempt(&mut log, failure);

        if let Ok(true) = outcome {
            let _ = self.credentials.set(credentials);
        }
        outcome
    }

    /// Connect with the stored credentials unless already connected
    pub async fn ensure_connected(&self) -> Result<()> {
        if self.session.is_connected() {
            return Ok(());
        }

        self.single_flight(|state| state.connected, || self.reconnect())
            .await
    }

    /// Renew the access token, falling back to a full login when the refresh
    /// token is missing or expired. Failures leave the session disconnected.
    pub async fn refresh(&self) -> Result<()> {
        self.single_flight(|_| false, || self.refresh_tokens()).await
    }

    /// Preflight gate run before every dispatched request
    pub async fn ensure_fresh(&self) -> Result<()> {
        if self.session.state().is_usable(Utc::now()) {
            return Ok(());
        }

        let outcome = self
            .single_flight(
                |state| state.is_usable(Utc::now()),
                || self.refresh_tokens(),
            )
            .await;

        match outcome {
            Ok(()) => Ok(()),
            Err(
                err @ (B2BinPayError::NoCredentials
                | B2BinPayError::InvalidCredentials
                | B2BinPayError::SignatureMismatch
                | B2BinPayError::SessionExpired { .. }),
            ) => Err(err),
            Err(err) => {
                warn!(error = %err, "session refresh failed");
                Err(B2BinPayError::session_expired(err.to_string()))
            }
        }
    }

    /// Run `attempt` unless the session already satisfies `ready`, or another
    /// caller completed an attempt while this one waited for the gate.
    async fn single_flight<R, F, Fut>(&self, ready: R, attempt: F) -> Result<()>
    where
        R: Fn(&SessionState) -> bool,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let observed = self.generation.load(Ordering::Acquire);
        let mut log = self.gate.lock().await;

        if self.generation.load(Ordering::Acquire) != observed {
            let state = self.session.state();
            debug!("adopting outcome of concurrent auth attempt");
            return if state.is_usable(Utc::now()) {
                Ok(())
            } else {
                Err(B2BinPayError::session_expired(
                    log.last_failure
                        .clone()
                        .unwrap_or_else(|| "concurrent auth attempt failed".to_string()),
                ))
            };
        }

        if ready(&self.session.state()) {
            return Ok(());
        }

        let outcome = attempt().await;
        let failure = outcome.as_ref().err().map(ToString::to_string);
        self.finish_attempt(&mut log, failure);
        outcome
    }

    fn finish_attempt(&self, log: &mut AttemptLog, failure: Option<String>) {
        log.last_failure = failure;
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Full login with the stored credentials
    async fn reconnect(&self) -> Result<()> {
        let Some(credentials) = self.credentials.get() else {
            self.session.invalidate();
            return Err(B2BinPayError::NoCredentials);
        };

        if self.login(credentials).await? {
            Ok(())
        } else {
            Err(B2BinPayError::SignatureMismatch)
        }
    }

    async fn refresh_tokens(&self) -> Result<()> {
        let state = self.session.state();
        let refresh_token = match state.refresh_token {
            Some(token) if state.can_refresh(Utc::now()) => token,
            _ => {
                debug!("refresh token missing or expired, logging in again");
                return self.reconnect().await;
            }
        };

        debug!("refreshing access token");
        let body = RefreshRequest::new(
            AUTH_TOKEN_TYPE,
            RefreshAttributes {
                refresh: refresh_token,
            },
        );

        let response = match self.request_tokens(REFRESH_ENDPOINT, &body).await {
            Ok(response) => response,
            Err(err) => {
                self.session.invalidate();
                warn!(error = %err, "token refresh request failed");
                return Err(err);
            }
        };

        self.store_tokens(&response.data.attributes)?;
        info!(
            access_expires_at = %response.data.attributes.access_expired_at,
            "access token refreshed"
        );
        Ok(())
    }

    /// `POST /token/` and verify the signed response.
    ///
    /// `Ok(false)` = trust failure: session cleared, nothing retained.
    async fn login(&self, credentials: &Credentials) -> Result<bool> {
        info!(key = credentials.key(), "requesting access token");
        let body = LoginRequest::new(
            AUTH_TOKEN_TYPE,
            LoginAttributes {
                login: credentials.key().to_string(),
                password: credentials.secret().to_string(),
            },
        );

        let response = match self.request_tokens(TOKEN_ENDPOINT, &body).await {
            Ok(response) => response,
            Err(err) => {
                self.session.invalidate();
                warn!(error = %err, "login request failed");
                return Err(err);
            }
        };

        let tokens = &response.data.attributes;
        let verified = response.meta.as_ref().is_some_and(|meta| {
            verify_signature(
                &meta.time,
                &tokens.refresh,
                &meta.sign,
                credentials.key(),
                credentials.secret(),
            )
        });

        if !verified {
            self.session.clear();
            warn!(
                signed = response.meta.is_some(),
                "login response failed signature verification"
            );
            return Ok(false);
        }

        self.store_tokens(tokens)?;
        info!(
            access_expires_at = %tokens.access_expired_at,
            refresh_expires_at = %tokens.refresh_expired_at,
            two_factor = tokens.is_2fa_confirmed,
            "session established"
        );
        Ok(true)
    }

    async fn request_tokens<B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<TokenResponse> {
        let builder = self.transport.request(Method::POST, endpoint)?;
        let builder = HttpTransport::with_body(builder, body)?;
        self.transport.send_json(builder).await
    }

    fn store_tokens(&self, tokens: &TokenAttributes) -> Result<()> {
        if self.session.establish(tokens, Utc::now()) {
            Ok(())
        } else {
            warn!(
                access_expires_at = %tokens.access_expired_at,
                refresh_expires_at = %tokens.refresh_expired_at,
                "gateway issued tokens that are already expired"
            );
            Err(B2BinPayError::session_expired(
                "gateway issued tokens that are already expired",
            ))
        }
    }
}
