/*
[INPUT]:  HTTP configuration (environment or base URL, timeouts, credentials)
[OUTPUT]: B2BinPay client owning one transport and one session
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::auth::{Credentials, SessionManager};
use crate::types::Environment;

use super::error::Result;
use super::transport::HttpTransport;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Overrides the environment's base URL when set
    pub api_url: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            api_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Default configuration against the sandbox gateway
    pub fn sandbox() -> Self {
        Self {
            environment: Environment::Sandbox,
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Effective base URL
    pub fn base_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

/// Main HTTP client for the B2BinPay API.
///
/// Cloning is cheap; clones share the same session.
#[derive(Debug, Clone)]
pub struct B2BinPayClient {
    pub(crate) transport: HttpTransport,
    pub(crate) session: Arc<SessionManager>,
}

impl B2BinPayClient {
    /// Create a client without stored credentials; call [`B2BinPayClient::connect`]
    /// or restore a snapshot before dispatching.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Create a client that authenticates on demand with `key`/`secret`
    pub fn with_credentials(
        config: ClientConfig,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials::new(key, secret)?;
        Self::build(config, Some(credentials))
    }

    fn build(config: ClientConfig, credentials: Option<Credentials>) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let session = SessionManager::new(transport.clone(), credentials);
        Ok(Self {
            transport,
            session: Arc::new(session),
        })
    }

    /// Session lifecycle manager owned by this client
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Log in with an explicit key/secret pair.
    ///
    /// `Ok(false)` means the gateway answered but its signature did not verify.
    pub async fn connect(&self, key: &str, secret: &str) -> Result<bool> {
        self.session.connect(key, secret).await
    }
}
