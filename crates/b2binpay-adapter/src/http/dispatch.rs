/*
[INPUT]:  Method, path, optional JSON:API body
[OUTPUT]: Decoded response body or a typed error
[POS]:    HTTP layer - single choke point for authenticated calls
[UPDATE]: When preflight, header or error surfacing rules change
*/

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::client::B2BinPayClient;
use super::error::{B2BinPayError, Result};
use super::transport::HttpTransport;

impl B2BinPayClient {
    /// Send an authenticated request.
    ///
    /// Runs the session preflight first; if it fails the request is not sent.
    /// Every transport, upstream and decode failure is returned to the caller.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.dispatch_with_query(method, path, &[], body).await
    }

    pub(crate) async fn dispatch_with_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.session.ensure_fresh().await?;

        let token = self
            .session
            .access_token()
            .ok_or_else(|| B2BinPayError::session_expired("no access token after preflight"))?;

        debug!(%method, path, "dispatching request");
        let mut builder = self.transport.request(method.clone(), path)?.bearer_auth(token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = &body {
            builder = HttpTransport::with_body(builder, body)?;
        }

        match self.transport.send_json(builder).await {
            Ok(response) => Ok(response),
            Err(err) => {
                if err.status() == Some(StatusCode::UNAUTHORIZED.as_u16()) {
                    self.session.invalidate();
                }
                warn!(%method, path, error = %err, "request failed");
                Err(err)
            }
        }
    }
}
