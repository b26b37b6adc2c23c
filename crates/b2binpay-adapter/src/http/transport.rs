/*
[INPUT]:  Base URL, timeouts, request method/endpoint/body
[OUTPUT]: JSON:API requests sent over reqwest, decoded responses
[POS]:    HTTP layer - raw transport shared by auth and dispatch
[UPDATE]: When changing headers, URL joining or status mapping
*/

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::ClientConfig;
use super::error::{B2BinPayError, Result};

/// Media type of every request and response body
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Thin reqwest wrapper bound to one API base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let mut base_url = Url::parse(config.base_url())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint relative to the base URL, keeping any base path
    pub fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Request builder with the JSON:API content negotiation headers set
    pub fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE)
            .header(ACCEPT, JSON_API_MEDIA_TYPE))
    }

    /// Attach a serialized body without overriding the content type
    pub fn with_body<B: Serialize + ?Sized>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<RequestBuilder> {
        Ok(builder.body(serde_json::to_vec(body)?))
    }

    /// Send a request and decode a 2xx body; non-2xx becomes `Upstream`
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(B2BinPayError::upstream(status, body));
        }

        if body.trim().is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ClientConfig::default().with_api_url(base)).unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let transport = transport("https://example.test/api/v2");
        assert_eq!(
            transport.url("/token/").unwrap().as_str(),
            "https://example.test/api/v2/token/"
        );
        assert_eq!(
            transport.url("wallet/318/").unwrap().as_str(),
            "https://example.test/api/v2/wallet/318/"
        );
    }

    #[tokio::test]
    async fn test_send_json_sets_media_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping/"))
            .and(header("content-type", JSON_API_MEDIA_TYPE))
            .and(header("accept", JSON_API_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server.uri());
        let builder = transport.request(Method::GET, "/ping/").unwrap();
        let body: serde_json::Value = transport.send_json(builder).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_send_json_maps_non_success_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let transport = transport(&server.uri());
        let builder = transport.request(Method::GET, "/missing/").unwrap();
        let err = transport
            .send_json::<serde_json::Value>(builder)
            .await
            .unwrap_err();

        match err {
            B2BinPayError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/payout/1/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = transport(&server.uri());
        let builder = transport.request(Method::DELETE, "/payout/1/").unwrap();
        let body: Option<serde_json::Value> = transport.send_json(builder).await.unwrap();
        assert!(body.is_none());
    }
}
