/*
[INPUT]:  Wallet identifiers, deposit parameters
[OUTPUT]: Wallet and deposit documents
[POS]:    HTTP layer - wallet/deposit endpoints (require bearer auth)
[UPDATE]: When adding wallet endpoints or changing response format
*/

use reqwest::Method;

use crate::http::{B2BinPayClient, Result};
use crate::types::{
    DepositDocument, DepositList, DepositRequest, NewDeposit, WalletDocument, WalletList,
};

impl B2BinPayClient {
    /// List merchant wallets
    ///
    /// GET /wallet/
    pub async fn get_wallets(&self) -> Result<WalletList> {
        self.dispatch(Method::GET, "/wallet/", None).await
    }

    /// Get a single wallet
    ///
    /// GET /wallet/{id}/
    pub async fn get_wallet(&self, wallet_id: &str) -> Result<WalletDocument> {
        let endpoint = format!("/wallet/{}/", wallet_id);
        self.dispatch(Method::GET, &endpoint, None).await
    }

    /// List deposits
    ///
    /// GET /deposit/
    pub async fn get_deposits(&self) -> Result<DepositList> {
        self.dispatch(Method::GET, "/deposit/", None).await
    }

    /// Create a deposit (payment request) on a wallet
    ///
    /// POST /deposit/
    pub async fn create_deposit(&self, deposit: NewDeposit) -> Result<DepositDocument> {
        let body = serde_json::to_value(DepositRequest::from(deposit))?;
        self.dispatch(Method::POST, "/deposit/", Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::SessionSnapshot;
    use crate::http::{B2BinPayClient, ClientConfig};
    use crate::types::{DepositRequestAttributes, NewDeposit, TransferStatus};

    async fn connected_client(server: &MockServer) -> B2BinPayClient {
        let client =
            B2BinPayClient::new(ClientConfig::default().with_api_url(server.uri())).unwrap();
        let now = Utc::now();
        client.session().restore(&SessionSnapshot {
            access: "a1".to_string(),
            refresh: "r1".to_string(),
            access_expired_at: now + Duration::seconds(60),
            refresh_expired_at: now + Duration::seconds(3600),
            is_2fa_confirmed: false,
        });
        client
    }

    #[tokio::test]
    async fn test_get_wallets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallet/"))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "type": "wallet", "id": "1", "attributes": { "balance_confirmed": "0.5" } },
                    { "type": "wallet", "id": "2", "attributes": {} }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        let wallets = client.get_wallets().await.expect("get_wallets failed");

        assert_eq!(wallets.data.len(), 2);
        assert_eq!(wallets.data[1].id, "2");
        assert_eq!(
            wallets.data[0].attributes.balance_confirmed,
            Some("0.5".parse().expect("decimal"))
        );
    }

    #[tokio::test]
    async fn test_get_wallet() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallet/318/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "type": "wallet", "id": "318", "attributes": { "status": 1 } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        let wallet = client.get_wallet("318").await.expect("get_wallet failed");
        assert_eq!(wallet.data.id, "318");
        assert_eq!(wallet.data.attributes.status, Some(1));
    }

    #[tokio::test]
    async fn test_create_deposit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/deposit/"))
            .and(header("authorization", "Bearer a1"))
            .and(body_partial_json(serde_json::json!({
                "data": {
                    "type": "deposit",
                    "attributes": { "target_amount_requested": "0.001", "label": "order 42" },
                    "relationships": {
                        "wallet": { "data": { "type": "wallet", "id": "654" } },
                        "currency": { "data": { "type": "currency", "id": "1000" } }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {
                    "type": "deposit",
                    "id": "9001",
                    "attributes": {
                        "address": "tb1qdeposit",
                        "label": "order 42",
                        "target_amount_requested": "0.001",
                        "status": 1
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server).await;
        let deposit = client
            .create_deposit(NewDeposit {
                wallet_id: "654".to_string(),
                currency_id: Some("1000".to_string()),
                attributes: DepositRequestAttributes {
                    label: Some("order 42".to_string()),
                    target_amount_requested: Some("0.001".parse().expect("decimal")),
                    ..Default::default()
                },
            })
            .await
            .expect("create_deposit failed");

        assert_eq!(deposit.data.id, "9001");
        assert_eq!(deposit.data.attributes.address.as_deref(), Some("tb1qdeposit"));
        assert_eq!(deposit.data.attributes.status, Some(TransferStatus::Waiting));
    }
}
