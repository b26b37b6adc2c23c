/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed JSON:API request documents
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Resource type of login and refresh bodies
pub const AUTH_TOKEN_TYPE: &str = "auth-token";
/// Resource type of payout bodies
pub const PAYOUT_TYPE: &str = "payout";
/// Resource type of deposit (payment request) bodies
pub const DEPOSIT_TYPE: &str = "deposit";

/// Top-level JSON:API request document: `{ "data": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDocument<A, R = ()> {
    pub data: RequestData<A, R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestData<A, R = ()> {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<R>,
}

impl<A> RequestDocument<A> {
    pub fn new(kind: &str, attributes: A) -> Self {
        Self {
            data: RequestData {
                kind: kind.to_string(),
                attributes,
                relationships: None,
            },
        }
    }
}

impl<A, R> RequestDocument<A, R> {
    pub fn with_relationships(kind: &str, attributes: A, relationships: R) -> Self {
        Self {
            data: RequestData {
                kind: kind.to_string(),
                attributes,
                relationships: Some(relationships),
            },
        }
    }
}

/// `POST /token/` attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginAttributes {
    pub login: String,
    pub password: String,
}

/// `POST /token/refresh/` attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshAttributes {
    pub refresh: String,
}

pub type LoginRequest = RequestDocument<LoginAttributes>;
pub type RefreshRequest = RequestDocument<RefreshAttributes>;

/// Reference to another resource: `{ "data": { "type": .., "id": .. } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Relationship {
    pub fn new(kind: &str, id: impl Into<String>) -> Self {
        Self {
            data: ResourceIdentifier {
                kind: kind.to_string(),
                id: id.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutAttributes {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations_needed: Option<u32>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub fee_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRelationships {
    pub wallet: Relationship,
    pub currency: Relationship,
}

/// Caller-facing payout parameters, marshaled into a [`PayoutRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayout {
    pub wallet_id: String,
    pub currency_id: String,
    pub attributes: PayoutAttributes,
}

pub type PayoutRequest = RequestDocument<PayoutAttributes, PayoutRelationships>;

impl From<NewPayout> for PayoutRequest {
    fn from(payout: NewPayout) -> Self {
        RequestDocument::with_relationships(
            PAYOUT_TYPE,
            payout.attributes,
            PayoutRelationships {
                wallet: Relationship::new("wallet", payout.wallet_id),
                currency: Relationship::new("currency", payout.currency_id),
            },
        )
    }
}

/// Attributes of a new deposit address, optionally bound to an expected amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepositRequestAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target_amount_requested: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations_needed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRelationships {
    pub wallet: Relationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Relationship>,
}

/// Caller-facing deposit parameters, marshaled into a [`DepositRequest`].
///
/// Without `currency_id` the deposit is taken in the wallet currency.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeposit {
    pub wallet_id: String,
    pub currency_id: Option<String>,
    pub attributes: DepositRequestAttributes,
}

pub type DepositRequest = RequestDocument<DepositRequestAttributes, DepositRelationships>;

impl From<NewDeposit> for DepositRequest {
    fn from(deposit: NewDeposit) -> Self {
        RequestDocument::with_relationships(
            DEPOSIT_TYPE,
            deposit.attributes,
            DepositRelationships {
                wallet: Relationship::new("wallet", deposit.wallet_id),
                currency: deposit
                    .currency_id
                    .map(|id| Relationship::new("currency", id)),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_shape() {
        let request = LoginRequest::new(
            AUTH_TOKEN_TYPE,
            LoginAttributes {
                login: "k".to_string(),
                password: "s".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "data": {
                    "type": "auth-token",
                    "attributes": { "login": "k", "password": "s" }
                }
            })
        );
    }

    #[test]
    fn test_payout_request_shape() {
        let request: PayoutRequest = NewPayout {
            wallet_id: "318".to_string(),
            currency_id: "1000".to_string(),
            attributes: PayoutAttributes {
                amount: "0.001".parse().unwrap(),
                address: "bc1qexample".to_string(),
                tracking_id: Some("order-7".to_string()),
                confirmations_needed: None,
                fee_amount: None,
                callback_url: None,
            },
        }
        .into();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["data"]["type"], "payout");
        assert_eq!(value["data"]["attributes"]["amount"], "0.001");
        assert!(value["data"]["attributes"].get("fee_amount").is_none());
        assert_eq!(value["data"]["relationships"]["wallet"]["data"]["id"], "318");
        assert_eq!(
            value["data"]["relationships"]["currency"]["data"]["type"],
            "currency"
        );
    }

    #[test]
    fn test_deposit_request_omits_absent_currency() {
        let request: DepositRequest = NewDeposit {
            wallet_id: "654".to_string(),
            currency_id: None,
            attributes: DepositRequestAttributes {
                target_amount_requested: Some("0.001".parse().unwrap()),
                tracking_id: Some("bill-1".to_string()),
                ..Default::default()
            },
        }
        .into();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "data": {
                    "type": "deposit",
                    "attributes": { "tracking_id": "bill-1", "target_amount_requested": "0.001" },
                    "relationships": { "wallet": { "data": { "type": "wallet", "id": "654" } } }
                }
            })
        );
    }
}
