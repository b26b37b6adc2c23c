/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Resource attribute structs for wallets, deposits, payouts and rates
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TransferStatus;
use super::responses::{Document, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAttributes {
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub balance_confirmed: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub balance_pending: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub balance_unusable: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub minimal_transfer_amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositAttributes {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub target_amount_requested: Option<Decimal>,
    #[serde(default)]
    pub status: Option<TransferStatus>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutStateAttributes {
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<TransferStatus>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAttributes {
    pub left: String,
    pub right: String,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub bid: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option", default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub exp: Option<u32>,
    #[serde(default)]
    pub expired_at: Option<String>,
}

pub type Wallet = Resource<WalletAttributes>;
pub type Deposit = Resource<DepositAttributes>;
pub type Payout = Resource<PayoutStateAttributes>;
pub type Rate = Resource<RateAttributes>;

pub type WalletList = Document<Vec<Wallet>>;
pub type WalletDocument = Document<Wallet>;
pub type DepositList = Document<Vec<Deposit>>;
pub type DepositDocument = Document<Deposit>;
pub type PayoutList = Document<Vec<Payout>>;
pub type PayoutDocument = Document<Payout>;
pub type RateList = Document<Vec<Rate>>;
