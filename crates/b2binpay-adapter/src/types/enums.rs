/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Production gateway base URL
pub const PRODUCTION_URL: &str = "https://api.b2binpay.com";
/// Sandbox gateway base URL
pub const SANDBOX_URL: &str = "https://api-sandbox.b2binpay.com";

/// Which B2BinPay deployment a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        }
    }
}

/// Deposit / payout lifecycle status as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum TransferStatus {
    Error,
    Expired,
    Waiting,
    Paid,
    Frozen,
    Closed,
    Unknown(i32),
}

impl From<i32> for TransferStatus {
    fn from(value: i32) -> Self {
        match value {
            -2 => TransferStatus::Error,
            -1 => TransferStatus::Expired,
            1 => TransferStatus::Waiting,
            2 => TransferStatus::Paid,
            3 => TransferStatus::Frozen,
            4 => TransferStatus::Closed,
            other => TransferStatus::Unknown(other),
        }
    }
}

impl From<TransferStatus> for i32 {
    fn from(value: TransferStatus) -> Self {
        match value {
            TransferStatus::Error => -2,
            TransferStatus::Expired => -1,
            TransferStatus::Waiting => 1,
            TransferStatus::Paid => 2,
            TransferStatus::Frozen => 3,
            TransferStatus::Closed => 4,
            TransferStatus::Unknown(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_url() {
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(Environment::Sandbox.base_url(), SANDBOX_URL);
    }

    #[test]
    fn test_transfer_status_keeps_unknown_codes() {
        let status: TransferStatus = serde_json::from_str("7").unwrap();
        assert_eq!(status, TransferStatus::Unknown(7));
        assert_eq!(serde_json::to_string(&TransferStatus::Expired).unwrap(), "-1");
    }
}
