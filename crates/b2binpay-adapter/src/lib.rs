/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public B2BinPay adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    Credentials,
    SessionManager,
    SessionSnapshot,
    SessionState,
    SessionStatus,
    compute_signature,
    verify_signature,
};

// Re-export commonly used types from http
pub use http::{
    B2BinPayClient,
    B2BinPayError,
    ClientConfig,
    JSON_API_MEDIA_TYPE,
    Result,
};

// Re-export all types
pub use types::*;

pub use reqwest::Method;
pub use rust_decimal::Decimal;
