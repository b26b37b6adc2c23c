/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dispatch;
pub mod error;
pub mod payout;
pub mod rates;
pub mod transport;
pub mod wallet;

pub use error::{B2BinPayError, Result};
pub use transport::{HttpTransport, JSON_API_MEDIA_TYPE};

pub use client::{B2BinPayClient, ClientConfig};
