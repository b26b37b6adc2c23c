/*
[INPUT]:  API key/secret and token responses
[OUTPUT]: Verified sessions, bearer tokens and auth errors
[POS]:    Auth layer - handles B2BinPay session authentication
[UPDATE]: When auth flow or signature scheme changes
*/

pub mod credentials;
pub mod manager;
pub mod session;
pub mod signature;
pub mod snapshot;

pub use credentials::Credentials;
pub use manager::{REFRESH_ENDPOINT, SessionManager, TOKEN_ENDPOINT};
pub use session::{SessionState, SessionStatus, SessionStore};
pub use signature::{compute_signature, verify_signature};
pub use snapshot::SessionSnapshot;
