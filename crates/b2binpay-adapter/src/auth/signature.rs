/*
[INPUT]:  Login response meta (time, sign), refresh token, API key and secret
[OUTPUT]: Authenticity verdict for the token response
[POS]:    Auth layer - HMAC verification of server-issued tokens
[UPDATE]: When the gateway changes its response signing scheme
*/

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex signature the gateway attaches to a login response.
///
/// key = SHA256(api_key ++ api_secret), message = time ++ refresh_token
pub fn compute_signature(
    time: &str,
    refresh_token: &str,
    key: &str,
    secret: &str,
) -> Option<String> {
    let derived_key = Sha256::new()
        .chain_update(key.as_bytes())
        .chain_update(secret.as_bytes())
        .finalize();

    let mut mac = HmacSha256::new_from_slice(&derived_key).ok()?;
    mac.update(time.as_bytes());
    mac.update(refresh_token.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Check a login response signature. Never fails; any mismatch is `false`.
pub fn verify_signature(
    time: &str,
    refresh_token: &str,
    claimed_signature: &str,
    key: &str,
    secret: &str,
) -> bool {
    compute_signature(time, refresh_token, key, secret)
        .is_some_and(|expected| expected == claimed_signature)
}
