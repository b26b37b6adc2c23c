/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /token/` and `POST /token/refresh/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub data: TokenData,
    /// Present on login only; refresh responses are unsigned
    #[serde(default)]
    pub meta: Option<TokenMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub attributes: TokenAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAttributes {
    pub access: String,
    pub refresh: String,
    pub access_expired_at: DateTime<Utc>,
    pub refresh_expired_at: DateTime<Utc>,
    #[serde(default)]
    pub is_2fa_confirmed: bool,
}

/// Server signature over the issued refresh token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMeta {
    pub time: String,
    pub sign: String,
}

/// Generic JSON:API response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<serde_json::Value>,
}

/// A single JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub attributes: A,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
}
