/*
[INPUT]:  Payout parameters (wallet, currency, amount, address)
[OUTPUT]: Payout documents
[POS]:    HTTP layer - payout endpoints (require bearer auth)
[UPDATE]: When adding payout endpoints or changing request format
*/

use reqwest::Method;

use crate::http::{B2BinPayClient, Result};
use crate::types::{NewPayout, PayoutDocument, PayoutList, PayoutRequest};

impl B2BinPayClient {
    /// List payouts
    ///
    /// GET /payout/
    pub async fn get_payouts(&self) -> Result<PayoutList> {
        self.dispatch(Method::GET, "/payout/", None).await
    }

    /// Create a payout
    ///
    /// POST /payout/
    pub async fn create_payout(&self, payout: NewPayout) -> Result<PayoutDocument> {
        let body = serde_json::to_value(PayoutRequest::from(payout))?;
        self.dispatch(Method::POST, "/payout/", Some(body)).await
    }
}
