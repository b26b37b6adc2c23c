/*
[INPUT]:  Optional currency filter
[OUTPUT]: Deposit and payout rate quotes
[POS]:    HTTP layer - rate endpoints (require bearer auth)
[UPDATE]: When adding rate endpoints or filters
*/

use reqwest::Method;

use crate::http::{B2BinPayClient, Result};
use crate::types::RateList;

impl B2BinPayClient {
    /// Deposit rates, optionally for one source currency
    ///
    /// GET /rates/deposit/?filter[left]={currency}
    pub async fn get_deposit_rates(&self, currency: Option<&str>) -> Result<RateList> {
        self.get_rates("/rates/deposit/", currency).await
    }

    /// Payout rates, optionally for one source currency
    ///
    /// GET /rates/payout/?filter[left]={currency}
    pub async fn get_payout_rates(&self, currency: Option<&str>) -> Result<RateList> {
        self.get_rates("/rates/payout/", currency).await
    }

    async fn get_rates(&self, endpoint: &str, currency: Option<&str>) -> Result<RateList> {
        match currency {
            Some(currency) => {
                self.dispatch_with_query(Method::GET, endpoint, &[("filter[left]", currency)], None)
                    .await
            }
            None => self.dispatch(Method::GET, endpoint, None).await,
        }
    }
}
