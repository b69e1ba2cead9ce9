//! Private account endpoints

use cryptsy_types::Side;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::order_type_param;
use crate::error::{RestError, RestResult};
use crate::session::AuthenticatedSession;
use crate::types::{decode, AccountInfo, FeeEstimate, Transaction};

impl AuthenticatedSession {
    /// Get balances, server time and open order count
    #[instrument(skip(self))]
    pub async fn get_info(&mut self) -> RestResult<AccountInfo> {
        let payload = self.request("getinfo", &[]).await?;
        Ok(decode(payload)?)
    }

    /// Get deposit and withdrawal history
    #[instrument(skip(self))]
    pub async fn my_transactions(&mut self) -> RestResult<Vec<Transaction>> {
        let payload = self.request("mytransactions", &[]).await?;
        Ok(decode(payload)?)
    }

    /// Calculate the fee for a hypothetical order
    ///
    /// # Arguments
    /// * `side` - Buy or sell
    /// * `quantity` - Order quantity
    /// * `price` - Limit price
    #[instrument(skip(self))]
    pub async fn calculate_fees(
        &mut self,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> RestResult<FeeEstimate> {
        let params = [
            ("ordertype", order_type_param(side).to_string()),
            ("quantity", quantity.to_string()),
            ("price", price.to_string()),
        ];
        let payload = self.request("calculatefees", &params).await?;
        Ok(decode(payload)?)
    }

    /// Generate a new deposit address
    ///
    /// At least one of `currency_id` and `currency_code` must be given; the
    /// check happens before any request is sent.
    #[instrument(skip(self))]
    pub async fn generate_new_address(
        &mut self,
        currency_id: Option<u32>,
        currency_code: Option<&str>,
    ) -> RestResult<String> {
        let currency_code = currency_code.filter(|code| !code.trim().is_empty());

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = currency_id {
            params.push(("currencyid", id.to_string()));
        }
        if let Some(code) = currency_code {
            params.push(("currencycode", code.to_string()));
        }
        if params.is_empty() {
            return Err(RestError::InvalidParameter(
                "generatenewaddress needs a currency id or a currency code".to_string(),
            ));
        }

        let payload = self.request("generatenewaddress", &params).await?;
        let address = payload
            .get("address")
            .and_then(|address| address.as_str())
            .ok_or_else(|| cryptsy_types::ParseError::missing("address"))?
            .to_string();

        debug!("Generated new deposit address");
        Ok(address)
    }
}
