use super::super::*;
use arcade_types::ledger::{
    DEFAULT_STAKE_REWARD_RATE, DEFAULT_TOKEN_A_PRICE, DEFAULT_TOKEN_B_PRICE,
};

impl<'a, S: State> Layer<'a, S> {
    /// Install or update the platform configuration. The first caller becomes
    /// the admin; afterwards only the admin may reconfigure. Zero rate or
    /// prices are replaced by the platform defaults. Treasury balances
    /// survive reconfiguration.
    pub(in crate::layer) async fn handle_configure(
        &mut self,
        caller: &PublicKey,
        token_a_id: u64,
        token_b_id: u64,
        stake_reward_rate: u64,
        token_a_price: u64,
        token_b_price: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let rate = if stake_reward_rate == 0 {
            DEFAULT_STAKE_REWARD_RATE
        } else {
            stake_reward_rate
        };
        let price_a = if token_a_price == 0 {
            DEFAULT_TOKEN_A_PRICE
        } else {
            token_a_price
        };
        let price_b = if token_b_price == 0 {
            DEFAULT_TOKEN_B_PRICE
        } else {
            token_b_price
        };

        let config = match self.maybe_config().await? {
            Some(mut config) => {
                if &config.admin != caller {
                    return Err(LedgerError::Unauthorized.into());
                }
                config.token_a_id = token_a_id;
                config.token_b_id = token_b_id;
                config.stake_reward_rate = rate;
                config.token_a_price = price_a;
                config.token_b_price = price_b;
                config
            }
            None => GlobalConfig::new(
                caller.clone(),
                token_a_id,
                token_b_id,
                rate,
                price_a,
                price_b,
            ),
        };
        let admin = config.admin.clone();
        self.put_config(config);

        Ok(vec![Event::Configured { admin }])
    }
}
