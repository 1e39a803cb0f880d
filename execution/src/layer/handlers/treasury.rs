use super::super::*;
use arcade_types::ledger::{MARKET_REWARD_MULTIPLIER, TREASURY_FEE_DIVISOR};

/// Price-denominate a prize: `floor(prize * MARKET_REWARD_MULTIPLIER / price)`.
fn denominate(prize: u64, price: u64) -> Result<u64, LedgerError> {
    if price == 0 {
        return Err(LedgerError::NotConfigured);
    }
    let amount = (prize as u128) * MARKET_REWARD_MULTIPLIER / (price as u128);
    u64::try_from(amount).map_err(|_| LedgerError::InvalidAmount)
}

impl<'a, S: State> Layer<'a, S> {
    /// Settle a finished game: pay the native prize to the winner, credit
    /// price-denominated token rewards to both sides, and take the platform
    /// fee into the treasury. The three record mutations land together or
    /// not at all.
    pub(in crate::layer) async fn handle_resolve_game(
        &mut self,
        caller: &PublicKey,
        winner: &PublicKey,
        loser: &PublicKey,
        prize_native: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let mut config = self.admin_config(caller).await?;

        let winner_reward = denominate(prize_native, config.token_b_price)?;
        let loser_consolation = denominate(prize_native, config.token_a_price)?;
        let fee = prize_native / TREASURY_FEE_DIVISOR;

        // Credit sequentially through the overlay so winner == loser still
        // lands both credits on one record.
        let mut record = self.player(winner).await?;
        record.token_b_balance = record
            .token_b_balance
            .checked_add(winner_reward)
            .ok_or(LedgerError::InvalidAmount)?;
        self.put_player(winner, record);

        let mut record = self.player(loser).await?;
        record.token_a_balance = record
            .token_a_balance
            .checked_add(loser_consolation)
            .ok_or(LedgerError::InvalidAmount)?;
        self.put_player(loser, record);

        config.treasury_native = config
            .treasury_native
            .checked_add(fee)
            .ok_or(LedgerError::InvalidAmount)?;
        self.put_config(config);

        Ok(vec![
            Event::TransferOut {
                to: winner.clone(),
                amount: prize_native,
            },
            Event::GameResolved {
                winner: winner.clone(),
                loser: loser.clone(),
                prize_native,
                winner_reward,
                loser_consolation,
                fee,
            },
        ])
    }

    /// Pay native currency out of the treasury into a player record.
    pub(in crate::layer) async fn handle_treasury_withdraw(
        &mut self,
        caller: &PublicKey,
        to: &PublicKey,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let mut config = self.admin_config(caller).await?;
        if config.treasury_native < amount {
            return Err(LedgerError::TreasuryInsufficient {
                available: config.treasury_native,
                required: amount,
            }
            .into());
        }
        config.treasury_native -= amount;
        let remaining = config.treasury_native;

        let mut record = self.player(to).await?;
        record.native_balance = record
            .native_balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        self.put_player(to, record);
        self.put_config(config);

        Ok(vec![Event::TreasuryWithdrawn {
            to: to.clone(),
            amount,
            remaining,
        }])
    }
}
