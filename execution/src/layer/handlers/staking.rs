use super::super::*;
use arcade_types::ledger::REWARD_SCALE;

/// Reward earned by `staked` units between `last` and `now`:
/// `floor(staked * rate * elapsed / REWARD_SCALE)`, computed in u128 so the
/// only overflow surface is the product itself.
fn accrued_reward(staked: u64, rate: u64, last: u64, now: u64) -> Result<u64, LedgerError> {
    if staked == 0 || now <= last {
        return Ok(0);
    }
    let elapsed = now - last;
    let reward = (staked as u128)
        .checked_mul(rate as u128)
        .and_then(|product| product.checked_mul(elapsed as u128))
        .ok_or(LedgerError::InvalidAmount)?
        / REWARD_SCALE;
    u64::try_from(reward).map_err(|_| LedgerError::InvalidAmount)
}

/// Credit pending rewards to the token A balance without touching the stake
/// timestamp; callers stamp `now` themselves after mutating the stake.
fn settle_rewards(
    player: &mut PlayerState,
    config: &GlobalConfig,
    now: u64,
) -> Result<u64, LedgerError> {
    let reward = accrued_reward(
        player.staked_token_a,
        config.stake_reward_rate,
        player.last_stake_timestamp,
        now,
    )?;
    player.token_a_balance = player
        .token_a_balance
        .checked_add(reward)
        .ok_or(LedgerError::InvalidAmount)?;
    Ok(reward)
}

impl<'a, S: State> Layer<'a, S> {
    pub(in crate::layer) async fn handle_stake(
        &mut self,
        public: &PublicKey,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let config = self.config().await?;
        let mut player = self.player(public).await?;
        if player.token_a_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                balance: player.token_a_balance,
                required: amount,
            }
            .into());
        }

        // Settle rewards for the epoch that ends now, then restake.
        let reward = settle_rewards(&mut player, &config, self.now)?;
        player.token_a_balance -= amount;
        player.staked_token_a = player
            .staked_token_a
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        player.last_stake_timestamp = self.now;
        let staked = player.staked_token_a;
        self.put_player(public, player);

        Ok(vec![Event::Staked {
            player: public.clone(),
            amount,
            reward,
            staked,
            timestamp: self.now,
        }])
    }

    pub(in crate::layer) async fn handle_unstake(
        &mut self,
        public: &PublicKey,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let config = self.config().await?;
        let mut player = self.player(public).await?;
        if player.staked_token_a < amount {
            return Err(LedgerError::InsufficientStaked {
                staked: player.staked_token_a,
                required: amount,
            }
            .into());
        }

        let reward = settle_rewards(&mut player, &config, self.now)?;
        player.staked_token_a -= amount;
        player.token_a_balance = player
            .token_a_balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        player.last_stake_timestamp = self.now;
        let staked = player.staked_token_a;
        self.put_player(public, player);

        Ok(vec![Event::Unstaked {
            player: public.clone(),
            amount,
            reward,
            staked,
            timestamp: self.now,
        }])
    }
}
