use anyhow::{Context as _, Result};
use arcade_types::{
    execution::{Call, Event, Instruction, Key, Output, Value},
    ledger::{GlobalConfig, LedgerError, PlayerState},
};
use commonware_cryptography::ed25519::PublicKey;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::state::{load_player, State, Status};

mod handlers;

/// Why a call could not be applied.
///
/// `Ledger` failures are per-call business rejections: the call is dropped,
/// its effects are rolled back, and batch execution continues. `State`
/// failures come from the storage backend and abort the whole batch.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    State(#[from] anyhow::Error),
}

/// A transactional overlay over a read-only state snapshot.
///
/// All writes accumulate in `pending`; nothing reaches the underlying state
/// until the caller takes the changeset via [`Layer::commit`] and applies it.
/// `now` is the host-supplied timestamp (in the same unit as the stake reward
/// rate) shared by every call in the batch.
pub struct Layer<'a, S: State> {
    state: &'a S,
    pending: BTreeMap<Key, Status>,

    now: u64,
}

impl<'a, S: State> Layer<'a, S> {
    pub fn new(state: &'a S, now: u64) -> Self {
        Self {
            state,
            pending: BTreeMap::new(),
            now,
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, Status::Update(value));
    }

    fn put_player(&mut self, public: &PublicKey, player: PlayerState) {
        self.insert(Key::Player(public.clone()), Value::Player(player));
    }

    fn put_config(&mut self, config: GlobalConfig) {
        self.insert(Key::Config, Value::Config(config));
    }

    async fn player(&self, public: &PublicKey) -> Result<PlayerState, LayerError> {
        Ok(load_player(self, public).await?)
    }

    async fn maybe_config(&self) -> Result<Option<GlobalConfig>, LayerError> {
        Ok(match self.get(&Key::Config).await? {
            Some(Value::Config(config)) => Some(config),
            _ => None,
        })
    }

    async fn config(&self) -> Result<GlobalConfig, LayerError> {
        self.maybe_config()
            .await?
            .ok_or(LedgerError::NotConfigured)
            .map_err(LayerError::from)
    }

    async fn admin_config(&self, caller: &PublicKey) -> Result<GlobalConfig, LayerError> {
        let config = self.config().await?;
        if &config.admin != caller {
            return Err(LedgerError::Unauthorized.into());
        }
        Ok(config)
    }

    async fn dispatch(&mut self, call: &Call) -> Result<Vec<Event>, LayerError> {
        let caller = &call.caller;
        match &call.instruction {
            Instruction::Configure {
                token_a_id,
                token_b_id,
                stake_reward_rate,
                token_a_price,
                token_b_price,
            } => {
                self.handle_configure(
                    caller,
                    *token_a_id,
                    *token_b_id,
                    *stake_reward_rate,
                    *token_a_price,
                    *token_b_price,
                )
                .await
            }
            Instruction::DepositNative { amount } => {
                self.handle_deposit_native(caller, *amount).await
            }
            Instruction::DepositToken { token_id, amount } => {
                self.handle_deposit_token(caller, *token_id, *amount).await
            }
            Instruction::WithdrawNative { amount } => {
                self.handle_withdraw_native(caller, *amount).await
            }
            Instruction::Stake { amount } => self.handle_stake(caller, *amount).await,
            Instruction::Unstake { amount } => self.handle_unstake(caller, *amount).await,
            Instruction::Swap {
                token_in,
                token_out,
                amount_in,
            } => {
                self.handle_swap(caller, *token_in, *token_out, *amount_in)
                    .await
            }
            Instruction::ResolveGame {
                winner,
                loser,
                prize_native,
            } => {
                self.handle_resolve_game(caller, winner, loser, *prize_native)
                    .await
            }
            Instruction::AwardAchievement => self.handle_award_achievement(caller).await,
            Instruction::TreasuryWithdraw { to, amount } => {
                self.handle_treasury_withdraw(caller, to, *amount).await
            }
        }
    }

    /// Apply a single call atomically: writes are staged against a scratch
    /// overlay and merged into `pending` only if the whole call succeeds, so
    /// a rejected call leaves no partial effect behind.
    pub async fn apply(&mut self, call: &Call) -> Result<Vec<Event>, LayerError> {
        let now = self.now;
        let (events, staged) = {
            let mut scratch = Layer::new(&*self, now);
            let events = scratch.dispatch(call).await?;
            (events, scratch.pending)
        };
        self.pending.extend(staged);
        Ok(events)
    }

    /// Run a batch of calls in order. Business rejections become
    /// [`Event::OperationRejected`] outputs; storage failures abort.
    pub async fn execute(&mut self, calls: Vec<Call>) -> Result<Vec<Output>> {
        let mut outputs = Vec::new();
        for call in calls {
            match self.apply(&call).await {
                Ok(events) => {
                    outputs.extend(events.into_iter().map(Output::Event));
                    outputs.push(Output::Call(call));
                }
                Err(LayerError::Ledger(error)) => {
                    debug!(caller = ?call.caller, %error, "call rejected");
                    outputs.push(Output::Event(Event::OperationRejected {
                        account: call.caller,
                        error,
                    }));
                }
                Err(LayerError::State(err)) => {
                    return Err(err).context("state error during execute");
                }
            }
        }
        Ok(outputs)
    }

    pub fn commit(self) -> Vec<(Key, Status)> {
        self.pending.into_iter().collect()
    }
}

impl<'a, S: State> State for Layer<'a, S> {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(match self.pending.get(key) {
            Some(Status::Update(value)) => Some(value.clone()),
            Some(Status::Delete) => None,
            None => self.state.get(key).await?,
        })
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.pending.insert(key, Status::Update(value));
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.pending.insert(key.clone(), Status::Delete);
        Ok(())
    }
}
