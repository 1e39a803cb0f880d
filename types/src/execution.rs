use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;

use crate::ledger::{GlobalConfig, LedgerError, PlayerState, Token};

/// A ledger operation submitted by the host on behalf of an already
/// authenticated caller.
///
/// Sender authentication is a host concern: by the time a `Call` reaches the
/// execution layer, `caller` is trusted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub caller: PublicKey,
    pub instruction: Instruction,
}

impl Call {
    pub fn new(caller: PublicKey, instruction: Instruction) -> Self {
        Self {
            caller,
            instruction,
        }
    }
}

impl Write for Call {
    fn write(&self, writer: &mut impl BufMut) {
        self.caller.write(writer);
        self.instruction.write(writer);
    }
}

impl Read for Call {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            caller: PublicKey::read(reader)?,
            instruction: Instruction::read(reader)?,
        })
    }
}

impl EncodeSize for Call {
    fn encode_size(&self) -> usize {
        self.caller.encode_size() + self.instruction.encode_size()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Configure token ids, prices, and the reward rate. The first ever call
    /// installs the caller as admin; later calls are admin-gated.
    /// Binary: [1] [tokenAId:u64 BE] [tokenBId:u64 BE] [rewardRate:u64 BE]
    ///         [tokenAPrice:u64 BE] [tokenBPrice:u64 BE]
    Configure {
        token_a_id: u64,
        token_b_id: u64,
        stake_reward_rate: u64,
        token_a_price: u64,
        token_b_price: u64,
    },

    /// Credit native currency to the caller.
    /// Binary: [2] [amount:u64 BE]
    DepositNative { amount: u64 },

    /// Credit one of the configured tokens to the caller.
    /// Binary: [3] [tokenId:u64 BE] [amount:u64 BE]
    DepositToken { token_id: u64, amount: u64 },

    /// Debit native currency from the caller and signal an external
    /// transfer-out.
    /// Binary: [4] [amount:u64 BE]
    WithdrawNative { amount: u64 },

    /// Move token A balance into stake, settling pending rewards first.
    /// Binary: [5] [amount:u64 BE]
    Stake { amount: u64 },

    /// Move token A stake back into balance, settling pending rewards first.
    /// Binary: [6] [amount:u64 BE]
    Unstake { amount: u64 },

    /// Convert between the two tokens at the configured reference prices.
    /// Binary: [7] [tokenIn:u64 BE] [tokenOut:u64 BE] [amountIn:u64 BE]
    Swap {
        token_in: u64,
        token_out: u64,
        amount_in: u64,
    },

    /// Settle a finished game: pay the winner, mint consolation to the
    /// loser, collect the platform fee. Admin-only.
    /// Binary: [8] [winner:32] [loser:32] [prizeNative:u64 BE]
    ResolveGame {
        winner: PublicKey,
        loser: PublicKey,
        prize_native: u64,
    },

    /// Increment the caller's achievement counter.
    /// Binary: [9]
    AwardAchievement,

    /// Pay out native currency from the treasury. Admin-only.
    /// Binary: [10] [to:32] [amount:u64 BE]
    TreasuryWithdraw { to: PublicKey, amount: u64 },
}

impl Write for Instruction {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Configure {
                token_a_id,
                token_b_id,
                stake_reward_rate,
                token_a_price,
                token_b_price,
            } => {
                1u8.write(writer);
                token_a_id.write(writer);
                token_b_id.write(writer);
                stake_reward_rate.write(writer);
                token_a_price.write(writer);
                token_b_price.write(writer);
            }
            Self::DepositNative { amount } => {
                2u8.write(writer);
                amount.write(writer);
            }
            Self::DepositToken { token_id, amount } => {
                3u8.write(writer);
                token_id.write(writer);
                amount.write(writer);
            }
            Self::WithdrawNative { amount } => {
                4u8.write(writer);
                amount.write(writer);
            }
            Self::Stake { amount } => {
                5u8.write(writer);
                amount.write(writer);
            }
            Self::Unstake { amount } => {
                6u8.write(writer);
                amount.write(writer);
            }
            Self::Swap {
                token_in,
                token_out,
                amount_in,
            } => {
                7u8.write(writer);
                token_in.write(writer);
                token_out.write(writer);
                amount_in.write(writer);
            }
            Self::ResolveGame {
                winner,
                loser,
                prize_native,
            } => {
                8u8.write(writer);
                winner.write(writer);
                loser.write(writer);
                prize_native.write(writer);
            }
            Self::AwardAchievement => 9u8.write(writer),
            Self::TreasuryWithdraw { to, amount } => {
                10u8.write(writer);
                to.write(writer);
                amount.write(writer);
            }
        }
    }
}

impl Read for Instruction {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let instruction = match u8::read(reader)? {
            1 => Self::Configure {
                token_a_id: u64::read(reader)?,
                token_b_id: u64::read(reader)?,
                stake_reward_rate: u64::read(reader)?,
                token_a_price: u64::read(reader)?,
                token_b_price: u64::read(reader)?,
            },
            2 => Self::DepositNative {
                amount: u64::read(reader)?,
            },
            3 => Self::DepositToken {
                token_id: u64::read(reader)?,
                amount: u64::read(reader)?,
            },
            4 => Self::WithdrawNative {
                amount: u64::read(reader)?,
            },
            5 => Self::Stake {
                amount: u64::read(reader)?,
            },
            6 => Self::Unstake {
                amount: u64::read(reader)?,
            },
            7 => Self::Swap {
                token_in: u64::read(reader)?,
                token_out: u64::read(reader)?,
                amount_in: u64::read(reader)?,
            },
            8 => Self::ResolveGame {
                winner: PublicKey::read(reader)?,
                loser: PublicKey::read(reader)?,
                prize_native: u64::read(reader)?,
            },
            9 => Self::AwardAchievement,
            10 => Self::TreasuryWithdraw {
                to: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(instruction)
    }
}

impl EncodeSize for Instruction {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Configure { .. } => 5 * u64::SIZE,
                Self::DepositNative { .. } => u64::SIZE,
                Self::DepositToken { .. } => 2 * u64::SIZE,
                Self::WithdrawNative { .. } => u64::SIZE,
                Self::Stake { .. } | Self::Unstake { .. } => u64::SIZE,
                Self::Swap { .. } => 3 * u64::SIZE,
                Self::ResolveGame { .. } => 2 * PublicKey::SIZE + u64::SIZE,
                Self::AwardAchievement => 0,
                Self::TreasuryWithdraw { .. } => PublicKey::SIZE + u64::SIZE,
            }
    }
}

#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug)]
pub enum Key {
    /// Per-account ledger record (tag 0).
    Player(PublicKey),
    /// Platform configuration singleton (tag 1).
    Config,
}

impl Write for Key {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Player(pk) => {
                0u8.write(writer);
                pk.write(writer);
            }
            Self::Config => 1u8.write(writer),
        }
    }
}

impl Read for Key {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let key = match u8::read(reader)? {
            0 => Self::Player(PublicKey::read(reader)?),
            1 => Self::Config,
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(key)
    }
}

impl EncodeSize for Key {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Player(_) => PublicKey::SIZE,
                Self::Config => 0,
            }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Value {
    /// Per-account ledger record (tag 0).
    Player(PlayerState),
    /// Platform configuration singleton (tag 1).
    Config(GlobalConfig),
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Player(state) => {
                0u8.write(writer);
                state.write(writer);
            }
            Self::Config(config) => {
                1u8.write(writer);
                config.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = match u8::read(reader)? {
            0 => Self::Player(PlayerState::read(reader)?),
            1 => Self::Config(GlobalConfig::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(value)
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Player(state) => state.encode_size(),
                Self::Config(config) => config.encode_size(),
            }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Configured {
        admin: PublicKey,
    },
    NativeDeposited {
        player: PublicKey,
        amount: u64,
        balance: u64,
    },
    TokenDeposited {
        player: PublicKey,
        token: Token,
        amount: u64,
        balance: u64,
    },
    NativeWithdrawn {
        player: PublicKey,
        amount: u64,
        balance: u64,
    },
    /// Instruction to the host environment to move native currency out of
    /// the platform to `to`.
    TransferOut {
        to: PublicKey,
        amount: u64,
    },
    Staked {
        player: PublicKey,
        amount: u64,
        reward: u64,
        staked: u64,
        timestamp: u64,
    },
    Unstaked {
        player: PublicKey,
        amount: u64,
        reward: u64,
        staked: u64,
        timestamp: u64,
    },
    Swapped {
        player: PublicKey,
        token_in: Token,
        token_out: Token,
        amount_in: u64,
        amount_out: u64,
    },
    GameResolved {
        winner: PublicKey,
        loser: PublicKey,
        prize_native: u64,
        winner_reward: u64,
        loser_consolation: u64,
        fee: u64,
    },
    AchievementAwarded {
        player: PublicKey,
        count: u64,
    },
    TreasuryWithdrawn {
        to: PublicKey,
        amount: u64,
        remaining: u64,
    },
    /// A call failed its invariant checks and was rolled back in full.
    OperationRejected {
        account: PublicKey,
        error: LedgerError,
    },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Configured { admin } => {
                0u8.write(writer);
                admin.write(writer);
            }
            Self::NativeDeposited {
                player,
                amount,
                balance,
            } => {
                1u8.write(writer);
                player.write(writer);
                amount.write(writer);
                balance.write(writer);
            }
            Self::TokenDeposited {
                player,
                token,
                amount,
                balance,
            } => {
                2u8.write(writer);
                player.write(writer);
                token.write(writer);
                amount.write(writer);
                balance.write(writer);
            }
            Self::NativeWithdrawn {
                player,
                amount,
                balance,
            } => {
                3u8.write(writer);
                player.write(writer);
                amount.write(writer);
                balance.write(writer);
            }
            Self::TransferOut { to, amount } => {
                4u8.write(writer);
                to.write(writer);
                amount.write(writer);
            }
            Self::Staked {
                player,
                amount,
                reward,
                staked,
                timestamp,
            } => {
                5u8.write(writer);
                player.write(writer);
                amount.write(writer);
                reward.write(writer);
                staked.write(writer);
                timestamp.write(writer);
            }
            Self::Unstaked {
                player,
                amount,
                reward,
                staked,
                timestamp,
            } => {
                6u8.write(writer);
                player.write(writer);
                amount.write(writer);
                reward.write(writer);
                staked.write(writer);
                timestamp.write(writer);
            }
            Self::Swapped {
                player,
                token_in,
                token_out,
                amount_in,
                amount_out,
            } => {
                7u8.write(writer);
                player.write(writer);
                token_in.write(writer);
                token_out.write(writer);
                amount_in.write(writer);
                amount_out.write(writer);
            }
            Self::GameResolved {
                winner,
                loser,
                prize_native,
                winner_reward,
                loser_consolation,
                fee,
            } => {
                8u8.write(writer);
                winner.write(writer);
                loser.write(writer);
                prize_native.write(writer);
                winner_reward.write(writer);
                loser_consolation.write(writer);
                fee.write(writer);
            }
            Self::AchievementAwarded { player, count } => {
                9u8.write(writer);
                player.write(writer);
                count.write(writer);
            }
            Self::TreasuryWithdrawn {
                to,
                amount,
                remaining,
            } => {
                10u8.write(writer);
                to.write(writer);
                amount.write(writer);
                remaining.write(writer);
            }
            Self::OperationRejected { account, error } => {
                11u8.write(writer);
                account.write(writer);
                error.write(writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let event = match u8::read(reader)? {
            0 => Self::Configured {
                admin: PublicKey::read(reader)?,
            },
            1 => Self::NativeDeposited {
                player: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
                balance: u64::read(reader)?,
            },
            2 => Self::TokenDeposited {
                player: PublicKey::read(reader)?,
                token: Token::read(reader)?,
                amount: u64::read(reader)?,
                balance: u64::read(reader)?,
            },
            3 => Self::NativeWithdrawn {
                player: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
                balance: u64::read(reader)?,
            },
            4 => Self::TransferOut {
                to: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
            },
            5 => Self::Staked {
                player: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
                reward: u64::read(reader)?,
                staked: u64::read(reader)?,
                timestamp: u64::read(reader)?,
            },
            6 => Self::Unstaked {
                player: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
                reward: u64::read(reader)?,
                staked: u64::read(reader)?,
                timestamp: u64::read(reader)?,
            },
            7 => Self::Swapped {
                player: PublicKey::read(reader)?,
                token_in: Token::read(reader)?,
                token_out: Token::read(reader)?,
                amount_in: u64::read(reader)?,
                amount_out: u64::read(reader)?,
            },
            8 => Self::GameResolved {
                winner: PublicKey::read(reader)?,
                loser: PublicKey::read(reader)?,
                prize_native: u64::read(reader)?,
                winner_reward: u64::read(reader)?,
                loser_consolation: u64::read(reader)?,
                fee: u64::read(reader)?,
            },
            9 => Self::AchievementAwarded {
                player: PublicKey::read(reader)?,
                count: u64::read(reader)?,
            },
            10 => Self::TreasuryWithdrawn {
                to: PublicKey::read(reader)?,
                amount: u64::read(reader)?,
                remaining: u64::read(reader)?,
            },
            11 => Self::OperationRejected {
                account: PublicKey::read(reader)?,
                error: LedgerError::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(event)
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Configured { admin } => admin.encode_size(),
                Self::NativeDeposited {
                    player,
                    amount,
                    balance,
                } => player.encode_size() + amount.encode_size() + balance.encode_size(),
                Self::TokenDeposited {
                    player,
                    token,
                    amount,
                    balance,
                } => {
                    player.encode_size()
                        + token.encode_size()
                        + amount.encode_size()
                        + balance.encode_size()
                }
                Self::NativeWithdrawn {
                    player,
                    amount,
                    balance,
                } => player.encode_size() + amount.encode_size() + balance.encode_size(),
                Self::TransferOut { to, amount } => to.encode_size() + amount.encode_size(),
                Self::Staked {
                    player,
                    amount,
                    reward,
                    staked,
                    timestamp,
                }
                | Self::Unstaked {
                    player,
                    amount,
                    reward,
                    staked,
                    timestamp,
                } => {
                    player.encode_size()
                        + amount.encode_size()
                        + reward.encode_size()
                        + staked.encode_size()
                        + timestamp.encode_size()
                }
                Self::Swapped {
                    player,
                    token_in,
                    token_out,
                    amount_in,
                    amount_out,
                } => {
                    player.encode_size()
                        + token_in.encode_size()
                        + token_out.encode_size()
                        + amount_in.encode_size()
                        + amount_out.encode_size()
                }
                Self::GameResolved {
                    winner,
                    loser,
                    prize_native,
                    winner_reward,
                    loser_consolation,
                    fee,
                } => {
                    winner.encode_size()
                        + loser.encode_size()
                        + prize_native.encode_size()
                        + winner_reward.encode_size()
                        + loser_consolation.encode_size()
                        + fee.encode_size()
                }
                Self::AchievementAwarded { player, count } => {
                    player.encode_size() + count.encode_size()
                }
                Self::TreasuryWithdrawn {
                    to,
                    amount,
                    remaining,
                } => to.encode_size() + amount.encode_size() + remaining.encode_size(),
                Self::OperationRejected { account, error } => {
                    account.encode_size() + error.encode_size()
                }
            }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Event(Event),
    Call(Call),
}

impl Write for Output {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Event(event) => {
                0u8.write(writer);
                event.write(writer);
            }
            Self::Call(call) => {
                1u8.write(writer);
                call.write(writer);
            }
        }
    }
}

impl Read for Output {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        match kind {
            0 => Ok(Self::Event(Event::read(reader)?)),
            1 => Ok(Self::Call(Call::read(reader)?)),
            _ => Err(Error::InvalidEnum(kind)),
        }
    }
}

impl EncodeSize for Output {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Event(event) => event.encode_size(),
            Self::Call(call) => call.encode_size(),
        }
    }
}
