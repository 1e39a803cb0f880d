use super::Token;
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// Per-account ledger record.
///
/// Created lazily with all fields zero on the first mutating operation that
/// touches an account, and always read-modified-written as a unit.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub native_balance: u64,
    pub token_a_balance: u64,
    pub token_b_balance: u64,
    pub staked_token_a: u64,
    /// Reserved for token B staking; no current operation mutates it.
    pub staked_token_b: u64,
    /// Monotonically non-decreasing achievement counter.
    pub achievement_count: u64,
    /// Seconds since epoch of the last stake/unstake; 0 if never staked.
    pub last_stake_timestamp: u64,
}

impl PlayerState {
    /// True once the account holds token A stake; `last_stake_timestamp` is
    /// only meaningful in this state.
    pub fn is_staked(&self) -> bool {
        self.staked_token_a > 0
    }

    pub fn token_balance(&self, token: Token) -> u64 {
        match token {
            Token::A => self.token_a_balance,
            Token::B => self.token_b_balance,
        }
    }

    pub fn token_balance_mut(&mut self, token: Token) -> &mut u64 {
        match token {
            Token::A => &mut self.token_a_balance,
            Token::B => &mut self.token_b_balance,
        }
    }
}

impl Write for PlayerState {
    fn write(&self, writer: &mut impl BufMut) {
        self.native_balance.write(writer);
        self.token_a_balance.write(writer);
        self.token_b_balance.write(writer);
        self.staked_token_a.write(writer);
        self.staked_token_b.write(writer);
        self.achievement_count.write(writer);
        self.last_stake_timestamp.write(writer);
    }
}

impl Read for PlayerState {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            native_balance: u64::read(reader)?,
            token_a_balance: u64::read(reader)?,
            token_b_balance: u64::read(reader)?,
            staked_token_a: u64::read(reader)?,
            staked_token_b: u64::read(reader)?,
            achievement_count: u64::read(reader)?,
            last_stake_timestamp: u64::read(reader)?,
        })
    }
}

impl EncodeSize for PlayerState {
    fn encode_size(&self) -> usize {
        self.native_balance.encode_size()
            + self.token_a_balance.encode_size()
            + self.token_b_balance.encode_size()
            + self.staked_token_a.encode_size()
            + self.staked_token_b.encode_size()
            + self.achievement_count.encode_size()
            + self.last_stake_timestamp.encode_size()
    }
}
