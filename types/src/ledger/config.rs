use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;

/// One of the two platform-defined fungible tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    A,
    B,
}

/// Platform configuration singleton.
///
/// Written once at configuration time and thereafter only by the admin;
/// absence of the record means the platform is not yet configured. The
/// treasury accumulators live here so game resolution mutates a single
/// singleton alongside the player records it touches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalConfig {
    pub admin: PublicKey,
    /// Opaque token identifiers; 0 means "not yet configured" and never
    /// resolves.
    pub token_a_id: u64,
    pub token_b_id: u64,
    /// Reward units per staked unit per elapsed second, scaled by
    /// [`crate::ledger::REWARD_SCALE`].
    pub stake_reward_rate: u64,
    /// Reference prices in native-currency units, used symmetrically for
    /// swap conversion and prize denomination.
    pub token_a_price: u64,
    pub token_b_price: u64,
    pub treasury_native: u64,
    pub treasury_token_a: u64,
    pub treasury_token_b: u64,
}

impl GlobalConfig {
    pub fn new(
        admin: PublicKey,
        token_a_id: u64,
        token_b_id: u64,
        stake_reward_rate: u64,
        token_a_price: u64,
        token_b_price: u64,
    ) -> Self {
        Self {
            admin,
            token_a_id,
            token_b_id,
            stake_reward_rate,
            token_a_price,
            token_b_price,
            treasury_native: 0,
            treasury_token_a: 0,
            treasury_token_b: 0,
        }
    }

    /// Resolves an opaque token identifier against the configured ids.
    /// An unconfigured id (0) never matches.
    pub fn resolve_token(&self, token_id: u64) -> Option<Token> {
        if token_id == 0 {
            None
        } else if token_id == self.token_a_id {
            Some(Token::A)
        } else if token_id == self.token_b_id {
            Some(Token::B)
        } else {
            None
        }
    }

    /// Reference price of a token in native units.
    pub fn price(&self, token: Token) -> u64 {
        match token {
            Token::A => self.token_a_price,
            Token::B => self.token_b_price,
        }
    }
}

impl Write for GlobalConfig {
    fn write(&self, writer: &mut impl BufMut) {
        self.admin.write(writer);
        self.token_a_id.write(writer);
        self.token_b_id.write(writer);
        self.stake_reward_rate.write(writer);
        self.token_a_price.write(writer);
        self.token_b_price.write(writer);
        self.treasury_native.write(writer);
        self.treasury_token_a.write(writer);
        self.treasury_token_b.write(writer);
    }
}

impl Read for GlobalConfig {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            admin: PublicKey::read(reader)?,
            token_a_id: u64::read(reader)?,
            token_b_id: u64::read(reader)?,
            stake_reward_rate: u64::read(reader)?,
            token_a_price: u64::read(reader)?,
            token_b_price: u64::read(reader)?,
            treasury_native: u64::read(reader)?,
            treasury_token_a: u64::read(reader)?,
            treasury_token_b: u64::read(reader)?,
        })
    }
}

impl EncodeSize for GlobalConfig {
    fn encode_size(&self) -> usize {
        self.admin.encode_size()
            + self.token_a_id.encode_size()
            + self.token_b_id.encode_size()
            + self.stake_reward_rate.encode_size()
            + self.token_a_price.encode_size()
            + self.token_b_price.encode_size()
            + self.treasury_native.encode_size()
            + self.treasury_token_a.encode_size()
            + self.treasury_token_b.encode_size()
    }
}

impl Write for Token {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::A => 0u8.write(writer),
            Self::B => 1u8.write(writer),
        }
    }
}

impl Read for Token {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::A),
            1 => Ok(Self::B),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Token {
    fn encode_size(&self) -> usize {
        1
    }
}
