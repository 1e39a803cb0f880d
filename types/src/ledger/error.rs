use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use thiserror::Error as ThisError;

/// Recoverable, typed failure of a ledger operation.
///
/// Every failure leaves all touched records unchanged; there is no silent
/// clamping. Encodable so rejections can travel in the event stream.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance (have={balance}, need={required})")]
    InsufficientBalance { balance: u64, required: u64 },
    #[error("insufficient staked tokens (have={staked}, need={required})")]
    InsufficientStaked { staked: u64, required: u64 },
    #[error("unknown token id {token_id}")]
    UnknownToken { token_id: u64 },
    #[error("unsupported swap pair ({token_in} -> {token_out})")]
    UnsupportedPair { token_in: u64, token_out: u64 },
    #[error("caller is not the configured admin")]
    Unauthorized,
    #[error("treasury insufficient (have={available}, need={required})")]
    TreasuryInsufficient { available: u64, required: u64 },
    #[error("amount outside the integer domain")]
    InvalidAmount,
    #[error("platform not configured")]
    NotConfigured,
}

impl Write for LedgerError {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::InsufficientBalance { balance, required } => {
                0u8.write(writer);
                balance.write(writer);
                required.write(writer);
            }
            Self::InsufficientStaked { staked, required } => {
                1u8.write(writer);
                staked.write(writer);
                required.write(writer);
            }
            Self::UnknownToken { token_id } => {
                2u8.write(writer);
                token_id.write(writer);
            }
            Self::UnsupportedPair {
                token_in,
                token_out,
            } => {
                3u8.write(writer);
                token_in.write(writer);
                token_out.write(writer);
            }
            Self::Unauthorized => 4u8.write(writer),
            Self::TreasuryInsufficient {
                available,
                required,
            } => {
                5u8.write(writer);
                available.write(writer);
                required.write(writer);
            }
            Self::InvalidAmount => 6u8.write(writer),
            Self::NotConfigured => 7u8.write(writer),
        }
    }
}

impl Read for LedgerError {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let error = match u8::read(reader)? {
            0 => Self::InsufficientBalance {
                balance: u64::read(reader)?,
                required: u64::read(reader)?,
            },
            1 => Self::InsufficientStaked {
                staked: u64::read(reader)?,
                required: u64::read(reader)?,
            },
            2 => Self::UnknownToken {
                token_id: u64::read(reader)?,
            },
            3 => Self::UnsupportedPair {
                token_in: u64::read(reader)?,
                token_out: u64::read(reader)?,
            },
            4 => Self::Unauthorized,
            5 => Self::TreasuryInsufficient {
                available: u64::read(reader)?,
                required: u64::read(reader)?,
            },
            6 => Self::InvalidAmount,
            7 => Self::NotConfigured,
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(error)
    }
}

impl EncodeSize for LedgerError {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::InsufficientBalance { balance, required } => {
                balance.encode_size() + required.encode_size()
            }
            Self::InsufficientStaked { staked, required } => {
                staked.encode_size() + required.encode_size()
            }
            Self::UnknownToken { token_id } => token_id.encode_size(),
            Self::UnsupportedPair {
                token_in,
                token_out,
            } => token_in.encode_size() + token_out.encode_size(),
            Self::Unauthorized => 0,
            Self::TreasuryInsufficient {
                available,
                required,
            } => available.encode_size() + required.encode_size(),
            Self::InvalidAmount => 0,
            Self::NotConfigured => 0,
        }
    }
}
