pub mod execution;
pub mod ledger;

pub use execution::{Call, Event, Instruction, Key, Output, Value};
pub use ledger::{GlobalConfig, LedgerError, PlayerState, Token};
