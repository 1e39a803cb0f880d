//! Ledger domain types.
//!
//! Defines the per-player record, the platform configuration singleton, and the
//! error kinds shared by the execution layer and clients.

mod config;
mod constants;
mod error;
mod player;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use player::*;
