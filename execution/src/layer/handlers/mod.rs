mod achievements;
mod balances;
mod config;
mod staking;
mod swap;
mod treasury;
