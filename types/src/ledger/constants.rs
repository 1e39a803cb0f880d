/// Fixed-point divisor for `stake_reward_rate`, letting fractional per-second
/// rates be expressed as integers: reward = staked * rate * elapsed / REWARD_SCALE.
pub const REWARD_SCALE: u128 = 1_000_000;

/// Default reference price of token A in native units.
pub const DEFAULT_TOKEN_A_PRICE: u64 = 10_000;

/// Default reference price of token B in native units.
pub const DEFAULT_TOKEN_B_PRICE: u64 = 1_000;

/// Default staking reward rate (scaled by [`REWARD_SCALE`]).
pub const DEFAULT_STAKE_REWARD_RATE: u64 = 1;

/// Multiplier applied to a game prize before price-denominating the winner's
/// token B reward and the loser's token A consolation.
pub const MARKET_REWARD_MULTIPLIER: u128 = 1_000;

/// Divisor for the platform fee collected into the treasury on game
/// resolution (10% of the resolved prize, floor division).
pub const TREASURY_FEE_DIVISOR: u64 = 10;
