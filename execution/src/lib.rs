//! Arcade execution layer.
//!
//! This crate contains the deterministic ledger execution logic (`Layer`) over
//! a pluggable state store: a durable authenticated database for production and
//! an in-memory map for tests.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside execution; the host passes `now` once
//!   per batch.
//! - Avoid iteration order of hash-based collections influencing outputs.
//!
//! The primary entrypoint is [`Layer`]: stage a batch of [`arcade_types::Call`]s
//! against a read-only state snapshot, then persist the committed changeset.
//!
//! ```rust,ignore
//! # #[cfg(feature = "mocks")]
//! # async fn example(state: &mut /* Adb<...> */ ()) -> anyhow::Result<()> {
//! use arcade_execution::{Layer, State};
//!
//! let mut layer = Layer::new(state, /* now */ 1_700_000_000);
//! let outputs = layer.execute(/* calls */ vec![]).await?;
//! let changes = layer.commit();
//! State::apply(state, changes).await?;
//! # Ok(())
//! # }
//! ```

mod layer;
mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use layer::{Layer, LayerError};
pub use state::{load_config, load_player, Adb, State, Status};

#[cfg(any(test, feature = "mocks"))]
pub use state::Memory;

#[cfg(test)]
mod store_tests;
