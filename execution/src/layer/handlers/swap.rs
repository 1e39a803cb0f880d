use super::super::*;
#[cfg(test)]
use arcade_types::ledger::Token;

/// Reference-price conversion: `floor(amount_in * price_in / price_out)`.
/// The intermediate product is u128 so two u64 factors cannot overflow.
fn quote(amount_in: u64, price_in: u64, price_out: u64) -> Result<u64, LedgerError> {
    let out = (amount_in as u128) * (price_in as u128) / (price_out as u128);
    u64::try_from(out).map_err(|_| LedgerError::InvalidAmount)
}

impl<'a, S: State> Layer<'a, S> {
    pub(in crate::layer) async fn handle_swap(
        &mut self,
        public: &PublicKey,
        token_in: u64,
        token_out: u64,
        amount_in: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let config = self.config().await?;
        let unsupported = LedgerError::UnsupportedPair {
            token_in,
            token_out,
        };
        let token_in = config.resolve_token(token_in).ok_or(unsupported.clone())?;
        let token_out = config.resolve_token(token_out).ok_or(unsupported.clone())?;
        if token_in == token_out {
            return Err(unsupported.into());
        }

        let price_in = config.price(token_in);
        let price_out = config.price(token_out);
        if price_in == 0 || price_out == 0 {
            return Err(LedgerError::NotConfigured.into());
        }

        let mut player = self.player(public).await?;
        let balance_in = player.token_balance(token_in);
        if balance_in < amount_in {
            return Err(LedgerError::InsufficientBalance {
                balance: balance_in,
                required: amount_in,
            }
            .into());
        }

        let amount_out = quote(amount_in, price_in, price_out)?;
        let credited = player
            .token_balance(token_out)
            .checked_add(amount_out)
            .ok_or(LedgerError::InvalidAmount)?;
        *player.token_balance_mut(token_in) = balance_in - amount_in;
        *player.token_balance_mut(token_out) = credited;
        self.put_player(public, player);

        Ok(vec![Event::Swapped {
            player: public.clone(),
            token_in,
            token_out,
            amount_in,
            amount_out,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::create_account_keypair;
    use crate::state::Memory;
    use commonware_runtime::deterministic::Runner;
    use commonware_runtime::Runner as _;

    const TOKEN_A: u64 = 11;
    const TOKEN_B: u64 = 22;

    async fn setup<'a>(state: &'a Memory, admin: &PublicKey) -> Layer<'a, Memory> {
        let mut layer = Layer::new(state, 0);
        // Defaults: A at 10_000 native units, B at 1_000.
        layer
            .handle_configure(admin, TOKEN_A, TOKEN_B, 0, 0, 0)
            .await
            .unwrap();
        layer
    }

    #[test]
    fn test_quote_floors() {
        assert_eq!(quote(1, 10_000, 1_000).unwrap(), 10);
        assert_eq!(quote(1, 1_000, 10_000).unwrap(), 0);
        assert_eq!(quote(19, 1_000, 10_000).unwrap(), 1);
    }

    #[test]
    fn test_swap_a_for_b_at_reference_prices() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, admin) = create_account_keypair(99);
            let (_, public) = create_account_keypair(1);
            let mut layer = setup(&state, &admin).await;
            layer
                .handle_deposit_token(&public, TOKEN_A, 5)
                .await
                .unwrap();

            // 5 A * 10_000 / 1_000 = 50 B.
            let events = layer
                .handle_swap(&public, TOKEN_A, TOKEN_B, 5)
                .await
                .unwrap();
            assert_eq!(
                events,
                vec![Event::Swapped {
                    player: public.clone(),
                    token_in: Token::A,
                    token_out: Token::B,
                    amount_in: 5,
                    amount_out: 50,
                }]
            );

            let record = load_player(&layer, &public).await.unwrap();
            assert_eq!(record.token_a_balance, 0);
            assert_eq!(record.token_b_balance, 50);
        });
    }

    #[test]
    fn test_swap_round_trip_is_lossy_only_by_flooring() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, admin) = create_account_keypair(99);
            let (_, public) = create_account_keypair(1);
            let mut layer = setup(&state, &admin).await;
            layer
                .handle_deposit_token(&public, TOKEN_B, 15)
                .await
                .unwrap();

            // 15 B * 1_000 / 10_000 floors to 1 A; swapping back yields 10 B.
            layer
                .handle_swap(&public, TOKEN_B, TOKEN_A, 15)
                .await
                .unwrap();
            let record = load_player(&layer, &public).await.unwrap();
            assert_eq!(record.token_a_balance, 1);
            assert_eq!(record.token_b_balance, 0);

            layer
                .handle_swap(&public, TOKEN_A, TOKEN_B, 1)
                .await
                .unwrap();
            let record = load_player(&layer, &public).await.unwrap();
            assert_eq!(record.token_a_balance, 0);
            assert_eq!(record.token_b_balance, 10);
        });
    }

    #[test]
    fn test_swap_rejects_bad_pairs() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, admin) = create_account_keypair(99);
            let (_, public) = create_account_keypair(1);
            let mut layer = setup(&state, &admin).await;

            let result = layer.handle_swap(&public, TOKEN_A, TOKEN_A, 5).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::UnsupportedPair { .. }))
            ));

            let result = layer.handle_swap(&public, TOKEN_A, 777, 5).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::UnsupportedPair {
                    token_in: TOKEN_A,
                    token_out: 777,
                }))
            ));
        });
    }

    #[test]
    fn test_swap_rejects_insufficient_balance() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, admin) = create_account_keypair(99);
            let (_, public) = create_account_keypair(1);
            let mut layer = setup(&state, &admin).await;
            layer
                .handle_deposit_token(&public, TOKEN_A, 4)
                .await
                .unwrap();

            let result = layer.handle_swap(&public, TOKEN_A, TOKEN_B, 5).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::InsufficientBalance {
                    balance: 4,
                    required: 5,
                }))
            ));
        });
    }
}
