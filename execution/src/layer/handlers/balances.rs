use super::super::*;

impl<'a, S: State> Layer<'a, S> {
    pub(in crate::layer) async fn handle_deposit_native(
        &mut self,
        public: &PublicKey,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let mut player = self.player(public).await?;
        player.native_balance = player
            .native_balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        let balance = player.native_balance;
        self.put_player(public, player);

        Ok(vec![Event::NativeDeposited {
            player: public.clone(),
            amount,
            balance,
        }])
    }

    pub(in crate::layer) async fn handle_deposit_token(
        &mut self,
        public: &PublicKey,
        token_id: u64,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let config = self.config().await?;
        let token = config
            .resolve_token(token_id)
            .ok_or(LedgerError::UnknownToken { token_id })?;

        let mut player = self.player(public).await?;
        let balance = player
            .token_balance(token)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;
        *player.token_balance_mut(token) = balance;
        self.put_player(public, player);

        Ok(vec![Event::TokenDeposited {
            player: public.clone(),
            token,
            amount,
            balance,
        }])
    }

    pub(in crate::layer) async fn handle_withdraw_native(
        &mut self,
        public: &PublicKey,
        amount: u64,
    ) -> Result<Vec<Event>, LayerError> {
        let mut player = self.player(public).await?;
        if player.native_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                balance: player.native_balance,
                required: amount,
            }
            .into());
        }
        player.native_balance -= amount;
        let balance = player.native_balance;
        self.put_player(public, player);

        Ok(vec![
            Event::NativeWithdrawn {
                player: public.clone(),
                amount,
                balance,
            },
            Event::TransferOut {
                to: public.clone(),
                amount,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::create_account_keypair;
    use crate::state::Memory;
    use arcade_types::ledger::Token;
    use commonware_runtime::deterministic::Runner;
    use commonware_runtime::Runner as _;

    const TOKEN_A: u64 = 11;
    const TOKEN_B: u64 = 22;

    async fn configured_layer<'a>(
        state: &'a Memory,
        admin: &PublicKey,
        now: u64,
    ) -> Layer<'a, Memory> {
        let mut layer = Layer::new(state, now);
        layer
            .apply(&Call {
                caller: admin.clone(),
                instruction: Instruction::Configure {
                    token_a_id: TOKEN_A,
                    token_b_id: TOKEN_B,
                    stake_reward_rate: 0,
                    token_a_price: 0,
                    token_b_price: 0,
                },
            })
            .await
            .unwrap();
        layer
    }

    #[test]
    fn test_deposit_and_withdraw_native() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, public) = create_account_keypair(1);
            let mut layer = Layer::new(&state, 0);

            let events = layer.handle_deposit_native(&public, 300).await.unwrap();
            assert_eq!(
                events,
                vec![Event::NativeDeposited {
                    player: public.clone(),
                    amount: 300,
                    balance: 300,
                }]
            );

            let events = layer.handle_withdraw_native(&public, 120).await.unwrap();
            assert_eq!(
                events,
                vec![
                    Event::NativeWithdrawn {
                        player: public.clone(),
                        amount: 120,
                        balance: 180,
                    },
                    Event::TransferOut {
                        to: public.clone(),
                        amount: 120,
                    },
                ]
            );

            let record = load_player(&layer, &public).await.unwrap();
            assert_eq!(record.native_balance, 180);
        });
    }

    #[test]
    fn test_withdraw_more_than_balance_rejected() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, public) = create_account_keypair(1);
            let mut layer = Layer::new(&state, 0);
            layer.handle_deposit_native(&public, 50).await.unwrap();

            let result = layer.handle_withdraw_native(&public, 51).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::InsufficientBalance {
                    balance: 50,
                    required: 51,
                }))
            ));
        });
    }

    #[test]
    fn test_deposit_native_overflow_rejected() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, public) = create_account_keypair(1);
            let mut layer = Layer::new(&state, 0);
            layer
                .handle_deposit_native(&public, u64::MAX)
                .await
                .unwrap();

            let result = layer.handle_deposit_native(&public, 1).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::InvalidAmount))
            ));
        });
    }

    #[test]
    fn test_deposit_token_resolves_configured_ids() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, admin) = create_account_keypair(99);
            let (_, public) = create_account_keypair(1);
            let mut layer = configured_layer(&state, &admin, 0).await;

            let events = layer
                .handle_deposit_token(&public, TOKEN_B, 40)
                .await
                .unwrap();
            assert_eq!(
                events,
                vec![Event::TokenDeposited {
                    player: public.clone(),
                    token: Token::B,
                    amount: 40,
                    balance: 40,
                }]
            );

            let result = layer.handle_deposit_token(&public, 12345, 40).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::UnknownToken {
                    token_id: 12345
                }))
            ));
        });
    }

    #[test]
    fn test_deposit_token_requires_configuration() {
        let executor = Runner::default();
        executor.start(|_| async move {
            let state = Memory::default();
            let (_, public) = create_account_keypair(1);
            let mut layer = Layer::new(&state, 0);

            let result = layer.handle_deposit_token(&public, TOKEN_A, 40).await;
            assert!(matches!(
                result,
                Err(LayerError::Ledger(LedgerError::NotConfigured))
            ));
        });
    }
}
