//! End-to-end tests of the execution layer over the durable state database.

use crate::mocks::{create_account_keypair, create_adb};
use crate::{load_player, Layer, State};
use arcade_types::{Call, Event, Instruction, Output};
use commonware_runtime::deterministic::Runner;
use commonware_runtime::Runner as _;

const TOKEN_A: u64 = 11;
const TOKEN_B: u64 = 22;

#[test]
fn test_ledger_lifecycle_over_adb() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut state = create_adb(&context).await;
        let (_, admin) = create_account_keypair(99);
        let (_, player) = create_account_keypair(1);
        let (_, loser) = create_account_keypair(2);

        // First batch: configure, fund, stake.
        let mut layer = Layer::new(&state, 0);
        let outputs = layer
            .execute(vec![
                Call {
                    caller: admin.clone(),
                    instruction: Instruction::Configure {
                        token_a_id: TOKEN_A,
                        token_b_id: TOKEN_B,
                        stake_reward_rate: 1,
                        token_a_price: 0,
                        token_b_price: 0,
                    },
                },
                Call {
                    caller: player.clone(),
                    instruction: Instruction::DepositToken {
                        token_id: TOKEN_A,
                        amount: 1_000,
                    },
                },
                Call {
                    caller: player.clone(),
                    instruction: Instruction::Stake { amount: 600 },
                },
            ])
            .await
            .unwrap();
        assert!(outputs.iter().any(|output| matches!(
            output,
            Output::Event(Event::Staked {
                amount: 600,
                staked: 600,
                ..
            })
        )));
        let changes = layer.commit();
        State::apply(&mut state, changes).await.unwrap();
        state.sync().await.unwrap();

        let record = load_player(&state, &player).await.unwrap();
        assert_eq!(record.token_a_balance, 400);
        assert_eq!(record.staked_token_a, 600);

        // Second batch, one reward period later: unstake part of the position
        // and settle a game.
        let mut layer = Layer::new(&state, 1_000_000);
        let outputs = layer
            .execute(vec![
                Call {
                    caller: player.clone(),
                    instruction: Instruction::Unstake { amount: 100 },
                },
                Call {
                    caller: admin.clone(),
                    instruction: Instruction::ResolveGame {
                        winner: player.clone(),
                        loser: loser.clone(),
                        prize_native: 1_000,
                    },
                },
            ])
            .await
            .unwrap();
        assert!(outputs.iter().any(|output| matches!(
            output,
            Output::Event(Event::Unstaked {
                amount: 100,
                reward: 600,
                staked: 500,
                ..
            })
        )));
        assert!(outputs.iter().any(|output| matches!(
            output,
            Output::Event(Event::GameResolved {
                winner_reward: 1_000,
                loser_consolation: 100,
                fee: 100,
                ..
            })
        )));
        let changes = layer.commit();
        State::apply(&mut state, changes).await.unwrap();
        state.sync().await.unwrap();

        let record = load_player(&state, &player).await.unwrap();
        assert_eq!(record.token_a_balance, 1_100);
        assert_eq!(record.staked_token_a, 500);
        assert_eq!(record.token_b_balance, 1_000);
        let record = load_player(&state, &loser).await.unwrap();
        assert_eq!(record.token_a_balance, 100);

        // Third batch: pay the accumulated fee back out of the treasury.
        let mut layer = Layer::new(&state, 1_000_000);
        let outputs = layer
            .execute(vec![Call {
                caller: admin.clone(),
                instruction: Instruction::TreasuryWithdraw {
                    to: player.clone(),
                    amount: 100,
                },
            }])
            .await
            .unwrap();
        assert!(outputs.iter().any(|output| matches!(
            output,
            Output::Event(Event::TreasuryWithdrawn {
                amount: 100,
                remaining: 0,
                ..
            })
        )));
        let changes = layer.commit();
        State::apply(&mut state, changes).await.unwrap();
        state.sync().await.unwrap();

        let record = load_player(&state, &player).await.unwrap();
        assert_eq!(record.native_balance, 100);
    });
}
