use greenquest_core::{
    AppState, ConnectionError, Dashboard, FlowEvent, HostTask, Projection, STREAK_MAX,
    WalletAddress,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 6] = [1, 7, 42, 1337, 0xDEAD_BEEF, u64::MAX];
const STEPS: usize = 400;

fn random_event(
    rng: &mut ChaCha8Rng,
    dash: &Dashboard,
    pending: &mut Vec<HostTask>,
) -> FlowEvent {
    // Press a button on the open modal most of the time so flows complete.
    if let Some(modal) = dash.modal() {
        if rng.gen_bool(0.7) && !modal.actions.is_empty() {
            let index = rng.gen_range(0..modal.actions.len());
            return FlowEvent::Action {
                modal: modal.id,
                index,
            };
        }
    }
    if !pending.is_empty() && rng.gen_bool(0.5) {
        let idx = rng.gen_range(0..pending.len());
        match pending.swap_remove(idx) {
            HostTask::Resume { continuation, .. } => return FlowEvent::Resume(continuation),
            HostTask::RequestWallet => {
                let outcome = if rng.gen_bool(0.6) {
                    Ok(WalletAddress::parse("0xABCDEF0000000000000000000000000000001234")
                        .expect("valid address"))
                } else {
                    Err(ConnectionError::Rejected)
                };
                return FlowEvent::WalletResolved(outcome);
            }
            _ => {}
        }
    }
    match rng.gen_range(0..9) {
        0 => FlowEvent::UploadProof,
        1 => FlowEvent::Buy {
            item_id: ["g001", "g002", "g003", "g004"][rng.gen_range(0..4)].into(),
        },
        2 => FlowEvent::ClaimRewards,
        3 => FlowEvent::Vote {
            proposal_id: rng.gen_range(1..=2),
        },
        4 => FlowEvent::JoinSeason,
        5 => FlowEvent::JoinQuest {
            quest_id: "tree-planting".into(),
        },
        6 => FlowEvent::ConnectWallet,
        7 => FlowEvent::DisconnectWallet,
        _ => FlowEvent::Backdrop,
    }
}

#[test]
fn random_flow_sequences_keep_state_in_bounds() {
    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let start = AppState::new(
            rng.gen_range(0..500),
            rng.gen_range(0..10),
            0,
            rng.gen_range(0..=100),
        );
        let mut dash = Dashboard::embedded().unwrap().with_state(start);
        let mut pending = Vec::new();

        for step in 0..STEPS {
            let before = dash.state().clone();
            let event = random_event(&mut rng, &dash, &mut pending);
            let tasks = dash.dispatch(event.clone());
            pending.extend(
                tasks
                    .into_iter()
                    .filter(|t| matches!(t, HostTask::Resume { .. } | HostTask::RequestWallet)),
            );

            let state = dash.state();
            assert!(
                state.streak_percent() <= STREAK_MAX,
                "seed {seed} step {step}: streak {} after {event:?}",
                state.streak_percent()
            );
            assert!(state.within_bounds());
            assert!(state.xp() >= before.xp(), "xp never decreases");
            assert!(state.item_count() >= before.item_count(), "items never decrease");
            assert_eq!(
                dash.projection(),
                &Projection::project(state, dash.catalog()),
                "seed {seed} step {step}: projection stale after {event:?}"
            );
        }
    }
}

#[test]
fn repeated_purchases_floor_at_zero() {
    let mut dash = Dashboard::embedded().unwrap().with_state(AppState::new(0, 7, 0, 0));
    for round in 1..=5_u32 {
        dash.dispatch(FlowEvent::Buy {
            item_id: "g003".into(),
        });
        let modal = dash.modal().expect("buy dialog").id;
        dash.dispatch(FlowEvent::Action { modal, index: 0 });
        assert_eq!(dash.state().tokens(), 7_u32.saturating_sub(3 * round));
        assert_eq!(dash.state().xp(), 10 * round);
    }
}
