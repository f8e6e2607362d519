use anyhow::{Result, anyhow};
use greenquest_core::{
    AppState, Catalog, ConnectionError, DemoConfig, FlowEvent, Projection, STREAK_MAX,
    ScriptedWallet, WalletAddress,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::driver::Session;

type Check = fn(&mut ChaCha8Rng) -> Result<()>;

/// One named check, run once per seed and iteration.
#[derive(Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    check: Check,
}

impl Scenario {
    const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: Check,
    ) -> Self {
        Self {
            key,
            name,
            description,
            check,
        }
    }

    pub fn run(&self, seed: u64) -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (self.check)(&mut rng)
    }
}

/// Scenarios run by `--scenarios smoke`.
pub const SMOKE: &[&str] = &["mint-flow", "buy-clamp", "claim-with-wallet", "wallet-connect"];

pub fn catalog_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "join-quest",
            "Join Quest Acknowledgement",
            "Joining a quest names it and leaves progress untouched",
            join_quest,
        ),
        Scenario::new(
            "mint-flow",
            "Upload, Verify and Mint",
            "Proof upload verifies after a delay and minting applies rewards on OK",
            mint_flow,
        ),
        Scenario::new(
            "buy-clamp",
            "Marketplace Purchase",
            "Confirmed purchases add xp and floor tokens at zero",
            buy_clamp,
        ),
        Scenario::new(
            "claim-without-wallet",
            "Claim Without Wallet",
            "Claiming while disconnected prompts for a wallet and keeps tokens",
            claim_without_wallet,
        ),
        Scenario::new(
            "claim-with-wallet",
            "Claim With Wallet",
            "Claiming while connected sends every token",
            claim_with_wallet,
        ),
        Scenario::new(
            "wallet-connect",
            "Wallet Connect and Disconnect",
            "Connected addresses show shortened and clear on disconnect",
            wallet_connect,
        ),
        Scenario::new(
            "wallet-unavailable",
            "Wallet Unavailable or Rejected",
            "Missing providers offer an install link; rejections alert",
            wallet_unavailable,
        ),
        Scenario::new(
            "vote-informational",
            "DAO Vote",
            "Voting notifies without changing displayed counts",
            vote_informational,
        ),
        Scenario::new(
            "superseded-continuation",
            "Superseded Verification",
            "A verification delay from an abandoned flow is ignored",
            superseded_continuation,
        ),
        Scenario::new(
            "random-walk",
            "Seeded Random Walk",
            "Random event sequences keep every bound and projection in sync",
            random_walk,
        ),
    ]
}

pub fn find_scenario(key: &str) -> Option<Scenario> {
    catalog_scenarios().into_iter().find(|s| s.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .into_iter()
        .map(|s| (s.key, s.description))
        .collect()
}

fn random_state(rng: &mut ChaCha8Rng) -> AppState {
    AppState::new(
        rng.gen_range(0..2_500),
        rng.gen_range(0..60),
        rng.gen_range(0..6),
        rng.gen_range(0..=STREAK_MAX),
    )
}

fn random_address(rng: &mut ChaCha8Rng) -> String {
    let digits: String = (0..40)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect();
    format!("0x{}", digits.to_uppercase())
}

fn catalog() -> Result<Catalog> {
    Ok(Catalog::embedded()?)
}

fn join_quest(rng: &mut ChaCha8Rng) -> Result<()> {
    let quests = catalog()?.quests;
    let quest = quests
        .choose(rng)
        .ok_or_else(|| anyhow!("catalog has no quests"))?;
    let start = random_state(rng);
    let mut session = Session::new(start.clone(), ScriptedWallet::missing())?;

    session.send(FlowEvent::JoinQuest {
        quest_id: quest.id.clone(),
    });
    session.expect_title("Join Quest")?;
    let body = session
        .dashboard()
        .modal()
        .and_then(|m| m.body.first())
        .map(greenquest_core::BodyBlock::plain_text)
        .unwrap_or_default();
    anyhow::ensure!(body.contains(&quest.title), "body `{body}` lacks quest title");

    session.press("Got it")?;
    anyhow::ensure!(session.title().is_none(), "join dialog stayed open");
    anyhow::ensure!(session.state() == &start, "joining changed progress");
    Ok(())
}

fn mint_flow(rng: &mut ChaCha8Rng) -> Result<()> {
    let reward = DemoConfig::default().mint;
    let start = random_state(rng);
    let mut session = Session::new(start.clone(), ScriptedWallet::missing())?;

    session.send(FlowEvent::UploadProof);
    session.expect_title("Upload Proof")?;
    session.press("Upload & Verify")?;
    anyhow::ensure!(session.title().is_none(), "upload dialog stayed open");
    anyhow::ensure!(session.pending_resumes() == 1, "no verification delay queued");
    session.settle();
    session.expect_title("Verified!")?;

    session.press("Mint NFT")?;
    session.expect_title("Minting NFT")?;
    anyhow::ensure!(session.state() == &start, "rewards applied before acknowledgement");
    session.press("OK")?;

    let state = session.state();
    anyhow::ensure!(
        state.item_count() == start.item_count().saturating_add(reward.items),
        "items {} after minting from {}",
        state.item_count(),
        start.item_count()
    );
    anyhow::ensure!(state.xp() == start.xp().saturating_add(reward.xp), "xp mismatch");
    anyhow::ensure!(
        state.tokens() == start.tokens().saturating_add(reward.tokens),
        "tokens mismatch"
    );
    let streak = start
        .streak_percent()
        .saturating_add(reward.streak)
        .min(STREAK_MAX);
    anyhow::ensure!(
        state.streak_percent() == streak,
        "streak {} expected {streak}",
        state.streak_percent()
    );
    anyhow::ensure!(
        session.toast_texts() == ["NFT minted successfully! 🎉"],
        "unexpected toasts {:?}",
        session.toast_texts()
    );
    Ok(())
}

fn buy_clamp(rng: &mut ChaCha8Rng) -> Result<()> {
    let terms = DemoConfig::default().purchase;
    let market = catalog()?.market;
    let item = market
        .choose(rng)
        .ok_or_else(|| anyhow!("catalog has no market items"))?;
    let tokens = rng.gen_range(0..=terms.cost * 2);
    let start = AppState::new(rng.gen_range(0..500), tokens, 0, 0);
    let mut session = Session::new(start.clone(), ScriptedWallet::missing())?;

    session.send(FlowEvent::Buy {
        item_id: item.id.clone(),
    });
    session.expect_title("Buy NFT")?;
    session.press("Confirm Buy")?;

    let state = session.state();
    anyhow::ensure!(
        state.tokens() == tokens.saturating_sub(terms.cost),
        "tokens {} after buying with {tokens}",
        state.tokens()
    );
    anyhow::ensure!(state.xp() == start.xp() + terms.xp, "xp bonus missing");
    anyhow::ensure!(
        session.toast_texts() == ["Purchase successful (demo)."],
        "unexpected toasts {:?}",
        session.toast_texts()
    );
    Ok(())
}

fn claim_without_wallet(rng: &mut ChaCha8Rng) -> Result<()> {
    let start = random_state(rng);
    let mut session = Session::new(start.clone(), ScriptedWallet::missing())?;

    session.send(FlowEvent::ClaimRewards);
    session.expect_title("Wallet Required")?;
    session.press("Close")?;
    anyhow::ensure!(session.title().is_none(), "prompt stayed open");
    anyhow::ensure!(
        session.state().tokens() == start.tokens(),
        "tokens moved without a wallet"
    );
    Ok(())
}

fn claim_with_wallet(rng: &mut ChaCha8Rng) -> Result<()> {
    let start = random_state(rng);
    let address = random_address(rng);
    let mut session = Session::new(start.clone(), ScriptedWallet::approving(&address))?;

    session.send(FlowEvent::ConnectWallet);
    session.settle();
    anyhow::ensure!(session.state().is_connected(), "wallet did not connect");

    session.send(FlowEvent::ClaimRewards);
    session.expect_title("Claim Rewards")?;
    session.press("Claim")?;
    anyhow::ensure!(session.state().tokens() == 0, "tokens left after claim");
    anyhow::ensure!(
        session.dashboard().projection().stats.tokens == 0,
        "stats view not refreshed"
    );
    anyhow::ensure!(
        session.toast_texts() == ["Rewards sent! (simulated BlockDAG tx)"],
        "unexpected toasts {:?}",
        session.toast_texts()
    );
    Ok(())
}

fn wallet_connect(rng: &mut ChaCha8Rng) -> Result<()> {
    let address = random_address(rng);
    let expected = WalletAddress::parse(&address)
        .ok_or_else(|| anyhow!("generated address `{address}` rejected"))?
        .shortened();
    let mut session = Session::new(AppState::default(), ScriptedWallet::approving(&address))?;

    session.send(FlowEvent::ConnectWallet);
    // A second click while the request is pending must not reach the provider.
    session.send(FlowEvent::ConnectWallet);
    session.settle();
    anyhow::ensure!(
        session.wallet().requests() == 1,
        "{} provider requests for one connect",
        session.wallet().requests()
    );
    let label = &session.dashboard().projection().wallet.address_label;
    anyhow::ensure!(label == &expected, "label `{label}` expected `{expected}`");

    session.send(FlowEvent::DisconnectWallet);
    let wallet = &session.dashboard().projection().wallet;
    anyhow::ensure!(!wallet.connected, "still connected after disconnect");
    anyhow::ensure!(wallet.address_label == "Not connected", "stale address label");
    Ok(())
}

fn wallet_unavailable(_rng: &mut ChaCha8Rng) -> Result<()> {
    let mut session = Session::new(AppState::default(), ScriptedWallet::missing())?;
    session.send(FlowEvent::ConnectWallet);
    session.settle();
    session.expect_title("No Web3 Provider")?;
    session.press("Install MetaMask")?;
    anyhow::ensure!(
        session.links == [DemoConfig::default().provider_install_url],
        "install link not opened: {:?}",
        session.links
    );

    let mut session = Session::new(AppState::default(), ScriptedWallet::rejecting())?;
    session.send(FlowEvent::ConnectWallet);
    session.settle();
    anyhow::ensure!(
        session.alerts == ["Connection rejected or failed."],
        "unexpected alerts {:?}",
        session.alerts
    );
    anyhow::ensure!(!session.state().is_connected(), "rejected wallet connected");

    // Errors the bridge reports directly take the same path.
    let mut session = Session::new(AppState::default(), ScriptedWallet::missing())?;
    session.send(FlowEvent::WalletResolved(Err(ConnectionError::NoAccounts)));
    anyhow::ensure!(session.alerts.len() == 1, "empty account list not reported");
    Ok(())
}

fn vote_informational(rng: &mut ChaCha8Rng) -> Result<()> {
    let proposals = catalog()?.proposals;
    let proposal = proposals
        .choose(rng)
        .ok_or_else(|| anyhow!("catalog has no proposals"))?;
    let mut session = Session::new(AppState::default(), ScriptedWallet::missing())?;
    let before = session.dashboard().projection().proposals.clone();

    session.send(FlowEvent::Vote {
        proposal_id: proposal.id,
    });
    session.expect_title("Vote")?;
    session.press("Vote Yes")?;
    anyhow::ensure!(
        session.dashboard().projection().proposals == before,
        "vote counts changed"
    );
    anyhow::ensure!(
        session.toast_texts() == ["Vote recorded (simulated)."],
        "unexpected toasts {:?}",
        session.toast_texts()
    );
    session.expire_toasts();
    anyhow::ensure!(session.toast_texts().is_empty(), "toast outlived its expiry");
    Ok(())
}

fn superseded_continuation(rng: &mut ChaCha8Rng) -> Result<()> {
    let start = random_state(rng);
    let mut session = Session::new(start.clone(), ScriptedWallet::missing())?;

    session.send(FlowEvent::UploadProof);
    session.press("Upload & Verify")?;
    session.send(FlowEvent::JoinSeason);
    session.settle();
    session.expect_title("Seasonal Challenge")?;
    anyhow::ensure!(session.state() == &start, "stale continuation applied");
    Ok(())
}

const WALK_STEPS: usize = 300;

fn random_event(rng: &mut ChaCha8Rng, session: &Session) -> FlowEvent {
    if let Some(modal) = session.dashboard().modal() {
        if rng.gen_bool(0.7) && !modal.actions.is_empty() {
            return FlowEvent::Action {
                modal: modal.id,
                index: rng.gen_range(0..modal.actions.len()),
            };
        }
    }
    match rng.gen_range(0..10) {
        0 => FlowEvent::UploadProof,
        1 => FlowEvent::Buy {
            item_id: ["g001", "g002", "g003", "g004", "g999"][rng.gen_range(0..5)].into(),
        },
        2 => FlowEvent::ClaimRewards,
        3 => FlowEvent::Vote {
            proposal_id: rng.gen_range(1..=3),
        },
        4 => FlowEvent::JoinSeason,
        5 => FlowEvent::JoinQuest {
            quest_id: "tree-planting".into(),
        },
        6 => FlowEvent::ConnectWallet,
        7 => FlowEvent::DisconnectWallet,
        8 => FlowEvent::Backdrop,
        _ => session.dashboard().modal().map_or(FlowEvent::Backdrop, |m| {
            // Out-of-range button on whatever is open.
            FlowEvent::Action {
                modal: m.id,
                index: m.actions.len() + 1,
            }
        }),
    }
}

fn random_walk(rng: &mut ChaCha8Rng) -> Result<()> {
    let address = random_address(rng);
    let wallet = if rng.gen_bool(0.5) {
        ScriptedWallet::approving(&address)
    } else {
        ScriptedWallet::rejecting()
    };
    let mut session = Session::new(random_state(rng), wallet)?;
    let catalog = catalog()?;

    for step in 0..WALK_STEPS {
        let before = session.state().clone();
        let event = random_event(rng, &session);
        log::trace!("step {step}: {event:?}");
        session.send(event);
        if rng.gen_bool(0.3) {
            session.settle();
        }
        if rng.gen_bool(0.2) {
            session.expire_toasts();
        }

        let state = session.state();
        anyhow::ensure!(state.within_bounds(), "bounds broken at step {step}");
        anyhow::ensure!(state.xp() >= before.xp(), "xp fell at step {step}");
        anyhow::ensure!(
            state.item_count() >= before.item_count(),
            "items fell at step {step}"
        );
        anyhow::ensure!(
            session.dashboard().projection() == &Projection::project(state, &catalog),
            "views out of sync with state at step {step}"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_smoke_is_covered() {
        let scenarios = catalog_scenarios();
        let mut keys: Vec<_> = scenarios.iter().map(|s| s.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), scenarios.len());
        for key in SMOKE {
            assert!(find_scenario(key).is_some(), "smoke scenario {key} missing");
        }
    }

    #[test]
    fn every_scenario_passes_on_sample_seeds() {
        for scenario in catalog_scenarios() {
            for seed in [1, 1337, u64::MAX] {
                if let Err(err) = scenario.run(seed) {
                    panic!("{} failed for seed {seed}: {err:#}", scenario.key);
                }
            }
        }
    }

    #[test]
    fn random_addresses_are_well_formed() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let address = random_address(&mut rng);
        assert_eq!(address.len(), 42);
        assert!(WalletAddress::parse(&address).is_some());
    }
}
