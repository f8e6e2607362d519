//! Interaction flows as explicit state machines.
//!
//! Every flow goes Idle → awaiting one or more confirmations → applied. Only
//! one flow is active at a time; starting another supersedes it, and any
//! continuation the superseded flow scheduled is dropped when it fires.

use crate::catalog::Catalog;
use crate::config::DemoConfig;
use crate::modal::{BodyBlock, Inline, ModalAction, ModalController, ModalId, ModalSpec, Selection};
use crate::state::{AppState, WalletAddress};
use crate::view::View;
use crate::wallet::{ConnectionError, WalletBridge};

/// Payloads carried by modal buttons back into the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    AcknowledgeQuest,
    SubmitProof,
    Mint,
    AcknowledgeMint,
    ConfirmBuy,
    ConfirmClaim,
    ConnectFromPrompt,
    VoteYes,
    AcknowledgeSeason,
}

/// Resume token for a delayed step, tied to the flow that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Continuation {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    JoinQuest { quest_id: String },
    UploadProof,
    Buy { item_id: String },
    ClaimRewards,
    Vote { proposal_id: u32 },
    JoinSeason,
    ConnectWallet,
    DisconnectWallet,
    /// Button `index` of modal `modal` was pressed.
    Action { modal: ModalId, index: usize },
    Backdrop,
    Resume(Continuation),
    WalletResolved(Result<WalletAddress, ConnectionError>),
}

/// Side effects of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(View),
    Notify(String),
    Schedule {
        continuation: Continuation,
        delay_ms: u32,
    },
    RequestWallet,
    Alert(String),
    OpenLink(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    AwaitingProof,
    Verifying,
    AwaitingMint,
    Minting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStage {
    WalletRequired,
    AwaitingConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    JoinQuest { quest_id: String },
    Upload(UploadStage),
    Buy { item_id: String },
    Claim(ClaimStage),
    Vote { proposal_id: u32 },
    Season,
    NoProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveFlow {
    generation: u64,
    flow: Flow,
}

/// Await the bridge and wrap the outcome for [`FlowOrchestrator::handle`].
pub async fn resolve_wallet<B: WalletBridge + ?Sized>(bridge: &B) -> FlowEvent {
    FlowEvent::WalletResolved(bridge.request_connection().await)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOrchestrator {
    config: DemoConfig,
    modals: ModalController<FlowAction>,
    active: Option<ActiveFlow>,
    generation: u64,
    wallet_pending: bool,
}

impl FlowOrchestrator {
    #[must_use]
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            modals: ModalController::new(),
            active: None,
            generation: 0,
            wallet_pending: false,
        }
    }

    #[must_use]
    pub const fn modals(&self) -> &ModalController<FlowAction> {
        &self.modals
    }

    #[must_use]
    pub fn active(&self) -> Option<&Flow> {
        self.active.as_ref().map(|a| &a.flow)
    }

    #[must_use]
    pub const fn wallet_pending(&self) -> bool {
        self.wallet_pending
    }

    #[must_use]
    pub const fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn handle(
        &mut self,
        state: &mut AppState,
        catalog: &Catalog,
        event: FlowEvent,
    ) -> Vec<Effect> {
        match event {
            FlowEvent::JoinQuest { quest_id } => self.start_join_quest(catalog, quest_id),
            FlowEvent::UploadProof => self.start_upload(),
            FlowEvent::Buy { item_id } => self.start_buy(catalog, item_id),
            FlowEvent::ClaimRewards => self.start_claim(state),
            FlowEvent::Vote { proposal_id } => self.start_vote(catalog, proposal_id),
            FlowEvent::JoinSeason => self.start_season(),
            FlowEvent::ConnectWallet => self.request_wallet(),
            FlowEvent::DisconnectWallet => {
                if state.disconnect_wallet().is_some() {
                    log::info!("wallet disconnected");
                }
                vec![Effect::Render(View::Wallet), Effect::Render(View::Stats)]
            }
            FlowEvent::Action { modal, index } => self.on_action(state, modal, index),
            FlowEvent::Backdrop => {
                if self.modals.backdrop_click() {
                    self.finish("dismissed via backdrop");
                }
                Vec::new()
            }
            FlowEvent::Resume(continuation) => self.resume(continuation),
            FlowEvent::WalletResolved(outcome) => self.on_wallet_resolved(state, outcome),
        }
    }

    fn begin(&mut self, flow: Flow, spec: ModalSpec<FlowAction>) {
        if let Some(prev) = self.active.take() {
            log::debug!("flow {:?} superseded by {flow:?}", prev.flow);
        }
        self.generation += 1;
        log::debug!("flow {flow:?} started (generation {})", self.generation);
        self.active = Some(ActiveFlow {
            generation: self.generation,
            flow,
        });
        self.modals.open(spec);
    }

    fn set_stage(&mut self, flow: Flow) {
        if let Some(active) = self.active.as_mut() {
            log::debug!("flow {:?} -> {flow:?}", active.flow);
            active.flow = flow;
        }
    }

    fn finish(&mut self, reason: &str) {
        if let Some(done) = self.active.take() {
            log::debug!("flow {:?} finished: {reason}", done.flow);
        }
    }

    fn start_join_quest(&mut self, catalog: &Catalog, quest_id: String) -> Vec<Effect> {
        let Some(quest) = catalog.quest(&quest_id) else {
            log::warn!("join requested for unknown quest `{quest_id}`");
            return Vec::new();
        };
        let spec = ModalSpec::new("Join Quest")
            .body(BodyBlock::Paragraph(vec![
                Inline::Text("You joined ".into()),
                Inline::Strong(quest.title.clone()),
                Inline::Text(". Upload proof to complete it and mint your badge.".into()),
            ]))
            .action(ModalAction::primary("Got it", FlowAction::AcknowledgeQuest))
            .action(ModalAction::dismiss("Close"));
        self.begin(Flow::JoinQuest { quest_id }, spec);
        Vec::new()
    }

    fn start_upload(&mut self) -> Vec<Effect> {
        let spec = ModalSpec::new("Upload Proof")
            .paragraph("Upload a photo or QR as proof of action.")
            .body(BodyBlock::FileInput {
                id: "proofFile".into(),
                accept: "image/*".into(),
            })
            .action(ModalAction::primary("Upload & Verify", FlowAction::SubmitProof))
            .action(ModalAction::dismiss("Cancel"));
        self.begin(Flow::Upload(UploadStage::AwaitingProof), spec);
        Vec::new()
    }

    fn start_buy(&mut self, catalog: &Catalog, item_id: String) -> Vec<Effect> {
        let Some(item) = catalog.market_item(&item_id) else {
            log::warn!("buy requested for unknown item `{item_id}`");
            return Vec::new();
        };
        let spec = ModalSpec::new("Buy NFT")
            .paragraph(format!(
                "Buy {} ({}) — this would open the marketplace flow via a smart contract in a real app.",
                item.title, item.id
            ))
            .action(ModalAction::primary("Confirm Buy", FlowAction::ConfirmBuy))
            .action(ModalAction::dismiss("Cancel"));
        self.begin(Flow::Buy { item_id }, spec);
        Vec::new()
    }

    fn wallet_required_spec() -> ModalSpec<FlowAction> {
        ModalSpec::new("Wallet Required")
            .paragraph("Please connect wallet to claim rewards.")
            .action(ModalAction::primary("Connect", FlowAction::ConnectFromPrompt))
            .action(ModalAction::dismiss("Close"))
    }

    fn start_claim(&mut self, state: &AppState) -> Vec<Effect> {
        let Some(wallet) = state.wallet() else {
            self.begin(
                Flow::Claim(ClaimStage::WalletRequired),
                Self::wallet_required_spec(),
            );
            return Vec::new();
        };
        let spec = ModalSpec::new("Claim Rewards")
            .paragraph(format!(
                "Claiming {} tokens to {} via fast tx (simulated).",
                state.tokens(),
                wallet.shortened()
            ))
            .action(ModalAction::primary("Claim", FlowAction::ConfirmClaim))
            .action(ModalAction::dismiss("Cancel"));
        self.begin(Flow::Claim(ClaimStage::AwaitingConfirmation), spec);
        Vec::new()
    }

    fn start_vote(&mut self, catalog: &Catalog, proposal_id: u32) -> Vec<Effect> {
        if catalog.proposal(proposal_id).is_none() {
            log::warn!("vote requested for unknown proposal {proposal_id}");
            return Vec::new();
        }
        let spec = ModalSpec::new("Vote")
            .paragraph(format!("Cast your vote on proposal {proposal_id}."))
            .action(ModalAction::primary("Vote Yes", FlowAction::VoteYes))
            .action(ModalAction::dismiss("No"));
        self.begin(Flow::Vote { proposal_id }, spec);
        Vec::new()
    }

    fn start_season(&mut self) -> Vec<Effect> {
        let spec = ModalSpec::new("Seasonal Challenge")
            .paragraph("You joined the seasonal challenge! Top players win a rare NFT.")
            .action(ModalAction::primary("OK", FlowAction::AcknowledgeSeason));
        self.begin(Flow::Season, spec);
        Vec::new()
    }

    fn request_wallet(&mut self) -> Vec<Effect> {
        if self.wallet_pending {
            log::debug!("wallet request already pending");
            return Vec::new();
        }
        self.wallet_pending = true;
        vec![Effect::RequestWallet]
    }

    fn on_action(&mut self, state: &mut AppState, modal: ModalId, index: usize) -> Vec<Effect> {
        match self.modals.select(modal, index) {
            Selection::Dispatch(action) => self.apply_action(state, action),
            Selection::Closed => {
                self.finish("dismissed");
                Vec::new()
            }
            Selection::Link(href) => vec![Effect::OpenLink(href)],
            Selection::Stale => {
                log::debug!("ignoring press on stale modal {modal:?} button {index}");
                Vec::new()
            }
        }
    }

    fn apply_action(&mut self, state: &mut AppState, action: FlowAction) -> Vec<Effect> {
        let stage = self.active().cloned();
        match (action, stage) {
            (FlowAction::AcknowledgeQuest, Some(Flow::JoinQuest { .. }))
            | (FlowAction::AcknowledgeSeason, Some(Flow::Season)) => {
                self.modals.close();
                self.finish("acknowledged");
                Vec::new()
            }
            (FlowAction::SubmitProof, Some(Flow::Upload(UploadStage::AwaitingProof))) => {
                self.modals.close();
                self.set_stage(Flow::Upload(UploadStage::Verifying));
                vec![Effect::Schedule {
                    continuation: Continuation {
                        generation: self.generation,
                    },
                    delay_ms: self.config.verify_delay_ms,
                }]
            }
            (FlowAction::Mint, Some(Flow::Upload(UploadStage::AwaitingMint))) => {
                self.modals.close();
                self.set_stage(Flow::Upload(UploadStage::Minting));
                self.modals.open(
                    ModalSpec::new("Minting NFT")
                        .paragraph(
                            "Your badge NFT is being minted (demo). This will simulate a blockchain transaction.",
                        )
                        .action(ModalAction::primary("OK", FlowAction::AcknowledgeMint)),
                );
                Vec::new()
            }
            (FlowAction::AcknowledgeMint, Some(Flow::Upload(UploadStage::Minting))) => {
                self.modals.close();
                self.finish("minted");
                state.apply_mint(&self.config.mint);
                vec![
                    Effect::Render(View::Stats),
                    Effect::Render(View::Gallery),
                    Effect::Render(View::Leaderboard),
                    Effect::Notify("NFT minted successfully! 🎉".into()),
                ]
            }
            (FlowAction::ConfirmBuy, Some(Flow::Buy { item_id })) => {
                self.modals.close();
                self.finish("purchased");
                state.apply_purchase(&self.config.purchase);
                log::info!("bought {item_id}");
                vec![
                    Effect::Render(View::Stats),
                    Effect::Notify("Purchase successful (demo).".into()),
                ]
            }
            (FlowAction::ConfirmClaim, Some(Flow::Claim(ClaimStage::AwaitingConfirmation))) => {
                if !state.is_connected() {
                    log::warn!("wallet disconnected before claim confirmation");
                    self.set_stage(Flow::Claim(ClaimStage::WalletRequired));
                    self.modals.open(Self::wallet_required_spec());
                    return Vec::new();
                }
                self.modals.close();
                self.finish("claimed");
                let claimed = state.drain_tokens();
                log::info!("claimed {claimed} tokens");
                vec![
                    Effect::Notify("Rewards sent! (simulated BlockDAG tx)".into()),
                    Effect::Render(View::Stats),
                ]
            }
            (FlowAction::ConnectFromPrompt, Some(Flow::Claim(ClaimStage::WalletRequired))) => {
                self.modals.close();
                self.finish("connecting wallet");
                self.request_wallet()
            }
            (FlowAction::VoteYes, Some(Flow::Vote { proposal_id })) => {
                self.modals.close();
                self.finish("voted");
                log::info!("vote cast on proposal {proposal_id}");
                vec![Effect::Notify("Vote recorded (simulated).".into())]
            }
            (action, stage) => {
                log::warn!("action {action:?} does not apply to flow {stage:?}");
                Vec::new()
            }
        }
    }

    fn resume(&mut self, continuation: Continuation) -> Vec<Effect> {
        let current = self
            .active
            .as_ref()
            .filter(|a| a.generation == continuation.generation)
            .map(|a| a.flow.clone());
        if current != Some(Flow::Upload(UploadStage::Verifying)) {
            log::debug!("dropping superseded continuation {continuation:?}");
            return Vec::new();
        }
        self.set_stage(Flow::Upload(UploadStage::AwaitingMint));
        self.modals.open(
            ModalSpec::new("Verified!")
                .paragraph("Proof verified. Mint your NFT badge?")
                .action(ModalAction::primary("Mint NFT", FlowAction::Mint))
                .action(ModalAction::dismiss("Later")),
        );
        Vec::new()
    }

    fn on_wallet_resolved(
        &mut self,
        state: &mut AppState,
        outcome: Result<WalletAddress, ConnectionError>,
    ) -> Vec<Effect> {
        self.wallet_pending = false;
        match outcome {
            Ok(address) => {
                log::info!("wallet connected: {}", address.shortened());
                state.connect_wallet(address);
                vec![Effect::Render(View::Wallet), Effect::Render(View::Stats)]
            }
            Err(ConnectionError::Unavailable) => {
                let spec = ModalSpec::new("No Web3 Provider")
                    .paragraph(
                        "MetaMask or another Web3 wallet was not detected in your browser. For demo you can continue as guest, or install MetaMask.",
                    )
                    .action(ModalAction::link(
                        "Install MetaMask",
                        self.config.provider_install_url.clone(),
                    ))
                    .action(ModalAction::dismiss("Close"));
                self.begin(Flow::NoProvider, spec);
                Vec::new()
            }
            Err(err @ (ConnectionError::Rejected | ConnectionError::NoAccounts)) => {
                log::error!("wallet connection failed: {err}");
                vec![Effect::Alert("Connection rejected or failed.".into())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rig {
        flows: FlowOrchestrator,
        state: AppState,
        catalog: Catalog,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                flows: FlowOrchestrator::new(DemoConfig::default()),
                state: AppState::default(),
                catalog: Catalog::embedded().unwrap(),
            }
        }

        fn send(&mut self, event: FlowEvent) -> Vec<Effect> {
            self.flows.handle(&mut self.state, &self.catalog, event)
        }

        fn press(&mut self, label: &str) -> Vec<Effect> {
            let modal = self.flows.modals().current().expect("modal open");
            let index = modal
                .actions
                .iter()
                .position(|a| a.label == label)
                .unwrap_or_else(|| panic!("no `{label}` button on `{}`", modal.title));
            let id = modal.id;
            self.send(FlowEvent::Action { modal: id, index })
        }

        fn title(&self) -> Option<&str> {
            self.flows.modals().current().map(|m| m.title.as_str())
        }
    }

    fn continuation(effects: &[Effect]) -> Continuation {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Schedule { continuation, .. } => Some(*continuation),
                _ => None,
            })
            .expect("schedule effect")
    }

    #[test]
    fn join_quest_names_the_quest_and_closes() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::JoinQuest {
            quest_id: "beach-cleanup".into(),
        });
        let body = rig.flows.modals().current().unwrap().body[0].plain_text();
        assert!(body.contains("Beach Cleanup"));
        let before = rig.state.clone();
        assert!(rig.press("Got it").is_empty());
        assert!(rig.title().is_none());
        assert!(rig.flows.active().is_none());
        assert_eq!(rig.state, before);
    }

    #[test]
    fn upload_waits_for_continuation_before_verifying() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::UploadProof);
        let effects = rig.press("Upload & Verify");
        assert!(rig.title().is_none());
        assert_eq!(
            rig.flows.active(),
            Some(&Flow::Upload(UploadStage::Verifying))
        );
        let token = continuation(&effects);
        rig.send(FlowEvent::Resume(token));
        assert_eq!(rig.title(), Some("Verified!"));
        // A duplicate timer firing does nothing further.
        rig.send(FlowEvent::Resume(token));
        assert_eq!(rig.title(), Some("Verified!"));
    }

    #[test]
    fn superseded_continuation_cannot_steal_the_slot() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::UploadProof);
        let token = continuation(&rig.press("Upload & Verify"));
        rig.send(FlowEvent::Vote { proposal_id: 1 });
        rig.send(FlowEvent::Resume(token));
        assert_eq!(rig.title(), Some("Vote"));
        assert_eq!(rig.flows.active(), Some(&Flow::Vote { proposal_id: 1 }));
    }

    #[test]
    fn later_ends_the_mint_flow() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::UploadProof);
        let token = continuation(&rig.press("Upload & Verify"));
        rig.send(FlowEvent::Resume(token));
        rig.press("Later");
        assert!(rig.flows.active().is_none());
        assert_eq!(rig.state, AppState::default());
    }

    #[test]
    fn stale_button_press_is_ignored() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::Buy {
            item_id: "g001".into(),
        });
        let stale = rig.flows.modals().current().unwrap().id;
        rig.send(FlowEvent::JoinSeason);
        let effects = rig.send(FlowEvent::Action {
            modal: stale,
            index: 0,
        });
        assert!(effects.is_empty());
        assert_eq!(rig.state.tokens(), 45);
        assert_eq!(rig.title(), Some("Seasonal Challenge"));
    }

    #[test]
    fn unknown_catalog_ids_do_not_open_modals() {
        let mut rig = Rig::new();
        assert!(rig.send(FlowEvent::Buy { item_id: "zzz".into() }).is_empty());
        rig.send(FlowEvent::Vote { proposal_id: 99 });
        rig.send(FlowEvent::JoinQuest {
            quest_id: "nope".into(),
        });
        assert!(rig.title().is_none());
    }

    #[test]
    fn backdrop_cancels_the_active_flow() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::Buy {
            item_id: "g003".into(),
        });
        rig.send(FlowEvent::Backdrop);
        assert!(rig.title().is_none());
        assert!(rig.flows.active().is_none());
        assert!(rig.send(FlowEvent::Backdrop).is_empty());
    }

    #[test]
    fn claim_rechecks_wallet_on_confirmation() {
        let mut rig = Rig::new();
        rig.state
            .connect_wallet(WalletAddress::parse("0xABCDEF0000001234").unwrap());
        rig.send(FlowEvent::ClaimRewards);
        assert_eq!(rig.title(), Some("Claim Rewards"));
        assert_eq!(
            rig.send(FlowEvent::DisconnectWallet),
            vec![Effect::Render(View::Wallet), Effect::Render(View::Stats)]
        );
        let effects = rig.press("Claim");
        assert!(effects.is_empty());
        assert_eq!(rig.title(), Some("Wallet Required"));
        assert_eq!(rig.state.tokens(), 45);
    }

    #[test]
    fn wallet_prompt_requests_connection_once() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::ClaimRewards);
        assert_eq!(rig.press("Connect"), vec![Effect::RequestWallet]);
        assert!(rig.title().is_none());
        assert!(rig.flows.wallet_pending());
        assert!(rig.send(FlowEvent::ConnectWallet).is_empty());
    }

    #[test]
    fn unavailable_provider_offers_install_link() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::ConnectWallet);
        rig.send(FlowEvent::WalletResolved(Err(ConnectionError::Unavailable)));
        assert_eq!(rig.title(), Some("No Web3 Provider"));
        assert_eq!(
            rig.press("Install MetaMask"),
            vec![Effect::OpenLink("https://metamask.io".into())]
        );
        rig.press("Close");
        assert!(rig.title().is_none());
        assert!(!rig.state.is_connected());
    }

    #[test]
    fn rejection_raises_alert_without_state_change() {
        let mut rig = Rig::new();
        rig.send(FlowEvent::ConnectWallet);
        let effects = rig.send(FlowEvent::WalletResolved(Err(ConnectionError::Rejected)));
        assert_eq!(
            effects,
            vec![Effect::Alert("Connection rejected or failed.".into())]
        );
        assert_eq!(rig.state, AppState::default());
        assert!(!rig.flows.wallet_pending());
    }
}
