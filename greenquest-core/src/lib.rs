//! GreenQuest core
//!
//! Platform-agnostic state, flows and view projections for the GreenQuest
//! sustainability demo. This crate has no UI or browser dependencies; hosts
//! drive a [`Dashboard`] and carry out the [`HostTask`]s it returns.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod flow;
pub mod modal;
pub mod notify;
pub mod particles;
pub mod state;
pub mod view;
pub mod wallet;

pub use catalog::{Catalog, CatalogError, LeaderboardEntry, MarketItem, Proposal, Quest};
pub use config::{ConfigError, DemoConfig, StartingState};
pub use dashboard::{Dashboard, HostTask};
pub use flow::{
    ClaimStage, Continuation, Effect, Flow, FlowAction, FlowEvent, FlowOrchestrator, UploadStage,
    resolve_wallet,
};
pub use modal::{
    ActionKind, ActionStyle, BodyBlock, Inline, Modal, ModalAction, ModalController, ModalId,
    ModalSpec, Selection,
};
pub use notify::{NotificationQueue, Toast, ToastId};
pub use particles::{Particle, ParticleField};
pub use state::{AppState, MintReward, PurchaseTerms, STREAK_MAX, WalletAddress, wallet_label};
pub use view::{Projection, View};
pub use wallet::{ConnectionError, Script, ScriptedWallet, WalletBridge};
