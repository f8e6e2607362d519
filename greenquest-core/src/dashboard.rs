use crate::catalog::Catalog;
use crate::config::DemoConfig;
use crate::flow::{Continuation, Effect, FlowAction, FlowEvent, FlowOrchestrator};
use crate::modal::Modal;
use crate::notify::{NotificationQueue, Toast, ToastId};
use crate::state::AppState;
use crate::view::Projection;
use anyhow::Context;

/// Work the core hands back to whatever hosts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostTask {
    /// Dispatch `FlowEvent::Resume(continuation)` after `delay_ms`.
    Resume {
        continuation: Continuation,
        delay_ms: u32,
    },
    /// Await a wallet bridge and dispatch `FlowEvent::WalletResolved`.
    RequestWallet,
    /// Blocking alert.
    Alert(String),
    OpenLink(String),
    /// Call [`Dashboard::expire_toast`] after `after_ms`.
    ExpireToast { id: ToastId, after_ms: u32 },
}

/// Owns the state, catalogs, dialogs and projected views of one page session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    state: AppState,
    catalog: Catalog,
    flows: FlowOrchestrator,
    projection: Projection,
    toasts: NotificationQueue,
}

impl Dashboard {
    #[must_use]
    pub fn new(catalog: Catalog, config: DemoConfig) -> Self {
        let state = config.start.to_state();
        let projection = Projection::project(&state, &catalog);
        Self {
            state,
            catalog,
            flows: FlowOrchestrator::new(config),
            projection,
            toasts: NotificationQueue::default(),
        }
    }

    /// Build from the catalog and config compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if either embedded document fails to parse.
    pub fn embedded() -> anyhow::Result<Self> {
        let catalog = Catalog::embedded().context("loading embedded catalog")?;
        let config = DemoConfig::embedded().context("loading embedded config")?;
        Ok(Self::new(catalog, config))
    }

    /// Replace the starting state, re-projecting every view.
    #[must_use]
    pub fn with_state(mut self, state: AppState) -> Self {
        self.projection = Projection::project(&state, &self.catalog);
        self.state = state;
        self
    }

    /// Feed one event through the flows and apply the resulting renders and
    /// notifications. Whatever needs the host comes back as [`HostTask`]s.
    pub fn dispatch(&mut self, event: FlowEvent) -> Vec<HostTask> {
        let effects = self.flows.handle(&mut self.state, &self.catalog, event);
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::Render(view) => self.projection.apply(view, &self.state, &self.catalog),
                Effect::Notify(text) => {
                    let ttl = self.flows.config().toast_ttl_ms;
                    let id = self.toasts.push(text, ttl);
                    tasks.push(HostTask::ExpireToast { id, after_ms: ttl });
                }
                Effect::Schedule {
                    continuation,
                    delay_ms,
                } => tasks.push(HostTask::Resume {
                    continuation,
                    delay_ms,
                }),
                Effect::RequestWallet => tasks.push(HostTask::RequestWallet),
                Effect::Alert(msg) => tasks.push(HostTask::Alert(msg)),
                Effect::OpenLink(href) => tasks.push(HostTask::OpenLink(href)),
            }
        }
        tasks
    }

    pub fn expire_toast(&mut self, id: ToastId) -> bool {
        self.toasts.expire(id)
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn flows(&self) -> &FlowOrchestrator {
        &self.flows
    }

    #[must_use]
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub const fn modal(&self) -> Option<&Modal<FlowAction>> {
        self.flows.modals().current()
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        self.toasts.visible()
    }
}
