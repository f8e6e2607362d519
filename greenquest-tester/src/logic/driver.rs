use anyhow::{Context, Result, anyhow};
use futures::executor::block_on;
use greenquest_core::{
    AppState, Continuation, Dashboard, FlowEvent, HostTask, ScriptedWallet, ToastId,
    resolve_wallet,
};

/// Plays the host's part for a [`Dashboard`] without a browser.
///
/// Tasks queue until the scenario asks for them, so timers can be fired
/// late, out of order, or not at all.
#[derive(Debug)]
pub struct Session {
    dash: Dashboard,
    wallet: ScriptedWallet,
    resumes: Vec<Continuation>,
    wallet_requests: usize,
    expiries: Vec<ToastId>,
    pub alerts: Vec<String>,
    pub links: Vec<String>,
}

impl Session {
    pub fn new(state: AppState, wallet: ScriptedWallet) -> Result<Self> {
        let dash = Dashboard::embedded()
            .context("building dashboard from embedded data")?
            .with_state(state);
        Ok(Self {
            dash,
            wallet,
            resumes: Vec::new(),
            wallet_requests: 0,
            expiries: Vec::new(),
            alerts: Vec::new(),
            links: Vec::new(),
        })
    }

    pub const fn dashboard(&self) -> &Dashboard {
        &self.dash
    }

    pub const fn state(&self) -> &AppState {
        self.dash.state()
    }

    pub const fn wallet(&self) -> &ScriptedWallet {
        &self.wallet
    }

    pub fn title(&self) -> Option<&str> {
        self.dash.modal().map(|m| m.title.as_str())
    }

    pub fn pending_resumes(&self) -> usize {
        self.resumes.len()
    }

    pub fn send(&mut self, event: FlowEvent) {
        log::trace!("send {event:?}");
        let tasks = self.dash.dispatch(event);
        self.queue(tasks);
    }

    fn queue(&mut self, tasks: Vec<HostTask>) {
        for task in tasks {
            match task {
                HostTask::Resume { continuation, .. } => self.resumes.push(continuation),
                HostTask::RequestWallet => self.wallet_requests += 1,
                HostTask::Alert(message) => self.alerts.push(message),
                HostTask::OpenLink(href) => self.links.push(href),
                HostTask::ExpireToast { id, .. } => self.expiries.push(id),
            }
        }
    }

    /// Press the open modal's button labelled `label`.
    pub fn press(&mut self, label: &str) -> Result<()> {
        let modal = self
            .dash
            .modal()
            .ok_or_else(|| anyhow!("no modal open to press `{label}`"))?;
        let index = modal
            .actions
            .iter()
            .position(|a| a.label == label)
            .ok_or_else(|| anyhow!("`{}` has no `{label}` button", modal.title))?;
        let id = modal.id;
        self.send(FlowEvent::Action { modal: id, index });
        Ok(())
    }

    pub fn expect_title(&self, expected: &str) -> Result<()> {
        let actual = self.title();
        anyhow::ensure!(
            actual == Some(expected),
            "expected modal `{expected}`, found {actual:?}"
        );
        Ok(())
    }

    /// Fire queued timers and answer wallet requests until none remain.
    pub fn settle(&mut self) {
        loop {
            if let Some(continuation) = self.resumes.pop() {
                self.send(FlowEvent::Resume(continuation));
            } else if self.wallet_requests > 0 {
                self.wallet_requests -= 1;
                let event = block_on(resolve_wallet(&self.wallet));
                self.send(event);
            } else {
                break;
            }
        }
    }

    /// Fire every pending toast expiry.
    pub fn expire_toasts(&mut self) {
        for id in std::mem::take(&mut self.expiries) {
            self.dash.expire_toast(id);
        }
    }

    pub fn toast_texts(&self) -> Vec<&str> {
        self.dash.toasts().iter().map(|t| t.text.as_str()).collect()
    }
}
