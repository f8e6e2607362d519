use greenquest_core::{
    Dashboard, FlowAction, FlowEvent, HostTask, Modal, Projection, Toast, ToastId,
};
use std::cell::RefCell;
use std::rc::Rc;
use yew::Callback;

/// Browser services needed to carry out a [`HostTask`].
pub trait TaskHost {
    /// Run `job` once, `delay_ms` from now.
    fn after(&self, delay_ms: u32, job: Box<dyn FnOnce()>);
    /// Ask the wallet provider for an account and hand the outcome to `done`.
    fn connect_wallet(&self, done: Box<dyn FnOnce(FlowEvent)>);
    fn alert(&self, message: &str);
    fn open_link(&self, href: &str);
}

/// Everything a render pass reads, copied out of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub projection: Projection,
    pub modal: Option<Modal<FlowAction>>,
    pub toasts: Vec<Toast>,
}

/// Shared access to the page's [`Dashboard`].
///
/// Every dispatch re-renders through `refresh` and then runs the returned
/// host tasks. The dashboard is never borrowed while a task runs, so tasks
/// may dispatch again.
#[derive(Clone)]
pub struct DashboardHandle {
    dashboard: Rc<RefCell<Dashboard>>,
    host: Rc<dyn TaskHost>,
    refresh: Callback<()>,
}

impl DashboardHandle {
    #[must_use]
    pub fn new(dashboard: Dashboard, host: Rc<dyn TaskHost>, refresh: Callback<()>) -> Self {
        Self {
            dashboard: Rc::new(RefCell::new(dashboard)),
            host,
            refresh,
        }
    }

    pub fn dispatch(&self, event: FlowEvent) {
        log::debug!("dispatch {event:?}");
        let tasks = self.dashboard.borrow_mut().dispatch(event);
        self.refresh.emit(());
        self.run(tasks);
    }

    pub fn expire_toast(&self, id: ToastId) {
        let removed = self.dashboard.borrow_mut().expire_toast(id);
        if removed {
            self.refresh.emit(());
        }
    }

    fn run(&self, tasks: Vec<HostTask>) {
        for task in tasks {
            match task {
                HostTask::Resume {
                    continuation,
                    delay_ms,
                } => {
                    let handle = self.clone();
                    self.host.after(
                        delay_ms,
                        Box::new(move || handle.dispatch(FlowEvent::Resume(continuation))),
                    );
                }
                HostTask::RequestWallet => {
                    let handle = self.clone();
                    self.host
                        .connect_wallet(Box::new(move |event| handle.dispatch(event)));
                }
                HostTask::Alert(message) => self.host.alert(&message),
                HostTask::OpenLink(href) => self.host.open_link(&href),
                HostTask::ExpireToast { id, after_ms } => {
                    let handle = self.clone();
                    self.host
                        .after(after_ms, Box::new(move || handle.expire_toast(id)));
                }
            }
        }
    }

    /// Callback that turns a DOM event into a [`FlowEvent`] and dispatches it.
    pub fn on<E: 'static>(&self, to_event: impl Fn(E) -> FlowEvent + 'static) -> Callback<E> {
        let handle = self.clone();
        Callback::from(move |e: E| handle.dispatch(to_event(e)))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let dash = self.dashboard.borrow();
        Snapshot {
            projection: dash.projection().clone(),
            modal: dash.modal().cloned(),
            toasts: dash.toasts().to_vec(),
        }
    }

    pub fn with<R>(&self, read: impl FnOnce(&Dashboard) -> R) -> R {
        read(&self.dashboard.borrow())
    }
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dashboard, &other.dashboard)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TaskHost;
    use futures::executor::block_on;
    use greenquest_core::{FlowEvent, ScriptedWallet, resolve_wallet};
    use std::cell::RefCell;

    type Job = Box<dyn FnOnce()>;

    /// Queues timers until [`QueueHost::flush`]; wallet requests resolve at once.
    pub struct QueueHost {
        pub wallet: ScriptedWallet,
        pub timers: RefCell<Vec<(u32, Job)>>,
        pub alerts: RefCell<Vec<String>>,
        pub links: RefCell<Vec<String>>,
    }

    impl QueueHost {
        pub fn new(wallet: ScriptedWallet) -> Self {
            Self {
                wallet,
                timers: RefCell::new(Vec::new()),
                alerts: RefCell::new(Vec::new()),
                links: RefCell::new(Vec::new()),
            }
        }

        /// Fire every timer with a delay below `limit_ms`, including ones
        /// scheduled while flushing.
        pub fn flush_below(&self, limit_ms: u32) {
            loop {
                let due = {
                    let mut timers = self.timers.borrow_mut();
                    let idx = timers.iter().position(|(delay, _)| *delay < limit_ms);
                    idx.map(|idx| timers.remove(idx))
                };
                let Some((_, job)) = due else {
                    break;
                };
                job();
            }
        }

        pub fn flush(&self) {
            self.flush_below(u32::MAX);
        }
    }

    impl TaskHost for QueueHost {
        fn after(&self, delay_ms: u32, job: Job) {
            self.timers.borrow_mut().push((delay_ms, job));
        }

        fn connect_wallet(&self, done: Box<dyn FnOnce(FlowEvent)>) {
            done(block_on(resolve_wallet(&self.wallet)));
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn open_link(&self, href: &str) {
            self.links.borrow_mut().push(href.to_string());
        }
    }
}
