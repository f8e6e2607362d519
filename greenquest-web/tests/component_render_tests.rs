use futures::executor::block_on;
use greenquest_core::{AppState, Catalog, Dashboard, FlowEvent, Projection};
use greenquest_web::app::{DashboardHandle, TaskHost, load_dashboard};
use greenquest_web::components::footer::Footer;
use greenquest_web::components::header::{Header, NAV_LINKS};
use greenquest_web::components::proposals::ProposalList;
use greenquest_web::components::stats_panel::StatsPanel;
use std::cell::RefCell;
use std::rc::Rc;
use yew::html::ChildrenRenderer;
use yew::{Callback, LocalServerRenderer};

/// Drops every timer; records dialogs.
#[derive(Default)]
struct InertHost {
    alerts: RefCell<Vec<String>>,
}

impl TaskHost for InertHost {
    fn after(&self, _delay_ms: u32, _job: Box<dyn FnOnce()>) {}

    fn connect_wallet(&self, done: Box<dyn FnOnce(FlowEvent)>) {
        done(FlowEvent::WalletResolved(Err(
            greenquest_core::ConnectionError::Rejected,
        )));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn open_link(&self, _href: &str) {}
}

fn projection(state: &AppState) -> Projection {
    Projection::project(state, &Catalog::embedded().expect("catalog parses"))
}

#[test]
fn header_lists_every_section_link() {
    let props = greenquest_web::components::header::Props {
        wallet: projection(&AppState::default()).wallet,
        on_connect: Callback::noop(),
        on_disconnect: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    for (label, href) in NAV_LINKS {
        assert!(html.contains(label), "missing nav label {label}");
        assert!(html.contains(&format!("href=\"{href}\"")), "missing {href}");
    }
    assert!(html.contains("connectBtn"));
    assert!(html.contains("disconnectBtn"));
}

#[test]
fn footer_renders_disclaimer() {
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("<footer>"));
    assert!(html.contains("simulated"));
}

#[test]
fn stats_panel_hosts_children() {
    let props = greenquest_web::components::stats_panel::Props {
        stats: projection(&AppState::new(2000, 7, 0, 100)).stats,
        on_claim: Callback::noop(),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<StatsPanel>::with_props(props).render());
    assert!(html.contains("width: 100%"));
    assert!(html.contains("0.7 GOV"));
    assert!(html.contains("id=\"dashboard\""));
}

#[test]
fn proposal_votes_render_unchanged() {
    let props = greenquest_web::components::proposals::Props {
        proposals: projection(&AppState::default()).proposals,
        on_vote: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ProposalList>::with_props(props).render());
    assert!(html.contains("Plant 10k trees (India)"));
    assert!(html.contains("Votes: 870"));
    assert!(html.contains("data-voteid=\"2\""));
}

#[test]
fn handle_forwards_alerts_to_host() {
    let host = Rc::new(InertHost::default());
    let handle = DashboardHandle::new(load_dashboard(), host.clone(), Callback::noop());
    handle.dispatch(FlowEvent::ConnectWallet);
    assert_eq!(
        host.alerts.borrow().as_slice(),
        ["Connection rejected or failed."]
    );
    assert!(handle.with(|d: &Dashboard| !d.state().is_connected()));
}
