use super::handle::DashboardHandle;
use crate::components::footer::Footer;
use crate::components::gallery::Gallery;
use crate::components::header::Header;
use crate::components::hero::Hero;
use crate::components::leaderboard::{Layout, Leaderboard};
use crate::components::market::MarketGrid;
use crate::components::modal_host::ModalHost;
use crate::components::particle_canvas::ParticleCanvas;
use crate::components::proposals::ProposalList;
use crate::components::quests::QuestList;
use crate::components::stats_panel::StatsPanel;
use crate::components::toast_stack::ToastStack;
use greenquest_core::{FlowEvent, ModalId, ToastId};
use yew::prelude::*;

/// Seed for the background particles. Decorative, so one fixed value is enough.
pub const PARTICLE_SEED: u64 = 0x6772_6565_6e71;

pub fn render_page(handle: &DashboardHandle) -> Html {
    let snapshot = handle.snapshot();
    let projection = snapshot.projection;
    let status = crate::a11y::status_message(snapshot.modal.as_ref().map(|m| m.title.as_str()));

    let on_connect = handle.on(|()| FlowEvent::ConnectWallet);
    let on_disconnect = handle.on(|()| FlowEvent::DisconnectWallet);
    let on_join_season = handle.on(|()| FlowEvent::JoinSeason);
    let on_join_quest = handle.on(|quest_id: String| FlowEvent::JoinQuest { quest_id });
    let on_upload = handle.on(|()| FlowEvent::UploadProof);
    let on_claim = handle.on(|()| FlowEvent::ClaimRewards);
    let on_buy = handle.on(|item_id: String| FlowEvent::Buy { item_id });
    let on_vote = handle.on(|proposal_id: u32| FlowEvent::Vote { proposal_id });
    let on_action =
        handle.on(|(modal, index): (ModalId, usize)| FlowEvent::Action { modal, index });
    let on_backdrop = handle.on(|()| FlowEvent::Backdrop);
    let on_dismiss_toast = {
        let handle = handle.clone();
        Callback::from(move |id: ToastId| handle.expire_toast(id))
    };

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <ParticleCanvas seed={PARTICLE_SEED} />
            <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite">
                { status }
            </div>
            <Header wallet={projection.wallet.clone()} {on_connect} {on_disconnect} />
            <main id="main">
                <Hero {on_join_season} />
                <QuestList quests={projection.quests.clone()} on_join={on_join_quest} {on_upload} />
                <StatsPanel stats={projection.stats.clone()} {on_claim}>
                    <Leaderboard leaderboard={projection.leaderboard.clone()} layout={Layout::Preview} />
                </StatsPanel>
                <Gallery gallery={projection.gallery.clone()} />
                <MarketGrid tiles={projection.market.clone()} {on_buy} />
                <ProposalList proposals={projection.proposals.clone()} {on_vote} />
                <Leaderboard leaderboard={projection.leaderboard} layout={Layout::Ranked} />
            </main>
            <Footer />
            <ModalHost modal={snapshot.modal} {on_action} {on_backdrop} />
            <ToastStack toasts={snapshot.toasts} on_dismiss={on_dismiss_toast} />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handle::testing::QueueHost;
    use futures::executor::block_on;
    use greenquest_core::{Dashboard, ScriptedWallet};
    use std::rc::Rc;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct PageProps {
        handle: DashboardHandle,
    }

    #[function_component(Page)]
    fn page(props: &PageProps) -> Html {
        render_page(&props.handle)
    }

    fn handle() -> DashboardHandle {
        DashboardHandle::new(
            Dashboard::embedded().unwrap(),
            Rc::new(QueueHost::new(ScriptedWallet::missing())),
            Callback::noop(),
        )
    }

    fn render(handle: DashboardHandle) -> String {
        block_on(LocalServerRenderer::<Page>::with_props(PageProps { handle }).render())
    }

    #[test]
    fn page_renders_every_section() {
        let html = render(handle());
        let sections = [
            "quests",
            "dashboard",
            "gallery",
            "market",
            "dao",
            "leaderboard",
            "bgCanvas",
        ];
        for id in sections {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(html.contains("Not connected"));
        assert!(html.contains("Connect Wallet"));
        assert!(html.contains("0.02 ETH"));
        assert!(html.contains("Votes: 1240"));
        assert!(html.contains("4. You — 120 XP"));
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn page_shows_open_modal_and_updated_stats() {
        let handle = handle();
        handle.dispatch(FlowEvent::Buy {
            item_id: "g003".into(),
        });
        let html = render(handle.clone());
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Buy NFT"));
        assert!(html.contains("Confirm Buy"));
        assert!(html.contains("Buy NFT dialog open"));

        let modal = handle.snapshot().modal.unwrap().id;
        handle.dispatch(FlowEvent::Action { modal, index: 0 });
        let html = render(handle);
        assert!(!html.contains("role=\"dialog\""));
        assert!(!html.contains("dialog open"));
        assert!(html.contains("Purchase successful (demo)."));
        assert!(html.contains("4.2 GOV"));
    }
}
