use crate::dom;
use greenquest_core::view::WalletView;
use yew::prelude::*;

/// In-page navigation targets, in display order.
pub const NAV_LINKS: [(&str, &str); 5] = [
    ("Quests", "#quests"),
    ("Dashboard", "#dashboard"),
    ("Marketplace", "#market"),
    ("DAO", "#dao"),
    ("Leaderboard", "#leaderboard"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub wallet: WalletView,
    pub on_connect: Callback<()>,
    pub on_disconnect: Callback<()>,
}

/// Smooth-scroll to an in-page anchor instead of jumping to it.
#[must_use]
pub fn scroll_link(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        dom::scroll_to_section(dom::anchor_target(href));
    })
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let connect = {
        let cb = p.on_connect.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let disconnect = {
        let cb = p.on_disconnect.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let connect_class = classes!(
        "btn",
        if p.wallet.connected {
            "btn-primary"
        } else {
            "btn-outline"
        }
    );
    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <div class="header-content">
                <div class="brand">{ "GreenQuest" }</div>
                <nav aria-label="Sections" class="header-nav">
                    <ul>
                        { for NAV_LINKS.iter().map(|(label, href)| html! {
                            <li><a href={*href} data-link="" onclick={scroll_link(*href)}>{ *label }</a></li>
                        }) }
                    </ul>
                </nav>
                <div class="header-wallet">
                    <span id="walletAddr" class="wallet-addr">{ p.wallet.address_label.clone() }</span>
                    <button id="connectBtn" type="button" class={connect_class} onclick={connect}>
                        { p.wallet.button_label }
                    </button>
                    <button id="disconnectBtn" type="button" class="btn btn-ghost" onclick={disconnect}>
                        { "Disconnect" }
                    </button>
                </div>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use greenquest_core::state::{AppState, WalletAddress};
    use greenquest_core::view::render_wallet;
    use yew::LocalServerRenderer;

    fn render(wallet: WalletView) -> String {
        let props = Props {
            wallet,
            on_connect: Callback::noop(),
            on_disconnect: Callback::noop(),
        };
        block_on(LocalServerRenderer::<Header>::with_props(props).render())
    }

    #[test]
    fn disconnected_header_offers_connect() {
        let html = render(render_wallet(&AppState::default()));
        assert!(html.contains("Not connected"));
        assert!(html.contains("Connect Wallet"));
        assert!(html.contains("btn-outline"));
        for (_, href) in NAV_LINKS {
            assert!(html.contains(href));
        }
    }

    #[test]
    fn connected_header_shows_short_address() {
        let mut state = AppState::default();
        let address = WalletAddress::parse("0x9876543210fedcba9876543210fedcba98765432").unwrap();
        state.connect_wallet(address);
        let html = render(render_wallet(&state));
        assert!(html.contains("0x9876...5432"));
        assert!(html.contains("Connected"));
        assert!(html.contains("btn-primary"));
    }
}
