use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer>{ "GreenQuest demo. Wallet, minting and rewards are simulated; nothing is sent on-chain." }</footer>
    }
}
