use super::header::scroll_link;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_join_season: Callback<()>,
}

#[function_component(Hero)]
pub fn hero(p: &Props) -> Html {
    let join_season = {
        let cb = p.on_join_season.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="hero" aria-labelledby="hero-title">
            <h1 id="hero-title">{ "Turn real-world green actions into rewards" }</h1>
            <p class="muted">
                { "Complete eco quests, upload proof, mint badge NFTs and vote on what the community funds next." }
            </p>
            <div class="hero-actions">
                <button id="ctaStart" type="button" class="btn btn-primary" onclick={scroll_link("#quests")}>
                    { "Start a Quest" }
                </button>
                <button id="startQuestTop" type="button" class="btn btn-outline" onclick={scroll_link("#dashboard")}>
                    { "My Dashboard" }
                </button>
            </div>
            <div class="season card">
                <strong>{ "Seasonal Challenge" }</strong>
                <p class="muted">{ "Top players this season win a rare NFT." }</p>
                <button id="joinSeason" type="button" class="btn btn-sm" onclick={join_season}>
                    { "Join Challenge" }
                </button>
            </div>
        </section>
    }
}
