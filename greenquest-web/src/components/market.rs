use greenquest_core::view::MarketTile;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tiles: Vec<MarketTile>,
    pub on_buy: Callback<String>,
}

#[function_component(MarketGrid)]
pub fn market_grid(p: &Props) -> Html {
    html! {
        <section id="market" aria-labelledby="market-title">
            <h2 id="market-title">{ "Marketplace" }</h2>
            <div id="marketGrid" class="market-grid">
                { for p.tiles.iter().map(|tile| {
                    let buy = {
                        let cb = p.on_buy.clone();
                        let id = tile.id.clone();
                        Callback::from(move |_| cb.emit(id.clone()))
                    };
                    html! {
                        <div class="market-item">
                            <div class="market-copy">
                                <div class="market-title">{ tile.title.clone() }</div>
                                <div class="muted">{ tile.price.clone() }</div>
                            </div>
                            <button type="button" class="btn btn-sm" data-buy-id={tile.id.clone()} onclick={buy}>
                                { tile.action_label }
                            </button>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}
