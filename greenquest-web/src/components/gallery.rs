use greenquest_core::view::GalleryView;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub gallery: GalleryView,
}

#[function_component(Gallery)]
pub fn gallery(p: &Props) -> Html {
    html! {
        <section id="gallery" aria-labelledby="gallery-title">
            <h2 id="gallery-title">{ "My NFTs" }</h2>
            <div id="nftGallery" class="nft-grid">
                { for p.gallery.owned.iter().map(|tile| html! {
                    <div class="nft-item">
                        <strong>{ tile.label.clone() }</strong>
                        <div class="muted">{ tile.status }</div>
                    </div>
                }) }
            </div>
            <h3>{ "Badges" }</h3>
            <div id="badgeGallery" class="badge-grid">
                { for p.gallery.badges.iter().map(|badge| html! {
                    <div class="badge">
                        <div class="badge-icon" aria-hidden="true">{ "🏅" }</div>
                        <div class="badge-label">{ badge.clone() }</div>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use greenquest_core::AppState;
    use greenquest_core::view::render_gallery;
    use yew::LocalServerRenderer;

    #[test]
    fn owned_tiles_follow_item_count() {
        let props = Props {
            gallery: render_gallery(&AppState::new(0, 0, 3, 0)),
        };
        let html = block_on(LocalServerRenderer::<Gallery>::with_props(props).render());
        assert_eq!(html.matches("class=\"nft-item\"").count(), 3);
        assert!(html.contains("Badge #3"));
        assert!(!html.contains("Badge #4"));
        assert_eq!(html.matches("class=\"badge\"").count(), 6);
    }
}
