use greenquest_core::view::LeaderboardView;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Layout {
    /// Compact list inside the dashboard panel.
    Preview,
    /// Numbered list in its own section.
    Ranked,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub leaderboard: LeaderboardView,
    pub layout: Layout,
}

#[function_component(Leaderboard)]
pub fn leaderboard(p: &Props) -> Html {
    let rows = &p.leaderboard.rows;
    match p.layout {
        Layout::Preview => html! {
            <ul id="leaderPreview" class="leader-preview-list">
                { for rows.iter().map(|row| html! {
                    <li class={classes!(row.is_player.then_some("is-player"))}>{ row.preview_line() }</li>
                }) }
            </ul>
        },
        Layout::Ranked => html! {
            <section id="leaderboard" aria-labelledby="leaderboard-title">
                <h2 id="leaderboard-title">{ "Leaderboard" }</h2>
                <ol id="leaderboardList" class="leader-list">
                    { for rows.iter().map(|row| html! {
                        <li class={classes!(row.is_player.then_some("is-player"))}>{ row.ranked_line() }</li>
                    }) }
                </ol>
            </section>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use greenquest_core::view::render_leaderboard;
    use greenquest_core::Catalog;
    use yew::LocalServerRenderer;

    fn render(layout: Layout) -> String {
        let catalog = Catalog::embedded().unwrap();
        let board = render_leaderboard(&catalog);
        let props = Props {
            leaderboard: board,
            layout,
        };
        block_on(LocalServerRenderer::<Leaderboard>::with_props(props).render())
    }

    #[test]
    fn ranked_layout_numbers_rows() {
        let html = render(Layout::Ranked);
        assert!(html.contains("1. Asha — 1640 XP"));
        assert!(html.contains("4. You — 120 XP"));
        assert!(html.contains("is-player"));
    }

    #[test]
    fn preview_layout_omits_numbers() {
        let html = render(Layout::Preview);
        assert!(html.contains("Zara — 980 XP"));
        assert!(!html.contains("3. Zara"));
        assert!(!html.contains("id=\"leaderboard\""));
    }
}
