use greenquest_core::view::StatsView;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub stats: StatsView,
    pub on_claim: Callback<()>,
    /// Rendered under the meters; the page puts the leaderboard preview here.
    #[prop_or_default]
    pub children: Children,
}

fn stat_icon(kind: &str) -> Html {
    let stroke = "#052e16";
    let fill = "var(--accent)";
    match kind {
        "xp" => html! {
            <svg width="16" height="16" viewBox="0 0 24 24" role="presentation" aria-hidden="true" class="stat-icon">
                <path d="M12 3l2.6 5.6 6.1.7-4.5 4.2 1.2 6L12 16.6 6.6 19.5l1.2-6L3.3 9.3l6.1-.7Z" fill={fill} stroke={stroke} stroke-width="1.4" stroke-linejoin="round"/>
            </svg>
        },
        "tokens" => html! {
            <svg width="16" height="16" viewBox="0 0 24 24" role="presentation" aria-hidden="true" class="stat-icon">
                <circle cx="12" cy="12" r="8" fill={fill} stroke={stroke} stroke-width="1.5"/>
                <path d="M9 12h6M12 9v6" stroke={stroke} stroke-width="1.5" stroke-linecap="round"/>
            </svg>
        },
        "items" => html! {
            <svg width="16" height="16" viewBox="0 0 24 24" role="presentation" aria-hidden="true" class="stat-icon">
                <path d="M12 3 4 7v10l8 4 8-4V7Z" fill={fill} stroke={stroke} stroke-width="1.4" stroke-linejoin="round"/>
            </svg>
        },
        _ => Html::default(),
    }
}

fn stat_chip(id: &'static str, label: &'static str, value: u32, kind: &'static str) -> Html {
    html! {
        <div class="stat-chip" role="listitem">
            { stat_icon(kind) }
            <div class="stat-copy">
                <span class="stat-label">{ label }</span>
                <span id={id} class="stat-value">{ value.to_string() }</span>
            </div>
        </div>
    }
}

/// Inline style for a bar filled to `percent`.
#[must_use]
pub fn bar_width(percent: f64) -> String {
    format!("width: {percent}%")
}

fn meter(id: &'static str, label: &'static str, percent: f64) -> Html {
    html! {
        <div class="meter" role="meter" aria-label={label} aria-valuemin="0" aria-valuemax="100" aria-valuenow={percent.to_string()}>
            <div class="meter-label">{ label }</div>
            <div class="bar-wrap slim">
                <div id={id} class="bar-fill" style={bar_width(percent)}></div>
            </div>
        </div>
    }
}

#[function_component(StatsPanel)]
pub fn stats_panel(p: &Props) -> Html {
    let claim = {
        let cb = p.on_claim.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stats = &p.stats;
    html! {
        <section id="dashboard" class="panel stats-panel" aria-labelledby="dashboard-title">
            <h2 id="dashboard-title">{ "Your Dashboard" }</h2>
            <div class="stat-chip-grid" role="list">
                { stat_chip("stat-xp", "XP", stats.xp, "xp") }
                { stat_chip("stat-tokens", "Tokens", stats.tokens, "tokens") }
                { stat_chip("stat-nfts", "NFTs", stats.items, "items") }
            </div>
            { meter("streakBar", "Weekly streak", f64::from(stats.streak_width)) }
            { meter("xpBar", "Level progress", stats.xp_bar_width) }
            <p class="voting">
                { "Voting power: " }
                <strong id="votingPower">{ stats.voting_power.clone() }</strong>
            </p>
            <button id="claimRewards" type="button" class="btn btn-primary" onclick={claim}>
                { "Claim Rewards" }
            </button>
            <div class="leader-preview">
                <h3>{ "Top players" }</h3>
                { for p.children.iter() }
            </div>
        </section>
    }
}
