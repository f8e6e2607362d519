use greenquest_core::view::ProposalRow;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub proposals: Vec<ProposalRow>,
    pub on_vote: Callback<u32>,
}

#[function_component(ProposalList)]
pub fn proposal_list(p: &Props) -> Html {
    html! {
        <section id="dao" aria-labelledby="dao-title">
            <h2 id="dao-title">{ "DAO Proposals" }</h2>
            <div id="proposals">
                { for p.proposals.iter().map(|proposal| {
                    let vote = {
                        let cb = p.on_vote.clone();
                        let id = proposal.id;
                        Callback::from(move |_| cb.emit(id))
                    };
                    html! {
                        <div class="proposal">
                            <strong>{ proposal.title.clone() }</strong>
                            <div class="muted">{ proposal.votes_label.clone() }</div>
                            <button type="button" class="btn btn-sm" data-voteid={proposal.id.to_string()} onclick={vote}>
                                { "Vote" }
                            </button>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}
