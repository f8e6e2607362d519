use greenquest_core::view::QuestCard;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub quests: Vec<QuestCard>,
    pub on_join: Callback<String>,
    pub on_upload: Callback<()>,
}

#[function_component(QuestList)]
pub fn quest_list(p: &Props) -> Html {
    html! {
        <section id="quests" aria-labelledby="quests-title">
            <h2 id="quests-title">{ "Quests" }</h2>
            <div class="quest-grid">
                { for p.quests.iter().map(|quest| {
                    let join = {
                        let cb = p.on_join.clone();
                        let id = quest.id.clone();
                        Callback::from(move |_| cb.emit(id.clone()))
                    };
                    let upload = {
                        let cb = p.on_upload.clone();
                        Callback::from(move |_| cb.emit(()))
                    };
                    html! {
                        <article class="quest card" data-quest={quest.id.clone()}>
                            <h3>{ quest.title.clone() }</h3>
                            <p class="muted">{ quest.summary.clone() }</p>
                            <div class="quest-actions">
                                <button type="button" class="btn btn-primary btn-sm" data-join="" onclick={join}>
                                    { "Join" }
                                </button>
                                <button type="button" class="btn btn-outline btn-sm" data-upload="" onclick={upload}>
                                    { "Upload Proof" }
                                </button>
                            </div>
                        </article>
                    }
                }) }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use greenquest_core::Catalog;
    use greenquest_core::view::render_quests;
    use yew::LocalServerRenderer;

    #[test]
    fn each_quest_gets_join_and_upload() {
        let catalog = Catalog::embedded().unwrap();
        let props = Props {
            quests: render_quests(&catalog),
            on_join: Callback::noop(),
            on_upload: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<QuestList>::with_props(props).render());
        assert!(html.contains("Plant a Tree"));
        assert!(html.contains("data-quest=\"beach-cleanup\""));
        assert_eq!(html.matches("data-join").count(), catalog.quests.len());
        assert_eq!(html.matches("data-upload").count(), catalog.quests.len());
    }
}
