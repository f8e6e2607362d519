use crate::a11y::{trap_keydown, use_focus_trap};
use greenquest_core::{
    ActionKind, ActionStyle, BodyBlock, FlowAction, Inline, Modal, ModalAction, ModalId,
};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub modal: Option<Modal<FlowAction>>,
    /// Button `index` of the given modal was pressed.
    pub on_action: Callback<(ModalId, usize)>,
    /// Click outside the dialog box, or Escape.
    pub on_backdrop: Callback<()>,
}

fn render_block(block: &BodyBlock) -> Html {
    match block {
        BodyBlock::Paragraph(runs) => html! {
            <p>
                { for runs.iter().map(|run| match run {
                    Inline::Text(text) => html! { <>{ text.clone() }</> },
                    Inline::Strong(text) => html! { <strong>{ text.clone() }</strong> },
                }) }
            </p>
        },
        BodyBlock::FileInput { id, accept } => html! {
            <input type="file" id={id.clone()} accept={accept.clone()} />
        },
    }
}

const fn style_class(style: ActionStyle) -> &'static str {
    match style {
        ActionStyle::Primary => "btn-primary",
        ActionStyle::Outline => "btn-outline",
    }
}

fn render_action(
    modal: ModalId,
    index: usize,
    action: &ModalAction<FlowAction>,
    on_action: &Callback<(ModalId, usize)>,
) -> Html {
    let class = classes!("btn", style_class(action.style));
    let label = action.label.clone();
    match &action.kind {
        ActionKind::Link { href } => {
            // The host opens the tab so the press still reaches the flow.
            let onclick = {
                let cb = on_action.clone();
                Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    cb.emit((modal, index));
                })
            };
            html! {
                <a class={class} href={href.clone()} target="_blank" rel="noopener" {onclick}>{ label }</a>
            }
        }
        ActionKind::Dispatch(_) | ActionKind::Dismiss => {
            let onclick = {
                let cb = on_action.clone();
                Callback::from(move |_| cb.emit((modal, index)))
            };
            html! {
                <button type="button" class={class} {onclick}>{ label }</button>
            }
        }
    }
}

/// The single dialog region. Always mounted; empty and inert while closed.
#[function_component(ModalHost)]
pub fn modal_host(props: &Props) -> Html {
    let root_ref = use_node_ref();
    let container_ref = use_node_ref();
    use_focus_trap(props.modal.as_ref().map(|m| m.id), container_ref.clone());

    let open = props.modal.is_some();
    let on_backdrop_click = {
        let cb = props.on_backdrop.clone();
        let root_ref = root_ref.clone();
        // Yew delegates events, so compare against the root node itself.
        Callback::from(move |e: MouseEvent| {
            let target = e.target_dyn_into::<web_sys::Element>();
            if target.is_some() && target == root_ref.cast::<web_sys::Element>() {
                cb.emit(());
            }
        })
    };
    let on_keydown = trap_keydown(container_ref.clone(), props.on_backdrop.clone());

    let dialog = props.modal.as_ref().map_or_else(Html::default, |modal| {
        let title_id = format!("modal-title-{}", modal.id.get());
        html! {
            <div
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <h3 id={title_id}>{ modal.title.clone() }</h3>
                <div class="modal__body">
                    { for modal.body.iter().map(render_block) }
                </div>
                <div class="modal-actions">
                    { for modal.actions.iter().enumerate().map(|(index, action)| {
                        render_action(modal.id, index, action, &props.on_action)
                    }) }
                </div>
            </div>
        }
    });

    html! {
        <div
            id="modalRoot"
            class={classes!("modal-root", open.then_some("is-open"))}
            aria-hidden={(!open).to_string()}
            style={if open { "pointer-events:auto" } else { "pointer-events:none" }}
            onclick={on_backdrop_click}
            ref={root_ref}
        >
            { dialog }
        </div>
    }
}
