use greenquest_core::{Toast, ToastId};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<Toast>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<ToastId>>,
}

/// Bottom-right notification stack. Expiry is driven by the dashboard's
/// timers; the dismiss button only removes a toast early.
#[function_component(ToastStack)]
pub fn toast_stack(props: &Props) -> Html {
    html! {
        <div class="toast-stack" role="status" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let dismiss_btn = props.on_dismiss.as_ref().map(|cb| {
                    let id = toast.id;
                    let cb = cb.clone();
                    let on_click = Callback::from(move |_| cb.emit(id));
                    html! { <button class="btn btn-ghost btn-xs" aria-label="Dismiss" onclick={on_click}>{ "✕" }</button> }
                }).unwrap_or_default();
                html! {
                    <div class="toast" key={toast.id.get()}>
                        <span>{ toast.text.clone() }</span>
                        { dismiss_btn }
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use greenquest_core::NotificationQueue;
    use yew::LocalServerRenderer;

    #[test]
    fn toasts_render_oldest_first() {
        let mut queue = NotificationQueue::default();
        queue.push("Vote recorded (simulated).", 3000);
        queue.push("Purchase successful (demo).", 3000);
        let props = Props {
            toasts: queue.visible().to_vec(),
            on_dismiss: Some(Callback::noop()),
        };
        let html = block_on(LocalServerRenderer::<ToastStack>::with_props(props).render());
        let vote = html.find("Vote recorded").unwrap();
        let buy = html.find("Purchase successful").unwrap();
        assert!(vote < buy);
        assert_eq!(html.matches("aria-label=\"Dismiss\"").count(), 2);
    }
}
