// Accessibility helpers

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Class added to `<body>` once the keyboard is used for navigation.
pub const SHOW_FOCUS_CLASS: &str = "show-focus";

const FOCUSABLE_QUERY: &str =
    "button, [href], input, textarea, select, [tabindex]:not([tabindex='-1'])";

/// Focus rings only once the keyboard is in use, plus the screen reader helper class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    "body:not(.show-focus) :focus{outline:none} body.show-focus :focus{outline:3px solid #4ADE80;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Whether a key press should switch on visible focus rings.
#[must_use]
pub fn is_focus_key(key: &str) -> bool {
    key == "Tab"
}

/// Id of the polite live region rendered at the top of the page.
pub const STATUS_REGION_ID: &str = "gq-status";

/// Text for the live region: the open dialog's title, or nothing.
/// Toasts announce themselves through the toast stack.
#[must_use]
pub fn status_message(modal_title: Option<&str>) -> String {
    modal_title.map_or_else(String::new, |title| format!("{title} dialog open"))
}

/// Watch for Tab on the window and mark `<body>` with [`SHOW_FOCUS_CLASS`].
///
/// The listener is removed when the returned guard is dropped.
#[must_use]
pub fn install_focus_visibility() -> Option<EventListener> {
    let win = crate::dom::window()?;
    Some(EventListener::new(&win, "keydown", |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if !is_focus_key(&key) {
            return;
        }
        if let Some(body) = crate::dom::document().and_then(|doc| doc.body()) {
            let _ = body.class_list().add_1(SHOW_FOCUS_CLASS);
        }
    }))
}

fn focusables(container: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_QUERY) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// While `key` is `Some`, focus the first focusable element in `container_ref`.
/// When it changes or goes away, focus returns to whatever had it before.
#[hook]
pub fn use_focus_trap<K>(key: Option<K>, container_ref: NodeRef)
where
    K: PartialEq + 'static,
{
    use_effect_with((key, container_ref), move |(key, container_ref)| {
        let mut prev_focus: Option<web_sys::HtmlElement> = None;
        if cfg!(target_arch = "wasm32") && key.is_some() {
            prev_focus = crate::dom::document()
                .and_then(|doc| doc.active_element())
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
            if let Some(first) = container_ref
                .cast::<web_sys::Element>()
                .and_then(|el| focusables(&el).into_iter().next())
            {
                let _ = first.focus();
            }
        }
        move || {
            if let Some(el) = prev_focus {
                let _ = el.focus();
            }
        }
    });
}

/// Escape closes; Tab and Shift+Tab cycle within the container.
#[must_use]
pub fn trap_keydown(container_ref: NodeRef, on_escape: Callback<()>) -> Callback<KeyboardEvent> {
    Callback::from(move |e: KeyboardEvent| {
        if !cfg!(target_arch = "wasm32") {
            return;
        }
        if e.key() == "Escape" {
            e.prevent_default();
            on_escape.emit(());
            return;
        }
        if e.key() != "Tab" {
            return;
        }
        let Some(container) = container_ref.cast::<web_sys::Element>() else {
            return;
        };
        let items = focusables(&container);
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return;
        };
        let Some(active) = crate::dom::document().and_then(|d| d.active_element()) else {
            return;
        };
        if !container.contains(Some(&active)) {
            e.prevent_default();
            let _ = first.focus();
            return;
        }
        let first_el: &web_sys::Element = first.as_ref();
        let last_el: &web_sys::Element = last.as_ref();
        if e.shift_key() && active == *first_el {
            e.prevent_default();
            let _ = last.focus();
        } else if !e.shift_key() && active == *last_el {
            e.prevent_default();
            let _ = first.focus();
        }
    })
}
