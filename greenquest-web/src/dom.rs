use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Blocking browser alert. Silently skipped outside a browser.
pub fn alert(message: &str) {
    if let Some(win) = window()
        && let Err(err) = win.alert_with_message(message)
    {
        log::warn!("alert failed: {}", js_error_message(&err));
    }
}

/// Open `href` in a new tab.
pub fn open_in_new_tab(href: &str) {
    let Some(win) = window() else {
        return;
    };
    if let Err(err) = win.open_with_url_and_target(href, "_blank") {
        log::warn!("could not open {href}: {}", js_error_message(&err));
    }
}

/// Smooth-scroll the element with `id` to the top of the viewport.
///
/// Returns `false` when no such element exists.
pub fn scroll_to_section(id: &str) -> bool {
    let Some(el) = document().and_then(|doc| doc.get_element_by_id(id)) else {
        log::warn!("scroll target #{id} not found");
        return false;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
    true
}

/// Strip the leading `#` from an in-page link.
#[must_use]
pub fn anchor_target(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

/// Current viewport size in CSS pixels.
#[must_use]
pub fn viewport_size() -> Option<(f64, f64)> {
    let win = window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some((width, height))
}
