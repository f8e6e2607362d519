#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

use greenquest_core::{Catalog, Dashboard, DemoConfig};

pub mod handle;
#[cfg(target_arch = "wasm32")]
pub mod host;
pub mod view;

pub use handle::{DashboardHandle, Snapshot, TaskHost};

/// Dashboard over the embedded demo data, or an empty catalog with default
/// settings if that data is unreadable.
#[must_use]
pub fn load_dashboard() -> Dashboard {
    Dashboard::embedded().unwrap_or_else(|err| {
        log::error!("embedded demo data failed to load: {err:#}");
        Dashboard::new(Catalog::default(), DemoConfig::default())
    })
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let force = use_force_update();
    let handle = use_memo((), move |_| {
        DashboardHandle::new(
            load_dashboard(),
            Rc::new(host::BrowserHost),
            Callback::from(move |()| force.force_update()),
        )
    });

    use_effect_with((), |_| {
        let focus_guard = crate::a11y::install_focus_visibility();
        move || drop(focus_guard)
    });

    view::render_page(&handle)
}
