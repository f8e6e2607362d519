use super::handle::TaskHost;
use crate::dom;
use crate::wallet::EthereumBridge;
use gloo::timers::future::TimeoutFuture;
use greenquest_core::{FlowEvent, resolve_wallet};
use wasm_bindgen_futures::spawn_local;

/// Timers, wallet and dialogs backed by the browser window.
pub struct BrowserHost;

impl TaskHost for BrowserHost {
    fn after(&self, delay_ms: u32, job: Box<dyn FnOnce()>) {
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            job();
        });
    }

    fn connect_wallet(&self, done: Box<dyn FnOnce(FlowEvent)>) {
        // Providers may inject late, so look one up per request.
        spawn_local(async move {
            let bridge = EthereumBridge::detect();
            done(resolve_wallet(&bridge).await);
        });
    }

    fn alert(&self, message: &str) {
        dom::alert(message);
    }

    fn open_link(&self, href: &str) {
        dom::open_in_new_tab(href);
    }
}
