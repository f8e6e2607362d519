//! `window.ethereum` (EIP-1193) implementation of [`WalletBridge`].

use async_trait::async_trait;
use greenquest_core::wallet::REQUEST_ACCOUNTS_METHOD;
use greenquest_core::{ConnectionError, WalletBridge};
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::dom;

/// Injected browser provider, captured once when the bridge is built.
#[derive(Debug, Clone)]
pub struct EthereumBridge {
    provider: Option<JsValue>,
}

impl EthereumBridge {
    /// Look up `window.ethereum`.
    #[must_use]
    pub fn detect() -> Self {
        let provider = dom::window()
            .and_then(|win| Reflect::get(&win, &JsValue::from_str("ethereum")).ok())
            .filter(|value| !value.is_undefined() && !value.is_null());
        Self { provider }
    }

    /// A bridge with no provider. Every connection attempt reports
    /// [`ConnectionError::Unavailable`].
    #[must_use]
    pub const fn absent() -> Self {
        Self { provider: None }
    }

    fn request_fn(provider: &JsValue) -> Result<Function, ConnectionError> {
        Reflect::get(provider, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                log::error!("window.ethereum has no request()");
                ConnectionError::Unavailable
            })
    }
}

#[async_trait(?Send)]
impl WalletBridge for EthereumBridge {
    fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ConnectionError> {
        let provider = self.provider.as_ref().ok_or(ConnectionError::Unavailable)?;
        let request = Self::request_fn(provider)?;

        let args = Object::new();
        Reflect::set(
            &args,
            &JsValue::from_str("method"),
            &JsValue::from_str(REQUEST_ACCOUNTS_METHOD),
        )
        .map_err(|_| ConnectionError::Rejected)?;

        let pending = request
            .call1(provider, &args)
            .and_then(JsCast::dyn_into::<Promise>)
            .map_err(|err| {
                log::error!("{REQUEST_ACCOUNTS_METHOD} failed: {}", dom::js_error_message(&err));
                ConnectionError::Rejected
            })?;
        let accounts = JsFuture::from(pending).await.map_err(|err| {
            log::warn!("{REQUEST_ACCOUNTS_METHOD} rejected: {}", dom::js_error_message(&err));
            ConnectionError::Rejected
        })?;
        Ok(account_list(&accounts))
    }
}

fn account_list(value: &JsValue) -> Vec<String> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .filter_map(|entry| entry.as_string())
        .collect()
}
