//! Wallet provider capability.
//!
//! The core never touches environment globals; hosts inject a
//! [`WalletBridge`] implementation (the browser crate wraps
//! `window.ethereum`, tests use [`ScriptedWallet`]).

use crate::state::WalletAddress;
use async_trait::async_trait;
use std::cell::Cell;

/// RPC method used to ask the provider for accounts.
pub const REQUEST_ACCOUNTS_METHOD: &str = "eth_requestAccounts";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("the wallet provider rejected the connection request")]
    Rejected,
    #[error("no wallet provider is available")]
    Unavailable,
    #[error("the wallet provider returned no accounts")]
    NoAccounts,
}

#[async_trait(?Send)]
pub trait WalletBridge {
    /// Whether a provider exists. Checked before any request is made.
    fn is_available(&self) -> bool;

    /// `eth_requestAccounts`: ordered account identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Rejected`] when the provider denies the request.
    async fn request_accounts(&self) -> Result<Vec<String>, ConnectionError>;

    /// Ask for a connection and keep the first account.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Unavailable`] without a provider,
    /// [`ConnectionError::Rejected`] if the request fails, and
    /// [`ConnectionError::NoAccounts`] if no usable account comes back.
    async fn request_connection(&self) -> Result<WalletAddress, ConnectionError> {
        if !self.is_available() {
            return Err(ConnectionError::Unavailable);
        }
        let accounts = self.request_accounts().await?;
        accounts
            .first()
            .and_then(|raw| WalletAddress::parse(raw))
            .ok_or(ConnectionError::NoAccounts)
    }
}

/// Outcome a [`ScriptedWallet`] plays back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Accounts(Vec<String>),
    Reject,
    Missing,
}

/// Deterministic stand-in for a browser wallet.
#[derive(Debug)]
pub struct ScriptedWallet {
    script: Script,
    requests: Cell<usize>,
}

impl ScriptedWallet {
    #[must_use]
    pub const fn new(script: Script) -> Self {
        Self {
            script,
            requests: Cell::new(0),
        }
    }

    #[must_use]
    pub fn approving(account: &str) -> Self {
        Self::new(Script::Accounts(vec![account.to_string()]))
    }

    #[must_use]
    pub const fn rejecting() -> Self {
        Self::new(Script::Reject)
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self::new(Script::Missing)
    }

    /// Number of `eth_requestAccounts` calls that reached the provider.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl WalletBridge for ScriptedWallet {
    fn is_available(&self) -> bool {
        !matches!(self.script, Script::Missing)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ConnectionError> {
        self.requests.set(self.requests.get() + 1);
        match &self.script {
            Script::Accounts(accounts) => Ok(accounts.clone()),
            Script::Reject => Err(ConnectionError::Rejected),
            Script::Missing => Err(ConnectionError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn first_account_wins() {
        let wallet = ScriptedWallet::new(Script::Accounts(vec![
            "0xAAAA00000000BBBB".into(),
            "0xCCCC00000000DDDD".into(),
        ]));
        let addr = block_on(wallet.request_connection()).unwrap();
        assert_eq!(addr.as_str(), "0xAAAA00000000BBBB");
    }

    #[test]
    fn missing_provider_is_detected_before_requesting() {
        let wallet = ScriptedWallet::missing();
        assert_eq!(
            block_on(wallet.request_connection()),
            Err(ConnectionError::Unavailable)
        );
        assert_eq!(wallet.requests(), 0);
    }

    #[test]
    fn rejection_and_empty_lists_fail() {
        assert_eq!(
            block_on(ScriptedWallet::rejecting().request_connection()),
            Err(ConnectionError::Rejected)
        );
        let empty = ScriptedWallet::new(Script::Accounts(Vec::new()));
        assert_eq!(
            block_on(empty.request_connection()),
            Err(ConnectionError::NoAccounts)
        );
    }
}
