//! Shared market handle
//!
//! Wraps a `Market` for use from multiple threads. Every operation takes
//! the lock once and holds it for the whole operation, so each call is
//! atomic with respect to the market record and the listing it touches;
//! no caller can observe a partially applied mutation. There are no
//! suspension points inside the critical sections.

use super::{Market, MarketEvent, MarketInfo, MarketResult, SaleReceipt};
use crate::types::{AccountId, Coin, Listing};

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Thread-safe handle to a market engine
#[derive(Debug, Clone)]
pub struct MarketHandle {
    inner: Arc<RwLock<Market>>,
}

impl MarketHandle {
    /// Wrap a market for shared use
    pub fn new(market: Market) -> Self {
        Self {
            inner: Arc::new(RwLock::new(market)),
        }
    }

    /// Submit a new listing request
    pub fn request_listing(
        &self,
        product_id: &str,
        token: &str,
        price: Coin,
        payment: Coin,
        caller: &AccountId,
    ) -> MarketResult<()> {
        let result = self
            .inner
            .write()
            .request_listing(product_id, token, price, payment, caller);
        match &result {
            Ok(()) => debug!(product_id, price = %price, seller = %caller, "listing requested"),
            Err(e) => warn!(product_id, error = %e, "listing request rejected"),
        }
        result
    }

    /// Approve a requested listing
    pub fn approve_listing(&self, product_id: &str, caller: &AccountId) -> MarketResult<()> {
        let result = self.inner.write().approve_listing(product_id, caller);
        match &result {
            Ok(()) => info!(product_id, "listing approved, product on sale"),
            Err(e) => warn!(product_id, error = %e, "listing approval rejected"),
        }
        result
    }

    /// Buy an on-sale product
    pub fn buy(
        &self,
        product_id: &str,
        payment: Coin,
        caller: &AccountId,
    ) -> MarketResult<SaleReceipt> {
        let result = self.inner.write().buy(product_id, payment, caller);
        match &result {
            Ok(receipt) => info!(
                product_id,
                buyer = %caller,
                seller = %receipt.seller,
                price = %receipt.price,
                "product sold"
            ),
            Err(e) => warn!(product_id, error = %e, "purchase rejected"),
        }
        result
    }

    /// Remove a sold product from the registry
    pub fn remove_from_listing(
        &self,
        product_id: &str,
        token: &str,
        caller: &AccountId,
    ) -> MarketResult<()> {
        let result = self
            .inner
            .write()
            .remove_from_listing(product_id, token, caller);
        match &result {
            Ok(()) => debug!(product_id, "listing removed"),
            Err(e) => warn!(product_id, error = %e, "listing removal rejected"),
        }
        result
    }

    /// Activate the market
    pub fn activate(&self, caller: &AccountId) -> MarketResult<()> {
        let result = self.inner.write().activate(caller);
        if result.is_ok() {
            info!("market activated");
        }
        result
    }

    /// Deactivate the market
    pub fn deactivate(&self, caller: &AccountId) -> MarketResult<()> {
        let result = self.inner.write().deactivate(caller);
        if result.is_ok() {
            info!("market deactivated");
        }
        result
    }

    /// Withdraw the retained fees
    pub fn withdraw_fees(&self, caller: &AccountId) -> MarketResult<Coin> {
        self.inner.write().withdraw_fees(caller)
    }

    /// Read-only snapshot of the whole market
    pub fn info(&self) -> MarketInfo {
        self.inner.read().info()
    }

    /// Get a listing by product id
    pub fn listing(&self, product_id: &str) -> Option<Listing> {
        self.inner.read().listing(product_id).cloned()
    }

    /// Product ids currently on sale, in approval order
    pub fn products_in_sale(&self) -> Vec<String> {
        self.inner.read().products_in_sale()
    }

    /// Whether the market accepts new listing requests
    pub fn is_active(&self) -> bool {
        self.inner.read().is_active()
    }

    /// Get and clear pending events
    pub fn take_events(&self) -> Vec<MarketEvent> {
        self.inner.write().take_events()
    }
}
