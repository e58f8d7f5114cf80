//! Marketplace engine
//!
//! The engine is a sequential state machine over a single `Market` record:
//!
//! - sellers request listings against a publish fee
//! - the market owner approves requests, putting products on sale
//! - buyers purchase on-sale products at the listed price
//! - buyers remove their sold products from the registry
//! - the owner can deactivate/reactivate the whole market, gating new
//!   requests
//!
//! Every operation checks its preconditions up front and mutates nothing on
//! failure; events are recorded only for successful operations. Fund
//! movement is not performed here — operations return what the surrounding
//! runtime must transfer.

pub mod engine;
pub mod handle;

pub use engine::{Market, MarketInfo, SaleReceipt};
pub use handle::MarketHandle;

use crate::types::{AccountId, Coin, ListingStatus};
use serde::{Deserialize, Serialize};

/// Market operation result
pub type MarketResult<T> = Result<T, MarketError>;

/// Market operation errors
///
/// All of these are caller-input or authorization errors; none are
/// retryable without a corrected call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("market is not active")]
    MarketInactive,
    #[error("insufficient publish fee: have {have}, need {need}")]
    InsufficientFee { have: Coin, need: Coin },
    #[error("insufficient payment to buy: have {have}, need {need}")]
    InsufficientPayment { have: Coin, need: Coin },
    #[error("product does not exist: {0}")]
    ProductNotFound(String),
    #[error("product {product_id} is not in {expected} status")]
    InvalidStatus {
        product_id: String,
        expected: ListingStatus,
    },
    #[error("unauthorized: {0}")]
    NotAuthorized(String),
    #[error("market is already activated")]
    AlreadyActive,
    #[error("market is already deactivated")]
    AlreadyInactive,
}

/// Market event for external observers
///
/// Emitted exactly once per successful operation, never on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A seller requested a new listing
    ListingRequestReceived {
        product_id: String,
        owner: AccountId,
        price: Coin,
        token: String,
    },
    /// The market owner approved a requested listing
    ListingRequestApproved {
        product_id: String,
        owner: AccountId,
        price: Coin,
    },
    /// An on-sale product was purchased
    ProductSold {
        product_id: String,
        seller: AccountId,
        buyer: AccountId,
        price: Coin,
    },
    /// The buyer removed a sold product from the registry
    ListingRemoved {
        product_id: String,
        token: String,
        owner: AccountId,
    },
    /// The market was activated
    MarketActivated,
    /// The market was deactivated
    MarketDeactivated,
}
