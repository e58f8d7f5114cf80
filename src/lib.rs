//! tradepost: a marketplace listing and sale engine
//!
//! A standalone state machine for a moderated product market, reconstructed
//! from the external surface of a ledger-backed marketplace contract:
//! sellers request listings against a publish fee, the market owner approves
//! them, buyers purchase at the listed price, and buyers remove their
//! purchases from the registry. The owner can deactivate the whole market to
//! gate new requests.
//!
//! The engine is deliberately substrate-free. It performs no authentication,
//! moves no funds and delivers no notifications — callers supply resolved
//! identities, attach payment amounts, and collect settlement receipts and
//! events to act on:
//!
//! - identity: every operation takes the caller's [`AccountId`]
//! - value transfer: `buy` returns a [`SaleReceipt`] naming who gets paid
//! - notification: successful operations append a [`MarketEvent`], drained
//!   with `take_events`
//!
//! ## Modules
//! - `types` - core data structures (identities, amounts, listings)
//! - `market` - the engine, its errors/events, and a thread-safe handle

pub mod market;
pub mod types;

pub use market::{
    Market, MarketError, MarketEvent, MarketHandle, MarketInfo, MarketResult, SaleReceipt,
};
pub use types::{AccountId, Coin, Listing, ListingStatus};

use serde::{Deserialize, Serialize};

/// Market construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Market name (immutable after construction)
    pub name: String,
    /// Fee required to submit a listing request
    pub publish_fee: Coin,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            name: "tradepost".to_string(),
            publish_fee: Coin::ZERO,
        }
    }
}

impl MarketConfig {
    /// Named market with a publish fee
    pub fn new(name: impl Into<String>, publish_fee: Coin) -> Self {
        Self {
            name: name.into(),
            publish_fee,
        }
    }
}
