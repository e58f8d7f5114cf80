//! Listing records
//!
//! A `Listing` tracks one product's lifecycle from the seller's initial
//! request through sale. Status only ever moves forward; removal after a
//! sale deletes the record instead of adding a terminal state.

use super::{AccountId, Coin};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    /// Requested by a seller, awaiting owner approval
    Requested,
    /// Approved and available for purchase
    OnSale,
    /// Purchased; awaiting removal by the buyer
    Sold,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Requested => write!(f, "Requested"),
            ListingStatus::OnSale => write!(f, "OnSale"),
            ListingStatus::Sold => write!(f, "Sold"),
        }
    }
}

/// A marketplace listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Product identifier (unique while the record exists)
    pub product_id: String,
    /// Opaque payment/reward token identifier supplied by the requester
    pub token: String,
    /// Sale price, fixed at request time
    pub price: Coin,
    /// The original requester (seller); never changes
    pub owner: AccountId,
    /// The purchaser; set exactly when the listing becomes `Sold`
    pub buyer: Option<AccountId>,
    /// Current lifecycle status
    pub status: ListingStatus,
}

impl Listing {
    /// Create a freshly requested listing
    pub fn requested(product_id: String, token: String, price: Coin, owner: AccountId) -> Self {
        Self {
            product_id,
            token,
            price,
            owner,
            buyer: None,
            status: ListingStatus::Requested,
        }
    }

    /// Check if the listing is open for purchase
    pub fn is_on_sale(&self) -> bool {
        self.status == ListingStatus::OnSale
    }
}
