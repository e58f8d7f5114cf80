//! Market state machine
//!
//! Owns the market-wide activation flag, the publish fee and the listing
//! registry, and drives the listing lifecycle:
//!
//! `Requested → OnSale → Sold → (removed)`
//!
//! Transitions are strictly forward. Each operation is a single logical
//! step: preconditions are checked synchronously and a failing operation
//! leaves the market untouched.

use super::{MarketError, MarketEvent, MarketResult};
use crate::types::{AccountId, Coin, Listing, ListingStatus};
use crate::MarketConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only market snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInfo {
    /// Market name
    pub name: String,
    /// Whether new listing requests are accepted
    pub active: bool,
    /// Fee required to submit a listing request
    pub publish_fee: Coin,
    /// The market owner
    pub owner: AccountId,
    /// All live listing records
    pub listings: Vec<Listing>,
    /// Product ids currently on sale, in approval order
    pub in_sale: Vec<String>,
}

/// Settlement instruction returned by a successful purchase
///
/// The engine moves no funds itself; the runtime transfers `price` to
/// `seller` and returns `change` to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// The listing's original requester
    pub seller: AccountId,
    /// Amount owed to the seller
    pub price: Coin,
    /// Excess payment owed back to the buyer
    pub change: Coin,
}

/// Marketplace engine
#[derive(Debug, Clone)]
pub struct Market {
    /// Market name (immutable after construction)
    name: String,
    /// Market owner; sole authorized caller for approval and toggles
    owner: AccountId,
    /// Fee required for a listing request (immutable after construction)
    publish_fee: Coin,
    /// Activation flag gating new listing requests
    active: bool,
    /// Listing registry (product id -> record)
    listings: HashMap<String, Listing>,
    /// Product ids in approval order; filtered by status on read
    in_sale: Vec<String>,
    /// Payments retained by the market (publish fees)
    collected_fees: Coin,
    /// Events pending collection by the runtime
    events: Vec<MarketEvent>,
}

impl Market {
    /// Create a new active market with an empty registry
    pub fn new(config: MarketConfig, owner: AccountId) -> Self {
        Self {
            name: config.name,
            owner,
            publish_fee: config.publish_fee,
            active: true,
            listings: HashMap::new(),
            in_sale: Vec::new(),
            collected_fees: Coin::ZERO,
            events: Vec::new(),
        }
    }

    /// Market name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Market owner
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Publish fee
    pub fn publish_fee(&self) -> Coin {
        self.publish_fee
    }

    /// Whether the market accepts new listing requests
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Payments retained by the market so far
    pub fn collected_fees(&self) -> Coin {
        self.collected_fees
    }

    /// Submit a new listing request
    ///
    /// The caller becomes the listing's seller; the attached `payment` must
    /// cover the publish fee and is retained by the market in full. A
    /// repeat request may amend a still-`Requested` record but never
    /// replaces an approved or sold one.
    pub fn request_listing(
        &mut self,
        product_id: &str,
        token: &str,
        price: Coin,
        payment: Coin,
        caller: &AccountId,
    ) -> MarketResult<()> {
        if !self.active {
            return Err(MarketError::MarketInactive);
        }
        if payment < self.publish_fee {
            return Err(MarketError::InsufficientFee {
                have: payment,
                need: self.publish_fee,
            });
        }
        if let Some(existing) = self.listings.get(product_id) {
            if existing.status != ListingStatus::Requested {
                return Err(MarketError::InvalidStatus {
                    product_id: product_id.to_string(),
                    expected: ListingStatus::Requested,
                });
            }
        }

        self.collected_fees = self.collected_fees.saturating_add(payment);
        self.listings.insert(
            product_id.to_string(),
            Listing::requested(product_id.to_string(), token.to_string(), price, *caller),
        );

        self.events.push(MarketEvent::ListingRequestReceived {
            product_id: product_id.to_string(),
            owner: *caller,
            price,
            token: token.to_string(),
        });

        Ok(())
    }

    /// Approve a requested listing, putting the product on sale
    ///
    /// Owner-only. Approval requires a `Requested` record for the id; an
    /// unknown or already-approved id is reported as not found.
    pub fn approve_listing(&mut self, product_id: &str, caller: &AccountId) -> MarketResult<()> {
        if caller != &self.owner {
            return Err(MarketError::NotAuthorized(
                "only the market owner can approve listings".into(),
            ));
        }

        let listing = self
            .listings
            .get_mut(product_id)
            .filter(|l| l.status == ListingStatus::Requested)
            .ok_or_else(|| MarketError::ProductNotFound(product_id.to_string()))?;

        listing.status = ListingStatus::OnSale;
        let owner = listing.owner;
        let price = listing.price;

        self.in_sale.push(product_id.to_string());

        self.events.push(MarketEvent::ListingRequestApproved {
            product_id: product_id.to_string(),
            owner,
            price,
        });

        Ok(())
    }

    /// Buy an on-sale product
    ///
    /// Returns the settlement instruction for the runtime: the listed price
    /// goes to the seller, any excess payment back to the buyer.
    pub fn buy(
        &mut self,
        product_id: &str,
        payment: Coin,
        caller: &AccountId,
    ) -> MarketResult<SaleReceipt> {
        let listing = self
            .listings
            .get(product_id)
            .ok_or_else(|| MarketError::ProductNotFound(product_id.to_string()))?;

        if listing.status != ListingStatus::OnSale {
            return Err(MarketError::InvalidStatus {
                product_id: product_id.to_string(),
                expected: ListingStatus::OnSale,
            });
        }
        if payment < listing.price {
            return Err(MarketError::InsufficientPayment {
                have: payment,
                need: listing.price,
            });
        }

        let listing = self.listings.get_mut(product_id).unwrap();
        listing.status = ListingStatus::Sold;
        listing.buyer = Some(*caller);

        let seller = listing.owner;
        let price = listing.price;

        self.events.push(MarketEvent::ProductSold {
            product_id: product_id.to_string(),
            seller,
            buyer: *caller,
            price,
        });

        Ok(SaleReceipt {
            seller,
            price,
            change: payment.saturating_sub(price),
        })
    }

    /// Remove a sold product from the registry
    ///
    /// Only the buyer (the current holder of the product) may remove it.
    /// The record is deleted; a fresh request may later reuse the id.
    pub fn remove_from_listing(
        &mut self,
        product_id: &str,
        token: &str,
        caller: &AccountId,
    ) -> MarketResult<()> {
        let listing = self
            .listings
            .get(product_id)
            .filter(|l| l.status == ListingStatus::Sold)
            .ok_or_else(|| MarketError::InvalidStatus {
                product_id: product_id.to_string(),
                expected: ListingStatus::Sold,
            })?;

        if listing.buyer.as_ref() != Some(caller) {
            return Err(MarketError::NotAuthorized(
                "only the buyer can remove a sold product from the listing".into(),
            ));
        }

        self.listings.remove(product_id);
        self.in_sale.retain(|id| id != product_id);

        self.events.push(MarketEvent::ListingRemoved {
            product_id: product_id.to_string(),
            token: token.to_string(),
            owner: *caller,
        });

        Ok(())
    }

    /// Activate the market (owner-only)
    pub fn activate(&mut self, caller: &AccountId) -> MarketResult<()> {
        if caller != &self.owner {
            return Err(MarketError::NotAuthorized(
                "only the market owner can activate the market".into(),
            ));
        }
        if self.active {
            return Err(MarketError::AlreadyActive);
        }

        self.active = true;
        self.events.push(MarketEvent::MarketActivated);
        Ok(())
    }

    /// Deactivate the market (owner-only), gating new listing requests
    pub fn deactivate(&mut self, caller: &AccountId) -> MarketResult<()> {
        if caller != &self.owner {
            return Err(MarketError::NotAuthorized(
                "only the market owner can deactivate the market".into(),
            ));
        }
        if !self.active {
            return Err(MarketError::AlreadyInactive);
        }

        self.active = false;
        self.events.push(MarketEvent::MarketDeactivated);
        Ok(())
    }

    /// Get a listing by product id
    pub fn listing(&self, product_id: &str) -> Option<&Listing> {
        self.listings.get(product_id)
    }

    /// Product ids currently on sale, in approval order
    pub fn products_in_sale(&self) -> Vec<String> {
        self.in_sale
            .iter()
            .filter(|id| {
                self.listings
                    .get(id.as_str())
                    .map(Listing::is_on_sale)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Read-only snapshot of the whole market
    pub fn info(&self) -> MarketInfo {
        MarketInfo {
            name: self.name.clone(),
            active: self.active,
            publish_fee: self.publish_fee,
            owner: self.owner,
            listings: self.listings.values().cloned().collect(),
            in_sale: self.products_in_sale(),
        }
    }

    /// Withdraw the retained fees (owner-only)
    pub fn withdraw_fees(&mut self, caller: &AccountId) -> MarketResult<Coin> {
        if caller != &self.owner {
            return Err(MarketError::NotAuthorized(
                "only the market owner can withdraw fees".into(),
            ));
        }

        let amount = self.collected_fees;
        self.collected_fees = Coin::ZERO;
        Ok(amount)
    }

    /// Get and clear pending events
    pub fn take_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }
}
