//! Core data structures for the marketplace engine

pub mod account;
pub mod coin;
pub mod listing;

pub use account::{AccountId, ACCOUNT_ID_LENGTH};
pub use coin::Coin;
pub use listing::{Listing, ListingStatus};
