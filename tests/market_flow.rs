//! End-to-end market flows
//!
//! Exercises the full listing lifecycle the way an external runtime would:
//! request, approve, buy, remove, plus activation gating and the snapshot
//! surface.

use tradepost::*;

fn account(seed: &[u8]) -> AccountId {
    AccountId::from_seed(seed)
}

fn ea_games_market() -> (Market, AccountId) {
    let owner = account(b"owner");
    let market = Market::new(
        MarketConfig::new("EA_GAMES", Coin::from_units(100_000)),
        owner,
    );
    (market, owner)
}

#[test]
fn full_listing_lifecycle() {
    let (mut market, owner) = ea_games_market();
    let seller = account(b"user1");
    let buyer = account(b"user2");
    let price = Coin::from_units(100_000);

    market
        .request_listing("1234", "eych", price, Coin::from_units(100_000), &seller)
        .unwrap();
    market.approve_listing("1234", &owner).unwrap();
    let receipt = market.buy("1234", Coin::from_units(100_000), &buyer).unwrap();
    market.remove_from_listing("1234", "buyToken", &buyer).unwrap();

    // The record is gone afterwards
    assert!(market.listing("1234").is_none());
    assert!(market.products_in_sale().is_empty());

    // The runtime settles the sale with the seller
    assert_eq!(receipt.seller, seller);
    assert_eq!(receipt.price, price);
    assert_eq!(receipt.change, Coin::ZERO);

    // One event per successful operation, in order
    assert_eq!(
        market.take_events(),
        vec![
            MarketEvent::ListingRequestReceived {
                product_id: "1234".into(),
                owner: seller,
                price,
                token: "eych".into(),
            },
            MarketEvent::ListingRequestApproved {
                product_id: "1234".into(),
                owner: seller,
                price,
            },
            MarketEvent::ProductSold {
                product_id: "1234".into(),
                seller,
                buyer,
                price,
            },
            MarketEvent::ListingRemoved {
                product_id: "1234".into(),
                token: "buyToken".into(),
                owner: buyer,
            },
        ]
    );
}

#[test]
fn new_market_snapshot_is_empty() {
    let (market, owner) = ea_games_market();
    let info = market.info();

    assert_eq!(info.name, "EA_GAMES");
    assert!(info.active);
    assert_eq!(info.publish_fee, Coin::from_units(100_000));
    assert_eq!(info.owner, owner);
    assert!(info.listings.is_empty());
    assert!(info.in_sale.is_empty());
}

#[test]
fn deactivation_gates_new_requests_only() {
    let (mut market, owner) = ea_games_market();
    let seller = account(b"user1");
    let buyer = account(b"user2");
    let price = Coin::from_units(1_000);
    let fee = Coin::from_units(100_000);

    market.request_listing("product-1", "token-1", price, fee, &seller).unwrap();
    market.approve_listing("product-1", &owner).unwrap();

    market.deactivate(&owner).unwrap();

    // New requests are gated...
    assert_eq!(
        market
            .request_listing("product-2", "token-2", price, fee, &seller)
            .unwrap_err(),
        MarketError::MarketInactive
    );
    // ...and the fee check never applies to a gated request
    assert_eq!(
        market
            .request_listing("product-2", "token-2", price, Coin::from_units(1), &seller)
            .unwrap_err(),
        MarketError::MarketInactive
    );

    // Already-approved products can still be bought
    market.buy("product-1", price, &buyer).unwrap();

    market.activate(&owner).unwrap();
    market.request_listing("product-2", "token-2", price, fee, &seller).unwrap();
}

#[test]
fn error_matrix() {
    let (mut market, owner) = ea_games_market();
    let seller = account(b"user1");
    let buyer = account(b"user2");
    let stranger = account(b"user5");
    let price = Coin::from_units(1_000);
    let fee = Coin::from_units(100_000);

    // Fee below publish fee
    assert!(matches!(
        market.request_listing("p", "t", price, Coin::from_units(1), &seller),
        Err(MarketError::InsufficientFee { .. })
    ));

    // Approve unknown product
    assert_eq!(
        market.approve_listing("p", &owner).unwrap_err(),
        MarketError::ProductNotFound("p".into())
    );

    // Buy unknown product
    assert_eq!(
        market.buy("p", price, &buyer).unwrap_err(),
        MarketError::ProductNotFound("p".into())
    );

    market.request_listing("p", "t", price, fee, &seller).unwrap();

    // Buy before approval
    assert!(matches!(
        market.buy("p", price, &buyer),
        Err(MarketError::InvalidStatus { .. })
    ));

    market.approve_listing("p", &owner).unwrap();

    // Underpaid purchase
    assert!(matches!(
        market.buy("p", Coin::ZERO, &buyer),
        Err(MarketError::InsufficientPayment { .. })
    ));

    // Remove before sale
    assert!(matches!(
        market.remove_from_listing("p", "t", &seller),
        Err(MarketError::InvalidStatus { .. })
    ));

    market.buy("p", price, &buyer).unwrap();

    // Second purchase after the sale
    assert!(matches!(
        market.buy("p", price, &stranger),
        Err(MarketError::InvalidStatus { .. })
    ));

    // Removal by anyone but the buyer
    assert!(matches!(
        market.remove_from_listing("p", "t", &stranger),
        Err(MarketError::NotAuthorized(_))
    ));

    // Toggles by non-owner
    assert!(matches!(market.deactivate(&stranger), Err(MarketError::NotAuthorized(_))));
    assert!(matches!(market.activate(&stranger), Err(MarketError::NotAuthorized(_))));

    // Redundant toggle
    assert_eq!(market.activate(&owner).unwrap_err(), MarketError::AlreadyActive);

    // None of the failures emitted an event
    let events = market.take_events();
    assert_eq!(events.len(), 3); // request, approve, sale
}

#[test]
fn event_payloads_serialize() {
    let (mut market, owner) = ea_games_market();
    let seller = account(b"user1");

    market
        .request_listing("1234", "eych", Coin::from_units(100_000), Coin::from_units(100_000), &seller)
        .unwrap();
    market.approve_listing("1234", &owner).unwrap();

    let events = market.take_events();
    let json = serde_json::to_value(&events).unwrap();

    // Payload fields come through under the event name
    assert_eq!(json[0]["ListingRequestReceived"]["product_id"], "1234");
    assert_eq!(json[0]["ListingRequestReceived"]["token"], "eych");
    assert_eq!(json[1]["ListingRequestApproved"]["price"], 100_000);

    // Snapshots serialize too
    let info = serde_json::to_value(market.info()).unwrap();
    assert_eq!(info["name"], "EA_GAMES");
    assert_eq!(info["in_sale"][0], "1234");
}

#[test]
fn handle_interleaves_mixed_callers() {
    let owner = account(b"owner");
    let handle = MarketHandle::new(Market::new(
        MarketConfig::new("EA_GAMES", Coin::from_units(100_000)),
        owner,
    ));
    let fee = Coin::from_units(100_000);
    let price = Coin::from_units(1_000);

    let sellers: Vec<AccountId> = (0..4)
        .map(|i| account(format!("seller-{i}").as_bytes()))
        .collect();

    let mut threads = Vec::new();
    for (i, seller) in sellers.iter().enumerate() {
        let handle = handle.clone();
        let seller = *seller;
        threads.push(std::thread::spawn(move || {
            handle
                .request_listing(&format!("product-{i}"), "tok", price, fee, &seller)
                .unwrap();
        }));
    }
    for t in threads {
        t.join().unwrap();
    }

    for i in 0..4 {
        handle.approve_listing(&format!("product-{i}"), &owner).unwrap();
    }

    let buyer = account(b"buyer");
    let receipt = handle.buy("product-2", price, &buyer).unwrap();
    assert_eq!(receipt.seller, sellers[2]);
    assert_eq!(handle.products_in_sale().len(), 3);
}
