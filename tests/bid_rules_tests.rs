//! 입찰 수락 규칙 속성 테스트

use chrono::{Duration, Utc};
use farm_market::bidding::model::{Auction, AuctionStatus};
use farm_market::bidding::rules::{check_bid, minimum_next_bid, BidRejection};
use farm_market::cart::rules::{check_added_quantity, check_quantity};
use proptest::prelude::*;

const SELLER: i64 = 1;
const BIDDER: i64 = 2;

fn active_auction(current_bid: i64, min_increment: i64) -> Auction {
    let now = Utc::now();
    Auction {
        id: 1,
        product_id: 1,
        seller_id: SELLER,
        start_price: current_bid,
        current_bid,
        min_increment,
        start_time: now - Duration::hours(1),
        end_time: now + Duration::hours(1),
        status: AuctionStatus::Active,
        winner_id: None,
        created_at: now - Duration::hours(1),
    }
}

#[test]
fn worked_example_from_listing_page() {
    // 현재가 100, 최소 증가액 10
    let auction = active_auction(100, 10);
    assert!(check_bid(&auction, BIDDER, 105, Utc::now()).is_err());
    assert!(check_bid(&auction, BIDDER, 110, Utc::now()).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// 현재가 이하 입찰은 항상 거절
    #[test]
    fn bid_not_above_current_is_rejected(
        current in 0i64..1_000_000,
        increment in 1i64..10_000,
        below in 0i64..1_000_000,
    ) {
        let auction = active_auction(current, increment);
        let amount = current - below;
        prop_assert_eq!(
            check_bid(&auction, BIDDER, amount, Utc::now()),
            Err(BidRejection::NotAboveCurrent { current })
        );
    }

    /// [현재가, 현재가 + 증가액) 구간은 항상 거절
    #[test]
    fn bid_inside_increment_window_is_rejected(
        current in 0i64..1_000_000,
        increment in 1i64..10_000,
        offset in 0i64..10_000,
    ) {
        prop_assume!(offset < increment);
        let auction = active_auction(current, increment);
        prop_assert!(check_bid(&auction, BIDDER, current + offset, Utc::now()).is_err());
    }

    /// 현재가 + 증가액 이상이면 다른 조건이 맞을 때 수락
    #[test]
    fn bid_at_or_above_minimum_is_accepted(
        current in 0i64..1_000_000,
        increment in 1i64..10_000,
        extra in 0i64..1_000_000,
    ) {
        let auction = active_auction(current, increment);
        let amount = minimum_next_bid(&auction).unwrap() + extra;
        prop_assert_eq!(check_bid(&auction, BIDDER, amount, Utc::now()), Ok(()));
    }

    /// 최소 금액 계산이 넘쳐도 증가액 구간 안의 입찰은 거절
    #[test]
    fn bid_inside_window_near_max_is_rejected(
        increment in 1i64..10_000,
        offset in 0i64..10_000,
    ) {
        prop_assume!(offset < increment);
        let auction = active_auction(i64::MAX - offset, increment);
        prop_assert!(check_bid(&auction, BIDDER, i64::MAX, Utc::now()).is_err());
    }

    /// 판매자는 금액과 무관하게 입찰 불가
    #[test]
    fn seller_is_always_rejected(amount in 0i64..i64::MAX) {
        let auction = active_auction(100, 10);
        prop_assert_eq!(
            check_bid(&auction, SELLER, amount, Utc::now()),
            Err(BidRejection::OwnAuction)
        );
    }

    /// 장바구니 수량은 재고를 넘을 수 없다
    #[test]
    fn cart_quantity_never_exceeds_stock(
        stock in 0i32..10_000,
        existing in 0i32..10_000,
        added in 1i32..10_000,
    ) {
        match check_added_quantity(existing, added, stock) {
            Ok(total) => prop_assert!(total <= stock),
            Err(_) => prop_assert!(existing + added > stock),
        }
        prop_assert!(check_quantity(stock + 1, stock).is_err());
    }
}
