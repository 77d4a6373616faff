/// 입찰 수락 규칙
/// 아래 조건을 모두 만족할 때만 수락
/// 1. 경매 상태 ACTIVE
/// 2. 현재 시각 < 종료 시각
/// 3. 입찰자 != 판매자
/// 4. 입찰가 > 현재가
/// 5. 입찰가 >= 현재가 + 최소 증가액
// region:    --- Imports
use super::model::{Auction, AuctionStatus};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use thiserror::Error;

// endregion: --- Imports

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BidRejection {
    #[error("Auction is not active")]
    NotActive,

    #[error("Auction has already ended")]
    Ended,

    #[error("You cannot bid on your own auction")]
    OwnAuction,

    #[error("Bid must be higher than the current bid of {current}")]
    NotAboveCurrent { current: i64 },

    #[error("Bid must be at least {minimum}")]
    BelowIncrement { minimum: i64 },

    #[error("Bid amount is out of range")]
    OutOfRange,
}

impl From<BidRejection> for AppError {
    fn from(rejection: BidRejection) -> Self {
        AppError::Rejected(rejection.to_string())
    }
}

/// 다음 입찰 최소 금액, 표현 범위를 넘으면 None
pub fn minimum_next_bid(auction: &Auction) -> Option<i64> {
    auction.current_bid.checked_add(auction.min_increment)
}

pub fn check_bid(
    auction: &Auction,
    bidder_id: i64,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<(), BidRejection> {
    if auction.status != AuctionStatus::Active {
        return Err(BidRejection::NotActive);
    }
    if now >= auction.end_time {
        return Err(BidRejection::Ended);
    }
    if bidder_id == auction.seller_id {
        return Err(BidRejection::OwnAuction);
    }
    if amount <= auction.current_bid {
        return Err(BidRejection::NotAboveCurrent {
            current: auction.current_bid,
        });
    }
    let minimum = minimum_next_bid(auction).ok_or(BidRejection::OutOfRange)?;
    if amount < minimum {
        return Err(BidRejection::BelowIncrement { minimum });
    }
    Ok(())
}

/// 경매 일정 검증, 시작 시각 미지정 시 현재 시각
pub fn check_schedule(
    start_time: Option<DateTime<Utc>>,
    end_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, AppError> {
    let start_time = start_time.unwrap_or(now);
    if end_time <= now {
        return Err(AppError::Validation("End time must be in the future".into()));
    }
    if end_time <= start_time {
        return Err(AppError::Validation(
            "End time must be after start time".into(),
        ));
    }
    Ok(start_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SELLER: i64 = 1;
    const BIDDER: i64 = 2;

    fn auction(current_bid: i64, min_increment: i64) -> Auction {
        let now = Utc::now();
        Auction {
            id: 10,
            product_id: 20,
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
    fn bid_inside_increment_gap_is_rejected() {
        let auction = auction(100, 10);
        assert_eq!(
            check_bid(&auction, BIDDER, 105, Utc::now()),
            Err(BidRejection::BelowIncrement { minimum: 110 })
        );
    }

    #[test]
    fn bid_at_minimum_is_accepted() {
        let auction = auction(100, 10);
        assert_eq!(check_bid(&auction, BIDDER, 110, Utc::now()), Ok(()));
    }

    #[test]
    fn bid_equal_to_current_is_rejected() {
        let auction = auction(100, 10);
        assert_eq!(
            check_bid(&auction, BIDDER, 100, Utc::now()),
            Err(BidRejection::NotAboveCurrent { current: 100 })
        );
    }

    #[test]
    fn seller_cannot_bid() {
        let auction = auction(100, 10);
        assert_eq!(
            check_bid(&auction, SELLER, 500, Utc::now()),
            Err(BidRejection::OwnAuction)
        );
    }

    #[test]
    fn completed_auction_is_rejected() {
        let mut auction = auction(100, 10);
        auction.status = AuctionStatus::Completed;
        assert_eq!(
            check_bid(&auction, BIDDER, 500, Utc::now()),
            Err(BidRejection::NotActive)
        );
    }

    #[test]
    fn pending_auction_is_rejected() {
        let mut auction = auction(100, 10);
        auction.status = AuctionStatus::Pending;
        assert_eq!(
            check_bid(&auction, BIDDER, 500, Utc::now()),
            Err(BidRejection::NotActive)
        );
    }

    #[test]
    fn bid_after_end_time_is_rejected_even_while_active() {
        let auction = auction(100, 10);
        let after_end = auction.end_time + Duration::seconds(1);
        assert_eq!(
            check_bid(&auction, BIDDER, 500, after_end),
            Err(BidRejection::Ended)
        );
        assert_eq!(
            check_bid(&auction, BIDDER, 500, auction.end_time),
            Err(BidRejection::Ended)
        );
    }

    #[test]
    fn overflowing_minimum_rejects_bid_inside_window() {
        let auction = auction(i64::MAX - 5, 10);
        assert_eq!(minimum_next_bid(&auction), None);
        assert_eq!(
            check_bid(&auction, BIDDER, i64::MAX, Utc::now()),
            Err(BidRejection::OutOfRange)
        );
    }

    #[test]
    fn schedule_defaults_start_to_now() {
        let now = Utc::now();
        let start = check_schedule(None, now + Duration::days(1), now).unwrap();
        assert_eq!(start, now);
    }

    #[test]
    fn schedule_rejects_past_end() {
        let now = Utc::now();
        assert!(check_schedule(None, now - Duration::minutes(1), now).is_err());
    }

    #[test]
    fn schedule_rejects_end_before_start() {
        let now = Utc::now();
        let start = now + Duration::days(2);
        assert!(check_schedule(Some(start), now + Duration::days(1), now).is_err());
    }
}
