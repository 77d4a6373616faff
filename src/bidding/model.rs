use crate::product::model::{CreateProductInput, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Pending,
    Active,
    Completed,
}

// 경매 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub product_id: i64,
    pub seller_id: i64,
    pub start_price: i64,
    pub current_bid: i64,
    pub min_increment: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AuctionStatus,
    pub winner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

// 입찰 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// 경매 + 대상 상품
#[derive(Debug, Clone, Serialize)]
pub struct AuctionDetail {
    pub auction: Auction,
    pub product: Product,
}

/// 경매 등록 요청 (상품과 함께 생성)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAuctionInput {
    pub product: CreateProductInput,
    #[validate(range(min = 0, max = 1000000000000))]
    pub start_price: i64,
    #[validate(range(min = 1, max = 1000000000000))]
    pub min_increment: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
}

/// 입찰 명령
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBidCommand {
    pub amount: i64,
}

/// 경매 목록 필터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionFilter {
    pub status: Option<AuctionStatus>,
}
