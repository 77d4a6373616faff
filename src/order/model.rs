use crate::product::model::ProductStatus;
use crate::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 주문 상태, 상태 전이는 외부 시스템 담당
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

// 주문 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub status: OrderStatus,
    pub total: i64,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
}

// 주문 항목 모델, 상품이 삭제돼도 이름과 단가는 남는다
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// 결제 대상 (장바구니 + 잠금된 상품 행)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: i32,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub status: ProductStatus,
    /// 경매 상품 여부
    pub on_auction: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutInput {
    #[validate(length(min = 5, max = 500), custom = "not_blank")]
    pub shipping_address: String,
}
