use crate::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
    Pending,
    SoldOut,
}

// 상품 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    /// 최소 화폐 단위
    pub price: i64,
    pub stock: i32,
    pub unit: String,
    pub status: ProductStatus,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 상품 등록 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub category: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 30), custom = "not_blank")]
    pub unit: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub images: Vec<String>,
}

/// 상품 수정 요청, 없는 필드는 유지
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(length(min = 1, max = 30), custom = "not_blank")]
    pub unit: Option<String>,
    #[validate(length(max = 10))]
    pub images: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStockInput {
    #[validate(range(min = 0))]
    pub stock: i32,
}

/// 상품 목록 필터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub seller_id: Option<i64>,
    pub search: Option<String>,
}
