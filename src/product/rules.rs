use super::model::ProductStatus;

/// 재고 변경 후 상태
/// 재고 0 -> SOLD_OUT, 품절 상품에 재고가 생기면 ACTIVE, 그 외 유지
pub fn status_for_stock(current: ProductStatus, stock: i32) -> ProductStatus {
    match (current, stock) {
        (_, 0) => ProductStatus::SoldOut,
        (ProductStatus::SoldOut, _) => ProductStatus::Active,
        (status, _) => status,
    }
}

/// 신규 등록 상품의 초기 상태
pub fn initial_status(stock: i32) -> ProductStatus {
    status_for_stock(ProductStatus::Active, stock)
}
