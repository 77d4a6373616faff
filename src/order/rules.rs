use super::model::CheckoutLine;
use crate::error::AppError;
use crate::product::model::ProductStatus;

/// 결제 가능 여부 검사 후 총액 반환
pub fn checkout_total(lines: &[CheckoutLine]) -> Result<i64, AppError> {
    if lines.is_empty() {
        return Err(AppError::Rejected("Cart is empty".into()));
    }

    let mut total: i64 = 0;
    for line in lines {
        if line.status != ProductStatus::Active || line.on_auction {
            return Err(AppError::Rejected(format!(
                "{} is no longer available",
                line.name
            )));
        }
        if line.quantity > line.stock {
            return Err(AppError::Rejected(format!(
                "Only {} of {} left in stock",
                line.stock, line.name
            )));
        }
        total = line
            .price
            .checked_mul(i64::from(line.quantity))
            .and_then(|amount| total.checked_add(amount))
            .ok_or_else(|| AppError::Rejected("Order total is too large".into()))?;
    }
    Ok(total)
}
