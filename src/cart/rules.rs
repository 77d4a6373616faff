use super::model::CartLine;
use crate::error::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartRejection {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Only {stock} left in stock")]
    ExceedsStock { stock: i32 },
}

impl From<CartRejection> for AppError {
    fn from(rejection: CartRejection) -> Self {
        AppError::Rejected(rejection.to_string())
    }
}

/// 장바구니 수량은 1 이상, 재고 이하
pub fn check_quantity(quantity: i32, stock: i32) -> Result<(), CartRejection> {
    if quantity < 1 {
        return Err(CartRejection::InvalidQuantity);
    }
    if quantity > stock {
        return Err(CartRejection::ExceedsStock {
            stock: stock.max(0),
        });
    }
    Ok(())
}

/// 기존 수량에 추가할 때의 검사
pub fn check_added_quantity(existing: i32, added: i32, stock: i32) -> Result<i32, CartRejection> {
    if added < 1 {
        return Err(CartRejection::InvalidQuantity);
    }
    let total = existing.checked_add(added).ok_or(CartRejection::ExceedsStock {
        stock: stock.max(0),
    })?;
    check_quantity(total, stock)?;
    Ok(total)
}

/// 소계, 넘치면 None
pub fn subtotal(lines: &[CartLine]) -> Option<i64> {
    lines.iter().try_fold(0i64, |acc, line| {
        line.price
            .checked_mul(i64::from(line.quantity))
            .and_then(|amount| acc.checked_add(amount))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::model::ProductStatus;

    fn line(price: i64, quantity: i32) -> CartLine {
        CartLine {
            product_id: 1,
            quantity,
            name: "Tomatoes".into(),
            price,
            stock: 100,
            unit: "kg".into(),
            status: ProductStatus::Active,
            image: None,
        }
    }

    #[test]
    fn quantity_up_to_stock_is_allowed() {
        assert_eq!(check_quantity(5, 5), Ok(()));
    }

    #[test]
    fn quantity_over_stock_is_rejected() {
        assert_eq!(
            check_quantity(6, 5),
            Err(CartRejection::ExceedsStock { stock: 5 })
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert_eq!(check_quantity(0, 5), Err(CartRejection::InvalidQuantity));
    }

    #[test]
    fn adding_counts_existing_quantity() {
        assert_eq!(check_added_quantity(3, 2, 5), Ok(5));
        assert_eq!(
            check_added_quantity(3, 3, 5),
            Err(CartRejection::ExceedsStock { stock: 5 })
        );
    }

    #[test]
    fn adding_does_not_overflow() {
        assert!(check_added_quantity(i32::MAX, 1, i32::MAX).is_err());
    }

    #[test]
    fn subtotal_sums_lines() {
        assert_eq!(subtotal(&[line(250, 2), line(100, 3)]), Some(800));
        assert_eq!(subtotal(&[]), Some(0));
        assert_eq!(subtotal(&[line(i64::MAX, 2)]), None);
    }
}
