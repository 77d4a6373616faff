/// 장바구니 커맨드 처리
/// 1. 담기
/// 2. 수량 변경
/// 3. 항목 삭제
/// 4. 비우기
// region:    --- Imports
use super::model::{AddToCartInput, CartItem, UpdateCartInput};
use super::rules;
use crate::auth::require_role;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::product::model::{Product, ProductStatus};
use crate::revalidate::Revalidator;
use crate::users::model::{Role, User};
use sqlx::PgConnection;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

/// 장바구니 사용 가능 역할 (구매자)
pub const CART_ROLES: [Role; 3] = [Role::User, Role::Contractor, Role::Admin];

// region:    --- Commands
/// 1. 장바구니 담기
/// 이미 담긴 상품이면 수량을 더한다. 합계가 재고를 넘으면 거절
/// 상품 행을 잠근 뒤 기존 수량을 읽으므로 동시 요청이 서로의 수량을 덮어쓰지 않는다
pub async fn handle_add_to_cart(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    input: AddToCartInput,
) -> AppResult<CartItem> {
    info!(
        "{:<12} --> 장바구니 담기: user={}, product={}, quantity={}",
        "Command", user.id, input.product_id, input.quantity
    );
    require_role(user, &CART_ROLES)?;
    input.validate()?;

    let user_id = user.id;
    let item = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let product = lock_product(&mut **tx, input.product_id).await?;
                if product.status != ProductStatus::Active {
                    return Err(AppError::Rejected("Product is not available".into()));
                }
                if is_auction_lot(&mut **tx, product.id).await? {
                    return Err(AppError::Rejected(
                        "Product is sold by auction only".into(),
                    ));
                }

                let existing: Option<i32> = sqlx::query_scalar(
                    "SELECT quantity FROM cart_items WHERE user_id = $1 AND product_id = $2",
                )
                .bind(user_id)
                .bind(input.product_id)
                .fetch_optional(&mut **tx)
                .await?;

                let quantity = rules::check_added_quantity(
                    existing.unwrap_or(0),
                    input.quantity,
                    product.stock,
                )?;

                let item = sqlx::query_as::<_, CartItem>(
                    "INSERT INTO cart_items (user_id, product_id, quantity)
                     VALUES ($1, $2, $3)
                     ON CONFLICT (user_id, product_id)
                     DO UPDATE SET quantity = EXCLUDED.quantity, updated_at = NOW()
                     RETURNING *",
                )
                .bind(user_id)
                .bind(input.product_id)
                .bind(quantity)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, AppError>(item)
            })
        })
        .await?;

    revalidator.revalidate_path("/cart");
    Ok(item)
}

/// 2. 수량 변경
pub async fn handle_update_cart_quantity(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    product_id: i64,
    input: UpdateCartInput,
) -> AppResult<CartItem> {
    info!(
        "{:<12} --> 장바구니 수량 변경: user={}, product={}, quantity={}",
        "Command", user.id, product_id, input.quantity
    );
    require_role(user, &CART_ROLES)?;
    input.validate()?;

    let user_id = user.id;
    let quantity = input.quantity;
    let item = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let product = lock_product(&mut **tx, product_id).await?;
                rules::check_quantity(quantity, product.stock)?;

                let item = sqlx::query_as::<_, CartItem>(
                    "UPDATE cart_items SET quantity = $1, updated_at = NOW()
                     WHERE user_id = $2 AND product_id = $3
                     RETURNING *",
                )
                .bind(quantity)
                .bind(user_id)
                .bind(product_id)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(AppError::NotFound("Cart item"))?;

                Ok::<_, AppError>(item)
            })
        })
        .await?;

    revalidator.revalidate_path("/cart");
    Ok(item)
}

/// 3. 항목 삭제
pub async fn handle_remove_from_cart(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    product_id: i64,
) -> AppResult<()> {
    info!(
        "{:<12} --> 장바구니 항목 삭제: user={}, product={}",
        "Command", user.id, product_id
    );
    require_role(user, &CART_ROLES)?;

    let removed = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
        .bind(user.id)
        .bind(product_id)
        .execute(db_manager.pool())
        .await?
        .rows_affected();
    if removed == 0 {
        return Err(AppError::NotFound("Cart item"));
    }

    revalidator.revalidate_path("/cart");
    Ok(())
}

/// 4. 장바구니 비우기
pub async fn handle_clear_cart(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
) -> AppResult<u64> {
    info!("{:<12} --> 장바구니 비우기: user={}", "Command", user.id);
    require_role(user, &CART_ROLES)?;

    let removed = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user.id)
        .execute(db_manager.pool())
        .await?
        .rows_affected();

    revalidator.revalidate_path("/cart");
    Ok(removed)
}

// endregion: --- Commands

// region:    --- Helpers
/// 상품 행 잠금, 같은 상품에 대한 담기/수량 변경/결제가 순서대로 실행된다
async fn lock_product(conn: &mut PgConnection, product_id: i64) -> AppResult<Product> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
        .bind(product_id)
        .fetch_optional(conn)
        .await?
        .ok_or(AppError::NotFound("Product"))
}

/// 경매에 올라간 상품은 장바구니로 살 수 없다
async fn is_auction_lot(conn: &mut PgConnection, product_id: i64) -> AppResult<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM auctions WHERE product_id = $1)")
            .bind(product_id)
            .fetch_one(conn)
            .await?;
    Ok(exists)
}

// endregion: --- Helpers
