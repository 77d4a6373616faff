/// 주문 커맨드 처리
/// 1. 결제 (장바구니 -> 주문)
// region:    --- Imports
use super::model::{CheckoutInput, CheckoutLine, Order, OrderItem, OrderWithItems};
use super::rules;
use crate::auth::require_role;
use crate::cart::commands::CART_ROLES;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::revalidate::Revalidator;
use crate::users::model::User;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

// region:    --- Commands
/// 1. 결제
/// 상품 행을 잠근 뒤 재고를 검증하고 주문 생성, 재고 차감, 장바구니 비우기를 한 번에 처리
pub async fn handle_checkout(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    input: CheckoutInput,
) -> AppResult<OrderWithItems> {
    info!("{:<12} --> 결제 요청: buyer={}", "Command", user.id);
    require_role(user, &CART_ROLES)?;
    input.validate()?;

    let buyer_id = user.id;
    let order = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let lines = sqlx::query_as::<_, CheckoutLine>(
                    "SELECT c.product_id, c.quantity, p.name, p.price, p.stock, p.status,
                            EXISTS(
                                SELECT 1 FROM auctions a WHERE a.product_id = p.id
                            ) AS on_auction
                     FROM cart_items c
                     JOIN products p ON p.id = c.product_id
                     WHERE c.user_id = $1
                     ORDER BY p.id
                     FOR UPDATE OF p",
                )
                .bind(buyer_id)
                .fetch_all(&mut **tx)
                .await?;

                let total = rules::checkout_total(&lines)?;

                let order = sqlx::query_as::<_, Order>(
                    "INSERT INTO orders (buyer_id, total, shipping_address)
                     VALUES ($1, $2, $3)
                     RETURNING *",
                )
                .bind(buyer_id)
                .bind(total)
                .bind(input.shipping_address.trim())
                .fetch_one(&mut **tx)
                .await?;

                let mut items = Vec::with_capacity(lines.len());
                for line in &lines {
                    let item = sqlx::query_as::<_, OrderItem>(
                        "INSERT INTO order_items
                             (order_id, product_id, product_name, quantity, unit_price)
                         VALUES ($1, $2, $3, $4, $5)
                         RETURNING *",
                    )
                    .bind(order.id)
                    .bind(line.product_id)
                    .bind(&line.name)
                    .bind(line.quantity)
                    .bind(line.price)
                    .fetch_one(&mut **tx)
                    .await?;
                    items.push(item);

                    sqlx::query(
                        "UPDATE products
                         SET stock = stock - $1,
                             status = CASE WHEN stock - $1 = 0
                                           THEN 'SOLD_OUT'::product_status
                                           ELSE status END,
                             updated_at = NOW()
                         WHERE id = $2",
                    )
                    .bind(line.quantity)
                    .bind(line.product_id)
                    .execute(&mut **tx)
                    .await?;
                }

                sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
                    .bind(buyer_id)
                    .execute(&mut **tx)
                    .await?;

                Ok::<_, AppError>(OrderWithItems { order, items })
            })
        })
        .await?;

    revalidator.revalidate_paths(&[
        "/cart".to_string(),
        "/orders".to_string(),
        "/products".to_string(),
    ]);
    info!(
        "{:<12} --> 주문 생성: order={}, total={}",
        "Command", order.order.id, order.order.total
    );
    Ok(order)
}

// endregion: --- Commands
