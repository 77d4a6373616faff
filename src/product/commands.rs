/// 상품 관련 커맨드 처리
/// 1. 등록
/// 2. 수정
/// 3. 재고 변경
/// 4. 삭제
// region:    --- Imports
use super::model::{CreateProductInput, Product, UpdateProductInput, UpdateStockInput};
use super::rules;
use crate::auth::{require_owner_or_admin, require_role};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::query::handlers;
use crate::revalidate::Revalidator;
use crate::users::model::{Role, User};
use sqlx::PgExecutor;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

/// 상품 관리 가능 역할
pub const PRODUCT_ROLES: [Role; 3] = [Role::Farmer, Role::Seller, Role::Admin];

// region:    --- Commands
/// 1. 상품 등록
pub async fn handle_create_product(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    input: CreateProductInput,
) -> AppResult<Product> {
    info!("{:<12} --> 상품 등록 요청: seller={}", "Command", user.id);
    require_role(user, &PRODUCT_ROLES)?;
    input.validate()?;

    let product = insert_product(db_manager.pool(), user.id, &input).await?;

    revalidate_product(revalidator, user, product.id);
    info!("{:<12} --> 상품 등록 완료: id={}", "Command", product.id);
    Ok(product)
}

/// 2. 상품 수정
pub async fn handle_update_product(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    product_id: i64,
    input: UpdateProductInput,
) -> AppResult<Product> {
    info!("{:<12} --> 상품 수정 요청: id={}", "Command", product_id);
    require_role(user, &PRODUCT_ROLES)?;
    input.validate()?;

    let existing = handlers::get_product(db_manager, product_id).await?;
    require_owner_or_admin(user, existing.seller_id)?;

    let product = sqlx::query_as::<_, Product>(
        "UPDATE products
         SET name = COALESCE($1, name),
             description = COALESCE($2, description),
             category = COALESCE($3, category),
             price = COALESCE($4, price),
             unit = COALESCE($5, unit),
             images = COALESCE($6, images),
             status = COALESCE($7, status),
             updated_at = NOW()
         WHERE id = $8
         RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.category)
    .bind(input.price)
    .bind(&input.unit)
    .bind(&input.images)
    .bind(input.status)
    .bind(product_id)
    .fetch_optional(db_manager.pool())
    .await?
    .ok_or(AppError::NotFound("Product"))?;

    revalidate_product(revalidator, user, product.id);
    Ok(product)
}

/// 3. 재고 변경
pub async fn handle_update_stock(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    product_id: i64,
    input: UpdateStockInput,
) -> AppResult<Product> {
    info!(
        "{:<12} --> 재고 변경 요청: id={}, stock={}",
        "Command", product_id, input.stock
    );
    require_role(user, &PRODUCT_ROLES)?;
    input.validate()?;

    let existing = handlers::get_product(db_manager, product_id).await?;
    require_owner_or_admin(user, existing.seller_id)?;

    let status = rules::status_for_stock(existing.status, input.stock);
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET stock = $1, status = $2, updated_at = NOW()
         WHERE id = $3
         RETURNING *",
    )
    .bind(input.stock)
    .bind(status)
    .bind(product_id)
    .fetch_optional(db_manager.pool())
    .await?
    .ok_or(AppError::NotFound("Product"))?;

    revalidate_product(revalidator, user, product.id);
    Ok(product)
}

/// 4. 상품 삭제
/// 진행 중인 경매가 있으면 거절, 장바구니/종료된 경매는 함께 삭제
pub async fn handle_delete_product(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    product_id: i64,
) -> AppResult<()> {
    info!("{:<12} --> 상품 삭제 요청: id={}", "Command", product_id);
    require_role(user, &PRODUCT_ROLES)?;

    let existing = handlers::get_product(db_manager, product_id).await?;
    require_owner_or_admin(user, existing.seller_id)?;

    let has_active_auction: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM auctions WHERE product_id = $1 AND status = 'ACTIVE')",
    )
    .bind(product_id)
    .fetch_one(db_manager.pool())
    .await?;
    if has_active_auction {
        return Err(AppError::Rejected(
            "Product has an active auction".to_string(),
        ));
    }

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(db_manager.pool())
        .await?;

    revalidate_product(revalidator, user, product_id);
    revalidator.revalidate_path("/cart");
    Ok(())
}

// endregion: --- Commands

// region:    --- Helpers
/// 상품 행 삽입, 경매 등록 트랜잭션에서도 사용
pub(crate) async fn insert_product<'e, E>(
    executor: E,
    seller_id: i64,
    input: &CreateProductInput,
) -> Result<Product, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Product>(
        "INSERT INTO products
             (seller_id, name, description, category, price, stock, unit, status, images)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(seller_id)
    .bind(input.name.trim())
    .bind(&input.description)
    .bind(input.category.trim())
    .bind(input.price)
    .bind(input.stock)
    .bind(input.unit.trim())
    .bind(rules::initial_status(input.stock))
    .bind(&input.images)
    .fetch_one(executor)
    .await
}

fn revalidate_product(revalidator: &dyn Revalidator, user: &User, product_id: i64) {
    revalidator.revalidate_paths(&[
        "/products".to_string(),
        format!("/products/{}", product_id),
        user.role.dashboard_path().to_string(),
    ]);
}

// endregion: --- Helpers
