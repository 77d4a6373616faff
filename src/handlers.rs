// region:    --- Imports
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::bidding::commands as bidding;
use crate::bidding::model::{AuctionFilter, CreateAuctionInput, PlaceBidCommand};
use crate::cart::commands as cart;
use crate::cart::model::{AddToCartInput, UpdateCartInput};
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::media;
use crate::order::commands as order;
use crate::order::model::CheckoutInput;
use crate::product::commands as product;
use crate::product::model::{
    CreateProductInput, ProductFilter, UpdateProductInput, UpdateStockInput,
};
use crate::query;
use crate::users::commands as users;
use crate::users::model::CompleteOnboardingInput;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

// endregion: --- Imports

type ActionResult = AppResult<Json<Value>>;

// region:    --- Command Handlers

/// 온보딩 완료
pub async fn handle_complete_onboarding(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CompleteOnboardingInput>,
) -> ActionResult {
    info!("{:<12} --> 온보딩 요청 user: {}", "Handler", user.id);
    let user =
        users::handle_complete_onboarding(&state.db, state.revalidator.as_ref(), &user, input)
            .await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

/// 상품 등록
pub async fn handle_create_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateProductInput>,
) -> ActionResult {
    info!("{:<12} --> 상품 등록 요청 user: {}", "Handler", user.id);
    let product =
        product::handle_create_product(&state.db, state.revalidator.as_ref(), &user, input)
            .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// 상품 수정
pub async fn handle_update_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(product_id): AppPath<i64>,
    AppJson(input): AppJson<UpdateProductInput>,
) -> ActionResult {
    info!("{:<12} --> 상품 수정 요청 id: {}", "Handler", product_id);
    let product = product::handle_update_product(
        &state.db,
        state.revalidator.as_ref(),
        &user,
        product_id,
        input,
    )
    .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// 재고 변경
pub async fn handle_update_stock(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(product_id): AppPath<i64>,
    AppJson(input): AppJson<UpdateStockInput>,
) -> ActionResult {
    info!("{:<12} --> 재고 변경 요청 id: {}", "Handler", product_id);
    let product = product::handle_update_stock(
        &state.db,
        state.revalidator.as_ref(),
        &user,
        product_id,
        input,
    )
    .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// 상품 삭제
pub async fn handle_delete_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(product_id): AppPath<i64>,
) -> ActionResult {
    info!("{:<12} --> 상품 삭제 요청 id: {}", "Handler", product_id);
    product::handle_delete_product(&state.db, state.revalidator.as_ref(), &user, product_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// 경매 등록
pub async fn handle_create_auction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateAuctionInput>,
) -> ActionResult {
    info!("{:<12} --> 경매 등록 요청 user: {}", "Handler", user.id);
    let (product, auction) =
        bidding::handle_create_auction(&state.db, state.revalidator.as_ref(), &user, input)
            .await?;
    Ok(Json(
        json!({ "success": true, "auction": auction, "product": product }),
    ))
}

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(auction_id): AppPath<i64>,
    AppJson(cmd): AppJson<PlaceBidCommand>,
) -> ActionResult {
    info!(
        "{:<12} --> 입찰 요청 auction: {}, amount: {}",
        "Handler", auction_id, cmd.amount
    );
    let (auction, bid) =
        bidding::handle_place_bid(&state.db, state.revalidator.as_ref(), &user, auction_id, cmd)
            .await?;
    Ok(Json(json!({ "success": true, "auction": auction, "bid": bid })))
}

/// 경매 종료
pub async fn handle_end_auction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(auction_id): AppPath<i64>,
) -> ActionResult {
    info!("{:<12} --> 경매 종료 요청 auction: {}", "Handler", auction_id);
    let (auction, winning_bid) =
        bidding::handle_end_auction(&state.db, state.revalidator.as_ref(), &user, auction_id)
            .await?;
    Ok(Json(
        json!({ "success": true, "auction": auction, "winning_bid": winning_bid }),
    ))
}

/// 장바구니 담기
pub async fn handle_add_to_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<AddToCartInput>,
) -> ActionResult {
    info!(
        "{:<12} --> 장바구니 담기 product: {}",
        "Handler", input.product_id
    );
    let item = cart::handle_add_to_cart(&state.db, state.revalidator.as_ref(), &user, input)
        .await?;
    Ok(Json(json!({ "success": true, "cart_item": item })))
}

/// 장바구니 수량 변경
pub async fn handle_update_cart_quantity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(product_id): AppPath<i64>,
    AppJson(input): AppJson<UpdateCartInput>,
) -> ActionResult {
    info!(
        "{:<12} --> 장바구니 수량 변경 product: {}",
        "Handler", product_id
    );
    let item = cart::handle_update_cart_quantity(
        &state.db,
        state.revalidator.as_ref(),
        &user,
        product_id,
        input,
    )
    .await?;
    Ok(Json(json!({ "success": true, "cart_item": item })))
}

/// 장바구니 항목 삭제
pub async fn handle_remove_from_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(product_id): AppPath<i64>,
) -> ActionResult {
    info!(
        "{:<12} --> 장바구니 항목 삭제 product: {}",
        "Handler", product_id
    );
    cart::handle_remove_from_cart(&state.db, state.revalidator.as_ref(), &user, product_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// 장바구니 비우기
pub async fn handle_clear_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ActionResult {
    info!("{:<12} --> 장바구니 비우기 user: {}", "Handler", user.id);
    let removed = cart::handle_clear_cart(&state.db, state.revalidator.as_ref(), &user).await?;
    Ok(Json(json!({ "success": true, "removed": removed })))
}

/// 결제
pub async fn handle_checkout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CheckoutInput>,
) -> ActionResult {
    info!("{:<12} --> 결제 요청 user: {}", "Handler", user.id);
    let order =
        order::handle_checkout(&state.db, state.revalidator.as_ref(), &user, input).await?;
    Ok(Json(json!({ "success": true, "order": order })))
}

/// 이미지 업로드
pub async fn handle_upload_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> ActionResult {
    info!("{:<12} --> 이미지 업로드 요청 user: {}", "Handler", user.id);
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let url =
        media::handle_upload_image(state.media.as_ref(), &user, body, content_type).await?;
    Ok(Json(json!({ "success": true, "url": url })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 헬스 체크
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "success": true, "status": "ok" }))
}

/// 로그인 사용자 조회
pub async fn handle_get_me(CurrentUser(user): CurrentUser) -> ActionResult {
    info!("{:<12} --> 사용자 조회 id: {}", "HandlerQuery", user.id);
    Ok(Json(json!({ "success": true, "user": user })))
}

/// 상품 목록 조회
pub async fn handle_list_products(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ProductFilter>,
) -> ActionResult {
    info!("{:<12} --> 상품 목록 조회", "HandlerQuery");
    let products = query::handlers::list_products(&state.db, &filter).await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

/// 판매자 본인 상품 목록
pub async fn handle_list_my_products(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ActionResult {
    info!("{:<12} --> 내 상품 조회 user: {}", "HandlerQuery", user.id);
    crate::auth::require_role(&user, &product::PRODUCT_ROLES)?;
    let products = query::handlers::list_seller_products(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

/// 상품 조회
pub async fn handle_get_product(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<i64>,
) -> ActionResult {
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", product_id);
    let product = query::handlers::get_product(&state.db, product_id).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// 경매 목록 조회
pub async fn handle_list_auctions(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<AuctionFilter>,
) -> ActionResult {
    info!("{:<12} --> 경매 목록 조회", "HandlerQuery");
    let auctions = query::handlers::list_auctions(&state.db, &filter).await?;
    Ok(Json(json!({ "success": true, "auctions": auctions })))
}

/// 경매 상태 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    AppPath(auction_id): AppPath<i64>,
) -> ActionResult {
    info!("{:<12} --> 경매 상태 조회 id: {}", "HandlerQuery", auction_id);
    let detail = query::handlers::get_auction(&state.db, auction_id).await?;
    Ok(Json(json!({
        "success": true,
        "auction": detail.auction,
        "product": detail.product,
    })))
}

/// 최고 입찰가 조회
pub async fn handle_get_highest_bid(
    State(state): State<AppState>,
    AppPath(auction_id): AppPath<i64>,
) -> ActionResult {
    info!(
        "{:<12} --> 최고 입찰가 조회 id: {}",
        "HandlerQuery", auction_id
    );
    let highest_bid = query::handlers::get_highest_bid(&state.db, auction_id).await?;
    Ok(Json(json!({ "success": true, "highest_bid": highest_bid })))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(state): State<AppState>,
    AppPath(auction_id): AppPath<i64>,
) -> ActionResult {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "HandlerQuery", auction_id);
    let bids = query::handlers::get_bid_history(&state.db, auction_id).await?;
    Ok(Json(json!({ "success": true, "bids": bids })))
}

/// 장바구니 조회
pub async fn handle_get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ActionResult {
    info!("{:<12} --> 장바구니 조회 user: {}", "HandlerQuery", user.id);
    crate::auth::require_role(&user, &cart::CART_ROLES)?;
    let cart = query::handlers::get_cart(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

/// 주문 목록 조회
pub async fn handle_list_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ActionResult {
    info!("{:<12} --> 주문 목록 조회 user: {}", "HandlerQuery", user.id);
    crate::auth::require_role(&user, &cart::CART_ROLES)?;
    let orders = query::handlers::list_orders(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "orders": orders })))
}

// endregion: --- Query Handlers
