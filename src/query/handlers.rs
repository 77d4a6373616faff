// region:    --- Imports
use super::queries;
use crate::bidding::model::{Auction, AuctionDetail, AuctionFilter, Bid};
use crate::cart::model::{Cart, CartLine};
use crate::cart::rules;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::order::model::{Order, OrderItem, OrderWithItems};
use crate::product::model::{Product, ProductFilter};
use sqlx::Row;
use std::collections::HashMap;
use tracing::info;

// endregion: --- Imports

// region:    --- Product Queries

/// 상품 조회
pub async fn get_product(db_manager: &DatabaseManager, product_id: i64) -> AppResult<Product> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", product_id);
    sqlx::query_as::<_, Product>(queries::GET_PRODUCT)
        .bind(product_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or(AppError::NotFound("Product"))
}

/// 판매 중 상품 목록
pub async fn list_products(
    db_manager: &DatabaseManager,
    filter: &ProductFilter,
) -> AppResult<Vec<Product>> {
    info!("{:<12} --> 상품 목록 조회: {:?}", "Query", filter);
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty());
    let products = sqlx::query_as::<_, Product>(queries::LIST_PRODUCTS)
        .bind(&filter.category)
        .bind(filter.seller_id)
        .bind(search)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(products)
}

/// 판매자 본인 상품 목록
pub async fn list_seller_products(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> AppResult<Vec<Product>> {
    info!("{:<12} --> 판매자 상품 조회 seller: {}", "Query", seller_id);
    let products = sqlx::query_as::<_, Product>(queries::LIST_SELLER_PRODUCTS)
        .bind(seller_id)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(products)
}

// endregion: --- Product Queries

// region:    --- Auction Queries

/// 경매 상태 조회 (상품 포함)
pub async fn get_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> AppResult<AuctionDetail> {
    info!("{:<12} --> 경매 상태 조회 id: {}", "Query", auction_id);
    let auction = sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
        .bind(auction_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or(AppError::NotFound("Auction"))?;
    let product = get_product(db_manager, auction.product_id).await?;
    Ok(AuctionDetail { auction, product })
}

/// 경매 목록 조회 (종료 임박 순)
pub async fn list_auctions(
    db_manager: &DatabaseManager,
    filter: &AuctionFilter,
) -> AppResult<Vec<AuctionDetail>> {
    info!("{:<12} --> 경매 목록 조회: {:?}", "Query", filter);
    let auctions = sqlx::query_as::<_, Auction>(queries::LIST_AUCTIONS)
        .bind(filter.status)
        .fetch_all(db_manager.pool())
        .await?;

    let product_ids = auctions.iter().map(|a| a.product_id).collect::<Vec<_>>();
    let mut products = sqlx::query_as::<_, Product>(queries::GET_PRODUCTS_BY_IDS)
        .bind(&product_ids)
        .fetch_all(db_manager.pool())
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect::<HashMap<_, _>>();

    // 상품이 cascade 로 사라진 경매는 목록에서 제외
    Ok(auctions
        .into_iter()
        .filter_map(|auction| {
            products
                .remove(&auction.product_id)
                .map(|product| AuctionDetail { auction, product })
        })
        .collect())
}

/// 최고 입찰가 조회
pub async fn get_highest_bid(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> AppResult<Option<i64>> {
    info!("{:<12} --> 최고 입찰가 조회 id: {}", "Query", auction_id);
    let row = sqlx::query(queries::GET_HIGHEST_BID)
        .bind(auction_id)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(row.try_get("highest_bid")?)
}

/// 입찰 이력 조회 (최신순)
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> AppResult<Vec<Bid>> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", auction_id);
    let bids = sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
        .bind(auction_id)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(bids)
}

// endregion: --- Auction Queries

// region:    --- Cart & Order Queries

/// 장바구니 조회
pub async fn get_cart(db_manager: &DatabaseManager, user_id: i64) -> AppResult<Cart> {
    info!("{:<12} --> 장바구니 조회 user: {}", "Query", user_id);
    let items = sqlx::query_as::<_, CartLine>(queries::GET_CART)
        .bind(user_id)
        .fetch_all(db_manager.pool())
        .await?;
    let subtotal = rules::subtotal(&items)
        .ok_or_else(|| AppError::Internal("cart subtotal overflow".into()))?;
    Ok(Cart { items, subtotal })
}

/// 주문 목록 조회 (항목 포함)
pub async fn list_orders(
    db_manager: &DatabaseManager,
    buyer_id: i64,
) -> AppResult<Vec<OrderWithItems>> {
    info!("{:<12} --> 주문 목록 조회 buyer: {}", "Query", buyer_id);
    let orders = sqlx::query_as::<_, Order>(queries::LIST_ORDERS)
        .bind(buyer_id)
        .fetch_all(db_manager.pool())
        .await?;

    let order_ids = orders.iter().map(|o| o.id).collect::<Vec<_>>();
    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in sqlx::query_as::<_, OrderItem>(queries::GET_ORDER_ITEMS)
        .bind(&order_ids)
        .fetch_all(db_manager.pool())
        .await?
    {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}

// endregion: --- Cart & Order Queries
