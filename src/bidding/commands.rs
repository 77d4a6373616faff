/// 경매 관련 커맨드 처리
/// 1. 경매 등록 (상품 + 경매)
/// 2. 입찰
/// 3. 경매 종료 (수동)
// region:    --- Imports
use super::model::{Auction, AuctionStatus, Bid, CreateAuctionInput, PlaceBidCommand};
use super::rules;
use crate::auth::{require_owner_or_admin, require_role};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::product::commands::insert_product;
use crate::product::model::Product;
use crate::revalidate::Revalidator;
use crate::users::model::{Role, User};
use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

// endregion: --- Imports

/// 경매 등록 가능 역할
pub const AUCTION_OWNER_ROLES: [Role; 2] = [Role::Farmer, Role::Seller];

/// 입찰 가능 역할
pub const BIDDER_ROLES: [Role; 4] = [Role::User, Role::Farmer, Role::Seller, Role::Contractor];

// 행 잠금으로 확인과 갱신 사이에 다른 입찰이 끼어들지 못하게 한다
const LOCK_AUCTION: &str = "SELECT * FROM auctions WHERE id = $1 FOR UPDATE";

// region:    --- Commands
/// 1. 경매 등록
/// 상품과 경매를 하나의 트랜잭션으로 생성
pub async fn handle_create_auction(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    input: CreateAuctionInput,
) -> AppResult<(Product, Auction)> {
    info!("{:<12} --> 경매 등록 요청: seller={}", "Command", user.id);
    require_role(user, &AUCTION_OWNER_ROLES)?;
    input.validate()?;
    input.product.validate()?;
    let start_time = rules::check_schedule(input.start_time, input.end_time, Utc::now())?;

    let seller_id = user.id;
    let (product, auction) = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let product = insert_product(&mut **tx, seller_id, &input.product).await?;

                let auction = sqlx::query_as::<_, Auction>(
                    "INSERT INTO auctions
                         (product_id, seller_id, start_price, current_bid, min_increment,
                          start_time, end_time, status)
                     VALUES ($1, $2, $3, $3, $4, $5, $6, $7)
                     RETURNING *",
                )
                .bind(product.id)
                .bind(seller_id)
                .bind(input.start_price)
                .bind(input.min_increment)
                .bind(start_time)
                .bind(input.end_time)
                .bind(AuctionStatus::Active)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, AppError>((product, auction))
            })
        })
        .await?;

    revalidator.revalidate_paths(&[
        "/auctions".to_string(),
        "/products".to_string(),
        user.role.dashboard_path().to_string(),
    ]);
    info!(
        "{:<12} --> 경매 등록 완료: auction={}, product={}",
        "Command", auction.id, product.id
    );
    Ok((product, auction))
}

/// 2. 입찰
/// 전제 조건 중 하나라도 실패하면 아무것도 기록하지 않는다
pub async fn handle_place_bid(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    auction_id: i64,
    cmd: PlaceBidCommand,
) -> AppResult<(Auction, Bid)> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: auction={}, bidder={}, amount={}",
        "Command", auction_id, user.id, cmd.amount
    );
    require_role(user, &BIDDER_ROLES)?;

    let bidder_id = user.id;
    let amount = cmd.amount;
    let result = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(LOCK_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("Auction"))?;

                rules::check_bid(&auction, bidder_id, amount, Utc::now())?;

                let bid = sqlx::query_as::<_, Bid>(
                    "INSERT INTO bids (auction_id, bidder_id, amount)
                     VALUES ($1, $2, $3)
                     RETURNING *",
                )
                .bind(auction_id)
                .bind(bidder_id)
                .bind(amount)
                .fetch_one(&mut **tx)
                .await?;

                let auction = sqlx::query_as::<_, Auction>(
                    "UPDATE auctions SET current_bid = $1 WHERE id = $2 RETURNING *",
                )
                .bind(amount)
                .bind(auction_id)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, AppError>((auction, bid))
            })
        })
        .await;

    match result {
        Ok((auction, bid)) => {
            revalidator.revalidate_paths(&[
                "/auctions".to_string(),
                format!("/auctions/{}", auction_id),
            ]);
            info!(
                "{:<12} --> 입찰 성공: auction={}, 현재가 {}",
                "Command", auction_id, auction.current_bid
            );
            Ok((auction, bid))
        }
        Err(e) => {
            warn!(
                "{:<12} --> 입찰 실패: auction={}, {}",
                "Command", auction_id, e
            );
            Err(e)
        }
    }
}

/// 3. 경매 종료
/// 종료 시각과 무관하게 판매자(또는 관리자)가 호출할 때만 종료된다
/// 최고 입찰가가 같으면 먼저 들어온 입찰이 낙찰
pub async fn handle_end_auction(
    db_manager: &DatabaseManager,
    revalidator: &dyn Revalidator,
    user: &User,
    auction_id: i64,
) -> AppResult<(Auction, Option<Bid>)> {
    info!(
        "{:<12} --> 경매 종료 요청: auction={}, user={}",
        "Command", auction_id, user.id
    );

    let actor = user.clone();
    let (auction, winning_bid) = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(LOCK_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("Auction"))?;

                require_owner_or_admin(&actor, auction.seller_id)?;
                if auction.status == AuctionStatus::Completed {
                    return Err(AppError::Rejected("Auction has already ended".into()));
                }

                let winning_bid = sqlx::query_as::<_, Bid>(
                    "SELECT * FROM bids WHERE auction_id = $1
                     ORDER BY amount DESC, created_at ASC, id ASC
                     LIMIT 1",
                )
                .bind(auction_id)
                .fetch_optional(&mut **tx)
                .await?;

                let auction = sqlx::query_as::<_, Auction>(
                    "UPDATE auctions SET status = $1, winner_id = $2 WHERE id = $3 RETURNING *",
                )
                .bind(AuctionStatus::Completed)
                .bind(winning_bid.as_ref().map(|bid| bid.bidder_id))
                .bind(auction_id)
                .fetch_one(&mut **tx)
                .await?;

                Ok::<_, AppError>((auction, winning_bid))
            })
        })
        .await?;

    revalidator.revalidate_paths(&[
        "/auctions".to_string(),
        format!("/auctions/{}", auction_id),
        user.role.dashboard_path().to_string(),
    ]);
    info!(
        "{:<12} --> 경매 종료: auction={}, winner={:?}",
        "Command", auction.id, auction.winner_id
    );
    Ok((auction, winning_bid))
}

// endregion: --- Commands
