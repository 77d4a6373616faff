// region:    --- Imports
use crate::config::Config;
use crate::database::DatabaseManager;
use crate::handlers;
use crate::media::MediaHost;
use crate::revalidate::Revalidator;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// endregion: --- Imports

// region:    --- App State
/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub config: Arc<Config>,
    pub revalidator: Arc<dyn Revalidator>,
    pub media: Arc<dyn MediaHost>,
}

// endregion: --- App State

// region:    --- Router
pub fn router(state: AppState) -> Router {
    // 브라우저 UI 를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/me", get(handlers::handle_get_me))
        .route("/onboarding", post(handlers::handle_complete_onboarding))
        .route(
            "/products",
            get(handlers::handle_list_products).post(handlers::handle_create_product),
        )
        .route("/products/mine", get(handlers::handle_list_my_products))
        .route(
            "/products/:id",
            get(handlers::handle_get_product)
                .patch(handlers::handle_update_product)
                .delete(handlers::handle_delete_product),
        )
        .route("/products/:id/stock", patch(handlers::handle_update_stock))
        .route(
            "/auctions",
            get(handlers::handle_list_auctions).post(handlers::handle_create_auction),
        )
        .route("/auctions/:id", get(handlers::handle_get_auction))
        .route(
            "/auctions/:id/bids",
            get(handlers::handle_get_bid_history).post(handlers::handle_place_bid),
        )
        .route(
            "/auctions/:id/highest-bid",
            get(handlers::handle_get_highest_bid),
        )
        .route("/auctions/:id/end", post(handlers::handle_end_auction))
        .route(
            "/cart",
            get(handlers::handle_get_cart)
                .post(handlers::handle_add_to_cart)
                .delete(handlers::handle_clear_cart),
        )
        .route(
            "/cart/:product_id",
            patch(handlers::handle_update_cart_quantity).delete(handlers::handle_remove_from_cart),
        )
        .route("/orders", get(handlers::handle_list_orders))
        .route("/orders/checkout", post(handlers::handle_checkout))
        .route("/media", post(handlers::handle_upload_image))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// endregion: --- Router
