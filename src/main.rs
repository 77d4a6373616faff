// region:    --- Imports
use farm_market::app::{self, AppState};
use farm_market::config::Config;
use farm_market::database::DatabaseManager;
use farm_market::media::HttpMediaHost;
use farm_market::revalidate::BroadcastRevalidator;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_market=info,tower_http=info,sqlx=warn".into()),
        )
        .with_target(false)
        .init();

    // 설정 로드
    let config = Config::load()?;
    info!("{:<12} --> 환경: {}", "Main", config.environment);

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new(&config.database).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager
        .initialize_database(config.database.recreate)
        .await
    {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    let state = AppState {
        db: db_manager,
        media: Arc::new(HttpMediaHost::new(config.media.clone())),
        revalidator: Arc::new(BroadcastRevalidator::default()),
        config: Arc::new(config),
    };

    let listener = TcpListener::bind(state.config.bind_addr()).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, app::router(state).into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
