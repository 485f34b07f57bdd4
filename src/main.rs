// region:    --- Imports
use crate::database::DatabaseManager;
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod categories;
mod database;
mod handlers;
mod items;
mod messaging;
mod offers;
mod security;
mod transactions;
mod users;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화 (RECREATE_DB 설정 시 스키마 재생성)
    let init_result = if std::env::var("RECREATE_DB").is_ok() {
        db_manager.recreate_database().await
    } else {
        db_manager.initialize_database().await
    };
    if let Err(e) = init_result {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 상품 이미지 정적 서빙 디렉터리
    let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/items".to_string());

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .nest("/api/auth", handlers::auth::routes())
        .nest("/api/users", handlers::users::routes())
        .nest("/api/items", handlers::items::routes())
        .nest("/api/categories", handlers::categories::routes())
        .nest("/api/messages", handlers::messages::routes())
        .nest("/api/offers", handlers::offers::routes())
        .nest("/api/transactions", handlers::transactions::routes())
        .nest_service("/uploads/items", ServeDir::new(upload_dir))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 20)) // 상품 이미지 업로드를 위한 바디 사이즈 증가(20MB)
        .with_state(db_manager);

    // 리스너 생성 (기본값은 3000번 포트)
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr().unwrap()
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
