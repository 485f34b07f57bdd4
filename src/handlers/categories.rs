// region:    --- Imports
use super::{error_response, not_found, PageParams};
use crate::categories::commands::{self, CreateCategoryCommand, UpdateCategoryCommand};
use crate::categories::queries;
use crate::database::DatabaseManager;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 이름 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: String,
}

// endregion: --- Params

// region:    --- Command Handlers

/// 카테고리 생성 요청 처리
pub async fn handle_create_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateCategoryCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 생성 요청 처리 시작: {:?}", "Command", cmd);
    match commands::handle_create_category(cmd, &db_manager).await {
        Ok(category) => Json(category).into_response(),
        Err(e) => error_response(e),
    }
}

/// 카테고리 수정 요청 처리
pub async fn handle_update_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
    Json(cmd): Json<UpdateCategoryCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 카테고리 수정 요청 id: {}",
        "Command", category_id
    );
    match commands::handle_update_category(category_id, cmd, &db_manager).await {
        Ok(category) => Json(category).into_response(),
        Err(e) => error_response(e),
    }
}

/// 카테고리 비활성화 요청 처리
pub async fn handle_delete_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 카테고리 비활성화 요청 id: {}",
        "Command", category_id
    );
    match commands::handle_delete_category(category_id, &db_manager).await {
        Ok(category) => Json(category).into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 카테고리 조회
pub async fn handle_get_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 카테고리 조회", "HandlerQuery");
    match queries::get_all_categories(&db_manager).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 최상위 카테고리 조회
pub async fn handle_get_root_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 최상위 카테고리 조회", "HandlerQuery");
    match queries::get_root_categories(&db_manager).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 활성 카테고리 조회
pub async fn handle_get_active_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 활성 카테고리 조회", "HandlerQuery");
    match queries::get_active_categories(&db_manager).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 이름으로 카테고리 검색
pub async fn handle_search_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<NameParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 이름으로 카테고리 검색: {}",
        "HandlerQuery", params.name
    );
    match queries::search_categories_by_name(&db_manager, params.name).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 인기 카테고리 조회 (상품 수 기준)
pub async fn handle_get_popular_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 인기 카테고리 조회 page: {} size: {}",
        "HandlerQuery", params.page, params.size
    );
    match queries::get_popular_categories(&db_manager, params.size, params.page * params.size).await
    {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 카테고리 통계 조회
pub async fn handle_get_category_stats(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 통계 조회", "HandlerQuery");
    match queries::count_active_categories(&db_manager).await {
        Ok(active) => Json(serde_json::json!({"activeCategories": active})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 카테고리 조회
pub async fn handle_get_category(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 조회 id: {}", "HandlerQuery", category_id);
    match queries::get_category(&db_manager, category_id).await {
        Ok(Some(category)) => Json(category).into_response(),
        Ok(None) => not_found("Category not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 하위 카테고리 조회
pub async fn handle_get_subcategories(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 하위 카테고리 조회 id: {}",
        "HandlerQuery", category_id
    );
    match queries::get_subcategories(&db_manager, category_id).await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/categories 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/", get(handle_get_categories).post(handle_create_category))
        .route("/root", get(handle_get_root_categories))
        .route("/active", get(handle_get_active_categories))
        .route("/search", get(handle_search_categories))
        .route("/popular", get(handle_get_popular_categories))
        .route("/stats", get(handle_get_category_stats))
        .route(
            "/:id",
            get(handle_get_category)
                .put(handle_update_category)
                .delete(handle_delete_category),
        )
        .route("/:id/subcategories", get(handle_get_subcategories))
}

// endregion: --- Routes
