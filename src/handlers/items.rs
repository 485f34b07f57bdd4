// region:    --- Imports
use super::{error_response, not_found};
use crate::database::DatabaseManager;
use crate::items::commands::{
    self, CreateItemCommand, UpdateItemCommand, UpdateItemStatusCommand,
};
use crate::items::{model, queries};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 상품 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    20
}

/// 정렬 파라미터
#[derive(Debug, Deserialize)]
pub struct SortParams {
    #[serde(default = "default_sort")]
    pub by: String,
}

fn default_sort() -> String {
    "newest".to_string()
}

/// 가격 범위 파라미터
#[derive(Debug, Deserialize)]
pub struct PriceRangeParams {
    pub min: i64,
    pub max: i64,
}

/// 지역 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct LocationSearchParams {
    pub location: String,
}

/// 판매 상품 수 파라미터
#[derive(Debug, Deserialize)]
pub struct SellerCountParams {
    pub status: Option<String>,
}

// endregion: --- Params

// region:    --- Command Handlers

/// 상품 등록 요청 처리
pub async fn handle_create_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateItemCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 등록 요청 처리 시작: {:?}", "Command", cmd);
    match commands::handle_create_item(cmd, &db_manager).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// 상품 수정 요청 처리
pub async fn handle_update_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
    Json(cmd): Json<UpdateItemCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 수정 요청 id: {}", "Command", item_id);
    match commands::handle_update_item(item_id, cmd, &db_manager).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// 상품 상태 변경 요청 처리
pub async fn handle_update_item_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
    Json(cmd): Json<UpdateItemStatusCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 상태 변경 요청 id: {} status: {}",
        "Command", item_id, cmd.status
    );
    match commands::handle_update_item_status(item_id, cmd, &db_manager).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// 판매 완료 처리 요청
pub async fn handle_mark_item_sold(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 판매 완료 처리 요청 id: {}", "Command", item_id);
    match commands::handle_mark_item_sold(item_id, &db_manager).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// 상품 삭제 요청 처리
pub async fn handle_delete_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 삭제 요청 id: {}", "Command", item_id);
    match commands::handle_delete_item(item_id, &db_manager).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 상품 조회
pub async fn handle_get_items(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 상품 조회", "HandlerQuery");
    match queries::get_all_items(&db_manager).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 검색 (키워드 + 가격 범위)
pub async fn handle_search_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 검색 keyword: {}",
        "HandlerQuery", params.keyword
    );
    match queries::search_items(
        &db_manager,
        params.keyword,
        params.min_price,
        params.max_price,
        params.size,
        params.page * params.size,
    )
    .await
    {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 정렬 조회
pub async fn handle_get_sorted_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<SortParams>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 정렬 조회 by: {}", "HandlerQuery", params.by);
    match queries::get_sorted_items(&db_manager, params.by).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 가격 범위 조회
pub async fn handle_get_items_by_price_range(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<PriceRangeParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 가격 범위 조회 min: {} max: {}",
        "HandlerQuery", params.min, params.max
    );
    match queries::get_items_by_price_range(&db_manager, params.min, params.max).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 지역으로 상품 검색
pub async fn handle_search_items_by_location(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<LocationSearchParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 지역으로 상품 검색: {}",
        "HandlerQuery", params.location
    );
    match queries::search_items_by_location(&db_manager, params.location).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태별 상품 조회
pub async fn handle_get_items_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상태별 상품 조회: {}", "HandlerQuery", status);
    if !model::is_valid_status(&status) {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Invalid item status",
                "code": "INVALID_STATUS",
                "status": status
            })),
        )
            .into_response();
    }
    match queries::get_items_by_status(&db_manager, status).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태 등급별 상품 조회
pub async fn handle_get_items_by_condition(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(condition): Path<String>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상태 등급별 상품 조회: {}",
        "HandlerQuery", condition
    );
    if !model::is_valid_condition(&condition) {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Invalid item condition",
                "code": "INVALID_CONDITION",
                "condition": condition
            })),
        )
            .into_response();
    }
    match queries::get_items_by_condition(&db_manager, condition).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 판매자 상품 조회
pub async fn handle_get_seller_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(seller_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 상품 조회 seller_id: {}",
        "HandlerQuery", seller_id
    );
    match queries::get_items_by_seller(&db_manager, seller_id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 판매자 상품 수 조회
pub async fn handle_count_seller_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(seller_id): Path<i64>,
    Query(params): Query<SellerCountParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 상품 수 조회 seller_id: {}",
        "HandlerQuery", seller_id
    );
    match queries::count_seller_items(&db_manager, seller_id, params.status).await {
        Ok(count) => Json(serde_json::json!({"count": count})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 카테고리별 상품 조회
pub async fn handle_get_category_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 카테고리별 상품 조회 category_id: {}",
        "HandlerQuery", category_id
    );
    match queries::get_items_by_category(&db_manager, category_id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 조회 (조회수 증가 후 반환)
pub async fn handle_get_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", item_id);
    if let Err(e) = commands::record_item_view(item_id, &db_manager).await {
        return (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }
    match queries::get_item(&db_manager, item_id).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => not_found("Item not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 유사 상품 조회 (같은 카테고리의 다른 상품)
pub async fn handle_get_similar_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 유사 상품 조회 id: {}", "HandlerQuery", item_id);
    let item = match queries::get_item(&db_manager, item_id).await {
        Ok(Some(item)) => item,
        Ok(None) => return not_found("Item not found"),
        Err(e) => {
            return (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    };
    match queries::get_similar_items(&db_manager, item.category_id, item.id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/items 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/", get(handle_get_items).post(handle_create_item))
        .route("/search", get(handle_search_items))
        .route("/sorted", get(handle_get_sorted_items))
        .route("/price-range", get(handle_get_items_by_price_range))
        .route("/location-search", get(handle_search_items_by_location))
        .route("/status/:status", get(handle_get_items_by_status))
        .route("/condition/:condition", get(handle_get_items_by_condition))
        .route("/seller/:seller_id", get(handle_get_seller_items))
        .route("/seller/:seller_id/count", get(handle_count_seller_items))
        .route("/category/:category_id", get(handle_get_category_items))
        .route(
            "/:id",
            get(handle_get_item)
                .put(handle_update_item)
                .delete(handle_delete_item),
        )
        .route("/:id/status", put(handle_update_item_status))
        .route("/:id/mark-sold", put(handle_mark_item_sold))
        .route("/:id/similar", get(handle_get_similar_items))
}

// endregion: --- Routes
