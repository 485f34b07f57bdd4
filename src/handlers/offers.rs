// region:    --- Imports
use super::{error_response, not_found};
use crate::database::DatabaseManager;
use crate::offers::commands::{
    self, CounterOfferCommand, CreateOfferCommand, MakeOfferCommand, RejectOfferCommand,
    RespondCounterCommand, UpdateOfferCommand,
};
use crate::offers::{model, queries};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 제안 철회 파라미터
#[derive(Debug, Deserialize)]
pub struct CancelOfferParams {
    pub buyer_id: i64,
}

/// 최근 제안 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_recent_days")]
    pub days: i64,
}

fn default_recent_days() -> i64 {
    30
}

/// 제안 가능 여부 파라미터
#[derive(Debug, Deserialize)]
pub struct CanMakeOfferParams {
    pub buyer_id: i64,
    pub item_id: i64,
}

/// 협상 이력 파라미터
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
}

// endregion: --- Params

fn invalid_status(status: &str) -> Response {
    (
        axum::http::StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": "Invalid offer status",
            "code": "INVALID_STATUS",
            "status": status
        })),
    )
        .into_response()
}

// region:    --- Command Handlers

/// 제안 직접 생성 요청 처리
pub async fn handle_create_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateOfferCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 직접 생성 요청 처리 시작", "Command");
    match commands::handle_create_offer(cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 제안 생성 요청 처리
pub async fn handle_make_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<MakeOfferCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 생성 요청 처리 시작", "Command");
    match commands::handle_make_offer(cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 제안 수정 요청 처리
pub async fn handle_update_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Json(cmd): Json<UpdateOfferCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 수정 요청 id: {}", "Command", offer_id);
    match commands::handle_update_offer(offer_id, cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 제안 수락 요청 처리
pub async fn handle_accept_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 수락 요청 id: {}", "Command", offer_id);
    match commands::handle_accept_offer(offer_id, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 제안 거절 요청 처리
pub async fn handle_reject_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Json(cmd): Json<RejectOfferCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 거절 요청 id: {}", "Command", offer_id);
    match commands::handle_reject_offer(offer_id, cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 역제안 요청 처리
pub async fn handle_counter_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Json(cmd): Json<CounterOfferCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 역제안 요청 id: {}", "Command", offer_id);
    match commands::handle_counter_offer(offer_id, cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 제안 철회 요청 처리
pub async fn handle_cancel_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Query(params): Query<CancelOfferParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 제안 철회 요청 id: {} buyer_id: {}",
        "Command", offer_id, params.buyer_id
    );
    match commands::handle_cancel_offer(offer_id, params.buyer_id, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 역제안 응답 요청 처리
pub async fn handle_respond_counter(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Json(cmd): Json<RespondCounterCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 역제안 응답 요청 id: {}", "Command", offer_id);
    match commands::handle_respond_counter(offer_id, cmd, &db_manager).await {
        Ok(offer) => Json(offer).into_response(),
        Err(e) => error_response(e),
    }
}

/// 만료된 제안 일괄 처리 요청
pub async fn handle_mark_expired_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 만료된 제안 일괄 처리 요청", "Command");
    match commands::handle_mark_expired_offers(&db_manager).await {
        Ok(count) => Json(serde_json::json!({
            "message": "Expired offers marked",
            "count": count
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 제안 조회
pub async fn handle_get_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 제안 조회", "HandlerQuery");
    match queries::get_all_offers(&db_manager).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 제안 조회
pub async fn handle_get_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 제안 조회 id: {}", "HandlerQuery", offer_id);
    match queries::get_offer(&db_manager, offer_id).await {
        Ok(Some(offer)) => Json(offer).into_response(),
        Ok(None) => not_found("Offer not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 만료된 제안 조회
pub async fn handle_get_expired_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 만료된 제안 조회", "HandlerQuery");
    match queries::get_expired_offers(&db_manager).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 최근 제안 조회
pub async fn handle_get_recent_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<RecentParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 최근 제안 조회 days: {}",
        "HandlerQuery", params.days
    );
    let since = Utc::now() - Duration::days(params.days);
    match queries::get_recent_offers(&db_manager, since).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 제안 가능 여부 확인
pub async fn handle_can_make_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<CanMakeOfferParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 제안 가능 여부 확인 buyer_id: {} item_id: {}",
        "HandlerQuery", params.buyer_id, params.item_id
    );
    match commands::can_make_offer(params.buyer_id, params.item_id, &db_manager).await {
        Ok(can) => Json(serde_json::json!({"canMakeOffer": can})).into_response(),
        Err(e) => error_response(e),
    }
}

/// 협상 이력 조회
pub async fn handle_get_offer_history(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<HistoryParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 협상 이력 조회 buyer: {} seller: {} item: {}",
        "HandlerQuery", params.buyer_id, params.seller_id, params.item_id
    );
    match queries::get_offer_history(&db_manager, params.buyer_id, params.seller_id, params.item_id)
        .await
    {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 제안 조회
pub async fn handle_get_item_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 제안 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::get_item_offers(&db_manager, item_id).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 대기 제안 조회
pub async fn handle_get_pending_item_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 대기 제안 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::get_pending_item_offers(&db_manager, item_id).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 최고 제안 조회
pub async fn handle_get_highest_item_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 최고 제안 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::get_highest_item_offer(&db_manager, item_id).await {
        Ok(Some(offer)) => Json(offer).into_response(),
        Ok(None) => not_found("No offers found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 제안 수 조회
pub async fn handle_count_item_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 제안 수 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::count_item_offers(&db_manager, item_id).await {
        Ok(count) => Json(serde_json::json!({"offerCount": count})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 상태별 제안 조회
pub async fn handle_get_item_offers_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((item_id, status)): Path<(i64, String)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 상태별 제안 조회 item_id: {} status: {}",
        "HandlerQuery", item_id, status
    );
    if !model::is_valid_status(&status) {
        return invalid_status(&status);
    }
    match queries::get_item_offers_by_status(&db_manager, item_id, status).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 구매자 제안 조회
pub async fn handle_get_buyer_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(buyer_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 구매자 제안 조회 buyer_id: {}",
        "HandlerQuery", buyer_id
    );
    match queries::get_buyer_offers(&db_manager, buyer_id).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 구매자 상태별 제안 조회
pub async fn handle_get_buyer_offers_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((buyer_id, status)): Path<(i64, String)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 구매자 상태별 제안 조회 buyer_id: {} status: {}",
        "HandlerQuery", buyer_id, status
    );
    if !model::is_valid_status(&status) {
        return invalid_status(&status);
    }
    match queries::get_buyer_offers_by_status(&db_manager, buyer_id, status).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 판매자 제안 조회
pub async fn handle_get_seller_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(seller_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 제안 조회 seller_id: {}",
        "HandlerQuery", seller_id
    );
    match queries::get_seller_offers(&db_manager, seller_id).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 판매자 상태별 제안 조회
pub async fn handle_get_seller_offers_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((seller_id, status)): Path<(i64, String)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 상태별 제안 조회 seller_id: {} status: {}",
        "HandlerQuery", seller_id, status
    );
    if !model::is_valid_status(&status) {
        return invalid_status(&status);
    }
    match queries::get_seller_offers_by_status(&db_manager, seller_id, status).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 제안 조회 (구매 + 판매)
pub async fn handle_get_user_offers(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 사용자 제안 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_user_offers(&db_manager, user_id).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태별 제안 조회
pub async fn handle_get_offers_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상태별 제안 조회: {}", "HandlerQuery", status);
    if !model::is_valid_status(&status) {
        return invalid_status(&status);
    }
    match queries::get_offers_by_status(&db_manager, status).await {
        Ok(offers) => Json(offers).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태별 제안 수 조회
pub async fn handle_count_offers_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상태별 제안 수 조회: {}", "HandlerQuery", status);
    match queries::count_offers_by_status(&db_manager, status).await {
        Ok(count) => Json(serde_json::json!({"count": count})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/offers 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/", get(handle_get_offers).post(handle_create_offer))
        .route("/make", post(handle_make_offer))
        .route("/mark-expired", post(handle_mark_expired_offers))
        .route("/expired", get(handle_get_expired_offers))
        .route("/recent", get(handle_get_recent_offers))
        .route("/can-make-offer", get(handle_can_make_offer))
        .route("/history", get(handle_get_offer_history))
        .route("/stats/status/:status", get(handle_count_offers_by_status))
        .route("/item/:item_id", get(handle_get_item_offers))
        .route("/item/:item_id/pending", get(handle_get_pending_item_offers))
        .route("/item/:item_id/highest", get(handle_get_highest_item_offer))
        .route("/item/:item_id/count", get(handle_count_item_offers))
        .route(
            "/item/:item_id/status/:status",
            get(handle_get_item_offers_by_status),
        )
        .route("/buyer/:buyer_id", get(handle_get_buyer_offers))
        .route(
            "/buyer/:buyer_id/status/:status",
            get(handle_get_buyer_offers_by_status),
        )
        .route("/seller/:seller_id", get(handle_get_seller_offers))
        .route(
            "/seller/:seller_id/status/:status",
            get(handle_get_seller_offers_by_status),
        )
        .route("/user/:user_id", get(handle_get_user_offers))
        .route("/status/:status", get(handle_get_offers_by_status))
        .route("/:id", get(handle_get_offer).put(handle_update_offer))
        .route("/:id/accept", put(handle_accept_offer))
        .route("/:id/reject", put(handle_reject_offer))
        .route("/:id/counter", put(handle_counter_offer))
        .route("/:id/cancel", put(handle_cancel_offer))
        .route("/:id/respond-counter", put(handle_respond_counter))
}

// endregion: --- Routes
