// region:    --- Imports
use super::{error_response, not_found};
use crate::database::DatabaseManager;
use crate::transactions::commands::{
    self, BuyerMessageCommand, CancelTransactionCommand, CreateFromOfferCommand,
    CreateTransactionCommand, DeliveryInfoCommand, ProcessPaymentCommand, RefundTransactionCommand,
    ReportIssueCommand, SellerMessageCommand, UpdateTransactionStatusCommand, VerifyPaymentCommand,
};
use crate::transactions::queries;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 판매자 확인 파라미터
#[derive(Debug, Deserialize)]
pub struct SellerParams {
    pub seller_id: i64,
}

/// 구매자 확인 파라미터
#[derive(Debug, Deserialize)]
pub struct BuyerParams {
    pub buyer_id: i64,
}

/// 미결제 거래 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct PendingPaymentsParams {
    #[serde(default = "default_hours_old")]
    pub hours_old: i64,
}

fn default_hours_old() -> i64 {
    24
}

// endregion: --- Params

// region:    --- Command Handlers

/// 거래 직접 생성 요청 처리
pub async fn handle_create_transaction_raw(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateTransactionCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 직접 생성 요청 처리 시작", "Command");
    match commands::handle_create_transaction_raw(cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거래 생성 요청 처리
pub async fn handle_create_transaction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateTransactionCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 생성 요청 처리 시작", "Command");
    match commands::handle_create_transaction(cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 수락된 제안 기반 거래 생성 요청 처리
pub async fn handle_create_from_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(offer_id): Path<i64>,
    Json(cmd): Json<CreateFromOfferCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 제안 기반 거래 생성 요청 offer_id: {}",
        "Command", offer_id
    );
    match commands::handle_create_from_offer(offer_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거래 상태 변경 요청 처리
pub async fn handle_update_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<UpdateTransactionStatusCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 거래 상태 변경 요청 id: {} status: {}",
        "Command", transaction_id, cmd.status
    );
    match commands::handle_update_transaction_status(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 결제 처리 요청
pub async fn handle_process_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<ProcessPaymentCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 결제 처리 요청 id: {}", "Command", transaction_id);
    match commands::handle_process_payment(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 판매자 결제 확인 요청
pub async fn handle_confirm_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Query(params): Query<SellerParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 결제 확인 요청 id: {} seller_id: {}",
        "Command", transaction_id, params.seller_id
    );
    match commands::handle_confirm_payment(transaction_id, params.seller_id, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 결제 검증 요청
pub async fn handle_verify_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<VerifyPaymentCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 결제 검증 요청 id: {}", "Command", transaction_id);
    match commands::handle_verify_payment(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 인도 정보 등록 요청
pub async fn handle_add_delivery_info(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<DeliveryInfoCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 인도 정보 등록 요청 id: {}",
        "Command", transaction_id
    );
    match commands::handle_add_delivery_info(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 판매자 인도 완료 확인 요청
pub async fn handle_confirm_delivered(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Query(params): Query<SellerParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 인도 완료 확인 요청 id: {} seller_id: {}",
        "Command", transaction_id, params.seller_id
    );
    match commands::handle_confirm_delivered(transaction_id, params.seller_id, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 구매자 수령 확인 요청
pub async fn handle_confirm_received(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Query(params): Query<BuyerParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 수령 확인 요청 id: {} buyer_id: {}",
        "Command", transaction_id, params.buyer_id
    );
    match commands::handle_confirm_received(transaction_id, params.buyer_id, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거래 완료 요청
pub async fn handle_complete_transaction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 완료 요청 id: {}", "Command", transaction_id);
    match commands::handle_complete_transaction(transaction_id, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거래 취소 요청
pub async fn handle_cancel_transaction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<CancelTransactionCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 취소 요청 id: {}", "Command", transaction_id);
    match commands::handle_cancel_transaction(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 환불 처리 요청
pub async fn handle_refund_transaction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<RefundTransactionCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 환불 처리 요청 id: {}", "Command", transaction_id);
    match commands::handle_refund_transaction(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거래 문제 신고 요청
pub async fn handle_report_issue(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<ReportIssueCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 거래 문제 신고 요청 id: {}",
        "Command", transaction_id
    );
    match commands::handle_report_issue(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 구매자 메모 등록 요청
pub async fn handle_set_buyer_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<BuyerMessageCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 구매자 메모 등록 요청 id: {}",
        "Command", transaction_id
    );
    match commands::handle_set_buyer_message(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

/// 판매자 메모 등록 요청
pub async fn handle_set_seller_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
    Json(cmd): Json<SellerMessageCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 메모 등록 요청 id: {}",
        "Command", transaction_id
    );
    match commands::handle_set_seller_message(transaction_id, cmd, &db_manager).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 거래 조회
pub async fn handle_get_transactions(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 거래 조회", "HandlerQuery");
    match queries::get_all_transactions(&db_manager).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 거래 조회
pub async fn handle_get_transaction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 거래 조회 id: {}", "HandlerQuery", transaction_id);
    match queries::get_transaction(&db_manager, transaction_id).await {
        Ok(Some(transaction)) => Json(transaction).into_response(),
        Ok(None) => not_found("Transaction not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 영수증 조회
pub async fn handle_get_receipt(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 영수증 조회 id: {}",
        "HandlerQuery", transaction_id
    );
    match commands::handle_generate_receipt(transaction_id, &db_manager).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => error_response(e),
    }
}

/// 참조 번호로 거래 조회
pub async fn handle_get_by_reference(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(reference): Path<String>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 참조 번호로 거래 조회: {}",
        "HandlerQuery", reference
    );
    match queries::get_transaction_by_reference(&db_manager, reference).await {
        Ok(Some(transaction)) => Json(transaction).into_response(),
        Ok(None) => not_found("Transaction not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 구매자 거래 조회
pub async fn handle_get_buyer_transactions(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(buyer_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 구매자 거래 조회 buyer_id: {}",
        "HandlerQuery", buyer_id
    );
    match queries::get_buyer_transactions(&db_manager, buyer_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 판매자 거래 조회
pub async fn handle_get_seller_transactions(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(seller_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 판매자 거래 조회 seller_id: {}",
        "HandlerQuery", seller_id
    );
    match queries::get_seller_transactions(&db_manager, seller_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 거래 이력 조회 (구매 + 판매)
pub async fn handle_get_user_transactions(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 사용자 거래 이력 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_user_transactions(&db_manager, user_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태별 거래 조회
pub async fn handle_get_transactions_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상태별 거래 조회: {}", "HandlerQuery", status);
    match queries::get_transactions_by_status(&db_manager, status).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 거래 조회
pub async fn handle_get_item_transactions(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 거래 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::get_item_transactions(&db_manager, item_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 미결제 거래 조회 (기준 시간 경과)
pub async fn handle_get_pending_payments(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<PendingPaymentsParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 미결제 거래 조회 hours_old: {}",
        "HandlerQuery", params.hours_old
    );
    let cutoff = Utc::now() - Duration::hours(params.hours_old);
    match queries::get_pending_payments(&db_manager, cutoff).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 픽업 대기 거래 조회
pub async fn handle_get_requiring_pickup(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 픽업 대기 거래 조회", "HandlerQuery");
    match queries::get_transactions_requiring_pickup(&db_manager).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상태별 거래 수 조회
pub async fn handle_count_transactions_by_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 상태별 거래 수 조회: {}", "HandlerQuery", status);
    match queries::count_transactions_by_status(&db_manager, status).await {
        Ok(count) => Json(serde_json::json!({"count": count})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/transactions 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route(
            "/",
            get(handle_get_transactions).post(handle_create_transaction_raw),
        )
        .route("/create", post(handle_create_transaction))
        .route("/from-offer/:offer_id", post(handle_create_from_offer))
        .route("/pending-payments", get(handle_get_pending_payments))
        .route("/requiring-pickup", get(handle_get_requiring_pickup))
        .route("/reference/:reference", get(handle_get_by_reference))
        .route(
            "/stats/status/:status",
            get(handle_count_transactions_by_status),
        )
        .route("/buyer/:buyer_id", get(handle_get_buyer_transactions))
        .route("/seller/:seller_id", get(handle_get_seller_transactions))
        .route("/user/:user_id", get(handle_get_user_transactions))
        .route("/status/:status", get(handle_get_transactions_by_status))
        .route("/item/:item_id", get(handle_get_item_transactions))
        .route("/:id", get(handle_get_transaction))
        .route("/:id/receipt", get(handle_get_receipt))
        .route("/:id/status", put(handle_update_status))
        .route("/:id/process-payment", put(handle_process_payment))
        .route("/:id/confirm-payment", put(handle_confirm_payment))
        .route("/:id/verify-payment", put(handle_verify_payment))
        .route("/:id/delivery-info", put(handle_add_delivery_info))
        .route("/:id/confirm-delivered", put(handle_confirm_delivered))
        .route("/:id/confirm-received", put(handle_confirm_received))
        .route("/:id/complete", put(handle_complete_transaction))
        .route("/:id/cancel", put(handle_cancel_transaction))
        .route("/:id/refund", put(handle_refund_transaction))
        .route("/:id/report-issue", put(handle_report_issue))
        .route("/:id/buyer-message", put(handle_set_buyer_message))
        .route("/:id/seller-message", put(handle_set_seller_message))
}

// endregion: --- Routes
