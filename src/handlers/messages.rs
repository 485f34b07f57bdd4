// region:    --- Imports
use super::{error_response, not_found};
use crate::database::DatabaseManager;
use crate::messaging::commands::{
    self, CreateMessageCommand, PriceOfferMessageCommand, PriceResponseMessageCommand,
    ScheduleMeetupCommand, SendMediaCommand, SendMessageCommand, SendPhotoCommand,
    ShareLocationCommand, StartConversationCommand,
};
use crate::messaging::queries;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 전체 읽음 처리 파라미터
#[derive(Debug, Deserialize)]
pub struct MarkAllReadParams {
    pub receiver_id: i64,
    pub sender_id: i64,
}

/// 알림 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct NotificationParams {
    #[serde(default = "default_notification_limit")]
    pub limit: i64,
}

fn default_notification_limit() -> i64 {
    10
}

/// 메시지 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// 기간 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// endregion: --- Params

// region:    --- Command Handlers

/// 메시지 생성 요청 처리
pub async fn handle_create_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateMessageCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 생성 요청 처리 시작", "Command");
    match commands::handle_create_message(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 대화 시작 요청 처리
pub async fn handle_start_conversation(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<StartConversationCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 대화 시작 요청 처리 시작", "Command");
    match commands::handle_start_conversation(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 메시지 전송 요청 처리
pub async fn handle_send_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<SendMessageCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 전송 요청 처리 시작", "Command");
    match commands::handle_send_message(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 미디어 전송 요청 처리
pub async fn handle_send_media(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<SendMediaCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 미디어 전송 요청 처리 시작", "Command");
    match commands::handle_send_media(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 사진 전송 요청 처리
pub async fn handle_send_photo(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<SendPhotoCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 사진 전송 요청 처리 시작", "Command");
    match commands::handle_send_photo(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 가격 제안 메시지 요청 처리
pub async fn handle_send_price_offer(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<PriceOfferMessageCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 가격 제안 메시지 요청 처리 시작", "Command");
    match commands::handle_send_price_offer(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 가격 응답 메시지 요청 처리
pub async fn handle_send_price_response(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<PriceResponseMessageCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 가격 응답 메시지 요청 처리 시작", "Command");
    match commands::handle_send_price_response(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 위치 공유 요청 처리
pub async fn handle_share_location(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<ShareLocationCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 위치 공유 요청 처리 시작", "Command");
    match commands::handle_share_location(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 직거래 약속 요청 처리
pub async fn handle_schedule_meetup(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<ScheduleMeetupCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 직거래 약속 요청 처리 시작", "Command");
    match commands::handle_schedule_meetup(cmd, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 메시지 읽음 처리 요청
pub async fn handle_mark_read(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 읽음 처리 요청 id: {}", "Command", message_id);
    match commands::handle_mark_read(message_id, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 메시지 읽지 않음 처리 요청
pub async fn handle_mark_unread(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 메시지 읽지 않음 처리 요청 id: {}",
        "Command", message_id
    );
    match commands::handle_mark_unread(message_id, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 상대방 메시지 전체 읽음 처리 요청
pub async fn handle_mark_all_read(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<MarkAllReadParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 전체 읽음 처리 요청 receiver_id: {} sender_id: {}",
        "Command", params.receiver_id, params.sender_id
    );
    match commands::handle_mark_all_read(params.receiver_id, params.sender_id, &db_manager).await {
        Ok(count) => Json(serde_json::json!({
            "message": "Messages marked as read",
            "count": count
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// 메시지 신고 요청 처리
pub async fn handle_report_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 신고 요청 id: {}", "Command", message_id);
    match commands::handle_report_message(message_id, &db_manager).await {
        Ok(message) => Json(message).into_response(),
        Err(e) => error_response(e),
    }
}

/// 메시지 삭제 요청 처리
pub async fn handle_delete_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 삭제 요청 id: {}", "Command", message_id);
    match commands::handle_delete_message(message_id, &db_manager).await {
        Ok(()) => Json(serde_json::json!({"message": "Message deleted"})).into_response(),
        Err(e) => error_response(e),
    }
}

/// 대화 삭제 요청 처리
pub async fn handle_delete_conversation(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((user1_id, user2_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 대화 삭제 요청 user1: {} user2: {}",
        "Command", user1_id, user2_id
    );
    match commands::handle_delete_conversation(user1_id, user2_id, &db_manager).await {
        Ok(count) => Json(serde_json::json!({
            "message": "Conversation deleted",
            "count": count
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 메시지 조회
pub async fn handle_get_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 메시지 조회", "HandlerQuery");
    match queries::get_all_messages(&db_manager).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 메시지 조회
pub async fn handle_get_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(message_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 메시지 조회 id: {}", "HandlerQuery", message_id);
    match queries::get_message(&db_manager, message_id).await {
        Ok(Some(message)) => Json(message).into_response(),
        Ok(None) => not_found("Message not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 두 사용자 간 대화 조회
pub async fn handle_get_conversation(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((user1_id, user2_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 대화 조회 user1: {} user2: {}",
        "HandlerQuery", user1_id, user2_id
    );
    match queries::get_conversation(&db_manager, user1_id, user2_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 두 사용자 간 최근 메시지 조회
pub async fn handle_get_latest_message(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((user1_id, user2_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 최근 메시지 조회 user1: {} user2: {}",
        "HandlerQuery", user1_id, user2_id
    );
    match queries::get_latest_message(&db_manager, user1_id, user2_id).await {
        Ok(Some(message)) => Json(message).into_response(),
        Ok(None) => not_found("No messages found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 대화 목록 조회
pub async fn handle_get_user_conversations(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 사용자 대화 목록 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_user_conversations(&db_manager, user_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 미확인 메시지 조회
pub async fn handle_get_unread_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 미확인 메시지 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_unread_messages(&db_manager, user_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 미확인 메시지 수 조회
pub async fn handle_get_unread_count(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 미확인 메시지 수 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::count_unread_messages(&db_manager, user_id).await {
        Ok(count) => Json(serde_json::json!({"unreadCount": count})).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 읽은 메시지 조회
pub async fn handle_get_read_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 읽은 메시지 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_read_messages(&db_manager, user_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 미확인 대화 조회
pub async fn handle_get_unread_conversations(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 미확인 대화 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_unread_conversations(&db_manager, user_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 알림 조회 (최근 미확인 메시지)
pub async fn handle_get_notifications(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Query(params): Query<NotificationParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 알림 조회 user_id: {} limit: {}",
        "HandlerQuery", user_id, params.limit
    );
    match queries::get_notifications(&db_manager, user_id, params.limit).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 메시지 검색
pub async fn handle_search_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 메시지 검색 user_id: {} query: {}",
        "HandlerQuery", user_id, params.query
    );
    match queries::search_user_messages(&db_manager, user_id, params.query).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 미디어 메시지 조회
pub async fn handle_get_user_media(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path((user_id, media_type)): Path<(i64, String)>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 미디어 메시지 조회 user_id: {} type: {}",
        "HandlerQuery", user_id, media_type
    );
    match queries::get_user_media_messages(&db_manager, user_id, media_type).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 상품 관련 메시지 조회
pub async fn handle_get_item_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 상품 메시지 조회 item_id: {}",
        "HandlerQuery", item_id
    );
    match queries::get_item_messages(&db_manager, item_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 거래 관련 메시지 조회
pub async fn handle_get_transaction_messages(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 거래 메시지 조회 transaction_id: {}",
        "HandlerQuery", transaction_id
    );
    match queries::get_transaction_messages(&db_manager, transaction_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 기간별 메시지 조회
pub async fn handle_get_messages_by_date_range(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<DateRangeParams>,
) -> impl IntoResponse {
    info!("{:<12} --> 기간별 메시지 조회", "HandlerQuery");
    match queries::get_messages_by_date_range(&db_manager, params.start, params.end).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/messages 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/", get(handle_get_messages).post(handle_create_message))
        .route("/start-conversation", post(handle_start_conversation))
        .route("/send", post(handle_send_message))
        .route("/send-media", post(handle_send_media))
        .route("/send-photo", post(handle_send_photo))
        .route("/price-offer", post(handle_send_price_offer))
        .route("/price-response", post(handle_send_price_response))
        .route("/share-location", post(handle_share_location))
        .route("/schedule-meetup", post(handle_schedule_meetup))
        .route("/mark-all-read", put(handle_mark_all_read))
        .route("/date-range", get(handle_get_messages_by_date_range))
        .route(
            "/conversation/:user1_id/:user2_id",
            get(handle_get_conversation).delete(handle_delete_conversation),
        )
        .route("/latest/:user1_id/:user2_id", get(handle_get_latest_message))
        .route("/user/:user_id/conversations", get(handle_get_user_conversations))
        .route("/user/:user_id/unread", get(handle_get_unread_messages))
        .route("/user/:user_id/unread-count", get(handle_get_unread_count))
        .route("/user/:user_id/read", get(handle_get_read_messages))
        .route(
            "/user/:user_id/unread-conversations",
            get(handle_get_unread_conversations),
        )
        .route("/user/:user_id/notifications", get(handle_get_notifications))
        .route("/user/:user_id/search", get(handle_search_messages))
        .route("/user/:user_id/media/:media_type", get(handle_get_user_media))
        .route("/item/:item_id", get(handle_get_item_messages))
        .route(
            "/transaction/:transaction_id",
            get(handle_get_transaction_messages),
        )
        .route("/:id", get(handle_get_message).delete(handle_delete_message))
        .route("/:id/mark-read", put(handle_mark_read))
        .route("/:id/mark-unread", put(handle_mark_unread))
        .route("/:id/report", post(handle_report_message))
}

// endregion: --- Routes
