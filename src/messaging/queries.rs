// region:    --- Imports
use super::model::Message;
use crate::database::DatabaseManager;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 메시지 조회
pub const GET_ALL_MESSAGES: &str = "SELECT * FROM messages ORDER BY sent_at DESC";

/// 메시지 조회
pub const GET_MESSAGE: &str = "SELECT * FROM messages WHERE id = $1";

/// 두 사용자 간 대화 조회 (양방향, 시간순)
pub const GET_CONVERSATION: &str = r#"
    SELECT * FROM messages
    WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
    ORDER BY sent_at ASC
"#;

/// 두 사용자 간 최근 메시지 조회
pub const GET_LATEST_MESSAGE: &str = r#"
    SELECT * FROM messages
    WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
    ORDER BY sent_at DESC
    LIMIT 1
"#;

/// 사용자의 전체 대화 메시지 조회
pub const GET_USER_CONVERSATIONS: &str = r#"
    SELECT * FROM messages
    WHERE sender_id = $1 OR receiver_id = $1
    ORDER BY sent_at DESC
"#;

/// 읽지 않은 메시지 조회
pub const GET_UNREAD_MESSAGES: &str = r#"
    SELECT * FROM messages
    WHERE receiver_id = $1 AND is_read = FALSE
    ORDER BY sent_at DESC
"#;

/// 읽지 않은 메시지 수 조회
pub const COUNT_UNREAD_MESSAGES: &str =
    "SELECT COUNT(*) as total FROM messages WHERE receiver_id = $1 AND is_read = FALSE";

/// 읽은 메시지 조회
pub const GET_READ_MESSAGES: &str = r#"
    SELECT * FROM messages
    WHERE receiver_id = $1 AND is_read = TRUE
    ORDER BY sent_at DESC
"#;

/// 발신자별 최근 미확인 메시지 조회 (대화 목록용)
pub const GET_UNREAD_CONVERSATIONS: &str = r#"
    SELECT DISTINCT ON (sender_id) * FROM messages
    WHERE receiver_id = $1 AND is_read = FALSE
    ORDER BY sender_id, sent_at DESC
"#;

/// 알림용 미확인 메시지 조회 (최신순, 개수 제한)
pub const GET_NOTIFICATIONS: &str = r#"
    SELECT * FROM messages
    WHERE receiver_id = $1 AND is_read = FALSE
    ORDER BY sent_at DESC
    LIMIT $2
"#;

/// 사용자 메시지 내용 검색
pub const SEARCH_USER_MESSAGES: &str = r#"
    SELECT * FROM messages
    WHERE (sender_id = $1 OR receiver_id = $1) AND content ILIKE $2
    ORDER BY sent_at DESC
"#;

/// 사용자가 보낸 미디어 메시지 조회
pub const GET_USER_MEDIA_MESSAGES: &str = r#"
    SELECT * FROM messages
    WHERE sender_id = $1 AND media_type = $2
    ORDER BY sent_at DESC
"#;

/// 상품 관련 메시지 조회
pub const GET_ITEM_MESSAGES: &str =
    "SELECT * FROM messages WHERE item_id = $1 ORDER BY sent_at ASC";

/// 거래 관련 메시지 조회
pub const GET_TRANSACTION_MESSAGES: &str =
    "SELECT * FROM messages WHERE transaction_id = $1 ORDER BY sent_at ASC";

/// 기간별 메시지 조회
pub const GET_MESSAGES_BY_DATE_RANGE: &str = r#"
    SELECT * FROM messages
    WHERE sent_at >= $1 AND sent_at <= $2
    ORDER BY sent_at ASC
"#;

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 메시지 조회
pub async fn get_all_messages(db_manager: &DatabaseManager) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 모든 메시지 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_ALL_MESSAGES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 메시지 조회
pub async fn get_message(
    db_manager: &DatabaseManager,
    message_id: i64,
) -> Result<Option<Message>, SqlxError> {
    info!("{:<12} --> 메시지 조회 id: {}", "Query", message_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_MESSAGE)
                    .bind(message_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 두 사용자 간 대화 조회
pub async fn get_conversation(
    db_manager: &DatabaseManager,
    user1_id: i64,
    user2_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!(
        "{:<12} --> 대화 조회: {} <-> {}",
        "Query", user1_id, user2_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_CONVERSATION)
                    .bind(user1_id)
                    .bind(user2_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 두 사용자 간 최근 메시지 조회
pub async fn get_latest_message(
    db_manager: &DatabaseManager,
    user1_id: i64,
    user2_id: i64,
) -> Result<Option<Message>, SqlxError> {
    info!(
        "{:<12} --> 최근 메시지 조회: {} <-> {}",
        "Query", user1_id, user2_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_LATEST_MESSAGE)
                    .bind(user1_id)
                    .bind(user2_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자의 전체 대화 메시지 조회
pub async fn get_user_conversations(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 사용자 대화 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_USER_CONVERSATIONS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 읽지 않은 메시지 조회
pub async fn get_unread_messages(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 미확인 메시지 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_UNREAD_MESSAGES)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 읽지 않은 메시지 수 조회
pub async fn count_unread_messages(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<i64, SqlxError> {
    info!(
        "{:<12} --> 미확인 메시지 수 조회 user_id: {}",
        "Query", user_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_UNREAD_MESSAGES)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(result.get("total"))
            })
        })
        .await
}

/// 읽은 메시지 조회
pub async fn get_read_messages(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 읽은 메시지 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_READ_MESSAGES)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 발신자별 최근 미확인 메시지 조회
pub async fn get_unread_conversations(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!(
        "{:<12} --> 미확인 대화 목록 조회 user_id: {}",
        "Query", user_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_UNREAD_CONVERSATIONS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 알림용 미확인 메시지 조회
pub async fn get_notifications(
    db_manager: &DatabaseManager,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!(
        "{:<12} --> 알림 조회 user_id: {} limit: {}",
        "Query", user_id, limit
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_NOTIFICATIONS)
                    .bind(user_id)
                    .bind(limit)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 메시지 내용 검색
pub async fn search_user_messages(
    db_manager: &DatabaseManager,
    user_id: i64,
    query: String,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 메시지 검색 user_id: {}", "Query", user_id);
    let pattern = format!("%{}%", query);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(SEARCH_USER_MESSAGES)
                    .bind(user_id)
                    .bind(pattern)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자가 보낸 미디어 메시지 조회
pub async fn get_user_media_messages(
    db_manager: &DatabaseManager,
    user_id: i64,
    media_type: String,
) -> Result<Vec<Message>, SqlxError> {
    info!(
        "{:<12} --> 미디어 메시지 조회 user_id: {} type: {}",
        "Query", user_id, media_type
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_USER_MEDIA_MESSAGES)
                    .bind(user_id)
                    .bind(media_type)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 관련 메시지 조회
pub async fn get_item_messages(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 상품 메시지 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_ITEM_MESSAGES)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 거래 관련 메시지 조회
pub async fn get_transaction_messages(
    db_manager: &DatabaseManager,
    transaction_id: i64,
) -> Result<Vec<Message>, SqlxError> {
    info!(
        "{:<12} --> 거래 메시지 조회 transaction_id: {}",
        "Query", transaction_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_TRANSACTION_MESSAGES)
                    .bind(transaction_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 기간별 메시지 조회
pub async fn get_messages_by_date_range(
    db_manager: &DatabaseManager,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Message>, SqlxError> {
    info!("{:<12} --> 기간별 메시지 조회: {} ~ {}", "Query", start, end);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(GET_MESSAGES_BY_DATE_RANGE)
                    .bind(start)
                    .bind(end)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
