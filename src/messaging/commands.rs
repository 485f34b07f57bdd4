/// 메시지 관련 커맨드 처리
/// 1. 대화 시작 / 메시지 전송 (텍스트, 미디어, 가격 제안, 위치, 약속)
/// 2. 읽음 처리 / 신고 / 삭제
// region:    --- Imports
use super::model::Message;
use crate::database::DatabaseManager;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 메시지 생성 명령 (원시 생성)
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMessageCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: Option<i64>,
    pub transaction_id: Option<i64>,
    pub content: Option<String>,
    pub message_type: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
}

/// 대화 시작 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct StartConversationCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: i64,
    pub content: String,
}

/// 텍스트 메시지 전송 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub message_type: Option<String>,
}

/// 미디어 메시지 전송 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMediaCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub media_url: String,
    pub media_type: String,
}

/// 사진 메시지 전송 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct SendPhotoCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub photo_url: String,
    pub caption: Option<String>,
}

/// 가격 제안 메시지 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceOfferMessageCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: Option<i64>,
    pub offer_price: i64,
}

/// 가격 제안 응답 메시지 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponseMessageCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: Option<i64>,
    pub counter_offer: Option<i64>,
    pub accepted: bool,
}

/// 위치 공유 메시지 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareLocationCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
}

/// 약속 잡기 메시지 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleMeetupCommand {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: Option<i64>,
    pub meetup_time: DateTime<Utc>,
    pub location: String,
}

/// 저장할 메시지 필드
struct NewMessage {
    sender_id: i64,
    receiver_id: i64,
    item_id: Option<i64>,
    transaction_id: Option<i64>,
    content: Option<String>,
    message_type: String,
    media_url: Option<String>,
    media_type: Option<String>,
}

/// 메시지 저장
async fn save_message(
    new_message: NewMessage,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(
                    "INSERT INTO messages (sender_id, receiver_id, item_id, transaction_id, content, message_type, media_url, media_type, sent_at, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                     RETURNING *",
                )
                .bind(new_message.sender_id)
                .bind(new_message.receiver_id)
                .bind(new_message.item_id)
                .bind(new_message.transaction_id)
                .bind(new_message.content)
                .bind(new_message.message_type)
                .bind(new_message.media_url)
                .bind(new_message.media_type)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 1. 메시지 생성 (원시 생성)
pub async fn handle_create_message(
    cmd: CreateMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 메시지 생성: {} -> {}",
        "Command", cmd.sender_id, cmd.receiver_id
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: cmd.item_id,
            transaction_id: cmd.transaction_id,
            content: cmd.content,
            message_type: cmd.message_type.unwrap_or_else(|| "TEXT".to_string()),
            media_url: cmd.media_url,
            media_type: cmd.media_type,
        },
        db_manager,
    )
    .await
}

/// 2. 대화 시작 (상품 문의)
pub async fn handle_start_conversation(
    cmd: StartConversationCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 대화 시작: {} -> {} item: {}",
        "Command", cmd.sender_id, cmd.receiver_id, cmd.item_id
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: Some(cmd.item_id),
            transaction_id: None,
            content: Some(cmd.content),
            message_type: "TEXT".to_string(),
            media_url: None,
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 3. 텍스트 메시지 전송
pub async fn handle_send_message(
    cmd: SendMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 메시지 전송: {} -> {}",
        "Command", cmd.sender_id, cmd.receiver_id
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: None,
            transaction_id: None,
            content: Some(cmd.content),
            message_type: cmd.message_type.unwrap_or_else(|| "TEXT".to_string()),
            media_url: None,
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 4. 미디어 메시지 전송
pub async fn handle_send_media(
    cmd: SendMediaCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 미디어 전송: {} -> {} type: {}",
        "Command", cmd.sender_id, cmd.receiver_id, cmd.media_type
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: None,
            transaction_id: None,
            content: None,
            message_type: "MEDIA".to_string(),
            media_url: Some(cmd.media_url),
            media_type: Some(cmd.media_type),
        },
        db_manager,
    )
    .await
}

/// 5. 사진 메시지 전송
pub async fn handle_send_photo(
    cmd: SendPhotoCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 사진 전송: {} -> {}",
        "Command", cmd.sender_id, cmd.receiver_id
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: None,
            transaction_id: None,
            content: cmd.caption,
            message_type: "MEDIA".to_string(),
            media_url: Some(cmd.photo_url),
            media_type: Some("IMAGE".to_string()),
        },
        db_manager,
    )
    .await
}

/// 6. 가격 제안 메시지 전송
pub async fn handle_send_price_offer(
    cmd: PriceOfferMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 가격 제안 메시지: {} -> {} 금액: {}",
        "Command", cmd.sender_id, cmd.receiver_id, cmd.offer_price
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: cmd.item_id,
            transaction_id: None,
            content: Some(format!("Price offer: RWF {}", cmd.offer_price)),
            message_type: "PRICE_OFFER".to_string(),
            media_url: None,
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 7. 가격 제안 응답 메시지 전송 (수락 또는 역제안)
pub async fn handle_send_price_response(
    cmd: PriceResponseMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 가격 제안 응답: {} -> {} accepted: {}",
        "Command", cmd.sender_id, cmd.receiver_id, cmd.accepted
    );
    let (content, message_type) = if cmd.accepted {
        ("Offer accepted!".to_string(), "OFFER_ACCEPTED".to_string())
    } else {
        let counter = cmd.counter_offer.unwrap_or_default();
        (
            format!("Counter offer: RWF {}", counter),
            "COUNTER_OFFER".to_string(),
        )
    };
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: cmd.item_id,
            transaction_id: None,
            content: Some(content),
            message_type,
            media_url: None,
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 8. 위치 공유 메시지 전송 (좌표는 media_url에 저장)
pub async fn handle_share_location(
    cmd: ShareLocationCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 위치 공유: {} -> {}",
        "Command", cmd.sender_id, cmd.receiver_id
    );
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: None,
            transaction_id: None,
            content: Some(format!("Shared location: {}", cmd.location_name)),
            message_type: "LOCATION".to_string(),
            media_url: Some(format!("{},{}", cmd.latitude, cmd.longitude)),
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 9. 거래 약속 메시지 전송
pub async fn handle_schedule_meetup(
    cmd: ScheduleMeetupCommand,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 약속 잡기: {} -> {}",
        "Command", cmd.sender_id, cmd.receiver_id
    );
    let meetup_time = cmd.meetup_time.format("%Y-%m-%d %H:%M");
    save_message(
        NewMessage {
            sender_id: cmd.sender_id,
            receiver_id: cmd.receiver_id,
            item_id: cmd.item_id,
            transaction_id: None,
            content: Some(format!(
                "Meetup scheduled for {} at {}",
                meetup_time, cmd.location
            )),
            message_type: "MEETUP".to_string(),
            media_url: None,
            media_type: None,
        },
        db_manager,
    )
    .await
}

/// 10. 메시지 읽음 처리
pub async fn handle_mark_read(
    message_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!("{:<12} --> 메시지 읽음 처리 id: {}", "Command", message_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(
                    "UPDATE messages SET is_read = TRUE, read_at = $1, status = 'READ', updated_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(message_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Message not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 11. 메시지 읽지 않음 처리
pub async fn handle_mark_unread(
    message_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!(
        "{:<12} --> 메시지 읽지 않음 처리 id: {}",
        "Command", message_id
    );

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(
                    "UPDATE messages SET is_read = FALSE, read_at = NULL, status = 'DELIVERED', updated_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(message_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Message not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 12. 대화 전체 읽음 처리
pub async fn handle_mark_all_read(
    receiver_id: i64,
    sender_id: i64,
    db_manager: &DatabaseManager,
) -> Result<u64, serde_json::Value> {
    info!(
        "{:<12} --> 대화 전체 읽음 처리: {} <- {}",
        "Command", receiver_id, sender_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    "UPDATE messages SET is_read = TRUE, read_at = $1, status = 'READ', updated_at = $1
                     WHERE receiver_id = $2 AND sender_id = $3 AND is_read = FALSE",
                )
                .bind(Utc::now())
                .bind(receiver_id)
                .bind(sender_id)
                .execute(&mut **tx)
                .await?;
                Ok(result.rows_affected())
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 13. 메시지 신고
pub async fn handle_report_message(
    message_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Message, serde_json::Value> {
    info!("{:<12} --> 메시지 신고 id: {}", "Command", message_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Message>(
                    "UPDATE messages SET status = 'REPORTED', updated_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(message_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Message not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 14. 메시지 삭제
pub async fn handle_delete_message(
    message_id: i64,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 메시지 삭제 id: {}", "Command", message_id);

    let deleted = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM messages WHERE id = $1")
                    .bind(message_id)
                    .execute(&mut **tx)
                    .await?;
                Ok(result.rows_affected())
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    if deleted == 0 {
        return Err(serde_json::json!({
            "error": "Message not found",
            "code": "NOT_FOUND"
        }));
    }
    Ok(())
}

/// 15. 대화 삭제 (양방향)
pub async fn handle_delete_conversation(
    user1_id: i64,
    user2_id: i64,
    db_manager: &DatabaseManager,
) -> Result<u64, serde_json::Value> {
    info!(
        "{:<12} --> 대화 삭제: {} <-> {}",
        "Command", user1_id, user2_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    "DELETE FROM messages
                     WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)",
                )
                .bind(user1_id)
                .bind(user2_id)
                .execute(&mut **tx)
                .await?;
                Ok(result.rows_affected())
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

// endregion: --- Commands
