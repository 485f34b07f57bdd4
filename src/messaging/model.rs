use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 메시지 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub item_id: Option<i64>,
    pub transaction_id: Option<i64>,
    pub content: Option<String>,
    pub message_type: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub status: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
