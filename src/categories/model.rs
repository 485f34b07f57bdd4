use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 카테고리 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<i64>,
    pub is_active: bool,
    pub item_count: i32,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
