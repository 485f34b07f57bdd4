use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 사용자 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing, default)]
    pub verification_token: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// 사용자 프로필 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub items_listed: i32,
    pub items_sold: i32,
    pub items_purchased: i32,
    pub total_transactions: i32,
    pub last_active_at: Option<DateTime<Utc>>,
    pub preferred_language: String,
    pub timezone: String,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
