use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub seller_id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub price: i64,
    pub condition: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_of_purchase: Option<i32>,
    pub original_receipt: Option<String>,
    pub image_urls: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub views: i64,
    pub status: String,
    pub is_negotiable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
}

// 허용 상품 상태
pub const ITEM_STATUSES: &[&str] = &["AVAILABLE", "RESERVED", "SOLD", "DELETED"];

// 허용 상품 품질 등급
pub const ITEM_CONDITIONS: &[&str] = &["NEW", "LIKE_NEW", "GOOD", "FAIR", "POOR"];

/// 상품 상태 검증
pub fn is_valid_status(status: &str) -> bool {
    ITEM_STATUSES.contains(&status)
}

/// 상품 품질 등급 검증
pub fn is_valid_condition(condition: &str) -> bool {
    ITEM_CONDITIONS.contains(&condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_statuses() {
        assert!(is_valid_status("AVAILABLE"));
        assert!(is_valid_status("RESERVED"));
        assert!(is_valid_status("SOLD"));
        assert!(is_valid_status("DELETED"));
    }

    #[test]
    fn test_invalid_status() {
        assert!(!is_valid_status("PENDING"));
        assert!(!is_valid_status("available"));
        assert!(!is_valid_status(""));
    }

    #[test]
    fn test_valid_conditions() {
        assert!(is_valid_condition("NEW"));
        assert!(is_valid_condition("LIKE_NEW"));
        assert!(is_valid_condition("POOR"));
    }

    #[test]
    fn test_invalid_condition() {
        assert!(!is_valid_condition("USED"));
        assert!(!is_valid_condition("new"));
    }
}
