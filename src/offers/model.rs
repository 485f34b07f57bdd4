use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 가격 제안 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
    pub offered_amount: i64,
    pub message: Option<String>,
    pub status: String,
    pub counter_offer_amount: Option<i64>,
    pub counter_offer_message: Option<String>,
    pub counter_offer_created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// 허용 제안 상태
pub const OFFER_STATUSES: &[&str] = &[
    "PENDING",
    "COUNTERED",
    "ACCEPTED",
    "REJECTED",
    "WITHDRAWN",
    "EXPIRED",
];

/// 제안 상태 검증
pub fn is_valid_status(status: &str) -> bool {
    OFFER_STATUSES.contains(&status)
}

/// 응답 가능한 상태인지 확인 (수락/거절 대상)
pub fn is_open_status(status: &str) -> bool {
    matches!(status, "PENDING" | "COUNTERED")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_statuses() {
        for status in OFFER_STATUSES {
            assert!(is_valid_status(status));
        }
    }

    #[test]
    fn test_invalid_status() {
        assert!(!is_valid_status("OPEN"));
        assert!(!is_valid_status("pending"));
    }

    #[test]
    fn test_open_status() {
        assert!(is_open_status("PENDING"));
        assert!(is_open_status("COUNTERED"));
        assert!(!is_open_status("ACCEPTED"));
        assert!(!is_open_status("WITHDRAWN"));
        assert!(!is_open_status("EXPIRED"));
    }
}
