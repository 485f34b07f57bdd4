// region:    --- Imports
use super::model::Offer;
use crate::database::DatabaseManager;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 제안 조회
pub const GET_ALL_OFFERS: &str = "SELECT * FROM offers ORDER BY created_at DESC";

/// 제안 조회
pub const GET_OFFER: &str = "SELECT * FROM offers WHERE id = $1";

/// 상품 제안 조회
pub const GET_ITEM_OFFERS: &str =
    "SELECT * FROM offers WHERE item_id = $1 ORDER BY created_at DESC";

/// 구매자 제안 조회
pub const GET_BUYER_OFFERS: &str =
    "SELECT * FROM offers WHERE buyer_id = $1 ORDER BY created_at DESC";

/// 판매자 제안 조회
pub const GET_SELLER_OFFERS: &str =
    "SELECT * FROM offers WHERE seller_id = $1 ORDER BY created_at DESC";

/// 사용자 제안 조회 (보낸 제안 + 받은 제안)
pub const GET_USER_OFFERS: &str = r#"
    SELECT * FROM offers
    WHERE buyer_id = $1 OR seller_id = $1
    ORDER BY created_at DESC
"#;

/// 상태별 제안 조회
pub const GET_OFFERS_BY_STATUS: &str =
    "SELECT * FROM offers WHERE status = $1 ORDER BY created_at DESC";

/// 구매자 상태별 제안 조회
pub const GET_BUYER_OFFERS_BY_STATUS: &str =
    "SELECT * FROM offers WHERE buyer_id = $1 AND status = $2 ORDER BY created_at DESC";

/// 판매자 상태별 제안 조회
pub const GET_SELLER_OFFERS_BY_STATUS: &str =
    "SELECT * FROM offers WHERE seller_id = $1 AND status = $2 ORDER BY created_at DESC";

/// 상품 상태별 제안 조회
pub const GET_ITEM_OFFERS_BY_STATUS: &str =
    "SELECT * FROM offers WHERE item_id = $1 AND status = $2 ORDER BY created_at DESC";

/// 협상 이력 조회 (구매자-판매자-상품)
pub const GET_OFFER_HISTORY: &str = r#"
    SELECT * FROM offers
    WHERE buyer_id = $1 AND seller_id = $2 AND item_id = $3
    ORDER BY created_at DESC
"#;

/// 상품의 대기 중 제안 조회
pub const GET_PENDING_ITEM_OFFERS: &str =
    "SELECT * FROM offers WHERE item_id = $1 AND status = 'PENDING' ORDER BY created_at DESC";

/// 상품 최고 제안 조회 (대기/역제안 상태)
pub const GET_HIGHEST_ITEM_OFFER: &str = r#"
    SELECT * FROM offers
    WHERE item_id = $1 AND status IN ('PENDING', 'COUNTERED')
    ORDER BY offered_amount DESC
    LIMIT 1
"#;

/// 구매자의 상품에 대한 대기 중 제안 조회
pub const GET_PENDING_BUYER_OFFER: &str = r#"
    SELECT * FROM offers
    WHERE buyer_id = $1 AND item_id = $2 AND status = 'PENDING'
    LIMIT 1
"#;

/// 상품 제안 수 조회
pub const COUNT_ITEM_OFFERS: &str =
    "SELECT COUNT(*) as total FROM offers WHERE item_id = $1";

/// 상태별 제안 수 조회
pub const COUNT_OFFERS_BY_STATUS: &str =
    "SELECT COUNT(*) as total FROM offers WHERE status = $1";

/// 최근 제안 조회
pub const GET_RECENT_OFFERS: &str =
    "SELECT * FROM offers WHERE created_at >= $1 ORDER BY created_at DESC";

/// 만료된 제안 조회
pub const GET_EXPIRED_OFFERS: &str = r#"
    SELECT * FROM offers
    WHERE status = 'EXPIRED' OR is_expired = TRUE
    ORDER BY created_at DESC
"#;

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 제안 조회
pub async fn get_all_offers(db_manager: &DatabaseManager) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 모든 제안 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_ALL_OFFERS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 제안 조회
pub async fn get_offer(
    db_manager: &DatabaseManager,
    offer_id: i64,
) -> Result<Option<Offer>, SqlxError> {
    info!("{:<12} --> 제안 조회 id: {}", "Query", offer_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_OFFER)
                    .bind(offer_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 제안 조회
pub async fn get_item_offers(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 상품 제안 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_ITEM_OFFERS)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 구매자 제안 조회
pub async fn get_buyer_offers(
    db_manager: &DatabaseManager,
    buyer_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 구매자 제안 조회 buyer_id: {}", "Query", buyer_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_BUYER_OFFERS)
                    .bind(buyer_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 제안 조회
pub async fn get_seller_offers(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 판매자 제안 조회 seller_id: {}",
        "Query", seller_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_SELLER_OFFERS)
                    .bind(seller_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 제안 조회 (보낸 제안 + 받은 제안)
pub async fn get_user_offers(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 사용자 제안 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_USER_OFFERS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상태별 제안 조회
pub async fn get_offers_by_status(
    db_manager: &DatabaseManager,
    status: String,
) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 상태별 제안 조회: {}", "Query", status);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_OFFERS_BY_STATUS)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 구매자 상태별 제안 조회
pub async fn get_buyer_offers_by_status(
    db_manager: &DatabaseManager,
    buyer_id: i64,
    status: String,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 구매자 상태별 제안 조회 buyer_id: {} status: {}",
        "Query", buyer_id, status
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_BUYER_OFFERS_BY_STATUS)
                    .bind(buyer_id)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 상태별 제안 조회
pub async fn get_seller_offers_by_status(
    db_manager: &DatabaseManager,
    seller_id: i64,
    status: String,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 판매자 상태별 제안 조회 seller_id: {} status: {}",
        "Query", seller_id, status
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_SELLER_OFFERS_BY_STATUS)
                    .bind(seller_id)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 상태별 제안 조회
pub async fn get_item_offers_by_status(
    db_manager: &DatabaseManager,
    item_id: i64,
    status: String,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 상품 상태별 제안 조회 item_id: {} status: {}",
        "Query", item_id, status
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_ITEM_OFFERS_BY_STATUS)
                    .bind(item_id)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 협상 이력 조회
pub async fn get_offer_history(
    db_manager: &DatabaseManager,
    buyer_id: i64,
    seller_id: i64,
    item_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 협상 이력 조회: buyer {} seller {} item {}",
        "Query", buyer_id, seller_id, item_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_OFFER_HISTORY)
                    .bind(buyer_id)
                    .bind(seller_id)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품의 대기 중 제안 조회
pub async fn get_pending_item_offers(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<Offer>, SqlxError> {
    info!(
        "{:<12} --> 상품 대기 제안 조회 item_id: {}",
        "Query", item_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_PENDING_ITEM_OFFERS)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 최고 제안 조회
pub async fn get_highest_item_offer(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Option<Offer>, SqlxError> {
    info!("{:<12} --> 최고 제안 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_HIGHEST_ITEM_OFFER)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 구매자의 상품에 대한 대기 중 제안 조회
pub async fn get_pending_buyer_offer(
    db_manager: &DatabaseManager,
    buyer_id: i64,
    item_id: i64,
) -> Result<Option<Offer>, SqlxError> {
    info!(
        "{:<12} --> 구매자 대기 제안 조회 buyer_id: {} item_id: {}",
        "Query", buyer_id, item_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_PENDING_BUYER_OFFER)
                    .bind(buyer_id)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 제안 수 조회
pub async fn count_item_offers(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<i64, SqlxError> {
    info!("{:<12} --> 상품 제안 수 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_ITEM_OFFERS)
                    .bind(item_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(result.get("total"))
            })
        })
        .await
}

/// 상태별 제안 수 조회
pub async fn count_offers_by_status(
    db_manager: &DatabaseManager,
    status: String,
) -> Result<i64, SqlxError> {
    info!("{:<12} --> 상태별 제안 수 조회: {}", "Query", status);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_OFFERS_BY_STATUS)
                    .bind(status)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(result.get("total"))
            })
        })
        .await
}

/// 최근 제안 조회
pub async fn get_recent_offers(
    db_manager: &DatabaseManager,
    since: DateTime<Utc>,
) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 최근 제안 조회 since: {}", "Query", since);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_RECENT_OFFERS)
                    .bind(since)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 만료된 제안 조회
pub async fn get_expired_offers(db_manager: &DatabaseManager) -> Result<Vec<Offer>, SqlxError> {
    info!("{:<12} --> 만료된 제안 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(GET_EXPIRED_OFFERS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
