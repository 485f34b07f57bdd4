// region:    --- Imports
use super::model::Transaction;
use crate::database::DatabaseManager;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 거래 조회
pub const GET_ALL_TRANSACTIONS: &str = "SELECT * FROM transactions ORDER BY created_at DESC";

/// 거래 조회
pub const GET_TRANSACTION: &str = "SELECT * FROM transactions WHERE id = $1";

/// 구매자 거래 조회
pub const GET_BUYER_TRANSACTIONS: &str =
    "SELECT * FROM transactions WHERE buyer_id = $1 ORDER BY created_at DESC";

/// 판매자 거래 조회
pub const GET_SELLER_TRANSACTIONS: &str =
    "SELECT * FROM transactions WHERE seller_id = $1 ORDER BY created_at DESC";

/// 사용자 거래 이력 조회 (구매 + 판매, 최신순)
pub const GET_USER_TRANSACTIONS: &str = r#"
    SELECT * FROM transactions
    WHERE buyer_id = $1 OR seller_id = $1
    ORDER BY created_at DESC
"#;

/// 상태별 거래 조회
pub const GET_TRANSACTIONS_BY_STATUS: &str =
    "SELECT * FROM transactions WHERE status = $1 ORDER BY created_at DESC";

/// 상품 거래 조회
pub const GET_ITEM_TRANSACTIONS: &str =
    "SELECT * FROM transactions WHERE item_id = $1 ORDER BY created_at DESC";

/// 참조 번호로 거래 조회
pub const GET_TRANSACTION_BY_REFERENCE: &str =
    "SELECT * FROM transactions WHERE transaction_reference = $1";

/// 미결제 거래 조회 (기준 시각 이전 생성)
pub const GET_PENDING_PAYMENTS: &str = r#"
    SELECT * FROM transactions
    WHERE status IN ('PENDING', 'PAYMENT_SENT') AND created_at < $1
    ORDER BY created_at ASC
"#;

/// 픽업 대기 거래 조회 (결제 확인, 픽업 일정 있음)
pub const GET_TRANSACTIONS_REQUIRING_PICKUP: &str = r#"
    SELECT * FROM transactions
    WHERE status = 'PAYMENT_CONFIRMED' AND pickup_date IS NOT NULL
    ORDER BY pickup_date ASC
"#;

/// 상태별 거래 수 조회
pub const COUNT_TRANSACTIONS_BY_STATUS: &str =
    "SELECT COUNT(*) as total FROM transactions WHERE status = $1";

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 거래 조회
pub async fn get_all_transactions(
    db_manager: &DatabaseManager,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 모든 거래 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_ALL_TRANSACTIONS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 거래 조회
pub async fn get_transaction(
    db_manager: &DatabaseManager,
    transaction_id: i64,
) -> Result<Option<Transaction>, SqlxError> {
    info!("{:<12} --> 거래 조회 id: {}", "Query", transaction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_TRANSACTION)
                    .bind(transaction_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 구매자 거래 조회
pub async fn get_buyer_transactions(
    db_manager: &DatabaseManager,
    buyer_id: i64,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 구매자 거래 조회 buyer_id: {}", "Query", buyer_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_BUYER_TRANSACTIONS)
                    .bind(buyer_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 거래 조회
pub async fn get_seller_transactions(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> Result<Vec<Transaction>, SqlxError> {
    info!(
        "{:<12} --> 판매자 거래 조회 seller_id: {}",
        "Query", seller_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_SELLER_TRANSACTIONS)
                    .bind(seller_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 거래 이력 조회 (구매 + 판매)
pub async fn get_user_transactions(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 사용자 거래 이력 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_USER_TRANSACTIONS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상태별 거래 조회
pub async fn get_transactions_by_status(
    db_manager: &DatabaseManager,
    status: String,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 상태별 거래 조회: {}", "Query", status);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_TRANSACTIONS_BY_STATUS)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 거래 조회
pub async fn get_item_transactions(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 상품 거래 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_ITEM_TRANSACTIONS)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 참조 번호로 거래 조회
pub async fn get_transaction_by_reference(
    db_manager: &DatabaseManager,
    reference: String,
) -> Result<Option<Transaction>, SqlxError> {
    info!("{:<12} --> 참조 번호로 거래 조회: {}", "Query", reference);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_TRANSACTION_BY_REFERENCE)
                    .bind(reference)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 미결제 거래 조회
pub async fn get_pending_payments(
    db_manager: &DatabaseManager,
    cutoff: DateTime<Utc>,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 미결제 거래 조회 cutoff: {}", "Query", cutoff);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_PENDING_PAYMENTS)
                    .bind(cutoff)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 픽업 대기 거래 조회
pub async fn get_transactions_requiring_pickup(
    db_manager: &DatabaseManager,
) -> Result<Vec<Transaction>, SqlxError> {
    info!("{:<12} --> 픽업 대기 거래 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(GET_TRANSACTIONS_REQUIRING_PICKUP)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상태별 거래 수 조회
pub async fn count_transactions_by_status(
    db_manager: &DatabaseManager,
    status: String,
) -> Result<i64, SqlxError> {
    info!("{:<12} --> 상태별 거래 수 조회: {}", "Query", status);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_TRANSACTIONS_BY_STATUS)
                    .bind(status)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(result.get("total"))
            })
        })
        .await
}

// endregion: --- Query Handlers
