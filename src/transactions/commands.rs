/// 거래 관련 커맨드 처리
/// 1. 거래 생성 (직접 또는 수락된 제안에서)
/// 2. 결제 / 인도 / 수령 확인 흐름
/// 3. 취소 / 환불 / 분쟁 처리
// region:    --- Imports
use super::model::{self, Transaction};
use super::queries;
use crate::database::DatabaseManager;
use crate::offers;
use crate::users;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 거래 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionCommand {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
    pub amount: i64,
    pub payment_method: Option<String>,
    pub buyer_phone_number: Option<String>,
    pub seller_phone_number: Option<String>,
}

/// 제안 기반 거래 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFromOfferCommand {
    pub payment_method: Option<String>,
}

/// 거래 상태 변경 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTransactionStatusCommand {
    pub status: String,
}

/// 결제 처리 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessPaymentCommand {
    pub payment_reference: String,
}

/// 결제 검증 명령 (시뮬레이션)
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyPaymentCommand {
    pub verification_code: String,
}

/// 인도 정보 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryInfoCommand {
    pub pickup_location: String,
    pub pickup_date: DateTime<Utc>,
    pub pickup_instructions: Option<String>,
}

/// 거래 취소 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CancelTransactionCommand {
    pub user_id: i64,
    pub reason: Option<String>,
}

/// 환불 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct RefundTransactionCommand {
    pub refund_reason: Option<String>,
}

/// 분쟁 신고 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportIssueCommand {
    pub reporter_id: i64,
    pub description: String,
}

/// 구매자 메모 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct BuyerMessageCommand {
    pub buyer_id: i64,
    pub message: String,
}

/// 판매자 메모 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct SellerMessageCommand {
    pub seller_id: i64,
    pub message: String,
}

/// 거래 조회 (존재 확인)
async fn fetch_transaction(
    transaction_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    let transaction = queries::get_transaction(db_manager, transaction_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    transaction.ok_or_else(|| {
        serde_json::json!({
            "error": "Transaction not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 거래 저장
async fn insert_transaction(
    cmd: CreateTransactionCommand,
    payment_method: String,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    let reference = model::generate_transaction_reference();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "INSERT INTO transactions (buyer_id, seller_id, item_id, amount, payment_method, buyer_phone_number, seller_phone_number, transaction_reference, status, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'PENDING', $9)
                     RETURNING *",
                )
                .bind(cmd.buyer_id)
                .bind(cmd.seller_id)
                .bind(cmd.item_id)
                .bind(cmd.amount)
                .bind(payment_method)
                .bind(cmd.buyer_phone_number)
                .bind(cmd.seller_phone_number)
                .bind(reference)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 1. 거래 생성 (원시 생성, 참조 번호 발급)
pub async fn handle_create_transaction_raw(
    cmd: CreateTransactionCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 거래 생성(원시): buyer {} item {}",
        "Command", cmd.buyer_id, cmd.item_id
    );
    let payment_method = cmd
        .payment_method
        .clone()
        .unwrap_or_else(|| "CASH".to_string());
    insert_transaction(cmd, payment_method, db_manager).await
}

/// 2. 거래 생성 (당사자/결제 수단 검증)
pub async fn handle_create_transaction(
    cmd: CreateTransactionCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 거래 생성: buyer {} seller {} item {}",
        "Command", cmd.buyer_id, cmd.seller_id, cmd.item_id
    );

    let buyer = users::queries::get_user(db_manager, cmd.buyer_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    if buyer.is_none() {
        return Err(serde_json::json!({
            "error": "Buyer not found",
            "code": "NOT_FOUND"
        }));
    }
    let seller = users::queries::get_user(db_manager, cmd.seller_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    if seller.is_none() {
        return Err(serde_json::json!({
            "error": "Seller not found",
            "code": "NOT_FOUND"
        }));
    }

    let payment_method = cmd
        .payment_method
        .clone()
        .unwrap_or_else(|| "CASH".to_string());
    if !model::is_valid_payment_method(&payment_method) {
        return Err(serde_json::json!({
            "error": "Invalid payment method",
            "code": "INVALID_PAYMENT_METHOD",
            "payment_method": payment_method
        }));
    }

    insert_transaction(cmd, payment_method, db_manager).await
}

/// 3. 수락된 제안에서 거래 생성
pub async fn handle_create_from_offer(
    offer_id: i64,
    cmd: CreateFromOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 제안 기반 거래 생성 offer_id: {}", "Command", offer_id);

    let offer = offers::queries::get_offer(db_manager, offer_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(offer) = offer else {
        return Err(serde_json::json!({
            "error": "Offer not found",
            "code": "NOT_FOUND"
        }));
    };
    if offer.status.as_str() != "ACCEPTED" {
        return Err(serde_json::json!({
            "error": "Offer must be accepted before creating a transaction",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    let payment_method = cmd.payment_method.unwrap_or_else(|| "CASH".to_string());
    if !model::is_valid_payment_method(&payment_method) {
        return Err(serde_json::json!({
            "error": "Invalid payment method",
            "code": "INVALID_PAYMENT_METHOD",
            "payment_method": payment_method
        }));
    }

    // 역제안이 수락된 경우 역제안 금액으로 거래
    let amount = offer.counter_offer_amount.unwrap_or(offer.offered_amount);
    insert_transaction(
        CreateTransactionCommand {
            buyer_id: offer.buyer_id,
            seller_id: offer.seller_id,
            item_id: offer.item_id,
            amount,
            payment_method: None,
            buyer_phone_number: None,
            seller_phone_number: None,
        },
        payment_method,
        db_manager,
    )
    .await
}

/// 4. 거래 상태 변경 (해당 시각 컬럼도 기록)
pub async fn handle_update_transaction_status(
    transaction_id: i64,
    cmd: UpdateTransactionStatusCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 거래 상태 변경 id: {} status: {}",
        "Command", transaction_id, cmd.status
    );

    if !model::is_valid_status(&cmd.status) {
        return Err(serde_json::json!({
            "error": "Invalid status",
            "code": "INVALID_STATUS",
            "status": cmd.status
        }));
    }

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions
                     SET status = $1,
                         payment_confirmed_at = CASE WHEN $1 = 'PAYMENT_CONFIRMED' THEN $2 ELSE payment_confirmed_at END,
                         pickup_completed_at = CASE WHEN $1 = 'PICKUP_COMPLETED' THEN $2 ELSE pickup_completed_at END,
                         completed_at = CASE WHEN $1 = 'COMPLETED' THEN $2 ELSE completed_at END,
                         cancelled_at = CASE WHEN $1 = 'CANCELLED' THEN $2 ELSE cancelled_at END
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(cmd.status)
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Transaction not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 5. 결제 처리 (대기 상태에서만, 참조 번호를 결제 참조로 교체)
pub async fn handle_process_payment(
    transaction_id: i64,
    cmd: ProcessPaymentCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 결제 처리 id: {}", "Command", transaction_id);

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.status.as_str() != "PENDING" {
        return Err(serde_json::json!({
            "error": "Payment can only be processed for pending transactions",
            "code": "INVALID_STATUS",
            "status": transaction.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'PAYMENT_SENT', transaction_reference = $1 WHERE id = $2 RETURNING *",
                )
                .bind(cmd.payment_reference)
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 6. 결제 확인 (판매자만, 결제 송금 이후)
pub async fn handle_confirm_payment(
    transaction_id: i64,
    seller_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 결제 확인 id: {} seller_id: {}",
        "Command", transaction_id, seller_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.seller_id != seller_id {
        return Err(serde_json::json!({
            "error": "Only the seller can confirm payment",
            "code": "NOT_SELLER"
        }));
    }
    if transaction.status.as_str() != "PAYMENT_SENT" {
        return Err(serde_json::json!({
            "error": "Payment must be sent before it can be confirmed",
            "code": "INVALID_STATUS",
            "status": transaction.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'PAYMENT_CONFIRMED', payment_confirmed_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 7. 결제 검증 (시뮬레이션, 무조건 결제 확인 처리)
pub async fn handle_verify_payment(
    transaction_id: i64,
    cmd: VerifyPaymentCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 결제 검증 id: {} code: {}",
        "Command", transaction_id, cmd.verification_code
    );

    fetch_transaction(transaction_id, db_manager).await?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'PAYMENT_CONFIRMED', payment_confirmed_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 8. 인도 정보 등록 (픽업 일정 확정)
pub async fn handle_add_delivery_info(
    transaction_id: i64,
    cmd: DeliveryInfoCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 인도 정보 등록 id: {}", "Command", transaction_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions
                     SET status = 'PICKUP_ARRANGED', pickup_location = $1, pickup_date = $2, pickup_instructions = $3
                     WHERE id = $4
                     RETURNING *",
                )
                .bind(cmd.pickup_location)
                .bind(cmd.pickup_date)
                .bind(cmd.pickup_instructions)
                .bind(transaction_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Transaction not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 9. 인도 완료 확인 (판매자만)
pub async fn handle_confirm_delivered(
    transaction_id: i64,
    seller_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 인도 완료 확인 id: {} seller_id: {}",
        "Command", transaction_id, seller_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.seller_id != seller_id {
        return Err(serde_json::json!({
            "error": "Only the seller can confirm delivery",
            "code": "NOT_SELLER"
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'PICKUP_COMPLETED', pickup_completed_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 10. 수령 확인 (구매자만, 거래 완료 및 양측 프로필 집계 갱신)
pub async fn handle_confirm_received(
    transaction_id: i64,
    buyer_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 수령 확인 id: {} buyer_id: {}",
        "Command", transaction_id, buyer_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.buyer_id != buyer_id {
        return Err(serde_json::json!({
            "error": "Only the buyer can confirm receipt",
            "code": "NOT_BUYER"
        }));
    }

    let seller_id = transaction.seller_id;
    let completed = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'COMPLETED', completed_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    // 구매자/판매자 프로필 집계 갱신
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "UPDATE user_profiles
                     SET items_purchased = items_purchased + 1, total_transactions = total_transactions + 1, last_active_at = $1
                     WHERE user_id = $2",
                )
                .bind(Utc::now())
                .bind(buyer_id)
                .execute(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "UPDATE user_profiles
                     SET items_sold = items_sold + 1, total_transactions = total_transactions + 1, last_active_at = $1
                     WHERE user_id = $2",
                )
                .bind(Utc::now())
                .bind(seller_id)
                .execute(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(completed)
}

/// 11. 거래 완료 (픽업 완료 상태에서만)
pub async fn handle_complete_transaction(
    transaction_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 거래 완료 id: {}", "Command", transaction_id);

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.status.as_str() != "PICKUP_COMPLETED" {
        return Err(serde_json::json!({
            "error": "Transaction must complete pickup first",
            "code": "INVALID_STATUS",
            "status": transaction.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'COMPLETED', completed_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 12. 거래 취소 (구매자 또는 판매자만)
pub async fn handle_cancel_transaction(
    transaction_id: i64,
    cmd: CancelTransactionCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 거래 취소 id: {} user_id: {}",
        "Command", transaction_id, cmd.user_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.buyer_id != cmd.user_id && transaction.seller_id != cmd.user_id {
        return Err(serde_json::json!({
            "error": "Only a participant can cancel this transaction",
            "code": "NOT_OWNER"
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'CANCELLED', cancellation_reason = $1, cancelled_at = $2 WHERE id = $3 RETURNING *",
                )
                .bind(cmd.reason)
                .bind(Utc::now())
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 13. 환불 처리 (취소/분쟁 상태에서만)
pub async fn handle_refund_transaction(
    transaction_id: i64,
    cmd: RefundTransactionCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!("{:<12} --> 환불 처리 id: {}", "Command", transaction_id);

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    match transaction.status.as_str() {
        "CANCELLED" | "DISPUTED" => {}
        _ => {
            return Err(serde_json::json!({
                "error": "Only cancelled or disputed transactions can be refunded",
                "code": "INVALID_STATUS",
                "status": transaction.status
            }))
        }
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions
                     SET is_refunded = TRUE, refunded_at = $1, cancellation_reason = COALESCE($2, cancellation_reason)
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(Utc::now())
                .bind(cmd.refund_reason)
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 14. 분쟁 신고
pub async fn handle_report_issue(
    transaction_id: i64,
    cmd: ReportIssueCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 분쟁 신고 id: {} reporter: {}",
        "Command", transaction_id, cmd.reporter_id
    );

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET status = 'DISPUTED', dispute_description = $1 WHERE id = $2 RETURNING *",
                )
                .bind(cmd.description)
                .bind(transaction_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Transaction not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 15. 구매자 메모 등록 (구매자만)
pub async fn handle_set_buyer_message(
    transaction_id: i64,
    cmd: BuyerMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 구매자 메모 등록 id: {}",
        "Command", transaction_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.buyer_id != cmd.buyer_id {
        return Err(serde_json::json!({
            "error": "Only the buyer can add a buyer message",
            "code": "NOT_BUYER"
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET buyer_message = $1 WHERE id = $2 RETURNING *",
                )
                .bind(cmd.message)
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 16. 판매자 메모 등록 (판매자만)
pub async fn handle_set_seller_message(
    transaction_id: i64,
    cmd: SellerMessageCommand,
    db_manager: &DatabaseManager,
) -> Result<Transaction, serde_json::Value> {
    info!(
        "{:<12} --> 판매자 메모 등록 id: {}",
        "Command", transaction_id
    );

    let transaction = fetch_transaction(transaction_id, db_manager).await?;
    if transaction.seller_id != cmd.seller_id {
        return Err(serde_json::json!({
            "error": "Only the seller can add a seller message",
            "code": "NOT_SELLER"
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Transaction>(
                    "UPDATE transactions SET seller_message = $1 WHERE id = $2 RETURNING *",
                )
                .bind(cmd.message)
                .bind(transaction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 17. 영수증 생성
pub async fn handle_generate_receipt(
    transaction_id: i64,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 영수증 생성 id: {}", "Command", transaction_id);

    let transaction = fetch_transaction(transaction_id, db_manager).await?;

    let buyer = users::queries::get_user(db_manager, transaction.buyer_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let seller = users::queries::get_user(db_manager, transaction.seller_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;

    let buyer_username = buyer.map(|u| u.username).unwrap_or_else(|| "Unknown".to_string());
    let seller_username = seller
        .map(|u| u.username)
        .unwrap_or_else(|| "Unknown".to_string());

    let receipt = model::format_receipt(&transaction, &buyer_username, &seller_username);
    Ok(serde_json::json!({"receipt": receipt}))
}

// endregion: --- Commands
