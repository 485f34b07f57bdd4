/// 가격 제안 관련 커맨드 처리
/// 1. 제안 생성 / 수정
/// 2. 수락 / 거절 / 역제안 / 철회
/// 3. 역제안 응답 / 만료 처리
// region:    --- Imports
use super::model::{self, Offer};
use super::queries;
use crate::database::DatabaseManager;
use crate::users;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 제안 직접 생성 명령 (검증 없이 저장)
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOfferCommand {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
    pub offered_amount: i64,
    pub message: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 제안 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct MakeOfferCommand {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
    pub amount: i64,
    pub message: Option<String>,
    pub validity_hours: Option<i64>,
}

/// 제안 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOfferCommand {
    pub amount: i64,
    pub message: Option<String>,
}

/// 제안 거절 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct RejectOfferCommand {
    pub reason: Option<String>,
}

/// 역제안 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CounterOfferCommand {
    pub counter_amount: i64,
    pub counter_message: Option<String>,
}

/// 역제안 응답 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct RespondCounterCommand {
    pub accept: bool,
    pub new_counter_amount: Option<i64>,
    pub message: Option<String>,
}

/// 제안 조회 (존재 확인)
async fn fetch_offer(
    offer_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    let offer = queries::get_offer(db_manager, offer_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    offer.ok_or_else(|| {
        serde_json::json!({
            "error": "Offer not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 1. 제안 직접 생성 (PENDING 상태로 저장)
pub async fn handle_create_offer(
    cmd: CreateOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 제안 직접 생성: buyer {} item {} 금액 {}",
        "Command", cmd.buyer_id, cmd.item_id, cmd.offered_amount
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "INSERT INTO offers (buyer_id, seller_id, item_id, offered_amount, message, status, expires_at, created_at)
                     VALUES ($1, $2, $3, $4, $5, 'PENDING', $6, $7)
                     RETURNING *",
                )
                .bind(cmd.buyer_id)
                .bind(cmd.seller_id)
                .bind(cmd.item_id)
                .bind(cmd.offered_amount)
                .bind(cmd.message)
                .bind(cmd.expires_at)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 2. 제안 생성 (중복 대기 제안 거부)
pub async fn handle_make_offer(
    cmd: MakeOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 제안 생성: buyer {} item {} 금액 {}",
        "Command", cmd.buyer_id, cmd.item_id, cmd.amount
    );

    // 구매자/판매자 확인
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

    // 같은 상품에 대한 대기 중 제안 확인
    let pending = queries::get_pending_buyer_offer(db_manager, cmd.buyer_id, cmd.item_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    if pending.is_some() {
        return Err(serde_json::json!({
            "error": "You already have a pending offer for this item",
            "code": "ALREADY_PENDING"
        }));
    }

    let now = Utc::now();
    let expires_at = cmd.validity_hours.map(|hours| now + Duration::hours(hours));

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "INSERT INTO offers (buyer_id, seller_id, item_id, offered_amount, message, status, expires_at, created_at)
                     VALUES ($1, $2, $3, $4, $5, 'PENDING', $6, $7)
                     RETURNING *",
                )
                .bind(cmd.buyer_id)
                .bind(cmd.seller_id)
                .bind(cmd.item_id)
                .bind(cmd.amount)
                .bind(cmd.message)
                .bind(expires_at)
                .bind(now)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 3. 제안 수정 (대기 상태에서만)
pub async fn handle_update_offer(
    offer_id: i64,
    cmd: UpdateOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 제안 수정 id: {} 금액: {}",
        "Command", offer_id, cmd.amount
    );

    let offer = fetch_offer(offer_id, db_manager).await?;
    if offer.status.as_str() != "PENDING" {
        return Err(serde_json::json!({
            "error": "Only pending offers can be updated",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers SET offered_amount = $1, message = COALESCE($2, message) WHERE id = $3 RETURNING *",
                )
                .bind(cmd.amount)
                .bind(cmd.message)
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 4. 제안 수락 (대기/역제안 상태에서만)
pub async fn handle_accept_offer(
    offer_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!("{:<12} --> 제안 수락 id: {}", "Command", offer_id);

    let offer = fetch_offer(offer_id, db_manager).await?;
    if !model::is_open_status(&offer.status) {
        return Err(serde_json::json!({
            "error": "Offer cannot be accepted in its current status",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers SET status = 'ACCEPTED', accepted_at = $1, responded_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 5. 제안 거절 (거절 사유는 역제안 메시지 칸에 저장)
pub async fn handle_reject_offer(
    offer_id: i64,
    cmd: RejectOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!("{:<12} --> 제안 거절 id: {}", "Command", offer_id);

    let offer = fetch_offer(offer_id, db_manager).await?;
    if !model::is_open_status(&offer.status) {
        return Err(serde_json::json!({
            "error": "Offer cannot be rejected in its current status",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers
                     SET status = 'REJECTED', counter_offer_message = COALESCE($1, counter_offer_message),
                         rejected_at = $2, responded_at = $2
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(cmd.reason)
                .bind(Utc::now())
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 6. 역제안 (대기 상태에서만)
pub async fn handle_counter_offer(
    offer_id: i64,
    cmd: CounterOfferCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 역제안 id: {} 금액: {}",
        "Command", offer_id, cmd.counter_amount
    );

    let offer = fetch_offer(offer_id, db_manager).await?;
    if offer.status.as_str() != "PENDING" {
        return Err(serde_json::json!({
            "error": "Only pending offers can be countered",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers
                     SET status = 'COUNTERED', counter_offer_amount = $1, counter_offer_message = $2,
                         counter_offer_created_at = $3, responded_at = $3
                     WHERE id = $4
                     RETURNING *",
                )
                .bind(cmd.counter_amount)
                .bind(cmd.counter_message)
                .bind(Utc::now())
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 7. 제안 철회 (구매자 본인만)
pub async fn handle_cancel_offer(
    offer_id: i64,
    buyer_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 제안 철회 id: {} buyer_id: {}",
        "Command", offer_id, buyer_id
    );

    let offer = fetch_offer(offer_id, db_manager).await?;
    if offer.buyer_id != buyer_id {
        return Err(serde_json::json!({
            "error": "Only the buyer can cancel this offer",
            "code": "NOT_BUYER"
        }));
    }
    if !model::is_open_status(&offer.status) {
        return Err(serde_json::json!({
            "error": "Offer cannot be cancelled in its current status",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers SET status = 'WITHDRAWN', responded_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 8. 역제안 응답 (수락, 재제안 또는 거절)
pub async fn handle_respond_counter(
    offer_id: i64,
    cmd: RespondCounterCommand,
    db_manager: &DatabaseManager,
) -> Result<Offer, serde_json::Value> {
    info!(
        "{:<12} --> 역제안 응답 id: {} accept: {}",
        "Command", offer_id, cmd.accept
    );

    let offer = fetch_offer(offer_id, db_manager).await?;
    if offer.status.as_str() != "COUNTERED" {
        return Err(serde_json::json!({
            "error": "Offer has no counter offer to respond to",
            "code": "INVALID_STATUS",
            "status": offer.status
        }));
    }

    let now = Utc::now();
    if cmd.accept {
        // 역제안 수락
        return db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, Offer>(
                        "UPDATE offers SET status = 'ACCEPTED', accepted_at = $1, responded_at = $1 WHERE id = $2 RETURNING *",
                    )
                    .bind(now)
                    .bind(offer_id)
                    .fetch_one(&mut **tx)
                    .await
                })
            })
            .await
            .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}));
    }

    if let Some(new_amount) = cmd.new_counter_amount {
        // 새 금액으로 다시 제안 (협상 재개)
        return db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, Offer>(
                        "UPDATE offers
                         SET status = 'PENDING', offered_amount = $1, message = COALESCE($2, message),
                             created_at = $3, responded_at = $3
                         WHERE id = $4
                         RETURNING *",
                    )
                    .bind(new_amount)
                    .bind(cmd.message)
                    .bind(now)
                    .bind(offer_id)
                    .fetch_one(&mut **tx)
                    .await
                })
            })
            .await
            .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}));
    }

    // 역제안 거절
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "UPDATE offers
                     SET status = 'REJECTED', counter_offer_message = COALESCE($1, counter_offer_message),
                         rejected_at = $2, responded_at = $2
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(cmd.message)
                .bind(now)
                .bind(offer_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 9. 만료된 제안 일괄 처리 (만료 시각이 지난 대기 제안)
pub async fn handle_mark_expired_offers(
    db_manager: &DatabaseManager,
) -> Result<u64, serde_json::Value> {
    info!("{:<12} --> 만료된 제안 일괄 처리", "Command");

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    "UPDATE offers SET status = 'EXPIRED', is_expired = TRUE
                     WHERE status = 'PENDING' AND expires_at IS NOT NULL AND expires_at < $1",
                )
                .bind(Utc::now())
                .execute(&mut **tx)
                .await?;
                Ok(result.rows_affected())
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 10. 제안 생성 가능 여부 확인
pub async fn can_make_offer(
    buyer_id: i64,
    item_id: i64,
    db_manager: &DatabaseManager,
) -> Result<bool, serde_json::Value> {
    info!(
        "{:<12} --> 제안 가능 여부 확인 buyer_id: {} item_id: {}",
        "Command", buyer_id, item_id
    );

    let pending = queries::get_pending_buyer_offer(db_manager, buyer_id, item_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    Ok(pending.is_none())
}

// endregion: --- Commands
