/// 상품 관련 커맨드 처리
/// 1. 상품 등록 / 수정 / 삭제
/// 2. 상품 상태 변경 (판매 완료 포함)
// region:    --- Imports
use super::model::{self, Item};
use crate::database::DatabaseManager;
use crate::users;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 상품 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemCommand {
    pub seller_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub price: i64,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_of_purchase: Option<i32>,
    pub original_receipt: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_negotiable: Option<bool>,
}

/// 상품 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItemCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<i64>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year_of_purchase: Option<i32>,
    pub original_receipt: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub is_negotiable: Option<bool>,
}

/// 상품 상태 변경 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateItemStatusCommand {
    pub status: String,
}

/// 1. 상품 등록 (판매자 프로필 및 카테고리 집계 갱신)
pub async fn handle_create_item(
    cmd: CreateItemCommand,
    db_manager: &DatabaseManager,
) -> Result<Item, serde_json::Value> {
    info!("{:<12} --> 상품 등록: {}", "Command", cmd.title);

    let condition = cmd.condition.unwrap_or_else(|| "GOOD".to_string());
    if !model::is_valid_condition(&condition) {
        return Err(serde_json::json!({
            "error": "Invalid condition",
            "code": "INVALID_CONDITION",
            "condition": condition
        }));
    }

    // 판매자 확인
    let seller = users::queries::get_user(db_manager, cmd.seller_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    if seller.is_none() {
        return Err(serde_json::json!({
            "error": "Seller not found",
            "code": "NOT_FOUND"
        }));
    }

    let seller_id = cmd.seller_id;
    let category_id = cmd.category_id;
    let item = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(
                    "INSERT INTO items (seller_id, title, description, category_id, price, condition, brand, model, year_of_purchase, original_receipt, image_urls, tags, location, is_negotiable, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                     RETURNING *",
                )
                .bind(cmd.seller_id)
                .bind(cmd.title)
                .bind(cmd.description.unwrap_or_default())
                .bind(cmd.category_id)
                .bind(cmd.price)
                .bind(condition)
                .bind(cmd.brand)
                .bind(cmd.model)
                .bind(cmd.year_of_purchase)
                .bind(cmd.original_receipt)
                .bind(cmd.image_urls)
                .bind(cmd.tags)
                .bind(cmd.location)
                .bind(cmd.is_negotiable.unwrap_or(true))
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    // 판매자 프로필의 등록 상품 수 갱신
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "UPDATE user_profiles SET items_listed = items_listed + 1, last_active_at = $1 WHERE user_id = $2",
                )
                .bind(Utc::now())
                .bind(seller_id)
                .execute(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    // 카테고리 상품 수 갱신
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("UPDATE categories SET item_count = item_count + 1 WHERE id = $1")
                    .bind(category_id)
                    .execute(&mut **tx)
                    .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(item)
}

/// 2. 상품 수정
pub async fn handle_update_item(
    item_id: i64,
    cmd: UpdateItemCommand,
    db_manager: &DatabaseManager,
) -> Result<Item, serde_json::Value> {
    info!("{:<12} --> 상품 수정 id: {}", "Command", item_id);

    if let Some(condition) = &cmd.condition {
        if !model::is_valid_condition(condition) {
            return Err(serde_json::json!({
                "error": "Invalid condition",
                "code": "INVALID_CONDITION",
                "condition": condition
            }));
        }
    }

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(
                    "UPDATE items
                     SET title = COALESCE($1, title),
                         description = COALESCE($2, description),
                         category_id = COALESCE($3, category_id),
                         price = COALESCE($4, price),
                         condition = COALESCE($5, condition),
                         brand = COALESCE($6, brand),
                         model = COALESCE($7, model),
                         year_of_purchase = COALESCE($8, year_of_purchase),
                         original_receipt = COALESCE($9, original_receipt),
                         image_urls = COALESCE($10, image_urls),
                         tags = COALESCE($11, tags),
                         location = COALESCE($12, location),
                         is_negotiable = COALESCE($13, is_negotiable),
                         updated_at = $14
                     WHERE id = $15
                     RETURNING *",
                )
                .bind(cmd.title)
                .bind(cmd.description)
                .bind(cmd.category_id)
                .bind(cmd.price)
                .bind(cmd.condition)
                .bind(cmd.brand)
                .bind(cmd.model)
                .bind(cmd.year_of_purchase)
                .bind(cmd.original_receipt)
                .bind(cmd.image_urls)
                .bind(cmd.tags)
                .bind(cmd.location)
                .bind(cmd.is_negotiable)
                .bind(Utc::now())
                .bind(item_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Item not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 3. 상품 상태 변경 (SOLD는 판매 시각도 기록)
pub async fn handle_update_item_status(
    item_id: i64,
    cmd: UpdateItemStatusCommand,
    db_manager: &DatabaseManager,
) -> Result<Item, serde_json::Value> {
    info!(
        "{:<12} --> 상품 상태 변경 id: {} status: {}",
        "Command", item_id, cmd.status
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
                sqlx::query_as::<_, Item>(
                    "UPDATE items
                     SET status = $1,
                         sold_at = CASE WHEN $1 = 'SOLD' THEN $2 ELSE sold_at END,
                         updated_at = $2
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(cmd.status)
                .bind(Utc::now())
                .bind(item_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Item not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 4. 상품 판매 완료 처리
pub async fn handle_mark_item_sold(
    item_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Item, serde_json::Value> {
    info!("{:<12} --> 상품 판매 완료 처리 id: {}", "Command", item_id);
    handle_update_item_status(
        item_id,
        UpdateItemStatusCommand {
            status: "SOLD".to_string(),
        },
        db_manager,
    )
    .await
}

/// 5. 상품 삭제 (소프트 삭제)
pub async fn handle_delete_item(
    item_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Item, serde_json::Value> {
    info!("{:<12} --> 상품 삭제 id: {}", "Command", item_id);
    handle_update_item_status(
        item_id,
        UpdateItemStatusCommand {
            status: "DELETED".to_string(),
        },
        db_manager,
    )
    .await
}

/// 6. 상품 조회수 증가
pub async fn record_item_view(item_id: i64, db_manager: &DatabaseManager) -> Result<(), sqlx::Error> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("UPDATE items SET views = views + 1 WHERE id = $1")
                    .bind(item_id)
                    .execute(&mut **tx)
                    .await?;
                Ok(())
            })
        })
        .await
}

// endregion: --- Commands
