/// 카테고리 관련 커맨드 처리
/// 1. 카테고리 생성 / 수정
/// 2. 카테고리 비활성화 (소프트 삭제)
// region:    --- Imports
use super::model::Category;
use crate::database::DatabaseManager;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 카테고리 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<i64>,
}

/// 카테고리 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCategoryCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_category_id: Option<i64>,
}

/// 1. 카테고리 생성
pub async fn handle_create_category(
    cmd: CreateCategoryCommand,
    db_manager: &DatabaseManager,
) -> Result<Category, serde_json::Value> {
    info!("{:<12} --> 카테고리 생성: {}", "Command", cmd.name);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(
                    "INSERT INTO categories (name, description, parent_category_id, created_at)
                     VALUES ($1, $2, $3, $4)
                     RETURNING *",
                )
                .bind(cmd.name)
                .bind(cmd.description)
                .bind(cmd.parent_category_id)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 2. 카테고리 수정
pub async fn handle_update_category(
    category_id: i64,
    cmd: UpdateCategoryCommand,
    db_manager: &DatabaseManager,
) -> Result<Category, serde_json::Value> {
    info!("{:<12} --> 카테고리 수정 id: {}", "Command", category_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(
                    "UPDATE categories
                     SET name = COALESCE($1, name),
                         description = COALESCE($2, description),
                         parent_category_id = COALESCE($3, parent_category_id),
                         updated_at = $4
                     WHERE id = $5
                     RETURNING *",
                )
                .bind(cmd.name)
                .bind(cmd.description)
                .bind(cmd.parent_category_id)
                .bind(Utc::now())
                .bind(category_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Category not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 3. 카테고리 비활성화 (소프트 삭제)
pub async fn handle_delete_category(
    category_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Category, serde_json::Value> {
    info!("{:<12} --> 카테고리 비활성화 id: {}", "Command", category_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(
                    "UPDATE categories SET is_active = FALSE, updated_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(category_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Category not found",
            "code": "NOT_FOUND"
        })
    })
}

// endregion: --- Commands
