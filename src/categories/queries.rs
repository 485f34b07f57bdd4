// region:    --- Imports
use super::model::Category;
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 카테고리 조회
pub const GET_ALL_CATEGORIES: &str = "SELECT * FROM categories ORDER BY name";

/// 카테고리 조회
pub const GET_CATEGORY: &str = "SELECT * FROM categories WHERE id = $1";

/// 최상위 카테고리 조회
pub const GET_ROOT_CATEGORIES: &str =
    "SELECT * FROM categories WHERE parent_category_id IS NULL ORDER BY name";

/// 하위 카테고리 조회
pub const GET_SUBCATEGORIES: &str =
    "SELECT * FROM categories WHERE parent_category_id = $1 ORDER BY name";

/// 활성 카테고리 조회
pub const GET_ACTIVE_CATEGORIES: &str =
    "SELECT * FROM categories WHERE is_active = TRUE ORDER BY name";

/// 이름으로 카테고리 검색
pub const SEARCH_CATEGORIES_BY_NAME: &str =
    "SELECT * FROM categories WHERE name ILIKE $1 ORDER BY name";

/// 인기 카테고리 조회 (조회수 내림차순)
pub const GET_POPULAR_CATEGORIES: &str = r#"
    SELECT * FROM categories
    WHERE is_active = TRUE
    ORDER BY view_count DESC
    LIMIT $1 OFFSET $2
"#;

/// 활성 카테고리 수 조회
pub const COUNT_ACTIVE_CATEGORIES: &str =
    "SELECT COUNT(*) as total FROM categories WHERE is_active = TRUE";

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 카테고리 조회
pub async fn get_all_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 모든 카테고리 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_ALL_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 조회
pub async fn get_category(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Option<Category>, SqlxError> {
    info!("{:<12} --> 카테고리 조회 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_CATEGORY)
                    .bind(category_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 최상위 카테고리 조회
pub async fn get_root_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 최상위 카테고리 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_ROOT_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 하위 카테고리 조회
pub async fn get_subcategories(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 하위 카테고리 조회 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_SUBCATEGORIES)
                    .bind(category_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 활성 카테고리 조회
pub async fn get_active_categories(
    db_manager: &DatabaseManager,
) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 활성 카테고리 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_ACTIVE_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 이름으로 카테고리 검색
pub async fn search_categories_by_name(
    db_manager: &DatabaseManager,
    name: String,
) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 카테고리 검색: {}", "Query", name);
    let pattern = format!("%{}%", name);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(SEARCH_CATEGORIES_BY_NAME)
                    .bind(pattern)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 인기 카테고리 조회
pub async fn get_popular_categories(
    db_manager: &DatabaseManager,
    limit: i64,
    offset: i64,
) -> Result<Vec<Category>, SqlxError> {
    info!(
        "{:<12} --> 인기 카테고리 조회 limit: {} offset: {}",
        "Query", limit, offset
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(GET_POPULAR_CATEGORIES)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 활성 카테고리 수 조회
pub async fn count_active_categories(db_manager: &DatabaseManager) -> Result<i64, SqlxError> {
    info!("{:<12} --> 활성 카테고리 수 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_ACTIVE_CATEGORIES)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(result.get("total"))
            })
        })
        .await
}

// endregion: --- Query Handlers
