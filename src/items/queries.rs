// region:    --- Imports
use super::model::Item;
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 상품 조회
pub const GET_ALL_ITEMS: &str = "SELECT * FROM items ORDER BY created_at DESC";

/// 상품 조회
pub const GET_ITEM: &str = "SELECT * FROM items WHERE id = $1";

/// 판매자 상품 조회
pub const GET_ITEMS_BY_SELLER: &str =
    "SELECT * FROM items WHERE seller_id = $1 ORDER BY created_at DESC";

/// 카테고리 상품 조회
pub const GET_ITEMS_BY_CATEGORY: &str =
    "SELECT * FROM items WHERE category_id = $1 ORDER BY created_at DESC";

/// 상태별 상품 조회
pub const GET_ITEMS_BY_STATUS: &str =
    "SELECT * FROM items WHERE status = $1 ORDER BY created_at DESC";

/// 품질 등급별 상품 조회
pub const GET_ITEMS_BY_CONDITION: &str =
    "SELECT * FROM items WHERE condition = $1 ORDER BY created_at DESC";

/// 키워드 상품 검색 (판매 중, 가격 범위 선택, 페이지)
pub const SEARCH_ITEMS: &str = r#"
    SELECT * FROM items
    WHERE status = 'AVAILABLE'
      AND (title ILIKE $1 OR description ILIKE $1
           OR EXISTS (SELECT 1 FROM unnest(tags) tag WHERE tag ILIKE $1))
      AND ($2::BIGINT IS NULL OR price >= $2)
      AND ($3::BIGINT IS NULL OR price <= $3)
    ORDER BY created_at DESC
    LIMIT $4 OFFSET $5
"#;

/// 판매 중 상품 조회 (최신순)
pub const GET_AVAILABLE_ITEMS_NEWEST: &str =
    "SELECT * FROM items WHERE status = 'AVAILABLE' ORDER BY created_at DESC";

/// 판매 중 상품 조회 (오래된 순)
pub const GET_AVAILABLE_ITEMS_OLDEST: &str =
    "SELECT * FROM items WHERE status = 'AVAILABLE' ORDER BY created_at ASC";

/// 판매 중 상품 조회 (저가순)
pub const GET_AVAILABLE_ITEMS_PRICE_ASC: &str =
    "SELECT * FROM items WHERE status = 'AVAILABLE' ORDER BY price ASC";

/// 판매 중 상품 조회 (고가순)
pub const GET_AVAILABLE_ITEMS_PRICE_DESC: &str =
    "SELECT * FROM items WHERE status = 'AVAILABLE' ORDER BY price DESC";

/// 판매 중 상품 조회 (조회수순)
pub const GET_AVAILABLE_ITEMS_POPULAR: &str =
    "SELECT * FROM items WHERE status = 'AVAILABLE' ORDER BY views DESC";

/// 가격 범위 상품 조회
pub const GET_ITEMS_BY_PRICE_RANGE: &str = r#"
    SELECT * FROM items
    WHERE status = 'AVAILABLE' AND price >= $1 AND price <= $2
    ORDER BY price ASC
"#;

/// 지역 상품 검색
pub const SEARCH_ITEMS_BY_LOCATION: &str =
    "SELECT * FROM items WHERE location ILIKE $1 ORDER BY created_at DESC";

/// 유사 상품 조회 (같은 카테고리, 판매 중)
pub const GET_SIMILAR_ITEMS: &str = r#"
    SELECT * FROM items
    WHERE category_id = $1 AND id <> $2 AND status = 'AVAILABLE'
    ORDER BY created_at DESC
"#;

/// 판매자 상품 수 조회
pub const COUNT_SELLER_ITEMS: &str =
    "SELECT COUNT(*) as total FROM items WHERE seller_id = $1";

/// 판매자 상태별 상품 수 조회
pub const COUNT_SELLER_ITEMS_BY_STATUS: &str =
    "SELECT COUNT(*) as total FROM items WHERE seller_id = $1 AND status = $2";

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 상품 조회
pub async fn get_all_items(db_manager: &DatabaseManager) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 모든 상품 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ALL_ITEMS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상품 조회
pub async fn get_item(db_manager: &DatabaseManager, item_id: i64) -> Result<Option<Item>, SqlxError> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 상품 조회
pub async fn get_items_by_seller(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 판매자 상품 조회 seller_id: {}", "Query", seller_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEMS_BY_SELLER)
                    .bind(seller_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 상품 조회
pub async fn get_items_by_category(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Vec<Item>, SqlxError> {
    info!(
        "{:<12} --> 카테고리 상품 조회 category_id: {}",
        "Query", category_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEMS_BY_CATEGORY)
                    .bind(category_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 상태별 상품 조회
pub async fn get_items_by_status(
    db_manager: &DatabaseManager,
    status: String,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 상태별 상품 조회: {}", "Query", status);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEMS_BY_STATUS)
                    .bind(status)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 품질 등급별 상품 조회
pub async fn get_items_by_condition(
    db_manager: &DatabaseManager,
    condition: String,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 품질 등급별 상품 조회: {}", "Query", condition);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEMS_BY_CONDITION)
                    .bind(condition)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 키워드 상품 검색
pub async fn search_items(
    db_manager: &DatabaseManager,
    keyword: String,
    min_price: Option<i64>,
    max_price: Option<i64>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 상품 검색: {}", "Query", keyword);
    let pattern = format!("%{}%", keyword);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(SEARCH_ITEMS)
                    .bind(pattern)
                    .bind(min_price)
                    .bind(max_price)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 정렬된 판매 중 상품 조회
pub async fn get_sorted_items(
    db_manager: &DatabaseManager,
    sort_by: String,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 정렬된 상품 조회: {}", "Query", sort_by);
    let sql = match sort_by.as_str() {
        "price_asc" => GET_AVAILABLE_ITEMS_PRICE_ASC,
        "price_desc" => GET_AVAILABLE_ITEMS_PRICE_DESC,
        "oldest" => GET_AVAILABLE_ITEMS_OLDEST,
        "popular" => GET_AVAILABLE_ITEMS_POPULAR,
        _ => GET_AVAILABLE_ITEMS_NEWEST,
    };
    db_manager
        .transaction(|tx| {
            Box::pin(async move { sqlx::query_as::<_, Item>(sql).fetch_all(&mut **tx).await })
        })
        .await
}

/// 가격 범위 상품 조회
pub async fn get_items_by_price_range(
    db_manager: &DatabaseManager,
    min_price: i64,
    max_price: i64,
) -> Result<Vec<Item>, SqlxError> {
    info!(
        "{:<12} --> 가격 범위 상품 조회: {} ~ {}",
        "Query", min_price, max_price
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_ITEMS_BY_PRICE_RANGE)
                    .bind(min_price)
                    .bind(max_price)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 지역 상품 검색
pub async fn search_items_by_location(
    db_manager: &DatabaseManager,
    location: String,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 지역 상품 검색: {}", "Query", location);
    let pattern = format!("%{}%", location);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(SEARCH_ITEMS_BY_LOCATION)
                    .bind(pattern)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 유사 상품 조회
pub async fn get_similar_items(
    db_manager: &DatabaseManager,
    category_id: i64,
    item_id: i64,
) -> Result<Vec<Item>, SqlxError> {
    info!("{:<12} --> 유사 상품 조회 item_id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(GET_SIMILAR_ITEMS)
                    .bind(category_id)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 판매자 상품 수 조회 (상태 필터 선택)
pub async fn count_seller_items(
    db_manager: &DatabaseManager,
    seller_id: i64,
    status: Option<String>,
) -> Result<i64, SqlxError> {
    info!(
        "{:<12} --> 판매자 상품 수 조회 seller_id: {} status: {:?}",
        "Query", seller_id, status
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = match status {
                    Some(status) => {
                        sqlx::query(COUNT_SELLER_ITEMS_BY_STATUS)
                            .bind(seller_id)
                            .bind(status)
                            .fetch_one(&mut **tx)
                            .await?
                    }
                    None => {
                        sqlx::query(COUNT_SELLER_ITEMS)
                            .bind(seller_id)
                            .fetch_one(&mut **tx)
                            .await?
                    }
                };
                Ok(result.get("total"))
            })
        })
        .await
}

// endregion: --- Query Handlers
