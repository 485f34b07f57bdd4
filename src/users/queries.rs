// region:    --- Imports
use super::model::{User, UserProfile};
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Queries

/// 모든 사용자 조회
pub const GET_ALL_USERS: &str = "SELECT * FROM users ORDER BY created_at DESC";

/// 사용자 조회
pub const GET_USER: &str = "SELECT * FROM users WHERE id = $1";

/// 이메일로 사용자 조회
pub const GET_USER_BY_EMAIL: &str = "SELECT * FROM users WHERE email = $1";

/// 인증 토큰으로 사용자 조회
pub const GET_USER_BY_TOKEN: &str = "SELECT * FROM users WHERE verification_token = $1";

/// 사용자 페이지 조회
pub const GET_USERS_PAGED: &str =
    "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2";

/// 활성 사용자 조회
pub const GET_ACTIVE_USERS: &str =
    "SELECT * FROM users WHERE is_active = TRUE ORDER BY created_at DESC";

/// 비활성 사용자 조회
pub const GET_INACTIVE_USERS: &str =
    "SELECT * FROM users WHERE is_active = FALSE ORDER BY created_at DESC";

/// 이름으로 사용자 검색
pub const SEARCH_USERS_BY_NAME: &str = r#"
    SELECT * FROM users
    WHERE username ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1
    ORDER BY username
"#;

/// 지역(주)으로 사용자 조회
pub const GET_USERS_BY_PROVINCE: &str =
    "SELECT * FROM users WHERE province = $1 ORDER BY created_at DESC";

/// 지역(주/구역)으로 사용자 조회
pub const GET_USERS_BY_LOCATION: &str =
    "SELECT * FROM users WHERE province = $1 AND district = $2 ORDER BY created_at DESC";

/// 전체 사용자 수 조회
pub const COUNT_USERS: &str = "SELECT COUNT(*) as total FROM users";

/// 활성 사용자 수 조회
pub const COUNT_ACTIVE_USERS: &str =
    "SELECT COUNT(*) as total FROM users WHERE is_active = TRUE";

/// 사용자 프로필 조회
pub const GET_USER_PROFILE: &str = "SELECT * FROM user_profiles WHERE user_id = $1";

// endregion: --- Queries

// region:    --- Query Handlers

/// 모든 사용자 조회
pub async fn get_all_users(db_manager: &DatabaseManager) -> Result<Vec<User>, SqlxError> {
    info!("{:<12} --> 모든 사용자 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_ALL_USERS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 조회
pub async fn get_user(db_manager: &DatabaseManager, user_id: i64) -> Result<Option<User>, SqlxError> {
    info!("{:<12} --> 사용자 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_USER)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 이메일로 사용자 조회
pub async fn get_user_by_email(
    db_manager: &DatabaseManager,
    email: String,
) -> Result<Option<User>, SqlxError> {
    info!("{:<12} --> 이메일로 사용자 조회: {}", "Query", email);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_USER_BY_EMAIL)
                    .bind(email)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 인증 토큰으로 사용자 조회
pub async fn get_user_by_token(
    db_manager: &DatabaseManager,
    token: String,
) -> Result<Option<User>, SqlxError> {
    info!("{:<12} --> 인증 토큰으로 사용자 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_USER_BY_TOKEN)
                    .bind(token)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 페이지 조회
pub async fn get_users_paged(
    db_manager: &DatabaseManager,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, SqlxError> {
    info!(
        "{:<12} --> 사용자 페이지 조회 limit: {} offset: {}",
        "Query", limit, offset
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_USERS_PAGED)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 활성 사용자 조회
pub async fn get_active_users(db_manager: &DatabaseManager) -> Result<Vec<User>, SqlxError> {
    info!("{:<12} --> 활성 사용자 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_ACTIVE_USERS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 비활성 사용자 조회
pub async fn get_inactive_users(db_manager: &DatabaseManager) -> Result<Vec<User>, SqlxError> {
    info!("{:<12} --> 비활성 사용자 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(GET_INACTIVE_USERS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 이름으로 사용자 검색
pub async fn search_users_by_name(
    db_manager: &DatabaseManager,
    name: String,
) -> Result<Vec<User>, SqlxError> {
    info!("{:<12} --> 이름으로 사용자 검색: {}", "Query", name);
    let pattern = format!("%{}%", name);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(SEARCH_USERS_BY_NAME)
                    .bind(pattern)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 지역으로 사용자 조회 (구역은 선택)
pub async fn get_users_by_location(
    db_manager: &DatabaseManager,
    province: String,
    district: Option<String>,
) -> Result<Vec<User>, SqlxError> {
    info!(
        "{:<12} --> 지역으로 사용자 조회: {} {:?}",
        "Query", province, district
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                match district {
                    Some(district) => {
                        sqlx::query_as::<_, User>(GET_USERS_BY_LOCATION)
                            .bind(province)
                            .bind(district)
                            .fetch_all(&mut **tx)
                            .await
                    }
                    None => {
                        sqlx::query_as::<_, User>(GET_USERS_BY_PROVINCE)
                            .bind(province)
                            .fetch_all(&mut **tx)
                            .await
                    }
                }
            })
        })
        .await
}

/// 전체 사용자 수 조회
pub async fn count_users(db_manager: &DatabaseManager) -> Result<i64, SqlxError> {
    info!("{:<12} --> 전체 사용자 수 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_USERS).fetch_one(&mut **tx).await?;
                Ok(result.get("total"))
            })
        })
        .await
}

/// 활성 사용자 수 조회
pub async fn count_active_users(db_manager: &DatabaseManager) -> Result<i64, SqlxError> {
    info!("{:<12} --> 활성 사용자 수 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(COUNT_ACTIVE_USERS).fetch_one(&mut **tx).await?;
                Ok(result.get("total"))
            })
        })
        .await
}

/// 사용자 프로필 조회
pub async fn get_user_profile(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Option<UserProfile>, SqlxError> {
    info!("{:<12} --> 사용자 프로필 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(GET_USER_PROFILE)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
