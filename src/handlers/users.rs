// region:    --- Imports
use super::{error_response, not_found, PageParams};
use crate::database::DatabaseManager;
use crate::users::commands::{
    self, RegisterUserCommand, UpdatePreferencesCommand, UpdateProfileCommand,
    UpdateProfilePictureCommand,
};
use crate::users::queries;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Params

/// 이름 검색 파라미터
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: String,
}

/// 지역 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub province: String,
    pub district: Option<String>,
}

// endregion: --- Params

// region:    --- Command Handlers

/// 사용자 생성 요청 처리
pub async fn handle_create_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<RegisterUserCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 사용자 생성 요청 처리 시작", "Command");
    match commands::handle_create_user(cmd, &db_manager).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => error_response(e),
    }
}

/// 계정 정지 요청 처리
pub async fn handle_suspend_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 계정 정지 요청 user_id: {}", "Command", user_id);
    match commands::handle_suspend_user(user_id, &db_manager).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => error_response(e),
    }
}

/// 계정 정지 해제 요청 처리
pub async fn handle_unsuspend_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 계정 정지 해제 요청 user_id: {}",
        "Command", user_id
    );
    match commands::handle_unsuspend_user(user_id, &db_manager).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => error_response(e),
    }
}

/// 프로필 수정 요청 처리
pub async fn handle_update_profile(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Json(cmd): Json<UpdateProfileCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 프로필 수정 요청 user_id: {}",
        "Command", user_id
    );
    match commands::handle_update_profile(user_id, cmd, &db_manager).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => error_response(e),
    }
}

/// 프로필 사진 변경 요청 처리
pub async fn handle_update_profile_picture(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Json(cmd): Json<UpdateProfilePictureCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 프로필 사진 변경 요청 user_id: {}",
        "Command", user_id
    );
    match commands::handle_update_profile_picture(user_id, cmd, &db_manager).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => error_response(e),
    }
}

/// 알림 설정 변경 요청 처리
pub async fn handle_update_preferences(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Json(cmd): Json<UpdatePreferencesCommand>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 알림 설정 변경 요청 user_id: {}",
        "Command", user_id
    );
    match commands::handle_update_preferences(user_id, cmd, &db_manager).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => error_response(e),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 사용자 조회
pub async fn handle_get_users(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 사용자 조회", "HandlerQuery");
    match queries::get_all_users(&db_manager).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 페이지 조회
pub async fn handle_get_users_paged(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 사용자 페이지 조회 page: {} size: {}",
        "HandlerQuery", params.page, params.size
    );
    match queries::get_users_paged(&db_manager, params.size, params.page * params.size).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 활성 사용자 조회
pub async fn handle_get_active_users(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 활성 사용자 조회", "HandlerQuery");
    match queries::get_active_users(&db_manager).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 비활성 사용자 조회
pub async fn handle_get_inactive_users(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 비활성 사용자 조회", "HandlerQuery");
    match queries::get_inactive_users(&db_manager).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 이름으로 사용자 검색
pub async fn handle_search_users(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<NameParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 이름으로 사용자 검색: {}",
        "HandlerQuery", params.name
    );
    match queries::search_users_by_name(&db_manager, params.name).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 지역별 사용자 조회
pub async fn handle_get_users_by_location(
    State(db_manager): State<Arc<DatabaseManager>>,
    Query(params): Query<LocationParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 지역별 사용자 조회: {}",
        "HandlerQuery", params.province
    );
    match queries::get_users_by_location(&db_manager, params.province, params.district).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 통계 조회
pub async fn handle_get_user_stats(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 사용자 통계 조회", "HandlerQuery");
    let total = match queries::count_users(&db_manager).await {
        Ok(total) => total,
        Err(e) => {
            return (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    };
    match queries::count_active_users(&db_manager).await {
        Ok(active) => Json(serde_json::json!({
            "totalUsers": total,
            "activeUsers": active
        }))
        .into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 조회
pub async fn handle_get_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 사용자 조회 id: {}", "HandlerQuery", user_id);
    match queries::get_user(&db_manager, user_id).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => not_found("User not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 사용자 프로필 조회
pub async fn handle_get_user_profile(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 사용자 프로필 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match queries::get_user_profile(&db_manager, user_id).await {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => not_found("Profile not found"),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/users 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/", get(handle_get_users).post(handle_create_user))
        .route("/paged", get(handle_get_users_paged))
        .route("/active", get(handle_get_active_users))
        .route("/inactive", get(handle_get_inactive_users))
        .route("/search", get(handle_search_users))
        .route("/location", get(handle_get_users_by_location))
        .route("/stats", get(handle_get_user_stats))
        .route("/:id", get(handle_get_user))
        .route("/:id/suspend", put(handle_suspend_user))
        .route("/:id/unsuspend", put(handle_unsuspend_user))
        .route(
            "/:id/profile",
            get(handle_get_user_profile).put(handle_update_profile),
        )
        .route("/:id/profile/picture", put(handle_update_profile_picture))
        .route("/:id/preferences", put(handle_update_preferences))
}

// endregion: --- Routes
